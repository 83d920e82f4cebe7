//! The selected team for the current user.
//!
//! A session is either anonymous or authenticated as one team. Selecting a
//! team involves no credential check. The state is written to durable
//! storage on every change and read back on startup; it never expires.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::storage::{Backend, SESSION_KEY};
use crate::team::Team;

/// Version tag written alongside the session state.
const SESSION_FORMAT_VERSION: u32 = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionState {
    is_authenticated: bool,
    current_team: Option<Team>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    state: SessionState,
    #[serde(default)]
    version: u32,
}

/// Login state backed by a [`Backend`].
#[derive(Debug)]
pub struct Session<B: Backend> {
    backend: B,
    current: Option<Team>,
}

impl<B: Backend> Session<B> {
    /// Restore the session stored in `backend`.
    ///
    /// Missing or unreadable session data yields an anonymous session.
    pub fn restore(backend: B) -> Self {
        let current = match backend.get_item(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedSession>(&raw) {
                Ok(persisted) if persisted.state.is_authenticated => persisted.state.current_team,
                Ok(_) => None,
                Err(err) => {
                    warn!(error = %err, "Stored session is corrupt, starting anonymous");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "Failed to read stored session, starting anonymous");
                None
            }
        };
        Self { backend, current }
    }

    /// The selected team, if any.
    #[must_use]
    pub fn current_team(&self) -> Option<Team> {
        self.current
    }

    /// Whether a team is selected.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Select `team` and persist the choice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the session could not be saved. The
    /// in-memory session is updated regardless.
    pub fn login(&mut self, team: Team) -> Result<()> {
        self.current = Some(team);
        info!(team = %team, "Logged in");
        self.persist()
    }

    /// Clear the selected team and persist the cleared state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the session could not be saved. The
    /// in-memory session is cleared regardless.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(team) = self.current.take() {
            info!(team = %team, "Logged out");
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let persisted = PersistedSession {
            state: SessionState {
                is_authenticated: self.current.is_some(),
                current_team: self.current,
            },
            version: SESSION_FORMAT_VERSION,
        };
        let encoded = serde_json::to_string(&persisted)
            .map_err(|err| Error::persistence(SESSION_KEY, err.into()))?;
        self.backend
            .set_item(SESSION_KEY, &encoded)
            .map_err(|err| Error::persistence(SESSION_KEY, err))
    }
}
