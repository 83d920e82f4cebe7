//! `teamnotes` - CLI for team-scoped notes
//!
//! Reads the persisted session, asks the record store for what the selected
//! team may see, and routes edits through the store's access checks.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use teamnotes::cli::{
    render, Cli, Command, ConfigCommand, EditCommand, ListCommand, NewCommand, OutputFormat,
    ShowCommand,
};
use teamnotes::{
    can_access, init_logging, search, Config, RecordId, RecordPatch, RecordStore, Session,
    Storage,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Config(cmd) => handle_config(&config, cmd)?,
        Command::Login(cmd) => {
            let storage = open_storage(&config)?;
            let mut session = Session::restore(&storage);
            session.login(cmd.team)?;
            println!("Logged in as {}", cmd.team);
            println!("{}", cmd.team.access_summary());
        }
        Command::Logout => {
            let storage = open_storage(&config)?;
            Session::restore(&storage).logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            let storage = open_storage(&config)?;
            match Session::restore(&storage).current_team() {
                Some(team) => println!("{team}"),
                None => println!("Not logged in"),
            }
        }
        Command::List(cmd) => {
            let storage = open_storage(&config)?;
            let session = Session::restore(&storage);
            let store = RecordStore::load(&storage, config.records.clone());
            handle_list(&store, &session, &cmd)?;
        }
        Command::Show(cmd) => {
            let storage = open_storage(&config)?;
            let session = Session::restore(&storage);
            let store = RecordStore::load(&storage, config.records.clone());
            handle_show(&store, &session, &cmd)?;
        }
        Command::New(cmd) => {
            let storage = open_storage(&config)?;
            let session = Session::restore(&storage);
            let mut store = RecordStore::load(&storage, config.records.clone());
            handle_new(&mut store, &session, cmd)?;
        }
        Command::Edit(cmd) => {
            let storage = open_storage(&config)?;
            let session = Session::restore(&storage);
            let mut store = RecordStore::load(&storage, config.records.clone());
            handle_edit(&mut store, &session, cmd)?;
        }
        Command::Delete(cmd) => {
            let storage = open_storage(&config)?;
            let session = Session::restore(&storage);
            let mut store = RecordStore::load(&storage, config.records.clone());
            let removed = store.delete(&RecordId::from(cmd.id), session.current_team())?;
            println!("Deleted \"{}\"", removed.title);
        }
        Command::Status(cmd) => {
            let storage = open_storage(&config)?;
            let session = Session::restore(&storage);
            let store = RecordStore::load(&storage, config.records.clone());
            handle_status(&store, &session, &storage, cmd.json)?;
        }
    }
    Ok(())
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let database_path = config.database_path();
    Storage::open(&database_path).with_context(|| format!("opening {}", database_path.display()))
}

fn handle_list(
    store: &RecordStore<&Storage>,
    session: &Session<&Storage>,
    cmd: &ListCommand,
) -> anyhow::Result<()> {
    let Some(team) = session.current_team() else {
        bail!("no team is logged in; run `teamnotes login <TEAM>` first");
    };
    let query = cmd.search.as_deref().unwrap_or("");

    let output = if cmd.all {
        let listings: Vec<_> = store
            .browse(Some(team))
            .into_iter()
            .filter(|listing| listing.matches(query))
            .collect();
        render::listings(&listings, cmd.format)?
    } else {
        let visible = search(store.list_for_team(Some(team)), query);
        render::records(&visible, cmd.format)?
    };

    if cmd.format != OutputFormat::Json {
        println!("{}", render::heading(team));
        println!();
    }
    print!("{output}");
    Ok(())
}

fn handle_show(
    store: &RecordStore<&Storage>,
    session: &Session<&Storage>,
    cmd: &ShowCommand,
) -> anyhow::Result<()> {
    let id = RecordId::from(cmd.id.as_str());
    let record = store
        .get_by_id(&id)
        .ok_or_else(|| teamnotes::Error::not_found(&id))?;

    if !can_access(record.owning_team, session.current_team()) {
        eprintln!("{}", render::access_denied(record.owning_team));
        return Err(
            teamnotes::Error::permission_denied(record.owning_team, session.current_team()).into(),
        );
    }

    print!("{}", render::detail(record, cmd.format)?);
    Ok(())
}

fn handle_new(
    store: &mut RecordStore<&Storage>,
    session: &Session<&Storage>,
    cmd: NewCommand,
) -> anyhow::Result<()> {
    let team = session.current_team();
    let record = store.create(cmd.title, cmd.content, team)?;
    println!(
        "Created \"{}\" (id {}) for {}",
        record.title, record.id, record.owning_team
    );
    Ok(())
}

fn handle_edit(
    store: &mut RecordStore<&Storage>,
    session: &Session<&Storage>,
    cmd: EditCommand,
) -> anyhow::Result<()> {
    let patch = RecordPatch {
        title: cmd.title,
        content: cmd.content,
    };
    if patch.is_empty() {
        bail!("nothing to change; pass --title and/or --content");
    }

    let record = store.update(&RecordId::from(cmd.id), patch, session.current_team())?;
    println!("Updated \"{}\" (id {})", record.title, record.id);
    Ok(())
}

fn handle_status(
    store: &RecordStore<&Storage>,
    session: &Session<&Storage>,
    storage: &Storage,
    json: bool,
) -> anyhow::Result<()> {
    let stats = storage.stats()?;
    let keys = storage.keys()?;
    let team = session.current_team();
    let visible = store.list_for_team(team).len();

    if json {
        let status = serde_json::json!({
            "team": team.map(|t| t.as_str()),
            "authenticated": session.is_authenticated(),
            "records_total": store.len(),
            "records_visible": visible,
            "records_source": store.load_source().to_string(),
            "records_seeded": store.load_source().is_seeded(),
            "database_path": storage.path(),
            "database_bytes": stats.db_size_bytes,
            "stored_keys": keys,
            "last_write": stats.last_updated,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("teamnotes status");
        println!("----------------");
        match team {
            Some(team) => println!("Session:       {team}"),
            None => println!("Session:       not logged in"),
        }
        println!("Records:       {} ({visible} visible)", store.len());
        println!("Loaded from:   {}", store.load_source());
        if store.load_source().is_seeded() {
            println!("               (sample data, not yet saved)");
        }
        println!("Database:      {}", storage.path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        if keys.is_empty() {
            println!("Stored keys:   none");
        } else {
            println!("Stored keys:   {}", keys.join(", "));
        }
        if let Some(at) = stats.last_updated {
            println!("Last write:    {}", at.to_rfc3339());
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Records]");
                println!("  Insertion order:    {}", config.records.insertion_order);
                println!("  Max title length:   {}", config.records.max_title_length);
                println!("  Max content length: {}", config.records.max_content_length);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
