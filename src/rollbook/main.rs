use clap::Parser;
use directories::ProjectDirs;
use rollbook::api::{ConfigAction, RollbookApi, RollbookPaths};
use rollbook::config::RollbookConfig;
use rollbook::error::{Result, RollbookError};
use rollbook::store::fs::FileStore;
use rollbook::store::fs_backend::FsBackend;
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod args;
mod menu;
mod render;

use args::{Cli, Commands};
use render::{write_messages, write_records};

const HOME_ENV: &str = "ROLLBOOK_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: RollbookApi<FsBackend>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { name, roll, grade }) => handle_add(&mut ctx, name, roll, grade),
        Some(Commands::Edit { roll, name, grade }) => handle_edit(&mut ctx, roll, name, grade),
        Some(Commands::Remove { roll }) => handle_remove(&mut ctx, roll),
        Some(Commands::Search { roll }) => handle_search(&ctx, roll),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Menu) => handle_menu(ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = RollbookConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config.json, using defaults");
        RollbookConfig::default()
    });

    let paths = RollbookPaths::new(data_dir);
    let store = FileStore::open_file(paths.data_file(&config));
    let api = RollbookApi::new(store, paths);

    Ok(AppContext { api })
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "rollbook", "rollbook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RollbookError::Api("Could not determine data directory".into()))
}

fn handle_add(ctx: &mut AppContext, name: String, roll: u32, grade: String) -> Result<()> {
    let result = ctx.api.add_student(&name, roll, &grade)?;
    write_messages(&mut io::stdout().lock(), &result.messages)?;
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    roll: u32,
    name: Option<String>,
    grade: Option<String>,
) -> Result<()> {
    let result = ctx
        .api
        .edit_student(roll, name.as_deref(), grade.as_deref())?;
    let mut out = io::stdout().lock();
    write_records(&mut out, &result.affected_records)?;
    write_messages(&mut out, &result.messages)?;
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, roll: u32) -> Result<()> {
    let result = ctx.api.remove_student(roll)?;
    write_messages(&mut io::stdout().lock(), &result.messages)?;
    Ok(())
}

fn handle_search(ctx: &AppContext, roll: u32) -> Result<()> {
    let result = ctx.api.search_student(roll)?;
    let mut out = io::stdout().lock();
    write_records(&mut out, &result.listed_records)?;
    write_messages(&mut out, &result.messages)?;
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_students()?;
    let mut out = io::stdout().lock();
    write_records(&mut out, &result.listed_records)?;
    write_messages(&mut out, &result.messages)?;
    Ok(())
}

fn handle_menu(ctx: AppContext) -> Result<()> {
    let stdin = io::stdin();
    menu::run_and_close(ctx.api, stdin.lock(), io::stdout().lock())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            for key in RollbookConfig::keys() {
                if let Some(value) = config.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
    }
    write_messages(&mut io::stdout().lock(), &result.messages)?;
    Ok(())
}
