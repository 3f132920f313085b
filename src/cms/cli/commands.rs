use super::render::{print_messages, print_problems, print_records};
use super::setup::{Cli, Commands, QueryArgs, SortField};
use super::shell;
use clap::Parser;
use cms::api::CmsApi;
use cms::commands::{CmdMessage, CmdResult};
use cms::config::{CmsConfig, CONFIG_KEYS};
use cms::error::{CmsError, Result};
use cms::model::RecordDraft;
use cms::store::fs::FsBackend;
use directories::ProjectDirs;
use log::LevelFilter;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

struct AppContext {
    api: CmsApi<FsBackend>,
    config: CmsConfig,
}

impl AppContext {
    /// The file argument, or the configured default.
    fn resolve_file(&self, file: Option<PathBuf>) -> Result<PathBuf> {
        file.or_else(|| self.config.default_file.clone())
            .ok_or_else(|| {
                CmsError::Config(
                    "no file given and no default-file configured (see `cms config default-file <FILE>`)"
                        .to_string(),
                )
            })
    }

    /// Opens the file for a one-shot command, surfacing load warnings.
    fn open(&mut self, file: Option<PathBuf>) -> Result<()> {
        let path = self.resolve_file(file)?;
        let result = self.api.open(&path)?;
        print_problems(&result.messages);
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = resolve_config_dir(cli.config_dir)?;
    // `config` must still run when the stored values are out of range.
    let config = match cli.command {
        Commands::Config { .. } => CmsConfig::load_unchecked(&config_dir)?,
        _ => CmsConfig::load(&config_dir)?,
    };

    let mut ctx = AppContext {
        api: CmsApi::with_config(FsBackend::new(), &config),
        config,
    };

    match cli.command {
        Commands::Show { file } => handle_show(&mut ctx, file),
        Commands::Query { by, file } => handle_query(&mut ctx, by, file),
        Commands::Insert {
            id,
            name,
            programme,
            mark,
            file,
        } => handle_insert(&mut ctx, RecordDraft::new(id, name, programme, mark), file),
        Commands::Update {
            id,
            field,
            value,
            file,
        } => handle_update(&mut ctx, &id, &field, &value, file),
        Commands::Delete { id, file, yes } => handle_delete(&mut ctx, &id, file, yes),
        Commands::Sort { key, file, desc } => handle_sort(&mut ctx, key, file, desc),
        Commands::Shell { file } => {
            let file = file.or_else(|| ctx.config.default_file.clone());
            let stdin = io::stdin();
            shell::Session::new(&mut ctx.api, stdin.lock()).run(file)
        }
        Commands::Config { key, value } => {
            handle_config(&config_dir, ctx.config.clone(), key, value)
        }
    }
}

/// Installs env_logger at a level chosen by `-v` flags only.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn resolve_config_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    ProjectDirs::from("", "", "cms")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CmsError::Config("could not determine a config directory".to_string()))
}

fn handle_show(ctx: &mut AppContext, file: Option<PathBuf>) -> Result<()> {
    ctx.open(file)?;
    let result = ctx.api.list_all()?;
    print_listing(&result);
    Ok(())
}

fn handle_query(ctx: &mut AppContext, by: QueryArgs, file: Option<PathBuf>) -> Result<()> {
    ctx.open(file)?;
    let result = match by {
        QueryArgs { id: Some(id), .. } => ctx.api.find_by_id(&id)?,
        QueryArgs {
            name: Some(name), ..
        } => ctx.api.find_by_name(&name)?,
        QueryArgs {
            programme: Some(programme),
            ..
        } => ctx.api.find_by_programme(&programme)?,
        QueryArgs {
            mark: Some(mark), ..
        } => ctx.api.find_by_mark(&mark)?,
        _ => return Err(CmsError::Config("nothing to search for".to_string())),
    };
    print_listing(&result);
    Ok(())
}

fn handle_insert(ctx: &mut AppContext, draft: RecordDraft, file: Option<PathBuf>) -> Result<()> {
    ctx.open(file)?;
    let result = ctx.api.insert(&draft)?;
    save_and_report(ctx, result)
}

fn handle_update(
    ctx: &mut AppContext,
    id: &str,
    field: &str,
    value: &str,
    file: Option<PathBuf>,
) -> Result<()> {
    ctx.open(file)?;
    let result = ctx.api.update(id, field, value)?;
    save_and_report(ctx, result)
}

fn handle_delete(ctx: &mut AppContext, id: &str, file: Option<PathBuf>, yes: bool) -> Result<()> {
    ctx.open(file)?;
    let found = ctx.api.find_by_id(id)?;
    print_records(&found.listed_records);

    if !yes {
        let stdin = io::stdin();
        let prompt = format!(
            "Are you sure you want to delete the record with ID={}? Type \"Y\" to confirm or \"N\" to cancel: ",
            id.trim()
        );
        if !confirm(&mut stdin.lock(), &prompt)? {
            print_messages(&[CmdMessage::info("The deletion is cancelled")]);
            return Ok(());
        }
    }

    let result = ctx.api.delete(id)?;
    save_and_report(ctx, result)
}

fn handle_sort(
    ctx: &mut AppContext,
    key: SortField,
    file: Option<PathBuf>,
    desc: bool,
) -> Result<()> {
    ctx.open(file)?;
    let result = match key {
        SortField::Id => ctx.api.sort_by_id(!desc)?,
        SortField::Mark => ctx.api.sort_by_mark(!desc)?,
    };
    print_records(&result.listed_records);
    save_and_report(ctx, result)
}

/// Writes the table back to the file it came from and prints the outcome.
fn save_and_report(ctx: &mut AppContext, result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    let saved = ctx.api.save(None)?;
    print_messages(&saved.messages);
    Ok(())
}

fn print_listing(result: &CmdResult) {
    print_records(&result.listed_records);
    print_messages(&result.messages);
}

fn handle_config(
    config_dir: &Path,
    mut config: CmsConfig,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{}", config.get(&key)?),
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            print_messages(&[CmdMessage::success(format!(
                "{} set to \"{}\"",
                key,
                config.get(&key)?
            ))]);
        }
    }
    Ok(())
}

/// Asks a yes/no question. Anything but `y`/`yes` (including end of input) is a no.
pub(super) fn confirm<R: BufRead>(input: &mut R, prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush().map_err(CmsError::Io)?;

    let mut answer = String::new();
    if input.read_line(&mut answer).map_err(CmsError::Io)? == 0 {
        println!();
        return Ok(false);
    }
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
