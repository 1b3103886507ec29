mod app;
mod cli;
mod command;
mod config;
mod consts;
mod engine;
mod schedule;
mod store;
mod util;
mod view;
use crate::app::App;
use crate::cli::{Arguments, Invocation, USAGE};
use crate::config::Config;
use crate::engine::Engine;
use crate::store::{BackgroundStore, JsonFileStore, MemoryStore, ScoreStore};
use crate::util::error_chain;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let invocation = match Invocation::from_parser(lexopt::Parser::from_env()) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("torsnake: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    match invocation {
        Invocation::Help => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Invocation::Version => {
            println!("torsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Invocation::Run(args) => match run(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) if e
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
            {
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("torsnake: {e:?}");
                ExitCode::from(2)
            }
        },
    }
}

fn run(args: &Arguments) -> anyhow::Result<()> {
    let mut config = match args.config {
        Some(ref path) => Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?,
            Err(_) => Config::default(),
        },
    };
    args.apply(&mut config);
    init_logging(&config);
    log::info!(
        "Starting torsnake {} with grid size {}",
        env!("CARGO_PKG_VERSION"),
        config.game.grid_size
    );
    let engine = Engine::new(config.game.grid_size, open_store(&config));
    let terminal = ratatui::init();
    // Focus events are needed to pause the game when the window is left
    let r = crossterm::execute!(io::stdout(), EnableFocusChange)
        .and_then(|()| App::new(engine).run(terminal));
    if let Err(e) = crossterm::execute!(io::stdout(), DisableFocusChange) {
        log::warn!("Failed to disable focus change reporting: {e}");
    }
    ratatui::restore();
    r?;
    Ok(())
}

/// Send log messages to the configured log file.  If the file cannot be
/// opened, nothing is logged.
fn init_logging(config: &Config) {
    let Some(path) = config.log_file() else {
        return;
    };
    if let Ok(file) = open_log_file(&path) {
        let _ = WriteLogger::init(config.log.level, simplelog::Config::default(), file);
    }
}

fn open_log_file(path: &Path) -> io::Result<fs_err::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
}

/// Choose where the high score lives.  Scores are only kept in memory if
/// saving is disabled or the score file is unreadable.
fn open_store(config: &Config) -> Box<dyn ScoreStore> {
    let Some(path) = config.high_score_file() else {
        log::info!("High scores will not be saved");
        return Box::new(MemoryStore::default());
    };
    match JsonFileStore::load(path.clone()) {
        Ok(store) => {
            log::info!("Using high score file {}", store.path().display());
            Box::new(BackgroundStore::spawn(store))
        }
        Err(e) => {
            log::warn!(
                "Could not read high score file {}; scores will not be saved: {}",
                path.display(),
                error_chain(&e)
            );
            Box::new(MemoryStore::default())
        }
    }
}
