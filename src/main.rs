mod alert;
mod app;
mod command;
mod config;
mod consts;
mod game;
mod geometry;
mod input;
mod prefs;
mod render;
mod util;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: gridsnake [<options>]

Play Snake on a square grid in the terminal

Options:
  -c, --config <FILE>      Read configuration from the given file
      --log-file <FILE>    Write log messages to the given file
      --log-level <LEVEL>  Minimum level of messages to log [default: info]
  -h, --help               Show this help message and exit
  -V, --version            Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum CliCommand {
    Run(Arguments),
    Help,
    Version,
}

impl CliCommand {
    fn from_parser(mut parser: Parser) -> Result<CliCommand, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => args.log_level = parser.value()?.parse()?,
                Arg::Short('h') | Arg::Long("help") => return Ok(CliCommand::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(CliCommand::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(CliCommand::Run(args))
    }

    fn run(self) -> ExitCode {
        match self {
            CliCommand::Run(args) => match args.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
                Err(e) => {
                    log::error!("Fatal error: {e:#}");
                    eprintln!("gridsnake: {e:?}");
                    ExitCode::from(2)
                }
            },
            CliCommand::Help => {
                print!("{USAGE}");
                ExitCode::SUCCESS
            }
            CliCommand::Version => {
                println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: LevelFilter,
}

impl Default for Arguments {
    fn default() -> Arguments {
        Arguments {
            config: None,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        if let Some(path) = self.log_file {
            let fp = fs_err::File::create(path).context("failed to open log file")?;
            WriteLogger::init(self.log_level, simplelog::Config::default(), fp)
                .context("failed to initialize logging")?;
        }
        log::info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
        let (path, allow_missing) = match self.config {
            Some(p) => (p, false),
            None => (Config::default_path()?, true),
        };
        let config = Config::load(&path, allow_missing)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        log::debug!("Using configuration: {config:?}");
        let terminal = ratatui::try_init().context("failed to initialize terminal")?;
        let r = App::new(config, rand::rng()).run(terminal);
        ratatui::restore();
        r.context("failed to run game")?;
        log::info!("Exiting");
        Ok(())
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}

fn main() -> ExitCode {
    match CliCommand::from_parser(Parser::from_env()) {
        Ok(cmd) => cmd.run(),
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage");
            ExitCode::from(2)
        }
    }
}
