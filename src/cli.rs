use crate::config::Config;
use crate::engine::GridSize;
use lexopt::prelude::*;
use std::path::PathBuf;

/// What the user asked the program to do on the command line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

impl Invocation {
    pub(crate) fn from_parser(mut parser: lexopt::Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Long("grid-size") => {
                    args.grid_size = Some(parser.value()?.parse::<GridSize>()?);
                }
                Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Short('h') | Long("help") => return Ok(Invocation::Help),
                Short('V') | Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

/// Command-line settings for a normal run
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    /// Configuration file given with `--config`.  When this is set, the file
    /// must exist.
    pub(crate) config: Option<PathBuf>,
    pub(crate) grid_size: Option<GridSize>,
    pub(crate) log_file: Option<PathBuf>,
}

impl Arguments {
    /// Override values in `config` with any given on the command line
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(size) = self.grid_size {
            config.game.grid_size = size;
        }
        if let Some(ref path) = self.log_file {
            config.log.file = Some(path.clone());
        }
    }
}

pub(crate) const USAGE: &str = concat!(
    "Usage: torsnake [OPTIONS]\n",
    "\n",
    "Play Snake on a grid whose edges wrap around\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>   Read configuration from the given file\n",
    "      --grid-size <N>   Side length of the grid (8 to 64)\n",
    "      --log-file <PATH> Write log messages to the given file\n",
    "  -h, --help            Display this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
    "\n",
    "Keys:\n",
    "  Arrows/wasd/hjkl  Steer\n",
    "  Enter             Start, restart, or continue\n",
    "  p, Space, Esc     Pause or resume\n",
    "  r                 Reset to the start screen\n",
    "  q, Ctrl-C         Quit\n",
);
