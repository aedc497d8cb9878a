use std::env;
use std::path::PathBuf;

use clap::Parser;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const TESTING_ENV_VAR: &str = "OPENIASSCOREBOARD_TESTING";
pub const UI_DIR_ENV_VAR: &str = "OPENIASSCOREBOARD_UI_DIR";
const DEFAULT_UI_DIR: &str = "ui";

#[derive(Parser, Debug)]
#[command(
    name = "open-ias-scoreboard",
    version,
    about = "Scoreboard windows for IASAS event livestreams"
)]
pub struct Args {
    /// Open developer tools on every window
    #[arg(short = 'd', long = "dev-tools")]
    pub dev_tools: bool,

    /// Directory holding control.html and scoreboard.html
    #[arg(long, env = UI_DIR_ENV_VAR, default_value = DEFAULT_UI_DIR)]
    pub ui_dir: PathBuf,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppConfig {
    /// Skips every close confirmation so end-to-end tests can close windows.
    pub testing: bool,
    pub dev_tools: bool,
    pub ui_dir: PathBuf,
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            testing: false,
            dev_tools: false,
            ui_dir: PathBuf::from(DEFAULT_UI_DIR),
            version: VERSION.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_args(args: Args) -> Self {
        Self {
            testing: testing_mode_from_env(),
            dev_tools: args.dev_tools,
            ui_dir: args.ui_dir,
            ..Self::default()
        }
    }

    pub fn with_testing(mut self, testing: bool) -> Self {
        self.testing = testing;
        self
    }

    pub fn with_dev_tools(mut self, dev_tools: bool) -> Self {
        self.dev_tools = dev_tools;
        self
    }
}

pub fn testing_mode_from_env() -> bool {
    env::var(TESTING_ENV_VAR)
        .map(|value| is_enabled_flag(&value))
        .unwrap_or(false)
}

fn is_enabled_flag(value: &str) -> bool {
    matches!(value, "true" | "1")
}
