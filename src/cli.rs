use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "adjacent-site")]
#[command(about = "Pre-render the recent posts section and manage the theme preference")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Preference file, overriding the configured store path
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    /// System prefers a dark appearance
    #[arg(long, global = true, env = "PREFERS_DARK")]
    pub prefers_dark: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the feed and write the rendered page
    Render {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Flip the persisted light/dark theme
    ToggleTheme,
}
