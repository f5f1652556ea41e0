//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, resolves settings and runs the
//! selected command.

pub mod health;
pub mod history;
pub mod say;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::health::run_health;
use crate::cli::history::run_history;
use crate::cli::say::run_say;
use crate::core::config::data::Config;
use crate::core::config::settings::{Settings, SettingsOverrides};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_tracing, LogTarget};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit:  ",
    env!("VERGEN_GIT_DESCRIBE"),
    "\nbuilt:   ",
    env!("VERGEN_BUILD_DATE"),
    "\nrustc:   ",
    env!("VERGEN_RUSTC_SEMVER"),
    "\ntarget:  ",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

#[derive(Parser, Debug)]
#[command(name = "iotrix")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A terminal chat client for the IoTrix IoT & Network Assistant")]
#[command(
    long_about = "IoTrix is a full-screen terminal chat client for the IoTrix assistant. \
Type a question about IoT devices, networking or tech support and the reply appears \
in the transcript as soon as the backend answers.\n\n\
Environment Variables:\n\
  IOTRIX_BASE_URL   Backend base URL (defaults to http://localhost:8000)\n\
  IOTRIX_LOG        Log filter directives, e.g. 'iotrix=debug'\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a newline\n\
  Esc, Ctrl+U       Clear the input\n\
  Tab, Alt+1..4     Use a suggested question\n\
  Up/Down/Mouse     Scroll through the conversation\n\
  End               Jump back to the newest message\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides IOTRIX_BASE_URL and the config file)
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Seconds to wait for a reply before showing the fallback message
    #[arg(short = 't', long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Write diagnostic logs to the given file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send a single message and print the reply
    Say {
        /// Message text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Check that the backend is reachable and healthy
    Health,
    /// Print the conversation log stored by the backend
    History {
        /// Only show the most recent N exchanges
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,
        /// Print the entries as JSON instead of a readable transcript
        #[arg(long)]
        json: bool,
    },
    /// Set configuration values (prints the configuration when no value is given)
    Set {
        /// Configuration key to set (base-url, timeout, theme, suggestions)
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let overrides = args.overrides();
    let command = args.command.unwrap_or(Commands::Chat);

    let log_target = match command {
        Commands::Chat => LogTarget::for_tui(args.log_file),
        _ => LogTarget::for_command(args.log_file),
    };
    init_tracing(log_target)?;

    match command {
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match value.map(|parts| parts.join(" ")).filter(|v| !v.trim().is_empty()) {
                Some(value) => match config.set_value(&key, &value) {
                    Ok(message) => {
                        config.save()?;
                        println!("✅ {message}");
                    }
                    Err(err) => {
                        eprintln!("❌ {err}");
                        std::process::exit(1);
                    }
                },
                None => config.print_all(),
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match config.unset_value(&key) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        command => {
            let config = Config::load()?;
            let settings = Settings::resolve(&config, &overrides);
            match command {
                Commands::Say { message } => run_say(message, &settings).await,
                Commands::Health => run_health(&settings).await,
                Commands::History { limit, json } => run_history(&settings, limit, json).await,
                _ => run_chat(settings).await,
            }
        }
    }
}
