// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use capsync::app_config::{Config, LogLevel};
use capsync::app_controller::Controller;
use capsync::caption_sync::SyncState;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load captions and play them against a simulated audio clock
    Play(PlayArgs),

    /// Parse a caption file and print its cues
    Parse {
        /// Caption file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the cues as JSON instead of WebVTT
        #[arg(long)]
        json: bool,
    },

    /// Print the caption active at a playback position
    At {
        /// Caption file to search
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Playback position in seconds
        #[arg(value_name = "SECONDS")]
        seconds: f64,
    },

    /// Generate shell completions for capsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Caption resource (path or URL); defaults to the configured one
    #[arg(value_name = "RESOURCE")]
    resource: Option<String>,

    /// Playback length in seconds (defaults to the end of the last cue)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Interval between time updates in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// capsync - caption synchronization for an audio player
///
/// Loads WebVTT captions (HTTP first, local file as fallback) and keeps a
/// caption line in step with playback.
#[derive(Parser, Debug)]
#[command(name = "capsync")]
#[command(version)]
#[command(about = "Caption synchronization for an audio player")]
#[command(long_about = "capsync loads WebVTT captions and shows the active caption while audio plays.

EXAMPLES:
    capsync play                                 # Play the configured captions
    capsync play audio/captions.vtt              # Play a local caption file
    capsync play https://host/captions.vtt -d 30 # Play 30 seconds of remote captions
    capsync parse captions.vtt --json            # Dump parsed cues as JSON
    capsync at captions.vtt 12.5                 # Caption shown at 12.5s
    capsync completions bash > capsync.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in capsync.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "capsync.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here, the effective level is set below via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "capsync", &mut std::io::stdout());
            Ok(())
        }
        Commands::Parse { file, json } => {
            let controller = Controller::with_config(Config::default())?;
            let track = controller.parse_file(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&track)?);
            } else {
                print!("{}", track.to_vtt_string());
            }
            Ok(())
        }
        Commands::At { file, seconds } => {
            let controller = Controller::with_config(Config::default())?;
            if let Some(cue) = controller.cue_at(&file, seconds)? {
                println!("{}", cue.text);
            }
            Ok(())
        }
        Commands::Play(args) => run_play(args, &cli.config_path, cli.log_level.is_some()).await,
    }
}

async fn run_play(args: PlayArgs, config_path: &str, level_from_cli: bool) -> Result<()> {
    let mut config = Config::load_or_create(config_path)?;

    if let Some(tick_ms) = args.tick_ms {
        config.playback.tick_ms = tick_ms;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    // Command line level wins over the config file
    if !level_from_cli {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    match controller.play(args.resource.as_deref(), args.duration).await? {
        SyncState::Ready => info!("Playback complete"),
        SyncState::LoadFailed => warn!("Captions could not be loaded"),
        state => warn!("Captions inactive ({:?})", state),
    }

    Ok(())
}
