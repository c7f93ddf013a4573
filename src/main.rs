// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{BurnStrategy, Config, LogLevel};
use crate::app_controller::Controller;
use crate::language_utils::LanguageTable;
use crate::providers::transcript_file::TranscriptFile;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod fonts;
mod language_utils;
mod providers;
mod remux;
mod render;
mod segments;
mod subtitle;

/// CLI Wrapper for BurnStrategy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliBurnStrategy {
    FilterBurn,
    RenderRemux,
}

impl From<CliBurnStrategy> for BurnStrategy {
    fn from(cli_strategy: CliBurnStrategy) -> Self {
        match cli_strategy {
            CliBurnStrategy::FilterBurn => BurnStrategy::FilterBurn,
            CliBurnStrategy::RenderRemux => BurnStrategy::RenderRemux,
        }
    }
}

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
    /// Burn captions into a video (default command)
    Burn(BurnArgs),

    /// Generate shell completions for subburn
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct BurnArgs {
    /// Input video file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Recognizer transcript JSON ({"language", "segments": [{start, end, text}]}).
    /// Defaults to <input stem>.json next to the input; required for single files
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Burn strategy to use
    #[arg(short = 'p', long, value_enum)]
    strategy: Option<CliBurnStrategy>,

    /// Target caption language, as a code or English name (e.g., 'es', 'Spanish')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Write the SRT artifact only, skip burning
    #[arg(long)]
    srt_only: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subburn - bake translated captions into video
///
/// Takes a media file plus a speech-recognizer transcript, merges the
/// segments into captions, writes an SRT artifact, and burns the captions
/// into the video while stream-copying the original audio.
#[derive(Parser, Debug)]
#[command(name = "subburn")]
#[command(version = "0.3.0")]
#[command(about = "Caption burn-in tool")]
#[command(long_about = "subburn merges recognizer segments into captions, picks a font for their
script, writes an SRT file, and composites the captions onto the video with
the original audio stream-copied.

EXAMPLES:
    subburn movie.mkv                          # Uses movie.json as transcript
    subburn movie.mkv --transcript asr.json    # Explicit transcript file
    subburn -p render-remux movie.mkv          # Frame-by-frame overlay strategy
    subburn --srt-only movie.mkv               # Subtitle file only, no burn
    subburn -t es movie.mkv                    # Tag outputs as Spanish
    subburn /movies/                           # Process a directory
    subburn completions bash > subburn.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

STRATEGIES:
    filter-burn  - single ffmpeg pass with a subtitle filter (default)
    render-remux - frame-by-frame overlay, then audio remux")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Recognizer transcript JSON ({"language", "segments": [{start, end, text}]}).
    /// Defaults to <input stem>.json next to the input; required for single files
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Burn strategy to use
    #[arg(short = 'p', long, value_enum)]
    strategy: Option<CliBurnStrategy>,

    /// Target caption language, as a code or English name (e.g., 'es', 'Spanish')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Write the SRT artifact only, skip burning
    #[arg(long)]
    srt_only: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subburn", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Burn(args)) => run_burn(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let args = BurnArgs {
                input_path,
                transcript: cli.transcript,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                strategy: cli.strategy,
                target_language: cli.target_language,
                srt_only: cli.srt_only,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_burn(args).await
        }
    }
}

async fn run_burn(options: BurnArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // Load or create configuration
    let config_path = Path::new(&options.config_path);
    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            options.config_path
        );
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(strategy) = &options.strategy {
        config.strategy = strategy.clone().into();
    }
    if let Some(target_language) = &options.target_language {
        // Accept either a code ('es') or a name ('Spanish'), resolved
        // through the immutable language table
        let table = LanguageTable::new();
        config.target_language =
            match crate::language_utils::normalize_code(target_language) {
                Ok(code) => code,
                Err(_) => table.code_for_name(target_language).ok_or_else(|| {
                    anyhow!("Unknown target language: {}", target_language)
                })?,
            };
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let transcript = options
            .transcript
            .clone()
            .map(TranscriptFile::new)
            .unwrap_or_else(|| TranscriptFile::sibling_of(&options.input_path));

        if !transcript.path().exists() {
            return Err(anyhow!(
                "Transcript file not found: {:?} (pass --transcript)",
                transcript.path()
            ));
        }

        let output_dir = options
            .output_dir
            .clone()
            .or_else(|| options.input_path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        controller
            .run(
                &options.input_path,
                &transcript,
                None,
                &output_dir,
                options.force_overwrite,
                options.srt_only,
            )
            .await
    } else if options.input_path.is_dir() {
        controller
            .run_folder(
                &options.input_path,
                options.output_dir.as_deref(),
                options.force_overwrite,
                options.srt_only,
            )
            .await
    } else {
        Err(anyhow!(
            "Input path does not exist: {:?}",
            options.input_path
        ))
    }
}
