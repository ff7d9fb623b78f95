// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, TranscriptionEngineKind};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod providers;
mod srt;
mod subtitle_builder;

/// CLI Wrapper for TranscriptionEngineKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliEngineKind {
    WhisperServer,
    WhisperApi,
}

impl From<CliEngineKind> for TranscriptionEngineKind {
    fn from(cli_engine: CliEngineKind) -> Self {
        match cli_engine {
            CliEngineKind::WhisperServer => TranscriptionEngineKind::WhisperServer,
            CliEngineKind::WhisperApi => TranscriptionEngineKind::WhisperApi,
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

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transcribe audio and generate subtitle files (default command)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Generate shell completions for sublines
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input audio file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Transcription engine to use
    #[arg(short, long, value_enum)]
    engine: Option<CliEngineKind>,

    /// Model name to use for transcription
    #[arg(short, long)]
    model: Option<String>,

    /// Spoken language code hint (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    language: Option<String>,

    /// Character budget per subtitle line
    #[arg(long)]
    max_chars: Option<usize>,

    /// Gap in seconds inserted between time-abutting lines
    #[arg(long)]
    lines_distance: Option<f64>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// sublines - audio transcription to subtitle lines
///
/// Transcribes audio files with a Whisper engine and groups the word-level
/// timestamps into character-budgeted subtitle lines saved as SRT.
#[derive(Parser, Debug)]
#[command(name = "sublines")]
#[command(version = "0.1.0")]
#[command(about = "Generate character-budgeted subtitles from audio")]
#[command(long_about = "sublines transcribes audio with a Whisper engine (local server or hosted API)
and groups the word-level timestamps into subtitle lines that respect a
per-line character budget, writing one SRT file per input.

EXAMPLES:
    sublines talk.wav                          # Transcribe using default config
    sublines -f talk.wav                       # Force overwrite existing files
    sublines -e whisper-api -m whisper-1 talk.wav  # Use the hosted API
    sublines -l en --max-chars 20 talk.wav     # English hint, wider lines
    sublines --log-level debug /podcasts/      # Process a directory with debug logging
    sublines completions bash > sublines.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SUPPORTED ENGINES:
    whisper-server - local OpenAI-compatible Whisper server (default: http://localhost:8000/v1)
    whisper-api    - hosted OpenAI-compatible transcription API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input audio file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Transcription engine to use
    #[arg(short, long, value_enum)]
    engine: Option<CliEngineKind>,

    /// Model name to use for transcription
    #[arg(short, long)]
    model: Option<String>,

    /// Spoken language code hint (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    language: Option<String>,

    /// Character budget per subtitle line
    #[arg(long)]
    max_chars: Option<usize>,

    /// Gap in seconds inserted between time-abutting lines
    #[arg(long)]
    lines_distance: Option<f64>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
                "\x1B[{}m{} [{}] {}\x1B[0m",
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

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "sublines", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let generate_args = GenerateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                engine: cli.engine,
                model: cli.model,
                language: cli.language,
                max_chars: cli.max_chars,
                lines_distance: cli.lines_distance,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args).await
        }
    }
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(engine) = &options.engine {
        config.transcription.engine = engine.clone().into();
    }

    if let Some(model) = &options.model {
        // Find the engine config and update the model
        let engine_str = config.transcription.engine.to_lowercase_string();
        if let Some(engine_config) = config.transcription.available_engines.iter_mut()
            .find(|e| e.engine_type == engine_str) {
            engine_config.model = model.clone();
        }
    }

    if let Some(language) = &options.language {
        config.language = language.clone();
    }

    if let Some(max_chars) = options.max_chars {
        config.line.max_chars = max_chars;
    }

    if let Some(lines_distance) = options.lines_distance {
        config.line.lines_distance = lines_distance;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    // Run the controller with the input file(s)
    if options.input_path.is_file() {
        let output_dir = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        controller.run(options.input_path.clone(), output_dir, options.force_overwrite).await?;
    } else if options.input_path.is_dir() {
        controller.run_folder(options.input_path.clone(), options.force_overwrite).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
