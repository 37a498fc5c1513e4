// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::app_config::Config;
use app_controller::{Controller, SpeakRequest, TextSource};

mod app_config;
mod app_controller;
mod audio;
mod chunker;
mod document;
mod errors;
mod providers;
mod voices;

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

impl From<&app_config::LogLevel> for LevelFilter {
    fn from(level: &app_config::LogLevel) -> Self {
        match level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a document to speech (default command)
    #[command(alias = "speak")]
    Speak(SpeakArgs),

    /// List the available voices
    Voices,

    /// Generate shell completions for lectura
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SpeakArgs {
    /// Input document (.txt or .pdf); prompted for interactively when neither
    /// this nor --text is given
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Synthesize this text directly instead of reading a file
    #[arg(short = 'T', long, conflicts_with = "input_path")]
    text: Option<String>,

    /// Output basename (extension follows the audio encoding)
    #[arg(short, long)]
    output: Option<String>,

    /// Voice to use (see `lectura voices`)
    #[arg(short, long)]
    voice: Option<String>,

    /// Also write the extracted raw text to a sibling .txt file
    #[arg(short, long)]
    export_text: bool,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Open the produced audio file with the OS default player
    #[arg(short, long)]
    play: bool,

    /// API key for the synthesis service
    #[arg(long, env = "GOOGLE_TTS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Lectura - Document-to-Speech Converter
///
/// Reads a plain-text or PDF document, sends it in request-sized chunks to the
/// Google Cloud Text-to-Speech API and writes the concatenated audio to a
/// single file.
#[derive(Parser, Debug)]
#[command(name = "lectura")]
#[command(version = "1.0.0")]
#[command(about = "Turn text and PDF documents into audio files")]
#[command(long_about = "Lectura reads a plain-text or PDF document, splits the text into chunks
sized for the synthesis service's request limit, synthesizes each chunk and
concatenates the audio into a single output file.

EXAMPLES:
    lectura paper.pdf                        # Read a PDF with default settings
    lectura notes.txt -o lecture -p          # Custom output name, play when done
    lectura paper.pdf -e                     # Also export the extracted text
    lectura -T \"Hello world\" -o hello        # Synthesize text directly
    lectura paper.pdf -v en-US-Wavenet-H     # Premium voice
    lectura voices                           # List the voice catalog
    lectura completions bash > lectura.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The API key can also be provided via the
    GOOGLE_TTS_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    speak: SpeakArgs,
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
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
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
            generate(shell, &mut cmd, "lectura", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Voices) => {
            for voice in voices::VOICE_CATALOG.iter() {
                let marker = if voice.name == voices::DEFAULT_VOICE {
                    " (default)"
                } else {
                    ""
                };
                println!("{:24} {:?}{}", voice.name, voice.tier, marker);
            }
            Ok(())
        }
        Some(Commands::Speak(args)) => run_speak(args).await,
        // Default behavior - use top-level args
        None => run_speak(cli.speak).await,
    }
}

async fn run_speak(options: SpeakArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level((&config_log_level).into());
    }

    let mut config = load_or_create_config(&options.config_path, options.log_level.as_ref())?;

    // Override config with CLI options if provided
    if let Some(api_key) = &options.api_key {
        config.synthesis.api_key = api_key.clone();
    }

    if let Some(voice) = &options.voice {
        let selection = voices::resolve_voice(voice)?;
        config.synthesis.voice = selection.name.to_string();
        config.synthesis.language_code = selection.language_code.to_string();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level((&config.log_level).into());
    }

    // Assemble the explicit input state for the run
    let request = build_request(&options, &config)?;

    // Create controller
    let controller = Controller::with_config(config)?;

    // Cancellation flag, flipped by Ctrl-C and checked between chunks
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_signal = Arc::clone(&cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Cancellation requested, stopping after the current chunk");
            cancel_signal.store(true, Ordering::SeqCst);
        }
    });

    controller.run(request, cancel).await?;

    Ok(())
}

/// Load the configuration file, creating a default one when missing
fn load_or_create_config(
    config_path: &str,
    cli_log_level: Option<&CliLogLevel>,
) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(log_level) = cli_log_level {
            config.log_level = log_level.clone().into();
        }

        Ok(config)
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();

        if let Some(log_level) = cli_log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

/// Turn CLI options (or interactive prompts) into a pipeline request
fn build_request(options: &SpeakArgs, config: &Config) -> Result<SpeakRequest> {
    let output_name = options
        .output
        .clone()
        .unwrap_or_else(|| config.output.default_name.clone());

    // Direct text is its own entry point and skips file acquisition entirely
    if let Some(text) = &options.text {
        return Ok(SpeakRequest {
            source: TextSource::Direct(text.clone()),
            output_name,
            export_text: false,
            force_overwrite: options.force_overwrite,
            play: options.play,
        });
    }

    let (input_path, export_text) = match &options.input_path {
        Some(path) => (path.clone(), options.export_text || config.output.export_text),
        // No input on the command line: fall back to the interactive prompt flow
        None => prompt_for_input()?,
    };

    Ok(SpeakRequest {
        source: TextSource::File(input_path),
        output_name,
        export_text,
        force_overwrite: options.force_overwrite,
        play: options.play,
    })
}

/// Interactive prompt flow: ask for a file path until an existing file is
/// named, then offer the raw-text export for PDFs.
fn prompt_for_input() -> Result<(PathBuf, bool)> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    let path = loop {
        print!("Enter the file path of text to read: ");
        std::io::stdout().flush()?;

        let line = lines
            .next()
            .transpose()?
            .ok_or_else(|| anyhow::anyhow!("Standard input closed before a file path was given"))?;
        let candidate = PathBuf::from(line.trim());

        if candidate.is_file() {
            break candidate;
        }
        println!("Couldn't find your file. Please enter a valid path.");
    };

    let is_pdf = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let export_text = if is_pdf {
        print!("Generate plain text output file? (Y/N) ");
        std::io::stdout().flush()?;
        let answer = lines.next().transpose()?.unwrap_or_default();
        answer.trim().eq_ignore_ascii_case("y")
    } else {
        false
    };

    info!("Processing file {:?}", path);
    Ok((path, export_text))
}
