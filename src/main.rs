// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use tuvung::app_config::Config;
use tuvung::app_controller::{AddRequest, Controller};

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for tuvung::app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => tuvung::app_config::LogLevel::Error,
            CliLogLevel::Warn => tuvung::app_config::LogLevel::Warn,
            CliLogLevel::Info => tuvung::app_config::LogLevel::Info,
            CliLogLevel::Debug => tuvung::app_config::LogLevel::Debug,
            CliLogLevel::Trace => tuvung::app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a word in its sentence and save it to your collection
    Add {
        /// The English sentence containing the word
        #[arg(short, long)]
        sentence: String,

        /// The word or phrase to learn
        #[arg(short, long)]
        word: String,

        /// Phrase mode: skip the dictionary check and pronunciation lookup
        #[arg(short, long)]
        phrase: bool,

        /// Override the generated Vietnamese meaning of the word
        #[arg(long)]
        word_meaning: Option<String>,

        /// Override the generated Vietnamese translation of the sentence
        #[arg(long)]
        context_meaning: Option<String>,

        /// Show the draft without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Review your vocabulary as fill-in-the-blank exercises
    Review,

    /// Show your saved entries and total score
    Profile,

    /// Select or deselect an entry for context rotation
    Flag {
        /// The entry id (shown by `profile`)
        record_id: String,

        /// Clear the flag instead of setting it
        #[arg(long)]
        off: bool,
    },

    /// Generate fresh example sentences for all flagged entries
    Rotate,

    /// Generate shell completions for tuvung
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// tuvung - English→Vietnamese vocabulary trainer
///
/// Collects English vocabulary in context, translates it with an AI
/// provider, and drills it back as fill-in-the-blank exercises.
#[derive(Parser, Debug)]
#[command(name = "tuvung")]
#[command(version = "0.1.0")]
#[command(about = "Personal English→Vietnamese vocabulary trainer")]
#[command(long_about = "tuvung saves English words together with the sentence you met them in,
translates both to Vietnamese, and quizzes you with cloze exercises.

EXAMPLES:
    tuvung add -s \"The cat sat on the mat.\" -w cat     # Save a word with its sentence
    tuvung add -s \"I ran out of time.\" -w \"ran out of\" -p
    tuvung review                                        # Play the fill-in-the-blank game
    tuvung profile                                       # List entries and total score
    tuvung flag 4f7c… && tuvung rotate                   # Refresh example sentences
    tuvung completions bash > tuvung.bash                # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically. The Gemini API key is read
    from the GEMINI_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Profile name overriding the configured one
    #[arg(short, long)]
    user: Option<String>,

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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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
    // Initialize the logger once with info level by default; the level is
    // raised or lowered after the config is loaded.
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "tuvung", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::from_file_or_default(&cli.config_path)?;
    if let Some(user) = cli.user {
        config.user = user;
    }
    config.validate()?;

    let level = cli
        .log_level
        .map(tuvung::app_config::LogLevel::from)
        .unwrap_or(config.log_level);
    log::set_max_level(level.to_level_filter());

    let controller = Controller::with_config(&config)?;

    match cli.command {
        Commands::Add {
            sentence,
            word,
            phrase,
            word_meaning,
            context_meaning,
            dry_run,
        } => {
            controller
                .run_add(AddRequest {
                    sentence,
                    word,
                    phrase_mode: phrase,
                    word_meaning,
                    context_meaning,
                    dry_run,
                })
                .await
        }
        Commands::Review => controller.run_review().await,
        Commands::Profile => controller.run_profile().await,
        Commands::Flag { record_id, off } => controller.run_flag(&record_id, !off).await,
        Commands::Rotate => controller.run_rotate().await,
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
