use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use countdown_timers::commands;
use countdown_timers::commands::timer::FormInput;
use countdown_timers::config;
use countdown_timers::error::TimerError;
use countdown_timers::logging;
use countdown_timers::notify::TerminalNotifier;
use countdown_timers::screen::{ScreenType, ScreenWatcher};
use countdown_timers::OutputFormat;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cdt")]
#[command(about = "Countdown timers for the terminal")]
#[command(version)]
struct Cli {
    /// Force the wide or narrow notification layout
    #[arg(long, global = true, value_enum)]
    layout: Option<ScreenType>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new timer
    Add(TimerArgs),
    /// Edit an existing timer (unspecified fields keep their values)
    Edit {
        #[arg(help = "Timer ID")]
        id: u32,
        #[command(flatten)]
        fields: TimerArgs,
    },
    /// List timers
    List {
        #[arg(long, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },
    /// Show timer details
    Show {
        #[arg(help = "Timer ID")]
        id: u32,
    },
    /// Delete a timer
    Delete {
        #[arg(help = "Timer ID")]
        id: u32,
    },
    /// Mark a timer as running
    Start {
        #[arg(help = "Timer ID")]
        id: u32,
    },
    /// Pause a running timer
    Pause {
        #[arg(help = "Timer ID")]
        id: u32,
    },
    /// Reset a timer to its full duration
    Reset {
        #[arg(help = "Timer ID")]
        id: u32,
    },
    /// Count down running timers in the foreground
    Run {
        #[arg(help = "Timer IDs to start first")]
        ids: Vec<u32>,
    },
    /// Show configuration
    Config(ConfigArgs),
}

#[derive(Args, Default)]
struct TimerArgs {
    #[arg(long, help = "Timer title (max 50 characters)")]
    title: Option<String>,
    #[arg(long, help = "Optional description")]
    description: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Hours (0-23)")]
    hours: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Minutes (0-59)")]
    minutes: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Seconds (0-59)")]
    seconds: Option<String>,
}

impl From<TimerArgs> for FormInput {
    fn from(args: TimerArgs) -> Self {
        FormInput {
            title: args.title,
            description: args.description,
            hours: args.hours,
            minutes: args.minutes,
            seconds: args.seconds,
        }
    }
}

#[derive(Parser)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get { key: String },
    Path,
}

fn execute(cli: Cli, config: &config::Config) -> Result<()> {
    let screen = cli
        .layout
        .unwrap_or_else(|| ScreenWatcher::detect(config.display.viewport_width).screen_type());
    let notifier = TerminalNotifier::from_env();

    match cli.command {
        Commands::Add(args) => {
            commands::timer::add(config, screen, &args.into(), &notifier)?;
        }
        Commands::Edit { id, fields } => {
            commands::timer::edit(config, screen, id, &fields.into(), &notifier)?;
        }
        Commands::List { format } => commands::timer::list(config, format)?,
        Commands::Show { id } => commands::timer::show(config, id)?,
        Commands::Delete { id } => commands::timer::delete(config, id)?,
        Commands::Start { id } => commands::timer::start(config, id)?,
        Commands::Pause { id } => commands::timer::pause(config, id)?,
        Commands::Reset { id } => commands::timer::reset(config, id)?,
        Commands::Run { ids } => {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?
                .block_on(commands::timer::run(config, screen, &ids, &notifier))?;
        }
        Commands::Config(args) => match args.action {
            ConfigAction::List => commands::config::list(config)?,
            ConfigAction::Get { key } => commands::config::get(&key, config)?,
            ConfigAction::Path => commands::config::path()?,
        },
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging.level);

    match execute(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported to the user as a notification
        Err(err) if err.downcast_ref::<TimerError>() == Some(&TimerError::FormRejected) => {
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
