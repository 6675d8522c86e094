mod ask;
mod config_cmd;
mod dashboard;
mod history;
mod profile;
mod today;
mod train;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rep_coach::config::Config;
use rep_coach::services::storage::Storage;

pub use ask::AskCommand;
pub use dashboard::DashboardCommand;
pub use history::HistoryCommand;
pub use profile::ProfileSetCommand;
pub use train::TrainCommand;

#[derive(Parser)]
#[command(name = "rep-coach")]
#[command(about = "Pose-based rep counter and workout log", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "REP_COACH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Count reps over a recorded landmark stream and save the workout
    Train(TrainCommand),

    /// List saved workouts
    History(HistoryCommand),

    /// Show today's calories against your daily goal
    Today,

    /// Manage your profile
    #[command(subcommand)]
    Profile(ProfileSubcommands),

    /// Ask the AI dietician a question
    Ask(AskCommand),

    /// Launch interactive dashboard
    Dashboard(DashboardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ProfileSubcommands {
    /// Show the stored profile
    Show,

    /// Create or replace the profile
    Set(ProfileSetCommand),
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file()?,
        };

        let load = || Config::load_from(&config_path);

        match self.command {
            Commands::Train(cmd) => cmd.execute(&load()?).await,
            Commands::History(cmd) => cmd.execute(&load()?).await,
            Commands::Today => today::show_today(&load()?).await,
            Commands::Profile(subcmd) => match subcmd {
                ProfileSubcommands::Show => profile::show_profile(&load()?).await,
                ProfileSubcommands::Set(cmd) => cmd.execute(&load()?).await,
            },
            Commands::Ask(cmd) => cmd.execute(&load()?).await,
            Commands::Dashboard(cmd) => cmd.execute(&load()?).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(&config_path).await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(&config_path, force).await,
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Open the workout database the configuration points at
pub(crate) fn open_storage(config: &Config) -> Result<Storage> {
    let path = config.database_path()?;
    Storage::open(&path)
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
