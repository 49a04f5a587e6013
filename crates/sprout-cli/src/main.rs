mod catalog_cmds;
mod config;
mod garden_cmds;
mod log_cmds;
mod session;
mod stage_cmds;
mod task_cmds;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use sprout_core::garden::Garden;
use sprout_core::notify::Notifier;
use sprout_store::json::JsonFileStore;

use config::SproutConfig;

#[derive(Parser)]
#[command(name = "sprout", about = "Hydroponic garden planner and tracker")]
struct Cli {
    /// Garden data file (overrides SPROUT_DATA_FILE env var)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the plant catalog
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
    /// Browse the growing-system catalog
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
    /// Manage your plant/system pairings
    Garden {
        #[command(subcommand)]
        command: GardenCommands,
    },
    /// List maintenance tasks, or mark one done
    Tasks {
        /// Show only tasks due today
        #[arg(long)]
        due: bool,
        #[command(subcommand)]
        command: Option<TaskCommands>,
    },
    /// Show upcoming care reminders
    Reminders {
        /// Compute reminders as of this date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Compute a nutrient dose for a growth stage and water volume
    Dose {
        /// Growth stage: seedling, vegetative, flowering, harvest
        stage: String,
        /// Water volume in liters
        liters: f64,
    },
    /// Track growth stages
    Stage {
        #[command(subcommand)]
        command: StageCommands,
    },
    /// Growth journal
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
    /// Record a display name for this garden
    Signin {
        /// Display name
        name: String,
    },
    /// Forget the recorded display name
    Signout,
    /// Show who is signed in
    Whoami,
}

#[derive(Subcommand)]
pub enum PlantCommands {
    /// List catalog plants
    List {
        /// Only plants at or below this difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<String>,
        /// Only plants in this category (leafy-green, fruit, root)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a plant's growing parameters
    Show {
        /// Exact catalog name, e.g. "Selada (Lettuce)"
        name: String,
    },
    /// Show a plant's companion plants
    Companions {
        /// Exact catalog name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum SystemCommands {
    /// List growing systems
    List,
    /// Show a system's details, pros, and cons
    Show {
        /// Exact catalog name, e.g. "Wick System"
        name: String,
    },
}

#[derive(Subcommand)]
pub enum GardenCommands {
    /// Show the pairing list
    Show,
    /// Add a plant (adding it again removes it)
    Add {
        /// Exact catalog name
        plant: String,
    },
    /// Assign a system to a pairing
    Assign {
        /// Exact catalog name
        system: String,
        /// Pairing position from `garden show` (defaults to the newest
        /// pairing without a system)
        #[arg(long)]
        pos: Option<usize>,
    },
    /// Remove a pairing
    Remove {
        /// Pairing position from `garden show`
        pos: usize,
    },
    /// Move a pairing to a new position
    Move {
        /// Current position
        from: usize,
        /// Target position
        to: usize,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Mark a task done
    Done {
        /// Task id from `sprout tasks`
        id: String,
        /// Completion date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum StageCommands {
    /// Show a plant's current stage and cycle progress
    Show {
        /// Exact catalog name
        plant: String,
        /// Also print the nutrient dose for this reservoir volume
        #[arg(long)]
        liters: Option<f64>,
    },
    /// Advance a plant to its next stage
    Advance {
        /// Exact catalog name
        plant: String,
    },
    /// Print the typical week-by-week growth timeline
    Timeline,
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// List journal entries, newest first
    List {
        /// Only entries for the pairing at this position
        #[arg(long)]
        pos: Option<usize>,
    },
    /// Log an observation against a pairing
    Add {
        /// Pairing position from `garden show`
        pos: usize,
        /// The observation
        note: String,
        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Remove a journal entry by id
    Remove {
        /// Entry id from `sprout log list`
        id: uuid::Uuid,
    },
}

/// Notifier that prints to stdout, prefixed so notifications stand out from
/// command output.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("* {message}");
    }

    fn info(&self, message: &str) {
        println!("- {message}");
    }
}

async fn open_garden(cli_data_file: Option<&std::path::Path>) -> Result<Garden<JsonFileStore>> {
    let resolved = SproutConfig::resolve(cli_data_file)?;
    let store = JsonFileStore::new(resolved.data_file);
    Garden::open(store, Box::new(ConsoleNotifier)).await
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plant { command } => catalog_cmds::run_plant_command(command)?,
        Commands::System { command } => catalog_cmds::run_system_command(command)?,
        Commands::Garden { command } => {
            let mut garden = open_garden(cli.data_file.as_deref()).await?;
            garden_cmds::run_garden_command(command, &mut garden).await?;
        }
        Commands::Tasks { due, command } => {
            let mut garden = open_garden(cli.data_file.as_deref()).await?;
            match command {
                Some(TaskCommands::Done { id, date }) => {
                    task_cmds::run_tasks_done(&mut garden, &id, date.unwrap_or_else(today))
                        .await?;
                }
                None => task_cmds::run_tasks_list(&garden, due, today())?,
            }
        }
        Commands::Reminders { date } => {
            let garden = open_garden(cli.data_file.as_deref()).await?;
            task_cmds::run_reminders(&garden, date.unwrap_or_else(today))?;
        }
        Commands::Dose { stage, liters } => task_cmds::run_dose(&stage, liters)?,
        Commands::Stage { command } => {
            let mut garden = open_garden(cli.data_file.as_deref()).await?;
            stage_cmds::run_stage_command(command, &mut garden).await?;
        }
        Commands::Log { command } => {
            let mut garden = open_garden(cli.data_file.as_deref()).await?;
            log_cmds::run_log_command(command, &mut garden, today()).await?;
        }
        Commands::Signin { name } => session::run_signin(&name, today())?,
        Commands::Signout => session::run_signout(&ConsoleNotifier)?,
        Commands::Whoami => session::run_whoami()?,
    }

    Ok(())
}
