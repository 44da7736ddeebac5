use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hrportal_client::{ClientConfig, EmployeeDirectory, PortalApi, PortalBackend};
use hrportal_core::process_status::{ProcessAction, ProcessStatus, ProcessType};
use hrportal_core::task_status::TaskStatus;
use hrportal_core::task_type::TaskType;
use hrportal_core::types::DbId;

mod commands;
mod render;

/// Command-line front end for the HR portal onboarding module.
#[derive(Parser)]
#[command(name = "hrportal")]
#[command(about = "Track onboarding and offboarding processes", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (overrides HRPORTAL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Onboarding/offboarding processes
    #[command(subcommand)]
    Processes(ProcessCommand),

    /// Tasks inside a process
    #[command(subcommand)]
    Tasks(TaskCommand),

    /// Process templates
    #[command(subcommand)]
    Templates(TemplateCommand),

    /// Dashboard counters
    Stats,

    /// Employees from the personnel directory
    Employees {
        /// Filter on name or email
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Directory, dynamic and distribution groups in one list
    Groups {
        /// Filter on name or email
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProcessCommand {
    /// List processes
    List {
        #[arg(long = "type", value_parser = parse_process_type)]
        process_type: Option<ProcessType>,

        #[arg(long, value_parser = parse_process_status)]
        status: Option<ProcessStatus>,
    },

    /// Show one process with its tasks
    Show { id: DbId },

    /// Start a new process
    Create {
        #[arg(long = "type", value_parser = parse_process_type)]
        process_type: ProcessType,

        #[arg(long)]
        title: String,

        #[arg(long)]
        employee: String,

        #[arg(long)]
        email: Option<String>,

        /// Seed the tasks from this template
        #[arg(long)]
        template: Option<DbId>,

        /// Responsible employee id
        #[arg(long)]
        responsible: Option<DbId>,
    },

    /// Complete, pause, resume or cancel a process
    Status { id: DbId, action: ActionArg },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Move a task to a new status
    Status {
        process_id: DbId,
        task_id: DbId,
        #[arg(value_parser = parse_task_status)]
        status: TaskStatus,

        /// Completion notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Add a task to a process
    Add {
        process_id: DbId,

        /// Task type code, e.g. Hardware or AccountAanmaken
        #[arg(long = "type")]
        task_type: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value_t = 1)]
        days: u32,

        #[arg(long)]
        optional: bool,
    },

    /// Assign a task to an employee
    Assign {
        process_id: DbId,
        task_id: DbId,
        employee_id: DbId,
    },

    /// Remove a task from a process
    Delete { process_id: DbId, task_id: DbId },
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List templates per process type
    List,

    /// Show a template's task definitions
    Show { id: DbId },

    /// Copy a template
    Duplicate {
        id: DbId,
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a template
    Delete { id: DbId },

    /// Make a template the default for its process type
    Default { id: DbId },

    /// Append a task definition
    AddTask {
        id: DbId,
        #[arg(value_parser = parse_task_type)]
        task_type: TaskType,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        days: Option<u32>,
    },

    /// Remove the task definition at ORDER
    RemoveTask { id: DbId, order: u32 },

    /// Move the task definition at ORDER up or down
    Move {
        id: DbId,
        order: u32,
        direction: Direction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ActionArg {
    Complete,
    Pause,
    Resume,
    Cancel,
}

impl From<ActionArg> for ProcessAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Complete => ProcessAction::Complete,
            ActionArg::Pause => ProcessAction::Pause,
            ActionArg::Resume => ProcessAction::Resume,
            ActionArg::Cancel => ProcessAction::Cancel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

fn parse_process_type(s: &str) -> Result<ProcessType, String> {
    ProcessType::parse(s).map_err(|e| e.to_string())
}

fn parse_process_status(s: &str) -> Result<ProcessStatus, String> {
    ProcessStatus::parse(s).map_err(|e| e.to_string())
}

fn parse_task_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s).map_err(|e| e.to_string())
}

/// Template definitions only accept the template-editor task types.
fn parse_task_type(s: &str) -> Result<TaskType, String> {
    TaskType::parse(s).map_err(|e| e.to_string())
}

/// Shared handles every command runs against.
pub struct Context {
    pub backend: Arc<dyn PortalBackend>,
    pub directory: EmployeeDirectory,
    pub json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hrportal_cli=info,hrportal_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // --- Configuration ---
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    tracing::debug!(api_url = %config.api_url, "Loaded client configuration");

    let backend: Arc<dyn PortalBackend> = Arc::new(PortalApi::new(&config)?);
    let ctx = Context {
        directory: EmployeeDirectory::new(Arc::clone(&backend)),
        backend,
        json: args.json,
    };

    match args.command {
        Commands::Processes(cmd) => commands::processes::execute(&ctx, cmd).await,
        Commands::Tasks(cmd) => commands::tasks::execute(&ctx, cmd).await,
        Commands::Templates(cmd) => commands::templates::execute(&ctx, cmd).await,
        Commands::Stats => commands::directory::stats(&ctx).await,
        Commands::Employees { search } => {
            commands::directory::employees(&ctx, search.as_deref()).await
        }
        Commands::Groups { search } => commands::directory::groups(&ctx, search.as_deref()).await,
    }
}
