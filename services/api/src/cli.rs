use crate::demo::{run_course_list, run_demo, run_recommend, DemoArgs, ListArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use learnwell::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "learnwell",
    about = "Serve and exercise the learnwell profile and course matching service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Browse the course catalog and run recommendations from the terminal
    Courses {
        #[command(subcommand)]
        command: CoursesCommand,
    },
    /// Run a scripted profile journey against an in-memory store
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CoursesCommand {
    /// Score the catalog against quiz answers and print the top matches
    Recommend(RecommendArgs),
    /// List catalog courses, optionally filtered
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Course catalog file (.json or .csv) to serve instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Profile snapshot file read on startup and written on shutdown
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Courses {
            command: CoursesCommand::Recommend(args),
        } => run_recommend(args),
        Command::Courses {
            command: CoursesCommand::List(args),
        } => run_course_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
