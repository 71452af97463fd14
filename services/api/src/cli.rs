use crate::demo::{run_demo, run_score, DemoArgs, EnterpriseScoreArgs, IndividualScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_engine::error::AppError;
use credit_engine::scoring::Submission;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Decision Engine",
    about = "Score credit applications and run the decision service from the command line",
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
    /// Score a single application and print the decision
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Walk through sample decisions for both product lines
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Score a consumer application
    Individual(IndividualScoreArgs),
    /// Score an SME application
    Enterprise(EnterpriseScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score {
            command: ScoreCommand::Individual(args),
        } => run_score(
            Submission::Individual(args.submission()),
            &args.policy,
            args.json,
        ),
        Command::Score {
            command: ScoreCommand::Enterprise(args),
        } => run_score(
            Submission::Enterprise(args.submission()),
            &args.policy,
            args.json,
        ),
        Command::Demo(args) => run_demo(args),
    }
}
