use crate::console::{
    run_categories, run_filter, run_predict, run_recommend, CategoriesArgs, FilterArgs,
    PredictArgs, RecommendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use homescout::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Homescout",
    about = "Serve and query the housing recommendation and price projection models",
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
    /// Run one query against the loaded artifacts and print JSON to stdout
    Query {
        #[command(subcommand)]
        command: QueryCommand,
    },
}

#[derive(Subcommand, Debug)]
enum QueryCommand {
    /// Rank listings against a free-text description
    Recommend(RecommendArgs),
    /// Filter listings by structured criteria
    Filter(FilterArgs),
    /// Project a property's price forward under compound growth
    Predict(PredictArgs),
    /// List the distinct listing categories
    Categories(CategoriesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured artifact directory
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Query { command } => match command {
            QueryCommand::Recommend(args) => run_recommend(args),
            QueryCommand::Filter(args) => run_filter(args),
            QueryCommand::Predict(args) => run_predict(args),
            QueryCommand::Categories(args) => run_categories(args),
        },
    }
}
