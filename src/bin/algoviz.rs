//! algoviz CLI - step-by-step traces of classical AI algorithms
//!
//! This CLI provides one subcommand per algorithm family:
//! - Graph search (UCS, Greedy Best-First, A*)
//! - Game-tree evaluation (Minimax, Alpha-Beta)
//! - Decision trees, Naïve Bayes and linear regression
//! - K-Means clustering and Apriori rule mining
//! - Semantic-network inheritance

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use algoviz::cli::{commands, config::CommonConfig};

#[derive(Parser)]
#[command(name = "algoviz")]
#[command(version, about = "Step-traced classical AI algorithms", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Path finding with UCS, Greedy Best-First or A*
    Search(commands::search::SearchArgs),

    /// Minimax or Alpha-Beta over a game tree
    Game(commands::game::GameArgs),

    /// ID3 decision tree learning and prediction
    DecisionTree(commands::decision_tree::DecisionTreeArgs),

    /// Naïve Bayes classification
    NaiveBayes(commands::naive_bayes::NaiveBayesArgs),

    /// Simple linear regression
    Regression(commands::regression::RegressionArgs),

    /// K-Means clustering
    Kmeans(commands::kmeans::KMeansArgs),

    /// Apriori frequent itemsets and association rules
    Apriori(commands::apriori::AprioriArgs),

    /// Semantic-network property inheritance
    Semantic(commands::semantic::SemanticArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.common.verbose);
    let common = &cli.common;

    match cli.command {
        Commands::Search(args) => commands::search::execute(args, common),
        Commands::Game(args) => commands::game::execute(args, common),
        Commands::DecisionTree(args) => commands::decision_tree::execute(args, common),
        Commands::NaiveBayes(args) => commands::naive_bayes::execute(args, common),
        Commands::Regression(args) => commands::regression::execute(args, common),
        Commands::Kmeans(args) => commands::kmeans::execute(args, common),
        Commands::Apriori(args) => commands::apriori::execute(args, common),
        Commands::Semantic(args) => commands::semantic::execute(args, common),
    }
}
