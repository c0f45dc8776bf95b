//! Game command - Minimax and Alpha-Beta over a declared game tree

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};

use crate::{
    cli::{
        config::CommonConfig,
        output::{finish, print_kv, print_section},
    },
    game_tree::{self, Comparison, GameAlgorithm, GameOutcome, GameTree},
    input::{parse_game_tree, read_input},
    trace::Run,
    utils::format_value,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmChoice {
    Minimax,
    AlphaBeta,
    /// Run both and report the savings from pruning
    Compare,
}

#[derive(Parser, Debug)]
#[command(about = "Evaluate a game tree with Minimax or Alpha-Beta")]
pub struct GameArgs {
    /// Tree file, one `id-kindOrValue-parent` per line
    pub tree: PathBuf,

    #[arg(long, short = 'a', value_enum, default_value = "alpha-beta")]
    pub algorithm: AlgorithmChoice,
}

pub fn execute(args: GameArgs, common: &CommonConfig) -> Result<()> {
    let tree = GameTree::build(parse_game_tree(&read_input(&args.tree)?)?)?;
    let algorithm = match args.algorithm {
        AlgorithmChoice::Minimax => GameAlgorithm::Minimax,
        AlgorithmChoice::AlphaBeta => GameAlgorithm::AlphaBeta,
        AlgorithmChoice::Compare => return execute_compare(&tree, common),
    };

    print_section(algorithm.name());
    let run = common
        .trace()
        .run(|trace| game_tree::solve(&tree, algorithm, trace));
    finish(run, common, print_outcome)
}

fn execute_compare(tree: &GameTree, common: &CommonConfig) -> Result<()> {
    let comparison = game_tree::compare_with(tree, |algorithm| {
        print_section(algorithm.name());
        common.trace()
    });
    let summary = |run: &Run<GameOutcome>| run.result.as_ref().ok().map(|o| (o.value, o.visited));
    let visited = summary(&comparison.minimax).zip(summary(&comparison.alpha_beta));
    let saved = comparison.nodes_saved();

    let Comparison {
        minimax,
        alpha_beta,
    } = comparison;
    for (algorithm, run) in [
        (GameAlgorithm::Minimax, minimax),
        (GameAlgorithm::AlphaBeta, alpha_beta),
    ] {
        finish(run, &common.labeled(&algorithm.to_string()), print_outcome)?;
    }

    if let (Some(((minimax_value, minimax), (pruned_value, pruned))), Some(saved)) = (visited, saved) {
        if minimax_value != pruned_value {
            return Err(anyhow!(
                "alpha-beta value {pruned_value} differs from minimax value {minimax_value}"
            ));
        }
        print_section("Comparison");
        print_kv("Minimax visited", &minimax.to_string());
        print_kv("Alpha-Beta visited", &pruned.to_string());
        print_kv("Saved", &saved.to_string());
    }
    Ok(())
}

fn print_outcome(outcome: &GameOutcome) {
    print_kv("Root value", &format_value(outcome.value));
    if let Some(best) = &outcome.best_move {
        print_kv("Best move", best.as_str());
    }
    print_kv(
        "Visited",
        &format!("{} of {} nodes", outcome.visited, outcome.total),
    );
    if !outcome.pruned.is_empty() {
        let pruned: Vec<&str> = outcome.pruned.iter().map(|id| id.as_str()).collect();
        print_kv("Pruned", &pruned.join(", "));
    }
}
