//! Search command - Uniform Cost, Greedy Best-First and A*

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    cli::{
        config::CommonConfig,
        output::{finish, print_kv, print_section},
    },
    identifiers::format_path,
    input::{parse_edges, parse_heuristic, parse_nodes, read_input},
    search::{self, Graph, Heuristic, SearchOutcome, SearchProblem, SearchStrategy},
    utils::format_cost,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyChoice {
    Ucs,
    Greedy,
    Astar,
    /// Run all three and compare
    All,
}

#[derive(Parser, Debug)]
#[command(about = "Find a path with UCS, Greedy Best-First or A*")]
pub struct SearchArgs {
    /// Edge file, one `from-to-cost` per line
    pub edges: PathBuf,

    /// Comma-separated node names
    #[arg(long)]
    pub nodes: String,

    /// Heuristic file, one `node=value` per line (missing nodes count as 0)
    #[arg(long)]
    pub heuristic: Option<PathBuf>,

    #[arg(long)]
    pub start: String,

    #[arg(long)]
    pub goal: String,

    #[arg(long, short = 's', value_enum, default_value = "astar")]
    pub strategy: StrategyChoice,
}

pub fn execute(args: SearchArgs, common: &CommonConfig) -> Result<()> {
    let graph = Graph::new(parse_nodes(&args.nodes), parse_edges(&read_input(&args.edges)?)?)?;
    let heuristic = match &args.heuristic {
        Some(path) => parse_heuristic(&read_input(path)?)?,
        None => Heuristic::zero(),
    };
    let problem = SearchProblem::new(graph, heuristic, args.start.as_str(), args.goal.as_str())?;

    let strategies: Vec<SearchStrategy> = match args.strategy {
        StrategyChoice::Ucs => vec![SearchStrategy::UniformCost],
        StrategyChoice::Greedy => vec![SearchStrategy::Greedy],
        StrategyChoice::Astar => vec![SearchStrategy::AStar],
        StrategyChoice::All => SearchStrategy::ALL.to_vec(),
    };

    let several = strategies.len() > 1;
    let mut summary = Vec::new();
    for strategy in strategies {
        print_section(&format!("{}: {}", strategy.name(), strategy.formula()));
        let common = if several {
            common.labeled(&strategy.to_string())
        } else {
            common.clone()
        };
        let run = common
            .trace()
            .run(|trace| search::solve(&problem, strategy, trace));
        let steps = run.steps();
        finish(run, &common, |outcome| {
            print_outcome(outcome, steps);
            summary.push((strategy, outcome.cost(), outcome.expansions()));
        })?;
    }

    if summary.len() > 1 {
        print_section("Comparison");
        for (strategy, cost, expansions) in summary {
            let cost = cost.map_or_else(|| "no path".to_string(), format_cost);
            print_kv(strategy.name(), &format!("cost {cost}, {expansions} expansions"));
        }
    }
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, steps: usize) {
    match outcome {
        SearchOutcome::Found(found) => {
            print_kv("Path", &format_path(&found.path));
            print_kv("Cost", &format_cost(found.cost));
            print_kv("Expansions", &found.expansions.to_string());
        }
        SearchOutcome::NotFound { expansions, .. } => {
            print_kv("Path", "not found");
            print_kv("Expansions", &expansions.to_string());
        }
    }
    print_kv("Steps", &steps.to_string());
}
