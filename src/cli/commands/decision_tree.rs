//! Decision-tree command - ID3 training and prediction

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        commands::load_query,
        config::CommonConfig,
        output::{finish, print_kv, print_section, print_subsection},
    },
    input::{parse_table, read_input},
    learning::{DecisionNode, decision_tree},
};

#[derive(Parser, Debug)]
#[command(about = "Learn an ID3 decision tree and classify a query")]
pub struct DecisionTreeArgs {
    /// CSV table; the last column is the class label
    pub data: PathBuf,

    /// Query file, one `feature=value` per line
    #[arg(long)]
    pub query: Option<PathBuf>,

    /// Inline query assignment `feature=value` (repeatable)
    #[arg(long = "set", value_name = "FEATURE=VALUE")]
    pub assignments: Vec<String>,
}

pub fn execute(args: DecisionTreeArgs, common: &CommonConfig) -> Result<()> {
    let dataset = parse_table(&read_input(&args.data)?)?;
    let query = load_query(args.query.as_deref(), &args.assignments)?;
    let query = (!query.is_empty()).then_some(query);

    print_section("Decision Tree (ID3)");
    let run = common
        .trace()
        .run(|trace| decision_tree::solve(&dataset, query.as_ref(), trace));

    finish(run, common, |outcome| {
        print_subsection("Tree");
        let mut lines = Vec::new();
        render(&outcome.tree.root, 0, &mut lines);
        for line in lines {
            println!("{line}");
        }
        if let Some(prediction) = &outcome.prediction {
            print_subsection("Prediction");
            let path: Vec<String> = prediction
                .path()
                .iter()
                .map(|test| match &test.value {
                    Some(value) => format!("{}={}", test.feature, value),
                    None => format!("{}=?", test.feature),
                })
                .collect();
            print_kv(&outcome.tree.class_label, prediction.label());
            print_kv("Path", &path.join(" → "));
        }
    })
}

/// Indented text rendering of a tree.
fn render(node: &DecisionNode, indent: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(indent);
    match node {
        DecisionNode::Leaf { class, samples } => {
            lines.push(format!("{pad}→ {class} ({samples})"));
        }
        DecisionNode::Split {
            feature, branches, ..
        } => {
            for branch in branches {
                lines.push(format!("{pad}{feature} = {}", branch.value));
                render(&branch.node, indent + 1, lines);
            }
        }
    }
}
