//! Apriori command - frequent itemsets and association rules

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::CommonConfig,
        output::{finish, print_kv, print_section, print_subsection},
    },
    input::{parse_transactions, read_input},
    mining::{AprioriConfig, apriori},
};

#[derive(Parser, Debug)]
#[command(about = "Mine frequent itemsets and association rules")]
pub struct AprioriArgs {
    /// Transaction file, comma-separated items per line
    pub data: PathBuf,

    /// Minimum support in percent
    #[arg(long, default_value_t = 50.0)]
    pub min_support: f64,

    /// Minimum confidence in percent
    #[arg(long, default_value_t = 70.0)]
    pub min_confidence: f64,
}

pub fn execute(args: AprioriArgs, common: &CommonConfig) -> Result<()> {
    let transactions = parse_transactions(&read_input(&args.data)?);
    let config = AprioriConfig::from_percent(args.min_support, args.min_confidence);

    print_section("Apriori");
    let run = common
        .trace()
        .run(|trace| apriori::solve(&transactions, &config, trace));

    finish(run, common, |outcome| {
        print_kv("Transactions", &outcome.transactions.to_string());
        print_subsection("Frequent itemsets");
        for set in &outcome.frequent {
            print_kv(
                &format!("{{{}}}", set.items.join(", ")),
                &format!(
                    "{:.1}% ({}/{})",
                    set.support * 100.0,
                    set.count,
                    outcome.transactions
                ),
            );
        }
        print_subsection("Association rules");
        if outcome.rules.is_empty() {
            println!("  (none)");
        }
        for rule in &outcome.rules {
            println!(
                "  {rule}  support {:.1}%, confidence {:.1}%, lift {:.2}",
                rule.support * 100.0,
                rule.confidence * 100.0,
                rule.lift
            );
        }
    })
}
