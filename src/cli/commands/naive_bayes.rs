//! Naive-bayes command - categorical Naïve Bayes classification

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
    learning::naive_bayes::{self, DEFAULT_SMOOTHING, NaiveBayesConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Classify a query with Naïve Bayes")]
pub struct NaiveBayesArgs {
    /// CSV table; the last column is the class label
    pub data: PathBuf,

    /// Query file, one `feature=value` per line
    #[arg(long)]
    pub query: Option<PathBuf>,

    /// Inline query assignment `feature=value` (repeatable)
    #[arg(long = "set", value_name = "FEATURE=VALUE")]
    pub assignments: Vec<String>,

    /// Probability used for feature values never seen with a class
    #[arg(long, default_value_t = DEFAULT_SMOOTHING)]
    pub smoothing: f64,
}

pub fn execute(args: NaiveBayesArgs, common: &CommonConfig) -> Result<()> {
    let dataset = parse_table(&read_input(&args.data)?)?;
    let query = load_query(args.query.as_deref(), &args.assignments)?;
    let config = NaiveBayesConfig::default().with_smoothing(args.smoothing);

    print_section("Naïve Bayes");
    let run = common
        .trace()
        .run(|trace| naive_bayes::solve(&dataset, &query, &config, trace));

    finish(run, common, |outcome| {
        print_subsection("Priors");
        for prior in &outcome.model.priors {
            print_kv(
                &prior.class,
                &format!("{}/{} = {:.4}", prior.count, dataset.len(), prior.probability),
            );
        }
        print_subsection("Normalized probabilities");
        for score in &outcome.prediction.scores {
            print_kv(&score.class, &format!("{:.2}%", score.probability * 100.0));
        }
        print_subsection("Prediction");
        print_kv(dataset.class_label(), &outcome.prediction.predicted);
    })
}
