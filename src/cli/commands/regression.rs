//! Regression command - least-squares line fit

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::CommonConfig,
        output::{finish, print_kv, print_section},
    },
    input::{parse_points, read_input},
    learning::regression,
};

#[derive(Parser, Debug)]
#[command(about = "Fit a simple linear regression")]
pub struct RegressionArgs {
    /// Point file, one `x,y` per line
    pub data: PathBuf,

    /// Predict y at this x
    #[arg(long, allow_hyphen_values = true)]
    pub predict: Option<f64>,
}

pub fn execute(args: RegressionArgs, common: &CommonConfig) -> Result<()> {
    let points = parse_points(&read_input(&args.data)?)?;

    print_section("Linear Regression");
    let run = common
        .trace()
        .run(|trace| regression::solve(&points, args.predict, trace));

    finish(run, common, |outcome| {
        let model = &outcome.model;
        print_kv("Equation", &model.equation());
        print_kv("Slope b", &format!("{:.4}", model.slope));
        print_kv("Intercept a", &format!("{:.4}", model.intercept));
        print_kv("R²", &format!("{:.4}", model.r_squared));
        if let Some((x, y)) = outcome.prediction {
            print_kv(&format!("Ŷ({x})"), &format!("{y:.2}"));
        }
    })
}
