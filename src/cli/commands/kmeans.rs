//! K-means command - cluster planar points

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::CommonConfig,
        output::{finish, print_kv, print_section, print_subsection},
    },
    clustering::{KMeansConfig, kmeans},
    input::{parse_points, read_input},
};

#[derive(Parser, Debug)]
#[command(about = "Cluster points with K-Means")]
pub struct KMeansArgs {
    /// Point file, one `x,y` per line
    pub data: PathBuf,

    /// Number of clusters
    #[arg(long, short = 'k', default_value_t = 2)]
    pub k: usize,

    #[arg(long, default_value_t = kmeans::DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,
}

pub fn execute(args: KMeansArgs, common: &CommonConfig) -> Result<()> {
    let points = parse_points(&read_input(&args.data)?)?;
    let mut config = KMeansConfig::new(args.k).with_max_iterations(args.max_iterations);
    if let Some(seed) = common.seed {
        config = config.with_seed(seed);
    }

    print_section("K-Means");
    let run = common
        .trace()
        .run(|trace| kmeans::solve(&points, &config, trace));

    finish(run, common, |outcome| {
        print_kv("Iterations", &outcome.iterations.to_string());
        print_kv("Converged", if outcome.converged { "yes" } else { "no" });
        print_kv("WCSS", &format!("{:.4}", outcome.wcss));
        print_subsection("Clusters");
        for (idx, (centroid, members)) in outcome.centroids.iter().zip(&outcome.clusters).enumerate() {
            print_kv(
                &format!("C{}", idx + 1),
                &format!("centroid {centroid}, {} point(s)", members.len()),
            );
        }
    })
}
