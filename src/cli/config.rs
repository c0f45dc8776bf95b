//! Shared configuration types for CLI commands

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{cli::output::TracePrinter, trace::Trace};

/// Common configuration shared across commands
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Verbose diagnostic logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Do not print the step trace
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Write the trace and result as JSON
    #[arg(long, global = true, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl CommonConfig {
    /// Trace collector for one run, printing steps live unless quiet.
    pub fn trace(&self) -> Trace {
        if self.quiet {
            Trace::new()
        } else {
            Trace::new().with_observer(Box::new(TracePrinter))
        }
    }

    /// Copy whose JSON path carries `label`, for commands that produce
    /// several runs: `report.json` becomes `report-astar.json`.
    pub fn labeled(&self, label: &str) -> Self {
        let mut config = self.clone();
        if let Some(path) = &self.json {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let file = match path.extension() {
                Some(ext) => format!("{stem}-{label}.{}", ext.to_string_lossy()),
                None => format!("{stem}-{label}"),
            };
            config.json = Some(path.with_file_name(file));
        }
        config
    }
}
