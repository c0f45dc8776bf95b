//! Output formatting for CLI

use std::{fs::File, path::Path};

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::{
    cli::config::CommonConfig,
    ports::TraceObserver,
    trace::{Run, TraceEntry, TraceLevel},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render one trace entry as a numbered line.
pub fn format_entry(entry: &TraceEntry) -> String {
    let marker = match entry.level {
        TraceLevel::Info => "  ",
        TraceLevel::Highlight => "▶ ",
        TraceLevel::Success => "✓ ",
        TraceLevel::Error => "✗ ",
    };
    format!("{:>4}. {marker}{}", entry.step, entry.message)
}

/// Observer that prints trace entries as they are recorded.
#[derive(Debug, Default)]
pub struct TracePrinter;

impl TraceObserver for TracePrinter {
    fn on_entry(&mut self, entry: &TraceEntry) {
        println!("{}", format_entry(entry));
    }

    fn on_finish(&mut self, entries: &[TraceEntry]) {
        println!("\n({} steps)", entries.len());
    }
}

/// Write any serializable value as pretty JSON.
pub fn export_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Summarize a finished run, export it if requested and surface its error.
pub fn finish<T: Serialize>(
    run: Run<T>,
    common: &CommonConfig,
    summarize: impl FnOnce(&T),
) -> Result<()> {
    if let Ok(value) = &run.result {
        summarize(value);
    }
    let failure = run.result.as_ref().err().map(ToString::to_string);

    if let Some(path) = &common.json {
        export_json(path, &run.into_report())?;
        println!("\n✓ Report exported to: {}", path.display());
    }

    match failure {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}
