//! Semantic command - property inheritance in a semantic network

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::CommonConfig,
        output::{finish, print_kv, print_section, print_subsection},
    },
    input::{parse_facts, parse_names, read_input},
    semantic::{self, KnowledgeBase},
};

#[derive(Parser, Debug)]
#[command(about = "Resolve inherited properties in a semantic network")]
pub struct SemanticArgs {
    /// Fact file, one `subject-relation-object` per line
    pub facts: PathBuf,

    /// Comma-separated entity names
    #[arg(long)]
    pub entities: String,

    /// Entity to query
    #[arg(long)]
    pub query: String,
}

pub fn execute(args: SemanticArgs, common: &CommonConfig) -> Result<()> {
    let kb = KnowledgeBase::new(
        parse_names(&args.entities),
        parse_facts(&read_input(&args.facts)?)?,
    )?;

    print_section("Semantic Network");
    let run = common
        .trace()
        .run(|trace| semantic::solve(&kb, &args.query, trace));

    finish(run, common, |inference| {
        print_kv("Entity", &inference.entity);
        print_kv("Properties", &inference.total().to_string());
        print_subsection("Direct");
        for property in &inference.direct {
            println!("  {} {}", property.relation, property.target);
        }
        print_subsection("Inherited");
        for property in &inference.inherited {
            println!(
                "  {} {} (from {})",
                property.relation, property.target, property.inherited_from
            );
        }
        print_subsection("By relation");
        for (relation, targets) in inference.by_relation() {
            print_kv(&relation, &targets.join(", "));
        }
    })
}
