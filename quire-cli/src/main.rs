//! Quire CLI
//!
//! Builds the formatting-object tree of an XSL-FO document and prints it
//! with its resolved key properties, or as JSON.

mod logger;
mod print;
mod reader;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use quire_builder::{BuilderConfig, DEFAULT_MAX_CHUNK_LEN, FoTreeBuilder, NullHandler};
use quire_common::ValidationMode;
use quire_properties::IndentRule;

/// How `start-indent` and `end-indent` account for margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IndentMode {
    /// Always add the margin.
    Always,
    /// Skip the margin on objects that generate no inline areas.
    SkipWithoutInlineAreas,
}

impl From<IndentMode> for IndentRule {
    fn from(mode: IndentMode) -> Self {
        match mode {
            IndentMode::Always => Self::MarginAlwaysIncluded,
            IndentMode::SkipWithoutInlineAreas => Self::SkipMarginWithoutInlineAreas,
        }
    }
}

/// Quire: XSL-FO property resolution and tree construction
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the formatting-object tree
    quire document.fo

    # Abort on the first structural or property violation
    quire --strict document.fo

    # Dump the tree, ids, fonts and events as JSON
    quire --json document.fo > tree.json
"#)]
struct Cli {
    /// XSL-FO document to build
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Treat structural and property violations as fatal
    #[arg(long)]
    strict: bool,

    /// Print JSON instead of a tree outline
    #[arg(long)]
    json: bool,

    /// Split character data into text runs of at most N characters
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CHUNK_LEN)]
    max_chunk_len: usize,

    /// How indents account for margins
    #[arg(long, value_enum, default_value = "always")]
    indent_rule: IndentMode,

    /// Log more (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    const fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn config(&self) -> BuilderConfig {
        let mode = if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        };
        BuilderConfig::default()
            .with_validation_mode(mode)
            .with_max_chunk_len(self.max_chunk_len)
            .with_indent_rule(self.indent_rule.into())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.level());

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("could not read {}", cli.input.display()))?;

    let mut builder = FoTreeBuilder::from_config(cli.config(), NullHandler);
    let document = reader::parse(&input, &mut builder)
        .with_context(|| format!("could not build {}", cli.input.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&print::document_json(&document))?;
        println!("{json}");
    } else {
        print::print_document(&document);
    }
    Ok(())
}
