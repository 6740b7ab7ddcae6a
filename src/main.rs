//! TLD Parser CLI
//!
//! Parses tag library descriptors and prints their documentation model as
//! JSON.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tld_parser::dates::{
    parse_timestamp, DATE_CREATED, DATE_MODIFIED, DATE_PUBLISHED, DATE_REVIEWED,
};
use tld_parser::{Dates, ParserConfig, Taglib, Timestamp};

#[derive(Debug, Parser)]
#[command(name = "tld-parser", version, about = "Parse JSP tag library descriptors")]
struct Cli {
    /// Descriptor files to parse
    #[arg(required = true)]
    tlds: Vec<PathBuf>,

    /// CSS class marking description summaries
    #[arg(long)]
    summary_class: Option<String>,

    /// Default dateCreated for taglibs without date comments
    #[arg(long)]
    created: Option<String>,

    /// Default datePublished for taglibs without date comments
    #[arg(long)]
    published: Option<String>,

    /// Default dateModified for taglibs without date comments
    #[arg(long)]
    modified: Option<String>,

    /// Default dateReviewed for taglibs without date comments
    #[arg(long)]
    reviewed: Option<String>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,
}

impl Cli {
    /// Environment configuration with command line overrides applied
    fn config(&self) -> Result<ParserConfig> {
        let mut config = ParserConfig::from_env().context("Invalid TLD_* environment")?;
        if let Some(summary_class) = &self.summary_class {
            config = config.with_summary_class(summary_class.as_str());
        }
        let flags = Dates::new(
            flag_timestamp(&self.created, DATE_CREATED)?,
            flag_timestamp(&self.published, DATE_PUBLISHED)?,
            flag_timestamp(&self.modified, DATE_MODIFIED)?,
            flag_timestamp(&self.reviewed, DATE_REVIEWED)?,
        );
        if !flags.is_unknown() {
            config = config.with_default_dates(Some(flags));
        }
        Ok(config)
    }
}

fn flag_timestamp(value: &Option<String>, variable: &'static str) -> Result<Option<Timestamp>> {
    value
        .as_deref()
        .map(|v| parse_timestamp(variable, v))
        .transpose()
        .with_context(|| format!("Invalid --{} value", &variable[4..].to_lowercase()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tld_parser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.config()?;
    tracing::debug!("Summary class: {}", config.summary_class);

    let mut taglibs = Vec::with_capacity(cli.tlds.len());
    for path in &cli.tlds {
        let taglib = Taglib::from_path(&config, path)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        taglibs.push(taglib);
    }

    let json = if cli.compact {
        serde_json::to_string(&taglibs)?
    } else {
        serde_json::to_string_pretty(&taglibs)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
