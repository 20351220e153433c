// src/main.rs
//! `leafpad`: command-line front end for the Leafpad content client.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use leafpad::{ConfigOverrides, ContentService, ItemOptions, ListOptions};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineInput {
    /// Organization slug whose content is queried
    #[arg(short, long)]
    org: String,

    /// JSON file with configuration overrides (camelCase keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API origin (defaults to https://leafpad.io)
    #[arg(long)]
    base_url: Option<String>,

    /// Overall request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Attempts per request
    #[arg(long)]
    retries: Option<u32>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of posts
    List(ListArgs),
    /// Fetch a single post by slug
    Get {
        slug: String,
        /// Leave out the rendered HTML body
        #[arg(long, default_value_t = false)]
        no_html: bool,
    },
    /// Fetch one page of docs nested as a navigation tree
    Tree(ListArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long)]
    limit: Option<u32>,

    /// Tag filter; repeat for several tags
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(long, default_value = "")]
    search: String,

    /// Leave out rendered HTML bodies
    #[arg(long, default_value_t = false)]
    no_html: bool,
}

impl ListArgs {
    fn to_options(&self) -> ListOptions {
        let mut options = ListOptions::default()
            .page(self.page)
            .include_html(!self.no_html)
            .tags(self.tags.iter().cloned())
            .search(self.search.clone());
        if let Some(limit) = self.limit {
            options = options.limit(limit);
        }
        options
    }
}

impl CommandLineInput {
    /// Flags layered over the optional config file.
    fn overrides(&self) -> anyhow::Result<ConfigOverrides> {
        let file = match &self.config {
            Some(path) => ConfigOverrides::from_json_file(path)?,
            None => ConfigOverrides::default(),
        };
        let flags = ConfigOverrides {
            base_url: self.base_url.clone(),
            timeout: self.timeout_ms,
            retries: self.retries,
            ..Default::default()
        };
        Ok(flags.layered_over(file))
    }
}

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("leafpad.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // stdout carries the JSON output, so logs go to stderr.
    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs the selected subcommand and prints its result as JSON.
async fn run(cli: CommandLineInput) -> anyhow::Result<()> {
    let service = ContentService::new(&cli.org, cli.overrides()?)
        .context("Failed to configure the Leafpad client")?;

    match &cli.command {
        Command::List(args) => {
            let page = service.fetch_items(&args.to_options()).await?;
            log::info!(
                "Fetched {} of {} posts",
                page.items.len(),
                page.pagination.total_count
            );
            print_json(&page)
        }
        Command::Get { slug, no_html } => {
            let options = ItemOptions {
                include_html: !no_html,
            };
            let item = service.fetch_one(slug, &options).await?;
            if item.is_none() {
                log::warn!("No post with slug '{}' in '{}'", slug, cli.org);
            }
            print_json(&item)
        }
        Command::Tree(args) => {
            let docs = service.fetch_as_tree(&args.to_options()).await?;
            log::info!("Built {} root doc(s)", docs.tree.len());
            print_json(&docs)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    run(cli).await?;

    Ok(())
}
