//! pagepress CLI: crawl a website and press each page into a document
//!
//! Runs in two phases. Discovery enumerates up to `--max-pages` URLs
//! breadth-first and writes the manifest; after an explicit confirmation
//! the generation phase produces one named artifact per discovered URL.
//! Declining the confirmation ends the run cleanly (exit 0).

use anyhow::{Context, Result};
use clap::Parser;
use pagepress::config::Config;
use pagepress::crawl::{normalize_url, HttpRenderer, HttpRendererConfig};
use pagepress::document::TextRenderer;
use pagepress::pipeline::Pipeline;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

#[derive(Parser)]
#[command(name = "pagepress")]
#[command(about = "Crawl a website and press each page into a named, paginated document")]
#[command(version)]
struct Cli {
    /// Seed URL to crawl (prompted for when omitted)
    url: Option<String>,

    /// Maximum number of pages to discover (prompted for when omitted)
    #[arg(short, long)]
    max_pages: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "pagepress.toml")]
    config: PathBuf,

    /// Output directory for artifacts (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the confirmation prompt before the generation phase
    #[arg(short = 'y', long)]
    assume_yes: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    let log_level = match cli.verbose {
        0 => config
            .logging
            .level
            .as_str()
            .parse()
            .unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Merge runtime inputs, prompting for whatever the CLI didn't supply
    config.crawl.seed_url = match cli.url {
        Some(url) => normalize_seed(&url),
        None => prompt_seed_url()?,
    };
    config.crawl.max_pages = match cli.max_pages {
        Some(n) => n,
        None => prompt_max_pages()?,
    };
    if let Some(output) = cli.output {
        config.output.dir = output;
    }

    // Configuration errors are fatal before any crawling starts
    config.validate()?;
    std::fs::create_dir_all(&config.output.dir).with_context(|| {
        format!(
            "failed to create output directory '{}'",
            config.output.dir.display()
        )
    })?;

    // Renderer construction failure is fatal too — without a session
    // there is nothing to crawl with.
    let page_renderer = HttpRenderer::new(HttpRendererConfig::from_crawl_config(&config.crawl))
        .context("failed to initialize the page renderer")?;

    let seed_url = config.crawl.seed_url.clone();
    let mut pipeline = Pipeline::new(config, page_renderer, Box::new(TextRenderer::new()));

    // Phase 1: discovery
    let urls = pipeline.discover().await;
    if urls.is_empty() {
        pipeline.finish();
        println!("No URLs discovered — nothing to generate.");
        return Ok(());
    }
    pipeline.write_manifest(&urls)?;

    // Explicit confirmation gates the expensive phase
    println!("\n{} URLs found and saved.", urls.len());
    if !cli.assume_yes && !confirm_generation()? {
        info!("generation cancelled by user");
        return Ok(());
    }

    // Phase 2: generation
    pipeline.generate(&urls).await;

    let stats = pipeline.finish().clone();
    println!("\n{}", "=".repeat(72));
    println!("RUN SUMMARY");
    println!("{}", "=".repeat(72));
    println!("Seed URL:          {}", seed_url);
    println!("URLs crawled:      {}", stats.urls_crawled);
    println!("Artifacts created: {}", stats.artifacts_created);
    println!("Errors:            {}", stats.errors);
    println!(
        "Duration:          {:.1} seconds ({:.1} minutes)",
        stats.duration_secs(),
        stats.duration_secs() / 60.0
    );
    println!("{}", "=".repeat(72));

    Ok(())
}

/// Scheme-less input gets the secure scheme prepended before validation.
fn normalize_seed(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Ask for the seed URL until a parseable one with a host comes in.
fn prompt_seed_url() -> Result<String> {
    loop {
        let input = prompt("Website URL (e.g. https://example.com): ")?;
        if input.is_empty() {
            println!("URL must not be empty.");
            continue;
        }
        let candidate = normalize_seed(&input);
        match Url::parse(&normalize_url(&candidate)) {
            Ok(url) if url.host_str().is_some() => {
                println!("URL accepted: {}", candidate);
                return Ok(candidate);
            }
            _ => println!("Invalid URL, try again."),
        }
    }
}

/// Ask for the page budget until a positive number comes in.
fn prompt_max_pages() -> Result<usize> {
    loop {
        let input = prompt("Max pages to crawl (e.g. 20, 50, 100): ")?;
        match input.parse::<usize>() {
            Ok(n) if n > 0 => {
                println!("Max pages: {}", n);
                return Ok(n);
            }
            _ => println!("Please enter a number greater than 0."),
        }
    }
}

/// Affirmative answers: yes/y/ja/j, case-insensitive. Anything else
/// halts the run after discovery — cancellation, not failure.
fn confirm_generation() -> Result<bool> {
    let answer = prompt("Create documents now? (yes/no): ")?;
    Ok(matches!(
        answer.to_lowercase().as_str(),
        "yes" | "y" | "ja" | "j"
    ))
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}
