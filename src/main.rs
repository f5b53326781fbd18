//! Subsite-Mapper main entry point
//!
//! This is the command-line interface for the Subsite-Mapper sitemap crawler.

use anyhow::Context;
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use subsite_mapper::config::{load_config, validate, Config};
use subsite_mapper::crawler::crawl;
use subsite_mapper::output::{render, sitemap_path, write_sitemap, RenderReport, SitemapStyle};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

/// Subsite-Mapper: a same-subdomain sitemap crawler
///
/// Subsite-Mapper fetches a start page, follows links that stay on the start
/// page's host down to a fixed depth, and writes the link tree as an
/// indented text sitemap named after the host.
#[derive(Parser, Debug)]
#[command(name = "subsite-mapper")]
#[command(version)]
#[command(about = "A same-subdomain sitemap crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Starting URL to crawl from
    #[arg(short = 'b', long = "base-url", value_name = "URL")]
    base_url: Option<String>,

    /// Number of levels you want to traverse (depth)
    #[arg(short, long, value_name = "DEPTH")]
    depth: Option<u32>,

    /// Directory the sitemap file is written to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// File log lines are appended to
    #[arg(long, value_name = "PATH", conflicts_with = "no_log_file")]
    log_file: Option<String>,

    /// Log to stdout only
    #[arg(long)]
    no_log_file: bool,

    /// Print the sitemap to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.crawl.start_url = url.clone();
        }
        if let Some(depth) = self.depth {
            config.crawl.max_depth = depth;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.display().to_string();
        }
        if let Some(path) = &self.log_file {
            config.output.log_file = Some(path.clone());
        }
        if self.no_log_file {
            config.output.log_file = None;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    // Setup logging based on verbosity
    setup_logging(
        cli.verbose,
        cli.quiet,
        config.output.log_file.as_deref(),
        LogStream::for_sitemap_on_stdout(cli.stdout),
    )?;

    if let Some(path) = &cli.config {
        tracing::info!("Loaded configuration from: {}", path.display());
    }
    tracing::info!("------- STARTING NEW CRAWL FOR: {} -------", config.crawl.start_url);

    let outcome = match crawl(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).context("Crawl aborted");
        }
    };

    if !outcome.failures.is_empty() {
        tracing::warn!(
            "{} pages could not be expanded and appear as leaves",
            outcome.failures.len()
        );
    }

    let style = SitemapStyle::from(&config.output);
    let report = if cli.stdout {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        render(&outcome.root, &mut handle, &style)
    } else {
        let path = sitemap_path(
            Path::new(&config.output.directory),
            &outcome.reference_hostname,
        );
        let report = write_sitemap(&outcome.root, &path, &style)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;
        println!("Sitemap written to {}", path.display());
        report
    };

    report_render_failures(&report);

    Ok(())
}

/// Console stream log lines are written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogStream {
    Stdout,
    Stderr,
}

impl LogStream {
    /// Keeps stdout free for the sitemap when it is printed there
    fn for_sitemap_on_stdout(sitemap_on_stdout: bool) -> Self {
        if sitemap_on_stdout {
            Self::Stderr
        } else {
            Self::Stdout
        }
    }

    /// Writer for this stream, teed into `file` when one is given
    fn writer(self, file: Option<File>) -> BoxMakeWriter {
        match (self, file) {
            (Self::Stdout, Some(file)) => BoxMakeWriter::new(std::io::stdout.and(Mutex::new(file))),
            (Self::Stderr, Some(file)) => BoxMakeWriter::new(std::io::stderr.and(Mutex::new(file))),
            (Self::Stdout, None) => BoxMakeWriter::new(std::io::stdout),
            (Self::Stderr, None) => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// With a log file, every line goes to both the console stream and the file.
fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_file: Option<&str>,
    stream: LogStream,
) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("subsite_mapper=info,warn"),
            1 => EnvFilter::new("subsite_mapper=debug,info"),
            2 => EnvFilter::new("subsite_mapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file = match log_file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?,
        ),
        None => None,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_ansi(file.is_none())
        .with_writer(stream.writer(file))
        .init();

    Ok(())
}

fn report_render_failures(report: &RenderReport) {
    if !report.is_complete() {
        tracing::warn!(
            "Sitemap is incomplete: {} lines written, {} failed",
            report.lines_written,
            report.failures.len()
        );
    }
}
