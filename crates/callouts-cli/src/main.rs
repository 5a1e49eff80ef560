//! callouts: CLI tool to rewrite callouts in mdast documents

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use callouts_core::transform;
use callouts_mdast::Root;
use callouts_site::{ContentDir, TransformOptions, generate_callout_report, transform_content};

mod config;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "callouts")]
#[command(about = "Rewrite GitHub-style callouts in mdast documents")]
#[command(version)]
#[command(after_help = "Examples:
  callouts page.json                    # Transform one document to stdout
  callouts page.json -o out.json        # Transform to a specific output file
  callouts content/ -o build/           # Transform a content directory
  callouts content/ -o build/ -j4       # Use 4 parallel jobs
  callouts content/ -o build/ --report usage.json")]
struct Cli {
    /// Input mdast JSON document or content directory
    input: PathBuf,

    /// Output file or directory (single documents go to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Write a callout usage report to this path (directory mode)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_near(&cli.input)?;
    let pretty = cli.pretty || config.output.pretty.unwrap_or(false);

    if cli.input.is_file() {
        transform_file(
            &cli.input,
            cli.output.as_deref(),
            pretty,
            cli.verbose,
            cli.quiet,
        )?;
    } else if cli.input.is_dir() {
        let jobs = cli.jobs.or(config.jobs.parallel);
        let report = cli.report.or(config.report.path);
        transform_directory(
            &cli.input,
            cli.output.as_deref(),
            cli.recursive,
            pretty,
            jobs,
            report.as_deref(),
            cli.verbose,
            cli.quiet,
        )?;
    } else {
        anyhow::bail!("Input path does not exist: {}", cli.input.display());
    }

    Ok(())
}

/// Transform a single document
fn transform_file(
    input: &Path,
    output: Option<&Path>,
    pretty: bool,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if verbose {
        eprintln!("Transforming: {}", input.display());
    }

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;
    let root: Root = serde_json::from_str(&text)
        .with_context(|| format!("Invalid document tree: {}", input.display()))?;

    let root = transform(root);
    let json = encode(&root, pretty)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(path, json)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            if !quiet {
                println!("{}", path.display());
            }
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Transform a content directory
fn transform_directory(
    input: &Path,
    output: Option<&Path>,
    recursive: bool,
    pretty: bool,
    jobs: Option<usize>,
    report: Option<&Path>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let Some(output_dir) = output else {
        anyhow::bail!("Directory mode requires an output directory (-o)");
    };

    let content = ContentDir::from_directory(input, recursive)?;

    if content.files.is_empty() {
        if !quiet {
            eprintln!("No .json documents found in {}", input.display());
        }
        return Ok(());
    }

    if verbose {
        eprintln!("Found {} documents", content.files.len());
    }

    let options = TransformOptions {
        output_dir: output_dir.to_path_buf(),
        pretty,
        parallel_jobs: jobs,
    };
    let result = transform_content(&content, &options)?;

    if !quiet {
        for path in &result.output_files {
            println!("{}", path.display());
        }
    }
    for (file, e) in &result.failed_files {
        eprintln!("Error transforming {}: {}", file.display(), e);
    }

    if let Some(report_path) = report {
        // The report scans the source documents, where the lead markers are
        // still present.
        let usage = generate_callout_report(&content)?;
        fs::write(report_path, usage.to_json()?)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        if !quiet {
            eprintln!("Report written to {}", report_path.display());
        }
    }

    if !quiet {
        eprintln!(
            "Transformed {} documents ({} callouts rewritten), {} failed",
            result.success_count, result.rewritten_count, result.failed_files.len()
        );
    }

    if !result.failed_files.is_empty() {
        anyhow::bail!("{} documents failed to transform", result.failed_files.len());
    }

    Ok(())
}

/// Encode a tree back to mdast JSON
fn encode(root: &Root, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(root)
    } else {
        serde_json::to_string(root)
    };
    json.context("Failed to encode document tree")
}
