//! Benchmark for callout transformation performance
//!
//! Usage:
//!   cargo run --release --example benchmark -- [options]
//!
//! Example:
//!   # 500 synthetic documents, 3 iterations per configuration
//!   cargo run --release --example benchmark -- --documents 500

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use callouts_core::rewrite_callouts;
use callouts_mdast::{Node, Root};
use callouts_site::{ContentDir, TransformOptions, transform_content};

#[derive(Parser, Debug)]
#[command(name = "benchmark")]
#[command(about = "Benchmark callout transformation performance")]
struct Args {
    /// Number of synthetic documents to generate
    #[arg(long, default_value = "200")]
    documents: usize,

    /// Number of blockquotes per document
    #[arg(long, default_value = "50")]
    quotes: usize,

    /// Number of benchmark iterations
    #[arg(long, default_value = "3")]
    iterations: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Generate a synthetic content directory
    let content_dir = std::env::temp_dir().join("callouts_benchmark_content");
    let output_dir = std::env::temp_dir().join("callouts_benchmark_output");

    println!(
        "Generating {} documents with {} blockquotes each...",
        args.documents, args.quotes
    );
    generate_content(&content_dir, args.documents, args.quotes)?;

    let content =
        ContentDir::from_directory(&content_dir, false).context("Failed to load documents")?;
    println!("Found {} documents", content.files.len());
    println!();

    // In-memory transform throughput, without the JSON decode/encode cost
    println!("=== In-memory rewrite ===");
    println!();
    let doc = synthetic_document(args.quotes);
    let start = Instant::now();
    let mut rewritten = 0;
    for _ in 0..args.documents {
        let mut tree = doc.clone();
        rewritten += rewrite_callouts(&mut tree);
    }
    let elapsed = start.elapsed();
    println!(
        "{} trees, {} callouts rewritten in {:.2?}",
        args.documents, rewritten, elapsed
    );
    println!();

    // Batch transform including file I/O
    println!("=== Batch transform (JSON in, JSON out) ===");
    println!();
    println!("{:<45} {:>8}", "Configuration", "Time");
    println!("{:<45} {:>8}", "-------------", "----");

    for jobs in [1, 2, 4] {
        let times = run_benchmark(&content, &output_dir, jobs, args.iterations)?;
        let avg = average_duration(&times);
        println!(
            "{:<45} {:>7.2}s",
            format!("Jobs: {}", jobs),
            avg.as_secs_f64()
        );
    }
    println!();

    // Cleanup
    let _ = std::fs::remove_dir_all(&content_dir);
    let _ = std::fs::remove_dir_all(&output_dir);

    println!("Done.");
    Ok(())
}

/// Write `documents` synthetic mdast JSON files into `dir`
fn generate_content(dir: &Path, documents: usize, quotes: usize) -> Result<()> {
    let _ = std::fs::remove_dir_all(dir);
    std::fs::create_dir_all(dir)?;

    let doc = synthetic_document(quotes);
    let json = serde_json::to_string(&doc)?;
    for i in 0..documents {
        std::fs::write(dir.join(format!("doc_{i:04}.json")), &json)?;
    }

    Ok(())
}

/// A document alternating marked callouts, plain quotes, and paragraphs
fn synthetic_document(quotes: usize) -> Root {
    let mut children = Vec::with_capacity(quotes * 2);

    for i in 0..quotes {
        let quote = if i % 2 == 0 {
            let kind = ["!note", "!tip", "!important", "!warning", "!caution"][i % 5];
            Node::blockquote(vec![Node::paragraph(vec![
                Node::link_reference(kind),
                Node::text("\nSome body text for the callout."),
            ])])
        } else {
            Node::blockquote(vec![Node::paragraph(vec![Node::text(
                "An ordinary quotation with no marker.",
            )])])
        };
        children.push(quote);
        children.push(Node::paragraph(vec![Node::text(
            "Prose between the quotes.",
        )]));
    }

    // Exercise the traversal's non-quote branches too.
    children.push(Node::list(
        false,
        vec![Node::list_item(vec![transformable_nested_quote()])],
    ));

    Root::new(children)
}

fn transformable_nested_quote() -> Node {
    Node::blockquote(vec![Node::paragraph(vec![
        Node::link_reference("!tip"),
        Node::text("\nNested in a list item."),
    ])])
}

fn run_benchmark(
    content: &ContentDir,
    output_dir: &Path,
    jobs: usize,
    iterations: usize,
) -> Result<Vec<Duration>> {
    let mut times = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        let start = Instant::now();
        run_single_benchmark(content, output_dir, jobs)?;
        times.push(start.elapsed());
    }

    Ok(times)
}

fn run_single_benchmark(content: &ContentDir, output_dir: &Path, jobs: usize) -> Result<()> {
    let _ = std::fs::remove_dir_all(output_dir);
    std::fs::create_dir_all(output_dir)?;

    let options = TransformOptions {
        output_dir: output_dir.to_path_buf(),
        pretty: false,
        parallel_jobs: Some(jobs),
    };

    transform_content(content, &options)?;
    Ok(())
}

fn average_duration(durations: &[Duration]) -> Duration {
    if durations.is_empty() {
        return Duration::ZERO;
    }
    let total: Duration = durations.iter().sum();
    total / durations.len() as u32
}
