//! callouts-site: site-level callout transformation
//!
//! This crate applies the callout rewrite to an entire content directory of
//! parsed documents (mdast JSON files), including:
//! - Document discovery
//! - Batch transformation with parallel processing
//! - A site-wide callout usage report
//!
//! This crate is designed to be used by various interfaces (CLI, build
//! servers, etc.)

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use callouts_core::{rewrite_callouts, scan_callouts};
use callouts_mdast::Root;

/// Errors that can occur during site operations
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document tree in {file}: {message}")]
    Decode { file: PathBuf, message: String },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;

/// A content directory of parsed documents awaiting transformation
#[derive(Debug, Clone)]
pub struct ContentDir {
    /// Root directory containing mdast JSON documents
    pub root: PathBuf,
    /// Documents found in the directory, sorted by path
    pub files: Vec<PathBuf>,
}

impl ContentDir {
    /// Load a content directory of mdast JSON documents
    ///
    /// This scans the directory for `.json` files; it does not decode them
    /// yet, so documents that later fail to decode surface as per-file
    /// failures rather than load errors.
    pub fn from_directory(path: &Path, recursive: bool) -> Result<Self> {
        if !path.is_dir() {
            return Err(SiteError::DirectoryNotFound(path.to_path_buf()));
        }

        let mut files = collect_documents(path, recursive)?;
        files.sort();

        Ok(Self {
            root: path.to_path_buf(),
            files,
        })
    }
}

/// Options for a batch transformation
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Output directory for transformed documents
    pub output_dir: PathBuf,
    /// Pretty-print the output JSON
    pub pretty: bool,
    /// Number of parallel jobs (None = use all CPUs)
    pub parallel_jobs: Option<usize>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            pretty: false,
            parallel_jobs: None,
        }
    }
}

/// Result of a batch transformation
#[derive(Debug)]
pub struct TransformResult {
    /// Number of successfully transformed documents
    pub success_count: usize,
    /// Total number of blockquotes rewritten across the site
    pub rewritten_count: usize,
    /// Documents that failed, with their errors
    pub failed_files: Vec<(PathBuf, String)>,
    /// Output files that were written
    pub output_files: Vec<PathBuf>,
}

/// Outcome of transforming a single document
enum TransformOutcome {
    /// Successfully transformed, with output path and rewrite count
    Success { output: PathBuf, rewritten: usize },
    /// Failed to transform, with input path and error message
    Failed(PathBuf, String),
}

/// Transform an entire content directory
///
/// Every document is rewritten independently and in parallel; a document
/// that fails to read or decode is reported in the result without aborting
/// the rest of the batch.
pub fn transform_content(
    content: &ContentDir,
    options: &TransformOptions,
) -> Result<TransformResult> {
    // Configure thread pool if specified
    if let Some(n) = options.parallel_jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok();
    }

    fs::create_dir_all(&options.output_dir)?;

    let outcomes: Vec<_> = content
        .files
        .par_iter()
        .map(|file| transform_single(file, content, options))
        .collect();

    let mut result = TransformResult {
        success_count: 0,
        rewritten_count: 0,
        failed_files: Vec::new(),
        output_files: Vec::new(),
    };

    for outcome in outcomes {
        match outcome {
            TransformOutcome::Success { output, rewritten } => {
                result.success_count += 1;
                result.rewritten_count += rewritten;
                result.output_files.push(output);
            }
            TransformOutcome::Failed(path, message) => {
                result.failed_files.push((path, message));
            }
        }
    }

    Ok(result)
}

/// Transform a single document
fn transform_single(
    input: &Path,
    content: &ContentDir,
    options: &TransformOptions,
) -> TransformOutcome {
    let run = || -> std::result::Result<(PathBuf, usize), String> {
        let text = fs::read_to_string(input).map_err(|e| e.to_string())?;
        let mut root: Root =
            serde_json::from_str(&text).map_err(|e| format!("decode error: {e}"))?;

        let rewritten = rewrite_callouts(&mut root);

        let json = if options.pretty {
            serde_json::to_string_pretty(&root)
        } else {
            serde_json::to_string(&root)
        }
        .map_err(|e| e.to_string())?;

        let relative = input.strip_prefix(&content.root).unwrap_or(input);
        let output = options.output_dir.join(relative);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(&output, json).map_err(|e| e.to_string())?;

        Ok((output, rewritten))
    };

    match run() {
        Ok((output, rewritten)) => TransformOutcome::Success { output, rewritten },
        Err(message) => TransformOutcome::Failed(input.to_path_buf(), message),
    }
}

/// Callout usage of a single document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentUsage {
    /// Document path, relative to the content root
    pub file: String,
    /// Total callouts in the document
    pub total: usize,
    /// Callout count per kind, keyed by the lowercase keyword
    pub by_kind: BTreeMap<String, usize>,
}

/// Site-wide callout usage report
#[derive(Debug, Clone, Serialize)]
pub struct CalloutReport {
    /// Documents containing at least one callout, sorted by path
    pub documents: Vec<DocumentUsage>,
    /// Total callouts across the site
    pub total: usize,
}

impl CalloutReport {
    /// Serialize the report to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SiteError::Io(std::io::Error::other(e)))
    }
}

/// Generate a callout usage report for a content directory
///
/// Documents without callouts are omitted. A document that fails to decode
/// is skipped with a warning, matching the fail-open posture of the
/// transform itself.
pub fn generate_callout_report(content: &ContentDir) -> Result<CalloutReport> {
    let mut documents = Vec::new();
    let mut total = 0;

    for file in &content.files {
        match scan_document(file) {
            Ok(kinds) => {
                if kinds.is_empty() {
                    continue;
                }

                let mut by_kind = BTreeMap::new();
                for kind in &kinds {
                    *by_kind.entry(kind.to_string()).or_insert(0) += 1;
                }

                let relative = file.strip_prefix(&content.root).unwrap_or(file);
                total += kinds.len();
                documents.push(DocumentUsage {
                    file: relative.display().to_string(),
                    total: kinds.len(),
                    by_kind,
                });
            }
            Err(e) => {
                eprintln!("Warning: failed to scan {}: {}", file.display(), e);
            }
        }
    }

    Ok(CalloutReport { documents, total })
}

/// Decode a document and list the callouts it contains
fn scan_document(file: &Path) -> Result<Vec<callouts_core::CalloutKind>> {
    let text = fs::read_to_string(file)?;
    let root: Root = serde_json::from_str(&text).map_err(|e| SiteError::Decode {
        file: file.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(scan_callouts(&root))
}

/// Collect all .json documents in a directory
fn collect_documents(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension()
                && ext.eq_ignore_ascii_case("json")
            {
                files.push(path);
            }
        } else if path.is_dir() && recursive {
            files.extend(collect_documents(&path, recursive)?);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use callouts_mdast::Node;
    use tempfile::tempdir;

    fn write_doc(dir: &Path, name: &str, root: &Root) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(root).unwrap()).unwrap();
        path
    }

    fn callout_doc() -> Root {
        Root::new(vec![
            Node::blockquote(vec![Node::paragraph(vec![
                Node::link_reference("!warning"),
                Node::text("\nMind the gap."),
            ])]),
            Node::paragraph(vec![Node::text("After the callout.")]),
        ])
    }

    fn plain_doc() -> Root {
        Root::new(vec![Node::blockquote(vec![Node::paragraph(vec![
            Node::text("Just a quotation."),
        ])])])
    }

    #[test]
    fn test_content_dir_from_directory() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "b.json", &plain_doc());
        write_doc(dir.path(), "a.json", &callout_doc());
        fs::write(dir.path().join("notes.txt"), "not a document").unwrap();

        let content = ContentDir::from_directory(dir.path(), false).unwrap();

        assert_eq!(content.files.len(), 2);
        // Sorted by path for deterministic batches
        assert!(content.files[0].ends_with("a.json"));
        assert!(content.files[1].ends_with("b.json"));
    }

    #[test]
    fn test_content_dir_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("guides")).unwrap();
        write_doc(dir.path(), "index.json", &plain_doc());
        write_doc(&dir.path().join("guides"), "setup.json", &callout_doc());

        let flat = ContentDir::from_directory(dir.path(), false).unwrap();
        assert_eq!(flat.files.len(), 1);

        let recursive = ContentDir::from_directory(dir.path(), true).unwrap();
        assert_eq!(recursive.files.len(), 2);
    }

    #[test]
    fn test_content_dir_missing_directory() {
        let err = ContentDir::from_directory(Path::new("/nonexistent/content"), false);
        assert!(matches!(err, Err(SiteError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_transform_content() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_doc(dir.path(), "callout.json", &callout_doc());
        write_doc(dir.path(), "plain.json", &plain_doc());

        let content = ContentDir::from_directory(dir.path(), false).unwrap();
        let options = TransformOptions {
            output_dir: out.path().to_path_buf(),
            parallel_jobs: Some(1),
            ..Default::default()
        };

        let result = transform_content(&content, &options).unwrap();

        assert_eq!(result.success_count, 2);
        assert_eq!(result.rewritten_count, 1);
        assert!(result.failed_files.is_empty());
        assert_eq!(result.output_files.len(), 2);

        let transformed = fs::read_to_string(out.path().join("callout.json")).unwrap();
        assert!(transformed.contains("callout-warning"));
        assert!(transformed.contains("callout-title"));
        assert!(!transformed.contains("linkReference"));

        // The untouched document round-trips structurally unchanged.
        let untouched: Root =
            serde_json::from_str(&fs::read_to_string(out.path().join("plain.json")).unwrap())
                .unwrap();
        assert_eq!(untouched, plain_doc());
    }

    #[test]
    fn test_transform_content_preserves_layout() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir(dir.path().join("guides")).unwrap();
        write_doc(&dir.path().join("guides"), "setup.json", &callout_doc());

        let content = ContentDir::from_directory(dir.path(), true).unwrap();
        let options = TransformOptions {
            output_dir: out.path().to_path_buf(),
            pretty: false,
            parallel_jobs: Some(1),
        };

        let result = transform_content(&content, &options).unwrap();
        assert_eq!(result.success_count, 1);
        assert!(out.path().join("guides/setup.json").is_file());
    }

    #[test]
    fn test_transform_content_collects_per_file_failures() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_doc(dir.path(), "good.json", &callout_doc());
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let content = ContentDir::from_directory(dir.path(), false).unwrap();
        let options = TransformOptions {
            output_dir: out.path().to_path_buf(),
            pretty: false,
            parallel_jobs: Some(1),
        };

        let result = transform_content(&content, &options).unwrap();

        // The bad document fails alone; the rest of the batch still lands.
        assert_eq!(result.success_count, 1);
        assert_eq!(result.failed_files.len(), 1);
        assert!(result.failed_files[0].0.ends_with("bad.json"));
        assert!(out.path().join("good.json").is_file());
        assert!(!out.path().join("bad.json").exists());
    }

    #[test]
    fn test_transform_content_pretty_output() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_doc(dir.path(), "doc.json", &callout_doc());

        let content = ContentDir::from_directory(dir.path(), false).unwrap();
        let options = TransformOptions {
            output_dir: out.path().to_path_buf(),
            pretty: true,
            parallel_jobs: Some(1),
        };

        transform_content(&content, &options).unwrap();

        let text = fs::read_to_string(out.path().join("doc.json")).unwrap();
        assert!(text.contains('\n'));
        let root: Root = serde_json::from_str(&text).unwrap();
        assert!(!root.children.is_empty());
    }

    #[test]
    fn test_generate_callout_report() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "plain.json", &plain_doc());
        write_doc(dir.path(), "warnings.json", &callout_doc());
        write_doc(
            dir.path(),
            "mixed.json",
            &Root::new(vec![
                Node::blockquote(vec![Node::paragraph(vec![Node::link_reference("!tip")])]),
                Node::blockquote(vec![Node::paragraph(vec![Node::link_reference("!tip")])]),
                Node::blockquote(vec![Node::paragraph(vec![Node::link_reference("!note")])]),
            ]),
        );

        let content = ContentDir::from_directory(dir.path(), false).unwrap();
        let report = generate_callout_report(&content).unwrap();

        // plain.json has no callouts and is omitted
        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.total, 4);

        let mixed = &report.documents[0];
        assert_eq!(mixed.file, "mixed.json");
        assert_eq!(mixed.total, 3);
        assert_eq!(mixed.by_kind.get("tip"), Some(&2));
        assert_eq!(mixed.by_kind.get("note"), Some(&1));

        let warnings = &report.documents[1];
        assert_eq!(warnings.file, "warnings.json");
        assert_eq!(warnings.by_kind.get("warning"), Some(&1));
    }

    #[test]
    fn test_report_json_serialization() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "doc.json", &callout_doc());

        let content = ContentDir::from_directory(dir.path(), false).unwrap();
        let report = generate_callout_report(&content).unwrap();
        let json = report.to_json().unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["total"], 1);
        assert_eq!(parsed["documents"][0]["file"], "doc.json");
        assert_eq!(parsed["documents"][0]["by_kind"]["warning"], 1);
    }

    #[test]
    fn test_report_skips_undecodable_documents() {
        let dir = tempdir().unwrap();
        write_doc(dir.path(), "good.json", &callout_doc());
        fs::write(dir.path().join("bad.json"), "[1, 2").unwrap();

        let content = ContentDir::from_directory(dir.path(), false).unwrap();
        let report = generate_callout_report(&content).unwrap();

        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].file, "good.json");
    }
}
