//! Merge pipeline: order, load, filter, assemble and write

use crate::assemble::{assemble, MergeDocument};
use crate::context::MergeContext;
use crate::error::Result;
use crate::order::order_sources;
use crate::request::{GenerateRequest, ProjectMetadata};
use crate::source::{load_source, parse_source, FileOutcome, ParsedFile, SourceFile};
use crate::writer::write_document;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of merging a project's sources in memory
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// The assembled document
    pub document: MergeDocument,
    /// Files that contributed a body block, in output order
    pub merged_files: Vec<PathBuf>,
    /// Listed files that did not exist
    pub skipped_files: Vec<PathBuf>,
}

/// Summary of a completed generate run
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Where the merged file was written
    pub output_file: PathBuf,
    /// Files that contributed a body block, in output order
    pub merged_files: Vec<PathBuf>,
    /// Listed files that did not exist
    pub skipped_files: Vec<PathBuf>,
    /// Number of lines written
    pub line_count: usize,
}

impl MergeReport {
    /// Human-readable warnings for every skipped file
    pub fn warnings(&self) -> Vec<String> {
        self.skipped_files
            .iter()
            .map(|path| format!("Source file not found: {}", path.display()))
            .collect()
    }
}

/// Merge in-memory sources. The entry-point file is moved last; no I/O happens.
pub fn merge_files(metadata: &ProjectMetadata, sources: Vec<SourceFile>) -> MergeDocument {
    let mut context = MergeContext::with_root_namespace(&metadata.root_namespace);
    let parsed: Vec<ParsedFile> = order_sources(sources)
        .iter()
        .map(|source| parse_source(source, &mut context))
        .collect();
    assemble(metadata, &context, &parsed)
}

/// Load the listed files and merge them. Missing files are skipped; any other
/// read failure aborts the merge.
pub fn merge_sources<P: AsRef<Path>>(
    metadata: &ProjectMetadata,
    source_files: &[P],
) -> Result<MergeResult> {
    let ordered = order_sources(source_files.iter().map(|p| p.as_ref()).collect());
    let mut context = MergeContext::with_root_namespace(&metadata.root_namespace);
    let mut parsed = Vec::with_capacity(ordered.len());
    let mut skipped_files = Vec::new();

    for path in ordered {
        match load_source(path, &mut context)? {
            FileOutcome::Loaded(file) => parsed.push(file),
            FileOutcome::SkippedMissing(path) => skipped_files.push(path),
        }
    }

    debug!(
        files = parsed.len(),
        skipped = skipped_files.len(),
        namespaces = context.namespaces().len(),
        "loaded project sources"
    );

    let document = assemble(metadata, &context, &parsed);
    Ok(MergeResult {
        document,
        merged_files: parsed.into_iter().map(|f| f.path).collect(),
        skipped_files,
    })
}

/// Run a full generate: merge the request's sources and write the output file.
///
/// The document is assembled completely in memory before the single write.
pub fn generate(request: &GenerateRequest) -> Result<MergeReport> {
    if request.enable_trimming {
        debug!("trimming requested, merged file keeps PublishTrimmed=false");
    }

    let result = merge_sources(&request.metadata, &request.source_files)?;
    write_document(&request.output_file, &result.document)?;

    info!(
        path = %request.output_file.display(),
        files = result.merged_files.len(),
        "created merged C# file"
    );

    Ok(MergeReport {
        output_file: request.output_file.clone(),
        merged_files: result.merged_files,
        skipped_files: result.skipped_files,
        line_count: result.document.lines().len(),
    })
}
