//! csfold-core: Core library for merging a C# project into a single-file application
//!
//! This library provides functionality to:
//! - Load a `.csproj` descriptor and enumerate its C# sources
//! - Classify source lines into usings, file-scoped namespaces and body lines
//! - Drop usings that point at the project's own namespaces
//! - Order sources so `Program.cs` comes last
//! - Assemble and write the merged file with `#:` directives

pub mod assemble;
pub mod classify;
pub mod context;
pub mod error;
pub mod generator;
pub mod order;
pub mod project;
pub mod request;
pub mod source;
pub mod writer;

pub use assemble::{assemble, MergeDocument};
pub use classify::{classify_line, LineKind, UsingDirective};
pub use context::MergeContext;
pub use error::{Error, ErrorKind, Result};
pub use generator::{generate, merge_files, merge_sources, MergeReport, MergeResult};
pub use order::{order_sources, ENTRY_POINT_FILE_NAME};
pub use project::{load_project, Project};
pub use request::{GenerateRequest, PackageReference, ProjectMetadata, DEFAULT_SDK, TOOL_PACKAGE_NAME};
pub use source::{trim_blank_lines, FileOutcome, ParsedFile, SourceFile};
pub use writer::write_document;
