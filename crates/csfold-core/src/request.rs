//! Run configuration: project metadata and the generate request
//!
//! A [`GenerateRequest`] is everything a host needs to hand the engine for one
//! run. It round-trips through JSON so build hosts can pass it across the FFI
//! boundary or keep it on disk.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// SDK assumed when a project does not name a different one
pub const DEFAULT_SDK: &str = "Microsoft.NET.Sdk";

/// Package name of this tool; projects reference it to hook the generator in
pub const TOOL_PACKAGE_NAME: &str = "Kros.SingleCsFileGenerator";

/// A package dependency of the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    /// Package id (e.g., "Newtonsoft.Json")
    pub name: String,
    /// Requested version, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PackageReference {
    /// Create a new package reference. An empty version counts as absent.
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: version
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        }
    }

    /// Whether this reference points at the generator package itself
    pub fn is_tool_package(&self) -> bool {
        self.name.eq_ignore_ascii_case(TOOL_PACKAGE_NAME)
    }
}

/// Metadata of the project being merged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project name used in the generated header
    pub project_name: String,
    /// SDK of the project
    #[serde(default = "default_sdk")]
    pub sdk: String,
    /// Root namespace; blank when the project does not set one
    #[serde(default)]
    pub root_namespace: String,
    /// Package dependencies, in declaration order
    #[serde(default)]
    pub packages: Vec<PackageReference>,
}

impl ProjectMetadata {
    /// Create metadata with the default SDK and no dependencies
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            sdk: default_sdk(),
            root_namespace: String::new(),
            packages: Vec::new(),
        }
    }
}

fn default_sdk() -> String {
    DEFAULT_SDK.to_string()
}

/// Everything needed for one merge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Project metadata
    #[serde(flatten)]
    pub metadata: ProjectMetadata,
    /// Source files, in enumeration order
    pub source_files: Vec<PathBuf>,
    /// Path of the merged output file
    pub output_file: PathBuf,
    /// Requested trimming; the merged file always disables trimming
    #[serde(default)]
    pub enable_trimming: bool,
}

impl GenerateRequest {
    /// Create a request with no source files
    pub fn new(metadata: ProjectMetadata, output_file: impl Into<PathBuf>) -> Self {
        Self {
            metadata,
            source_files: Vec::new(),
            output_file: output_file.into(),
            enable_trimming: false,
        }
    }

    /// Parse a request from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Json)
    }

    /// Load a request file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Save the request file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
