//! Project descriptor (`.csproj`) loading and source enumeration

use crate::error::{Error, Result};
use crate::request::{GenerateRequest, PackageReference, ProjectMetadata};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Required extension of a project descriptor
pub const PROJECT_EXTENSION: &str = "csproj";

/// Extension of C# source files
pub const SOURCE_EXTENSION: &str = "cs";

/// Build output directories never enumerated for sources
const EXCLUDED_DIRS: &[&str] = &["bin", "obj"];

/// A loaded project descriptor with its enumerated sources
#[derive(Debug, Clone)]
pub struct Project {
    /// Path of the descriptor
    pub path: PathBuf,
    /// Metadata read from the descriptor
    pub metadata: ProjectMetadata,
    /// C# sources under the project directory, sorted by path
    pub source_files: Vec<PathBuf>,
}

impl Project {
    /// Turn the project into a generate request
    pub fn into_request(self, output_file: impl Into<PathBuf>, enable_trimming: bool) -> GenerateRequest {
        GenerateRequest {
            metadata: self.metadata,
            source_files: self.source_files,
            output_file: output_file.into(),
            enable_trimming,
        }
    }
}

/// Load a project descriptor and enumerate its sources
pub fn load_project<P: AsRef<Path>>(path: P) -> Result<Project> {
    let path = path.as_ref();

    if path.extension().and_then(|e| e.to_str()) != Some(PROJECT_EXTENSION) {
        return Err(Error::InvalidProjectExtension(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(Error::ProjectNotFound(path.to_path_buf()));
    }

    // Sources are reported by absolute path, so resolve the descriptor first
    let canonical = dunce::canonicalize(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let path = canonical.as_path();

    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut metadata = parse_project_xml(&content, path)?;
    metadata.project_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let project_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let source_files = enumerate_sources(project_dir)?;

    Ok(Project {
        path: path.to_path_buf(),
        metadata,
        source_files,
    })
}

/// Read SDK, root namespace and package references from descriptor XML.
/// The returned metadata has an empty project name.
pub fn parse_project_xml(content: &str, path: &Path) -> Result<ProjectMetadata> {
    let invalid = |message: String| Error::InvalidProjectFormat {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut metadata = ProjectMetadata::new("");
    metadata.sdk = String::new();
    let mut root_seen = false;
    let mut root_namespace: Option<String> = None;
    let mut in_root_namespace = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let is_root_namespace = handle_element(e, &mut root_seen, &mut metadata)
                    .map_err(invalid)?;
                if is_root_namespace && root_namespace.is_none() {
                    root_namespace = Some(String::new());
                    in_root_namespace = true;
                }
            }
            Ok(Event::Empty(ref e)) => {
                let is_root_namespace = handle_element(e, &mut root_seen, &mut metadata)
                    .map_err(invalid)?;
                if is_root_namespace && root_namespace.is_none() {
                    root_namespace = Some(String::new());
                }
            }
            Ok(Event::Text(ref t)) if in_root_namespace => {
                let text = t.unescape().map_err(|e| invalid(e.to_string()))?;
                if let Some(ns) = root_namespace.as_mut() {
                    ns.push_str(&text);
                }
            }
            Ok(Event::End(_)) => in_root_namespace = false,
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(invalid(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
    }

    if !root_seen {
        return Err(invalid("no root element".to_string()));
    }

    metadata.root_namespace = root_namespace.unwrap_or_default().trim().to_string();
    Ok(metadata)
}

/// Record what an element contributes. Returns true for `RootNamespace`.
fn handle_element(
    e: &BytesStart<'_>,
    root_seen: &mut bool,
    metadata: &mut ProjectMetadata,
) -> std::result::Result<bool, String> {
    let local_name = e.local_name();
    let tag = std::str::from_utf8(local_name.as_ref())
        .map_err(|err| format!("invalid tag name: {err}"))?;

    if !*root_seen {
        *root_seen = true;
        metadata.sdk = attribute(e, "Sdk")?.unwrap_or_default();
        return Ok(false);
    }

    match tag {
        "RootNamespace" => Ok(true),
        "PackageReference" => {
            let name = attribute(e, "Include")?.unwrap_or_default();
            let version = attribute(e, "Version")?;
            metadata
                .packages
                .push(PackageReference::new(name, version.as_deref()));
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn attribute(e: &BytesStart<'_>, name: &str) -> std::result::Result<Option<String>, String> {
    match e.try_get_attribute(name) {
        Ok(Some(attr)) => attr
            .unescape_value()
            .map(|v| Some(v.into_owned()))
            .map_err(|err| format!("invalid value for attribute '{name}': {err}")),
        Ok(None) => Ok(None),
        Err(err) => Err(format!("invalid attributes: {err}")),
    }
}

/// Enumerate `*.cs` files under `project_dir`, sorted by path. Build output
/// directories below the project directory are never entered.
pub fn enumerate_sources<P: AsRef<Path>>(project_dir: P) -> Result<Vec<PathBuf>> {
    let project_dir = project_dir.as_ref();
    let mut files = Vec::new();

    let walker = WalkDir::new(project_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(files)
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
    <TargetFramework>net10.0</TargetFramework>
    <RootNamespace>Demo.App</RootNamespace>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="FluentValidation" Version="12.0.0" />
    <PackageReference Include="Kros.SingleCsFileGenerator" Version="1.0.0" />
    <PackageReference Include="Local.Tools" />
  </ItemGroup>
</Project>
"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_project_metadata() {
        let metadata = parse_project_xml(DEMO_PROJECT, Path::new("Demo.csproj")).unwrap();

        assert_eq!(metadata.sdk, "Microsoft.NET.Sdk.Web");
        assert_eq!(metadata.root_namespace, "Demo.App");
        assert_eq!(
            metadata.packages,
            vec![
                PackageReference::new("FluentValidation", Some("12.0.0")),
                PackageReference::new("Kros.SingleCsFileGenerator", Some("1.0.0")),
                PackageReference::new("Local.Tools", None),
            ]
        );
    }

    #[test]
    fn test_parse_project_without_optional_parts() {
        let metadata = parse_project_xml("<Project></Project>", Path::new("A.csproj")).unwrap();
        assert!(metadata.sdk.is_empty());
        assert!(metadata.root_namespace.is_empty());
        assert!(metadata.packages.is_empty());
    }

    #[test]
    fn test_parse_project_invalid_xml() {
        for content in ["", "just text", "<Project></Other>"] {
            let err = parse_project_xml(content, Path::new("A.csproj")).unwrap_err();
            assert!(matches!(err, Error::InvalidProjectFormat { .. }), "{content:?}");
        }
    }

    #[test]
    fn test_load_project_rejects_extension() {
        let err = load_project("Demo.sln").unwrap_err();
        assert!(matches!(err, Error::InvalidProjectExtension(_)));
    }

    #[test]
    fn test_load_project_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_project(dir.path().join("Missing.csproj")).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));
    }

    #[test]
    fn test_load_project_enumerates_sources() {
        let dir = tempfile::tempdir().unwrap();
        let root = &dunce::canonicalize(dir.path()).unwrap();
        let project = write(root, "Demo.csproj", DEMO_PROJECT);
        let program = write(root, "Program.cs", "");
        let dto = write(root, "DTOs/ProductDto.cs", "");
        let feature = write(root, "Features/Products/GetAll.cs", "");
        write(root, "bin/Debug/Generated.cs", "");
        write(root, "obj/Debug/AssemblyInfo.cs", "");
        write(root, "README.md", "");
        write(root, "Notes.cs.txt", "");

        let loaded = load_project(&project).unwrap();

        assert_eq!(loaded.metadata.project_name, "Demo");
        assert_eq!(loaded.metadata.root_namespace, "Demo.App");
        assert_eq!(loaded.source_files, vec![dto, feature, program]);
    }

    #[test]
    fn test_into_request_carries_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let project = write(dir.path(), "Demo.csproj", DEMO_PROJECT);
        write(dir.path(), "Program.cs", "");

        let request = load_project(&project)
            .unwrap()
            .into_request(dir.path().join("out.cs"), true);

        assert_eq!(request.metadata.sdk, "Microsoft.NET.Sdk.Web");
        assert_eq!(request.source_files.len(), 1);
        assert!(request.enable_trimming);
    }

    #[test]
    fn test_load_project_reports_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dunce::canonicalize(dir.path()).unwrap();
        write(&root, "Demo.csproj", DEMO_PROJECT);
        let program = write(&root, "Program.cs", "");
        fs::create_dir_all(root.join("sub")).unwrap();

        let loaded = load_project(root.join("sub/../Demo.csproj")).unwrap();

        assert_eq!(loaded.path, root.join("Demo.csproj"));
        assert_eq!(loaded.source_files, vec![program]);
        assert!(loaded.source_files.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_enumerate_keeps_project_dir_named_bin() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("bin");
        let program = write(&project_dir, "Program.cs", "");
        write(&project_dir, "obj/Generated.cs", "");

        assert_eq!(enumerate_sources(&project_dir).unwrap(), vec![program]);
    }

    #[cfg(unix)]
    #[test]
    fn test_enumerate_skips_link_loop_in_build_output() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let program = write(root, "Program.cs", "");
        fs::create_dir_all(root.join("obj/Debug")).unwrap();
        std::os::unix::fs::symlink(root, root.join("obj/Debug/loop")).unwrap();

        assert_eq!(enumerate_sources(root).unwrap(), vec![program]);
    }
}
