//! Site discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A luna site: a directory holding `.luna/` and a `content/` tree
#[derive(Debug)]
pub struct Project {
    /// Root directory of the site (parent of .luna/)
    root: PathBuf,
}

impl Project {
    /// Find the site root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the site root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(".luna").is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Use `--site` if given, otherwise discover from the working directory
    pub fn open(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        match explicit {
            Some(path) => Self::discover_from(path),
            None => Self::discover(),
        }
    }

    /// Create a new site structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(".luna").exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::init_force(&root)
    }

    /// Initialize even if .luna/ exists; existing content pages are kept
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let project = Self { root };

        std::fs::create_dir_all(project.luna_dir())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::create_dir_all(project.content_dir())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        write_file(&project.config_path(), Self::default_config())?;
        if !project.registry_path().exists() {
            write_file(&project.registry_path(), "{}\n")?;
        }

        let root_page = project.content_dir().join("index.yaml");
        if !root_page.exists() {
            write_file(&root_page, Self::default_root_page())?;
        }

        Ok(project)
    }

    fn default_config() -> &'static str {
        r#"# Luna site configuration

# Base URL used to build node identifiers and download links
# base_url: "http://localhost:8080/Plone"

# Acting user and roles for permission checks (default: anonymous)
# actor: ""
# roles: []

# Default output format (auto, json, yaml)
# default_format: auto
"#
    }

    fn default_root_page() -> &'static str {
        r#"title: Site
design: true
fields:
  color_schema: {}
  tools_header: []
"#
    }

    /// Site root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The .luna configuration directory
    pub fn luna_dir(&self) -> PathBuf {
        self.root.join(".luna")
    }

    /// Directory holding page files
    pub fn content_dir(&self) -> PathBuf {
        self.root.join("content")
    }

    pub fn config_path(&self) -> PathBuf {
        self.luna_dir().join("config.yaml")
    }

    pub fn registry_path(&self) -> PathBuf {
        self.luna_dir().join("registry.yaml")
    }

    /// Iterate all page files under content/, in a stable order
    pub fn iter_page_files(&self) -> impl Iterator<Item = PathBuf> {
        walkdir::WalkDir::new(self.content_dir())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .map_or(false, |ext| ext == "yaml" || ext == "yml")
            })
            .map(|e| e.path().to_path_buf())
    }

    /// Site path of a page file: `a/index.yaml` is `/a`, `a/b.yaml` is `/a/b`
    pub fn page_path(&self, file: &Path) -> Option<String> {
        let rel = file.strip_prefix(self.content_dir()).ok()?;
        let stem = rel.file_stem()?.to_str()?;

        let mut segments: Vec<String> = rel
            .parent()
            .map(|p| {
                p.components()
                    .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        if stem != "index" {
            segments.push(stem.to_string());
        }

        Some(format!("/{}", segments.join("/")))
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), ProjectError> {
    std::fs::write(path, contents).map_err(|e| ProjectError::IoError(e.to_string()))
}

/// Errors that can occur during site operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a luna site (searched from {searched_from:?}). Run 'luna init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("luna site already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.luna_dir().is_dir());
        assert!(project.config_path().exists());
        assert!(project.registry_path().exists());
        assert!(project.content_dir().join("index.yaml").exists());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_init_force_keeps_existing_pages() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let root_page = project.content_dir().join("index.yaml");
        std::fs::write(&root_page, "title: Custom\n").unwrap();

        Project::init_force(tmp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&root_page).unwrap(), "title: Custom\n");
    }

    #[test]
    fn test_project_discover_finds_luna_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("content/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_luna_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_page_path_mapping() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let content = project.content_dir();

        assert_eq!(project.page_path(&content.join("index.yaml")).as_deref(), Some("/"));
        assert_eq!(
            project.page_path(&content.join("products/index.yaml")).as_deref(),
            Some("/products")
        );
        assert_eq!(
            project.page_path(&content.join("products/widget.yaml")).as_deref(),
            Some("/products/widget")
        );
        assert_eq!(project.page_path(Path::new("/elsewhere/x.yaml")), None);
    }
}
