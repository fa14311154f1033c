//! Content repository - the page tree, ancestor chains and view permission
//!
//! The resolver never walks parent links itself. It asks a
//! [`ContentRepository`] for a materialized ancestor chain and for
//! permission checks, then only reads the nodes it was handed.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::node::ContentNode;
use crate::core::node::DesignNode;
use crate::core::Project;
use crate::entities::Page;

/// Role that can view every node
pub const MANAGER_ROLE: &str = "Manager";

/// The user a request is made on behalf of
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    /// User name, `None` for anonymous
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl Actor {
    pub fn new(name: Option<String>, roles: Vec<String>) -> Self {
        Self { name, roles }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Name recorded on things this actor creates
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}

/// Errors from the content repository
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("no page at '{0}'")]
    NotFound(String),

    #[error("not allowed to view '{0}'")]
    Forbidden(String),

    #[error("cannot load content: {0}")]
    Load(String),
}

/// Source of nodes, ancestor chains and permission decisions
pub trait ContentRepository {
    type Node: DesignNode;

    /// Find the node at a site path
    fn lookup(&self, path: &str) -> Result<&Self::Node, ContentError>;

    /// The node itself followed by its ancestors, root last
    fn ancestor_chain(&self, node: &Self::Node) -> Result<Vec<&Self::Node>, ContentError>;

    /// Whether `actor` may view `node`
    fn can_view(&self, actor: &Actor, node: &Self::Node) -> Result<bool, ContentError>;
}

/// Normalize a site path: leading slash, no trailing or empty segments
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

/// Paths from `path` up to the root, nearest first
pub fn ancestor_paths(path: &str) -> Vec<String> {
    let normalized = normalize_path(path);
    let mut paths = vec![normalized.clone()];
    let mut current = normalized.as_str();
    while current != "/" {
        current = match current.rfind('/') {
            Some(0) | None => "/",
            Some(idx) => &current[..idx],
        };
        paths.push(current.to_string());
    }
    paths
}

/// In-memory page tree keyed by site path
#[derive(Debug, Clone)]
pub struct ContentTree {
    base_url: String,
    nodes: BTreeMap<String, ContentNode>,
}

impl ContentTree {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            nodes: BTreeMap::new(),
        }
    }

    /// Load every page file under the site's content directory.
    ///
    /// Pages that fail to parse are skipped with a warning; `luna validate`
    /// reports them in detail.
    pub fn load(project: &Project, base_url: &str) -> Result<Self, ContentError> {
        let content_dir = project.content_dir();
        if !content_dir.is_dir() {
            return Err(ContentError::Load(format!(
                "{} is not a directory",
                content_dir.display()
            )));
        }

        let mut tree = Self::new(base_url);
        for file in project.iter_page_files() {
            let Some(path) = project.page_path(&file) else {
                continue;
            };
            if tree.nodes.contains_key(&path) {
                tracing::warn!("{} duplicates page {}, skipping", file.display(), path);
                continue;
            }
            match crate::yaml::parse_yaml_file::<Page>(&file) {
                Ok(page) => {
                    tree.insert(&path, page);
                }
                Err(e) => tracing::warn!("skipping {}: {}", file.display(), e),
            }
        }

        tracing::debug!("loaded {} pages", tree.nodes.len());
        Ok(tree)
    }

    /// Add or replace the page at `path`
    pub fn insert(&mut self, path: &str, page: Page) -> &ContentNode {
        let path = normalize_path(path);
        let url = self.url_for(&path);
        self.nodes
            .entry(path.clone())
            .and_modify(|node| node.page = page.clone())
            .or_insert_with(|| ContentNode::new(path, url, page))
    }

    /// Absolute URL for a site path
    pub fn url_for(&self, path: &str) -> String {
        if path == "/" {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    pub fn get(&self, path: &str) -> Option<&ContentNode> {
        self.nodes.get(&normalize_path(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ContentRepository for ContentTree {
    type Node = ContentNode;

    fn lookup(&self, path: &str) -> Result<&ContentNode, ContentError> {
        self.get(path)
            .ok_or_else(|| ContentError::NotFound(normalize_path(path)))
    }

    fn ancestor_chain(&self, node: &ContentNode) -> Result<Vec<&ContentNode>, ContentError> {
        Ok(ancestor_paths(&node.path)
            .iter()
            .filter_map(|p| self.nodes.get(p))
            .collect())
    }

    fn can_view(&self, actor: &Actor, node: &ContentNode) -> Result<bool, ContentError> {
        let roles = &node.page.view_roles;
        Ok(roles.is_empty()
            || actor.has_role(MANAGER_ROLE)
            || roles.iter().any(|r| actor.has_role(r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("a/b/"), "/a/b");
        assert_eq!(normalize_path("//a//b"), "/a/b");
    }

    #[test]
    fn test_ancestor_paths() {
        assert_eq!(ancestor_paths("/"), vec!["/"]);
        assert_eq!(ancestor_paths("/a/b/c"), vec!["/a/b/c", "/a/b", "/a", "/"]);
    }

    #[test]
    fn test_chain_skips_missing_intermediate_pages() {
        let mut tree = ContentTree::new("http://site");
        tree.insert("/", Page::new("Home"));
        tree.insert("/a/b", Page::new("B"));

        let node = tree.lookup("/a/b").unwrap();
        let chain: Vec<&str> = tree
            .ancestor_chain(node)
            .unwrap()
            .iter()
            .map(|n| n.path.as_str())
            .collect();
        assert_eq!(chain, vec!["/a/b", "/"]);
    }

    #[test]
    fn test_urls() {
        let mut tree = ContentTree::new("http://site/");
        assert_eq!(tree.insert("/", Page::new("Home")).url, "http://site");
        assert_eq!(tree.insert("news", Page::new("News")).url, "http://site/news");
    }

    #[test]
    fn test_lookup_missing() {
        let tree = ContentTree::new("http://site");
        assert_eq!(
            tree.lookup("/nope").unwrap_err(),
            ContentError::NotFound("/nope".into())
        );
    }

    #[test]
    fn test_view_permissions() {
        let mut tree = ContentTree::new("http://site");
        tree.insert("/", Page::new("Home"));
        tree.insert("/private", Page::new("Private").with_view_roles(["Editor"]));

        let public = tree.lookup("/").unwrap();
        let private = tree.lookup("/private").unwrap();

        let anon = Actor::anonymous();
        let editor = Actor::new(Some("ed".into()), vec!["Editor".into()]);
        let manager = Actor::new(Some("root".into()), vec![MANAGER_ROLE.into()]);

        assert!(tree.can_view(&anon, public).unwrap());
        assert!(!tree.can_view(&anon, private).unwrap());
        assert!(tree.can_view(&editor, private).unwrap());
        assert!(tree.can_view(&manager, private).unwrap());
    }

    #[test]
    fn test_load_from_site() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let content = project.content_dir();
        std::fs::create_dir_all(content.join("products")).unwrap();
        std::fs::write(content.join("products/index.yaml"), "title: Products\n").unwrap();
        std::fs::write(content.join("products/widget.yaml"), "title: Widget\n").unwrap();
        std::fs::write(content.join("broken.yaml"), "title: [oops\n").unwrap();

        let tree = ContentTree::load(&project, "http://site").unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get("/products/widget").unwrap().page.title, "Widget");
        assert!(tree.get("/broken").is_none());
    }
}
