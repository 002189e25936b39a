use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::OnceCell;
use walkdir::WalkDir;

use super::normalize::is_page_file;
use crate::error::PortalResult;
use crate::loader::{LoaderState, PageView};

/// LazyView
///
/// A page module's view, resolved on first use. Clones share the same cell, so
/// every route pointing at a module sees one load: concurrent callers of
/// `resolve` attach to the in-flight load instead of starting another. A failed
/// load leaves the cell empty and the next caller retries.
#[derive(Clone)]
pub struct LazyView {
    module_id: Arc<str>,
    cell: Arc<OnceCell<Arc<PageView>>>,
    loader: LoaderState,
}

impl LazyView {
    fn new(module_id: &str, loader: LoaderState) -> Self {
        Self {
            module_id: Arc::from(module_id),
            cell: Arc::new(OnceCell::new()),
            loader,
        }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn resolve(&self) -> PortalResult<Arc<PageView>> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!(module_id = %self.module_id, "resolving page view");
                self.loader.load(&self.module_id).await.map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("module_id", &self.module_id)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// canonical_module_id
///
/// Forward slashes only, with a leading `/` so section markers such as
/// `/pages/brand/` also match identifiers given relative to the pages root.
pub fn canonical_module_id(raw: &str) -> String {
    let id = raw.replace('\\', "/");
    if id.starts_with('/') {
        id
    } else {
        format!("/{id}")
    }
}

/// ModuleRegistry
///
/// The set of page modules known to the process, each with its deferred view.
/// Built once at startup and handed to the route collector by reference.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<LazyView>,
    index: HashMap<String, usize>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under its canonical identifier. Registering the same
    /// identifier twice keeps the first loader.
    pub fn register(&mut self, module_id: &str, loader: LoaderState) -> &LazyView {
        let id = canonical_module_id(module_id);
        let position = match self.index.get(&id).copied() {
            Some(position) => {
                tracing::warn!(module_id = %id, "page module registered twice; keeping the first");
                position
            }
            None => {
                self.modules.push(LazyView::new(&id, loader));
                self.index.insert(id, self.modules.len() - 1);
                self.modules.len() - 1
            }
        };
        &self.modules[position]
    }

    /// scan
    ///
    /// Registers every page file under `<root>/pages`, in file-name order. The
    /// identifier is the file's path relative to `root`, e.g.
    /// `/pages/brand/team/index.tsx`. A missing `pages` directory yields an empty
    /// registry.
    pub fn scan(root: &Path, loader: LoaderState) -> PortalResult<Self> {
        let mut registry = Self::new();
        let pages_dir = root.join("pages");

        if !pages_dir.is_dir() {
            tracing::warn!(dir = %pages_dir.display(), "pages directory not found; no routes discovered");
            return Ok(registry);
        }

        for entry in WalkDir::new(&pages_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let relative = relative.to_string_lossy();
            if !is_page_file(&relative) {
                continue;
            }

            registry.register(&relative, Arc::clone(&loader));
        }

        tracing::info!(
            root = %root.display(),
            modules = registry.len(),
            "page modules registered"
        );
        Ok(registry)
    }

    pub fn get(&self, module_id: &str) -> Option<&LazyView> {
        self.index
            .get(&canonical_module_id(module_id))
            .map(|&position| &self.modules[position])
    }

    /// Modules in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &LazyView> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<(String, LoaderState)> for ModuleRegistry {
    fn from_iter<T: IntoIterator<Item = (String, LoaderState)>>(iter: T) -> Self {
        let mut registry = Self::new();
        for (module_id, loader) in iter {
            registry.register(&module_id, loader);
        }
        registry
    }
}
