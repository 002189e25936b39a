use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::{PortalError, PortalResult};

/// PageView
///
/// The resolved form of a page module: what a navigation renders once its route matched.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub module_id: String,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

// 1. ViewLoader Contract
/// ViewLoader
///
/// The deferred loader behind every page module. The registry never calls it
/// directly: `LazyView` invokes it at most once per module, on the first
/// navigation that needs the view.
#[async_trait]
pub trait ViewLoader: Send + Sync {
    /// Produces the view for `module_id` (a canonical module identifier such as
    /// `/pages/brand/team/index.tsx`).
    async fn load(&self, module_id: &str) -> PortalResult<PageView>;
}

// 2. The Real Implementation (filesystem)
/// FsViewLoader
///
/// Reads page modules from disk, relative to the configured pages root.
#[derive(Clone, Debug)]
pub struct FsViewLoader {
    root: PathBuf,
}

impl FsViewLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ViewLoader for FsViewLoader {
    async fn load(&self, module_id: &str) -> PortalResult<PageView> {
        let file = self.root.join(sanitize_module_id(module_id));
        tracing::debug!(module_id, file = %file.display(), "loading page module");

        let source = tokio::fs::read_to_string(&file)
            .await
            .map_err(|e| PortalError::Load {
                module_id: module_id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(PageView {
            module_id: module_id.to_string(),
            source,
            loaded_at: Utc::now(),
        })
    }
}

/// sanitize_module_id
///
/// Drops empty, `.` and `..` segments so a module identifier can never escape the
/// pages root when joined onto it.
fn sanitize_module_id(module_id: &str) -> String {
    module_id
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

// 3. The Mock Implementation (For Tests)
/// MockViewLoader
///
/// Counts how many loads actually ran, optionally sleeping first so tests can
/// observe concurrent callers attaching to one in-flight load.
#[derive(Clone, Default)]
pub struct MockViewLoader {
    /// When true, every load fails.
    pub should_fail: bool,
    pub delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockViewLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Number of times `load` has been entered.
    pub fn load_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ViewLoader for MockViewLoader {
    async fn load(&self, module_id: &str) -> PortalResult<PageView> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail {
            return Err(PortalError::Load {
                module_id: module_id.to_string(),
                reason: "Mock loader error: simulation requested".to_string(),
            });
        }

        Ok(PageView {
            module_id: module_id.to_string(),
            source: format!("<mock view {}>", sanitize_module_id(module_id)),
            loaded_at: Utc::now(),
        })
    }
}

/// LoaderState
///
/// Shared handle to the loader used by every module of a registry.
pub type LoaderState = Arc<dyn ViewLoader>;
