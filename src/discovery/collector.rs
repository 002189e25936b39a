use std::collections::HashSet;

use super::normalize::normalize;
use super::registry::{LazyView, ModuleRegistry};

/// RoutePath
///
/// Anything that carries a section-relative route path. Lets ordering and
/// matching work on `RouteEntry` lists as well as plain path strings.
pub trait RoutePath {
    fn route_path(&self) -> &str;
}

impl RoutePath for str {
    fn route_path(&self) -> &str {
        self
    }
}

impl RoutePath for &str {
    fn route_path(&self) -> &str {
        self
    }
}

impl RoutePath for String {
    fn route_path(&self) -> &str {
        self
    }
}

/// RouteEntry
///
/// A section-relative path pattern bound to the lazily resolved view of the page
/// module that serves it.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// `""` for the section index, otherwise e.g. `team` or `user/:id/edit`.
    pub path: String,
    pub view: LazyView,
}

impl RouteEntry {
    pub fn module_id(&self) -> &str {
        self.view.module_id()
    }
}

impl RoutePath for RouteEntry {
    fn route_path(&self) -> &str {
        &self.path
    }
}

/// collect_routes
///
/// Builds the unsorted route list of `section` from the registry. Modules outside
/// the section, modules under a `_`-prefixed segment and modules whose path
/// collides with an earlier one are left out. An unknown section yields an empty
/// list.
pub fn collect_routes(registry: &ModuleRegistry, section: &str) -> Vec<RouteEntry> {
    let marker = format!("/pages/{}/", section.to_lowercase());
    let mut seen = HashSet::new();
    let mut routes = Vec::new();

    for view in registry.modules() {
        let module_id = view.module_id();

        if !module_id.to_lowercase().contains(&marker) || module_id.contains("/_") {
            continue;
        }

        let Some(path) = normalize(module_id, section) else {
            tracing::debug!(module_id, section, "module outside section marker; skipped");
            continue;
        };

        if !seen.insert(path.clone()) {
            tracing::warn!(module_id, section, path = %path, "duplicate route path; skipped");
            continue;
        }

        routes.push(RouteEntry {
            path,
            view: view.clone(),
        });
    }

    tracing::debug!(section, routes = routes.len(), "routes collected");
    routes
}
