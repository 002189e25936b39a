//! Route discovery.
//!
//! Page modules live under `pages/<section>/`. The registry knows every module
//! and its deferred view; the collector picks a section's modules and turns
//! their file paths into route patterns; ordering puts static routes ahead of
//! parameterized ones; the matcher walks the ordered list on navigation.

pub mod collector;
pub mod matcher;
pub mod normalize;
pub mod ordering;
pub mod registry;

pub use collector::{RouteEntry, RoutePath, collect_routes};
pub use matcher::{RouteMatch, match_route};
pub use normalize::normalize;
pub use ordering::{compare_paths, order_routes};
pub use registry::{LazyView, ModuleRegistry};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::PortalResult;
use crate::models::AdminType;
use crate::policy::{ACCESS_POLICY_FILE, AccessPolicy};

/// SectionRoutes
///
/// One section's ordered routes, the admin type it admits and its access policy.
#[derive(Debug, Clone)]
pub struct SectionRoutes {
    pub section: String,
    pub admin_type: AdminType,
    pub routes: Vec<RouteEntry>,
    pub policy: AccessPolicy,
}

/// SectionTable
///
/// Route tables for every section, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct SectionTable {
    sections: HashMap<String, SectionRoutes>,
}

pub type SectionState = Arc<SectionTable>;

impl SectionTable {
    /// Collects and orders the routes of each admin type's section. No access
    /// policies are attached.
    pub fn from_registry(registry: &ModuleRegistry) -> Self {
        let sections = AdminType::SECTIONS
            .iter()
            .map(|admin_type| {
                let section = admin_type.as_str();
                let routes = order_routes(collect_routes(registry, section));
                tracing::info!(section, routes = routes.len(), "section routes built");
                (
                    section.to_string(),
                    SectionRoutes {
                        section: section.to_string(),
                        admin_type: *admin_type,
                        routes,
                        policy: AccessPolicy::default(),
                    },
                )
            })
            .collect();

        Self { sections }
    }

    /// Like `from_registry`, also loading `pages/<section>/_access.json` under
    /// `pages_root` for each section.
    pub fn build(registry: &ModuleRegistry, pages_root: &Path) -> PortalResult<Self> {
        let mut table = Self::from_registry(registry);
        for routes in table.sections.values_mut() {
            let file = pages_root
                .join("pages")
                .join(&routes.section)
                .join(ACCESS_POLICY_FILE);
            routes.policy = AccessPolicy::load(&file)?;
        }
        Ok(table)
    }

    pub fn with_policy(mut self, section: &str, policy: AccessPolicy) -> Self {
        if let Some(routes) = self.sections.get_mut(section) {
            routes.policy = policy;
        }
        self
    }

    pub fn get(&self, section: &str) -> Option<&SectionRoutes> {
        self.sections.get(section)
    }
}
