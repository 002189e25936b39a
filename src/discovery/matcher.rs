use std::collections::BTreeMap;

use super::collector::RoutePath;

/// RouteMatch
///
/// The first entry whose pattern matched, plus the values captured by its
/// `:param` segments.
#[derive(Debug)]
pub struct RouteMatch<'a, T> {
    pub entry: &'a T,
    pub params: BTreeMap<String, String>,
}

/// match_route
///
/// Tries `entries` in order and returns the first match for `path` (relative to
/// the section root, leading and trailing slashes ignored). Pass an ordered list
/// so static routes win over parameterized ones.
pub fn match_route<'a, T: RoutePath>(entries: &'a [T], path: &str) -> Option<RouteMatch<'a, T>> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    entries.iter().find_map(|entry| {
        match_pattern(entry.route_path(), &segments).map(|params| RouteMatch { entry, params })
    })
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let expected: Vec<&str> = if pattern.is_empty() {
        Vec::new()
    } else {
        pattern.split('/').collect()
    };

    if expected.len() != segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (want, got) in expected.iter().zip(segments) {
        match want.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), (*got).to_string());
            }
            None if want == got => {}
            None => return None,
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_empty_path_only() {
        let routes = vec!["", "team"];
        assert_eq!(match_route(&routes, "/").map(|m| *m.entry), Some(""));
        assert_eq!(match_route(&routes, "team/").map(|m| *m.entry), Some("team"));
        assert!(match_route(&routes, "team/extra").is_none());
    }

    #[test]
    fn params_are_captured() {
        let routes = vec!["user/:id/edit"];
        let found = match_route(&routes, "user/42/edit").expect("should match");
        assert_eq!(found.params.get("id").map(String::as_str), Some("42"));
    }
}
