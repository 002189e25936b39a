use std::cmp::Ordering;

use super::collector::RoutePath;

fn is_param(segment: &str) -> bool {
    segment.starts_with(':')
}

/// compare_paths
///
/// Matching precedence between two section-relative paths: the index route
/// first, then segment by segment with literal segments ahead of parameters and
/// lexicographic order between segments of the same kind. A shorter path reads
/// as padded with empty segments.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let left: Vec<&str> = a.split('/').collect();
    let right: Vec<&str> = b.split('/').collect();

    for position in 0..left.len().max(right.len()) {
        let l = left.get(position).copied().unwrap_or("");
        let r = right.get(position).copied().unwrap_or("");

        let ordering = match (is_param(l), is_param(r)) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => l.cmp(r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// order_routes
///
/// Stable sort by `compare_paths`; entries that tie keep their input order.
pub fn order_routes<T: RoutePath>(mut entries: Vec<T>) -> Vec<T> {
    entries.sort_by(|a, b| compare_paths(a.route_path(), b.route_path()));
    entries
}
