/// File extensions recognised as page modules, longest first so `.tsx` is never
/// mistaken for `.ts`.
pub const PAGE_EXTENSIONS: [&str; 4] = ["tsx", "jsx", "ts", "js"];

const INDEX_SEGMENT: &str = "index";

/// normalize
///
/// Converts a page module's file path into the URL path pattern it serves inside
/// `section`.
///
/// Returns `None` when the path does not contain `/pages/{section}/`, i.e. the
/// module is not a member of the section. `Some("")` is the section's index route.
///
/// ```
/// use admin_portal::discovery::normalize;
///
/// assert_eq!(normalize("/src/pages/brand/index.tsx", "brand").as_deref(), Some(""));
/// assert_eq!(normalize("/src/pages/brand/team/index.tsx", "brand").as_deref(), Some("team"));
/// assert_eq!(
///     normalize("/src/pages/system/user/[id]/edit.tsx", "system").as_deref(),
///     Some("user/:id/edit"),
/// );
/// assert_eq!(normalize("/src/pages/agency/x.tsx", "brand"), None);
/// ```
pub fn normalize(file_path: &str, section: &str) -> Option<String> {
    let path = file_path.replace('\\', "/");
    let marker = format!("/pages/{section}/");
    let start = path.find(&marker)? + marker.len();

    let relative = strip_page_extension(&path[start..]);

    // `index` never survives as a segment: a trailing one collapses onto its
    // parent and a bare one is the section index.
    let segments: Vec<String> = relative
        .split('/')
        .filter(|segment| *segment != INDEX_SEGMENT)
        .map(bracket_to_param)
        .collect();

    Some(segments.join("/"))
}

/// Drops a page extension. A bare extension such as `.tsx` has no stem and is
/// left untouched.
fn strip_page_extension(path: &str) -> &str {
    PAGE_EXTENSIONS
        .iter()
        .find_map(|ext| path.strip_suffix(ext).and_then(|stem| stem.strip_suffix('.')))
        .filter(|stem| !stem.is_empty() && !stem.ends_with('/'))
        .unwrap_or(path)
}

/// Rewrites the first `[name]` group of a segment as `:name`.
fn bracket_to_param(segment: &str) -> String {
    let Some(open) = segment.find('[') else {
        return segment.to_string();
    };
    let Some(close) = segment[open..].find(']').map(|offset| open + offset) else {
        return segment.to_string();
    };
    if close == open + 1 {
        return segment.to_string();
    }

    format!(
        "{}:{}{}",
        &segment[..open],
        &segment[open + 1..close],
        &segment[close + 1..]
    )
}

/// Whether `path` has a recognised page-module extension.
pub fn is_page_file(path: &str) -> bool {
    strip_page_extension(path).len() != path.len()
}
