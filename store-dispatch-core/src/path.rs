//! Dot-separated action path utilities and the allow-list matcher
//!
//! Paths are plain strings like `"todos.add"`. All matching here is
//! segment-wise: `"todo"` is not a prefix of `"todos.add"` even though it is
//! a string prefix. Nothing is cached between calls; every check re-splits
//! its inputs so a dispatcher stays a pure function of its arguments.

/// Split a path into its segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.')
}

/// Join a prefix and a relative path with a `.` separator.
pub fn join(prefix: &str, rest: &str) -> String {
    format!("{prefix}.{rest}")
}

/// Segment-wise prefix test.
///
/// True iff every segment of `prefix` equals the corresponding leading
/// segment of `path`. A prefix longer than the path never matches.
///
/// ```
/// use store_dispatch_core::path::starts_with;
///
/// assert!(starts_with("todos.add", "todos"));
/// assert!(starts_with("todos.add", "todos.add"));
/// assert!(!starts_with("todos.add", "todo"));
/// assert!(!starts_with("todos", "todos.add"));
/// ```
pub fn starts_with(path: &str, prefix: &str) -> bool {
    let mut path_segs = segments(path);
    for want in segments(prefix) {
        match path_segs.next() {
            Some(got) if got == want => {}
            _ => return false,
        }
    }
    true
}

/// Decide whether `path` falls under any entry of an allow-list.
///
/// Entries may be exact leaf paths or namespace prefixes; one declaration can
/// therefore grant a single action or everything under a namespace. Entries
/// are tried in declaration order and the first hit wins (the decision is
/// boolean, so any hit is sufficient).
pub fn matches_any<S: AsRef<str>>(allow_list: &[S], path: &str) -> bool {
    allow_list
        .iter()
        .any(|prefix| starts_with(path, prefix.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        let segs: Vec<&str> = segments("todos.add").collect();
        assert_eq!(segs, vec!["todos", "add"]);

        // A bare name is a single segment.
        let segs: Vec<&str> = segments("increment").collect();
        assert_eq!(segs, vec!["increment"]);
    }

    #[test]
    fn test_join() {
        assert_eq!(join("todos", "add"), "todos.add");
        assert_eq!(join("a.b", "c"), "a.b.c");
    }

    #[test]
    fn test_starts_with_exact_and_namespace() {
        assert!(starts_with("increment", "increment"));
        assert!(starts_with("todos.add", "todos"));
        assert!(starts_with("a.b.c", "a.b"));
    }

    #[test]
    fn test_starts_with_rejects_string_prefixes() {
        // "todo" is a string prefix of "todos" but not a segment prefix.
        assert!(!starts_with("todos.add", "todo"));
        assert!(!starts_with("increment", "inc"));
    }

    #[test]
    fn test_starts_with_rejects_longer_prefix() {
        assert!(!starts_with("todos", "todos.add"));
    }

    #[test]
    fn test_matches_any() {
        let allow = ["todos", "increment"];
        assert!(matches_any(&allow, "todos.add"));
        assert!(matches_any(&allow, "todos.remove"));
        assert!(matches_any(&allow, "increment"));
        assert!(!matches_any(&allow, "decrement"));
        assert!(!matches_any(&allow, "todo.add"));
    }

    #[test]
    fn test_matches_any_empty_list() {
        let allow: [&str; 0] = [];
        assert!(!matches_any(&allow, "anything"));
    }
}
