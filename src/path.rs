//! Path helpers for `/`-separated remote paths.

/// Normalize a path: absolute, no empty or `.` components, `..` resolved,
/// no trailing slash (except for the root itself).
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Parent directory of a normalized path. The root is its own parent.
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Final component of a normalized path; empty for the root.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join `child` onto `base` and normalize the result.
pub fn join(base: &str, child: &str) -> String {
    normalize(&format!("{}/{}", base, child))
}

pub fn is_root(path: &str) -> bool {
    path == "/"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/foo"), "/foo");
        assert_eq!(normalize("/foo/"), "/foo");
        assert_eq!(normalize("/foo//bar"), "/foo/bar");
        assert_eq!(normalize("foo"), "/foo");
        assert_eq!(normalize("/foo/./bar/../baz"), "/foo/baz");
        assert_eq!(normalize("/.."), "/");
    }

    #[test]
    fn test_dirname_basename() {
        assert_eq!(dirname("/docs/a.txt"), "/docs");
        assert_eq!(basename("/docs/a.txt"), "a.txt");
        assert_eq!(dirname("/docs"), "/");
        assert_eq!(basename("/docs"), "docs");
        assert_eq!(dirname("/"), "/");
        assert_eq!(basename("/"), "");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "docs"), "/docs");
        assert_eq!(join("/docs", "sub/a.txt"), "/docs/sub/a.txt");
        assert_eq!(join("/docs", "/abs"), "/docs/abs");
        assert!(is_root(&join("/docs", "..")));
    }
}
