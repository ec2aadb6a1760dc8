//! Canonical file keys.

use std::path::Path;

use tracing::warn;

/// Maps file paths in any notation onto a single canonical key.
///
/// Backslashes become forward slashes. An absolute path that lies under the
/// base directory is rewritten relative to it; any other path is only
/// slash-normalized. Absolute detection is string-based (`/x`, `C:/x`,
/// `//server/share`), so Windows-style paths behave the same on every host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathCanonicalizer {
    base: Option<AbsolutePath>,
}

impl PathCanonicalizer {
    /// Creates a canonicalizer relative to `base_dir`.
    ///
    /// A base directory that is not absolute cannot contain any absolute path,
    /// so it is ignored.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let raw = base_dir.as_ref().to_string_lossy();
        let base = AbsolutePath::parse(&to_forward_slashes(&raw));
        if base.is_none() {
            warn!("Ignoring base directory that is not absolute: {}", raw);
        }
        Self { base }
    }

    /// Creates a canonicalizer with no base directory.
    pub fn without_base() -> Self {
        Self::default()
    }

    /// Returns the normalized base directory, if any.
    pub fn base_dir(&self) -> Option<String> {
        self.base.as_ref().map(AbsolutePath::to_string)
    }

    /// Returns the canonical key for `path`.
    ///
    /// Idempotent: canonicalizing a key yields the same key.
    pub fn canonicalize(&self, path: &str) -> String {
        let normalized = to_forward_slashes(path);
        let Some(absolute) = AbsolutePath::parse(&normalized) else {
            return normalized;
        };

        match self.base.as_ref().and_then(|base| absolute.strip_base(base)) {
            Some(relative) if relative.is_empty() => ".".to_string(),
            Some(relative) => {
                let key = relative.join("/");
                // A key that reads as rooted (`C:/x`) would be stripped again.
                if AbsolutePath::parse(&key).is_some() {
                    normalized
                } else {
                    key
                }
            }
            None => normalized,
        }
    }
}

/// Replaces every backslash with a forward slash.
pub(crate) fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns true if `path` is not rooted.
pub fn is_relative(path: &str) -> bool {
    AbsolutePath::parse(&to_forward_slashes(path)).is_none()
}

/// A rooted path with `.` and `..` segments resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AbsolutePath {
    /// `/`, `//` or an uppercase drive such as `C:`.
    root: String,
    segments: Vec<String>,
}

impl AbsolutePath {
    /// Parses a forward-slash path. Returns `None` for relative paths.
    fn parse(path: &str) -> Option<Self> {
        let bytes = path.as_bytes();
        let (root, rest) = if let Some(rest) = path.strip_prefix("//") {
            ("//".to_string(), rest)
        } else if let Some(rest) = path.strip_prefix('/') {
            ("/".to_string(), rest)
        } else if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            let drive = (bytes[0] as char).to_ascii_uppercase();
            (format!("{drive}:"), &path[2..])
        } else {
            return None;
        };

        let mut segments: Vec<String> = Vec::new();
        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other.to_string()),
            }
        }

        Some(Self { root, segments })
    }

    /// Returns the segments below `base`, or `None` if `self` is not under it.
    fn strip_base<'a>(&'a self, base: &AbsolutePath) -> Option<&'a [String]> {
        if self.root != base.root || !self.segments.starts_with(&base.segments) {
            return None;
        }
        Some(&self.segments[base.segments.len()..])
    }
}

impl std::fmt::Display for AbsolutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.root.as_str() {
            "/" | "//" => write!(f, "{}{}", self.root, self.segments.join("/")),
            drive => write!(f, "{}/{}", drive, self.segments.join("/")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("C:\\docs", "C:\\docs\\a.md", "a.md")]
    #[case("C:\\docs", "C:/docs/a.md", "a.md")]
    #[case("C:\\docs", "c:/docs/sub/b.md", "sub/b.md")]
    #[case("C:/docs/", "C:\\docs\\sub\\..\\a.md", "a.md")]
    #[case("/work/site", "/work/site/articles/x.md", "articles/x.md")]
    #[case("/work/site", "/work/site/./x.md", "x.md")]
    #[case("/work/site", "/work/site", ".")]
    fn test_absolute_under_base_becomes_relative(
        #[case] base: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let canonicalizer = PathCanonicalizer::new(base);
        assert_eq!(canonicalizer.canonicalize(path), expected);
    }

    #[rstest]
    #[case("a.md", "a.md")]
    #[case("docs\\a.md", "docs/a.md")]
    #[case("./docs/../a.md", "./docs/../a.md")]
    #[case("", "")]
    fn test_relative_is_only_slash_normalized(#[case] path: &str, #[case] expected: &str) {
        let canonicalizer = PathCanonicalizer::new("/work");
        assert_eq!(canonicalizer.canonicalize(path), expected);
    }

    #[rstest]
    #[case("/other/a.md", "/other/a.md")]
    #[case("/work-other/a.md", "/work-other/a.md")]
    #[case("D:\\work\\a.md", "D:/work/a.md")]
    #[case("//server/share/a.md", "//server/share/a.md")]
    fn test_absolute_outside_base_is_kept(#[case] path: &str, #[case] expected: &str) {
        let canonicalizer = PathCanonicalizer::new("/work");
        assert_eq!(canonicalizer.canonicalize(path), expected);
    }

    #[test]
    fn test_without_base_keeps_absolute_paths() {
        let canonicalizer = PathCanonicalizer::without_base();
        assert_eq!(canonicalizer.canonicalize("C:\\docs\\a.md"), "C:/docs/a.md");
        assert_eq!(canonicalizer.base_dir(), None);
    }

    #[test]
    fn test_relative_base_is_ignored() {
        let canonicalizer = PathCanonicalizer::new("docs");
        assert_eq!(canonicalizer.base_dir(), None);
        assert_eq!(canonicalizer.canonicalize("/docs/a.md"), "/docs/a.md");
    }

    #[test]
    fn test_base_dir_is_normalized() {
        let canonicalizer = PathCanonicalizer::new("c:\\docs\\");
        assert_eq!(canonicalizer.base_dir().as_deref(), Some("C:/docs"));
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let canonicalizer = PathCanonicalizer::new("C:\\docs");
        let inputs = [
            "C:\\docs\\a.md",
            "C:\\docs",
            "c:/docs/x/../y.md",
            "E:\\elsewhere\\z.md",
            "/root/../x.md",
            "rel\\path.md",
            "./a.md",
            "",
        ];

        for input in inputs {
            let once = canonicalizer.canonicalize(input);
            assert_eq!(canonicalizer.canonicalize(&once), once, "input: {input}");
        }
    }

    #[rstest]
    #[case("C:/", "C:/C:/x")]
    #[case("C:\\", "C:\\d:\\y.md")]
    #[case("/", "/E:/z.md")]
    fn test_drive_like_segment_is_idempotent(#[case] base: &str, #[case] path: &str) {
        let canonicalizer = PathCanonicalizer::new(base);
        let once = canonicalizer.canonicalize(path);

        assert_eq!(once, path.replace('\\', "/"));
        assert_eq!(canonicalizer.canonicalize(&once), once);
    }

    #[rstest]
    #[case("a.md", true)]
    #[case("..\\a.md", true)]
    #[case("/a.md", false)]
    #[case("C:\\a.md", false)]
    #[case("\\\\server\\share", false)]
    fn test_is_relative(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_relative(path), expected);
    }
}
