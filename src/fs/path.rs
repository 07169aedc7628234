//! Remote path handling.

use std::fmt;

/// Slash-delimited location relative to the storage root.
///
/// A path is an ordered list of segments. It is derived from the
/// percent-encoded tail of a browsing route (decode, split on `/`, drop
/// empty segments) and re-encoded as a single unit when interpolated into
/// an API URL, so a nested path travels as one `%2F`-joined placeholder —
/// the shape the Kast backend routes on.
///
/// No validation is applied to segment names; the backend is the
/// authority on what constitutes a legal name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RemotePath {
    segments: Vec<String>,
}

impl RemotePath {
    /// The storage root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Derive a path from the wildcard tail of a browsing route.
    ///
    /// The tail is percent-decoded first; a tail that does not decode is
    /// taken verbatim. Empty segments (leading, trailing or doubled
    /// slashes) are dropped.
    pub fn from_route_tail(tail: &str) -> Self {
        let decoded = urlencoding::decode(tail)
            .map(|cow| cow.into_owned())
            .unwrap_or_else(|_| tail.to_string());
        Self::from_segments(decoded.split('/'))
    }

    /// Build a path from explicit segments; empty segments are dropped.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append one segment (descend into a child directory).
    pub fn push(&mut self, name: &str) {
        if !name.is_empty() {
            self.segments.push(name.to_string());
        }
    }

    /// The path one level up, or `None` at the root.
    pub fn parent(&self) -> Option<RemotePath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// A child path without mutating this one.
    pub fn child(&self, name: &str) -> RemotePath {
        let mut child = self.clone();
        child.push(name);
        child
    }

    /// The `/`-joined path, empty for the root.
    pub fn as_joined(&self) -> String {
        self.segments.join("/")
    }

    /// Percent-encode the joined path as one unit (`/` becomes `%2F`).
    ///
    /// The root encodes to the empty string, so the listing URL for the
    /// root is `/api/files/`.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.as_joined()).into_owned()
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.as_joined())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_tail_decoding() {
        let path = RemotePath::from_route_tail("Docs%2FQ1%20reports");
        assert_eq!(path.segments(), ["Docs", "Q1 reports"]);

        // Unencoded tails work too
        let path = RemotePath::from_route_tail("Docs/2024");
        assert_eq!(path.segments(), ["Docs", "2024"]);
    }

    #[test]
    fn test_empty_segments_dropped() {
        let path = RemotePath::from_route_tail("/Docs//2024/");
        assert_eq!(path.segments(), ["Docs", "2024"]);

        assert!(RemotePath::from_route_tail("").is_root());
        assert!(RemotePath::from_route_tail("///").is_root());
    }

    #[test]
    fn test_push_and_parent() {
        let mut path = RemotePath::root();
        assert!(path.parent().is_none());

        path.push("Docs");
        path.push("2024");
        assert_eq!(path.as_joined(), "Docs/2024");

        let up = path.parent().expect("parent");
        assert_eq!(up.as_joined(), "Docs");
        assert_eq!(up.parent(), Some(RemotePath::root()));
    }

    #[test]
    fn test_child_does_not_mutate() {
        let path = RemotePath::from_segments(["Docs"]);
        let child = path.child("2024");
        assert_eq!(path.as_joined(), "Docs");
        assert_eq!(child.as_joined(), "Docs/2024");
    }

    #[test]
    fn test_encoding() {
        assert_eq!(RemotePath::root().encoded(), "");
        assert_eq!(
            RemotePath::from_segments(["Docs", "Q1 reports"]).encoded(),
            "Docs%2FQ1%20reports"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(RemotePath::root().to_string(), "/");
        assert_eq!(
            RemotePath::from_segments(["Docs", "2024"]).to_string(),
            "Docs/2024"
        );
    }
}
