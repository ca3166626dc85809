//! Paths into a document value.
//!
//! A path is a sequence of object keys and array indices. The empty path is
//! the document root. Paths serialize as plain JSON arrays, e.g.
//! `["user", 2, "name"]`, and render for display as `$["user"][2]["name"]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Root marker used by the textual rendering
pub const ROOT: &str = "$";

/// Largest array index a path may carry, matching the JavaScript array
/// index range (`2^32 - 2`).
pub const MAX_ARRAY_INDEX: usize = 4_294_967_294;

/// One step into a document value
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Object key: `{"key": value}`
    Key(String),
    /// Array index: `[index]`
    Index(usize),
}

impl Segment {
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        Segment::Key(k.into())
    }

    #[inline]
    pub fn index(i: usize) -> Self {
        Segment::Index(i)
    }

    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self, Segment::Key(_))
    }

    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(k) => Some(k),
            Segment::Index(_) => None,
        }
    }

    /// True for index segments beyond [`MAX_ARRAY_INDEX`]
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Segment::Index(i) if *i > MAX_ARRAY_INDEX)
    }

    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Key(_) => None,
            Segment::Index(i) => Some(*i),
        }
    }
}

impl fmt::Display for Segment {
    /// Keys are quoted verbatim, indices are bare.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "[\"{}\"]", k),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Key(s)
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Key(s.to_owned())
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// A location inside a document value.
///
/// # Examples
///
/// ```
/// use jsonlens_value::Path;
///
/// let path = Path::root().key("users").index(0).key("name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), r#"$["users"][0]["name"]"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Segment>);

impl Path {
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The empty path
    #[inline]
    pub fn root() -> Self {
        Self::new()
    }

    #[inline]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Append a key segment (builder)
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Segment::Key(k.into()));
        self
    }

    /// Append an index segment (builder)
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Segment::Index(i));
        self
    }

    /// A new path one segment deeper, leaving `self` untouched
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment.into());
        Self(segments)
    }

    #[inline]
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into());
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Segment> {
        self.0.pop()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn first(&self) -> Option<&Segment> {
        self.0.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// The enclosing path, or `None` at the root
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }
}

impl AsRef<[Segment]> for Path {
    fn as_ref(&self) -> &[Segment] {
        &self.0
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT)?;
        for segment in &self.0 {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Render segments for display: `$` for the root, `$["a"][2]` otherwise.
pub fn path_to_string(segments: &[Segment]) -> String {
    let mut out = String::from(ROOT);
    for segment in segments {
        out.push_str(&segment.to_string());
    }
    out
}
