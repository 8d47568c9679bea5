//! Facilities for working with paths within schemas or validated instances.
use std::{
    cell::{Cell, RefCell},
    fmt,
    ops::Deref,
};

/// A JSON Pointer as a sequence of path components.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct JSONPointer(Vec<PathChunk>);

impl JSONPointer {
    pub(crate) fn extend_with(&self, chunks: &[PathChunk]) -> JSONPointer {
        let mut new = self.0.clone();
        new.extend_from_slice(chunks);
        JSONPointer(new)
    }

    /// The pointer as a vector of strings. Each component is cast to `String`.
    pub fn into_vec(self) -> Vec<String> {
        self.0
            .iter()
            .map(|item| match item {
                PathChunk::Name(value) => value.clone(),
                PathChunk::Index(idx) => idx.to_string(),
            })
            .collect()
    }

    pub(crate) fn as_slice(&self) -> &[PathChunk] {
        &self.0
    }
}

impl fmt::Display for JSONPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        for chunk in &self.0 {
            f.write_str("/")?;
            match chunk {
                PathChunk::Name(value) => f.write_str(value)?,
                PathChunk::Index(idx) => write!(f, "{}", idx)?,
            }
        }
        Ok(())
    }
}

/// One segment of a path, either a named (object) or indexed (array) step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PathChunk {
    Name(String),
    Index(usize),
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Name(value)
    }
}
impl From<&str> for PathChunk {
    #[inline]
    fn from(value: &str) -> Self {
        PathChunk::Name(value.to_string())
    }
}
impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

pub(crate) type InstancePathInner = RefCell<Vec<PathChunk>>;

/// Tracks the instance location currently being validated, pushed and popped as the
/// kernel descends into arrays and objects, and doubles as the recursion-depth guard:
/// every schema node entered counts against `max_depth` regardless of whether it also
/// pushes a named segment (combinators and `$ref` hops consume depth without consuming
/// path segments).
#[derive(Debug)]
pub(crate) struct InstancePath {
    segments: InstancePathInner,
    depth: Cell<usize>,
    max_depth: usize,
}

impl InstancePath {
    pub(crate) fn new(max_depth: usize) -> Self {
        InstancePath {
            segments: RefCell::new(Vec::new()),
            depth: Cell::new(0),
            max_depth,
        }
    }

    #[inline]
    pub(crate) fn push(&self, value: impl Into<PathChunk>) {
        self.segments.borrow_mut().push(value.into())
    }

    #[inline]
    pub(crate) fn pop(&self) {
        self.segments.borrow_mut().pop();
    }

    /// Enter one more level of schema-node recursion. Returns `false` once `max_depth`
    /// is exceeded; the caller must not recurse further and should report
    /// `DepthExceeded` instead.
    #[inline]
    pub(crate) fn try_enter(&self) -> bool {
        let current = self.depth.get();
        if current >= self.max_depth {
            return false;
        }
        self.depth.set(current + 1);
        true
    }

    #[inline]
    pub(crate) fn leave(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }

    #[inline]
    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Deref for InstancePath {
    type Target = InstancePathInner;

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl From<&InstancePath> for JSONPointer {
    #[inline]
    fn from(path: &InstancePath) -> Self {
        JSONPointer(path.segments.borrow().iter().cloned().collect())
    }
}

impl From<&[&str]> for JSONPointer {
    #[inline]
    fn from(path: &[&str]) -> Self {
        JSONPointer(path.iter().map(|item| PathChunk::Name((*item).to_string())).collect())
    }
}

impl From<Vec<String>> for JSONPointer {
    #[inline]
    fn from(path: Vec<String>) -> Self {
        JSONPointer(path.into_iter().map(PathChunk::Name).collect())
    }
}
