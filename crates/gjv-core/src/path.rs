//! # Node Paths
//!
//! The route from a root document to one of its structural descendants.
//! A path is a sequence of [`ChildStep`]s and renders as an RFC 6901 JSON
//! Pointer (`""` for the root, `/features/1/geometry` for a nested node), so
//! it can be handed straight to [`serde_json::Value::pointer`].
//!
//! Steps only ever use the three structural keys, none of which contain `~`
//! or `/`, so no pointer escaping is needed.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One step from a container to a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildStep {
    key: &'static str,
    index: Option<usize>,
}

impl ChildStep {
    /// Step into a single-valued member, e.g. a feature's `"geometry"`.
    pub fn key(key: &'static str) -> Self {
        Self { key, index: None }
    }

    /// Step into element `index` of an array member.
    pub fn indexed(key: &'static str, index: usize) -> Self {
        Self {
            key,
            index: Some(index),
        }
    }

    /// The member key this step follows.
    pub fn member(&self) -> &'static str {
        self.key
    }

    /// The array index, for steps into collections.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Display for ChildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "/{}/{i}", self.key),
            None => write!(f, "/{}", self.key),
        }
    }
}

/// A full path from the root document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    steps: Vec<ChildStep>,
}

impl NodePath {
    /// The empty path, addressing the root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// This path extended by one step.
    pub fn child(&self, step: ChildStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }

    /// Whether this path addresses the root.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps below the root.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// The steps, root first.
    pub fn steps(&self) -> &[ChildStep] {
        &self.steps
    }

    /// Render as a JSON Pointer.
    pub fn to_pointer(&self) -> String {
        self.to_string()
    }

    /// Follow this path from `root`.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        root.pointer(&self.to_pointer())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
