use serde::{Serialize, Serializer};
use std::fmt;

/// One hop in a tree address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Step(usize),
    Branch(usize),
}

/// The address of a step inside a nested step tree.
///
/// A path always starts with a top-level step index and then alternates
/// `branch -> step` for every level of nesting, so it can only be built through
/// [`StepPath::root`], [`StepPath::child`] or parsed back from a node id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepPath {
    segments: Vec<PathSegment>,
}

impl StepPath {
    pub fn root(index: usize) -> Self {
        Self {
            segments: vec![PathSegment::Step(index)],
        }
    }

    /// The path of step `step` inside branch `branch` of the step at `self`.
    pub fn child(&self, branch: usize, step: usize) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 2);
        segments.extend_from_slice(&self.segments);
        segments.push(PathSegment::Branch(branch));
        segments.push(PathSegment::Step(step));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of branch levels between the top-level list and this step.
    pub fn depth(&self) -> usize {
        self.segments.len() / 2
    }

    /// The index of the step inside the list that directly contains it.
    pub fn index(&self) -> usize {
        match self.segments.last() {
            Some(PathSegment::Step(i)) => *i,
            _ => 0,
        }
    }

    /// Returns `(branch_index, step_index)` pairs below the top-level index.
    pub fn descent(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.segments[1..].chunks_exact(2).filter_map(|pair| match pair {
            [PathSegment::Branch(b), PathSegment::Step(s)] => Some((*b, *s)),
            _ => None,
        })
    }

    pub fn top_index(&self) -> usize {
        match self.segments.first() {
            Some(PathSegment::Step(i)) => *i,
            _ => 0,
        }
    }

    /// The graph node id for this path, e.g. `step-0-branch-2-step-1`.
    pub fn node_id(&self) -> String {
        self.to_string()
    }

    /// Parses a node id produced by [`StepPath::node_id`] back into a path.
    pub fn from_node_id(node_id: &str) -> Option<Self> {
        let parts: Vec<&str> = node_id.split('-').collect();
        if parts.len() % 2 != 0 || parts.is_empty() {
            return None;
        }

        let mut segments = Vec::with_capacity(parts.len() / 2);
        for (position, pair) in parts.chunks_exact(2).enumerate() {
            let index: usize = pair[1].parse().ok()?;
            let expects_step = position % 2 == 0;
            let segment = match (pair[0], expects_step) {
                ("step", true) => PathSegment::Step(index),
                ("branch", false) => PathSegment::Branch(index),
                _ => return None,
            };
            segments.push(segment);
        }

        // Must end on a step, not on a dangling branch.
        if segments.len() % 2 == 0 {
            return None;
        }
        Some(Self { segments })
    }
}

impl fmt::Display for StepPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            match segment {
                PathSegment::Step(idx) => write!(f, "step-{}", idx)?,
                PathSegment::Branch(idx) => write!(f, "branch-{}", idx)?,
            }
        }
        Ok(())
    }
}

impl Serialize for StepPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
