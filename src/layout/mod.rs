//! Turns a nested step tree into a positioned node graph.
//!
//! Layout is a pure function of the tree: positions are recomputed from scratch on
//! every call and node ids are derived from tree addresses, so laying out an
//! unchanged tree twice yields identical graphs.

pub mod graph;

pub use graph::*;

use crate::model::Step;
use crate::terminology::friendly_name;
use crate::tree::StepPath;
use ahash::AHashMap;
use tracing::debug;

const FALLBACK_BRANCH_LABEL: &str = "branch";
const JUMP_LABEL: &str = "target_step";

/// Spacing used when placing nodes. All values are in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Horizontal offset between a step and each of its branch columns.
    pub column_width: f64,
    /// Vertical advance after a step without branches.
    pub row_spacing: f64,
    /// How far below its parent a branch column starts.
    pub branch_drop: f64,
    /// Vertical gap left after the deepest branch of a step.
    pub branch_gap: f64,
    pub origin: Position,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            column_width: 300.0,
            row_spacing: 150.0,
            branch_drop: 100.0,
            branch_gap: 100.0,
            origin: Position { x: 0.0, y: 0.0 },
        }
    }
}

pub struct LayoutEngine {
    options: LayoutOptions,
}

pub struct LayoutEngineBuilder {
    options: LayoutOptions,
}

impl LayoutEngineBuilder {
    pub fn new() -> Self {
        Self {
            options: LayoutOptions::default(),
        }
    }
    pub fn column_width(mut self, value: f64) -> Self {
        self.options.column_width = value;
        self
    }
    pub fn row_spacing(mut self, value: f64) -> Self {
        self.options.row_spacing = value;
        self
    }
    pub fn branch_drop(mut self, value: f64) -> Self {
        self.options.branch_drop = value;
        self
    }
    pub fn branch_gap(mut self, value: f64) -> Self {
        self.options.branch_gap = value;
        self
    }
    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.options.origin = Position { x, y };
        self
    }
    pub fn build(self) -> LayoutEngine {
        LayoutEngine {
            options: self.options,
        }
    }
}

impl Default for LayoutEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LayoutEngineBuilder {
        LayoutEngineBuilder::new()
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lays out `steps` and resolves every `target_step` into a jump edge.
    pub fn layout<'a>(&self, steps: &'a [Step]) -> Graph<'a> {
        let mut graph = Graph::default();
        let origin = self.options.origin;
        self.place_list(steps, None, origin.x, origin.y, &mut graph);
        self.resolve_jumps(&mut graph);

        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            unresolved = graph.unresolved_jumps.len(),
            "Laid out step tree"
        );
        graph
    }

    /// Places one step list as a column starting at `(x, start_y)` and returns the
    /// vertical cursor just past the last row it used.
    fn place_list<'a>(
        &self,
        steps: &'a [Step],
        parent: Option<(&StepPath, usize)>,
        x: f64,
        start_y: f64,
        graph: &mut Graph<'a>,
    ) -> f64 {
        let mut cursor = start_y;
        let mut previous: Option<String> = None;

        for (index, step) in steps.iter().enumerate() {
            let path = match parent {
                Some((parent_path, branch)) => parent_path.child(branch, index),
                None => StepPath::root(index),
            };
            let node_id = path.node_id();

            graph.nodes.push(GraphNode {
                id: node_id.clone(),
                path: path.clone(),
                position: Position { x, y: cursor },
                title: friendly_name(&step.kind),
                uid: step.uid.as_ref(),
                step,
            });

            if let Some(prev) = previous.replace(node_id.clone()) {
                graph.edges.push(GraphEdge {
                    id: format!("edge-{}-{}", prev, node_id),
                    source: prev,
                    target: node_id.clone(),
                    kind: EdgeKind::Sequential,
                    label: None,
                    style: None,
                });
            }

            match &step.one_of {
                Some(branches) => {
                    let mut deepest = cursor;
                    for (branch_index, branch) in branches.iter().enumerate() {
                        let Some(nested) = &branch.steps else {
                            continue;
                        };
                        let branch_x = x + self.options.column_width * (branch_index + 1) as f64;
                        let branch_y = cursor + self.options.branch_drop;
                        let end = self.place_list(
                            nested,
                            Some((&path, branch_index)),
                            branch_x,
                            branch_y,
                            graph,
                        );
                        deepest = deepest.max(end);

                        if !nested.is_empty() {
                            let first_id = path.child(branch_index, 0).node_id();
                            graph.edges.push(GraphEdge {
                                id: format!("edge-{}-{}", node_id, first_id),
                                source: node_id.clone(),
                                target: first_id,
                                kind: EdgeKind::BranchEntry,
                                label: Some(
                                    branch
                                        .label()
                                        .unwrap_or(FALLBACK_BRANCH_LABEL)
                                        .to_string(),
                                ),
                                style: None,
                            });
                        }
                    }
                    cursor = deepest + self.options.branch_gap;
                }
                None => cursor += self.options.row_spacing,
            }
        }

        cursor
    }

    /// Second pass: one jump edge per node whose jump target names a laid-out step.
    fn resolve_jumps(&self, graph: &mut Graph<'_>) {
        let mut by_name: AHashMap<&str, usize> = AHashMap::new();
        for (index, node) in graph.nodes.iter().enumerate() {
            let step = node.step;
            for name in [step.id.as_deref(), step.name.as_deref()].into_iter().flatten() {
                by_name.entry(name).or_insert(index);
            }
        }

        let mut jumps = Vec::new();
        let mut unresolved = Vec::new();
        for node in &graph.nodes {
            let Some(target) = node.step.jump_target() else {
                continue;
            };
            match by_name.get(target) {
                Some(&index) => {
                    let target_id = &graph.nodes[index].id;
                    jumps.push(GraphEdge {
                        id: format!("jump-{}-{}", node.id, target_id),
                        source: node.id.clone(),
                        target: target_id.clone(),
                        kind: EdgeKind::Jump,
                        label: Some(JUMP_LABEL.to_string()),
                        style: Some(EdgeStyle::JUMP),
                    });
                }
                None => unresolved.push(UnresolvedJump {
                    node_id: node.id.clone(),
                    target: target.to_string(),
                }),
            }
        }

        graph.edges.extend(jumps);
        graph.unresolved_jumps = unresolved;
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}
