use crate::model::{Step, StepUid};
use crate::tree::StepPath;
use serde::Serialize;

/// Top-left position of a node on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A positioned view of one step. Borrows the step from the tree it was laid out from.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode<'a> {
    pub id: String,
    pub path: StepPath,
    pub position: Position,
    /// Friendly name of the step kind, e.g. "Identification".
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<&'a StepUid>,
    pub step: &'a Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Sequential,
    BranchEntry,
    Jump,
}

/// Rendering hint for edges that must stand out from the structural ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub stroke_dasharray: Option<&'static str>,
}

impl EdgeStyle {
    pub const JUMP: EdgeStyle = EdgeStyle {
        stroke: "#ef4444",
        stroke_dasharray: Some("5,5"),
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
}

/// A `target_step` that named no step in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedJump {
    pub node_id: String,
    pub target: String,
}

/// The derived graph view of a step tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph<'a> {
    pub nodes: Vec<GraphNode<'a>>,
    pub edges: Vec<GraphEdge>,
    pub unresolved_jumps: Vec<UnresolvedJump>,
}

impl<'a> Graph<'a> {
    pub fn node(&self, id: &str) -> Option<&GraphNode<'a>> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// The node whose step answers to `target` by `id` or `name`, first in layout order.
    pub fn resolve_target(&self, target: &str) -> Option<&GraphNode<'a>> {
        self.nodes.iter().find(|n| n.step.answers_to(target))
    }

    pub fn to_json(&self) -> Result<String, crate::error::ExportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::ExportError::Json(e.to_string()))
    }
}
