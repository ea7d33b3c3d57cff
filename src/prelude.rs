//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! authflow-graph crate. Import this module to get access to the core functionality
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use authflow_graph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = AuthflowConfig::from_file("path/to/authflow.yaml")?;
//! let flow = &config.flows(FlowCategory::Login)[0];
//!
//! let graph = LayoutEngine::new().layout(&flow.steps);
//! println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//! println!("{}", to_yaml(&flow.steps)?);
//! # Ok(())
//! # }
//! ```

// Core engine
pub use crate::layout::{EdgeKind, Graph, GraphEdge, GraphNode, LayoutEngine, Position};
pub use crate::session::{DeleteHandle, EditCommand, EditorSession, Selection};

// Data model
pub use crate::model::{AuthflowConfig, Branch, Flow, FlowCategory, Step, StepUid};
pub use crate::recipe::{Recipe, RecipeLibrary};

// Tree operations and export
pub use crate::export::{preview_yaml, strip_internal_ids, to_yaml};
pub use crate::identity::IdentityAssigner;
pub use crate::tree::{StepPath, deleted, find_step, replaced};

// Error types
pub use crate::error::{ConfigError, ExportError, MutationError, RecipeError, SessionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
