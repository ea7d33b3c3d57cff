//! # authflow-graph - Authentication Flow Layout and Export Engine
//!
//! **authflow-graph** converts authentication-flow configurations between two
//! representations of the same flow:
//!
//! - a **nested step tree**: steps (`identify`, `authenticate`, `verify`, ...) that
//!   branch through `one_of` alternatives, each alternative carrying its own nested
//!   steps, with `target_step` jumps back to named steps; and
//! - a **positioned graph**: nodes with canvas coordinates and edges for sequence,
//!   branch entry and jumps, ready for a visual editor to render.
//!
//! ## Core Workflow
//!
//! 1.  **Load a configuration**: parse an [`AuthflowConfig`](model::AuthflowConfig) from
//!     YAML or JSON, or start from the bundled initial configuration.
//! 2.  **Open a session**: an [`EditorSession`](session::EditorSession) owns the
//!     configuration, tracks the selected flow and hands out step identifiers.
//! 3.  **Lay out**: [`EditorSession::graph`](session::EditorSession::graph) runs the
//!     [`LayoutEngine`](layout::LayoutEngine) over the selected flow.
//! 4.  **Edit**: apply [`EditCommand`](session::EditCommand)s raised by the editor;
//!     each one mutates the step tree, and the next layout reflects it.
//! 5.  **Export**: [`EditorSession::preview`](session::EditorSession::preview) renders the
//!     flow as YAML, without any editor bookkeeping.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authflow_graph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut session = EditorSession::with_initial_config()?;
//!
//!     // Load a template into the selected slot.
//!     let library = RecipeLibrary::builtin()?;
//!     session.load_recipe(library.get("google-style")?);
//!
//!     let graph = session.graph();
//!     for node in &graph.nodes {
//!         println!("{} at ({}, {}): {}", node.id, node.position.x, node.position.y, node.title);
//!     }
//!
//!     // Mark the second factor as mandatory, then show the document.
//!     let step = session.graph().nodes[2].step.clone();
//!     session.apply(EditCommand::UpdateStep(Step { optional: false, ..step }))?;
//!     println!("{}", session.preview());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod export;
pub mod identity;
pub mod layout;
pub mod model;
pub mod prelude;
pub mod recipe;
pub mod session;
pub mod terminology;
pub mod tree;
