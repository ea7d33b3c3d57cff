use crate::model::{FlowCategory, StepUid};
use thiserror::Error;

/// Errors raised by tree mutations. None of them leave the tree modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Step '{0}' was not found in the flow")]
    StepNotFound(StepUid),

    #[error("Node '{0}' does not address a step in the flow")]
    NodeNotFound(String),

    #[error("Node '{0}' has neither an id nor a name, so it cannot be used as a jump target")]
    UnaddressableTarget(String),

    #[error("The step carries no internal identifier and cannot be located")]
    MissingUid,
}

/// Errors raised by the editing session when acting on the current selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("No flow exists at index {index} of '{category}'")]
    NoCurrentFlow {
        category: FlowCategory,
        index: usize,
    },

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

/// Errors that can occur while rendering a step tree to text.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("Failed to render YAML: {0}")]
    Yaml(String),

    #[error("Failed to render JSON: {0}")]
    Json(String),
}

/// Errors that can occur while loading the bundled or a user-supplied recipe library.
#[derive(Error, Debug, Clone)]
pub enum RecipeError {
    #[error("Failed to parse recipe library: {0}")]
    Parse(String),

    #[error("No recipe with id '{0}' exists in the library")]
    UnknownRecipe(String),
}

/// Errors that can occur while loading an authflow configuration document.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse authflow configuration: {0}")]
    Parse(String),

    #[error("Unknown flow category '{0}'")]
    UnknownCategory(String),
}
