use crate::error::ExportError;
use crate::model::{AuthflowConfig, Branch, Step};
use tracing::error;

/// Shown in place of the document when rendering fails.
pub const YAML_ERROR_PLACEHOLDER: &str = "# Error generating YAML";

const INTERNAL_ID_KEY: &str = "_uuid";

/// Deep copy of `steps` with every editor-only identifier removed, at every depth.
pub fn strip_internal_ids(steps: &[Step]) -> Vec<Step> {
    steps.iter().map(strip_step).collect()
}

fn strip_step(step: &Step) -> Step {
    let mut clean = Step {
        uid: None,
        one_of: step
            .one_of
            .as_ref()
            .map(|branches| branches.iter().map(strip_branch).collect()),
        ..step.clone()
    };
    clean.extra.shift_remove(INTERNAL_ID_KEY);
    clean
}

fn strip_branch(branch: &Branch) -> Branch {
    let mut clean = Branch {
        steps: branch.steps.as_deref().map(strip_internal_ids),
        ..branch.clone()
    };
    clean.extra.shift_remove(INTERNAL_ID_KEY);
    clean
}

/// Renders a step list as a block-style YAML document.
///
/// Fields come out in a fixed order (declared fields first, then any extra fields
/// in the order they were read), so rendering an unchanged tree is byte-identical.
/// Sequences nested in a mapping start at the column of their key
/// (`one_of:` followed by `- identification: email` at the same indent).
/// `optional` is only written when it is `true`.
pub fn to_yaml(steps: &[Step]) -> Result<String, ExportError> {
    serde_yaml::to_string(&strip_internal_ids(steps)).map_err(|e| ExportError::Yaml(e.to_string()))
}

/// Like [`to_yaml`], but never fails: on error the placeholder is returned instead.
pub fn preview_yaml(steps: &[Step]) -> String {
    match to_yaml(steps) {
        Ok(yaml) => yaml,
        Err(e) => {
            error!(error = %e, "Failed to render flow preview");
            YAML_ERROR_PLACEHOLDER.to_string()
        }
    }
}

/// Renders a complete configuration, every category and flow included.
pub fn config_to_yaml(config: &AuthflowConfig) -> Result<String, ExportError> {
    let mut clean = config.clone();
    for flow in clean.iter_flows_mut() {
        flow.steps = strip_internal_ids(&flow.steps);
    }
    serde_yaml::to_string(&clean).map_err(|e| ExportError::Yaml(e.to_string()))
}
