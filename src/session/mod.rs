//! The editing session: owns the configuration being edited, tracks which flow and
//! node are selected, and turns shell events into tree mutations.
//!
//! Every mutation completes before the method returns, and the graph and preview
//! are always derived from the current tree, so the next call to [`EditorSession::graph`]
//! reflects it. After a mutation the selected node is re-resolved against the
//! freshly laid out graph; a selection whose node no longer exists is dropped.

mod command;

pub use command::*;

use crate::error::{ConfigError, ExportError, MutationError, SessionError};
use crate::export::{config_to_yaml, preview_yaml};
use crate::identity::IdentityAssigner;
use crate::layout::{Graph, LayoutEngine};
use crate::model::{AuthflowConfig, Flow, FlowCategory, Step, StepUid};
use crate::recipe::Recipe;
use crate::tree::{self, StepPath};
use ahash::AHashSet;
use tracing::{debug, warn};

const INITIAL_CONFIG: &str = include_str!("../../assets/initial_config.yaml");
const DEFAULT_FLOW_NAME: &str = "default_flow";

/// The configuration every new session starts from.
pub fn initial_config() -> Result<AuthflowConfig, ConfigError> {
    AuthflowConfig::from_yaml_str(INITIAL_CONFIG)
}

/// Which flow of the configuration is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub category: FlowCategory,
    pub index: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            category: FlowCategory::Signup,
            index: 0,
        }
    }
}

pub struct EditorSession {
    config: AuthflowConfig,
    initial: AuthflowConfig,
    selection: Selection,
    selected_node: Option<String>,
    identity: IdentityAssigner,
    layout: LayoutEngine,
}

impl EditorSession {
    /// Starts a session on `config`, which also becomes the state [`reset`](Self::reset)
    /// returns to. Steps without an identifier are given one.
    pub fn new(config: AuthflowConfig) -> Self {
        Self::with_parts(config, IdentityAssigner::new(), LayoutEngine::new())
    }

    /// Starts a session on the bundled initial configuration.
    pub fn with_initial_config() -> Result<Self, ConfigError> {
        Ok(Self::new(initial_config()?))
    }

    pub fn with_parts(
        mut config: AuthflowConfig,
        mut identity: IdentityAssigner,
        layout: LayoutEngine,
    ) -> Self {
        for flow in config.iter_flows_mut() {
            identity.assign_missing(&mut flow.steps);
            let duplicates = tree::duplicate_uids(&flow.steps);
            if !duplicates.is_empty() {
                warn!(flow = %flow.name, ?duplicates, "Flow contains duplicate step identifiers; the first match will be edited");
            }
            let names = tree::duplicate_names(&flow.steps);
            if !names.is_empty() {
                warn!(flow = %flow.name, ?names, "Flow reuses step names; jumps resolve to the first step with the name");
            }
        }

        Self {
            initial: config.clone(),
            config,
            selection: Selection::default(),
            selected_node: None,
            identity,
            layout,
        }
    }

    pub fn config(&self) -> &AuthflowConfig {
        &self.config
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn current_flow(&self) -> Option<&Flow> {
        self.config
            .flow(self.selection.category, self.selection.index)
    }

    /// Steps of the selected flow; empty when the selection points at no flow.
    pub fn current_steps(&self) -> &[Step] {
        self.current_flow().map(|f| f.steps.as_slice()).unwrap_or_default()
    }

    fn current_flow_mut(&mut self) -> Result<&mut Flow, SessionError> {
        let Selection { category, index } = self.selection;
        self.config
            .flow_mut(category, index)
            .ok_or(SessionError::NoCurrentFlow { category, index })
    }

    /// Lays out the selected flow.
    pub fn graph(&self) -> Graph<'_> {
        self.layout.layout(self.current_steps())
    }

    /// YAML preview of the selected flow. Never fails; see [`preview_yaml`].
    pub fn preview(&self) -> String {
        preview_yaml(self.current_steps())
    }

    pub fn export_config(&self) -> Result<String, ExportError> {
        config_to_yaml(&self.config)
    }

    pub fn select_category(&mut self, category: FlowCategory) {
        self.selection = Selection { category, index: 0 };
        self.selected_node = None;
    }

    pub fn select_flow(&mut self, category: FlowCategory, index: usize) -> Result<(), SessionError> {
        if self.config.flow(category, index).is_none() {
            return Err(SessionError::NoCurrentFlow { category, index });
        }
        self.selection = Selection { category, index };
        self.selected_node = None;
        Ok(())
    }

    /// Appends an empty flow to the selected category and selects it.
    pub fn new_flow(&mut self, name: impl Into<String>) -> usize {
        let flows = self.config.flows_mut(self.selection.category);
        flows.push(Flow::new(name));
        self.selection.index = flows.len() - 1;
        self.selected_node = None;
        debug!(category = %self.selection.category, index = self.selection.index, "Created flow");
        self.selection.index
    }

    /// Replaces the selected flow with `flow`. When the selection points past the end
    /// of its category, the flow is appended and selected instead.
    pub fn replace_current(&mut self, mut flow: Flow) {
        self.identity.assign_missing(&mut flow.steps);
        let index = self.selection.index;
        let flows = self.config.flows_mut(self.selection.category);
        if index < flows.len() {
            flows[index] = flow;
        } else {
            flows.push(flow);
            self.selection.index = flows.len() - 1;
        }
        self.selected_node = None;
    }

    /// Instantiates `recipe` with fresh identifiers and loads it into the selected slot,
    /// naming the flow after the recipe id.
    pub fn load_recipe(&mut self, recipe: &Recipe) {
        let existing = self.all_uids();
        let steps = recipe.instantiate(&mut self.identity, &existing);
        debug!(recipe = %recipe.id, steps = tree::count_steps(&steps), "Loading recipe");
        self.replace_current(Flow::with_steps(recipe.id.clone(), steps));
    }

    /// Restores the configuration the session started with.
    pub fn reset(&mut self) {
        self.config = self.initial.clone();
        self.selection = Selection::default();
        self.selected_node = None;
    }

    /// Appends a new `<kind>` step named `new_<kind>_step` to the selected flow,
    /// creating the flow if the selected slot is empty.
    pub fn add_step(&mut self, kind: &str) -> StepUid {
        let Selection { category, index } = self.selection;
        if self.config.flow(category, index).is_none() {
            let flows = self.config.flows_mut(category);
            flows.push(Flow::new(DEFAULT_FLOW_NAME));
            self.selection.index = flows.len() - 1;
        }

        let taken = self.all_uids();
        let uid = self.identity.next_uid(&taken);
        let step = Step {
            uid: Some(uid.clone()),
            name: Some(format!("new_{}_step", kind)),
            ..Step::new(kind)
        };

        let Selection { category, index } = self.selection;
        if let Some(flow) = self.config.flow_mut(category, index) {
            flow.steps.push(step);
        }
        debug!(%uid, kind, "Added step");
        uid
    }

    /// Replaces the step carrying the same `uid` as `step`. Steps newly nested
    /// under it are given identifiers first.
    pub fn update_step(&mut self, mut step: Step) -> Result<(), SessionError> {
        let uid = step.uid.clone().ok_or(MutationError::MissingUid)?;
        let taken = self.all_uids();
        self.identity
            .assign_missing_avoiding(std::slice::from_mut(&mut step), &taken);
        let flow = self.current_flow_mut()?;
        if !tree::replace_step(&mut flow.steps, &uid, step) {
            warn!(%uid, "Update targeted a step that is not in the selected flow");
            return Err(MutationError::StepNotFound(uid).into());
        }
        self.reselect();
        Ok(())
    }

    /// Removes the step carrying `uid` (and everything nested under it).
    pub fn delete_step(&mut self, uid: &StepUid) -> Result<(), SessionError> {
        let flow = self.current_flow_mut()?;
        if !tree::delete_step(&mut flow.steps, uid) {
            warn!(%uid, "Delete targeted a step that is not in the selected flow");
            return Err(MutationError::StepNotFound(uid.clone()).into());
        }
        self.selected_node = None;
        Ok(())
    }

    /// A capability the shell can hand to the view rendering `uid`.
    pub fn delete_handle(&self, uid: &StepUid) -> Option<DeleteHandle> {
        tree::find_step(self.current_steps(), uid).map(|_| DeleteHandle::new(uid.clone()))
    }

    /// Records a jump from the step at node `source` to the step at node `target`.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<(), SessionError> {
        let source_path = StepPath::from_node_id(source)
            .ok_or_else(|| MutationError::NodeNotFound(source.to_string()))?;
        let target_path = StepPath::from_node_id(target)
            .ok_or_else(|| MutationError::NodeNotFound(target.to_string()))?;
        let flow = self.current_flow_mut()?;
        tree::assign_jump_target(&mut flow.steps, &source_path, &target_path)?;
        self.reselect();
        Ok(())
    }

    /// Selects the node with id `node_id`. Returns `false`, clearing the selection,
    /// when the current graph has no such node.
    pub fn select_node(&mut self, node_id: &str) -> bool {
        let exists = self.graph().node(node_id).is_some();
        self.selected_node = exists.then(|| node_id.to_string());
        exists
    }

    pub fn clear_selection(&mut self) {
        self.selected_node = None;
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.selected_node.as_deref()
    }

    /// The step behind the selected node, as it is in the current tree.
    pub fn selected_step(&self) -> Option<&Step> {
        let path = StepPath::from_node_id(self.selected_node.as_deref()?)?;
        tree::step_at(self.current_steps(), &path)
    }

    /// Applies one shell event.
    pub fn apply(&mut self, command: EditCommand) -> Result<(), SessionError> {
        match command {
            EditCommand::SelectCategory(category) => self.select_category(category),
            EditCommand::SelectFlow { category, index } => self.select_flow(category, index)?,
            EditCommand::NewFlow { name } => {
                self.new_flow(name);
            }
            EditCommand::ReplaceFlow(flow) => self.replace_current(flow),
            EditCommand::LoadRecipe(recipe) => self.load_recipe(&recipe),
            EditCommand::AddStep { kind } => {
                self.add_step(&kind);
            }
            EditCommand::UpdateStep(step) => self.update_step(step)?,
            EditCommand::DeleteStep(uid) => self.delete_step(&uid)?,
            EditCommand::Connect { source, target } => self.connect(&source, &target)?,
            EditCommand::SelectNode(node_id) => {
                self.select_node(&node_id);
            }
            EditCommand::ClearSelection => self.clear_selection(),
            EditCommand::Reset => self.reset(),
        }
        Ok(())
    }

    /// Keeps the selected node only if the freshly laid out graph still has it.
    fn reselect(&mut self) {
        let Some(node_id) = self.selected_node.as_deref() else {
            return;
        };
        if self.graph().node(node_id).is_none() {
            self.selected_node = None;
        }
    }

    fn all_uids(&self) -> AHashSet<StepUid> {
        self.config
            .iter_flows()
            .flat_map(|(_, flow)| tree::collect_uids(&flow.steps))
            .collect()
    }
}
