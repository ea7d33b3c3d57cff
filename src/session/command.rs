use crate::model::{Flow, FlowCategory, Step, StepUid};
use crate::recipe::Recipe;

/// A discrete user action raised by the editing shell.
///
/// Views that can delete or edit steps are handed the ability to produce these
/// values rather than a reference to the session itself; the owner of the
/// [`EditorSession`](super::EditorSession) applies them in the order they arrive.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    SelectCategory(FlowCategory),
    SelectFlow { category: FlowCategory, index: usize },
    NewFlow { name: String },
    ReplaceFlow(Flow),
    LoadRecipe(Recipe),
    AddStep { kind: String },
    /// Field edit. The step must carry the `uid` it was laid out with.
    UpdateStep(Step),
    DeleteStep(StepUid),
    /// Connection drag from one node to another; records a jump on the source step.
    Connect { source: String, target: String },
    SelectNode(String),
    ClearSelection,
    Reset,
}

/// A capability to delete one particular step, handed to whichever view renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteHandle {
    uid: StepUid,
}

impl DeleteHandle {
    pub fn new(uid: StepUid) -> Self {
        Self { uid }
    }

    pub fn uid(&self) -> &StepUid {
        &self.uid
    }

    /// The command that performs the deletion when applied to the session.
    pub fn command(&self) -> EditCommand {
        EditCommand::DeleteStep(self.uid.clone())
    }
}
