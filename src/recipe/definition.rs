use crate::identity::IdentityAssigner;
use crate::model::{Step, StepUid};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// A pre-built flow template.
///
/// The steps are an opaque tree literal: nothing in them is interpreted, they are
/// only copied into a session when the recipe is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Deep-copies the template's steps and gives every copied step a fresh
    /// identifier that collides with none in `existing`.
    pub fn instantiate(
        &self,
        identity: &mut IdentityAssigner,
        existing: &AHashSet<StepUid>,
    ) -> Vec<Step> {
        let mut steps = self.steps.clone();
        identity.refresh(&mut steps, existing);
        steps
    }
}
