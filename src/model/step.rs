use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editor-only identifier of a step. Never written to the exported configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepUid(String);

impl StepUid {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepUid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single stage of an authentication flow.
///
/// The `kind` vocabulary is open-ended: the engine only looks at `one_of`,
/// `target_step`, `id` and `name`. Every other field is carried through untouched,
/// including fields this struct does not know about (kept in `extra`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "_uuid", default, skip_serializing)]
    pub uid: Option<StepUid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumerate_destinations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_channels: Option<Vec<AllowedChannel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<Vec<UserProfileProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Branch>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Step {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(StepUid::new(uid));
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_step = Some(target.into());
        self
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.one_of.get_or_insert_with(Vec::new).push(branch);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The name other steps use in `target_step` to jump here: `id` wins over `name`.
    pub fn addressable_name(&self) -> Option<&str> {
        non_empty(&self.id).or_else(|| non_empty(&self.name))
    }

    /// Whether `target` refers to this step by either its `id` or its `name`.
    pub fn answers_to(&self, target: &str) -> bool {
        self.id.as_deref() == Some(target) || self.name.as_deref() == Some(target)
    }

    /// The label shown on the node: `name`, then `id`, then the kind itself.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or(&self.kind)
    }

    pub fn branches(&self) -> &[Branch] {
        self.one_of.as_deref().unwrap_or_default()
    }

    /// The step's own jump target, or the first one declared by any of its branches.
    /// An empty `target_step` counts as no target.
    pub fn jump_target(&self) -> Option<&str> {
        non_empty(&self.target_step)
            .or_else(|| self.branches().iter().find_map(|b| non_empty(&b.target_step)))
    }
}

/// One alternative path under a step's `one_of`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_step: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Branch {
    pub fn identification(method: impl Into<String>) -> Self {
        Self {
            identification: Some(method.into()),
            ..Self::default()
        }
    }

    pub fn authentication(method: impl Into<String>) -> Self {
        Self {
            authentication: Some(method.into()),
            ..Self::default()
        }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.get_or_insert_with(Vec::new).push(step);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_step = Some(target.into());
        self
    }

    pub fn steps(&self) -> &[Step] {
        self.steps.as_deref().unwrap_or_default()
    }

    /// First non-empty discriminator, checked in declaration order.
    pub fn discriminator(&self) -> Option<&str> {
        non_empty(&self.identification)
            .or_else(|| non_empty(&self.authentication))
            .or_else(|| non_empty(&self.signup_flow))
            .or_else(|| non_empty(&self.login_flow))
    }

    /// Text for the edge entering this branch: the identification or
    /// authentication method. Flow references are not shown.
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.identification).or_else(|| non_empty(&self.authentication))
    }
}

/// A user-profile attribute collected by a `user_profile` step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfileProperty {
    pub pointer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// A delivery channel offered by a `select_destination` step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowedChannel {
    pub channel: String,
    pub otp_form: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
