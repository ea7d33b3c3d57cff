use super::flow::Flow;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// The fixed set of flow categories an authflow configuration holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowCategory {
    Signup,
    Login,
    SignupLogin,
    Reauth,
    AccountRecovery,
}

impl FlowCategory {
    pub const ALL: [FlowCategory; 5] = [
        FlowCategory::Signup,
        FlowCategory::Login,
        FlowCategory::SignupLogin,
        FlowCategory::Reauth,
        FlowCategory::AccountRecovery,
    ];

    /// The key under which this category's flows live in the configuration document.
    pub fn key(self) -> &'static str {
        match self {
            FlowCategory::Signup => "signup_flows",
            FlowCategory::Login => "login_flows",
            FlowCategory::SignupLogin => "signup_login_flows",
            FlowCategory::Reauth => "reauth_flows",
            FlowCategory::AccountRecovery => "account_recovery_flows",
        }
    }
}

impl fmt::Display for FlowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FlowCategory {
    type Err = ConfigError;

    /// Accepts both the document key (`signup_flows`) and the short form (`signup`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let short = s.strip_suffix("_flows").unwrap_or(s);
        match short {
            "signup" => Ok(FlowCategory::Signup),
            "login" => Ok(FlowCategory::Login),
            "signup_login" => Ok(FlowCategory::SignupLogin),
            "reauth" => Ok(FlowCategory::Reauth),
            "account_recovery" => Ok(FlowCategory::AccountRecovery),
            _ => Err(ConfigError::UnknownCategory(s.to_string())),
        }
    }
}

/// A complete authflow configuration: every category maps to an ordered list of flows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthflowConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signup_flows: Vec<Flow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub login_flows: Vec<Flow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signup_login_flows: Vec<Flow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reauth_flows: Vec<Flow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub account_recovery_flows: Vec<Flow>,
}

impl AuthflowConfig {
    pub fn flows(&self, category: FlowCategory) -> &[Flow] {
        match category {
            FlowCategory::Signup => &self.signup_flows,
            FlowCategory::Login => &self.login_flows,
            FlowCategory::SignupLogin => &self.signup_login_flows,
            FlowCategory::Reauth => &self.reauth_flows,
            FlowCategory::AccountRecovery => &self.account_recovery_flows,
        }
    }

    pub fn flows_mut(&mut self, category: FlowCategory) -> &mut Vec<Flow> {
        match category {
            FlowCategory::Signup => &mut self.signup_flows,
            FlowCategory::Login => &mut self.login_flows,
            FlowCategory::SignupLogin => &mut self.signup_login_flows,
            FlowCategory::Reauth => &mut self.reauth_flows,
            FlowCategory::AccountRecovery => &mut self.account_recovery_flows,
        }
    }

    pub fn flow(&self, category: FlowCategory, index: usize) -> Option<&Flow> {
        self.flows(category).get(index)
    }

    pub fn flow_mut(&mut self, category: FlowCategory, index: usize) -> Option<&mut Flow> {
        self.flows_mut(category).get_mut(index)
    }

    pub fn iter_flows(&self) -> impl Iterator<Item = (FlowCategory, &Flow)> {
        FlowCategory::ALL
            .into_iter()
            .flat_map(move |category| self.flows(category).iter().map(move |f| (category, f)))
    }

    pub fn iter_flows_mut(&mut self) -> impl Iterator<Item = &mut Flow> {
        self.signup_flows
            .iter_mut()
            .chain(self.login_flows.iter_mut())
            .chain(self.signup_login_flows.iter_mut())
            .chain(self.reauth_flows.iter_mut())
            .chain(self.account_recovery_flows.iter_mut())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads a configuration file, picking the parser from the file extension.
    /// Anything that is not `.json` is read as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }
}
