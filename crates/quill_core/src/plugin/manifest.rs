//! Plugin manifest declaration and validation.

use crate::plugin::capability::RuntimeCapability;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Declarative manifest for one plugin.
///
/// The host registers commands and panel views from this declaration before
/// any plugin code runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginManifest {
    /// Stable dotted plugin id, e.g. `builtin.project.board`.
    pub id: String,
    /// Semantic version string (`major.minor.patch`).
    pub version: String,
    /// Host resources the plugin needs at runtime.
    pub capabilities: Vec<RuntimeCapability>,
    /// Commands contributed to the host palette.
    pub commands: Vec<CommandDecl>,
    /// Optional side-panel view contributed by the plugin.
    pub view: Option<ViewDecl>,
}

/// One palette command declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDecl {
    /// Stable kebab-case command id, e.g. `correct-grammar`.
    pub id: String,
    /// Human-readable palette entry.
    pub name: String,
}

impl CommandDecl {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One side-panel view declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDecl {
    /// Stable view type id, e.g. `project-board-view`.
    pub id: String,
    /// Panel caption shown by the host.
    pub display_name: String,
}

impl PluginManifest {
    /// Validates declaration-level invariants.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ManifestError::EmptyId);
        }
        if !is_valid_plugin_id(id) {
            return Err(ManifestError::InvalidId(self.id.clone()));
        }

        if !is_semver_triplet(self.version.trim()) {
            return Err(ManifestError::InvalidVersion(self.version.clone()));
        }

        let mut seen_capabilities = BTreeSet::new();
        for capability in &self.capabilities {
            if !seen_capabilities.insert(*capability) {
                return Err(ManifestError::DuplicateCapability(capability.as_str()));
            }
        }

        if self.commands.is_empty() && self.view.is_none() {
            return Err(ManifestError::NoContribution);
        }

        let mut seen_commands = BTreeSet::new();
        for command in &self.commands {
            if !is_valid_command_id(command.id.trim()) {
                return Err(ManifestError::InvalidCommandId(command.id.clone()));
            }
            if command.name.trim().is_empty() {
                return Err(ManifestError::EmptyCommandName(command.id.clone()));
            }
            if !seen_commands.insert(command.id.trim().to_string()) {
                return Err(ManifestError::DuplicateCommandId(command.id.clone()));
            }
        }

        if let Some(view) = &self.view {
            if !is_valid_command_id(view.id.trim()) {
                return Err(ManifestError::InvalidViewId(view.id.clone()));
            }
            if view.display_name.trim().is_empty() {
                return Err(ManifestError::EmptyViewName(view.id.clone()));
            }
        }

        Ok(())
    }
}

/// Dotted lowercase segments: `segment(.segment)*`.
fn is_valid_plugin_id(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Kebab-case lowercase: `word(-word)*`.
fn is_valid_command_id(value: &str) -> bool {
    !value.is_empty()
        && value.split('-').all(|word| {
            !word.is_empty()
                && word
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

fn is_semver_triplet(value: &str) -> bool {
    let parts: Vec<&str> = value.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// Manifest validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    EmptyId,
    InvalidId(String),
    InvalidVersion(String),
    DuplicateCapability(&'static str),
    /// Manifest declares neither a command nor a view.
    NoContribution,
    InvalidCommandId(String),
    EmptyCommandName(String),
    DuplicateCommandId(String),
    InvalidViewId(String),
    EmptyViewName(String),
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "plugin id must not be empty"),
            Self::InvalidId(value) => write!(f, "plugin id is invalid: {value}"),
            Self::InvalidVersion(value) => write!(
                f,
                "plugin version is invalid: {value} (expected major.minor.patch)"
            ),
            Self::DuplicateCapability(value) => {
                write!(f, "plugin capability is duplicated: {value}")
            }
            Self::NoContribution => {
                write!(f, "plugin must declare at least one command or a view")
            }
            Self::InvalidCommandId(value) => write!(f, "command id is invalid: {value}"),
            Self::EmptyCommandName(id) => write!(f, "command {id} has an empty name"),
            Self::DuplicateCommandId(value) => write!(f, "command id is duplicated: {value}"),
            Self::InvalidViewId(value) => write!(f, "view id is invalid: {value}"),
            Self::EmptyViewName(id) => write!(f, "view {id} has an empty display name"),
        }
    }
}

impl Error for ManifestError {}

#[cfg(test)]
mod tests {
    use super::{CommandDecl, ManifestError, PluginManifest, ViewDecl};
    use crate::plugin::capability::RuntimeCapability;

    fn valid_manifest() -> PluginManifest {
        PluginManifest {
            id: "builtin.title.assistant".to_string(),
            version: "0.2.0".to_string(),
            capabilities: vec![RuntimeCapability::Network, RuntimeCapability::File],
            commands: vec![
                CommandDecl::new("generate-title", "Generate title from content"),
                CommandDecl::new("correct-title", "Correct title typos"),
            ],
            view: None,
        }
    }

    #[test]
    fn validates_baseline_manifest() {
        assert!(valid_manifest().validate().is_ok());
    }

    #[test]
    fn rejects_invalid_plugin_id() {
        let mut manifest = valid_manifest();
        manifest.id = "Builtin Title".to_string();
        assert!(matches!(
            manifest.validate().unwrap_err(),
            ManifestError::InvalidId(_)
        ));
    }

    #[test]
    fn rejects_invalid_version() {
        let mut manifest = valid_manifest();
        manifest.version = "v2".to_string();
        assert!(matches!(
            manifest.validate().unwrap_err(),
            ManifestError::InvalidVersion(_)
        ));
    }

    #[test]
    fn rejects_duplicate_capability() {
        let mut manifest = valid_manifest();
        manifest.capabilities.push(RuntimeCapability::Network);
        assert_eq!(
            manifest.validate().unwrap_err(),
            ManifestError::DuplicateCapability("network")
        );
    }

    #[test]
    fn rejects_manifest_without_commands_or_view() {
        let mut manifest = valid_manifest();
        manifest.commands.clear();
        assert_eq!(manifest.validate().unwrap_err(), ManifestError::NoContribution);

        manifest.view = Some(ViewDecl {
            id: "title-panel".to_string(),
            display_name: "Titles".to_string(),
        });
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_command_id_within_plugin() {
        let mut manifest = valid_manifest();
        manifest
            .commands
            .push(CommandDecl::new("generate-title", "Again"));
        assert!(matches!(
            manifest.validate().unwrap_err(),
            ManifestError::DuplicateCommandId(_)
        ));
    }

    #[test]
    fn rejects_malformed_command_id() {
        let mut manifest = valid_manifest();
        manifest.commands[0].id = "Generate Title".to_string();
        assert!(matches!(
            manifest.validate().unwrap_err(),
            ManifestError::InvalidCommandId(_)
        ));
    }
}
