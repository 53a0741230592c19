//! In-process plugin registry and first-party baseline.

use crate::plugin::capability::RuntimeCapability;
use crate::plugin::manifest::{CommandDecl, ManifestError, PluginManifest, ViewDecl};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registry of declared plugins with a command lookup index.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: BTreeMap<String, PluginManifest>,
    /// Command id -> owning plugin id. Command ids are host-global.
    command_index: BTreeMap<String, String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one manifest after declaration validation.
    pub fn register(&mut self, manifest: PluginManifest) -> Result<(), RegistryError> {
        manifest.validate().map_err(RegistryError::InvalidManifest)?;
        if self.entries.contains_key(manifest.id.as_str()) {
            return Err(RegistryError::DuplicatePluginId(manifest.id));
        }
        for command in &manifest.commands {
            if let Some(owner) = self.command_index.get(command.id.as_str()) {
                return Err(RegistryError::CommandIdTaken {
                    command_id: command.id.clone(),
                    owner: owner.clone(),
                });
            }
        }

        for command in &manifest.commands {
            self.command_index
                .insert(command.id.clone(), manifest.id.clone());
        }
        self.entries.insert(manifest.id.clone(), manifest);
        Ok(())
    }

    /// Registers the three first-party plugins shipped with the suite.
    pub fn register_builtin_plugins(&mut self) -> Result<(), RegistryError> {
        for manifest in builtin_manifests() {
            self.register(manifest)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, plugin_id: &str) -> Option<&PluginManifest> {
        self.entries.get(plugin_id)
    }

    /// Resolves a palette command id to its owning plugin and declaration.
    pub fn find_command(&self, command_id: &str) -> Option<(&PluginManifest, &CommandDecl)> {
        let owner = self.command_index.get(command_id)?;
        let manifest = self.entries.get(owner)?;
        let command = manifest
            .commands
            .iter()
            .find(|command| command.id == command_id)?;
        Some((manifest, command))
    }

    /// Plugins declaring a given capability, in id order.
    pub fn list_by_capability(&self, capability: RuntimeCapability) -> Vec<&PluginManifest> {
        self.entries
            .values()
            .filter(|manifest| manifest.capabilities.contains(&capability))
            .collect()
    }
}

/// Manifests of the three first-party plugins.
pub fn builtin_manifests() -> Vec<PluginManifest> {
    vec![
        PluginManifest {
            id: "builtin.grammar.corrector".to_string(),
            version: "0.2.0".to_string(),
            capabilities: vec![
                RuntimeCapability::Network,
                RuntimeCapability::Editor,
                RuntimeCapability::Notification,
            ],
            commands: vec![CommandDecl::new("correct-grammar", "Correct grammar and typos")],
            view: None,
        },
        PluginManifest {
            id: "builtin.title.assistant".to_string(),
            version: "0.2.0".to_string(),
            capabilities: vec![
                RuntimeCapability::Network,
                RuntimeCapability::File,
                RuntimeCapability::Notification,
            ],
            commands: vec![
                CommandDecl::new("generate-title", "Generate title from content"),
                CommandDecl::new("correct-title", "Correct title typos"),
            ],
            view: None,
        },
        PluginManifest {
            id: "builtin.project.board".to_string(),
            version: "0.2.0".to_string(),
            capabilities: vec![RuntimeCapability::File, RuntimeCapability::Notification],
            commands: vec![CommandDecl::new("open-project-board", "Open Project Board")],
            view: Some(ViewDecl {
                id: "project-board-view".to_string(),
                display_name: "Project Board".to_string(),
            }),
        },
    ]
}

/// Registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidManifest(ManifestError),
    DuplicatePluginId(String),
    /// Another plugin already contributed this command id.
    CommandIdTaken { command_id: String, owner: String },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidManifest(err) => write!(f, "invalid plugin manifest: {err}"),
            Self::DuplicatePluginId(value) => write!(f, "plugin id already registered: {value}"),
            Self::CommandIdTaken { command_id, owner } => {
                write!(f, "command id {command_id} is already owned by {owner}")
            }
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidManifest(err) => Some(err),
            _ => None,
        }
    }
}
