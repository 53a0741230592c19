//! Runtime capability declarations for plugin authorization gates.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Host resource a plugin must be granted before its commands run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuntimeCapability {
    /// Outbound HTTP to a configured completion provider.
    Network,
    /// Read/write access to vault documents.
    File,
    /// Posting user-visible notices.
    Notification,
    /// Replacing text in the active editor.
    Editor,
}

impl RuntimeCapability {
    /// Stable string id used in manifest declarations.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::File => "file",
            Self::Notification => "notification",
            Self::Editor => "editor",
        }
    }

    /// User-facing grant prompt description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Network => "Send note text to the configured AI provider over the network.",
            Self::File => "Read and write documents in the vault.",
            Self::Notification => "Show notices about command results.",
            Self::Editor => "Replace text in the currently open editor.",
        }
    }
}

/// Parses one capability from its manifest string value.
pub fn parse_runtime_capability(value: &str) -> Result<RuntimeCapability, CapabilityError> {
    match value.trim() {
        "" => Err(CapabilityError::Empty),
        "network" => Ok(RuntimeCapability::Network),
        "file" => Ok(RuntimeCapability::File),
        "notification" => Ok(RuntimeCapability::Notification),
        "editor" => Ok(RuntimeCapability::Editor),
        other => Err(CapabilityError::Unsupported(other.to_string())),
    }
}

/// Capability parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    Empty,
    Unsupported(String),
}

impl Display for CapabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "capability value must not be empty"),
            Self::Unsupported(value) => write!(f, "capability is unsupported: {value}"),
        }
    }
}

impl Error for CapabilityError {}

#[cfg(test)]
mod tests {
    use super::{parse_runtime_capability, CapabilityError, RuntimeCapability};

    #[test]
    fn parses_every_supported_capability() {
        for capability in [
            RuntimeCapability::Network,
            RuntimeCapability::File,
            RuntimeCapability::Notification,
            RuntimeCapability::Editor,
        ] {
            assert_eq!(
                parse_runtime_capability(capability.as_str()).unwrap(),
                capability
            );
        }
    }

    #[test]
    fn rejects_blank_and_unknown_values() {
        assert_eq!(
            parse_runtime_capability("  ").unwrap_err(),
            CapabilityError::Empty
        );
        assert_eq!(
            parse_runtime_capability("clipboard").unwrap_err(),
            CapabilityError::Unsupported("clipboard".to_string())
        );
    }

    #[test]
    fn rejects_case_variants() {
        assert!(matches!(
            parse_runtime_capability("Network"),
            Err(CapabilityError::Unsupported(_))
        ));
    }

    #[test]
    fn descriptions_name_the_guarded_resource() {
        assert!(RuntimeCapability::Network.description().contains("network"));
        assert!(RuntimeCapability::File.description().contains("vault"));
        assert!(RuntimeCapability::Editor.description().contains("editor"));
    }
}
