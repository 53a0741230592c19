//! Host-agnostic core for the quill plugin suite.
//!
//! Three plugins for a note-taking host: a grammar-correction command, a
//! title generation/correction command, and a project board panel whose
//! task store is the longest-lived state in the suite. The host is consumed
//! only through the narrow collaborator traits in [`host`].

pub mod ai;
pub mod board;
pub mod host;
pub mod logging;
pub mod model;
pub mod plugin;

pub use ai::config::{
    AiConfig, AnthropicConfig, OllamaConfig, OpenAiConfig, ProviderKind, ProviderKindError,
};
pub use ai::provider::{AiClient, AiError, CompletionProvider, CompletionRequest};
pub use ai::title::TitleCorrection;
pub use board::data::ProjectData;
pub use board::store::{AssociationError, StoreEvent, TaskStore};
pub use host::{DocumentIoError, DocumentStore, FsDocumentStore, LogNotifier, Notifier};
pub use logging::{default_log_level, init_logging};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use plugin::capability::RuntimeCapability;
pub use plugin::manifest::{CommandDecl, PluginManifest, ViewDecl};
pub use plugin::registry::{builtin_manifests, PluginRegistry, RegistryError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
