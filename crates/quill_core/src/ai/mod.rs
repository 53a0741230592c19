//! AI command plugins: provider dispatch, grammar correction, title work.
//!
//! # Responsibility
//! - Turn one explicit configuration struct into a completion client bound
//!   to a single remote provider.
//! - Keep the provider wire formats inside their adapter modules.
//!
//! # Invariants
//! - Configuration is passed explicitly; there is no ambient settings state.
//! - One command invocation performs at most one blocking HTTP request; no
//!   retries, no streaming.
//! - Credentials never appear in log output.

pub mod anthropic;
pub mod config;
pub mod grammar;
pub mod ollama;
pub mod openai;
pub mod provider;
pub mod title;
