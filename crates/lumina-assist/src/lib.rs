//! lumina-assist - Dataset chat and insight analysis
//!
//! Bridges a lumina dataset to any text-completion backend. The backend is
//! a [`ReasoningService`]; the [`Assistant`] bounds what it is shown, splits
//! chart suggestions out of its replies and turns every failure into a
//! fallback answer.
//!
//! # Features
//!
//! - `providers`: [`LlmService`], hosted backends through graniet/llm

pub mod assistant;
pub mod context;
pub mod error;
pub mod reply;

#[cfg(feature = "providers")]
pub mod provider;

pub use assistant::*;
pub use context::*;
pub use error::*;
pub use reply::*;

#[cfg(feature = "providers")]
pub use provider::{supported_providers, LlmService};
