pub mod config;
pub mod error;
pub mod importer;
pub mod latency;
pub mod models;
pub mod responder;

pub use config::AssistantConfig;
pub use importer::PropertyImporter;
pub use models::{ImportOutcome, Platform, Property};
pub use responder::{ChatSimulator, KnowledgeBase};
