//! Configuration module for Xpens
//!
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::XpensPaths;
pub use settings::Settings;
