//! Configuration management for studium-ai.
//!
//! This module provides types and functions for loading and managing
//! studium-ai configuration.
//!
//! # Configuration File Format
//!
//! Configuration is stored in TOML format. The search order is:
//! 1. `./studium-ai.toml` (project-local)
//! 2. `~/.config/studium-ai/config.toml` (XDG config)
//!
//! # Example Configuration
//!
//! ```toml
//! [plugin]
//! # Mode sent to plugins in INIT_DATA: "manual" or "auto"
//! default_mode = "manual"
//!
//! [context]
//! # Messages returned when a tool call omits the limit
//! default_limit = 10
//! # Largest limit a tool call may request
//! max_limit = 50
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use studium_ai::config;
//!
//! // Load from default search paths
//! let config = config::load()?;
//!
//! // Load from a specific path
//! let config = config::from_path(Path::new("/etc/studium-ai/config.toml"))?;
//! ```

mod file;
mod types;

// Re-export file loading functions
pub use file::{from_path, from_str, load, search_paths, xdg_config_dir};

// Re-export types
pub use types::{ContextConfig, PluginConfig, StudiumConfig};
