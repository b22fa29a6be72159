// src/config/mod.rs

//! Configuration loading and validation for devreload.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate invariants like a non-empty watch set (`validate.rs`).
//! - Resolve the validated config into absolute paths (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, DevelopmentSection, RawConfigFile};
pub use settings::{ReloadSettings, resolve_base_dir};
pub use validate::validate_config;
