//! Configuration system for bednight.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from these sources, highest precedence first:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`BEDNIGHT_*`)
//! 3. `{data_dir}/config.yaml`
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use bednight::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir("/var/lib/bednight")
//!     .build()
//!     .unwrap();
//!
//! println!("holds last {} minutes", config.hold_minutes());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_HOLD_MINUTES, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
