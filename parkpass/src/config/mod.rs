//! Layered configuration.
//!
//! Sources, highest precedence first:
//!
//! 1. Programmatic overrides ([`ConfigBuilder::with_config`]); the CLI maps
//!    its global flags here
//! 2. `PARKPASS_*` environment variables
//! 3. A configuration file named explicitly ([`ConfigBuilder::with_config_file`])
//! 4. `<data_dir>/config.yaml`
//! 5. Built-in defaults
//!
//! ```no_run
//! use parkpass::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir(Path::new("/srv/parkpass"))
//!     .build()
//!     .unwrap();
//! println!("lock wait: {:?}", config.lock_wait());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
