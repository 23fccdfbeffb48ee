//! Logging utilities.
//!
//! Logger initialization plus the bridge that re-emits log records coming
//! from a loaded UI module through the host's `log` facade.

mod init;

pub use init::{init_logging, module_log, LoggingConfig, MODULE_LOG_TARGET};
