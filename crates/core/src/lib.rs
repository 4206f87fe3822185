//! Export discovery for composable parts.
//!
//! ```text
//! TypeInspector            →  entry point, one call per candidate type
//!       │
//!       ├── metadata       →  merges annotation values per export
//!       └── compat         →  contract checks over the type hierarchy
//!                 │
//!                 ▼
//!            Hierarchy     →  base chain + interfaces with substitution
//! ```

pub mod closing;
pub mod compat;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod inspector;
pub mod logging;
pub mod metadata;
pub mod registry;

pub use closing::close_generic_part;
pub use compat::CompatibilityChecker;
pub use config::{InspectorConfig, LoggingConfig};
pub use error::{ConfigError, Result};
pub use hierarchy::{Hierarchy, Substitution};
pub use inspector::{InspectionReport, TypeInspector};
pub use logging::init_logging;
pub use registry::{AttributeTable, TypeDecl, TypeRegistry};
