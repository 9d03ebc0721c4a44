//! Structured, non-fatal warnings.
//!
//! A [`Warning`] carries a kind (base, deprecation, pending deprecation,
//! stability), a fixed classification code, a message that is either given
//! literally or composed from a [`WarningInit`] field-set, optional data and
//! an optional cause. Warnings are registered with a [`WarningRegistry`] (or
//! the process-wide one via [`warn`]) and queried later.
//!
//! ```
//! use warnkit_core::{warn, get_warnings, Warning, WarningInit, WarningKind, WarningFilter};
//!
//! let w = Warning::deprecation(WarningInit::new().feature_name("api.query"));
//! assert_eq!(w.message(), r#"The feature "api.query" has been deprecated."#);
//!
//! warn(w);
//! let found = get_warnings(Some(&WarningFilter::Kind(WarningKind::Deprecation)));
//! assert!(!found.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod kind;
pub mod message;
pub mod registry;
pub mod warning;

pub use config::HelpUrlConfig;
pub use error::WarnError;
pub use kind::WarningKind;
pub use message::{compose, Field, WarningInit};
pub use registry::{
    get_warnings, global, group_warnings, warn, WarningFilter, WarningGroups, WarningRegistry,
};
pub use warning::{parse_warnings, Cause, CauseSummary, Warning, WarningReport, WarningSpec};
