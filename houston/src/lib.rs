//! Houston: uniform application error records.
//!
//! Builds flat error records either from a predefined catalog entry or ad
//! hoc, strips empty fields, logs each record and broadcasts it on a
//! process-wide channel so decoupled parts of the application can react.
//!
//! - [`record`]: the [`ErrorRecord`] model and field classification
//! - [`validate`]: the string-or-structured field gate
//! - [`clean`]: removal of empty fields
//! - [`channel`]: the `weHaveAProblem` broadcast channel
//! - [`sink`]: where produced records are logged
//! - [`builder`]: the [`Houston`] facade tying it all together
//!
//! # Example
//!
//! ```ignore
//! use houston::{CatalogEntry, CatalogOptions, ErrorChannel, Houston};
//!
//! let channel = ErrorChannel::new();
//! channel.subscribe(|record| {
//!     eprintln!("problem: {record}");
//!     Ok(())
//! });
//!
//! let houston = Houston::new(channel.clone());
//! let entry = CatalogEntry::new(404, "Not Found").with_name("NOT_FOUND");
//! let record = houston.from_catalog(&entry, CatalogOptions::new().message("no such user"));
//! assert_eq!(record.message(), Some("no such user"));
//! ```

pub mod builder;
pub mod catalog;
pub mod channel;
pub mod clean;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod sink;
pub mod validate;

pub use builder::{CatalogOptions, CustomOptions, Houston};
pub use catalog::CatalogEntry;
pub use channel::{CHANNEL_NAME, EmitReport, ErrorChannel, ErrorEvent, SubscriptionId};
pub use clean::clean_record;
pub use config::HoustonConfig;
pub use error::{HoustonError, Result};
pub use record::{ErrorRecord, FieldValue};
pub use sink::{ErrorSink, NoopSink, TracingSink};
pub use validate::validate_field;
