//! # unbound-local
//!
//! Manage Unbound `local-zone:` / `local-data:` override directives with
//! verified reloads.
//!
//! Unbound serves local overrides from directive lines in its drop-in
//! configuration (`local_data.conf` for record overrides,
//! `local_zones.conf` for zone policies). This crate renders those
//! directives from per-record-type contracts, validates the inputs,
//! applies exact-match line-level mutations, and then re-checks the
//! configuration and reloads the service so the change takes effect.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use unbound_local::{OverrideManager, Params};
//!
//! let manager = OverrideManager::new();
//!
//! // Add an A record override.
//! let outcome = manager.dispatch(&Params {
//!     action: Some("ADD".into()),
//!     content_type: Some("data".into()),
//!     record_type: Some("A".into()),
//!     domain_name: Some("host.example.com".into()),
//!     value: Some("10.0.0.5".into()),
//!     ..Params::default()
//! });
//! assert_eq!(outcome.status, 200);
//!
//! // Remove it again by its logical content.
//! manager.dispatch(&Params {
//!     action: Some("REMOVE".into()),
//!     content_type: Some("data".into()),
//!     remove_line: Some("host.example.com. 3600 IN A 10.0.0.5".into()),
//!     ..Params::default()
//! });
//! ```
//!
//! ## Change lifecycle
//!
//! Every ADD/REMOVE/EDIT validates its input first, mutates the directive
//! file second, and only then runs `unbound-checkconf` followed by a
//! service restart. A failing check leaves the mutated file in place and
//! reports the failure; callers resubmit or correct the line. The
//! directive files themselves are provisioned externally; this crate
//! never creates or deletes them, and lines it did not render are
//! preserved byte-for-byte.
//!
//! ## Verification
//!
//! Inspect the live override state with:
//!
//! ```bash
//! unbound-control list_local_data
//! unbound-control list_local_zones
//! ```
//!
//! (the same queries the LIST action issues).
//!
//! ## Permissions
//!
//! Writing to `/etc/unbound/unbound.conf.d/` and restarting the service
//! require root. The caller is responsible for privilege elevation
//! (`sudo`, a systemd unit, a management daemon, etc.).

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod manager;
pub mod record;
pub mod reload;
pub mod request;
pub mod store;
pub mod template;
pub mod validate;

pub use error::{OverrideError, Result};
pub use manager::{Applied, Outcome, OverrideManager};
pub use record::{ContentClass, Field, RecordType, ZoneType};
pub use reload::{CommandRunner, Reloader, SystemRunner};
pub use request::{Action, Params};
pub use store::DirectiveStore;
