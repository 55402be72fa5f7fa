//! Request dispatch.
//!
//! [`OverrideManager`] is the per-request state machine: it matches the
//! record-type contract, runs the validators, renders the directive,
//! applies the line-level mutation, and verifies/activates the change.
//! All validation happens before any file mutation; a failed check or
//! reload happens after it and is not rolled back.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{OverrideError, Result};
use crate::record::{ContentClass, Field, RecordType};
use crate::reload::{CommandRunner, Reloader, SystemRunner};
use crate::request::{Action, Params};
use crate::store::DirectiveStore;
use crate::{template, validate};

/// Typed outcome of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A directive was rendered, appended, and activated.
    Added,
    /// A directive was removed and the change activated.
    Removed,
    /// A directive was replaced and the change activated.
    Edited,
    /// The live override state for the requested content class.
    Listed(Vec<String>),
}

impl Applied {
    /// Caller-facing success message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Added => "Record added successfully!".to_owned(),
            Self::Removed | Self::Edited => "Record updated successfully!".to_owned(),
            Self::Listed(lines) => lines.join("\n"),
        }
    }
}

/// Caller-facing result of one request: message plus status code
/// (200 success, 400 caller error, 500 internal failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Human-readable result or error text.
    pub message: String,
    /// HTTP-style status code.
    pub status: u16,
}

/// Orchestrates local override changes against one Unbound deployment.
///
/// # Concurrency
///
/// Mutating operations and the check/reload sequence they trigger are
/// serialized through one internal lock, so concurrent requests cannot
/// interleave whole-file rewrites or reload a half-written
/// configuration. LIST queries runtime state and takes no lock.
///
/// # Example
///
/// ```rust,ignore
/// use unbound_local::{OverrideManager, Params};
///
/// let manager = OverrideManager::new();
/// let outcome = manager.dispatch(&Params {
///     action: Some("ADD".into()),
///     content_type: Some("data".into()),
///     record_type: Some("A".into()),
///     domain_name: Some("host.example.com".into()),
///     value: Some("10.0.0.5".into()),
///     ..Params::default()
/// });
/// assert_eq!(outcome.status, 200);
/// ```
pub struct OverrideManager<R = SystemRunner> {
    store: DirectiveStore,
    reloader: Reloader<R>,
    mutate: Mutex<()>,
}

impl OverrideManager<SystemRunner> {
    /// Creates a manager over the default directive directory and the
    /// system command runner.
    #[must_use]
    pub fn new() -> Self {
        Self::with(DirectiveStore::new(), SystemRunner)
    }
}

impl Default for OverrideManager<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> OverrideManager<R> {
    /// Creates a manager over a custom store and command runner
    /// (useful for testing).
    #[must_use]
    pub fn with(store: DirectiveStore, runner: R) -> Self {
        Self {
            store,
            reloader: Reloader::new(runner),
            mutate: Mutex::new(()),
        }
    }

    /// Applies one request and reports the `(message, status)` pair.
    pub fn dispatch(&self, params: &Params) -> Outcome {
        match self.apply(params) {
            Ok(applied) => Outcome {
                message: applied.message(),
                status: 200,
            },
            Err(err) => Outcome {
                message: err.to_string(),
                status: err.status(),
            },
        }
    }

    /// Applies one request, returning the typed outcome.
    ///
    /// # Errors
    ///
    /// Any [`OverrideError`]; validation failures precede every file
    /// mutation, while [`Config`](OverrideError::Config) and
    /// [`Service`](OverrideError::Service) follow it.
    pub fn apply(&self, params: &Params) -> Result<Applied> {
        let action = params
            .action
            .as_deref()
            .unwrap_or("")
            .parse::<Action>()
            .map_err(|()| OverrideError::Validation("Invalid Action!".into()))?;
        let class = params
            .content_type
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .parse::<ContentClass>()
            .map_err(|()| OverrideError::Validation("Invalid Content Type".into()))?;

        match action {
            Action::List => Ok(Applied::Listed(self.reloader.list(class)?)),
            Action::Add => self.add(class, params),
            Action::Remove => self.remove(class, params),
            Action::Edit => self.edit(class, params),
        }
    }

    fn add(&self, class: ContentClass, params: &Params) -> Result<Applied> {
        let supplied = params.record_type.as_deref().unwrap_or("").to_uppercase();
        let record_type = supplied
            .parse::<RecordType>()
            .ok()
            .filter(|rt| rt.content_class() == class)
            .ok_or_else(|| OverrideError::UnknownCombination {
                record_type: supplied.clone(),
                content_class: class,
            })?;

        // Structural completeness before semantic checks.
        let missing: Vec<&str> = record_type
            .fields()
            .iter()
            .filter(|field| params.field(**field).is_none())
            .map(|field| field.name())
            .collect();
        if !missing.is_empty() {
            return Err(OverrideError::Validation(format!(
                "Missing parameter: {}",
                missing.join(", ")
            )));
        }

        let domain_name = params.field(Field::DomainName).unwrap_or_default();
        if !validate::domain(domain_name) {
            return Err(OverrideError::Validation(format!(
                "Invalid domain name '{domain_name}'"
            )));
        }
        if let Some(zone) = params.field(Field::ZoneType) {
            if !validate::zone_type(zone) {
                return Err(OverrideError::Validation("Unknown zone type!".into()));
            }
        }
        if let Some(priority) = params.field(Field::Priority) {
            if !validate::priority(priority) {
                return Err(OverrideError::Validation(
                    "Priority must be a number and must be between 0 and 65535.".into(),
                ));
            }
        }
        if record_type.is_address_bearing() {
            validate::address(record_type, params.field(Field::Value).unwrap_or_default())?;
        }
        if record_type == RecordType::Ptr {
            validate::ptr(
                domain_name,
                params.field(Field::PointerDomain).unwrap_or_default(),
            )?;
        }

        let line = template::render(record_type, |field| params.field(field))?;

        let _guard = self.lock();
        let path = self.store.append(class, &line)?;
        self.reloader.verify_and_activate(&path)?;
        tracing::debug!(record_type = %record_type, class = %class, "Add applied");
        Ok(Applied::Added)
    }

    fn remove(&self, class: ContentClass, params: &Params) -> Result<Applied> {
        let Some(line) = params.remove_line.as_deref().filter(|l| !l.is_empty()) else {
            return Err(OverrideError::Validation("Record cannot be empty!".into()));
        };

        let target = match class {
            ContentClass::Zones => {
                let parts: Vec<&str> = line.split_whitespace().collect();
                let [domain, zone] = parts.as_slice() else {
                    return Err(OverrideError::Validation("Invalid zone format!".into()));
                };
                format!("local-zone: '{domain}' '{zone}'")
            }
            ContentClass::Data => format!("local-data: '{line}'"),
        };

        let _guard = self.lock();
        let path = self.store.remove_exact(class, &target)?;
        self.reloader.verify_and_activate(&path)?;
        Ok(Applied::Removed)
    }

    fn edit(&self, class: ContentClass, params: &Params) -> Result<Applied> {
        let (Some(old), Some(new)) = (
            params.remove_line.as_deref().filter(|l| !l.is_empty()),
            params.new_line.as_deref().filter(|l| !l.is_empty()),
        ) else {
            return Err(OverrideError::Validation(
                "Old and new records cannot be empty!".into(),
            ));
        };

        let (current, replacement) = match class {
            ContentClass::Zones => {
                let old_parts: Vec<&str> = old.split_whitespace().collect();
                let new_parts: Vec<&str> = new.split_whitespace().collect();
                if old_parts.len() < 2 || new_parts.len() < 2 {
                    return Err(OverrideError::Validation("Invalid zone format!".into()));
                }
                (
                    format!("local-zone: '{}' '{}'", old_parts[0], old_parts[1]),
                    // The replacement is canonicalized toward the shape ADD
                    // renders, trailing period included; the old line is
                    // matched exactly as stored.
                    format!("local-zone: '{}.' '{}'", new_parts[0], new_parts[1]),
                )
            }
            ContentClass::Data => {
                let record_type = params
                    .record_type
                    .as_deref()
                    .map(str::to_uppercase)
                    .and_then(|s| s.parse::<RecordType>().ok());
                if let Some(rt) = record_type.filter(|rt| rt.is_address_bearing()) {
                    let tokens: Vec<&str> = new.split_whitespace().collect();
                    let Some(address) = tokens.last() else {
                        return Err(OverrideError::Validation("Invalid record format!".into()));
                    };
                    validate::address(rt, address)?;
                    if rt == RecordType::Mx {
                        let priority = tokens.len().checked_sub(2).and_then(|i| tokens.get(i));
                        if !priority.is_some_and(|p| validate::priority(p)) {
                            return Err(OverrideError::Validation(
                                "Priority must be a number and between 0 and 65535.".into(),
                            ));
                        }
                    }
                }
                (format!("local-data: '{old}'"), format!("local-data: '{new}'"))
            }
        };

        let _guard = self.lock();
        let path = self.store.replace_exact(class, &current, &replacement)?;
        self.reloader.verify_and_activate(&path)?;
        Ok(Applied::Edited)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.mutate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
