//! Line-level mutation of the on-disk directive files.
//!
//! One file per content class, provisioned externally; this module never
//! creates or deletes them. Mutations are whole-file: read everything,
//! compute the new contents in memory, write to a sibling temporary file,
//! and rename into place. Lines not targeted by an operation are
//! preserved byte-for-byte and in order.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{OverrideError, Result};
use crate::record::ContentClass;

/// Default Unbound drop-in configuration directory.
const DEFAULT_CONF_DIR: &str = "/etc/unbound/unbound.conf.d";

/// Manages the `local_data.conf` / `local_zones.conf` directive files.
///
/// Matching is by trimmed exact string equality only; it is not
/// template-aware, so two semantically equivalent lines that differ in
/// spacing or quoting will not match.
///
/// # Permissions
///
/// The production directory requires root. The caller must handle
/// elevation.
///
/// # Example
///
/// ```rust,ignore
/// use unbound_local::{ContentClass, DirectiveStore};
///
/// let store = DirectiveStore::new();
/// store.append(ContentClass::Data, "local-data: 'a.example.com. 3600 IN A 10.0.0.1'")?;
/// ```
pub struct DirectiveStore {
    conf_dir: PathBuf,
}

impl DirectiveStore {
    /// Creates a store targeting the default Unbound drop-in directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            conf_dir: PathBuf::from(DEFAULT_CONF_DIR),
        }
    }

    /// Creates a store targeting a custom directory (useful for testing).
    #[must_use]
    pub fn with_dir(conf_dir: impl Into<PathBuf>) -> Self {
        Self {
            conf_dir: conf_dir.into(),
        }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn conf_dir(&self) -> &Path {
        &self.conf_dir
    }

    /// Returns the directive file path for a content class.
    #[must_use]
    pub fn path(&self, class: ContentClass) -> PathBuf {
        self.conf_dir.join(class.file_name())
    }

    /// Appends one directive line to the class's file.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::NotFound`] if the file does not exist
    /// (files are provisioned externally, never created here), or
    /// [`OverrideError::Io`] on write failure.
    pub fn append(&self, class: ContentClass, line: &str) -> Result<PathBuf> {
        let path = self.path(class);
        if !path.exists() {
            return Err(OverrideError::NotFound(format!(
                "Configuration file '{}' does not exist.",
                path.display()
            )));
        }

        let mut file = std::fs::OpenOptions::new().append(true).open(&path)?;
        writeln!(file, "{line}")?;

        tracing::info!(
            class = %class,
            path = %path.display(),
            line = %line,
            "Appended local override directive"
        );
        Ok(path)
    }

    /// Removes every line trims-equal to `line` from the class's file.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::NotFound`] if the file is absent or no
    /// line matches (the file is left unmodified), or
    /// [`OverrideError::Io`] on rewrite failure.
    pub fn remove_exact(&self, class: ContentClass, line: &str) -> Result<PathBuf> {
        let path = self.path(class);
        let contents = self.read(&path)?;
        let target = line.trim();

        let mut removed = 0usize;
        let mut updated = String::with_capacity(contents.len());
        for fragment in contents.split_inclusive('\n') {
            if fragment.trim() == target {
                removed += 1;
            } else {
                updated.push_str(fragment);
            }
        }
        if removed == 0 {
            return Err(OverrideError::NotFound(format!("{line} not found!")));
        }

        rewrite(&path, &updated)?;
        tracing::info!(
            class = %class,
            path = %path.display(),
            line = %target,
            removed,
            "Removed local override directive"
        );
        Ok(path)
    }

    /// Replaces every line trims-equal to `old` with `new` verbatim,
    /// preserving position and all other lines.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::NotFound`] if the file is absent or no
    /// line matches (the file is left unmodified), or
    /// [`OverrideError::Io`] on rewrite failure.
    pub fn replace_exact(&self, class: ContentClass, old: &str, new: &str) -> Result<PathBuf> {
        let path = self.path(class);
        let contents = self.read(&path)?;
        let target = old.trim();

        let mut replaced = 0usize;
        let mut updated = String::with_capacity(contents.len());
        for fragment in contents.split_inclusive('\n') {
            if fragment.trim() == target {
                replaced += 1;
                updated.push_str(new);
                updated.push('\n');
            } else {
                updated.push_str(fragment);
            }
        }
        if replaced == 0 {
            return Err(OverrideError::NotFound(format!("{old} not found.")));
        }

        rewrite(&path, &updated)?;
        tracing::info!(
            class = %class,
            path = %path.display(),
            old = %target,
            new = %new,
            replaced,
            "Replaced local override directive"
        );
        Ok(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(OverrideError::NotFound(format!(
                "Error: Configuration file '{}' does not exist.",
                path.display()
            )));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

impl Default for DirectiveStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `contents` next to `path` and renames into place, so a crash
/// mid-write cannot truncate the live file.
fn rewrite(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("conf.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
