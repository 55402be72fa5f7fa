//! Deterministic directive rendering.
//!
//! Substitution is purely textual; field values land in the line
//! verbatim, so callers validate content before rendering.

use crate::error::{OverrideError, Result};
use crate::record::{Field, RecordType};

/// Renders the directive line for `record_type`, resolving each
/// `${field}` placeholder through `value_of`.
///
/// Identical field values always yield an identical line. The rendered
/// line carries no trailing newline; the store appends one on write.
///
/// # Errors
///
/// Returns [`OverrideError::Validation`] naming the first placeholder
/// with no field value.
pub fn render<'a>(
    record_type: RecordType,
    value_of: impl Fn(Field) -> Option<&'a str>,
) -> Result<String> {
    let template = record_type.template();
    let mut line = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        line.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated placeholder cannot occur in the registry's
            // templates; treat it as a missing field rather than panic.
            return Err(OverrideError::Validation(format!(
                "Error: Missing variable - '{after}'"
            )));
        };
        let name = &after[..end];
        let value = Field::by_name(name).and_then(&value_of).ok_or_else(|| {
            OverrideError::Validation(format!("Error: Missing variable - '{name}'"))
        })?;
        line.push_str(value);
        rest = &after[end + 1..];
    }
    line.push_str(rest);
    Ok(line)
}
