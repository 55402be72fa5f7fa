//! Input validators: domain-name syntax, per-type address syntax, zone
//! kinds, and numeric ranges.
//!
//! Validators assume the dispatcher has already checked that the
//! contract's mandatory fields are present; they only judge content.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{OverrideError, Result};
use crate::record::{RecordType, ZoneType};

/// Checks a dotted domain name.
///
/// Each non-final label is 1–63 alphanumeric or hyphen characters and
/// must not start with a hyphen; the final label is alphabetic of length
/// 2–63. At least two labels are required.
#[must_use]
pub fn domain(name: &str) -> bool {
    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    if !(2..=63).contains(&tld.len()) || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    rest.iter().all(|label| {
        (1..=63).contains(&label.len())
            && !label.starts_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// Checks an MX priority: decimal digits only, in `[0, 65535]`.
#[must_use]
pub fn priority(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| c.is_ascii_digit())
        && value.parse::<u32>().is_ok_and(|n| n <= 65_535)
}

/// Checks a zone kind against the closed set of `local-zone:` policies.
#[must_use]
pub fn zone_type(value: &str) -> bool {
    value.parse::<ZoneType>().is_ok()
}

/// Validates an address value for an address-bearing record type.
///
/// A requires IPv4, AAAA requires IPv6, MX accepts either. Any other
/// record type reaching this validator is a contract violation.
///
/// # Errors
///
/// Returns [`OverrideError::Validation`] describing the rejected value.
pub fn address(record_type: RecordType, value: &str) -> Result<()> {
    let ok = match record_type {
        RecordType::A => value.parse::<Ipv4Addr>().is_ok(),
        RecordType::Aaaa => value.parse::<Ipv6Addr>().is_ok(),
        RecordType::Mx => value.parse::<IpAddr>().is_ok(),
        _ => {
            return Err(OverrideError::Validation(format!(
                "Invalid IP address for {record_type} record."
            )));
        }
    };
    if ok {
        Ok(())
    } else {
        Err(OverrideError::Validation(format!(
            "Invalid IP address: {value}"
        )))
    }
}

/// Validates a PTR record's two-part address contract.
///
/// The name being resolved to must NOT itself be an IP address, and the
/// reverse-lookup key must parse as IPv4 or IPv6.
///
/// # Errors
///
/// Returns [`OverrideError::Validation`] naming the offending field.
pub fn ptr(domain_name: &str, pointer_domain: &str) -> Result<()> {
    if domain_name.parse::<IpAddr>().is_ok() {
        return Err(OverrideError::Validation(format!(
            "Error: PTR record cannot have an IP address as domain name ({domain_name})"
        )));
    }
    if pointer_domain.trim().parse::<IpAddr>().is_err() {
        return Err(OverrideError::Validation(format!(
            "Error: PTR record requires a valid IPv4 or IPv6 address as pointer domain \
             ({pointer_domain})"
        )));
    }
    Ok(())
}
