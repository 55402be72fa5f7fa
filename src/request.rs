//! Inbound request parameters.
//!
//! The transport layer (out of scope here) extracts named parameters and
//! hands them over as a [`Params`] value, built once per request and
//! never mutated afterwards.

use std::str::FromStr;

use crate::record::Field;

/// Operation requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Render and append a new directive.
    Add,
    /// Delete an existing directive by exact match.
    Remove,
    /// Replace an existing directive by exact match.
    Edit,
    /// Query the resolver's live override state.
    List,
}

impl FromStr for Action {
    type Err = ();

    /// Case-insensitive: the boundary uppercases before matching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADD" => Ok(Self::Add),
            "REMOVE" => Ok(Self::Remove),
            "EDIT" => Ok(Self::Edit),
            "LIST" => Ok(Self::List),
            _ => Err(()),
        }
    }
}

/// The named parameters of one request, all optional at this layer.
///
/// Which ones must be present depends on the action and the matched
/// record-type contract; the dispatcher enforces that. `ttl` is accepted
/// for interface compatibility and referenced by no template.
#[derive(Debug, Clone, Default)]
pub struct Params {
    pub action: Option<String>,
    pub content_type: Option<String>,
    pub record_type: Option<String>,
    pub domain_name: Option<String>,
    pub value: Option<String>,
    pub priority: Option<String>,
    pub zone_type: Option<String>,
    pub remove_line: Option<String>,
    pub new_line: Option<String>,
    pub text: Option<String>,
    pub ttl: Option<String>,
    pub pointer_domain: Option<String>,
    pub nameserver: Option<String>,
    pub alias_name: Option<String>,
    pub mname: Option<String>,
    pub rname: Option<String>,
    pub serial: Option<String>,
    pub refresh: Option<String>,
    pub retry: Option<String>,
    pub expire: Option<String>,
    pub minimum: Option<String>,
}

impl Params {
    /// Resolves a contract field to its supplied value.
    ///
    /// Empty strings count as absent, so a blank form field fails the
    /// mandatory-presence check the same way a missing one does.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::DomainName => &self.domain_name,
            Field::Value => &self.value,
            Field::Priority => &self.priority,
            Field::ZoneType => &self.zone_type,
            Field::Text => &self.text,
            Field::PointerDomain => &self.pointer_domain,
            Field::Nameserver => &self.nameserver,
            Field::AliasName => &self.alias_name,
            Field::Mname => &self.mname,
            Field::Rname => &self.rname,
            Field::Serial => &self.serial,
            Field::Refresh => &self.refresh,
            Field::Retry => &self.retry,
            Field::Expire => &self.expire,
            Field::Minimum => &self.minimum,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_parse_is_case_insensitive() {
        assert_eq!("add".parse(), Ok(Action::Add));
        assert_eq!("LIST".parse(), Ok(Action::List));
        assert_eq!("Edit".parse(), Ok(Action::Edit));
        assert!("DROP".parse::<Action>().is_err());
    }

    #[test]
    fn empty_field_counts_as_absent() {
        let params = Params {
            domain_name: Some(String::new()),
            value: Some("10.0.0.1".into()),
            ..Params::default()
        };
        assert_eq!(params.field(Field::DomainName), None);
        assert_eq!(params.field(Field::Value), Some("10.0.0.1"));
        assert_eq!(params.field(Field::Text), None);
    }
}
