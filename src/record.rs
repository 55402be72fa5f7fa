//! Record-type contracts: field sets, render templates, and the closed
//! enums for content classes and zone kinds.
//!
//! Every contract's template references all and only that contract's
//! fields, so a rendered directive can later be located and removed by
//! exact textual match.

use std::fmt;
use std::str::FromStr;

/// Which directive file a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentClass {
    /// Individual record overrides (`local-data:` / `local-data-ptr:`).
    Data,
    /// Zone-level policy overrides (`local-zone:`).
    Zones,
}

impl ContentClass {
    /// File name of the directive file for this class.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Data => "local_data.conf",
            Self::Zones => "local_zones.conf",
        }
    }

    /// `unbound-control` subcommand listing the live state of this class.
    #[must_use]
    pub const fn list_command(self) -> &'static str {
        match self {
            Self::Data => "list_local_data",
            Self::Zones => "list_local_zones",
        }
    }
}

impl FromStr for ContentClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(Self::Data),
            "zones" => Ok(Self::Zones),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ContentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Data => "data",
            Self::Zones => "zones",
        })
    }
}

/// A DNS record kind managed by this crate, or the pseudo-kind
/// [`Zone`](Self::Zone) for zone-policy directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Mx,
    Txt,
    Ptr,
    Cname,
    Ns,
    Soa,
    Zone,
}

impl RecordType {
    /// The content class this record kind renders into.
    #[must_use]
    pub const fn content_class(self) -> ContentClass {
        match self {
            Self::Zone => ContentClass::Zones,
            _ => ContentClass::Data,
        }
    }

    /// Ordered required fields of this contract.
    ///
    /// The record kind itself is the contract key, not a field; each
    /// template bakes its own mnemonic in as a literal.
    #[must_use]
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::A | Self::Aaaa => &[Field::DomainName, Field::Value],
            Self::Mx => &[Field::DomainName, Field::Priority, Field::Value],
            Self::Txt => &[Field::DomainName, Field::Text],
            Self::Ptr => &[Field::PointerDomain, Field::DomainName],
            Self::Cname => &[Field::DomainName, Field::AliasName],
            Self::Ns => &[Field::DomainName, Field::Nameserver],
            Self::Soa => &[
                Field::DomainName,
                Field::Mname,
                Field::Rname,
                Field::Serial,
                Field::Refresh,
                Field::Retry,
                Field::Expire,
                Field::Minimum,
            ],
            Self::Zone => &[Field::DomainName, Field::ZoneType],
        }
    }

    /// Render template for this contract. Placeholders are `${field}`.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Zone => "local-zone: '${domain_name}.' '${zone_type}'",
            Self::A => "local-data: '${domain_name}. 3600 IN A ${value}'",
            Self::Aaaa => "local-data: '${domain_name}. 3600 IN AAAA ${value}'",
            Self::Mx => "local-data: '${domain_name}. 3600 IN MX ${priority} ${value}'",
            Self::Txt => "local-data: '${domain_name}. 3600 IN TXT \"${text}.\"'",
            Self::Ptr => "local-data-ptr: '${pointer_domain} ${domain_name}.'",
            Self::Cname => "local-data: '${domain_name}. 3600 IN CNAME ${alias_name}.'",
            Self::Ns => "local-data: '${domain_name}. 3600 IN NS ${nameserver}.'",
            Self::Soa => {
                "local-data: '${domain_name}. 3600 IN SOA ${mname} ${rname} \
                 ${serial} ${refresh} ${retry} ${expire} ${minimum}'"
            }
        }
    }

    /// Returns `true` if the record's value is an address validated per
    /// kind (A, AAAA, MX).
    #[must_use]
    pub const fn is_address_bearing(self) -> bool {
        matches!(self, Self::A | Self::Aaaa | Self::Mx)
    }
}

impl FromStr for RecordType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "PTR" => Ok(Self::Ptr),
            "CNAME" => Ok(Self::Cname),
            "NS" => Ok(Self::Ns),
            "SOA" => Ok(Self::Soa),
            "ZONE" => Ok(Self::Zone),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ptr => "PTR",
            Self::Cname => "CNAME",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Zone => "ZONE",
        })
    }
}

/// A named field a contract can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    DomainName,
    Value,
    Priority,
    ZoneType,
    Text,
    PointerDomain,
    Nameserver,
    AliasName,
    Mname,
    Rname,
    Serial,
    Refresh,
    Retry,
    Expire,
    Minimum,
}

impl Field {
    /// The field's wire name, as used in request parameters and
    /// template placeholders.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DomainName => "domain_name",
            Self::Value => "value",
            Self::Priority => "priority",
            Self::ZoneType => "zone_type",
            Self::Text => "text",
            Self::PointerDomain => "pointer_domain",
            Self::Nameserver => "nameserver",
            Self::AliasName => "alias_name",
            Self::Mname => "mname",
            Self::Rname => "rname",
            Self::Serial => "serial",
            Self::Refresh => "refresh",
            Self::Retry => "retry",
            Self::Expire => "expire",
            Self::Minimum => "minimum",
        }
    }

    /// Looks up a field by its wire name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        const ALL: [Field; 15] = [
            Field::DomainName,
            Field::Value,
            Field::Priority,
            Field::ZoneType,
            Field::Text,
            Field::PointerDomain,
            Field::Nameserver,
            Field::AliasName,
            Field::Mname,
            Field::Rname,
            Field::Serial,
            Field::Refresh,
            Field::Retry,
            Field::Expire,
            Field::Minimum,
        ];
        ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Zone policy kind accepted in `local-zone:` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneType {
    Deny,
    Refuse,
    Static,
    Transparent,
    Redirect,
    Nodefault,
    Typetransparent,
    Inform,
    InformDeny,
    InformRedirect,
    AlwaysTransparent,
    BlockA,
    AlwaysRefuse,
    AlwaysNxdomain,
    AlwaysNull,
    Noview,
}

impl FromStr for ZoneType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deny" => Ok(Self::Deny),
            "refuse" => Ok(Self::Refuse),
            "static" => Ok(Self::Static),
            "transparent" => Ok(Self::Transparent),
            "redirect" => Ok(Self::Redirect),
            "nodefault" => Ok(Self::Nodefault),
            "typetransparent" => Ok(Self::Typetransparent),
            "inform" => Ok(Self::Inform),
            "inform_deny" => Ok(Self::InformDeny),
            "inform_redirect" => Ok(Self::InformRedirect),
            "always_transparent" => Ok(Self::AlwaysTransparent),
            "block_a" => Ok(Self::BlockA),
            "always_refuse" => Ok(Self::AlwaysRefuse),
            "always_nxdomain" => Ok(Self::AlwaysNxdomain),
            "always_null" => Ok(Self::AlwaysNull),
            "noview" => Ok(Self::Noview),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_class_mapping() {
        assert_eq!(RecordType::Zone.content_class(), ContentClass::Zones);
        for rt in [
            RecordType::A,
            RecordType::Aaaa,
            RecordType::Mx,
            RecordType::Txt,
            RecordType::Ptr,
            RecordType::Cname,
            RecordType::Ns,
            RecordType::Soa,
        ] {
            assert_eq!(rt.content_class(), ContentClass::Data);
        }
    }

    #[test]
    fn parse_record_type() {
        assert_eq!("A".parse(), Ok(RecordType::A));
        assert_eq!("AAAA".parse(), Ok(RecordType::Aaaa));
        assert_eq!("ZONE".parse(), Ok(RecordType::Zone));
        assert!("SRV".parse::<RecordType>().is_err());
        assert!("a".parse::<RecordType>().is_err());
    }

    #[test]
    fn templates_reference_all_and_only_contract_fields() {
        for rt in [
            RecordType::A,
            RecordType::Aaaa,
            RecordType::Mx,
            RecordType::Txt,
            RecordType::Ptr,
            RecordType::Cname,
            RecordType::Ns,
            RecordType::Soa,
            RecordType::Zone,
        ] {
            let template = rt.template();
            for field in rt.fields() {
                assert!(
                    template.contains(&format!("${{{}}}", field.name())),
                    "{rt} template missing ${{{}}}",
                    field.name()
                );
            }
            // No placeholder outside the contract's field set.
            let mut rest = template;
            while let Some(start) = rest.find("${") {
                let end = rest[start..].find('}').expect("unterminated placeholder") + start;
                let name = &rest[start + 2..end];
                assert!(
                    rt.fields().iter().any(|f| f.name() == name),
                    "{rt} template references unknown field {name}"
                );
                rest = &rest[end + 1..];
            }
        }
    }

    #[test]
    fn zone_type_membership() {
        assert_eq!("static".parse(), Ok(ZoneType::Static));
        assert_eq!("inform_redirect".parse(), Ok(ZoneType::InformRedirect));
        assert!("Static".parse::<ZoneType>().is_err());
        assert!("blackhole".parse::<ZoneType>().is_err());
    }

    #[test]
    fn field_by_name_round_trips() {
        assert_eq!(Field::by_name("pointer_domain"), Some(Field::PointerDomain));
        assert_eq!(Field::by_name("ttl"), None);
    }
}
