//! Address header content: addr-spec, mailbox, group, and their lists.

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{core::Substring, fqdn::Fqdn, ip};

/// An addr-spec (bare eMail address), comprised of local-part and domain.
///
/// # ABNF definition
///
/// ```abnf
/// addr-spec  = local-part "@" domain
/// local-part = dot-atom / quoted-string
/// domain     = dot-atom / domain-literal
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AddrSpec {
    local_part: Substring,
    domain: Substring,
    valid: bool,
}

impl AddrSpec {
    /// Longest valid local-part, in octets (RFC 5321 §4.5.3.1.1).
    pub const MAX_LOCAL_PART: usize = 64;
    /// Longest valid domain, in octets (RFC 5321 §4.5.3.1.2).
    pub const MAX_DOMAIN: usize = 255;

    /// Assembles an addr-spec from its parsed constituents and validates it.
    ///
    /// `valid` becomes true iff the local-part and domain respect the
    /// RFC 5321 length limits and the domain is either a syntactically
    /// valid domain name or a bracketed IPv4/IPv6 address literal.
    pub fn new(local_part: Substring, domain: Substring) -> Self {
        let valid = local_part.as_str().len() <= Self::MAX_LOCAL_PART
            && domain.as_str().len() <= Self::MAX_DOMAIN
            && domain_valid(domain.as_str());

        Self {
            local_part,
            domain,
            valid,
        }
    }

    /// The local-part in its wire representation, dot-atom or
    /// quoted-string, surrounding CFWS excluded.
    pub fn local_part(&self) -> &Substring {
        &self.local_part
    }

    /// The domain, either dot-atom (`host.example.com`) or one of the two
    /// domain-literal forms (`[192.0.2.1]`, `[IPv6:2001:DB8::1]`),
    /// brackets included.
    pub fn domain(&self) -> &Substring {
        &self.domain
    }

    /// Whether this addr-spec survives post-parse validation (length
    /// limits, FQDN label syntax, address-literal syntax) on top of merely
    /// parsing as RFC 5322 addr-spec.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Display for AddrSpec {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

fn domain_valid(domain: &str) -> bool {
    if domain.starts_with('[') {
        ip::is_address_literal(domain)
    } else {
        Fqdn::valid(domain)
    }
}

/// A single address: a deliverable mailbox, or a named group of mailboxes.
///
/// The grammar never produces a group inside a group (`group-list` is built
/// from `mailbox-list`, not `address-list`), so `Group::members` holds
/// `Mailbox` values only; this is not defended at runtime.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Address {
    /// A mailbox, with the display-name of its name-addr form if present.
    Mailbox {
        label: Option<Substring>,
        addr_spec: AddrSpec,
    },
    /// A group; `label` is the mandatory display-name, `members` may be
    /// empty.
    Group {
        label: Substring,
        members: Vec<Address>,
    },
}

impl Address {
    /// Whether this address is a group rather than a mailbox.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    /// Whether all constituents are valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Mailbox { addr_spec, .. } => addr_spec.is_valid(),
            Self::Group { members, .. } => members.iter().all(Address::is_valid),
        }
    }

    /// The display-name, if one was given.
    pub fn label(&self) -> Option<&Substring> {
        match self {
            Self::Mailbox { label, .. } => label.as_ref(),
            Self::Group { label, .. } => Some(label),
        }
    }
}

impl Display for Address {
    /// Renders the mailbox or group as a non-wrapped string:
    /// `local-part@domain`, `label <local-part@domain>`, or
    /// `label: members;`.
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Mailbox {
                label: None,
                addr_spec,
            } => write!(f, "{addr_spec}"),
            Self::Mailbox {
                label: Some(label),
                addr_spec,
            } => write!(f, "{label} <{addr_spec}>"),
            Self::Group { label, members } if members.is_empty() => write!(f, "{label}:;"),
            Self::Group { label, members } => {
                write!(f, "{label}: {};", join(members.iter()))
            }
        }
    }
}

/// An address-list or mailbox-list.
///
/// Which of the two it is depends on the parser entry point that produced
/// it; a list without groups is indistinguishable from a mailbox-list.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AddressList {
    addresses: Vec<Address>,
    valid: bool,
    address_list: bool,
}

impl AddressList {
    /// Wraps the parsed members, computing the validity of the whole list.
    pub fn new(addresses: Vec<Address>) -> Self {
        let valid = !addresses.is_empty() && addresses.iter().all(Address::is_valid);
        let address_list = addresses.iter().any(Address::is_group);

        Self {
            addresses,
            valid,
            address_list,
        }
    }

    /// The member addresses, in input order.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Whether the list is non-empty and every member is valid.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether this is definitely an address-list, i.e. group addresses are
    /// present.
    pub fn is_address_list(&self) -> bool {
        self.address_list
    }

    /// Renders all invalid members as a `", "`-separated string, for error
    /// message construction. `None` when every member is valid.
    pub fn invalids_to_string(&self) -> Option<String> {
        if self.valid {
            return None;
        }

        Some(join(
            self.addresses.iter().filter(|address| !address.is_valid()),
        ))
    }

    /// Flattens the members into their formatted representations, see
    /// [`Address`]'s `Display`.
    pub fn flatten_addresses(&self) -> Vec<String> {
        self.addresses.iter().map(Address::to_string).collect()
    }

    /// Flattens the members into their individual addr-spec strings, for
    /// use by e.g. SMTP sending (Forward-path construction). Group members
    /// are unrolled.
    pub fn flatten_addr_specs(&self) -> Vec<String> {
        let mut specs = Vec::with_capacity(self.addresses.len());

        for address in &self.addresses {
            match address {
                Address::Mailbox { addr_spec, .. } => specs.push(addr_spec.to_string()),
                Address::Group { members, .. } => {
                    for member in members {
                        if let Address::Mailbox { addr_spec, .. } = member {
                            specs.push(addr_spec.to_string());
                        }
                    }
                }
            }
        }

        specs
    }
}

impl Display for AddressList {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&join(self.addresses.iter()))
    }
}

fn join<'a>(addresses: impl Iterator<Item = &'a Address>) -> String {
    addresses
        .map(|address| address.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
