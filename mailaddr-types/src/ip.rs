//! IP address literal validation.
//!
//! Covers the two `domain-literal` bodies permitted in eMail addresses:
//! dotted-quad IPv4 and `IPv6:`-tagged IPv6. The General-address-literal
//! syntax of RFC 5321 is not recognised, as no use for it is specified yet.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::utils::{is, IS_DIGIT, IS_XDIGIT};

/// A candidate IP address, IPv4 or IPv6.
///
/// # ABNF definition
///
/// ```abnf
/// IPv4-address-literal = Snum 3("." Snum)
/// Snum                 = 1*3DIGIT
/// IPv6-addr            = IPv6-full / IPv6-comp / IPv6v4-full / IPv6v4-comp
/// ```
///
/// Zone identifiers (RFC 4007 `%25…`) are special local use only and are
/// rejected.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IpAddress {
    text: String,
}

impl IpAddress {
    /// Longest accepted input, in codepoints (an IPv6 address with an
    /// embedded dotted-quad, fully spelled out).
    pub const MAX_INPUT: usize = 45;

    /// Wraps an address candidate for validation.
    ///
    /// Returns `None` if the input exceeds [`IpAddress::MAX_INPUT`].
    pub fn of(text: &str) -> Option<Self> {
        if text.chars().count() > Self::MAX_INPUT {
            return None;
        }

        Some(Self {
            text: text.to_owned(),
        })
    }

    /// Returns a reference to the inner value.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parses the wrapped text as dotted-quad IPv4.
    pub fn v4(&self) -> Option<Ipv4Addr> {
        parse_v4(&self.text)
    }

    /// Parses the wrapped text as IPv6.
    pub fn v6(&self) -> Option<Ipv6Addr> {
        parse_v6(&self.text)
    }

    /// Parses the wrapped text as either address family, trying IPv4 first.
    pub fn from(&self) -> Option<IpAddr> {
        self.v4()
            .map(IpAddr::V4)
            .or_else(|| self.v6().map(IpAddr::V6))
    }
}

/// Decides whether a bracketed `domain-literal` is a valid address literal:
/// `[IPv6:` *IPv6-addr* `]` or `[` *IPv4-address-literal* `]`.
///
/// The `IPv6:` tag is matched case-sensitively, as written in RFC 5321.
pub fn is_address_literal(text: &str) -> bool {
    let Some(body) = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return false;
    };

    match body.strip_prefix("IPv6:") {
        Some(v6) => IpAddress::of(v6).map_or(false, |ip| ip.v6().is_some()),
        None => IpAddress::of(body).map_or(false, |ip| ip.v4().is_some()),
    }
}

pub(crate) fn parse_v4(text: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut groups = text.split('.');

    for octet in octets.iter_mut() {
        let group = groups.next()?;

        if group.is_empty() || group.len() > 3 {
            return None;
        }
        if !group.chars().all(|c| is(c, IS_DIGIT)) {
            return None;
        }
        // "0" is the only group that may begin with a zero
        if group.len() > 1 && group.starts_with('0') {
            return None;
        }

        *octet = group.parse().ok()?;
    }

    if groups.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

pub(crate) fn parse_v6(text: &str) -> Option<Ipv6Addr> {
    // zone identifiers are rejected outright
    if text.contains('%') {
        return None;
    }

    let (head, tail) = match text.find("::") {
        Some(at) => {
            let tail = &text[at + 2..];
            if tail.contains("::") {
                return None;
            }

            (&text[..at], Some(tail))
        }
        None => (text, None),
    };

    // an embedded dotted-quad may only stand in for the final two groups
    let front = parse_v6_groups(head, tail.is_none())?;
    let back = match tail {
        Some(tail) => parse_v6_groups(tail, true)?,
        None => Vec::new(),
    };

    let mut segments = [0u16; 8];
    let total = front.len() + back.len();

    match tail {
        None if total == 8 => {
            segments.copy_from_slice(&front);
        }
        // "::" stands for at least one all-zero group
        Some(_) if total < 8 => {
            segments[..front.len()].copy_from_slice(&front);
            segments[8 - back.len()..].copy_from_slice(&back);
        }
        _ => return None,
    }

    Some(Ipv6Addr::from(segments))
}

// Parses one colon-separated run of IPv6 groups. An empty run yields no
// groups; `v4_tail` permits the final group to be a dotted-quad counting
// as two.
fn parse_v6_groups(part: &str, v4_tail: bool) -> Option<Vec<u16>> {
    if part.is_empty() {
        return Some(Vec::new());
    }

    let pieces: Vec<&str> = part.split(':').collect();
    let mut groups = Vec::with_capacity(pieces.len() + 1);

    for (i, piece) in pieces.iter().enumerate() {
        if v4_tail && i == pieces.len() - 1 && piece.contains('.') {
            let octets = parse_v4(piece)?.octets();

            groups.push(u16::from_be_bytes([octets[0], octets[1]]));
            groups.push(u16::from_be_bytes([octets[2], octets[3]]));
        } else {
            groups.push(hex_group(piece)?);
        }
    }

    Some(groups)
}

fn hex_group(piece: &str) -> Option<u16> {
    if piece.is_empty() || piece.len() > 4 {
        return None;
    }
    if !piece.chars().all(|c| is(c, IS_XDIGIT)) {
        return None;
    }

    u16::from_str_radix(piece, 16).ok()
}
