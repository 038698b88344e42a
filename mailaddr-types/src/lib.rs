//! # eMail address types
//!
//! mailaddr-types provides the value types produced by parsing RFC 5322
//! address header content: [`AddrSpec`](address::AddrSpec),
//! [`Address`](address::Address), and [`AddressList`](address::AddressList),
//! together with the post-parse validators that decide whether a parsed
//! address is actually deliverable syntax: [`Fqdn`](fqdn::Fqdn) for domain
//! names and [`IpAddress`](ip::IpAddress) for the two permitted
//! `domain-literal` forms.
//!
//! The types are deliberately dumb: every instance is the immutable result of
//! one parse (see the mailaddr-codec crate) and carries its validation
//! verdict in a `valid` flag. Parse failure and validation failure are kept
//! apart so that callers can log the specific bad recipients of a list
//! instead of rejecting the whole list.
//!
//! ## Example
//!
//! ```rust
//! use mailaddr_types::{fqdn::Fqdn, ip::IpAddress};
//!
//! assert!(Fqdn::valid("mail.example.org"));
//! assert!(!Fqdn::valid("-bad.example"));
//!
//! let ip = IpAddress::of("2001:db8::1").unwrap();
//! assert!(ip.v6().is_some());
//! assert!(ip.v4().is_none());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]

pub mod address;
pub mod core;
pub mod fqdn;
pub mod ip;
pub mod utils;
