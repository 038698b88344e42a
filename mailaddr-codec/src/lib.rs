//! # RFC 5322/5321 eMail address parsing
//!
//! mailaddr-codec decides whether a UTF-8 string conforms to one of the
//! RFC 5322 address productions (addr-spec, mailbox, address, mailbox-list,
//! address-list) and returns a structured decomposition when it does. It is
//! based on [mailaddr-types] and extends it with a backtracking
//! recursive-descent parser.
//!
//! Parsing and validation are separate steps: a syntactically well-formed
//! address with, say, an overlong local-part still parses, and carries
//! `valid == false` in the returned tree. A string that does not match the
//! grammar at all (or not in its entirety) yields `None`.
//!
//! ## Example
//!
//! ```rust
//! use mailaddr_codec::Path;
//!
//! let mut path = Path::of("\"John Doe\" <jdoe@example.com>").unwrap();
//! let sender = path.for_sender(false).unwrap();
//!
//! assert!(sender.is_valid());
//! assert_eq!(sender.to_string(), "\"John Doe\" <jdoe@example.com>");
//! ```
//!
//! Domain names and IP address literals can also be checked on their own
//! through the [`fqdn`](mailaddr_types::fqdn) and
//! [`ip`](mailaddr_types::ip) modules of the re-exported types crate.
//!
//! [mailaddr-types]: mailaddr_types

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]

// Test examples from the repository README.
#[doc = include_str!("../../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

pub mod cursor;
pub mod path;
pub mod txn;

pub use path::Path;
// Re-export.
pub use mailaddr_types;
