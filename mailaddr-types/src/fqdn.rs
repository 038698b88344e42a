//! Fully-qualified domain name validation.

use crate::utils::{is, IS_ALNUM, IS_ALNUS, IS_ALPHA};

/// A candidate fully-qualified domain name ("domain" production) for use in
/// eMail.
///
/// Only syntax is checked; whether the name resolves in DNS is out of scope.
///
/// # ABNF definition
///
/// ```abnf
/// domain      = sub-domain *("." sub-domain)
/// sub-domain  = Let-dig [Ldh-str Let-dig]
/// ```
///
/// with the stricter RFC 1035 rule that a label begins with a letter, and
/// the RFC 5321 length limits on labels and the whole name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Fqdn {
    text: String,
}

impl Fqdn {
    /// Longest accepted input, in codepoints (the RFC 5321 Forward-path
    /// limit).
    pub const MAX_INPUT: usize = 254;
    /// Longest valid domain name, in octets, ignoring a root dot.
    pub const MAX_DOMAIN: usize = 253;
    /// Longest valid label, in octets.
    pub const MAX_LABEL: usize = 63;

    /// Wraps a hostname for validation.
    ///
    /// Returns `None` if the input exceeds [`Fqdn::MAX_INPUT`].
    pub fn of(hostname: &str) -> Option<Self> {
        if hostname.chars().count() > Self::MAX_INPUT {
            return None;
        }

        Some(Self {
            text: hostname.to_owned(),
        })
    }

    /// Returns a reference to the inner value.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Decides whether the wrapped text is a syntactically valid domain
    /// name.
    ///
    /// A single label is accepted; callers that need a dot in the name must
    /// impose that themselves. One trailing dot (the root indicator) is
    /// ignored.
    pub fn is_domain(&self) -> bool {
        let name = self.text.strip_suffix('.').unwrap_or(&self.text);

        if name.is_empty() || name.len() > Self::MAX_DOMAIN {
            return false;
        }

        name.split('.').all(label_ok)
    }

    /// Shorthand for `Fqdn::of(hostname)` followed by [`Fqdn::is_domain`].
    pub fn valid(hostname: &str) -> bool {
        Self::of(hostname).map_or(false, |fqdn| fqdn.is_domain())
    }
}

fn label_ok(label: &str) -> bool {
    if label.is_empty() || label.len() > Fqdn::MAX_LABEL {
        return false;
    }
    if !label.chars().all(|c| is(c, IS_ALNUS)) {
        return false;
    }

    let first = label.chars().next();
    let last = label.chars().next_back();

    matches!(first, Some(c) if is(c, IS_ALPHA)) && matches!(last, Some(c) if is(c, IS_ALNUM))
}
