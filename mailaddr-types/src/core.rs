//! Core data types.

use std::{
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A region of the parsed source string plus its materialised text.
///
/// `start` and `end` delimit the region in the byte offsets of the source the
/// parser ran over. The text is materialised separately because it is not
/// always the verbatim slice: folding white space is unfolded, and phrase
/// words are joined by a single space.
///
/// Equality and hashing consider the text only, so that a value parsed from
/// the canonical rendering of another value compares equal to it even though
/// the two come from different offsets.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq)]
pub struct Substring {
    start: usize,
    end: usize,
    text: String,
}

impl Substring {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Byte offset of the first codepoint of the region.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the region.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns a reference to the materialised text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the substring, returning the materialised text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl PartialEq for Substring {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Hash for Substring {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl AsRef<str> for Substring {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Display for Substring {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
