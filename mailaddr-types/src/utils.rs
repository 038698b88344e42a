//! Character classes used by the grammar and the validators.
//!
//! Membership is decided over a 128-entry bitmask table that is built once
//! and read-only afterwards. Codepoints at or above 128 are in no class.

use abnf_core::{is_alpha, is_digit};
use once_cell::sync::Lazy;

const F_ALPHA: u8 = 0x01;
const F_DIGIT: u8 = 0x02;
const F_HYPHN: u8 = 0x04;
const F_ATEXT: u8 = 0x08;
const F_QTEXT: u8 = 0x10;
const F_CTEXT: u8 = 0x20;
const F_DTEXT: u8 = 0x40;
const F_ABISF: u8 = 0x80;

/// `atext` (RFC 5322 §3.2.3).
pub const IS_ATEXT: u8 = F_ALPHA | F_DIGIT | F_HYPHN | F_ATEXT;
/// `qtext` (RFC 5322 §3.2.4).
pub const IS_QTEXT: u8 = F_QTEXT;
/// `ctext` (RFC 5322 §3.2.2).
pub const IS_CTEXT: u8 = F_CTEXT;
/// `dtext` (RFC 5322 §3.4.1).
pub const IS_DTEXT: u8 = F_DTEXT;
/// `ALPHA` (RFC 5234 appendix B.1).
pub const IS_ALPHA: u8 = F_ALPHA;
/// `DIGIT` (RFC 5234 appendix B.1).
pub const IS_DIGIT: u8 = F_DIGIT;
/// Letters and digits.
pub const IS_ALNUM: u8 = F_ALPHA | F_DIGIT;
/// Letters, digits, and hyphen (the DNS label interior).
pub const IS_ALNUS: u8 = F_ALPHA | F_DIGIT | F_HYPHN;
/// Hexadecimal digits, both cases.
pub const IS_XDIGIT: u8 = F_DIGIT | F_ABISF;

static ASCII: Lazy<[u8; 128]> = Lazy::new(|| {
    let mut table = [0u8; 128];

    for (i, entry) in table.iter_mut().enumerate() {
        let b = i as u8;

        if is_alpha(b) {
            *entry |= F_ALPHA;
        }
        if is_digit(b) {
            *entry |= F_DIGIT;
        }
        if matches!(b, b'A'..=b'F' | b'a'..=b'f') {
            *entry |= F_ABISF;
        }
        if b == b'-' {
            *entry |= F_HYPHN;
        }
        if matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'/'
                | b'='
                | b'?'
                | b'^'
                | b'_'
                | b'`'
                | b'{'
                | b'|'
                | b'}'
                | b'~'
        ) {
            *entry |= F_ATEXT;
        }
        if matches!(b, 0x21 | 0x23..=0x5b | 0x5d..=0x7e) {
            *entry |= F_QTEXT;
        }
        if matches!(b, 0x21..=0x27 | 0x2a..=0x5b | 0x5d..=0x7e) {
            *entry |= F_CTEXT;
        }
        if matches!(b, 0x21..=0x5a | 0x5e..=0x7e) {
            *entry |= F_DTEXT;
        }
    }

    table
});

/// Tests whether `c` is in the character class selected by `mask`.
pub fn is(c: char, mask: u8) -> bool {
    let cp = c as usize;

    cp < ASCII.len() && ASCII[cp] & mask != 0
}

/// `WSP = SP / HTAB` (RFC 5234 appendix B.1).
pub fn is_wsp(c: char) -> bool {
    c.is_ascii() && abnf_core::is_wsp(c as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atext() {
        for c in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
            assert!(is(c, IS_ATEXT), "{c}");
        }
        for c in "!#$%&'*+-/=?^_`{|}~".chars() {
            assert!(is(c, IS_ATEXT), "{c}");
        }
        for c in "()<>[]:;@\\,.\" \t".chars() {
            assert!(!is(c, IS_ATEXT), "{c}");
        }
    }

    #[test]
    fn test_qtext_excludes_quote_and_backslash() {
        assert!(is('!', IS_QTEXT));
        assert!(is('#', IS_QTEXT));
        assert!(is('[', IS_QTEXT));
        assert!(is(']', IS_QTEXT));
        assert!(is('~', IS_QTEXT));
        assert!(!is('"', IS_QTEXT));
        assert!(!is('\\', IS_QTEXT));
        assert!(!is(' ', IS_QTEXT));
    }

    #[test]
    fn test_ctext_excludes_parens_and_backslash() {
        assert!(is('!', IS_CTEXT));
        assert!(is('\'', IS_CTEXT));
        assert!(is('*', IS_CTEXT));
        assert!(!is('(', IS_CTEXT));
        assert!(!is(')', IS_CTEXT));
        assert!(!is('\\', IS_CTEXT));
    }

    #[test]
    fn test_dtext_excludes_brackets_and_backslash() {
        assert!(is('!', IS_DTEXT));
        assert!(is('Z', IS_DTEXT));
        assert!(is('^', IS_DTEXT));
        assert!(!is('[', IS_DTEXT));
        assert!(!is(']', IS_DTEXT));
        assert!(!is('\\', IS_DTEXT));
    }

    #[test]
    fn test_xdigit() {
        for c in ('0'..='9').chain('a'..='f').chain('A'..='F') {
            assert!(is(c, IS_XDIGIT), "{c}");
        }
        assert!(!is('g', IS_XDIGIT));
        assert!(!is('G', IS_XDIGIT));
    }

    #[test]
    fn test_beyond_ascii_is_in_no_class() {
        for c in ['\u{80}', 'ä', '€', '\u{1f4e7}'] {
            assert!(!is(c, 0xff), "{c}");
        }
    }

    #[test]
    fn test_wsp() {
        assert!(is_wsp(' '));
        assert!(is_wsp('\t'));
        assert!(!is_wsp('\n'));
        assert!(!is_wsp('\r'));
        assert!(!is_wsp('\u{a0}'));
    }
}
