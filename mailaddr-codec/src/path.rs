//! The RFC 5322 address grammar.
//!
//! Every production takes the cursor, returns `None` on failure, and is
//! bracketed by a [`Txn`] where it could otherwise leave codepoints
//! consumed. The alternation idiom throughout is: open a transaction, try
//! the first alternative, `accept` its result, or let the transaction drop
//! (rolling the cursor back) and try the next.

use mailaddr_types::{
    address::{AddrSpec, Address, AddressList},
    core::Substring,
    utils::{is, is_wsp, IS_ATEXT, IS_CTEXT, IS_DTEXT, IS_QTEXT},
};

use crate::{cursor::Cursor, txn::Txn};

/// Comments may nest; anything deeper than this fails the parse instead of
/// the stack.
const MAX_COMMENT_NESTING: usize = 128;

/// Parser for RFC 822 (and successors) eMail address header content, either
/// From or To, or subsets.
///
/// In domain literals (square brackets) the General-address-literal syntax
/// is not recognised, and IPv6 Zone Identifiers are not supported. Handling
/// of line endings inside folding white space is lenient:
/// `CRLF := ([CR] LF) / CR`.
///
/// Create an instance via the [`Path::of`] factory, then call one of the
/// parse methods: [`Path::as_address_list`] to validate recipients,
/// [`Path::as_mailbox_list`] or [`Path::for_sender`] for message senders,
/// [`Path::as_addr_spec`] for a bare address. Each entry point starts over
/// at the beginning of the input and succeeds only if the entire input is
/// consumed, so one instance is serially reusable.
///
/// ## Example
///
/// ```rust
/// use mailaddr_codec::Path;
///
/// let mut path = Path::of("Team:a@x.example, b@y.example;").unwrap();
/// let list = path.as_address_list().unwrap();
///
/// assert!(list.is_valid());
/// assert!(list.is_address_list());
/// assert_eq!(list.to_string(), "Team: a@x.example, b@y.example;");
/// ```
#[derive(Debug)]
pub struct Path {
    cursor: Cursor,
}

impl Path {
    /// Longest accepted input, in codepoints. Arbitrary, but extremely
    /// large already for header content.
    pub const MAX_INPUT: usize = 131_072;

    /// Creates a parser over `addresses`.
    ///
    /// Returns `None` if the input exceeds [`Path::MAX_INPUT`].
    pub fn of(addresses: &str) -> Option<Self> {
        let cursor = Cursor::new(addresses, Self::MAX_INPUT).ok()?;

        Some(Self { cursor })
    }

    /// Parses the input as a bare addr-spec (`local-part@domain`).
    pub fn as_addr_spec(&mut self) -> Option<AddrSpec> {
        self.parse(addr_spec)
    }

    /// Parses the input for the Sender and Resent-Sender headers.
    ///
    /// These headers normally take a single mailbox; RFC 6854 allows the
    /// address production instead, under the RFC 2026 §3.3(d) Limited Use
    /// caveat. Pass `allow_rfc6854` accordingly.
    pub fn for_sender(&mut self, allow_rfc6854: bool) -> Option<Address> {
        if allow_rfc6854 {
            self.parse(address)
        } else {
            self.parse(mailbox)
        }
    }

    /// Parses the input as mailbox-list, e.g. for the From and Resent-From
    /// headers. The result is never flagged as an address-list.
    pub fn as_mailbox_list(&mut self) -> Option<AddressList> {
        self.parse(mailbox_list).map(AddressList::new)
    }

    /// Parses the input as address-list, e.g. for the Reply-To, To, Cc,
    /// Resent-To and Resent-Cc headers.
    pub fn as_address_list(&mut self) -> Option<AddressList> {
        self.parse(address_list).map(AddressList::new)
    }

    // Runs one entry production over the whole input. The cursor ends at
    // the end of the input on success and at offset 0 on failure.
    fn parse<T>(&mut self, production: fn(&mut Cursor) -> Option<T>) -> Option<T> {
        self.cursor.rewind(0);

        match production(&mut self.cursor) {
            Some(value) if self.cursor.cur().is_none() => Some(value),
            _ => {
                self.cursor.rewind(0);
                None
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn pos(&self) -> usize {
        self.cursor.pos()
    }
}

// A phrase word with the byte range of its core text, surrounding CFWS
// excluded.
#[derive(Debug)]
struct Word {
    start: usize,
    end: usize,
    text: String,
}

impl Word {
    fn into_substring(self) -> Substring {
        Substring::new(self.start, self.end, self.text)
    }
}

// One unit of quoted-string content, keeping qtext and quoted-pair apart so
// callers can preserve the wire form.
#[derive(Debug)]
enum QContent {
    Text(char),
    Pair(char),
}

/// ```abnf
/// address-list = address *("," address)
/// ```
///
/// The list stops at the first unparsable element, keeping everything
/// before it; the full-input rule of the entry points rejects the leftover.
fn address_list(c: &mut Cursor) -> Option<Vec<Address>> {
    let mut txn = Txn::open(c);

    let first = address(txn.cursor())?;
    let mut items = vec![first];
    txn.commit();

    while txn.cursor().cur() == Some(',') {
        txn.cursor().accept().ok()?;
        match address(txn.cursor()) {
            Some(item) => {
                items.push(item);
                txn.commit();
            }
            None => break,
        }
    }

    // rewinds to just after the last parsed element
    drop(txn);

    Some(items)
}

/// ```abnf
/// mailbox-list = mailbox *("," mailbox)
/// ```
fn mailbox_list(c: &mut Cursor) -> Option<Vec<Address>> {
    let mut txn = Txn::open(c);

    let first = mailbox(txn.cursor())?;
    let mut items = vec![first];
    txn.commit();

    while txn.cursor().cur() == Some(',') {
        txn.cursor().accept().ok()?;
        match mailbox(txn.cursor()) {
            Some(item) => {
                items.push(item);
                txn.commit();
            }
            None => break,
        }
    }

    drop(txn);

    Some(items)
}

/// ```abnf
/// address = mailbox / group
/// ```
fn address(c: &mut Cursor) -> Option<Address> {
    if let Some(parsed) = mailbox(c) {
        return Some(parsed);
    }

    group(c)
}

/// ```abnf
/// group = display-name ":" [group-list] ";" [CFWS]
/// ```
fn group(c: &mut Cursor) -> Option<Address> {
    let mut txn = Txn::open(c);

    let label = display_name(txn.cursor())?;
    if txn.cursor().cur() != Some(':') {
        return None;
    }
    txn.cursor().accept().ok()?;

    let members = group_list(txn.cursor()).unwrap_or_default();

    if txn.cursor().cur() != Some(';') {
        return None;
    }
    txn.cursor().accept().ok()?;
    let _ = cfws(txn.cursor());

    Some(txn.accept(Address::Group { label, members }))
}

/// ```abnf
/// group-list = mailbox-list / CFWS
/// ```
///
/// The second alternative makes the empty group legal. The obsolete
/// `obs-group-list` production is not supported.
fn group_list(c: &mut Cursor) -> Option<Vec<Address>> {
    if let Some(items) = mailbox_list(c) {
        return Some(items);
    }

    cfws(c).map(|_| Vec::new())
}

/// ```abnf
/// mailbox = name-addr / addr-spec
/// ```
fn mailbox(c: &mut Cursor) -> Option<Address> {
    if let Some(parsed) = name_addr(c) {
        return Some(parsed);
    }

    addr_spec(c).map(|spec| Address::Mailbox {
        label: None,
        addr_spec: spec,
    })
}

/// ```abnf
/// name-addr = [display-name] angle-addr
/// ```
fn name_addr(c: &mut Cursor) -> Option<Address> {
    let mut txn = Txn::open(c);

    let label = display_name(txn.cursor());
    let spec = angle_addr(txn.cursor())?;

    Some(txn.accept(Address::Mailbox {
        label,
        addr_spec: spec,
    }))
}

/// ```abnf
/// angle-addr = [CFWS] "<" addr-spec ">" [CFWS]
/// ```
fn angle_addr(c: &mut Cursor) -> Option<AddrSpec> {
    let mut txn = Txn::open(c);

    let _ = cfws(txn.cursor());
    if txn.cursor().cur() != Some('<') {
        return None;
    }
    txn.cursor().accept().ok()?;

    let spec = addr_spec(txn.cursor())?;

    if txn.cursor().cur() != Some('>') {
        return None;
    }
    txn.cursor().accept().ok()?;
    let _ = cfws(txn.cursor());

    Some(txn.accept(spec))
}

/// ```abnf
/// display-name = phrase
/// ```
fn display_name(c: &mut Cursor) -> Option<Substring> {
    phrase(c)
}

/// ```abnf
/// phrase = 1*word
/// ```
///
/// Inter-word white space is reduced to a single space in the materialised
/// text; quoted-string words keep their delimiters verbatim.
fn phrase(c: &mut Cursor) -> Option<Substring> {
    let first = word(c)?;
    let (start, mut end) = (first.start, first.end);
    let mut text = first.text;

    while let Some(next) = word(c) {
        text.push(' ');
        text.push_str(&next.text);
        end = next.end;
    }

    Some(Substring::new(start, end, text))
}

/// ```abnf
/// word = atom / quoted-string
/// ```
fn word(c: &mut Cursor) -> Option<Word> {
    if let Some(parsed) = atom(c) {
        return Some(parsed);
    }

    quoted_string(c)
}

/// ```abnf
/// atom = [CFWS] 1*atext [CFWS]
/// ```
fn atom(c: &mut Cursor) -> Option<Word> {
    let mut txn = Txn::open(c);

    let _ = cfws(txn.cursor());
    let start = txn.cursor().pos();
    if !matches!(txn.cursor().cur(), Some(ch) if is(ch, IS_ATEXT)) {
        return None;
    }
    let _ = txn.cursor().skip(|ch, _| is(ch, IS_ATEXT));
    let end = txn.cursor().pos();

    let text = txn.cursor().slice(start, end).to_owned();
    let _ = cfws(txn.cursor());

    Some(txn.accept(Word { start, end, text }))
}

/// ```abnf
/// dot-atom = [CFWS] dot-atom-text [CFWS]
/// ```
fn dot_atom(c: &mut Cursor) -> Option<Substring> {
    let mut txn = Txn::open(c);

    let _ = cfws(txn.cursor());
    let sub = dot_atom_text(txn.cursor())?;
    let _ = cfws(txn.cursor());

    Some(txn.accept(sub))
}

/// ```abnf
/// dot-atom-text = 1*atext *("." 1*atext)
/// ```
///
/// A dot is only taken when an atext follows it, so a trailing dot is left
/// for the caller.
fn dot_atom_text(c: &mut Cursor) -> Option<Substring> {
    let start = c.pos();

    if !matches!(c.cur(), Some(ch) if is(ch, IS_ATEXT)) {
        return None;
    }
    let _ = c.skip(|ch, _| is(ch, IS_ATEXT));

    while c.cur() == Some('.') && matches!(c.peek(), Some(ch) if is(ch, IS_ATEXT)) {
        c.accept().ok()?;
        let _ = c.skip(|ch, _| is(ch, IS_ATEXT));
    }

    let end = c.pos();

    Some(Substring::new(start, end, c.slice(start, end)))
}

/// ```abnf
/// quoted-string = [CFWS] DQUOTE *([FWS] qcontent) [FWS] DQUOTE [CFWS]
/// ```
///
/// The materialised text keeps the delimiters and quoted-pairs verbatim
/// (the wire representation); folds are unfolded.
fn quoted_string(c: &mut Cursor) -> Option<Word> {
    let mut txn = Txn::open(c);

    let _ = cfws(txn.cursor());
    let start = txn.cursor().pos();
    if txn.cursor().cur() != Some('"') {
        return None;
    }
    txn.cursor().accept().ok()?;

    let mut text = String::from('"');
    loop {
        if let Some(folded) = fws(txn.cursor()) {
            text.push_str(&folded);
        }
        match qcontent(txn.cursor()) {
            Some(QContent::Text(ch)) => text.push(ch),
            Some(QContent::Pair(ch)) => {
                text.push('\\');
                text.push(ch);
            }
            None => break,
        }
    }

    // the final [FWS] was already taken by the last loop iteration
    if txn.cursor().cur() != Some('"') {
        return None;
    }
    txn.cursor().accept().ok()?;
    text.push('"');
    let end = txn.cursor().pos();

    let _ = cfws(txn.cursor());

    Some(txn.accept(Word { start, end, text }))
}

/// ```abnf
/// qcontent = qtext / quoted-pair
/// ```
fn qcontent(c: &mut Cursor) -> Option<QContent> {
    if let Some(ch) = class_char(c, IS_QTEXT) {
        return Some(QContent::Text(ch));
    }

    quoted_pair(c).map(QContent::Pair)
}

/// ```abnf
/// quoted-pair = "\" (VCHAR / WSP)
/// ```
///
/// Returns the escaped codepoint, without the backslash.
fn quoted_pair(c: &mut Cursor) -> Option<char> {
    if c.cur() != Some('\\') {
        return None;
    }

    let escaped = c.peek()?;
    if !matches!(escaped, '\x20'..='\x7e' | '\t') {
        return None;
    }
    c.accept().ok()?;
    c.accept().ok()?;

    Some(escaped)
}

/// ```abnf
/// comment  = "(" *([FWS] ccontent) [FWS] ")"
/// ccontent = ctext / quoted-pair / comment
/// ```
///
/// The comment text is collected and returned, though every current caller
/// drops it.
fn comment(c: &mut Cursor, depth: usize) -> Option<String> {
    if depth > MAX_COMMENT_NESTING {
        return None;
    }

    let mut txn = Txn::open(c);

    if txn.cursor().cur() != Some('(') {
        return None;
    }
    txn.cursor().accept().ok()?;

    let mut text = String::new();
    loop {
        if let Some(folded) = fws(txn.cursor()) {
            text.push_str(&folded);
        }
        match ccontent(txn.cursor(), depth) {
            Some(part) => text.push_str(&part),
            None => break,
        }
    }

    // the final [FWS] was already taken by the last loop iteration
    if txn.cursor().cur() != Some(')') {
        return None;
    }
    txn.cursor().accept().ok()?;

    Some(txn.accept(text))
}

fn ccontent(c: &mut Cursor, depth: usize) -> Option<String> {
    if let Some(ch) = class_char(c, IS_CTEXT) {
        return Some(ch.to_string());
    }
    if let Some(ch) = quoted_pair(c) {
        return Some(format!("\\{ch}"));
    }

    comment(c, depth + 1).map(|inner| format!("({inner})"))
}

/// ```abnf
/// CFWS = (1*([FWS] comment) [FWS]) / FWS
/// ```
fn cfws(c: &mut Cursor) -> Option<()> {
    let leading_fws = fws(c).is_some();

    if comment(c, 0).is_none() {
        // second alternative: plain FWS, or nothing
        return leading_fws.then_some(());
    }

    // first alternative: at least one comment, interleaved with FWS; the
    // trailing [FWS] is taken by the iteration that finds no comment
    loop {
        let _ = fws(c);
        if comment(c, 0).is_none() {
            return Some(());
        }
    }
}

/// ```abnf
/// FWS = ([*WSP CRLF] 1*WSP) / obs-FWS
/// ```
///
/// Line endings are handled leniently: CR LF, CR alone, and LF alone all
/// fold, provided white space follows. Returns the unfolded text, the
/// leading and trailing WSP runs with the line ending dropped.
fn fws(c: &mut Cursor) -> Option<String> {
    let mut unfolded: Option<String> = None;

    if matches!(c.cur(), Some(ch) if is_wsp(ch)) {
        let start = c.pos();
        let _ = c.skip(|ch, _| is_wsp(ch));
        unfolded = Some(c.slice(start, c.pos()).to_owned());
    }

    let eol = match c.cur() {
        Some(ch) if ch == '\r' || ch == '\n' => ch,
        _ => return unfolded,
    };

    if eol == '\r' && c.peek() == Some('\n') {
        // CR LF only folds when WSP follows; otherwise undo the
        // two-codepoint advance
        let mark = c.pos();
        c.accept().ok()?;
        c.accept().ok()?;
        if !matches!(c.cur(), Some(ch) if is_wsp(ch)) {
            // `mark` was obtained from pos() above
            let _ = c.jmp(mark);
            return unfolded;
        }
    } else {
        // CR alone or LF alone, also requiring WSP next
        if !matches!(c.peek(), Some(ch) if is_wsp(ch)) {
            return unfolded;
        }
        c.accept().ok()?;
    }

    let start = c.pos();
    let _ = c.skip(|ch, _| is_wsp(ch));
    let trailing = c.slice(start, c.pos());

    Some(match unfolded {
        Some(mut leading) => {
            leading.push_str(trailing);
            leading
        }
        None => trailing.to_owned(),
    })
}

/// ```abnf
/// addr-spec = local-part "@" domain
/// ```
fn addr_spec(c: &mut Cursor) -> Option<AddrSpec> {
    let mut txn = Txn::open(c);

    let local_part = local_part(txn.cursor())?;
    if txn.cursor().cur() != Some('@') {
        return None;
    }
    txn.cursor().accept().ok()?;
    let domain = domain(txn.cursor())?;

    Some(txn.accept(AddrSpec::new(local_part, domain)))
}

/// ```abnf
/// local-part = dot-atom / quoted-string
/// ```
fn local_part(c: &mut Cursor) -> Option<Substring> {
    if let Some(sub) = dot_atom(c) {
        return Some(sub);
    }

    quoted_string(c).map(Word::into_substring)
}

/// ```abnf
/// domain = dot-atom / domain-literal
/// ```
fn domain(c: &mut Cursor) -> Option<Substring> {
    if let Some(sub) = dot_atom(c) {
        return Some(sub);
    }

    domain_literal(c)
}

/// ```abnf
/// domain-literal = [CFWS] "[" *([FWS] dtext) [FWS] "]" [CFWS]
/// ```
///
/// The materialised text keeps the brackets.
fn domain_literal(c: &mut Cursor) -> Option<Substring> {
    let mut txn = Txn::open(c);

    let _ = cfws(txn.cursor());
    let start = txn.cursor().pos();
    if txn.cursor().cur() != Some('[') {
        return None;
    }
    txn.cursor().accept().ok()?;

    let mut text = String::from('[');
    loop {
        if let Some(folded) = fws(txn.cursor()) {
            text.push_str(&folded);
        }
        match class_char(txn.cursor(), IS_DTEXT) {
            Some(ch) => text.push(ch),
            None => break,
        }
    }

    if txn.cursor().cur() != Some(']') {
        return None;
    }
    txn.cursor().accept().ok()?;
    text.push(']');
    let end = txn.cursor().pos();

    let _ = cfws(txn.cursor());

    Some(txn.accept(Substring::new(start, end, text)))
}

// Accepts a single codepoint of the given character class.
fn class_char(c: &mut Cursor, mask: u8) -> Option<char> {
    let ch = c.cur()?;
    if !is(ch, mask) {
        return None;
    }
    c.accept().ok()?;

    Some(ch)
}
