//! End-to-end tests over the public parser surface.

use mailaddr_codec::{
    mailaddr_types::{
        address::{Address, AddressList},
        ip::IpAddress,
    },
    Path,
};

fn path(input: &str) -> Path {
    Path::of(input).unwrap()
}

#[test]
fn test_simple_addr_spec() {
    let spec = path("user@host.domain.tld").as_addr_spec().unwrap();

    assert_eq!(spec.local_part().as_str(), "user");
    assert_eq!(spec.domain().as_str(), "host.domain.tld");
    assert!(spec.is_valid());
    assert_eq!(spec.to_string(), "user@host.domain.tld");
}

#[test]
fn test_sender_mailbox_with_display_name() {
    let sender = path("\"John Doe\" <jdoe@example.com>")
        .for_sender(false)
        .unwrap();

    assert!(!sender.is_group());
    assert!(sender.is_valid());
    assert_eq!(sender.label().map(|l| l.as_str()), Some("\"John Doe\""));

    match &sender {
        Address::Mailbox { addr_spec, .. } => {
            assert_eq!(addr_spec.to_string(), "jdoe@example.com");
        }
        Address::Group { .. } => unreachable!(),
    }

    assert_eq!(sender.to_string(), "\"John Doe\" <jdoe@example.com>");
}

#[test]
fn test_group_address_list() {
    let list = path("Group:a@x.tld, b@y.tld;").as_address_list().unwrap();

    assert!(list.is_valid());
    assert!(list.is_address_list());
    assert_eq!(list.addresses().len(), 1);

    match &list.addresses()[0] {
        Address::Group { label, members } => {
            assert_eq!(label.as_str(), "Group");
            assert_eq!(members.len(), 2);
        }
        Address::Mailbox { .. } => unreachable!(),
    }

    assert_eq!(list.to_string(), "Group: a@x.tld, b@y.tld;");
    assert_eq!(
        list.flatten_addr_specs(),
        vec!["a@x.tld".to_owned(), "b@y.tld".to_owned()]
    );
}

#[test]
fn test_ipv4_domain_literal() {
    let spec = path("foo@[192.0.2.1]").as_addr_spec().unwrap();

    assert_eq!(spec.domain().as_str(), "[192.0.2.1]");
    assert!(spec.is_valid());
}

#[test]
fn test_ipv6_domain_literal() {
    let spec = path("foo@[IPv6:2001:db8::1]").as_addr_spec().unwrap();
    assert!(spec.is_valid());

    // a zone identifier parses as domain-literal but fails validation
    let spec = path("foo@[IPv6:2001:db8::1%eth0]").as_addr_spec().unwrap();
    assert!(!spec.is_valid());
}

#[test]
fn test_trailing_junk_fails_the_list() {
    assert!(path("a@b, c@").as_address_list().is_none());
    assert!(path("a@b, c@").as_mailbox_list().is_none());
    assert!(path("a@b,").as_address_list().is_none());
    assert!(path("a@b x").as_addr_spec().is_none());
}

#[test]
fn test_empty_input() {
    let mut empty = path("");

    assert!(empty.as_addr_spec().is_none());
    assert!(empty.for_sender(false).is_none());
    assert!(empty.for_sender(true).is_none());
    assert!(empty.as_mailbox_list().is_none());
    assert!(empty.as_address_list().is_none());
}

#[test]
fn test_overlong_local_part_parses_but_fails_validation() {
    let input = format!("{}@ex.tld", "a".repeat(65));
    let spec = path(&input).as_addr_spec().unwrap();

    assert!(!spec.is_valid());

    let input = format!("{}@ex.tld", "a".repeat(64));
    assert!(path(&input).as_addr_spec().unwrap().is_valid());
}

#[test]
fn test_bad_label_parses_but_fails_validation() {
    let spec = path("user@-bad.tld").as_addr_spec().unwrap();

    assert!(!spec.is_valid());
    assert_eq!(spec.domain().as_str(), "-bad.tld");
}

#[test]
fn test_ip_address_surface() {
    let ip = IpAddress::of("2001:db8::1").unwrap();

    let v6 = ip.v6().unwrap();
    assert_eq!(
        v6.octets(),
        [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]
    );
    assert!(ip.v4().is_none());
}

// Two successive parses of the same input yield structurally equal results.
#[test]
fn test_determinism() {
    let inputs = [
        "user@host.domain.tld",
        "\"John Doe\" <jdoe@example.com>",
        "Group:a@x.tld, b@y.tld;",
        "a@x.tld, Team:;, \"b c\" <b@y.tld>",
    ];

    for input in inputs {
        let first = path(input).as_address_list();
        let second = path(input).as_address_list();
        assert_eq!(first, second, "{input:?}");

        let mut reused = path(input);
        assert_eq!(reused.as_address_list(), reused.as_address_list(), "{input:?}");
    }
}

// A top-level parse succeeds iff the grammar consumes the input exactly.
#[test]
fn test_full_input_rule() {
    assert!(path("a@b.tld").as_addr_spec().is_some());
    assert!(path("a@b.tld ").as_addr_spec().is_some()); // trailing CFWS belongs to domain
    assert!(path("a@b.tld x").as_addr_spec().is_none());
    assert!(path("a@b.tld,").as_addr_spec().is_none());
    assert!(path("<a@b.tld> ,").for_sender(false).is_none());
}

// Reparsing the canonical rendering reproduces the tree, `valid` included.
#[test]
fn test_canonical_round_trip() {
    let inputs = [
        "user@host.domain.tld",
        " user (comment) @ host.tld",
        "\"quoted local\"@example.com",
        "\"fold\r\n here\"@example.com",
        "foo@[192.0.2.1]",
        "foo@[IPv6:2001:db8::1]",
        "x@-invalid.tld",
    ];

    for input in inputs {
        let spec = path(input).as_addr_spec().unwrap();
        let rendered = spec.to_string();
        let reparsed = path(&rendered).as_addr_spec().unwrap();

        assert_eq!(reparsed, spec, "{input:?}");
        assert_eq!(reparsed.is_valid(), spec.is_valid(), "{input:?}");
    }
}

// List validity is exactly: non-empty and every member valid.
#[test]
fn test_list_validity() {
    let check = |list: &AddressList| {
        let expected = !list.addresses().is_empty()
            && list.addresses().iter().all(Address::is_valid);
        assert_eq!(list.is_valid(), expected);
    };

    for input in [
        "a@x.tld, b@y.tld",
        "a@x.tld, b@-bad.tld",
        "Team:a@x.tld;, b@y.tld",
        "Empty:;",
    ] {
        let list = path(input).as_address_list().unwrap();
        check(&list);
    }

    let list = path("a@x.tld, b@-bad.tld").as_address_list().unwrap();
    assert!(!list.is_valid());
    assert_eq!(list.invalids_to_string(), Some("b@-bad.tld".to_owned()));

    let list = path("a@x.tld, b@y.tld").as_address_list().unwrap();
    assert_eq!(list.invalids_to_string(), None);
}

// Inputs beyond the factory bound are refused; at the bound they parse.
#[test]
fn test_factory_length_bounds() {
    let at_bound = format!("a@{}", "b".repeat(Path::MAX_INPUT - 2));
    let spec = Path::of(&at_bound).unwrap().as_addr_spec().unwrap();
    // parses fine, merely fails domain validation
    assert!(!spec.is_valid());

    let over_bound = format!("a@{}", "b".repeat(Path::MAX_INPUT - 1));
    assert!(Path::of(&over_bound).is_none());

    // the bound counts codepoints, not bytes
    let wide = "\u{1f4e7}".repeat(Path::MAX_INPUT);
    assert!(Path::of(&wide).is_some());
}

// A parser instance stays usable across failed and successful parses.
#[test]
fn test_serial_reuse_after_failure() {
    let mut parser = path("a@x.tld, c@");

    assert!(parser.as_address_list().is_none());
    assert!(parser.as_addr_spec().is_none());
    assert!(parser.for_sender(false).is_none());
    // the mailbox-list prefix alone still fails the full-input rule
    assert!(parser.as_mailbox_list().is_none());

    let mut parser = path("a@x.tld");
    assert!(parser.as_address_list().is_some());
    assert!(parser.as_addr_spec().is_some());
}

#[test]
fn test_folded_header_content() {
    let list = path("a@x.tld,\r\n b@y.tld").as_mailbox_list().unwrap();

    assert!(list.is_valid());
    assert!(!list.is_address_list());
    assert_eq!(list.to_string(), "a@x.tld, b@y.tld");
}

#[test]
fn test_rfc6854_sender() {
    let input = "Team:a@x.tld;";

    assert!(path(input).for_sender(false).is_none());
    let address = path(input).for_sender(true).unwrap();
    assert!(address.is_group());
}

#[test]
fn test_display_name_normalisation() {
    let sender = path("John  Quincy   Doe <jqd@example.com>")
        .for_sender(false)
        .unwrap();

    assert_eq!(
        sender.to_string(),
        "John Quincy Doe <jqd@example.com>"
    );
}

#[test]
fn test_comments_are_parsed_and_dropped() {
    let spec = path("(somewhere) user (here) @ (around) example.com (there)")
        .as_addr_spec()
        .unwrap();

    assert_eq!(spec.to_string(), "user@example.com");
    assert!(spec.is_valid());
}
