//! Command-line checker for eMail addresses, domains, and IP literals.
//!
//! One type flag selects the grammar production to check the inputs
//! against; without a flag a diagnostic dump is printed instead. The exit
//! code tells scripts what happened: 0 all inputs valid, 40 no type flag
//! given, 41 unparsable email-kind input, 42 parsable but failing
//! post-validation, 43 invalid domain/ipv4/ipv6.

use std::process::ExitCode;

use clap::Parser;
use mailaddr_codec::{
    mailaddr_types::{address::AddressList, fqdn::Fqdn, ip::IpAddress},
    Path,
};

const RC_NO_KIND: u8 = 40;
const RC_UNPARSABLE: u8 = 41;
const RC_INVALID: u8 = 42;
const RC_BAD_LITERAL: u8 = 43;

#[derive(Debug, Parser)]
#[command(
    name = "mailaddr",
    about = "Check eMail addresses, domains, and IP address literals",
    group(clap::ArgGroup::new("kind"))
)]
struct Args {
    /// Check each input as a bare addr-spec (local-part@domain).
    #[arg(long, group = "kind")]
    addrspec: bool,

    /// Check each input as a single mailbox (Sender header).
    #[arg(long, group = "kind")]
    mailbox: bool,

    /// Check each input as a single address (RFC 6854 Sender header).
    #[arg(long, group = "kind")]
    address: bool,

    /// Check each input as a mailbox-list (From header).
    #[arg(long, group = "kind")]
    mailboxlist: bool,

    /// Check each input as an address-list (To, Cc headers).
    #[arg(long, group = "kind")]
    addresslist: bool,

    /// Check each input as a fully-qualified domain name.
    #[arg(long, group = "kind")]
    domain: bool,

    /// Check each input as an IPv4 address.
    #[arg(long, group = "kind")]
    ipv4: bool,

    /// Check each input as an IPv6 address.
    #[arg(long, group = "kind")]
    ipv6: bool,

    /// The strings to check.
    #[arg(required = true)]
    inputs: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut rc = 0;
    for input in &args.inputs {
        let code = check(&args, input);
        if rc == 0 {
            rc = code;
        }
    }

    ExitCode::from(rc)
}

// Checks one input against the selected kind; prints the canonical form on
// success and nothing on failure.
fn check(args: &Args, input: &str) -> u8 {
    if args.domain {
        return match Fqdn::of(input).filter(Fqdn::is_domain) {
            Some(fqdn) => emit(fqdn.as_str()),
            None => RC_BAD_LITERAL,
        };
    }
    if args.ipv4 {
        return match IpAddress::of(input).and_then(|ip| ip.v4()) {
            Some(addr) => emit(addr),
            None => RC_BAD_LITERAL,
        };
    }
    if args.ipv6 {
        return match IpAddress::of(input).and_then(|ip| ip.v6()) {
            Some(addr) => emit(addr),
            None => RC_BAD_LITERAL,
        };
    }

    let Some(mut path) = Path::of(input) else {
        return RC_UNPARSABLE;
    };

    let outcome = if args.addrspec {
        path.as_addr_spec()
            .map(|spec| (spec.to_string(), spec.is_valid()))
    } else if args.mailbox {
        path.for_sender(false)
            .map(|mailbox| (mailbox.to_string(), mailbox.is_valid()))
    } else if args.address {
        path.for_sender(true)
            .map(|address| (address.to_string(), address.is_valid()))
    } else if args.mailboxlist {
        path.as_mailbox_list()
            .map(|list| (list.to_string(), list.is_valid()))
    } else if args.addresslist {
        path.as_address_list()
            .map(|list| (list.to_string(), list.is_valid()))
    } else {
        return diagnose(input, &mut path);
    };

    match outcome {
        Some((rendered, true)) => emit(rendered),
        Some((_, false)) => RC_INVALID,
        None => RC_UNPARSABLE,
    }
}

fn emit(canonical: impl std::fmt::Display) -> u8 {
    println!("{canonical}");

    0
}

// No type flag given: report what each production makes of the input.
fn diagnose(input: &str, path: &mut Path) -> u8 {
    println!("input: {input}");

    match path.as_addr_spec() {
        Some(spec) => println!("  addr-spec:    {} [{}]", spec, verdict(spec.is_valid())),
        None => println!("  addr-spec:    no parse"),
    }
    match path.for_sender(false) {
        Some(mailbox) => println!("  mailbox:      {} [{}]", mailbox, verdict(mailbox.is_valid())),
        None => println!("  mailbox:      no parse"),
    }
    match path.for_sender(true) {
        Some(address) => println!("  address:      {} [{}]", address, verdict(address.is_valid())),
        None => println!("  address:      no parse"),
    }
    match path.as_mailbox_list() {
        Some(list) => report_list("mailbox-list", &list),
        None => println!("  mailbox-list: no parse"),
    }
    match path.as_address_list() {
        Some(list) => report_list("address-list", &list),
        None => println!("  address-list: no parse"),
    }
    match Fqdn::of(input) {
        Some(fqdn) => println!("  domain:       [{}]", verdict(fqdn.is_domain())),
        None => println!("  domain:       input too long"),
    }
    if let Some(ip) = IpAddress::of(input) {
        if let Some(addr) = ip.v4() {
            println!("  ipv4:         {addr}");
        }
        if let Some(addr) = ip.v6() {
            println!("  ipv6:         {addr}");
        }
    }

    RC_NO_KIND
}

fn report_list(kind: &str, list: &AddressList) {
    println!("  {kind}: {} [{}]", list, verdict(list.is_valid()));
    if let Some(invalids) = list.invalids_to_string() {
        println!("  {kind} rejects: {invalids}");
    }
}

fn verdict(valid: bool) -> &'static str {
    if valid {
        "valid"
    } else {
        "invalid"
    }
}
