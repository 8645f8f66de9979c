use gsa_types::{Error, SidTag};
use proptest::prelude::*;

// ── Parsing ───────────────────────────────────────────────────────

#[test]
fn parse_stream_and_application_id() {
    let sid = SidTag::parse("{s-01:mass/a}").unwrap().unwrap();
    assert_eq!(sid.stream_id(), Some("s-01"));
    assert_eq!(sid.application_id(), Some("mass/a"));
}

#[test]
fn parse_splits_on_first_colon_only() {
    let sid = SidTag::parse("{abc:urn:gh:42}").unwrap().unwrap();
    assert_eq!(sid.stream_id(), Some("abc"));
    assert_eq!(sid.application_id(), Some("urn:gh:42"));
}

#[test]
fn parse_application_id_only() {
    let sid = SidTag::parse("{:app}").unwrap().unwrap();
    assert_eq!(sid.stream_id(), None);
    assert_eq!(sid.application_id(), Some("app"));
}

#[test]
fn parse_stream_only() {
    let sid = SidTag::parse("{stream:}").unwrap().unwrap();
    assert_eq!(sid.stream_id(), Some("stream"));
    assert_eq!(sid.application_id(), None);
}

#[test]
fn parse_empty_forms_are_none() {
    assert!(SidTag::parse("{}").unwrap().is_none());
    assert!(SidTag::parse("{:}").unwrap().is_none());
}

#[test]
fn parse_rejects_missing_braces() {
    assert!(matches!(SidTag::parse("s:a"), Err(Error::InvalidSid(_))));
    assert!(matches!(SidTag::parse("{s:a"), Err(Error::InvalidSid(_))));
}

#[test]
fn parse_without_separator_is_stream_only() {
    let sid = SidTag::parse("{abc}").unwrap().unwrap();
    assert_eq!(sid.stream_id(), Some("abc"));
    assert_eq!(sid.application_id(), None);
}

#[test]
fn parse_rejects_nested_braces() {
    assert!(matches!(SidTag::parse("{a:{b}}"), Err(Error::InvalidSid(_))));
}

// ── Construction & display ────────────────────────────────────────

#[test]
fn new_stores_empty_halves_as_absent() {
    let sid = SidTag::new("", "");
    assert!(sid.is_empty());
}

#[test]
fn display_emits_braced_pair() {
    assert_eq!(SidTag::new("s", "a").to_string(), "{s:a}");
    assert_eq!(SidTag::with_application_id("a").to_string(), "{:a}");
}

#[test]
fn setters_normalise_empty_strings() {
    let mut sid = SidTag::new("s", "a");
    sid.set_application_id(Some(String::new()));
    assert_eq!(sid.application_id(), None);
    sid.set_stream_id(None);
    assert!(sid.is_empty());
}

proptest! {
    #[test]
    fn display_then_parse_is_identity(
        stream in "[a-z0-9-]{1,12}",
        app in "[a-zA-Z0-9/:_-]{1,24}",
    ) {
        let sid = SidTag::new(stream, app);
        let parsed = SidTag::parse(&sid.to_string()).unwrap().unwrap();
        prop_assert_eq!(parsed, sid);
    }
}
