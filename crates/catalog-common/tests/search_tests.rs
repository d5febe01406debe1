mod fixtures;

use catalog_common::search::*;
use fixtures::{program, security_tools, titles};

#[test]
fn empty_query_keeps_everything_in_order() {
    let records = security_tools();
    let result = filter(&records, "");
    assert_eq!(titles(&result), vec!["Nmap", "Wireshark", "Burp Suite"]);
}

#[test]
fn whitespace_query_counts_as_empty() {
    let records = security_tools();
    assert_eq!(filter(&records, "   \t").len(), 3);
}

#[test]
fn map_matches_only_nmap() {
    let records = security_tools();
    for query in ["map", "MAP", "Map", "  mAp  "] {
        let result = filter(&records, query);
        assert_eq!(titles(&result), vec!["Nmap"], "query {query:?}");
    }
}

#[test]
fn case_insensitive_title_match() {
    let records = vec![program("a", "Foo")];
    assert_eq!(filter(&records, "foo"), filter(&records, "FOO"));
    assert_eq!(filter(&records, "foo").len(), 1);
}

#[test]
fn matches_description_platform_and_version() {
    let records = security_tools();
    assert_eq!(titles(&filter(&records, "packet")), vec!["Wireshark"]);
    assert_eq!(titles(&filter(&records, "java")), vec!["Burp Suite"]);
    assert_eq!(titles(&filter(&records, "7.94")), vec!["Nmap"]);
}

#[test]
fn no_match_is_empty() {
    let records = security_tools();
    assert!(filter(&records, "metasploit").is_empty());
}

#[test]
fn preserves_catalog_order_for_multiple_matches() {
    let records = vec![
        program("3", "Zeta tool"),
        program("2", "Alpha tool"),
        program("1", "Mid tool"),
    ];
    let result = filter(&records, "tool");
    assert_eq!(titles(&result), vec!["Zeta tool", "Alpha tool", "Mid tool"]);
}

#[test]
fn composed_and_decomposed_accents_match() {
    let records = vec![program("c", "Caf\u{00E9} Finder")];
    assert_eq!(filter(&records, "cafe\u{0301}").len(), 1);
}

#[test]
fn filtering_twice_is_stable() {
    let records = security_tools();
    let once = filter(&records, "e");
    let twice = filter(once.iter().copied(), "e");
    assert_eq!(once, twice);
}
