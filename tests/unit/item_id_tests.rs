//! Unit tests for item identifiers

use idfa::ItemId;
use std::collections::BTreeMap;

#[test]
fn test_parse_and_display() {
    let id: ItemId = "1.10.2".parse().unwrap();
    assert_eq!(id.parts(), ["1", "10", "2"]);
    assert_eq!(id.to_string(), "1.10.2");
}

#[test]
fn test_parse_rejects_malformed() {
    for raw in ["", "1.2", "1.2.3.4", "1..3", "a.b.c", "1.2.x"] {
        assert!(raw.parse::<ItemId>().is_err(), "{raw}");
    }
}

#[test]
fn test_numeric_ordering() {
    let mut ids: Vec<ItemId> = ["1.10.1", "1.2.1", "1.2.10", "1.2.2", "0.0.0"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    ids.sort();

    let ordered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(ordered, ["0.0.0", "1.2.1", "1.2.2", "1.2.10", "1.10.1"]);
}

#[test]
fn test_serializes_as_map_key() {
    let mut map = BTreeMap::new();
    map.insert(ItemId::new("1", "2", "1"), 3);

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"1.2.1":3}"#);

    let back: BTreeMap<ItemId, u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
}
