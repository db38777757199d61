// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use lazyjson::{parse_lazy_entry, parse_value, LazyEntry, OwnedJson, RawJson, Value};

#[test]
fn test_scan_null() {
    assert_eq!(parse_lazy_entry(b"null").unwrap(), None);
    assert_eq!(parse_lazy_entry(b"  null  ").unwrap(), None);
}

#[test]
fn test_scan_scalars() {
    let entry = parse_lazy_entry(b"true").unwrap().unwrap();
    assert_eq!(entry.to_bool().unwrap(), true);

    let entry = parse_lazy_entry(b"  false  ").unwrap().unwrap();
    assert_eq!(entry.to_bool().unwrap(), false);

    let entry = parse_lazy_entry(b"42").unwrap().unwrap();
    assert_eq!(entry.to_i64().unwrap(), 42);

    let entry = parse_lazy_entry(b"-0.25").unwrap().unwrap();
    assert_eq!(entry.to_f32().unwrap(), -0.25);

    let entry = parse_lazy_entry(br#""a\nb""#).unwrap().unwrap();
    assert_eq!(entry.to_str().unwrap(), "a\nb");
}

#[test]
fn test_scan_records_spans_without_converting() {
    // the string body span keeps its escape sequences
    let data = br#"  "a\u0041b"  "#;
    let entry = parse_lazy_entry(data).unwrap().unwrap();
    match &entry {
        LazyEntry::String(region, span) => {
            assert_eq!(&region.as_ref()[span.from..span.to], br#"a\u0041b"#);
        }
        other => panic!("unexpected entry {:?}", other),
    }
    assert_eq!(entry.to_str().unwrap(), "aAb");

    // number spans carry the raw digits, tagged by kind
    let data = b"[120, 3.5]";
    let root = parse_lazy_entry(data).unwrap().unwrap();
    match root.get_index(0).unwrap() {
        LazyEntry::Int(region, span) => {
            assert_eq!(&region.as_ref()[span.from..span.to], b"120");
        }
        other => panic!("unexpected entry {:?}", other),
    }
    match root.get_index(1).unwrap() {
        LazyEntry::Float(region, span) => {
            assert_eq!(&region.as_ref()[span.from..span.to], b"3.5");
        }
        other => panic!("unexpected entry {:?}", other),
    }

    // boolean spans record the leading byte position only
    let data = b" true";
    let root = parse_lazy_entry(data).unwrap().unwrap();
    match &root {
        LazyEntry::Bool(_, span) => assert_eq!((span.from, span.to), (1, 2)),
        other => panic!("unexpected entry {:?}", other),
    }
}

#[test]
fn test_scan_containers() {
    let root = parse_lazy_entry(br#"{"a": 1, "b": [true, "x"]}"#)
        .unwrap()
        .unwrap();
    assert_eq!(root.get_i64("a").unwrap(), 1);
    let b = root.get("b").unwrap();
    assert_eq!(b.to_array().unwrap().len(), 2);
    assert_eq!(b.get_index(0).unwrap().to_bool().unwrap(), true);
    assert_eq!(b.get_index(1).unwrap().to_str().unwrap(), "x");

    // keys are resolved eagerly, including escapes
    let root = parse_lazy_entry(br#"{"A": 1}"#).unwrap().unwrap();
    assert!(root.to_object().unwrap().contains_key("A"));

    // null members vanish; duplicate keys resolve last-write-wins
    let root = parse_lazy_entry(br#"{"a": null, "b": 2}"#).unwrap().unwrap();
    assert_eq!(root.to_object().unwrap().len(), 1);
    let root = parse_lazy_entry(br#"{"a": 1, "a": null}"#).unwrap().unwrap();
    assert_eq!(root.to_object().unwrap().len(), 0);
    let root = parse_lazy_entry(b"[1, null, 2]").unwrap().unwrap();
    assert_eq!(root.to_array().unwrap().len(), 2);
    assert_eq!(root.get_index(1).unwrap().to_i64().unwrap(), 2);

    // trailing commas tolerated in both containers
    assert!(parse_lazy_entry(br#"{"a":1,}"#).unwrap().unwrap().is_object());
    assert_eq!(
        parse_lazy_entry(b"[1,2,]")
            .unwrap()
            .unwrap()
            .to_array()
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_scan_structural_errors_abort() {
    // malformed top-level structure aborts the whole scan
    assert!(parse_lazy_entry(b"[1 2]").is_err());
    assert!(parse_lazy_entry(b"{1:2}").is_err());
    assert!(parse_lazy_entry(br#"{"a" 1}"#).is_err());
    assert!(parse_lazy_entry(b"").is_err());

    // exponent numbers are rejected at scan time in the lazy engine too
    assert_eq!(
        parse_lazy_entry(b"1e10").err().unwrap().to_string(),
        "exponent number is not supported, pos 4"
    );
    assert_eq!(
        parse_lazy_entry(b"[1E-5]").err().unwrap().to_string(),
        "exponent number is not supported, pos 5"
    );
}

#[test]
fn test_scan_conversion_errors_are_scoped() {
    // a malformed escape is not noticed during the scan...
    let root = parse_lazy_entry(br#"["\z", 5]"#).unwrap().unwrap();
    // ...surfaces when that entry is accessed...
    assert_eq!(
        root.get_index(0).unwrap().to_str().err().unwrap().to_string(),
        "invalid escaped character `z`, pos 3"
    );
    // ...and leaves sibling entries independently accessible
    assert_eq!(root.get_index(1).unwrap().to_i64().unwrap(), 5);

    // same for raw control characters inside a string body
    let root = parse_lazy_entry(b"[\"a\tb\", true]").unwrap().unwrap();
    assert!(root.get_index(0).unwrap().to_str().is_err());
    assert_eq!(root.get_index(1).unwrap().to_bool().unwrap(), true);
}

#[test]
fn test_scan_trailing_tolerance() {
    let root = parse_lazy_entry(br#"{"a": "b"}   meh  "#).unwrap().unwrap();
    let obj = root.to_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(root.get_str("a").unwrap(), "b");

    let root = parse_lazy_entry(b"  5  ").unwrap().unwrap();
    assert_eq!(root.to_i64().unwrap(), 5);
    let root = parse_lazy_entry(b"5,3").unwrap().unwrap();
    assert_eq!(root.to_i64().unwrap(), 5);
}

#[test]
fn test_buffer_wrappers() {
    let text = br#"{"k": [1, 2.5]}"#;

    // borrowed region: no copy, entries tied to the input lifetime
    let raw = RawJson::new(text);
    assert_eq!(raw.len(), text.len());
    assert!(!raw.is_empty());
    let root = raw.parse_root().unwrap().unwrap();
    assert_eq!(root.get("k").unwrap().get_index(1).unwrap().to_f32().unwrap(), 2.5);

    // owned region: copies the input, entries tied to the wrapper
    let owned = OwnedJson::from_slice(text);
    let root = owned.parse_root().unwrap().unwrap();
    assert_eq!(root.get("k").unwrap().get_index(0).unwrap().to_i64().unwrap(), 1);

    // both wrappers expose the eager engine as well
    assert_eq!(raw.to_value().unwrap(), owned.to_value().unwrap());

    // FromStr validates eagerly
    let owned: OwnedJson = r#"{"a": 1}"#.parse().unwrap();
    assert_eq!(format!("{}", owned), r#"{"a":1}"#);
    assert!(r#"{"a"#.parse::<OwnedJson>().is_err());
}

#[test]
fn test_eager_lazy_equivalence() {
    let corpus: Vec<&[u8]> = vec![
        b"null",
        b"true",
        b"false",
        b"0",
        b"-42",
        b"5.5",
        br#""""#,
        br#""plain""#,
        br#""escA\n""#,
        b"[]",
        b"[1, null, 2, [3, [4.5]]]",
        br#"{"a": {"b": {"c": [true, false]}}}"#,
        b"{\"s\": \"\xF0\x9D\x84\x9E\", \"n\": -12.25, \"arr\": [1,2,3,]}",
        br#"  [5, 5.5, "a", [1,2], {"a":"b"}]  "#,
    ];
    for text in corpus {
        let eager = parse_value(text).unwrap();
        let lazy = parse_lazy_entry(text)
            .unwrap()
            .map(|entry| entry.parsed().unwrap());
        assert_eq!(eager, lazy, "engines disagree on {:?}", text);
    }

    for _ in 0..200 {
        let json = Value::rand_value();
        let source = format!("{}", json);
        let eager = parse_value(source.as_bytes()).unwrap().unwrap();
        let lazy = parse_lazy_entry(source.as_bytes()).unwrap().unwrap();
        assert_eq!(lazy.parsed().unwrap(), eager, "source={}", source);
    }
}

#[test]
fn test_shared_across_threads() {
    // a completed entry tree is immutable: independent subtrees can be
    // converted from worker threads after a single scan
    let text = br#"{"a": [1, 2, 3], "b": "x\ny", "c": 2.5}"#;
    let root = parse_lazy_entry(text).unwrap().unwrap();

    std::thread::scope(|scope| {
        let a = scope.spawn(|| root.get("a").unwrap().parsed().unwrap());
        let b = scope.spawn(|| root.get_str("b").unwrap().into_owned());
        let c = scope.spawn(|| root.get_f32("c").unwrap());

        assert_eq!(a.join().unwrap().array_length(), Some(3));
        assert_eq!(b.join().unwrap(), "x\ny");
        assert_eq!(c.join().unwrap(), 2.5);
    });
}
