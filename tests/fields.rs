use pocojson::*;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[derive(Default, Debug, PartialEq)]
struct XY {
    x: i32,
    y: i32,
}
json_fields!(XY { x, y });

#[derive(Default, Debug, PartialEq)]
struct Record {
    id: u64,
    name: FixedStr<8>,
    value: f64,
    tags: Vec<String>,
    pos: Option<XY>,
    corners: [XY; 2],
    meta: BTreeMap<String, Value>,
    shared: Option<Rc<XY>>,
    note: String,
    raw: Value,
}
json_fields!(Record {
    id,
    name,
    value,
    tags,
    pos,
    corners,
    meta,
    shared,
    note as "the note",
    #[json(skip)] raw,
});

const RECORD: &str = r#"{
    "name": "widget",
    "id": 42,
    "value": 1.5e2,
    "tags": ["a", "b\tc"],
    "pos": {"y": -1, "x": 3},
    "corners": [{"x": 0, "y": 0}, {"x": 9, "y": 9}],
    "meta": {"k": [true, null], "n": 2},
    "shared": null,
    "the note": "hello",
    "note": "not this one",
    "raw": {"would": "be ignored"},
    "unknown": {"deep": [1, [2, [3]], {"x": "y"}]}
}"#;

fn record() -> Record {
    let mut r = Record::default();
    decode(&mut r, RECORD.as_bytes(), Some(RECORD.len())).unwrap();
    r
}

#[test]
fn test_record() {
    let r = record();
    assert_eq!(r.id, 42);
    assert_eq!(r.name, "widget");
    assert_eq!(r.value, 150.0);
    assert_eq!(r.tags, ["a", "b\tc"]);
    assert_eq!(r.pos, Some(XY { x: 3, y: -1 }));
    assert_eq!(r.corners, [XY { x: 0, y: 0 }, XY { x: 9, y: 9 }]);
    assert_eq!(r.meta["k"][0], Value::Bool(true));
    assert_eq!(r.meta["n"], Value::Num(2.0));
    assert_eq!(r.shared, None);
    assert_eq!(r.note, "hello");
    assert_eq!(r.raw, Value::Null);
}

#[test]
fn test_table_is_sorted() {
    let names: Vec<&str> = Record::FIELDS.entries().iter().map(|e| e.name).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(Record::FIELDS.len(), 10);
    let raw = Record::FIELDS.resolve(b"raw").unwrap();
    assert_eq!(raw.option, FieldOption::Skip);
    assert_eq!(raw.slot, 9);
    assert_eq!(Record::FIELDS.resolve(b"note"), None);
    assert_eq!(Record::FIELDS.resolve(b"the note").map(|e| e.slot), Some(8));
}

#[test]
fn test_unknown_keys_leave_siblings_alone() {
    let xy: XY = from_str(r#"{"x":1,"unknownkey":{"a":[1,2,3]},"y":2}"#).unwrap();
    assert_eq!(xy, XY { x: 1, y: 2 });
    let xy: XY = from_str(r#"{"xx":5,"x":1,"":{},"X":7,"y":2,"yy":[]}"#).unwrap();
    assert_eq!(xy, XY { x: 1, y: 2 });
    // unknown values still have to be well-formed
    assert_eq!(
        from_str::<XY>(r#"{"x":1,"zzz":[1,,2],"y":2}"#).unwrap_err().kind,
        ErrorKind::Expected("value")
    );
}

#[test]
fn test_whitespace_between_tokens() {
    let compact: String = RECORD.split_whitespace().collect::<Vec<_>>().join(" ");
    // "the note" has a space inside a string; split/join keeps it
    let mut spaced = String::new();
    let mut in_str = false;
    let mut esc = false;
    for c in compact.chars() {
        if in_str {
            spaced.push(c);
            if esc {
                esc = false;
            } else if c == '\\' {
                esc = true;
            } else if c == '"' {
                in_str = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_str = true;
                spaced.push_str(" \r\n\t");
                spaced.push(c);
            }
            '{' | '}' | '[' | ']' | ',' | ':' => {
                spaced.push_str(" \n ");
                spaced.push(c);
                spaced.push_str("\t ");
            }
            _ => spaced.push(c),
        }
    }
    let mut r = Record::default();
    decode(&mut r, spaced.as_bytes(), Some(spaced.len())).unwrap();
    assert_eq!(r, record());
}

#[test]
fn test_capacity() {
    let e = from_str::<Record>(r#"{"name": "ninechars"}"#).unwrap_err();
    assert_eq!(e.kind, ErrorKind::StringCapacity);
    assert_eq!(e.class(), ErrorClass::Capacity);
    let r: Record = from_str(r#"{"name": "eightchr"}"#).unwrap();
    assert_eq!(r.name.len(), FixedStr::<8>::CAPACITY);

    let e = from_str::<Record>(r#"{"corners": [{}, {}, {}]}"#).unwrap_err();
    assert_eq!(e.kind, ErrorKind::ArrayCapacity { capacity: 2 });

    // struct keys go through the bounded key buffer, map keys don't
    let long = "k".repeat(101);
    let json = format!(r#"{{"{}": 1, "x": 2}}"#, long);
    assert_eq!(
        from_str::<XY>(&json).unwrap_err().kind,
        ErrorKind::StringCapacity
    );
    let mut xy = XY::default();
    let opts = Options::DEFAULT.key_capacity(200);
    decode_with(&mut xy, json.as_bytes(), Some(json.len()), &opts).unwrap();
    assert_eq!(xy, XY { x: 2, y: 0 });
    let m: HashMap<String, u8> = from_str(&json).unwrap();
    assert_eq!(m[&long], 1);

    // default key buffer holds 99 bytes
    let at_limit = format!(r#"{{"{}": 1, "y": 3}}"#, "k".repeat(99));
    assert_eq!(from_str::<XY>(&at_limit), Ok(XY { x: 0, y: 3 }));
    let over = format!(r#"{{"{}": 1}}"#, "k".repeat(100));
    let e = from_str::<XY>(&over).unwrap_err();
    assert_eq!(e.kind, ErrorKind::StringCapacity);
}

#[test]
fn test_optional() {
    let r: Record = from_str(r#"{"pos": null, "shared": {"x": 1}}"#).unwrap();
    assert_eq!(r.pos, None);
    assert_eq!(r.shared.as_deref(), Some(&XY { x: 1, y: 0 }));

    let mut r = record();
    decode(&mut r, br#"{"pos": null}"#, Some(13)).unwrap();
    assert_eq!(r.pos, None);
}

#[test]
fn test_shape_mismatch() {
    let kind = |s: &str| from_str::<Record>(s).unwrap_err().kind;
    assert_eq!(kind(r#"{"id": "42"}"#), ErrorKind::InvalidNumber);
    assert_eq!(kind(r#"{"id": 4.2}"#), ErrorKind::FractionalInteger);
    assert_eq!(kind(r#"{"tags": "a"}"#), ErrorKind::Expected("array"));
    assert_eq!(kind(r#"{"pos": [1, 2]}"#), ErrorKind::Expected("object"));
    assert_eq!(kind(r#"[]"#), ErrorKind::Expected("object"));
    assert_eq!(kind(r#"{"note": 1, "id": 1"#), ErrorKind::UnexpectedEnd);
}

/// Registered by hand instead of through the macro.
#[derive(Default, Debug, PartialEq)]
struct Manual {
    alpha: bool,
    beta: Vec<u8>,
}

const MANUAL_FIELDS: &[Entry] = &[
    Entry::new("alpha", 0, FieldOption::Decode),
    Entry::new("beta", 1, FieldOption::Decode),
    Entry::new("gamma", 2, FieldOption::Skip),
];

impl Fields for Manual {
    const FIELDS: FieldTable = FieldTable::new(MANUAL_FIELDS);

    fn decode_field<C: Cursor>(&mut self, slot: usize, r: &mut Reader<C>) -> Result<()> {
        match slot {
            0 => self.alpha.decode(r),
            1 => self.beta.decode(r),
            _ => r.ignore_value(),
        }
    }
}

impl Decode for Manual {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        fields::decode_fields(self, r)
    }
}

#[test]
fn test_manual_registration() {
    let m: Manual = from_str(r#"{"gamma": {"a": 1}, "beta": [1, 2], "alpha": true}"#).unwrap();
    assert_eq!(m, Manual { alpha: true, beta: vec![1, 2] });
    let v: Vec<Manual> = from_str(r#"[{}, {"alpha": false}]"#).unwrap();
    assert_eq!(v.len(), 2);
}

#[test]
fn test_resolver_feed() {
    let mut r = Manual::FIELDS.resolver();
    assert_eq!(r.feed(b'b'), Resolution::Pending);
    assert_eq!(r.feed_all(b"et"), Resolution::Pending);
    assert!(matches!(r.feed(b'a'), Resolution::Matched(e) if e.name == "beta"));
    let mut r = Manual::FIELDS.resolver();
    assert_eq!(r.feed(b'z'), Resolution::Unknown);
}
