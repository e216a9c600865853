use doctree::*;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

fn arg_node<V: Into<Scalar>>(name: &str, value: V) -> Node {
    let mut node = Node::new(name);
    node.push_arg(value);
    node
}

#[test]
fn strings() {
    let scalar = Scalar::encode(&'a').unwrap();
    let r = scalar.decode::<char>();
    assert_eq!(r, Ok('a'));

    let s = "Hello, world!";
    let scalar = Scalar::encode(&s).unwrap();
    let r = scalar.decode::<String>();
    assert_eq!(r, Ok(s.to_string()));

    // string decoding is total over scalar kinds
    assert_eq!(Scalar::new_float(3.25).decode::<String>(), Ok("3.25".to_string()));
    assert_eq!(Scalar::null().decode::<String>(), Ok("null".to_string()));
}

#[test]
fn optionals() {
    let none = Option::<u8>::None;
    let scalar = Scalar::encode(&none).unwrap();
    assert_eq!(scalar, Scalar::null());
    let r = scalar.decode::<Option<u8>>();
    assert_eq!(r, Ok(None));

    let some = Some(8u8);
    let scalar = Scalar::encode(&some).unwrap();
    let r = scalar.decode::<Option<u8>>();
    assert_eq!(r, Ok(Some(8)));

    // absent encodes as an empty node, and decodes back to absent
    let node = Node::encode(&none, "port").unwrap();
    assert!(node.args().is_empty());
    assert_eq!(node.decode::<Option<u8>>(), Ok(None));
}

#[test]
fn tuples() {
    let t = (1u8, "hello".to_string(), -0.5f32);
    let node = Node::encode(&t, "t").unwrap();
    let r = node.decode::<(u8, String, f32)>();
    assert_eq!(r, Ok(t));

    let t = (1u8,);
    let node = Node::encode(&t, "t").unwrap();
    let r = node.decode::<(u8,)>();
    assert_eq!(r, Ok(t));

    // document level: one anonymous node per field
    let t = (10i32, "x".to_string());
    let doc = Document::encode(&t).unwrap();
    assert_eq!(doc.nodes()[0].name(), "-");
    assert_eq!(doc.decode::<(i32, String)>(), Ok(t));
}

enumeration! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Channel {
        Stable = 0,
        Beta = 1,
        Nightly = 2,
    }
}

record! {
    #[derive(Debug, PartialEq, Clone)]
    pub struct Inner {
        depth: i32,
        weight: f64,
    }
}

record! {
    #[derive(Debug, PartialEq, Clone)]
    pub struct SomeRecord {
        n: i32,
        f: f64,
        s: String,
        flag: bool,
        channel: Channel,
        pair: (i64, String),
        inner: Inner,
        next: Option<Box<Inner>>,
        tags: Vec<String>,
        limits: BTreeMap<String, u32>,
    }
}

fn sample_record() -> SomeRecord {
    SomeRecord {
        n: -100,
        f: 2.75,
        s: "Hello, world!".to_string(),
        flag: true,
        channel: Channel::Beta,
        pair: (7, "seven".to_string()),
        inner: Inner {
            depth: 3,
            weight: 0.5,
        },
        next: Some(Box::new(Inner {
            depth: 4,
            weight: 1.5,
        })),
        tags: vec!["a".to_string(), "b".to_string()],
        limits: vec![("cpu".to_string(), 4), ("mem".to_string(), 512)]
            .into_iter()
            .collect(),
    }
}

#[test]
fn record_document_round_trip() {
    let record = sample_record();
    let doc = Document::encode(&record).unwrap();
    let r = doc.decode::<SomeRecord>();
    assert_eq!(r, Ok(record));
}

#[test]
fn record_node_round_trip() {
    let record = sample_record();
    let node = Node::encode(&record, "cfg").unwrap();
    let r = node.decode::<SomeRecord>();
    assert_eq!(r, Ok(record));
}

#[test]
fn record_fields_match_properties_and_children() {
    // scalar fields can arrive as properties rather than children
    let mut node = Node::new("inner");
    node.set_prop("depth", 9i64);
    node.set_prop("weight", 1.25);

    let r = node.decode::<Inner>();
    assert_eq!(
        r,
        Ok(Inner {
            depth: 9,
            weight: 1.25
        })
    );

    // a child overrides a property of the same name
    let mut node = Node::new("inner");
    node.set_prop("depth", 1i64);
    node.push_child(arg_node("depth", 2i64));
    assert_eq!(node.decode::<Inner>().unwrap().depth, 2);
}

#[test]
fn unmatched_fields_keep_their_defaults() {
    let record: SomeRecord = Document::new().decode().unwrap();
    assert_eq!(record.n, 0);
    assert_eq!(record.s, "");
    assert_eq!(record.channel, Channel::Stable);
    assert_eq!(record.next, None);
    assert!(record.tags.is_empty());
}

#[test]
fn unit_enum() {
    let scalar = Scalar::encode(&Channel::Nightly).unwrap();
    assert_eq!(scalar.str(), Some("Nightly"));
    assert_eq!(scalar.decode::<Channel>(), Ok(Channel::Nightly));

    // name matching is identifier-insensitive
    assert_eq!(
        Scalar::new_str("nightly").decode::<Channel>(),
        Ok(Channel::Nightly)
    );
    assert_eq!(
        Scalar::new_str("NIGHT_LY").decode::<Channel>(),
        Ok(Channel::Nightly)
    );
    assert!(Scalar::new_str("canary").decode::<Channel>().is_err());

    // contiguous ordinals decode from integers
    assert_eq!(Scalar::new_int(1).decode::<Channel>(), Ok(Channel::Beta));
    assert!(Scalar::new_int(3).decode::<Channel>().is_err());
}

tagged! {
    #[derive(Debug, PartialEq)]
    pub enum Shape by kind {
        Circle { radius: f64 },
        Rect { width: f64, height: f64 },
    }
}

#[test]
fn tagged_node_round_trip() {
    let shape = Shape::Rect {
        width: 3.0,
        height: 4.0,
    };
    let node = Node::encode(&shape, "shape").unwrap();
    assert_eq!(node.prop("kind").and_then(|v| v.str()), Some("Rect"));

    let r = node.decode::<Shape>();
    assert_eq!(r, Ok(shape));
}

#[test]
fn tagged_document_round_trip() {
    let shape = Shape::Circle { radius: 2.5 };
    let doc = Document::encode(&shape).unwrap();
    assert_eq!(doc.get("kind").unwrap().args()[0].str(), Some("Circle"));

    let r = doc.decode::<Shape>();
    assert_eq!(r, Ok(shape));
}

#[test]
fn tagged_absent_discriminator_takes_first_variant() {
    let mut node = Node::new("shape");
    node.push_child(arg_node("radius", 9.0));

    let r = node.decode::<Shape>();
    assert_eq!(r, Ok(Shape::Circle { radius: 9.0 }));
}

#[test]
fn seqs() {
    let v = vec![-1i32, 0, 1, 5];
    let doc = Document::encode(&v).unwrap();
    let r = doc.decode::<Vec<i32>>();
    assert_eq!(r, Ok(v.clone()));

    let node = Node::encode(&v, "values").unwrap();
    let r = node.decode::<Vec<i32>>();
    assert_eq!(r, Ok(v));

    // node arguments and children both contribute, arguments first
    let mut node = Node::new("values");
    node.push_arg(1i64);
    node.push_arg(2i64);
    node.push_child(arg_node("-", 3i64));
    assert_eq!(node.decode::<Vec<i64>>(), Ok(vec![1, 2, 3]));
}

#[test]
fn arrays() {
    let arr = [1u8, 2, 3];
    let node = Node::encode(&arr, "bytes").unwrap();
    assert_eq!(node.decode::<[u8; 3]>(), Ok(arr));

    // extra elements beyond the capacity are silently ignored
    let mut node = Node::new("bytes");
    for i in 0..5 {
        node.push_arg(i as i64);
    }
    assert_eq!(node.decode::<[i64; 3]>(), Ok([0, 1, 2]));

    // missing trailing elements keep their defaults
    let mut node = Node::new("bytes");
    node.push_arg(7i64);
    assert_eq!(node.decode::<[i64; 3]>(), Ok([7, 0, 0]));
}

#[test]
fn sets() {
    let set: HashSet<i32> = vec![3, 1, 2].into_iter().collect();
    let doc = Document::encode(&set).unwrap();
    assert_eq!(doc.decode::<HashSet<i32>>(), Ok(set));

    let set: BTreeSet<String> = vec!["a".to_string(), "b".to_string()]
        .into_iter()
        .collect();
    let node = Node::encode(&set, "names").unwrap();
    assert_eq!(node.decode::<BTreeSet<String>>(), Ok(set));

    // duplicates merge per normal set semantics
    let mut node = Node::new("names");
    node.push_arg("x");
    node.push_arg("x");
    let set: BTreeSet<String> = node.decode().unwrap();
    assert_eq!(set.len(), 1);
}

#[test]
fn maps() {
    let m: HashMap<String, u32> = vec![("a", 0u32), ("b", 1), ("c", 2)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    let doc = Document::encode(&m).unwrap();
    let r = doc.decode::<HashMap<String, u32>>();
    assert_eq!(r, Ok(m.clone()));

    let node = Node::encode(&m, "counts").unwrap();
    let r = node.decode::<HashMap<String, u32>>();
    assert_eq!(r, Ok(m));

    // properties and children both contribute; children override
    let mut node = Node::new("counts");
    node.set_prop("a", 1i64);
    node.push_child(arg_node("a", 2i64));
    node.push_child(arg_node("b", 3i64));
    let m: BTreeMap<String, i64> = node.decode().unwrap();
    assert_eq!(m.get("a"), Some(&2));
    assert_eq!(m.get("b"), Some(&3));
}

#[test]
fn boxed_values_are_transparent() {
    let boxed = Box::new(42u16);
    let scalar = Scalar::encode(&boxed).unwrap();
    assert_eq!(scalar, Scalar::new_int(42));
    assert_eq!(scalar.decode::<Box<u16>>(), Ok(boxed));
}

#[test]
fn scalar_node_arity() {
    // a scalar target needs exactly one argument
    let node = Node::new("port");
    assert!(node.decode::<u16>().is_err());

    let mut node = Node::new("port");
    node.push_arg(80i64);
    node.push_arg(443i64);
    let err = node.decode::<u16>().unwrap_err();
    assert_eq!(err.to_string(), "expected a single argument, found 2");
}

#[test]
fn numeric_conversions() {
    // integer and float sources interconvert, with truncation
    assert_eq!(Scalar::new_float(3.99).decode::<u8>(), Ok(3));
    assert_eq!(Scalar::new_int(3).decode::<f64>(), Ok(3.0));
    assert!(Scalar::new_int(300).decode::<u8>().is_err());
    assert!(Scalar::new_str("3").decode::<u8>().is_err());

    // booleans and characters are strict
    assert!(Scalar::new_int(1).decode::<bool>().is_err());
    assert_eq!(Scalar::new_bool(true).decode::<bool>(), Ok(true));
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Renamed {
        kind: String,
        size: u32,
    }
    rename: |field: &'static str| match field {
        "kind" => "type",
        other => other,
    };
}

#[test]
fn rename_hook_round_trip() {
    let value = Renamed {
        kind: "file".to_string(),
        size: 10,
    };

    let node = Node::encode(&value, "entry").unwrap();
    assert!(node.child("type").is_some());
    assert!(node.child("kind").is_none());

    assert_eq!(node.decode::<Renamed>(), Ok(value));
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Checked {
        lo: i32,
        hi: i32,
    }
    post: |c: &mut Checked| {
        if c.hi < c.lo {
            return Err(Error::new("hi below lo"));
        }
        Ok(())
    };
}

#[test]
fn post_hook_validates() {
    let mut node = Node::new("range");
    node.set_prop("lo", 1i64);
    node.set_prop("hi", 5i64);
    assert!(node.decode::<Checked>().is_ok());

    let mut node = Node::new("range");
    node.set_prop("lo", 5i64);
    node.set_prop("hi", 1i64);
    assert_eq!(
        node.decode::<Checked>().unwrap_err().to_string(),
        "hi below lo"
    );
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Counter {
        count: u32,
    }
    init: || Counter { count: 100 };
}

#[test]
fn init_hook_replaces_the_default() {
    let counter: Counter = Document::new().decode().unwrap();
    assert_eq!(counter.count, 100);

    let mut doc = Document::new();
    doc.push(arg_node("count", 7i64));
    assert_eq!(doc.decode::<Counter>().unwrap().count, 7);
}
