//! End-to-end round-trips for macro-defined records across every supported
//! shape.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use densepack::{Decode, Encode, EncodeSize, Error, Options};

densepack::variants! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub enum Unit {
        #[default]
        0 => Dimensionless,
        1 => Celsius,
        2 => Scaled(f64),
        3 => Named(String),
    }
}

densepack::record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Channel {
        pub id: u16,
        pub gain: f32,
        pub unit: Unit,
    }
}

densepack::record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Snapshot {
        pub live: bool,
        pub station: String,
        pub channels: Vec<Channel>,
        pub calibration: [i16; 4],
        pub tags: BTreeSet<String>,
        pub extrema: HashMap<String, i64>,
        pub comment: Option<String>,
        pub origin: (f64, f64),
        pub blob: Vec<u8>,
    }
}

fn sample() -> Snapshot {
    Snapshot {
        live: true,
        station: "kodiak-3".into(),
        channels: vec![
            Channel {
                id: 300,
                gain: 0.5,
                unit: Unit::Scaled(9.81),
            },
            Channel {
                id: 2,
                gain: -1.0,
                unit: Unit::Dimensionless,
            },
        ],
        calibration: [-1, 0, 1, 300],
        tags: ["alpha", "beta"].iter().map(|s| s.to_string()).collect(),
        extrema: [("min".to_owned(), -40i64), ("max".to_owned(), 1 << 40)]
            .into_iter()
            .collect(),
        comment: Some("nominal".into()),
        origin: (57.79, -152.41),
        blob: vec![0, 255, 128],
    }
}

#[test]
fn round_trip_every_option_set() {
    let value = sample();
    for options in [
        Options::NONE,
        Options::WITH_VERSION,
        Options::WITH_CHECKSUM,
        Options::WITH_VERSION | Options::WITH_CHECKSUM,
    ] {
        let bytes = densepack::encode_with(&value, options);
        let decoded: Snapshot = densepack::decode_with(&bytes, options)
            .unwrap_or_else(|e| panic!("decode failed under {options:?}: {e}"));
        assert_eq!(decoded, value);
    }
}

#[test]
fn encode_size_is_exact() {
    let value = sample();
    let bytes = value.encode();
    assert_eq!(bytes.len(), value.encode_size());
}

#[test]
fn default_record_round_trips() {
    let value = Snapshot::default();
    let bytes = densepack::encode(&value);
    assert_eq!(densepack::decode::<Snapshot>(&bytes).unwrap(), value);
}

#[test]
fn enum_payloads_round_trip() {
    for unit in [
        Unit::Dimensionless,
        Unit::Celsius,
        Unit::Scaled(-0.25),
        Unit::Named("lux".into()),
    ] {
        let encoded = unit.encode();
        assert_eq!(encoded.len(), unit.encode_size());
        assert_eq!(Unit::decode(&encoded).unwrap(), unit);
    }
}

#[test]
fn unknown_variant_index_is_an_error() {
    assert_eq!(Unit::decode(&[0x04]), Err(Error::InvalidVariant(4)));
    assert_eq!(Unit::decode(&[0xAC, 0x02]), Err(Error::InvalidVariant(300)));
}

#[test]
fn deep_container_nesting() {
    type Deep = Vec<HashMap<String, Vec<Option<(u8, Vec<i32>)>>>>;
    let value: Deep = vec![
        [(
            "k".to_owned(),
            vec![None, Some((7, vec![-300, 300])), None],
        )]
        .into_iter()
        .collect(),
        HashMap::new(),
    ];
    let encoded = value.encode();
    assert_eq!(encoded.len(), value.encode_size());
    assert_eq!(Deep::decode(&encoded).unwrap(), value);
}

#[test]
fn hash_container_round_trip_is_order_independent() {
    // Two equal sets may serialize in different orders; equality after
    // decode is the contract.
    let set: HashSet<String> = (0..100).map(|i| format!("item-{i}")).collect();
    let decoded = HashSet::<String>::decode(&set.encode()).unwrap();
    assert_eq!(decoded, set);

    let map: BTreeMap<u16, Vec<bool>> =
        (0..50).map(|i| (i * 3, vec![i % 2 == 0])).collect();
    let decoded = BTreeMap::<u16, Vec<bool>>::decode(&map.encode()).unwrap();
    assert_eq!(decoded, map);
}

densepack::record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct ConcreteSample {
        pub flag: bool,
        pub s: String,
        pub i: i32,
        pub f: f32,
        pub list: Vec<i32>,
    }
}

#[test]
fn concrete_scenario_encodes_below_memory_footprint() {
    let value = ConcreteSample {
        flag: true,
        s: "Hello world!".into(),
        i: 5,
        f: 3.14,
        list: vec![1, 2, 3, 4, 5],
    };

    let bytes = densepack::encode(&value);
    // flag 1 + s (1 + 12) + i 1 + f 4 + list (1 + 5).
    assert_eq!(bytes.len(), 25);
    assert!(bytes.len() < std::mem::size_of::<ConcreteSample>());

    let decoded: ConcreteSample = densepack::decode(&bytes).unwrap();
    assert_eq!(decoded, value);
}

densepack::record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Node {
        pub value: u32,
        pub next: Option<Box<Node>>,
    }
}

#[test]
fn recursive_record_round_trips() {
    let chain = Node {
        value: 1,
        next: Some(Box::new(Node {
            value: 2,
            next: Some(Box::new(Node {
                value: 3,
                next: None,
            })),
        })),
    };

    for options in [Options::NONE, Options::WITH_VERSION | Options::WITH_CHECKSUM] {
        let bytes = densepack::encode_with(&chain, options);
        assert_eq!(
            densepack::decode_with::<Node>(&bytes, options).unwrap(),
            chain
        );
    }
}

#[test]
fn recursive_fingerprint_terminates_and_is_stable() {
    let first = densepack::fingerprint::<Node>();
    let second = densepack::fingerprint::<Node>();
    assert_eq!(first, second);
}
