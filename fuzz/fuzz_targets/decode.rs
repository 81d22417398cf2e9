#![no_main]

use densepack::Options;
use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, HashSet};

densepack::variants! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub enum Kind {
        #[default]
        0 => Unset,
        1 => Weight(u64),
        2 => Label(String),
    }
}

densepack::record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Probe {
        pub active: bool,
        pub kind: Kind,
        pub name: String,
        pub window: [u8; 4],
        pub offsets: Vec<i32>,
        pub scale: Option<f64>,
        pub lookup: BTreeMap<String, u32>,
        pub seen: HashSet<u16>,
        pub origin: (i64, i64),
    }
}

// Arbitrary bytes must decode to a value or an error, never a panic.
fuzz_target!(|data: &[u8]| {
    let all_options = [
        Options::NONE,
        Options::WITH_VERSION,
        Options::WITH_CHECKSUM,
        Options::WITH_VERSION | Options::WITH_CHECKSUM,
    ];
    for options in all_options {
        let _ = densepack::decode_with::<Probe>(data, options);
    }
});
