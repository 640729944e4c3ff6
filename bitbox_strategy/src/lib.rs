use bitbox::{Complex64, Decode, Encode};
use bytemuck::{Pod, Zeroable};
use bytes::Bytes;
use proptest::prelude::*;

/// A 32-byte account address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Encode, Decode)]
pub struct Address(pub [u8; 32]);

/// Storage slots a transaction touches.
#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct AccessList(pub Vec<u16>);

/// A transaction-like record with optional fields, a fixed array and two slices.
#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct Tx {
    pub chain_id: Option<u64>,
    pub nonce: u64,
    pub gas_price: Option<u64>,
    pub gas: u64,
    pub to: Option<Address>,
    pub value: Option<u64>,
    pub data: Vec<u8>,
    pub access_list: AccessList,
}

/// A fully populated [`Tx`].
pub fn make_tx() -> Tx {
    let mut to = [0u8; 32];
    for (i, b) in to.iter_mut().enumerate() {
        *b = i as u8 + 1;
    }

    Tx {
        chain_id: Some(11_155_111),
        nonce: 42,
        gas_price: Some(20_000_000_000),
        gas: 21_000,
        to: Some(Address(to)),
        value: Some(12_345),
        data: vec![9, 8, 7, 6],
        access_list: AccessList(vec![1, 3, 5, 7]),
    }
}

/// Four fields with no padding, copied as one block.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Encode, Decode)]
#[bitbox(pod)]
pub struct Aligned {
    pub a: u64,
    pub b: u32,
    pub c: u16,
    pub d: u16,
}

/// One newtype per value shape.
#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct Named {
    pub flag: Flag,
    pub small: Small,
    pub wide: Wide,
    pub ratio: Ratio,
    pub phase: Phase,
    pub label: Label,
    pub blob: Blob,
    pub samples: Samples,
    pub quad: Quad,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Encode, Decode)]
pub struct Flag(pub bool);

#[derive(Clone, Copy, Debug, Default, PartialEq, Encode, Decode)]
pub struct Small(pub i8);

#[derive(Clone, Copy, Debug, Default, PartialEq, Encode, Decode)]
pub struct Wide(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Encode, Decode)]
pub struct Ratio(pub f32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Encode, Decode)]
pub struct Phase(pub Complex64);

#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct Label(pub String);

#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct Blob(pub Bytes);

#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct Samples(pub Vec<u64>);

#[derive(Clone, Copy, Debug, Default, PartialEq, Encode, Decode)]
pub struct Quad(pub [u32; 4]);

/// A nested record mixing every composite shape.
#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct Nested {
    pub id: u32,
    pub parent: Option<Box<Nested>>,
    pub grid: Vec<Vec<u16>>,
    pub names: Vec<String>,
    pub ticks: Vec<Aligned>,
    pub pairs: Vec<(u8, Option<String>)>,
}

/// arbitrary Address for use with proptest
pub fn arb_address() -> impl Strategy<Value = Address> { any::<[u8; 32]>().prop_map(Address) }

/// arbitrary Tx for use with proptest
pub fn arb_tx() -> impl Strategy<Value = Tx> {
    (
        any::<Option<u64>>(),
        any::<u64>(),
        any::<Option<u64>>(),
        any::<u64>(),
        proptest::option::of(arb_address()),
        any::<Option<u64>>(),
        prop::collection::vec(any::<u8>(), 0..64),
        prop::collection::vec(any::<u16>(), 0..16),
    )
        .prop_map(|(chain_id, nonce, gas_price, gas, to, value, data, access_list)| {
            Tx {
                chain_id,
                nonce,
                gas_price,
                gas,
                to,
                value,
                data,
                access_list: AccessList(access_list),
            }
        })
}

/// arbitrary Aligned for use with proptest
pub fn arb_aligned() -> impl Strategy<Value = Aligned> {
    any::<(u64, u32, u16, u16)>().prop_map(|(a, b, c, d)| Aligned { a, b, c, d })
}

/// arbitrary float without NaN, so values compare equal after a round trip
fn arb_f32() -> impl Strategy<Value = f32> {
    prop::num::f32::NORMAL | prop::num::f32::ZERO | prop::num::f32::INFINITE | prop::num::f32::SUBNORMAL
}

fn arb_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::INFINITE | prop::num::f64::SUBNORMAL
}

/// arbitrary Named for use with proptest
pub fn arb_named() -> impl Strategy<Value = Named> {
    (
        (any::<bool>(), any::<i8>(), any::<u64>(), arb_f32()),
        (arb_f64(), arb_f64()),
        (
            any::<String>(),
            prop::collection::vec(any::<u8>(), 0..64),
            prop::collection::vec(any::<u64>(), 0..32),
            any::<[u32; 4]>(),
        ),
    )
        .prop_map(|((flag, small, wide, ratio), (re, im), (label, blob, samples, quad))| Named {
            flag: Flag(flag),
            small: Small(small),
            wide: Wide(wide),
            ratio: Ratio(ratio),
            phase: Phase(Complex64::new(re, im)),
            label: Label(label),
            blob: Blob(Bytes::from(blob)),
            samples: Samples(samples),
            quad: Quad(quad),
        })
}

fn arb_nested_leaf() -> impl Strategy<Value = Nested> {
    (
        any::<u32>(),
        prop::collection::vec(prop::collection::vec(any::<u16>(), 0..8), 0..8),
        prop::collection::vec(".*", 0..8),
        prop::collection::vec(arb_aligned(), 0..8),
        prop::collection::vec((any::<u8>(), proptest::option::of(".*")), 0..8),
    )
        .prop_map(|(id, grid, names, ticks, pairs)| Nested {
            id,
            parent: None,
            grid,
            names,
            ticks,
            pairs,
        })
}

/// arbitrary Nested for use with proptest
pub fn arb_nested() -> impl Strategy<Value = Nested> {
    arb_nested_leaf().prop_recursive(
        4, // max depth
        8, // max nodes
        1, // max items per collection
        |inner| {
            (arb_nested_leaf(), inner).prop_map(|(mut node, parent)| {
                node.parent = Some(Box::new(parent));
                node
            })
        },
    )
}
