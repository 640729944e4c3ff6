use bitbox::prelude::*;
use bitbox_strategy::*;
use proptest::prelude::*;

fn round_trip<T: Encode + Decode + Default + PartialEq + std::fmt::Debug>(value: &T) {
    let mut buf = Buffer::new();
    encode(&mut buf, value).unwrap();

    let mut out = T::default();
    decode(&mut buf, &mut out).unwrap();

    assert_eq!(&out, value);
    assert!(buf.is_empty(), "{} bytes left over", buf.len());
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn tx(tx in arb_tx()) { round_trip(&tx); }

    #[test]
    fn named(named in arb_named()) { round_trip(&named); }

    #[test]
    fn nested(nested in arb_nested()) { round_trip(&nested); }

    #[test]
    fn pod_slices(ticks in prop::collection::vec(arb_aligned(), 0..64)) {
        let buf = encode_full(&ticks).unwrap();
        // count, then one 16-byte block per element
        prop_assert_eq!(buf.len(), 4 + 16 * ticks.len());

        round_trip(&ticks);
    }

    #[test]
    fn scalars(
        ints in any::<(u8, i16, u32, i64, u128, isize)>(),
        rest in any::<(bool, char, Option<u16>, String, Vec<i32>)>()
    ) {
        round_trip(&(ints, rest));
    }

    #[test]
    fn decode_over_stale_value(a in arb_tx(), b in arb_tx()) {
        let mut out = a;
        let mut buf = encode_full(&b).unwrap();
        decode(&mut buf, &mut out).unwrap();

        prop_assert_eq!(out, b);
    }

    #[test]
    fn reused_buffer(txs in prop::collection::vec(arb_tx(), 1..16)) {
        let mut buf = Buffer::with_capacity(256);
        let mut out = Tx::default();

        for tx in &txs {
            buf.clear();
            encode(&mut buf, tx).unwrap();
            decode(&mut buf, &mut out).unwrap();

            prop_assert_eq!(&out, tx);
        }
    }

    #[test]
    fn truncated_input_is_out_of_bounds(tx in arb_tx(), cut in any::<prop::sample::Index>()) {
        let buf = encode_full(&tx).unwrap();
        let short = &buf.data()[..cut.index(buf.len())];

        match decode_full::<Tx>(short) {
            Err(Error::OutOfBounds { need, have }) => prop_assert!(need > have),
            other => prop_assert!(false, "expected out of bounds, got {:?}", other),
        }
    }
}
