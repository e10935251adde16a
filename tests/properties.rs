use bitpack::{CompiledFormat, Value, byteswap};
use proptest::prelude::*;

/// A single format token and the value it packs, if any.
fn field() -> impl Strategy<Value = (String, Option<Value>)> {
    prop_oneof![
        (1usize..=64).prop_flat_map(|bits| {
            let max = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
            (0..=max).prop_map(move |v| (format!("u{bits}"), Some(Value::U64(v))))
        }),
        (1usize..=64).prop_flat_map(|bits| {
            let (min, max) = signed_range(bits);
            (min..=max).prop_map(move |v| (format!("s{bits}"), Some(Value::I64(v))))
        }),
        prop::num::f32::NORMAL.prop_map(|v| ("f32".to_string(), Some(Value::F64(v as f64)))),
        prop::num::f64::NORMAL.prop_map(|v| ("f64".to_string(), Some(Value::F64(v)))),
        any::<bool>().prop_map(|v| ("?1".to_string(), Some(Value::Bool(v)))),
        prop::collection::vec(any::<u8>(), 1..8)
            .prop_map(|v| (format!("b{}", v.len() * 8), Some(Value::Bytes(v)))),
        "[a-z0-9]{1,8}".prop_map(|v| (format!("t{}", v.len() * 8), Some(Value::Text(v)))),
        (0usize..=12, any::<bool>()).prop_map(|(bits, one)| {
            let tag = if one { 'P' } else { 'p' };
            (format!("{tag}{bits}"), None::<Value>)
        }),
    ]
}

/// A format string of up to a dozen fields, some with a byte order prefix, and its values.
fn format_and_values() -> impl Strategy<Value = (String, Vec<Value>)> {
    prop::collection::vec((prop_oneof!["", "<", ">"], field()), 1..12).prop_map(|fields| {
        let mut format = String::new();
        let mut values = Vec::new();

        for (prefix, (token, value)) in fields {
            format.push_str(&prefix);
            format.push_str(&token);
            values.extend(value);
        }

        (format, values)
    })
}

fn signed_range(bits: usize) -> (i64, i64) {
    if bits == 64 {
        (i64::MIN, i64::MAX)
    } else {
        (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
    }
}

proptest! {
    #[test]
    fn prop_round_trip((format, values) in format_and_values()) {
        let packed = bitpack::pack(&format, &values).unwrap();
        prop_assert_eq!(bitpack::unpack(&format, &packed).unwrap(), values);
    }

    #[test]
    fn prop_size_law((format, values) in format_and_values()) {
        let packed = bitpack::pack(&format, &values).unwrap();
        let bits = bitpack::calcsize(&format).unwrap();
        prop_assert_eq!(packed.len(), bits.div_ceil(8));
    }

    #[test]
    fn prop_trailing_bits_are_zero((format, values) in format_and_values()) {
        let packed = bitpack::pack(&format, &values).unwrap();
        let bits = bitpack::calcsize(&format).unwrap();
        let unused = packed.len() * 8 - bits;

        if let Some(last) = packed.last() {
            prop_assert_eq!(*last as u32 & ((1u32 << unused) - 1), 0);
        }
    }

    #[test]
    fn prop_padding_is_opaque((format, values) in format_and_values()) {
        let compiled = CompiledFormat::compile(&format).unwrap();
        let packed = compiled.pack(&values).unwrap();

        prop_assert_eq!(compiled.unpack(&packed).unwrap().len(), compiled.value_count());
        prop_assert_eq!(compiled.value_count(), values.len());
    }

    #[test]
    fn prop_display_recompiles((format, _values) in format_and_values()) {
        let compiled = CompiledFormat::compile(&format).unwrap();
        prop_assert_eq!(CompiledFormat::compile(&compiled.to_string()).unwrap(), compiled);
    }

    #[test]
    fn prop_twos_complement(
        (bits, v) in (2usize..=64).prop_flat_map(|bits| {
            let (min, max) = signed_range(bits);
            (Just(bits), min..=max)
        })
    ) {
        let format = format!("s{bits}");
        let packed = bitpack::pack(&format, &[Value::I64(v)]).unwrap();
        prop_assert_eq!(bitpack::unpack(&format, &packed).unwrap(), vec![Value::I64(v)]);
    }

    #[test]
    fn prop_float32_exact(v in prop::num::f32::ANY.prop_filter("not NaN", |v| !v.is_nan())) {
        let packed = bitpack::pack("f32", &[Value::F64(v as f64)]).unwrap();
        prop_assert_eq!(&packed, &v.to_be_bytes().to_vec());
        prop_assert_eq!(bitpack::unpack("f32", &packed).unwrap(), vec![Value::F64(v as f64)]);
    }

    #[test]
    fn prop_float16_exact(raw in any::<u16>()) {
        let v = half::f16::from_bits(raw);
        prop_assume!(!v.is_nan());

        let packed = bitpack::pack("p3f16", &[Value::F64(v.to_f64())]).unwrap();
        prop_assert_eq!(
            bitpack::unpack("p3f16", &packed).unwrap(),
            vec![Value::F64(v.to_f64())]
        );
    }

    #[test]
    fn prop_swap_involution(
        (group, data) in (1usize..=9).prop_flat_map(|group| {
            (Just(group), (0usize..8).prop_flat_map(move |n| {
                prop::collection::vec(any::<u8>(), n * group)
            }))
        })
    ) {
        let pattern = group.to_string();
        let once = byteswap(&pattern, &data).unwrap();
        prop_assert_eq!(byteswap(&pattern, &once).unwrap(), data);
    }
}
