//! Round-trip properties of the tokenizer.
//!
//! ```text
//! field set ──encode (AI + value, FNC1 after variable fields)──> raw
//! raw ──decode──> field set'      field set == field set'
//! ```

use gs1_core::FNC1;
use gs1_decode::decode;
use gs1_registry::AiRegistry;
use proptest::prelude::*;

/// Fixed-length AIs with their value lengths
const FIXED: &[(&str, usize)] = &[
    ("00", 18),
    ("01", 14),
    ("02", 14),
    ("11", 6),
    ("13", 6),
    ("15", 6),
    ("17", 6),
    ("20", 2),
    ("410", 13),
    ("414", 13),
    ("8005", 6),
    ("3102", 6),
    ("3151", 6),
];

const VARIABLE: &[&str] = &["10", "21", "22", "90", "240", "241", "400"];

fn fixed_fields() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::sample::subsequence(FIXED.to_vec(), 1..=FIXED.len())
        .prop_shuffle()
        .prop_flat_map(|ais| {
            let values: Vec<_> = ais
                .iter()
                .map(|(_, len)| proptest::string::string_regex(&format!("[0-9]{{{}}}", len)).unwrap())
                .collect();
            let codes: Vec<String> = ais.iter().map(|(code, _)| code.to_string()).collect();
            (Just(codes), values)
        })
        .prop_map(|(codes, values)| codes.into_iter().zip(values).collect())
}

fn encode(fields: &[(String, String)]) -> String {
    fields.iter().map(|(ai, value)| format!("{}{}", ai, value)).collect()
}

#[test]
fn test_documented_example() {
    let decoded = decode("010761303438397917231231101B12345", &AiRegistry::builtin());

    assert_eq!(decoded.fields.get("01"), Some("07613034383979"));
    assert_eq!(decoded.fields.get("17"), Some("231231"));
    assert_eq!(decoded.fields.get("10"), Some("1B12345"));
}

proptest! {
    #[test]
    fn fixed_length_fields_round_trip(fields in fixed_fields()) {
        let registry = AiRegistry::builtin();
        let raw = encode(&fields);

        let decoded = decode(&raw, &registry);
        let got: Vec<(String, String)> = decoded
            .fields
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect();

        prop_assert_eq!(got, fields.clone());
        prop_assert!(decoded.is_complete());

        // Encoding the decoded set again gives the same text
        prop_assert_eq!(encode(&fields), raw);
    }

    #[test]
    fn terminated_variable_value_is_preserved(
        ai_index in 0..VARIABLE.len(),
        value in "[A-Za-z0-9\\-/.]{1,40}",
    ) {
        let registry = AiRegistry::builtin();
        let ai = VARIABLE[ai_index];
        let raw = format!("{}{}{}", ai, value, FNC1);

        let decoded = decode(&raw, &registry);
        prop_assert_eq!(decoded.fields.get(ai), Some(value.as_str()));
        prop_assert_eq!(decoded.fields.len(), 1);
    }

    #[test]
    fn terminated_variable_value_between_fields(
        gtin in "[0-9]{14}",
        lot in "[A-Z0-9]{1,20}",
        serial in "[A-Z0-9]{1,20}",
    ) {
        let registry = AiRegistry::builtin();
        let raw = format!("01{}10{}{}21{}", gtin, lot, FNC1, serial);

        let decoded = decode(&raw, &registry);
        prop_assert_eq!(decoded.fields.gtin(), Some(gtin.as_str()));
        prop_assert_eq!(decoded.fields.lot(), Some(lot.as_str()));
        prop_assert_eq!(decoded.fields.serial(), Some(serial.as_str()));
    }

    #[test]
    fn decode_never_panics(raw in "\\PC{0,60}") {
        let registry = AiRegistry::builtin();
        let _ = decode(&raw, &registry);
    }
}
