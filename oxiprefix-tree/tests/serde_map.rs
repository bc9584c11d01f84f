//! Code map persistence through serde.
#![cfg(feature = "serde")]

use oxiprefix_tree::{
    Code, CodeMap, DecoderConfig, FrequencyTreeBuilder, PrefixDecoder, PrefixEncoder,
};

fn map_for(text: &str) -> CodeMap<char> {
    let mut builder = FrequencyTreeBuilder::new();
    builder.add_values(text.chars()).unwrap();
    builder.build_tree().unwrap().code_map()
}

#[test]
fn test_code_serializes_as_bit_string() {
    let code: Code = "0110".parse().unwrap();
    assert_eq!(serde_json::to_string(&code).unwrap(), "\"0110\"");
    let back: Code = serde_json::from_str("\"0110\"").unwrap();
    assert_eq!(back, code);
}

#[test]
fn test_code_rejects_bad_bit_string() {
    assert!(serde_json::from_str::<Code>("\"01a\"").is_err());
}

#[test]
fn test_map_survives_json() {
    let map = map_for("AAAAABBCD");
    let json = serde_json::to_string(&map).unwrap();
    assert!(json.contains("\"000\""));

    let restored: CodeMap<char> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, map);

    // A decoder built from the restored map reads the original encoding.
    let text: Vec<char> = "DABBAC".chars().collect();
    let encoded = PrefixEncoder::new(map).encode(&text).unwrap();
    let decoder = PrefixDecoder::with_config(&restored, DecoderConfig::STRICT);
    assert_eq!(decoder.decode(&encoded).unwrap(), text);
}

#[test]
fn test_config_serializes() {
    let json = serde_json::to_string(&DecoderConfig::STRICT).unwrap();
    let back: DecoderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, DecoderConfig::STRICT);
}
