//! Decoding helpers for the verifyReceipt wire format, which encodes most
//! booleans and numbers as JSON strings.

use serde::{
    de::{Error, Unexpected},
    Deserialize, Deserializer,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Deserializes a boolean sent either as a JSON bool or as one of the strings
/// `"true"`, `"false"`, `"1"`, `"0"`.
pub(crate) fn string_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match RawFlag::deserialize(deserializer)? {
        RawFlag::Bool(b) => Ok(b),
        RawFlag::Text(s) => parse_flag(&s).ok_or_else(|| {
            D::Error::invalid_value(Unexpected::Str(&s), &r#""true", "false", "1" or "0""#)
        }),
    }
}
