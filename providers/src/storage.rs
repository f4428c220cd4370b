//! Codec for the persisted wallet store.
//!
//! The store is JSON with two extensions: maps are written as
//! `{"__type":"Map","value":[[key, value], ...]}` and big integers as
//! `{"__type":"bigint","value":"<digits>"}`. Stores written by older
//! clients carry big integers as strings ending in `#__bigint` instead.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::CookieError;

const TYPE_TAG: &str = "__type";
const MAP_TYPE: &str = "Map";
const BIGINT_TYPE: &str = "bigint";
const BIGINT_SUFFIX: &str = "#__bigint";

/// Finds `key=value` among `;`-separated cookie pairs.
pub(crate) fn parse_cookie<'a>(cookie: &'a str, key: &str) -> Option<&'a str> {
    cookie
        .split(';')
        .map(str::trim_start)
        .find_map(|pair| pair.strip_prefix(key)?.strip_prefix('='))
}

pub(crate) fn deserialize<T: DeserializeOwned>(raw: &str) -> Result<T, CookieError> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(serde_json::from_value(revive(value)?)?)
}

fn revive(value: Value) -> Result<Value, CookieError> {
    match value {
        Value::Object(object) => match object.get(TYPE_TAG).and_then(Value::as_str) {
            Some(MAP_TYPE) => revive_map(object),
            Some(BIGINT_TYPE) => match object.get("value") {
                Some(Value::String(digits)) => revive_bigint(digits),
                other => Err(CookieError::InvalidBigInt(
                    other.map(Value::to_string).unwrap_or_default(),
                )),
            },
            _ => revive_object(object),
        },
        Value::Array(items) => items
            .into_iter()
            .map(revive)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::String(text) => match text.strip_suffix(BIGINT_SUFFIX) {
            Some(digits) => revive_bigint(digits),
            None => Ok(Value::String(text)),
        },
        other => Ok(other),
    }
}

fn revive_object(object: Map<String, Value>) -> Result<Value, CookieError> {
    object
        .into_iter()
        .map(|(key, value)| Ok((key, revive(value)?)))
        .collect::<Result<Map<_, _>, _>>()
        .map(Value::Object)
}

fn revive_map(mut object: Map<String, Value>) -> Result<Value, CookieError> {
    let Some(Value::Array(entries)) = object.remove("value") else {
        return Err(CookieError::InvalidMap);
    };

    let mut map = Map::new();
    for entry in entries {
        let Value::Array(pair) = entry else {
            return Err(CookieError::InvalidMap);
        };
        let Ok([key, value]) = <[Value; 2]>::try_from(pair) else {
            return Err(CookieError::InvalidMap);
        };
        let key = match revive(key)? {
            Value::String(key) => key,
            other => other.to_string(),
        };
        map.insert(key, revive(value)?);
    }

    Ok(Value::Object(map))
}

fn revive_bigint(digits: &str) -> Result<Value, CookieError> {
    if let Ok(n) = digits.parse::<u64>() {
        return Ok(n.into());
    }
    digits
        .parse::<i64>()
        .map(Value::from)
        .map_err(|_| CookieError::InvalidBigInt(digits.to_owned()))
}

/// `serialize_with` helper writing a map in the store's tagged form.
pub(crate) fn serialize_tagged_map<S, V>(map: &BTreeMap<String, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let entries: Vec<(&String, &V)> = map.iter().collect();

    let mut tagged = serializer.serialize_map(Some(2))?;
    tagged.serialize_entry(TYPE_TAG, MAP_TYPE)?;
    tagged.serialize_entry("value", &entries)?;
    tagged.end()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn finds_cookie_among_others() {
        let cookie = "theme=dark; wagmi.store={\"a\":1}; other=x";
        assert_eq!(parse_cookie(cookie, "wagmi.store"), Some("{\"a\":1}"));
        assert_eq!(parse_cookie("wagmi.store=v;x=y", "wagmi.store"), Some("v"));
        assert_eq!(parse_cookie(cookie, "wagmi.recentConnectorId"), None);
    }

    #[test]
    fn key_must_match_exactly() {
        assert_eq!(parse_cookie("wagmi.storex=1", "wagmi.store"), None);
        assert_eq!(parse_cookie("xwagmi.store=1", "wagmi.store"), None);
    }

    #[test]
    fn revives_maps_and_bigints() {
        let raw = r#"{"m":{"__type":"Map","value":[["a",{"n":"12#__bigint"}],[7,"x"]]}}"#;
        let value: Value = deserialize(raw).unwrap();
        assert_eq!(value, json!({"m": {"a": {"n": 12}, "7": "x"}}));
    }

    #[test]
    fn rejects_broken_maps() {
        let raw = r#"{"__type":"Map","value":[["only-key"]]}"#;
        assert!(matches!(deserialize::<Value>(raw), Err(CookieError::InvalidMap)));

        let raw = r#"{"__type":"Map"}"#;
        assert!(matches!(deserialize::<Value>(raw), Err(CookieError::InvalidMap)));
    }

    #[test]
    fn revives_tagged_bigints() {
        let raw = r#"{"chainId":{"__type":"bigint","value":"84532"},"nonce":{"__type":"bigint","value":"-3"}}"#;
        let value: Value = deserialize(raw).unwrap();
        assert_eq!(value, json!({"chainId": 84532, "nonce": -3}));

        let raw = r#"{"__type":"Map","value":[["c1",{"__type":"bigint","value":"7"}]]}"#;
        assert_eq!(deserialize::<Value>(raw).unwrap(), json!({"c1": 7}));
    }

    #[test]
    fn rejects_tagged_bigints_without_digits() {
        for raw in [
            r#"{"__type":"bigint"}"#,
            r#"{"__type":"bigint","value":12}"#,
            r#"{"__type":"bigint","value":"1.5"}"#,
        ] {
            assert!(matches!(deserialize::<Value>(raw), Err(CookieError::InvalidBigInt(_))), "{raw}");
        }
    }

    #[test]
    fn rejects_oversized_bigints() {
        let raw = r#"["340282366920938463463374607431768211456#__bigint"]"#;
        assert!(matches!(deserialize::<Value>(raw), Err(CookieError::InvalidBigInt(_))));
    }

    #[test]
    fn tagged_map_shape() {
        #[derive(serde::Serialize)]
        struct Holder {
            #[serde(serialize_with = "serialize_tagged_map")]
            m: BTreeMap<String, u8>,
        }

        let holder = Holder {
            m: BTreeMap::from([("k".to_owned(), 1)]),
        };
        assert_eq!(
            serde_json::to_value(&holder).unwrap(),
            json!({"m": {"__type": "Map", "value": [["k", 1]]}})
        );
    }
}
