//! This module exports different types for JSON interactions.

use serde::de::DeserializeOwned;
use serde::ser::Serialize;

use crate::Result;

pub type Value = serde_json::Value;
pub type JsonMap = serde_json::Map<String, Value>;

pub use serde_json::json;
pub use serde_json::Error as JsonError;

#[cfg(feature = "http")]
pub(crate) async fn decode_resp<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let result = serde_json::from_slice(&resp.bytes().await?)?;
    Ok(result)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn to_vec<T>(v: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let result = serde_json::to_vec(v)?;
    Ok(result)
}

pub(crate) fn from_value<T>(v: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    let result = serde_json::from_value(v)?;
    Ok(result)
}

#[cfg(test)]
pub(crate) fn to_value<T>(value: T) -> Result<Value>
where
    T: Serialize,
{
    let result = serde_json::to_value(value)?;
    Ok(result)
}

#[cfg(test)]
#[track_caller]
pub(crate) fn assert_json<T>(data: &T, json: Value)
where
    T: Serialize + for<'de> serde::Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    // test serialization
    let serialized = to_value(data).unwrap();
    assert!(
        serialized == json,
        "data->JSON serialization failed\nexpected: {json:?}\n     got: {serialized:?}"
    );

    // test deserialization
    let deserialized = from_value::<T>(json).unwrap();
    assert!(
        &deserialized == data,
        "JSON->data deserialization failed\nexpected: {data:?}\n     got: {deserialized:?}"
    );
}
