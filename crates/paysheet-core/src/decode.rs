//! Best-effort decoding of API responses.

use serde_json::Value;

/// A model that can be built from a raw JSON API response.
///
/// Decoding is best effort: a payload that does not have the required shape
/// yields `None` instead of an error. The transport layer decides whether a
/// missing model is an error for the caller.
pub trait ApiResponseDecodable: Sized {
    /// Decode `response`, returning `None` if required fields are missing.
    fn decoded_object(response: &Value) -> Option<Self>;
}

/// Decode an array of strings. Any non-string element fails the whole list.
pub(crate) fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
