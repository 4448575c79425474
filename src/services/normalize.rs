/// Response normalization for the book endpoints
///
/// The service is expected to answer with a JSON array of book records, but has been
/// observed to send the array double-encoded as a JSON string, or as an object keyed
/// by row index. Every shape collapses into a `Vec<Book>`; anything unusable becomes
/// an empty list and a log line, never an error.
use serde_json::{Map, Value};

use crate::models::Book;

/// Normalizes a decoded response body into a list of books
pub fn normalize_books(payload: Value) -> Vec<Book> {
    match payload {
        Value::Array(records) => collect_records(records),
        Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
            Ok(decoded) => normalize_books(decoded),
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode string-encoded book payload");
                Vec::new()
            }
        },
        Value::Object(map) => {
            let records = ordered_values(map);
            tracing::debug!(count = records.len(), "Converted keyed book payload to list");
            collect_records(records)
        }
        other => {
            tracing::warn!(kind = value_kind(&other), "Unexpected book payload, using empty list");
            Vec::new()
        }
    }
}

/// Normalizes a raw response body
///
/// A body that is not JSON at all is treated like an undecodable string payload.
pub fn normalize_body(body: &str) -> Vec<Book> {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => normalize_books(payload),
        Err(e) => {
            tracing::error!(error = %e, body_len = body.len(), "Response body is not JSON");
            Vec::new()
        }
    }
}

fn collect_records(records: Vec<Value>) -> Vec<Book> {
    let total = records.len();
    let books: Vec<Book> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Book>(record) {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed book record");
                None
            }
        })
        .collect();

    if books.len() < total {
        tracing::warn!(
            kept = books.len(),
            skipped = total - books.len(),
            "Dropped malformed book records"
        );
    }

    books
}

// Integer-like keys come first in ascending numeric order, the rest keep document
// order. This is the enumeration order a JavaScript producer would have used.
fn ordered_values(map: Map<String, Value>) -> Vec<Value> {
    let (mut indexed, named): (Vec<_>, Vec<_>) = map
        .into_iter()
        .partition(|(key, _)| array_index(key).is_some());

    indexed.sort_by_key(|(key, _)| array_index(key));

    indexed
        .into_iter()
        .chain(named)
        .map(|(_, value)| value)
        .collect()
}

fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    // Reject "01", "+1" and friends
    (index.to_string() == key).then_some(index)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_array_used_directly() {
        let payload = json!([
            { "Title": "Dune", "authors": "Frank Herbert" },
            { "Title": "Emma", "authors": "Jane Austen" }
        ]);
        let books = normalize_books(payload);
        assert_eq!(titles(&books), vec!["Dune", "Emma"]);
        assert_eq!(books[0].authors, "Frank Herbert");
    }

    #[test]
    fn test_string_payload_decoded() {
        let payload = Value::String(r#"[{"Title":"Dune"},{"Title":"Emma"}]"#.to_string());
        assert_eq!(titles(&normalize_books(payload)), vec!["Dune", "Emma"]);
    }

    #[test]
    fn test_keyed_object_yields_values_in_index_order() {
        let payload: Value = serde_json::from_str(
            r#"{"10": {"Title": "K"}, "2": {"Title": "C"}, "0": {"Title": "A"}, "1": {"Title": "B"}}"#,
        )
        .unwrap();
        assert_eq!(titles(&normalize_books(payload)), vec!["A", "B", "C", "K"]);
    }

    #[test]
    fn test_named_keys_keep_document_order_after_indices() {
        let payload: Value = serde_json::from_str(
            r#"{"zeta": {"Title": "Z"}, "1": {"Title": "B"}, "alpha": {"Title": "Y"}, "01": {"Title": "X"}}"#,
        )
        .unwrap();
        assert_eq!(titles(&normalize_books(payload)), vec!["B", "Z", "Y", "X"]);
    }

    #[test]
    fn test_malformed_string_yields_empty() {
        let payload = Value::String("[{not json".to_string());
        assert!(normalize_books(payload).is_empty());
    }

    #[test]
    fn test_null_and_scalars_yield_empty() {
        assert!(normalize_books(Value::Null).is_empty());
        assert!(normalize_books(json!(42)).is_empty());
        assert!(normalize_books(json!(true)).is_empty());
    }

    #[test]
    fn test_non_object_records_skipped() {
        let payload = json!([{ "Title": "Dune" }, 7, "Emma", null]);
        assert_eq!(titles(&normalize_books(payload)), vec!["Dune"]);
    }

    #[test]
    fn test_body_that_is_not_json() {
        assert!(normalize_body("<html>502 Bad Gateway</html>").is_empty());
        assert_eq!(titles(&normalize_body(r#"[{"Title":"Dune"}]"#)), vec!["Dune"]);
    }

    #[test]
    fn test_double_encoded_body() {
        let body = serde_json::to_string(r#"{"0": {"Title": "Dune"}}"#).unwrap();
        assert_eq!(titles(&normalize_body(&body)), vec!["Dune"]);
    }
}
