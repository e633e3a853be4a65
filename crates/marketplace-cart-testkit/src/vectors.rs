//! Payload test vectors.
//!
//! Known payloads as they appear in device storage, with the cart each one
//! must decode to (or the fact that it must be rejected).

use marketplace_cart_core::{decode, CartState, Item};

/// A known stored payload and its expected decoding.
#[derive(Debug, Clone)]
pub struct PayloadVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The stored payload text.
    pub payload: &'static str,
    /// Expected `(id, quantity)` lines in order, or `None` if the payload
    /// must be rejected.
    pub expected: Option<&'static [(&'static str, u32)]>,
}

/// Get all payload vectors.
pub fn all_vectors() -> Vec<PayloadVector> {
    vec![
        PayloadVector {
            name: "empty cart",
            payload: "[]",
            expected: Some(&[]),
        },
        PayloadVector {
            name: "single line with integer price",
            payload: r#"[{"id":"p1","title":"Shirt","image_url":"u","price":10,"quantity":3}]"#,
            expected: Some(&[("p1", 3)]),
        },
        PayloadVector {
            name: "two lines keep stored order",
            payload: r#"[
                {"id":"b","title":"Mug","image_url":"m","price":4.5,"quantity":1},
                {"id":"a","title":"Hat","image_url":"h","price":12.99,"quantity":2}
            ]"#,
            expected: Some(&[("b", 1), ("a", 2)]),
        },
        PayloadVector {
            name: "unknown fields are ignored",
            payload: r#"[{"id":"p1","title":"Shirt","image_url":"u","price":1,"quantity":1,"sku":"X"}]"#,
            expected: Some(&[("p1", 1)]),
        },
        PayloadVector {
            name: "zero quantity is rejected",
            payload: r#"[{"id":"p1","title":"Shirt","image_url":"u","price":1,"quantity":0}]"#,
            expected: None,
        },
        PayloadVector {
            name: "duplicate ids are rejected",
            payload: r#"[
                {"id":"p1","title":"Shirt","image_url":"u","price":1,"quantity":1},
                {"id":"p1","title":"Shirt","image_url":"u","price":1,"quantity":1}
            ]"#,
            expected: None,
        },
        PayloadVector {
            name: "missing quantity is rejected",
            payload: r#"[{"id":"p1","title":"Shirt","image_url":"u","price":1}]"#,
            expected: None,
        },
        PayloadVector {
            name: "not an array",
            payload: r#"{"products":[]}"#,
            expected: None,
        },
    ]
}

/// The `(id, quantity)` lines of a cart, in order.
pub fn lines(state: &CartState) -> Vec<(&str, u32)> {
    state
        .iter()
        .map(|Item { id, quantity, .. }| (id.as_str(), *quantity))
        .collect()
}

/// Check every vector, returning the names of those that fail.
pub fn verify_all_vectors() -> Vec<&'static str> {
    all_vectors()
        .into_iter()
        .filter(|vector| {
            let decoded = decode(vector.payload);
            match (vector.expected, decoded) {
                (Some(expected), Ok(state)) => lines(&state) != expected,
                (None, Err(_)) => false,
                _ => true,
            }
        })
        .map(|vector| vector.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        let failures = verify_all_vectors();
        assert!(failures.is_empty(), "failing vectors: {:?}", failures);
    }

    #[test]
    fn test_vector_names_unique() {
        let mut names: Vec<_> = all_vectors().iter().map(|v| v.name).collect();
        let len = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), len);
    }
}
