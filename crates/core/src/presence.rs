//! Tri-state field wrapper for request payloads.
//!
//! `Option<T>` cannot tell an omitted key from an explicit `null`. Payload
//! structs mark these fields `#[serde(default)]` so an omitted key lands on
//! [`Presence::Missing`], while `null` deserializes to [`Presence::Null`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Presence::Missing
    }
}

impl<T> Presence<T> {
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Presence::Value(v) => Some(v),
            Presence::Missing | Presence::Null => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Presence::Missing)
    }
}

impl<'de, T> Deserialize<'de> for Presence<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Presence::Value(v),
            None => Presence::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default)]
        rating: Presence<i32>,
    }

    #[test]
    fn omitted_key_is_missing() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert!(p.rating.is_missing());
    }

    #[test]
    fn explicit_null_is_null() {
        let p: Probe = serde_json::from_str(r#"{"rating": null}"#).unwrap();
        assert_eq!(p.rating, Presence::Null);
    }

    #[test]
    fn value_is_kept() {
        let p: Probe = serde_json::from_str(r#"{"rating": 7}"#).unwrap();
        assert_eq!(p.rating.as_value(), Some(&7));
    }
}
