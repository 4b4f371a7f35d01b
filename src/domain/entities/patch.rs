use serde::{Deserialize, Deserializer};

/// Tri-state field used by PUT merge bodies for nullable columns.
///
/// - `Absent` → key missing, stored value is kept
/// - `Null` → explicit `null`, column is cleared
/// - `Value` → replace with the supplied value
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    /// Reference to the inner value when `Value`.
    pub fn value(&self) -> Option<&T> {
        if let Patch::Value(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Nested-option view: `None` → absent, `Some(None)` → clear,
    /// `Some(Some(&T))` → replace.
    pub fn as_option(&self) -> Option<Option<&T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }
}

impl<T> From<Option<Option<T>>> for Patch<T> {
    fn from(opt: Option<Option<T>>) -> Self {
        match opt {
            None => Patch::Absent,
            Some(None) => Patch::Null,
            Some(Some(v)) => Patch::Value(v),
        }
    }
}

// A present key deserializes to `Null` or `Value`; `Absent` only comes
// from `#[serde(default)]` when the key is missing entirely.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            None => Patch::Null,
            Some(v) => Patch::Value(v),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Default)]
    #[serde(default)]
    struct Body {
        count: Patch<i32>,
    }

    #[test]
    fn missing_key_is_absent() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.count, Patch::Absent);
    }

    #[test]
    fn explicit_null_is_null() {
        let body: Body = serde_json::from_str(r#"{"count": null}"#).unwrap();
        assert_eq!(body.count, Patch::Null);
    }

    #[test]
    fn value_is_value() {
        let body: Body = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        assert_eq!(body.count, Patch::Value(3));
    }
}
