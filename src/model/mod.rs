//! Domain models.
//!
//! Every REST resource is stored as a [`FieldBag`], the canonical record of
//! the fields the server sent (unknown ones included). Typed accessors are
//! read-only views over the bag and never hold a second copy of a value.

pub mod graphql;
pub mod paging;
pub mod query;
pub mod receipt;
pub mod transfer_method;

pub use paging::{PageLink, PageList, PageParameter};
pub use query::{PrepaidCardQueryParam, QueryParam, QueryParams, ReceiptQueryParam, TransferMethodQueryParam};
pub use receipt::{Entry, Receipt, ReceiptDetails};
pub use transfer_method::{
    BankAccount, BankCard, PayPalAccount, PrepaidCard, StatusTransition, TransferMethod,
    TransferMethodFields,
};

use crate::decode::expect_object;
use crate::error::HyperwalletError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Insertion-ordered map of field name to JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldBag(Map<String, Value>);

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value for `key` when it holds a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FieldBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A model backed by a [`FieldBag`] that can be read from and written back
/// to JSON without losing fields.
pub trait JsonModel: Sized {
    fn from_fields(fields: FieldBag) -> Self;

    fn fields(&self) -> &FieldBag;

    fn field(&self, key: &str) -> Option<&Value> {
        self.fields().get(key)
    }

    fn field_str(&self, key: &str) -> Option<&str> {
        self.fields().get_str(key)
    }

    fn from_json_value(value: Value) -> Result<Self, HyperwalletError> {
        let map = expect_object(value, std::any::type_name::<Self>())?;
        Ok(Self::from_fields(FieldBag::from(map)))
    }

    fn to_json(&self) -> Value {
        Value::Object(self.fields().as_map().clone())
    }

    fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

/// Implements [`JsonModel`] and [`Decode`](crate::decode::Decode) for a
/// struct with a single `fields: FieldBag` member.
macro_rules! impl_json_model {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::model::JsonModel for $ty {
                fn from_fields(fields: $crate::model::FieldBag) -> Self {
                    Self { fields }
                }

                fn fields(&self) -> &$crate::model::FieldBag {
                    &self.fields
                }
            }

            impl $crate::decode::Decode for $ty {
                fn decode_value(
                    value: serde_json::Value,
                ) -> Result<Self, $crate::error::HyperwalletError> {
                    <$ty as $crate::model::JsonModel>::from_json_value(value)
                }
            }

            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serde::Serialize::serialize(&self.fields, serializer)
                }
            }
        )+
    };
}

pub(crate) use impl_json_model;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        fields: FieldBag,
    }

    impl_json_model!(Sample);

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = r#"{"token":"trm-1","futureField":{"nested":[1,2]},"type":"BANK_CARD"}"#;
        let sample: Sample = crate::decode::decode(raw).unwrap().unwrap();

        assert_eq!(sample.field_str("token"), Some("trm-1"));
        assert_eq!(sample.fields().len(), 3);
        assert_eq!(sample.to_json_string(), raw);
    }

    #[test]
    fn decoding_twice_yields_equal_bags() {
        let raw = r#"{"a":1,"b":"two"}"#;
        let first: Sample = crate::decode::decode(raw).unwrap().unwrap();
        let second: Sample = crate::decode::decode(raw).unwrap().unwrap();
        assert_eq!(first.fields(), second.fields());
    }

    #[test]
    fn get_str_only_matches_strings() {
        let mut bag = FieldBag::new();
        bag.insert("n", 5);
        bag.insert("s", "five");
        assert_eq!(bag.get_str("n"), None);
        assert_eq!(bag.get_str("s"), Some("five"));
    }
}
