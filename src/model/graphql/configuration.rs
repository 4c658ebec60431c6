//! Transfer method configuration keys: the country → currency → transfer
//! method type graph returned by the configuration query.

use super::connection::Connection;
use super::keyed::{Country, Currency, TransferMethodType};
use crate::decode::{Decode, expect_object};
use crate::error::{EC_UNEXPECTED_EXCEPTION, ErrorEntry, Errors, HyperwalletError};
use serde_json::{Map, Value};

const DATA: &str = "data";
const ERRORS: &str = "errors";
const COUNTRIES: &str = "countries";

#[derive(Debug, Clone)]
pub struct TransferMethodConfigurationKeys {
    countries: Connection<Country>,
}

impl TransferMethodConfigurationKeys {
    pub fn from_data(data: &Map<String, Value>) -> Self {
        Self {
            countries: Connection::from_parent(data, COUNTRIES),
        }
    }

    pub fn countries(&self) -> &[Country] {
        self.countries.nodes()
    }

    pub fn country(&self, code: &str) -> Option<&Country> {
        self.countries.node(code)
    }

    /// Currencies of `country`, empty when the country is unknown.
    pub fn currencies(&self, country: &str) -> &[Currency] {
        self.country(country)
            .map(Country::currencies)
            .unwrap_or_default()
    }

    /// Transfer method types for a country/currency pair, empty when either
    /// is unknown.
    pub fn transfer_method_types(&self, country: &str, currency: &str) -> &[TransferMethodType] {
        self.country(country)
            .and_then(|c| c.currency(currency))
            .map(Currency::transfer_method_types)
            .unwrap_or_default()
    }

    pub fn countries_connection(&self) -> &Connection<Country> {
        &self.countries
    }
}

fn graphql_errors(items: &[Value]) -> Errors {
    let entries = items
        .iter()
        .map(|item| {
            let message = item
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("GraphQL error");
            let code = item
                .get("extensions")
                .and_then(|e| e.get("code"))
                .and_then(Value::as_str)
                .unwrap_or(EC_UNEXPECTED_EXCEPTION);
            ErrorEntry::new(code, message)
        })
        .collect();
    Errors::new(entries)
}

impl Decode for TransferMethodConfigurationKeys {
    fn decode_value(value: Value) -> Result<Self, HyperwalletError> {
        let root = expect_object(value, "configuration response")?;
        match root.get(DATA) {
            Some(Value::Object(data)) => Ok(Self::from_data(data)),
            _ => match root.get(ERRORS).and_then(Value::as_array) {
                // GraphQL reports failures with a 200 status.
                Some(items) if !items.is_empty() => Err(HyperwalletError::ApiError {
                    status: 200,
                    errors: graphql_errors(items),
                }),
                _ => Err(HyperwalletError::ParseError(
                    "configuration response has no `data` object".to_string(),
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::model::graphql::KeyedNode;

    const RESPONSE: &str = r#"{
        "data": {
            "countries": {
                "nodes": [
                    {
                        "code": "US",
                        "name": "United States",
                        "currencies": {
                            "nodes": [
                                {
                                    "code": "USD",
                                    "name": "United States Dollar",
                                    "transferMethodTypes": {
                                        "nodes": [
                                            {"code": "BANK_ACCOUNT", "name": "Bank Account"},
                                            {"code": "BANK_CARD", "name": "Bank Card"}
                                        ]
                                    }
                                }
                            ]
                        }
                    },
                    {"code": "CA", "name": "Canada"}
                ]
            }
        }
    }"#;

    #[test]
    fn walks_the_graph() {
        let keys: TransferMethodConfigurationKeys = decode(RESPONSE).unwrap().unwrap();
        assert_eq!(keys.countries().len(), 2);
        assert_eq!(keys.currencies("US").len(), 1);
        let codes: Vec<_> = keys
            .transfer_method_types("US", "USD")
            .iter()
            .map(|t| t.code())
            .collect();
        assert_eq!(codes, vec!["BANK_ACCOUNT", "BANK_CARD"]);
        assert!(keys.currencies("CA").is_empty());
        assert!(keys.transfer_method_types("US", "EUR").is_empty());
        assert!(keys.country("MX").is_none());
    }

    #[test]
    fn errors_without_data_fail() {
        let raw = r#"{"errors":[{"message":"Invalid idToken","extensions":{"code":"DataFetchingException"}}]}"#;
        match decode::<TransferMethodConfigurationKeys>(raw) {
            Err(HyperwalletError::ApiError { status, errors }) => {
                assert_eq!(status, 200);
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.first().unwrap().code, "DataFetchingException");
            }
            other => panic!("expected ApiError, got: {other:?}"),
        }
    }

    #[test]
    fn empty_countries_is_not_an_error() {
        let keys: TransferMethodConfigurationKeys =
            decode(r#"{"data":{"countries":{"nodes":[]}}}"#).unwrap().unwrap();
        assert!(keys.countries().is_empty());
    }
}
