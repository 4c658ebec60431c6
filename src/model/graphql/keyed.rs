//! Country, currency, transfer method type, fee and processing time nodes.

use super::connection::{
    Connection, GraphNode, KeyedNode, NODE_CODE, NODE_NAME, opt_str_field, str_field,
};
use serde_json::{Map, Value};

const CURRENCIES: &str = "currencies";
const TRANSFER_METHOD_TYPES: &str = "transferMethodTypes";
const FEES: &str = "fees";
const PROCESSING_TIMES: &str = "processingTimes";

const COUNTRY: &str = "country";
const CURRENCY: &str = "currency";
const TRANSFER_METHOD_TYPE: &str = "transferMethodType";
const VALUE: &str = "value";
const FEE_RATE_TYPE: &str = "feeRateType";
const MAXIMUM: &str = "maximum";
const MINIMUM: &str = "minimum";

#[derive(Debug, Clone)]
pub struct Country {
    code: String,
    name: String,
    currencies: Connection<Currency>,
}

impl Country {
    pub fn currencies(&self) -> &[Currency] {
        self.currencies.nodes()
    }

    pub fn currency(&self, code: &str) -> Option<&Currency> {
        self.currencies.node(code)
    }

    pub fn currency_connection(&self) -> &Connection<Currency> {
        &self.currencies
    }
}

impl GraphNode for Country {
    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            code: str_field(object, NODE_CODE),
            name: str_field(object, NODE_NAME),
            currencies: Connection::from_parent(object, CURRENCIES),
        }
    }
}

impl KeyedNode for Country {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.name == other.name
    }
}

#[derive(Debug, Clone)]
pub struct Currency {
    code: String,
    name: String,
    transfer_method_types: Connection<TransferMethodType>,
}

impl Currency {
    pub fn transfer_method_types(&self) -> &[TransferMethodType] {
        self.transfer_method_types.nodes()
    }

    pub fn transfer_method_type(&self, code: &str) -> Option<&TransferMethodType> {
        self.transfer_method_types.node(code)
    }
}

impl GraphNode for Currency {
    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            code: str_field(object, NODE_CODE),
            name: str_field(object, NODE_NAME),
            transfer_method_types: Connection::from_parent(object, TRANSFER_METHOD_TYPES),
        }
    }
}

impl KeyedNode for Currency {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.name == other.name
    }
}

#[derive(Debug, Clone)]
pub struct TransferMethodType {
    code: String,
    name: String,
    fees: Connection<Fee>,
    processing_times: Connection<ProcessingTime>,
}

impl TransferMethodType {
    pub fn fees(&self) -> &[Fee] {
        self.fees.nodes()
    }

    pub fn processing_times(&self) -> &[ProcessingTime] {
        self.processing_times.nodes()
    }

    /// The first processing time reported for this type.
    pub fn processing_time(&self) -> Option<&ProcessingTime> {
        self.processing_times().first()
    }
}

impl GraphNode for TransferMethodType {
    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            code: str_field(object, NODE_CODE),
            name: str_field(object, NODE_NAME),
            fees: Connection::from_parent(object, FEES),
            processing_times: Connection::from_parent(object, PROCESSING_TIMES),
        }
    }
}

impl KeyedNode for TransferMethodType {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for TransferMethodType {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.name == other.name
            && self.processing_time() == other.processing_time()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeRateType {
    Flat,
    Percent,
}

impl FeeRateType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FLAT" => Some(FeeRateType::Flat),
            "PERCENT" => Some(FeeRateType::Percent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeeRateType::Flat => "FLAT",
            FeeRateType::Percent => "PERCENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fee {
    pub country: Option<String>,
    pub currency: Option<String>,
    pub transfer_method_type: Option<String>,
    pub value: Option<String>,
    pub fee_rate_type: Option<String>,
    pub maximum: Option<String>,
    pub minimum: Option<String>,
}

impl Fee {
    pub fn rate_type(&self) -> Option<FeeRateType> {
        self.fee_rate_type.as_deref().and_then(FeeRateType::parse)
    }
}

impl GraphNode for Fee {
    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            country: opt_str_field(object, COUNTRY),
            currency: opt_str_field(object, CURRENCY),
            transfer_method_type: opt_str_field(object, TRANSFER_METHOD_TYPE),
            value: opt_str_field(object, VALUE),
            fee_rate_type: opt_str_field(object, FEE_RATE_TYPE),
            maximum: opt_str_field(object, MAXIMUM),
            minimum: opt_str_field(object, MINIMUM),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingTime {
    pub country: Option<String>,
    pub currency: Option<String>,
    pub transfer_method_type: Option<String>,
    pub value: Option<String>,
}

impl GraphNode for ProcessingTime {
    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            country: opt_str_field(object, COUNTRY),
            currency: opt_str_field(object, CURRENCY),
            transfer_method_type: opt_str_field(object, TRANSFER_METHOD_TYPE),
            value: opt_str_field(object, VALUE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn bank_account_type(with_fees: bool) -> Value {
        let mut tmt = json!({
            "code": "BANK_ACCOUNT",
            "name": "Bank Account",
            "processingTimes": {"nodes": [{
                "country": "US",
                "currency": "USD",
                "transferMethodType": "BANK_ACCOUNT",
                "value": "1-3 Business days"
            }]}
        });
        if with_fees {
            tmt["fees"] = json!({"nodes": [{
                "currency": "USD",
                "feeRateType": "FLAT",
                "value": "2.00"
            }]});
        }
        tmt
    }

    #[test]
    fn country_with_currency_nodes() {
        let country = Country::from_json(&object(json!({
            "code": "CA",
            "name": "CANADA",
            "currencies": {"nodes": [{"code": "USD", "name": "United States Dollar"}]}
        })));
        assert_eq!(country.code(), "CA");
        assert_eq!(country.name(), "CANADA");
        assert_eq!(country.currencies().len(), 1);
        assert!(country.currency("USD").is_some());
    }

    #[test]
    fn country_without_nodes_has_no_currencies() {
        let country = Country::from_json(&object(json!({"code": "CA", "name": "CANADA"})));
        assert!(country.currencies().is_empty());
        assert!(country.currency("USD").is_none());
    }

    #[test]
    fn currency_without_types_returns_none_for_lookup() {
        let country = Country::from_json(&object(json!({
            "code": "US",
            "name": "UNITED STATES",
            "currencies": {"nodes": [{"code": "USD", "name": "United States Dollar"}]}
        })));
        let currency = country.currency("USD").unwrap();
        assert_eq!(country.currencies().len(), 1);
        assert!(currency.transfer_method_type("BANK_ACCOUNT").is_none());
        assert!(currency.transfer_method_types().is_empty());
    }

    #[test]
    fn country_equality_uses_code_and_name() {
        let base = json!({"code": "CA", "name": "CANADA"});
        let a = Country::from_json(&object(base.clone()));
        let b = Country::from_json(&object(json!({"code": "GI", "name": "CANADA"})));
        let c = Country::from_json(&object(json!({"code": "CA", "name": "GUATEMALA"})));
        assert_eq!(a, Country::from_json(&object(base)));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn transfer_method_type_fees_and_processing_time() {
        let tmt = TransferMethodType::from_json(&object(bank_account_type(true)));
        assert_eq!(tmt.code(), "BANK_ACCOUNT");
        assert_eq!(tmt.name(), "Bank Account");
        let pt = tmt.processing_time().unwrap();
        assert_eq!(pt.value.as_deref(), Some("1-3 Business days"));
        assert_eq!(pt.country.as_deref(), Some("US"));
        assert_eq!(pt.currency.as_deref(), Some("USD"));
        assert_eq!(tmt.fees().len(), 1);
        assert_eq!(tmt.fees()[0].value.as_deref(), Some("2.00"));
        assert_eq!(tmt.fees()[0].rate_type(), Some(FeeRateType::Flat));
    }

    #[test]
    fn transfer_method_type_without_fees() {
        let tmt = TransferMethodType::from_json(&object(bank_account_type(false)));
        assert!(tmt.fees().is_empty());
        assert_eq!(
            tmt.processing_time().and_then(|p| p.value.as_deref()),
            Some("1-3 Business days")
        );
    }

    #[test]
    fn transfer_method_types_differ_by_code() {
        let bank = TransferMethodType::from_json(&object(bank_account_type(true)));
        let card = TransferMethodType::from_json(&object(json!({
            "code": "BANK_CARD",
            "name": "Bank Card"
        })));
        assert_ne!(bank, card);
    }
}
