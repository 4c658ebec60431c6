//! Transfer methods (bank accounts, bank cards, PayPal accounts, prepaid cards).
//!
//! Each subtype is a field bag with typed accessors. [`TransferMethod`] picks
//! the subtype from the `type` discriminator through a closed lookup table;
//! unrecognised discriminators decode into [`TransferMethod::Other`] so new
//! server-side types never break decoding.

use super::{FieldBag, JsonModel, impl_json_model};
use crate::decode::{Decode, expect_object};
use crate::error::HyperwalletError;
use serde_json::Value;

// Common fields
pub const TOKEN: &str = "token";
pub const TYPE: &str = "type";
pub const STATUS: &str = "status";
pub const CREATED_ON: &str = "createdOn";
pub const TRANSFER_METHOD_COUNTRY: &str = "transferMethodCountry";
pub const TRANSFER_METHOD_CURRENCY: &str = "transferMethodCurrency";

// Bank account fields
pub const BANK_ID: &str = "bankId";
pub const BRANCH_ID: &str = "branchId";
pub const BANK_ACCOUNT_ID: &str = "bankAccountId";
pub const BANK_ACCOUNT_PURPOSE: &str = "bankAccountPurpose";
pub const BANK_NAME: &str = "bankName";

// Bank card fields
pub const CARD_NUMBER: &str = "cardNumber";
pub const CARD_TYPE: &str = "cardType";
pub const CARD_BRAND: &str = "cardBrand";
pub const DATE_OF_EXPIRY: &str = "dateOfExpiry";
pub const CVV: &str = "cvv";

// PayPal fields
pub const EMAIL: &str = "email";

// Prepaid card fields
pub const CARD_PACKAGE: &str = "cardPackage";

/// Discriminator values.
pub mod types {
    pub const BANK_ACCOUNT: &str = "BANK_ACCOUNT";
    pub const WIRE_ACCOUNT: &str = "WIRE_ACCOUNT";
    pub const BANK_CARD: &str = "BANK_CARD";
    pub const PAYPAL_ACCOUNT: &str = "PAYPAL_ACCOUNT";
    pub const PREPAID_CARD: &str = "PREPAID_CARD";
}

/// Status values.
pub mod statuses {
    pub const ACTIVATED: &str = "ACTIVATED";
    pub const DE_ACTIVATED: &str = "DE_ACTIVATED";
    pub const VERIFIED: &str = "VERIFIED";
    pub const INVALID: &str = "INVALID";
}

/// Accessors shared by every transfer method subtype.
pub trait TransferMethodFields: JsonModel {
    fn token(&self) -> Option<&str> {
        self.field_str(TOKEN)
    }

    fn transfer_method_type(&self) -> Option<&str> {
        self.field_str(TYPE)
    }

    fn status(&self) -> Option<&str> {
        self.field_str(STATUS)
    }

    fn created_on(&self) -> Option<&str> {
        self.field_str(CREATED_ON)
    }

    fn transfer_method_country(&self) -> Option<&str> {
        self.field_str(TRANSFER_METHOD_COUNTRY)
    }

    fn transfer_method_currency(&self) -> Option<&str> {
        self.field_str(TRANSFER_METHOD_CURRENCY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankAccount {
    fields: FieldBag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankCard {
    fields: FieldBag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayPalAccount {
    fields: FieldBag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrepaidCard {
    fields: FieldBag,
}

/// Body of a status transition request/response (e.g. deactivation).
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTransition {
    fields: FieldBag,
}

impl_json_model!(BankAccount, BankCard, PayPalAccount, PrepaidCard, StatusTransition);

impl TransferMethodFields for BankAccount {}
impl TransferMethodFields for BankCard {}
impl TransferMethodFields for PayPalAccount {}
impl TransferMethodFields for PrepaidCard {}

impl BankAccount {
    pub fn builder() -> BankAccountBuilder {
        BankAccountBuilder::default()
    }

    pub fn bank_id(&self) -> Option<&str> {
        self.field_str(BANK_ID)
    }

    pub fn branch_id(&self) -> Option<&str> {
        self.field_str(BRANCH_ID)
    }

    pub fn bank_account_id(&self) -> Option<&str> {
        self.field_str(BANK_ACCOUNT_ID)
    }

    pub fn bank_account_purpose(&self) -> Option<&str> {
        self.field_str(BANK_ACCOUNT_PURPOSE)
    }

    pub fn bank_name(&self) -> Option<&str> {
        self.field_str(BANK_NAME)
    }
}

impl BankCard {
    pub fn builder() -> BankCardBuilder {
        BankCardBuilder::default()
    }

    /// Masked on responses, e.g. `************0114`.
    pub fn card_number(&self) -> Option<&str> {
        self.field_str(CARD_NUMBER)
    }

    pub fn card_type(&self) -> Option<&str> {
        self.field_str(CARD_TYPE)
    }

    pub fn card_brand(&self) -> Option<&str> {
        self.field_str(CARD_BRAND)
    }

    pub fn date_of_expiry(&self) -> Option<&str> {
        self.field_str(DATE_OF_EXPIRY)
    }
}

impl PayPalAccount {
    pub fn builder(
        country: impl Into<String>,
        currency: impl Into<String>,
        email: impl Into<String>,
    ) -> PayPalAccountBuilder {
        let mut fields = FieldBag::new();
        fields.insert(TRANSFER_METHOD_COUNTRY, country.into());
        fields.insert(TRANSFER_METHOD_CURRENCY, currency.into());
        fields.insert(TYPE, types::PAYPAL_ACCOUNT);
        fields.insert(EMAIL, email.into());
        PayPalAccountBuilder { fields }
    }

    pub fn email(&self) -> Option<&str> {
        self.field_str(EMAIL)
    }
}

impl PrepaidCard {
    pub fn card_number(&self) -> Option<&str> {
        self.field_str(CARD_NUMBER)
    }

    pub fn card_type(&self) -> Option<&str> {
        self.field_str(CARD_TYPE)
    }

    pub fn card_brand(&self) -> Option<&str> {
        self.field_str(CARD_BRAND)
    }

    pub fn card_package(&self) -> Option<&str> {
        self.field_str(CARD_PACKAGE)
    }

    pub fn date_of_expiry(&self) -> Option<&str> {
        self.field_str(DATE_OF_EXPIRY)
    }
}

impl StatusTransition {
    pub const TRANSITION: &'static str = "transition";
    pub const NOTES: &'static str = "notes";
    pub const FROM_STATUS: &'static str = "fromStatus";
    pub const TO_STATUS: &'static str = "toStatus";

    /// Transition request moving a transfer method to `DE_ACTIVATED`.
    pub fn deactivate(notes: Option<&str>) -> Self {
        let mut fields = FieldBag::new();
        fields.insert(Self::TRANSITION, statuses::DE_ACTIVATED);
        if let Some(n) = notes {
            fields.insert(Self::NOTES, n);
        }
        Self { fields }
    }

    pub fn token(&self) -> Option<&str> {
        self.field_str(TOKEN)
    }

    pub fn transition(&self) -> Option<&str> {
        self.field_str(Self::TRANSITION)
    }

    pub fn from_status(&self) -> Option<&str> {
        self.field_str(Self::FROM_STATUS)
    }

    pub fn to_status(&self) -> Option<&str> {
        self.field_str(Self::TO_STATUS)
    }

    pub fn created_on(&self) -> Option<&str> {
        self.field_str(CREATED_ON)
    }
}

/// Field setters shared by the create-flow builders.
macro_rules! builder_setters {
    ($($name:ident => $key:expr),* $(,)?) => {
        $(
            pub fn $name(mut self, value: impl Into<String>) -> Self {
                self.fields.insert($key, value.into());
                self
            }
        )*

        /// Set an arbitrary field, e.g. one collected from a dynamic form.
        pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
            self.fields.insert(key, value);
            self
        }
    };
}

#[derive(Debug, Clone)]
pub struct BankAccountBuilder {
    fields: FieldBag,
}

impl Default for BankAccountBuilder {
    fn default() -> Self {
        let mut fields = FieldBag::new();
        fields.insert(TYPE, types::BANK_ACCOUNT);
        Self { fields }
    }
}

impl BankAccountBuilder {
    builder_setters! {
        token => TOKEN,
        transfer_method_type => TYPE,
        transfer_method_country => TRANSFER_METHOD_COUNTRY,
        transfer_method_currency => TRANSFER_METHOD_CURRENCY,
        bank_id => BANK_ID,
        branch_id => BRANCH_ID,
        bank_account_id => BANK_ACCOUNT_ID,
        bank_account_purpose => BANK_ACCOUNT_PURPOSE,
    }

    pub fn build(self) -> BankAccount {
        BankAccount {
            fields: self.fields,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BankCardBuilder {
    fields: FieldBag,
}

impl Default for BankCardBuilder {
    fn default() -> Self {
        let mut fields = FieldBag::new();
        fields.insert(TYPE, types::BANK_CARD);
        Self { fields }
    }
}

impl BankCardBuilder {
    builder_setters! {
        token => TOKEN,
        transfer_method_country => TRANSFER_METHOD_COUNTRY,
        transfer_method_currency => TRANSFER_METHOD_CURRENCY,
        card_number => CARD_NUMBER,
        card_type => CARD_TYPE,
        card_brand => CARD_BRAND,
        date_of_expiry => DATE_OF_EXPIRY,
        cvv => CVV,
    }

    pub fn build(self) -> BankCard {
        BankCard {
            fields: self.fields,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PayPalAccountBuilder {
    fields: FieldBag,
}

impl PayPalAccountBuilder {
    builder_setters! {
        token => TOKEN,
    }

    pub fn build(self) -> PayPalAccount {
        PayPalAccount {
            fields: self.fields,
        }
    }
}

/// A transfer method of any type, selected by its `type` discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferMethod {
    BankAccount(BankAccount),
    BankCard(BankCard),
    PayPalAccount(PayPalAccount),
    PrepaidCard(PrepaidCard),
    /// A type this SDK version does not know; fields are kept as-is.
    Other(FieldBag),
}

type Constructor = fn(FieldBag) -> TransferMethod;

fn bank_account(fields: FieldBag) -> TransferMethod {
    TransferMethod::BankAccount(BankAccount { fields })
}

fn bank_card(fields: FieldBag) -> TransferMethod {
    TransferMethod::BankCard(BankCard { fields })
}

fn paypal_account(fields: FieldBag) -> TransferMethod {
    TransferMethod::PayPalAccount(PayPalAccount { fields })
}

fn prepaid_card(fields: FieldBag) -> TransferMethod {
    TransferMethod::PrepaidCard(PrepaidCard { fields })
}

const SUBTYPES: &[(&str, Constructor)] = &[
    (types::BANK_ACCOUNT, bank_account),
    (types::WIRE_ACCOUNT, bank_account),
    (types::BANK_CARD, bank_card),
    (types::PAYPAL_ACCOUNT, paypal_account),
    (types::PREPAID_CARD, prepaid_card),
];

impl TransferMethod {
    pub fn as_bank_account(&self) -> Option<&BankAccount> {
        match self {
            TransferMethod::BankAccount(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bank_card(&self) -> Option<&BankCard> {
        match self {
            TransferMethod::BankCard(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_paypal_account(&self) -> Option<&PayPalAccount> {
        match self {
            TransferMethod::PayPalAccount(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_prepaid_card(&self) -> Option<&PrepaidCard> {
        match self {
            TransferMethod::PrepaidCard(v) => Some(v),
            _ => None,
        }
    }

    /// REST collection segment for this type (e.g. `bank-cards`).
    pub fn resource_path(&self) -> Option<&'static str> {
        resource_path_for(self.transfer_method_type()?)
    }
}

/// REST collection segment for a discriminator value.
pub fn resource_path_for(transfer_method_type: &str) -> Option<&'static str> {
    match transfer_method_type {
        types::BANK_ACCOUNT | types::WIRE_ACCOUNT => Some("bank-accounts"),
        types::BANK_CARD => Some("bank-cards"),
        types::PAYPAL_ACCOUNT => Some("paypal-accounts"),
        types::PREPAID_CARD => Some("prepaid-cards"),
        _ => None,
    }
}

impl JsonModel for TransferMethod {
    fn from_fields(fields: FieldBag) -> Self {
        let constructor = fields
            .get_str(TYPE)
            .and_then(|t| SUBTYPES.iter().find(|(name, _)| *name == t))
            .map(|(_, ctor)| *ctor);
        match constructor {
            Some(ctor) => ctor(fields),
            None => TransferMethod::Other(fields),
        }
    }

    fn fields(&self) -> &FieldBag {
        match self {
            TransferMethod::BankAccount(v) => v.fields(),
            TransferMethod::BankCard(v) => v.fields(),
            TransferMethod::PayPalAccount(v) => v.fields(),
            TransferMethod::PrepaidCard(v) => v.fields(),
            TransferMethod::Other(fields) => fields,
        }
    }
}

impl TransferMethodFields for TransferMethod {}

impl Decode for TransferMethod {
    fn decode_value(value: Value) -> Result<Self, HyperwalletError> {
        let map = expect_object(value, "transfer method")?;
        Ok(Self::from_fields(FieldBag::from(map)))
    }
}

impl serde::Serialize for TransferMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(self.fields(), serializer)
    }
}
