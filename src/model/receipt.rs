//! Receipts (user and prepaid card transaction records).

use super::{FieldBag, JsonModel, impl_json_model};

pub const JOURNAL_ID: &str = "journalId";
pub const TYPE: &str = "type";
pub const CREATED_ON: &str = "createdOn";
pub const ENTRY: &str = "entry";
pub const SOURCE_TOKEN: &str = "sourceToken";
pub const DESTINATION_TOKEN: &str = "destinationToken";
pub const AMOUNT: &str = "amount";
pub const FEE: &str = "fee";
pub const CURRENCY: &str = "currency";
pub const FOREIGN_EXCHANGE_RATE: &str = "foreignExchangeRate";
pub const FOREIGN_EXCHANGE_CURRENCY: &str = "foreignExchangeCurrency";
pub const DETAILS: &str = "details";

/// Direction of the money movement relative to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    Credit,
    Debit,
}

impl Entry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entry::Credit => "CREDIT",
            Entry::Debit => "DEBIT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CREDIT" => Some(Entry::Credit),
            "DEBIT" => Some(Entry::Debit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    fields: FieldBag,
}

/// The nested `details` object of a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptDetails {
    fields: FieldBag,
}

impl_json_model!(Receipt, ReceiptDetails);

impl Receipt {
    pub fn journal_id(&self) -> Option<&str> {
        self.field_str(JOURNAL_ID)
    }

    pub fn receipt_type(&self) -> Option<&str> {
        self.field_str(TYPE)
    }

    pub fn created_on(&self) -> Option<&str> {
        self.field_str(CREATED_ON)
    }

    /// Raw `entry` value; see [`Receipt::entry_kind`] for the parsed form.
    pub fn entry(&self) -> Option<&str> {
        self.field_str(ENTRY)
    }

    pub fn entry_kind(&self) -> Option<Entry> {
        self.entry().and_then(Entry::parse)
    }

    pub fn source_token(&self) -> Option<&str> {
        self.field_str(SOURCE_TOKEN)
    }

    pub fn destination_token(&self) -> Option<&str> {
        self.field_str(DESTINATION_TOKEN)
    }

    pub fn amount(&self) -> Option<&str> {
        self.field_str(AMOUNT)
    }

    pub fn fee(&self) -> Option<&str> {
        self.field_str(FEE)
    }

    pub fn currency(&self) -> Option<&str> {
        self.field_str(CURRENCY)
    }

    pub fn foreign_exchange_rate(&self) -> Option<&str> {
        self.field_str(FOREIGN_EXCHANGE_RATE)
    }

    pub fn foreign_exchange_currency(&self) -> Option<&str> {
        self.field_str(FOREIGN_EXCHANGE_CURRENCY)
    }

    /// View over the `details` object, when present.
    pub fn details(&self) -> Option<ReceiptDetails> {
        self.fields
            .get_object(DETAILS)
            .map(|map| ReceiptDetails::from_fields(FieldBag::from(map.clone())))
    }

    /// Whether both receipts describe the same journal entry, ignoring
    /// volatile fields such as `createdOn`.
    pub fn is_same_entry(&self, other: &Receipt) -> bool {
        self.journal_id() == other.journal_id()
            && self.receipt_type() == other.receipt_type()
            && self.entry() == other.entry()
    }
}

impl ReceiptDetails {
    pub const CLIENT_PAYMENT_ID: &'static str = "clientPaymentId";
    pub const PAYEE_NAME: &'static str = "payeeName";
    pub const PAYEE_EMAIL: &'static str = "payeeEmail";
    pub const NOTES: &'static str = "notes";
    pub const MEMO: &'static str = "memo";
    pub const BANK_NAME: &'static str = "bankName";
    pub const CARD_NUMBER: &'static str = "cardNumber";

    pub fn client_payment_id(&self) -> Option<&str> {
        self.field_str(Self::CLIENT_PAYMENT_ID)
    }

    pub fn payee_name(&self) -> Option<&str> {
        self.field_str(Self::PAYEE_NAME)
    }

    pub fn payee_email(&self) -> Option<&str> {
        self.field_str(Self::PAYEE_EMAIL)
    }

    pub fn notes(&self) -> Option<&str> {
        self.field_str(Self::NOTES)
    }

    pub fn memo(&self) -> Option<&str> {
        self.field_str(Self::MEMO)
    }

    pub fn bank_name(&self) -> Option<&str> {
        self.field_str(Self::BANK_NAME)
    }

    pub fn card_number(&self) -> Option<&str> {
        self.field_str(Self::CARD_NUMBER)
    }
}
