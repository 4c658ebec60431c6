//! Query parameters for list endpoints.

use super::transfer_method::types::PREPAID_CARD;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

pub const OFFSET: &str = "offset";
pub const LIMIT: &str = "limit";
pub const CREATED_BEFORE: &str = "createdBefore";
pub const CREATED_AFTER: &str = "createdAfter";
pub const CREATED_ON: &str = "createdOn";
pub const SORT_BY: &str = "sortBy";
pub const STATUS: &str = "status";
pub const TYPE: &str = "type";
pub const CURRENCY: &str = "currency";

pub const DEFAULT_OFFSET: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 10;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Sort orders accepted by `sortBy`.
pub mod sort {
    pub const ASCENDANT_CREATE_ON: &str = "+createdOn";
    pub const DESCENDANT_CREATE_ON: &str = "-createdOn";
    pub const ASCENDANT_STATUS: &str = "+status";
    pub const DESCENDANT_STATUS: &str = "-status";
}

/// Anything that renders to a query string map.
pub trait QueryParams {
    fn build_query(&self) -> BTreeMap<String, String>;
}

fn format_date(date: &NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Paging and date filters shared by every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub offset: u32,
    pub limit: u32,
    pub created_before: Option<NaiveDateTime>,
    pub created_after: Option<NaiveDateTime>,
    pub sort_by: Option<String>,
}

impl Default for QueryParam {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
            created_before: None,
            created_after: None,
            sort_by: None,
        }
    }
}

impl QueryParam {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn created_before(mut self, date: NaiveDateTime) -> Self {
        self.created_before = Some(date);
        self
    }

    pub fn created_after(mut self, date: NaiveDateTime) -> Self {
        self.created_after = Some(date);
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }
}

impl QueryParams for QueryParam {
    fn build_query(&self) -> BTreeMap<String, String> {
        let mut query = BTreeMap::new();
        query.insert(OFFSET.to_string(), self.offset.to_string());
        query.insert(LIMIT.to_string(), self.limit.to_string());
        if let Some(date) = &self.created_before {
            query.insert(CREATED_BEFORE.to_string(), format_date(date));
        }
        if let Some(date) = &self.created_after {
            query.insert(CREATED_AFTER.to_string(), format_date(date));
        }
        if let Some(sort_by) = &self.sort_by {
            query.insert(SORT_BY.to_string(), sort_by.clone());
        }
        query
    }
}

/// Generates the builder methods that forward to the embedded [`QueryParam`].
macro_rules! forward_base_setters {
    () => {
        pub fn offset(mut self, offset: u32) -> Self {
            self.base.offset = offset;
            self
        }

        pub fn limit(mut self, limit: u32) -> Self {
            self.base.limit = limit;
            self
        }

        pub fn created_before(mut self, date: NaiveDateTime) -> Self {
            self.base.created_before = Some(date);
            self
        }

        pub fn created_after(mut self, date: NaiveDateTime) -> Self {
            self.base.created_after = Some(date);
            self
        }

        pub fn sort_by_created_on_asc(mut self) -> Self {
            self.base.sort_by = Some(sort::ASCENDANT_CREATE_ON.to_string());
            self
        }

        pub fn sort_by_created_on_desc(mut self) -> Self {
            self.base.sort_by = Some(sort::DESCENDANT_CREATE_ON.to_string());
            self
        }

        pub fn base(&self) -> &QueryParam {
            &self.base
        }
    };
}

/// Filters for `GET /users/{token}/transfer-methods`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferMethodQueryParam {
    base: QueryParam,
    pub transfer_method_type: Option<String>,
    pub status: Option<String>,
}

impl TransferMethodQueryParam {
    pub fn new() -> Self {
        Self::default()
    }

    forward_base_setters!();

    pub fn sort_by_status_asc(mut self) -> Self {
        self.base.sort_by = Some(sort::ASCENDANT_STATUS.to_string());
        self
    }

    pub fn sort_by_status_desc(mut self) -> Self {
        self.base.sort_by = Some(sort::DESCENDANT_STATUS.to_string());
        self
    }

    pub fn transfer_method_type(mut self, value: impl Into<String>) -> Self {
        self.transfer_method_type = Some(value.into());
        self
    }

    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }
}

impl QueryParams for TransferMethodQueryParam {
    fn build_query(&self) -> BTreeMap<String, String> {
        let mut query = self.base.build_query();
        if let Some(t) = &self.transfer_method_type {
            query.insert(TYPE.to_string(), t.clone());
        }
        if let Some(s) = &self.status {
            query.insert(STATUS.to_string(), s.clone());
        }
        query
    }
}

/// Filters for the receipt list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptQueryParam {
    base: QueryParam,
    pub currency: Option<String>,
}

impl ReceiptQueryParam {
    pub fn new() -> Self {
        Self::default()
    }

    forward_base_setters!();

    pub fn currency(mut self, value: impl Into<String>) -> Self {
        self.currency = Some(value.into());
        self
    }
}

impl QueryParams for ReceiptQueryParam {
    fn build_query(&self) -> BTreeMap<String, String> {
        let mut query = self.base.build_query();
        if let Some(c) = &self.currency {
            query.insert(CURRENCY.to_string(), c.clone());
        }
        query
    }
}

/// Filters for `GET /users/{token}/prepaid-cards`; `type` is always
/// `PREPAID_CARD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepaidCardQueryParam {
    base: QueryParam,
    pub status: Option<String>,
    pub created_on: Option<NaiveDateTime>,
}

impl PrepaidCardQueryParam {
    pub fn new() -> Self {
        Self::default()
    }

    forward_base_setters!();

    pub fn sort_by_status_asc(mut self) -> Self {
        self.base.sort_by = Some(sort::ASCENDANT_STATUS.to_string());
        self
    }

    pub fn sort_by_status_desc(mut self) -> Self {
        self.base.sort_by = Some(sort::DESCENDANT_STATUS.to_string());
        self
    }

    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }

    pub fn created_on(mut self, date: NaiveDateTime) -> Self {
        self.created_on = Some(date);
        self
    }

    pub fn transfer_method_type(&self) -> &'static str {
        PREPAID_CARD
    }
}

impl QueryParams for PrepaidCardQueryParam {
    fn build_query(&self) -> BTreeMap<String, String> {
        let mut query = self.base.build_query();
        query.insert(TYPE.to_string(), PREPAID_CARD.to_string());
        if let Some(s) = &self.status {
            query.insert(STATUS.to_string(), s.clone());
        }
        if let Some(date) = &self.created_on {
            query.insert(CREATED_ON.to_string(), format_date(date));
        }
        query
    }
}
