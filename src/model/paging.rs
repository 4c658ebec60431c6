//! Paged list envelope: `{count, data: [...], limit, offset, links: [...]}`.

use crate::decode::{Decode, expect_object};
use crate::error::HyperwalletError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const COUNT: &str = "count";
const DATA: &str = "data";
const LIMIT: &str = "limit";
const OFFSET: &str = "offset";
const LINKS: &str = "links";

pub const REL_NEXT: &str = "next";
pub const REL_PREVIOUS: &str = "previous";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParameter {
    #[serde(default)]
    pub rel: String,
}

/// A navigation link of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub params: PageParameter,
}

impl PageLink {
    /// Reads `params.rel`, falling back to a flat `rel` key.
    fn from_object(map: &Map<String, Value>) -> Self {
        let href = map
            .get("href")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let rel = map
            .get("params")
            .and_then(Value::as_object)
            .and_then(|p| p.get("rel"))
            .or_else(|| map.get("rel"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            href,
            params: PageParameter { rel },
        }
    }

    pub fn rel(&self) -> &str {
        &self.params.rel
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PageList<T> {
    pub count: u64,
    pub limit: u64,
    pub offset: u64,
    pub data: Vec<T>,
    pub links: Vec<PageLink>,
}

impl<T> PageList<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len() as u64,
            limit: 0,
            offset: 0,
            data,
            links: Vec::new(),
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Link whose relation equals `rel` exactly (case-sensitive).
    pub fn page_link(&self, rel: &str) -> Option<&PageLink> {
        self.links.iter().find(|l| l.rel() == rel)
    }

    pub fn next_page_link(&self) -> Option<&PageLink> {
        self.page_link(REL_NEXT)
    }

    pub fn previous_page_link(&self) -> Option<&PageLink> {
        self.page_link(REL_PREVIOUS)
    }
}

fn read_u64(map: &Map<String, Value>, key: &str) -> u64 {
    map.get(key).and_then(Value::as_u64).unwrap_or(0)
}

impl<T: Decode> Decode for PageList<T> {
    fn decode_value(value: Value) -> Result<Self, HyperwalletError> {
        let mut map = expect_object(value, "page list")?;

        let data = match map.remove(DATA) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(T::decode_value)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(HyperwalletError::ParseError(
                    "page list `data` is not an array".to_string(),
                ));
            }
        };

        let links = map
            .get(LINKS)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(PageLink::from_object)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            count: read_u64(&map, COUNT),
            limit: read_u64(&map, LIMIT),
            offset: read_u64(&map, OFFSET),
            data,
            links,
        })
    }
}
