//! Request descriptors.
//!
//! A [`RequestDescriptor`] captures everything needed to issue one call:
//! method, path, query, headers, optional body, and the shape the success
//! body decodes into (the type parameter). It is built once per call and
//! read-only afterwards, so the pipeline can replay it verbatim for the
//! post-refresh retry.

use crate::decode::Decode;
use crate::error::HyperwalletError;
use reqwest::Method;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;

pub struct RequestDescriptor<T> {
    method: Method,
    path: String,
    query: BTreeMap<String, String>,
    headers: HashMap<String, String>,
    body: Option<String>,
    shape: PhantomData<fn() -> T>,
}

impl<T: Decode> RequestDescriptor<T> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: HashMap::new(),
            body: None,
            shape: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn queries(mut self, query: BTreeMap<String, String>) -> Self {
        self.query.extend(query);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, HyperwalletError> {
        let text = serde_json::to_string(body).map_err(|e| {
            HyperwalletError::InvalidInput(format!("Failed to serialize request body: {e}"))
        })?;
        self.body = Some(text);
        Ok(self)
    }
}

impl<T> RequestDescriptor<T> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl<T> Clone for RequestDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            shape: PhantomData,
        }
    }
}

impl<T> fmt::Debug for RequestDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("has_body", &self.body.is_some())
            .finish()
    }
}
