//! The fixed configuration keys query.

use serde_json::{Value, json};

/// Builds the GraphQL document that fetches the transfer method
/// configuration graph for one user.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferMethodConfigurationKeysQuery;

const QUERY_TEMPLATE: &str = "query {\n\
\tcountries(idToken: \"{user_token}\") {\n\
\t\tnodes {\n\
\t\t\tcode\n\
\t\t\tname\n\
\t\t\tcurrencies {\n\
\t\t\t\tnodes {\n\
\t\t\t\t\tcode\n\
\t\t\t\t\tname\n\
\t\t\t\t\ttransferMethodTypes {\n\
\t\t\t\t\t\tnodes {\n\
\t\t\t\t\t\t\tcode\n\
\t\t\t\t\t\t\tname\n\
\t\t\t\t\t\t\tfees {\n\
\t\t\t\t\t\t\t\tnodes {\n\
\t\t\t\t\t\t\t\t\tcountry\n\
\t\t\t\t\t\t\t\t\tcurrency\n\
\t\t\t\t\t\t\t\t\ttransferMethodType\n\
\t\t\t\t\t\t\t\t\tvalue\n\
\t\t\t\t\t\t\t\t\tfeeRateType\n\
\t\t\t\t\t\t\t\t\tmaximum\n\
\t\t\t\t\t\t\t\t\tminimum\n\
\t\t\t\t\t\t\t\t}\n\
\t\t\t\t\t\t\t}\n\
\t\t\t\t\t\t\tprocessingTimes {\n\
\t\t\t\t\t\t\t\tnodes {\n\
\t\t\t\t\t\t\t\t\tcountry\n\
\t\t\t\t\t\t\t\t\tcurrency\n\
\t\t\t\t\t\t\t\t\ttransferMethodType\n\
\t\t\t\t\t\t\t\t\tvalue\n\
\t\t\t\t\t\t\t\t}\n\
\t\t\t\t\t\t\t}\n\
\t\t\t\t\t\t}\n\
\t\t\t\t\t}\n\
\t\t\t\t}\n\
\t\t\t}\n\
\t\t}\n\
\t}\n\
}";

impl TransferMethodConfigurationKeysQuery {
    pub fn new() -> Self {
        Self
    }

    pub fn to_query(&self, user_token: &str) -> String {
        QUERY_TEMPLATE.replace("{user_token}", user_token)
    }

    /// JSON request body: `{"query": "..."}`.
    pub fn to_request_body(&self, user_token: &str) -> Value {
        json!({ "query": self.to_query(user_token) })
    }
}
