//! GraphQL configuration graph.
//!
//! The configuration query returns nested `{ <name>: { nodes: [...] } }`
//! connections (countries → currencies → transfer method types → fees and
//! processing times). Each level is parsed into a [`Connection`] whose
//! children are materialised lazily, once.

pub mod configuration;
pub mod connection;
pub mod keyed;
pub mod query;

pub use configuration::TransferMethodConfigurationKeys;
pub use connection::{Connection, GraphNode, KeyedNode};
pub use keyed::{Country, Currency, Fee, FeeRateType, ProcessingTime, TransferMethodType};
pub use query::TransferMethodConfigurationKeysQuery;
