//! Typed, read-only client for the Open States legislative data API.
//!
//! Entity kinds (bills, legislators, committees, ...) are declared as field
//! schemas. `get` returns an unfetched handle that retrieves itself on first
//! field access; `search` issues one request and returns entries that are
//! already hydrated from the result list.

mod client;
mod config;
pub mod decode;
pub mod entity;
mod errors;
pub mod fetchable;
pub mod field;
mod list;
mod query;
mod transport;
pub mod types;

pub use self::client::{Client, RESERVED_PARAMS};
pub use self::config::{api_key, set_api_key, Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::decode::FormatError;
pub use self::entity::{Entity, FetchStatus, PayloadShape, Resource};
pub use self::errors::Error;
pub use self::fetchable::{Fetchable, Searchable};
pub use self::field::{Cardinality, Decoder, FieldDescriptor, Mapping, Record};
pub use self::query::{
    BillQuery, CommitteeQuery, EventQuery, Filters, GeoQuery, LegislatorQuery, Query,
};
pub use self::transport::{HttpResponse, HttpTransport, Transport};
