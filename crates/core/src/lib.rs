//! `wirecast-core`: value conversion, request pipeline, and failure redirects.
//!
//! This crate has no HTTP server; it only decides what a request produces.

pub mod dispatcher;
pub mod error;
pub mod input;
pub mod interceptor;
pub mod record;
pub mod registry;
pub mod value;

pub use dispatcher::{Dispatcher, IntoReply, Reply};
pub use error::{Failure, GatewayResult};
pub use input::{ExtractError, FieldKind, FieldSpec, Fields, QueryError, RequestInput};
pub use interceptor::{Redirect, intercept};
pub use record::{NameRecord, Record, ValidationError};
pub use registry::{Endpoint, Registry, RegistryBuilder, RegistryError};
pub use value::{Mapping, RecordValue, SetMember, Value};
