mod as_value;
mod db_helper;
mod db_setting;
mod db_type;
mod dialect;
mod error;
mod extractor;
mod field;
mod query;
mod query_builder;
mod query_group;
mod quote;
mod registry;
mod resolvers;
mod statement_builder;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use db_helper::*;
pub use db_setting::*;
pub use db_type::*;
pub use dialect::*;
pub use error::*;
pub use extractor::*;
pub use field::*;
pub use query::*;
pub use query_builder::*;
pub use query_group::*;
pub use quote::*;
pub use registry::*;
pub use resolvers::*;
pub use statement_builder::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;

/// Name of the output parameter (or result column) carrying the value returned by an insert.
pub const RESULT_PARAMETER: &str = "Result";
