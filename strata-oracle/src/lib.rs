mod db_helper;
mod db_setting;
mod dialect;
mod resolvers;
mod statement_builder;

pub use db_helper::*;
pub use db_setting::*;
pub use dialect::*;
pub use resolvers::*;
pub use statement_builder::*;
