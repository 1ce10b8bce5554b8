mod data_type;
mod db;
mod dialector;
mod driver;
mod error;
mod expr;
mod field;
mod migrator;
mod naming;
mod pool;
mod sql_writer;
mod statement;
mod table_def;
mod util;
mod value;

pub use ::anyhow::Context as ErrorContext;
pub use data_type::*;
pub use db::*;
pub use dialector::*;
pub use driver::*;
pub use error::*;
pub use expr::*;
pub use field::*;
pub use migrator::*;
pub use naming::*;
pub use pool::*;
pub use sql_writer::*;
pub use statement::*;
pub use table_def::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
