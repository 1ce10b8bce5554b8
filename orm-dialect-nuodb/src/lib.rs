mod dialector;
mod dsn;
mod migrator;
mod sql_writer;

pub use dialector::*;
pub use dsn::*;
pub use migrator::*;
pub use sql_writer::*;
