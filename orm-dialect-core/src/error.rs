use crate::Error;
use std::error::Error as StdError;
use thiserror::Error as ThisError;

type Source = Box<dyn StdError + Send + Sync + 'static>;

/// Failures a dialect surfaces to the ORM layer.
///
/// They travel inside [`crate::Error`] and can be recovered with
/// `error.downcast_ref::<DialectError>()`. The driver error is kept untouched as
/// the `source`.
#[derive(Debug, ThisError)]
pub enum DialectError {
    /// The connection pool could not be established.
    #[error("Could not open a connection pool using the driver `{driver}`")]
    Conn {
        driver: String,
        #[source]
        source: Source,
    },
    /// A statement issued on behalf of the ORM failed at the engine.
    #[error("Could not execute `{sql}`")]
    Exec {
        sql: String,
        #[source]
        source: Source,
    },
}

impl DialectError {
    pub fn conn(driver: impl Into<String>, source: impl Into<Error>) -> Self {
        Self::Conn {
            driver: driver.into(),
            source: Source::from(Into::<Error>::into(source)),
        }
    }

    pub fn exec(sql: impl Into<String>, source: impl Into<Error>) -> Self {
        Self::Exec {
            sql: sql.into(),
            source: Source::from(Into::<Error>::into(source)),
        }
    }

    pub fn is_conn(&self) -> bool {
        matches!(self, Self::Conn { .. })
    }

    pub fn is_exec(&self) -> bool {
        matches!(self, Self::Exec { .. })
    }
}
