use crate::{Error, Result, Value};
use futures::{
    StreamExt,
    future::{self, BoxFuture},
    stream::BoxStream,
};
use std::sync::Arc;

/// Metadata about modify operations (INSERT/UPDATE/DELETE/DDL).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted identifier when available.
    pub last_affected_id: Option<i64>,
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    /// Case insensitive lookup, engines disagree on the case of unquoted labels.
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v.eq_ignore_ascii_case(name))
            .map(|i| &self.values[i])
    }
}

/// Connection pool, the only shared mutable resource the dialect relies on.
///
/// Implementations own their locking: the same pool is used concurrently by any
/// number of callers. Statements use `?` placeholders bound positionally to `vars`.
pub trait ConnPool: Send + Sync {
    /// Run a statement and report the rows it modified.
    fn execute<'a>(&'a self, sql: &'a str, vars: &'a [Value])
    -> BoxFuture<'a, Result<RowsAffected>>;

    /// Run a statement and stream back its rows.
    fn query<'a>(&'a self, sql: &'a str, vars: &'a [Value])
    -> BoxStream<'a, Result<RowLabeled>>;

    /// Start a transaction on a dedicated connection.
    fn begin(&self) -> BoxFuture<'_, Result<Box<dyn Transaction>>> {
        Box::pin(future::ready(Err(Error::msg(
            "Transactions are not supported by this connection pool",
        ))))
    }

    /// First column of the first row, `None` when the statement returns no rows.
    fn query_scalar<'a>(
        &'a self,
        sql: &'a str,
        vars: &'a [Value],
    ) -> BoxFuture<'a, Result<Option<Value>>> {
        Box::pin(async move {
            let mut stream = self.query(sql, vars);
            let Some(row) = stream.next().await.transpose()? else {
                return Ok(None);
            };
            Ok(Some(row.values.into_vec().into_iter().next().unwrap_or_default()))
        })
    }
}

/// An open transaction. Dropping it without committing leaves the outcome to the pool.
pub trait Transaction: ConnPool {
    fn commit(self: Box<Self>) -> BoxFuture<'static, Result<()>>;
    fn rollback(self: Box<Self>) -> BoxFuture<'static, Result<()>>;
}
