use async_stream::try_stream;
use orm_dialect_core::{
    ConnPool, Error, Result, RowLabeled, RowNames, RowsAffected, Transaction, Value,
    future::BoxFuture,
    stream::{BoxStream, StreamExt},
};
use std::sync::{Arc, Mutex, MutexGuard};

/// Statement received by a [`MockPool`].
#[derive(Debug, Clone, PartialEq)]
pub struct Logged {
    pub sql: String,
    pub vars: Vec<Value>,
}

#[derive(Debug, Clone)]
enum Response {
    Rows(Vec<RowLabeled>),
    Failure(String),
}

#[derive(Debug, Default)]
struct State {
    log: Vec<Logged>,
    /// First match wins, matched when the statement contains the pattern.
    script: Vec<(String, Response)>,
    rows_affected: u64,
}

/// In memory connection pool recording every statement and answering from a script.
///
/// Clones share the same log and script, so a test can keep one while the ORM owns another.
#[derive(Debug, Clone, Default)]
pub struct MockPool {
    state: Arc<Mutex<State>>,
}

impl MockPool {
    pub fn new() -> Self {
        Default::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer the statements containing `pattern` with `rows`.
    pub fn with_rows(self, pattern: &str, labels: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let labels: RowNames = labels.iter().map(|v| v.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|v| RowLabeled::new(labels.clone(), v.into()))
            .collect();
        self.state()
            .script
            .push((pattern.into(), Response::Rows(rows)));
        self
    }

    /// Answer the statements containing `pattern` with a single row and column.
    pub fn with_scalar(self, pattern: &str, value: impl Into<Value>) -> Self {
        self.with_rows(pattern, &["value"], vec![vec![value.into()]])
    }

    /// Fail the statements containing `pattern` with `message`.
    pub fn with_failure(self, pattern: &str, message: &str) -> Self {
        self.state()
            .script
            .push((pattern.into(), Response::Failure(message.into())));
        self
    }

    /// Rows affected reported by every successful execution.
    pub fn with_rows_affected(self, rows_affected: u64) -> Self {
        self.state().rows_affected = rows_affected;
        self
    }

    /// Everything received so far, in order.
    pub fn log(&self) -> Vec<Logged> {
        self.state().log.clone()
    }

    pub fn statements(&self) -> Vec<String> {
        self.state().log.iter().map(|v| v.sql.clone()).collect()
    }

    pub fn clear(&self) {
        self.state().log.clear();
    }

    fn receive(&self, sql: &str, vars: &[Value]) -> Option<Response> {
        let mut state = self.state();
        state.log.push(Logged {
            sql: sql.into(),
            vars: vars.to_vec(),
        });
        state
            .script
            .iter()
            .find(|(pattern, ..)| sql.contains(pattern.as_str()))
            .map(|(.., response)| response.clone())
    }
}

impl ConnPool for MockPool {
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        vars: &'a [Value],
    ) -> BoxFuture<'a, Result<RowsAffected>> {
        Box::pin(async move {
            if let Some(Response::Failure(message)) = self.receive(sql, vars) {
                return Err(Error::msg(message));
            }
            Ok(RowsAffected {
                rows_affected: self.state().rows_affected,
                last_affected_id: None,
            })
        })
    }

    fn query<'a>(
        &'a self,
        sql: &'a str,
        vars: &'a [Value],
    ) -> BoxStream<'a, Result<RowLabeled>> {
        let response = self.receive(sql, vars);
        try_stream! {
            match response {
                Some(Response::Rows(rows)) => {
                    for row in rows {
                        yield row;
                    }
                }
                Some(Response::Failure(message)) => Err::<(), _>(Error::msg(message))?,
                None => {}
            }
        }
        .boxed()
    }

    fn begin(&self) -> BoxFuture<'_, Result<Box<dyn Transaction>>> {
        Box::pin(async move {
            if let Some(Response::Failure(message)) = self.receive("BEGIN", &[]) {
                return Err(Error::msg(message));
            }
            Ok(Box::new(MockTransaction { pool: self.clone() }) as Box<dyn Transaction>)
        })
    }
}

/// Transaction of a [`MockPool`], logging into the same history as its pool.
#[derive(Debug)]
pub struct MockTransaction {
    pool: MockPool,
}

impl MockTransaction {
    fn finish(self: Box<Self>, sql: &'static str) -> BoxFuture<'static, Result<()>> {
        Box::pin(async move {
            match self.pool.receive(sql, &[]) {
                Some(Response::Failure(message)) => Err(Error::msg(message)),
                _ => Ok(()),
            }
        })
    }
}

impl ConnPool for MockTransaction {
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        vars: &'a [Value],
    ) -> BoxFuture<'a, Result<RowsAffected>> {
        self.pool.execute(sql, vars)
    }

    fn query<'a>(
        &'a self,
        sql: &'a str,
        vars: &'a [Value],
    ) -> BoxStream<'a, Result<RowLabeled>> {
        self.pool.query(sql, vars)
    }
}

impl Transaction for MockTransaction {
    fn commit(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        self.finish("COMMIT")
    }

    fn rollback(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        self.finish("ROLLBACK")
    }
}
