use crate::MockPool;
use orm_dialect_core::{ConnPool, Driver, Error, Result, future::BoxFuture};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Driver handing out a shared [`MockPool`] and counting how often it was asked to.
#[derive(Debug, Default)]
pub struct MockDriver {
    pool: MockPool,
    failure: Option<String>,
    opened: AtomicUsize,
    dsns: Mutex<Vec<String>>,
}

impl MockDriver {
    pub fn new(pool: MockPool) -> Self {
        Self {
            pool,
            ..Default::default()
        }
    }

    /// Driver refusing every open with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Number of open attempts.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::Relaxed)
    }

    /// Data source names received, in order.
    pub fn dsns(&self) -> Vec<String> {
        self.dsns.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Driver for MockDriver {
    fn open<'a>(&'a self, dsn: &'a str) -> BoxFuture<'a, Result<Arc<dyn ConnPool>>> {
        Box::pin(async move {
            self.opened.fetch_add(1, Ordering::Relaxed);
            self.dsns
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(dsn.into());
            if let Some(message) = &self.failure {
                return Err(Error::msg(message.clone()));
            }
            Ok(Arc::new(self.pool.clone()) as Arc<dyn ConnPool>)
        })
    }
}
