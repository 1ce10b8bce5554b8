use crate::{
    ConnPool, Dialector, Error, IdentityNaming, Migrator, NamingStrategy, Result, RowLabeled,
    RowsAffected, Statement, Transaction, Value, truncate_long,
};
use futures::stream::{self, BoxStream, StreamExt};
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

/// Settings shared by everything built on top of a [`Db`].
#[derive(Clone)]
pub struct Config {
    /// Maps model names to physical identifiers, installed by the dialector.
    pub naming_strategy: Arc<dyn NamingStrategy>,
    /// Render and log the modifying statements without executing them.
    pub dry_run: bool,
}

impl Config {
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            naming_strategy: Arc::new(IdentityNaming::new()),
            dry_run: false,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

/// ORM context: the dialector, the connection pool it installed and the shared configuration.
pub struct Db {
    pub config: Config,
    dialector: Arc<dyn Dialector>,
    conn_pool: Option<Arc<dyn ConnPool>>,
}

impl Db {
    /// Context not yet initialized, it has no connection pool.
    pub fn new(dialector: Arc<dyn Dialector>, config: Config) -> Self {
        Self {
            config,
            dialector,
            conn_pool: None,
        }
    }

    /// Build the context and let the dialector initialize it.
    pub async fn open<D: Dialector + 'static>(dialector: D, config: Config) -> Result<Self> {
        let mut db = Self::new(Arc::new(dialector), config);
        let dialector = db.dialector.clone();
        log::debug!("Initializing the `{}` dialector", dialector.name());
        dialector.initialize(&mut db).await?;
        Ok(db)
    }

    pub fn dialector(&self) -> &dyn Dialector {
        self.dialector.as_ref()
    }

    pub fn naming_strategy(&self) -> &dyn NamingStrategy {
        self.config.naming_strategy.as_ref()
    }

    pub fn conn_pool(&self) -> Option<&Arc<dyn ConnPool>> {
        self.conn_pool.as_ref()
    }

    pub fn set_conn_pool(&mut self, conn_pool: Arc<dyn ConnPool>) {
        self.conn_pool = Some(conn_pool);
    }

    /// The installed pool or an error when the context was never initialized.
    pub fn pool(&self) -> Result<&dyn ConnPool> {
        self.conn_pool.as_deref().ok_or_else(|| {
            let error = Error::msg(format!(
                "No connection pool, the `{}` dialector was not initialized",
                self.dialector.name()
            ));
            log::error!("{:#}", error);
            error
        })
    }

    pub fn statement(&self) -> Statement<'_> {
        Statement::new(self.dialector.as_ref())
    }

    pub fn migrator(&self) -> Migrator<'_> {
        self.dialector.migrator(self)
    }

    pub fn explain(&self, sql: &str, vars: &[Value]) -> String {
        self.dialector.explain(sql, vars)
    }

    /// Execute a statement on the pool, skipped in dry run mode.
    pub async fn exec(&self, sql: &str, vars: &[Value]) -> Result<RowsAffected> {
        if self.skip_dry_run(sql, vars) {
            return Ok(RowsAffected::default());
        }
        self.exec_on(self.pool()?, sql, vars).await
    }

    fn skip_dry_run(&self, sql: &str, vars: &[Value]) -> bool {
        if self.config.dry_run {
            log::info!("Dry run, skipping:\n{}", truncate_long!(self.explain(sql, vars)));
        }
        self.config.dry_run
    }

    async fn exec_on(
        &self,
        executor: &dyn ConnPool,
        sql: &str,
        vars: &[Value],
    ) -> Result<RowsAffected> {
        let explained = self.explain(sql, vars);
        log::debug!("{}", truncate_long!(explained));
        executor.execute(sql, vars).await.map_err(|e| {
            let e = e.context(format!("While executing:\n{}", truncate_long!(explained)));
            log::error!("{:#}", e);
            e
        })
    }

    pub async fn exec_statement(&self, statement: &Statement<'_>) -> Result<RowsAffected> {
        self.exec(&statement.sql, &statement.vars).await
    }

    /// Stream the rows of a query.
    pub fn raw<'a>(&'a self, sql: &'a str, vars: &'a [Value]) -> BoxStream<'a, Result<RowLabeled>> {
        match self.pool() {
            Ok(pool) => {
                log::debug!("{}", truncate_long!(self.explain(sql, vars)));
                pool.query(sql, vars)
            }
            Err(e) => stream::once(async { Err(e) }).boxed(),
        }
    }

    /// First column of the first row of a query.
    pub async fn raw_scalar(&self, sql: &str, vars: &[Value]) -> Result<Option<Value>> {
        log::debug!("{}", truncate_long!(self.explain(sql, vars)));
        self.pool()?.query_scalar(sql, vars).await.map_err(|e| {
            let e = e.context(format!(
                "While querying:\n{}",
                truncate_long!(self.explain(sql, vars))
            ));
            log::error!("{:#}", e);
            e
        })
    }

    /// Start a transaction on the installed pool.
    pub async fn begin(&self) -> Result<Tx<'_>> {
        let transaction = self.pool()?.begin().await.map_err(|e| {
            log::error!("{:#}", e);
            e
        })?;
        Ok(Tx {
            db: self,
            transaction,
        })
    }
}

impl Debug for Db {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("dialector", &self.dialector.name())
            .field("config", &self.config)
            .field("initialized", &self.conn_pool.is_some())
            .finish()
    }
}

/// Transaction scoped ORM session, savepoints are delegated to the dialector.
pub struct Tx<'db> {
    db: &'db Db,
    transaction: Box<dyn Transaction>,
}

impl<'db> Tx<'db> {
    pub fn db(&self) -> &'db Db {
        self.db
    }

    pub fn as_pool(&self) -> &dyn ConnPool {
        self.transaction.as_ref()
    }

    /// Execute a statement inside the transaction, skipped in dry run mode.
    pub async fn exec(&self, sql: &str, vars: &[Value]) -> Result<RowsAffected> {
        if self.db.skip_dry_run(sql, vars) {
            return Ok(RowsAffected::default());
        }
        self.db.exec_on(self.as_pool(), sql, vars).await
    }

    pub async fn save_point(&self, name: &str) -> Result<()> {
        self.db
            .dialector()
            .save_point(self.transaction.as_ref(), name)
            .await
    }

    pub async fn rollback_to(&self, name: &str) -> Result<()> {
        self.db
            .dialector()
            .rollback_to(self.transaction.as_ref(), name)
            .await
    }

    pub async fn commit(self) -> Result<()> {
        self.transaction.commit().await
    }

    pub async fn rollback(self) -> Result<()> {
        self.transaction.rollback().await
    }
}
