use crate::{NuoDbDsn, NuoDbMigrator, NuoDbSqlWriter};
use orm_dialect_core::{
    ConnPool, Db, DialectError, Dialector, Error, Expr, Field, IdentityNaming, Migrator,
    NamingStrategy, Result, SqlWriter, Value, future::BoxFuture, open_driver,
};
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

/// NuoDB dialect.
///
/// Holds the data source name and the driver used to open the connection pool.
/// Nothing is opened until [`Dialector::initialize`] runs.
#[derive(Clone)]
pub struct NuoDbDialector {
    pub dsn: String,
    /// Name the driver was registered under, empty means [`NuoDbDialector::DEFAULT_DRIVER`].
    pub driver_name: String,
    /// Pool supplied by the caller, who keeps the responsibility of closing it.
    pub conn: Option<Arc<dyn ConnPool>>,
    /// Installed into the ORM configuration on initialization.
    pub naming_strategy: Arc<dyn NamingStrategy>,
}

impl NuoDbDialector {
    pub const NAME: &'static str = "nuodb";
    pub const DEFAULT_DRIVER: &'static str = "nuodb";

    pub fn open(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            driver_name: Self::DEFAULT_DRIVER.into(),
            conn: None,
            naming_strategy: Arc::new(IdentityNaming::new()),
        }
    }

    /// Reuse an existing pool instead of opening one.
    pub fn with_conn(mut self, conn: Arc<dyn ConnPool>) -> Self {
        self.conn = Some(conn);
        self
    }

    pub fn with_driver_name(mut self, driver_name: impl Into<String>) -> Self {
        self.driver_name = driver_name.into();
        self
    }

    pub fn with_naming_strategy(mut self, naming_strategy: Arc<dyn NamingStrategy>) -> Self {
        self.naming_strategy = naming_strategy;
        self
    }

    pub fn driver_name(&self) -> &str {
        if self.driver_name.is_empty() {
            Self::DEFAULT_DRIVER
        } else {
            &self.driver_name
        }
    }

    pub const fn sql_writer(&self) -> NuoDbSqlWriter {
        NuoDbSqlWriter::new()
    }

    async fn open_pool(&self) -> Result<Arc<dyn ConnPool>> {
        let driver = self.driver_name();
        NuoDbDsn::parse(&self.dsn).map_err(|e| DialectError::conn(driver, e))?;
        log::debug!("Opening a connection pool with the `{}` driver", driver);
        let pool = open_driver(driver, &self.dsn)
            .await
            .map_err(|e| DialectError::conn(driver, e))?;
        Ok(pool)
    }

    async fn execute_control(&self, tx: &dyn ConnPool, sql: String) -> Result<()> {
        log::debug!("{}", sql);
        if let Err(e) = tx.execute(&sql, &[]).await {
            let e = Error::new(DialectError::exec(sql, e));
            log::error!("{:#}", e);
            return Err(e);
        }
        Ok(())
    }
}

impl Dialector for NuoDbDialector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn initialize<'a>(&'a self, db: &'a mut Db) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let pool = match &self.conn {
                Some(conn) => conn.clone(),
                None => self.open_pool().await.map_err(|e| {
                    log::error!("{:#}", e);
                    e
                })?,
            };
            db.set_conn_pool(pool);
            db.config.naming_strategy = self.naming_strategy.clone();
            Ok(())
        })
    }

    fn migrator<'a>(&self, db: &'a Db) -> Migrator<'a> {
        Migrator::new(db, NuoDbMigrator::new())
    }

    fn data_type_of(&self, field: &Field) -> String {
        let mut out = String::new();
        self.sql_writer().write_column_type(&mut out, field);
        out
    }

    fn default_value_of(&self, field: &Field) -> Expr {
        match field.default_value_ref() {
            Some(value) => Expr::bind(value.clone()),
            None => Expr::default(),
        }
    }

    fn bind_var_to(&self, out: &mut String, position: usize, value: &Value) {
        self.sql_writer().write_bind_var(out, position, value);
    }

    fn quote_to(&self, out: &mut String, identifier: &str) {
        self.sql_writer().write_identifier_quoted(out, identifier);
    }

    fn explain(&self, sql: &str, vars: &[Value]) -> String {
        let mut out = String::with_capacity(sql.len());
        self.sql_writer().write_explain(&mut out, sql, vars);
        out
    }

    fn save_point<'a>(
        &'a self,
        tx: &'a dyn ConnPool,
        name: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        let mut sql = String::new();
        self.sql_writer().write_savepoint(&mut sql, name);
        Box::pin(self.execute_control(tx, sql))
    }

    fn rollback_to<'a>(
        &'a self,
        tx: &'a dyn ConnPool,
        name: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        let mut sql = String::new();
        self.sql_writer().write_rollback_to_savepoint(&mut sql, name);
        Box::pin(self.execute_control(tx, sql))
    }
}

impl Debug for NuoDbDialector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NuoDbDialector")
            .field("driver_name", &self.driver_name())
            .field("conn", &self.conn.is_some())
            .finish_non_exhaustive()
    }
}
