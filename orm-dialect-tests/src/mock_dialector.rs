use crate::MockPool;
use orm_dialect_core::{
    ConnPool, DataType, Db, Dialector, Error, Expr, Field, Migrator, MigratorDialect, Result,
    SqlWriter, Value, future::BoxFuture,
};
use std::{fmt::Write, sync::Arc};

/// Writer numbering its placeholders (`$1`, `$2`, ...).
#[derive(Default, Debug, Clone, Copy)]
pub struct MockSqlWriter {}

impl SqlWriter for MockSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_column_type(&self, out: &mut String, field: &Field) {
        match &field.data_type {
            DataType::Bool => out.push_str("BOOLEAN"),
            DataType::Int64 | DataType::UInt64 => out.push_str("BIGINT"),
            v if v.is_integer() => out.push_str("INTEGER"),
            DataType::Float32 | DataType::Float64 => out.push_str("DOUBLE"),
            DataType::String if field.size > 0 => {
                let _ = write!(out, "VARCHAR({})", field.size);
            }
            DataType::Time => out.push_str("TIMESTAMP"),
            DataType::Bytes => out.push_str("BLOB"),
            DataType::Custom(v) => out.push_str(v),
            _ => out.push_str("TEXT"),
        }
    }

    fn write_bind_var(&self, out: &mut String, position: usize, _value: &Value) {
        let _ = write!(out, "${}", position);
    }
}

/// Engine agnostic dialector over a [`MockPool`].
#[derive(Debug, Clone, Default)]
pub struct MockDialector {
    pub pool: MockPool,
}

impl MockDialector {
    pub const NAME: &'static str = "mock";
    pub const CURRENT_DATABASE_SQL: &'static str = "SELECT current_database()";

    pub fn new(pool: MockPool) -> Self {
        Self { pool }
    }
}

impl Dialector for MockDialector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn initialize<'a>(&'a self, db: &'a mut Db) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            db.set_conn_pool(Arc::new(self.pool.clone()));
            Ok(())
        })
    }

    fn migrator<'a>(&self, db: &'a Db) -> Migrator<'a> {
        Migrator::new(db, MockMigratorDialect)
    }

    fn data_type_of(&self, field: &Field) -> String {
        let mut out = String::new();
        MockSqlWriter::default().write_column_type(&mut out, field);
        out
    }

    fn default_value_of(&self, field: &Field) -> Expr {
        field
            .default_value_ref()
            .map(|v| Expr::bind(v.clone()))
            .unwrap_or_default()
    }

    fn bind_var_to(&self, out: &mut String, position: usize, value: &Value) {
        MockSqlWriter::default().write_bind_var(out, position, value);
    }

    fn quote_to(&self, out: &mut String, identifier: &str) {
        MockSqlWriter::default().write_identifier_quoted(out, identifier);
    }

    fn explain(&self, sql: &str, vars: &[Value]) -> String {
        let mut out = String::new();
        MockSqlWriter::default().write_explain(&mut out, sql, vars);
        out
    }

    fn save_point<'a>(
        &'a self,
        tx: &'a dyn ConnPool,
        name: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            tx.execute(&format!("SAVEPOINT {}", name), &[]).await?;
            Ok(())
        })
    }

    fn rollback_to<'a>(
        &'a self,
        tx: &'a dyn ConnPool,
        name: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            tx.execute(&format!("ROLLBACK TO SAVEPOINT {}", name), &[])
                .await?;
            Ok(())
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct MockMigratorDialect;

impl MigratorDialect for MockMigratorDialect {
    fn current_database<'a>(&'a self, db: &'a Db) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            match db
                .raw_scalar(MockDialector::CURRENT_DATABASE_SQL, &[])
                .await?
            {
                Some(Value::Varchar(Some(v))) => Ok(v),
                v => Err(Error::msg(format!("Unexpected current database {:?}", v))),
            }
        })
    }
}
