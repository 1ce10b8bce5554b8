use orm_dialect_core::{Db, Error, MigratorDialect, Result, Value, future::BoxFuture};

/// NuoDB flavor of the schema migrator.
///
/// Introspection goes through the generic `information_schema` queries, only
/// the lookup of the current schema is engine specific.
#[derive(Default, Debug, Clone, Copy)]
pub struct NuoDbMigrator;

impl NuoDbMigrator {
    pub const CURRENT_DATABASE_SQL: &'static str = "select current_schema";

    pub const fn new() -> Self {
        Self
    }
}

impl MigratorDialect for NuoDbMigrator {
    fn current_database<'a>(&'a self, db: &'a Db) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let value = db.raw_scalar(Self::CURRENT_DATABASE_SQL, &[]).await?;
            match value {
                Some(Value::Varchar(Some(v))) => Ok(v),
                Some(v) if v.is_null() => Ok(String::new()),
                Some(v) => {
                    let error = Error::msg(format!(
                        "Unexpected value {:?} returned by `{}`",
                        v,
                        Self::CURRENT_DATABASE_SQL
                    ));
                    log::error!("{:#}", error);
                    Err(error)
                }
                None => {
                    let error = Error::msg(format!(
                        "No row returned by `{}`",
                        Self::CURRENT_DATABASE_SQL
                    ));
                    log::error!("{:#}", error);
                    Err(error)
                }
            }
        })
    }
}
