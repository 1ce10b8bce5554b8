use crate::{ConnPool, Db, Expr, Field, Migrator, Result, Value};
use futures::future::BoxFuture;

/// Translator between the abstract ORM model and the concrete SQL of one engine.
///
/// The ORM calls [`Dialector::name`] and [`Dialector::initialize`] once while
/// opening a [`Db`], the rendering methods on every statement, and
/// [`Dialector::migrator`] only for explicit schema management.
pub trait Dialector: Send + Sync {
    /// Fixed identifier used for dialect specific branching.
    fn name(&self) -> &'static str;

    /// Install the connection pool and the naming strategy into `db`.
    ///
    /// Connection failures are reported as [`crate::DialectError::Conn`], leaving `db` without a pool.
    fn initialize<'a>(&'a self, db: &'a mut Db) -> BoxFuture<'a, Result<()>>;

    /// Schema migrator bound to `db`.
    fn migrator<'a>(&self, db: &'a Db) -> Migrator<'a>;

    /// Native column type of `field`. Never fails and never returns an empty string.
    fn data_type_of(&self, field: &Field) -> String;

    /// Default clause value of `field`, empty when the field has no concrete default.
    fn default_value_of(&self, field: &Field) -> Expr;

    /// Append the placeholder of the parameter at `position` (from 1).
    fn bind_var_to(&self, out: &mut String, position: usize, value: &Value);

    /// Append `identifier` quoted.
    fn quote_to(&self, out: &mut String, identifier: &str);

    /// Human readable rendering of `sql` with its placeholders substituted by `vars`.
    fn explain(&self, sql: &str, vars: &[Value]) -> String;

    /// Create the savepoint `name` inside the transaction `tx`.
    fn save_point<'a>(&'a self, tx: &'a dyn ConnPool, name: &'a str)
    -> BoxFuture<'a, Result<()>>;

    /// Roll the transaction `tx` back to the savepoint `name`.
    fn rollback_to<'a>(
        &'a self,
        tx: &'a dyn ConnPool,
        name: &'a str,
    ) -> BoxFuture<'a, Result<()>>;
}
