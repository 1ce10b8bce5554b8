use crate::{Dialector, Expr, SqlPiece, Value, separated_by, split_placeholders};
use std::fmt::{self, Debug, Display, Formatter};

/// SQL text under construction together with its bound values.
///
/// Identifiers and placeholders are rendered by the dialector, so the same
/// building code produces the right SQL for every engine.
pub struct Statement<'d> {
    dialector: &'d dyn Dialector,
    pub sql: String,
    pub vars: Vec<Value>,
}

impl<'d> Statement<'d> {
    pub fn new(dialector: &'d dyn Dialector) -> Self {
        Self {
            dialector,
            sql: String::new(),
            vars: Vec::new(),
        }
    }

    pub fn dialector(&self) -> &'d dyn Dialector {
        self.dialector
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn write_str(&mut self, value: &str) -> &mut Self {
        self.sql.push_str(value);
        self
    }

    pub fn write_char(&mut self, value: char) -> &mut Self {
        self.sql.push(value);
        self
    }

    pub fn write_quoted(&mut self, identifier: &str) -> &mut Self {
        self.dialector.quote_to(&mut self.sql, identifier);
        self
    }

    /// Quoted identifiers separated by `", "`.
    pub fn write_quoted_list<S: AsRef<str>>(
        &mut self,
        identifiers: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        let dialector = self.dialector;
        separated_by(
            &mut self.sql,
            identifiers,
            |out, v| dialector.quote_to(out, v.as_ref()),
            ", ",
        );
        self
    }

    /// Bind one value, writing its placeholder.
    pub fn add_var(&mut self, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        self.dialector
            .bind_var_to(&mut self.sql, self.vars.len() + 1, &value);
        self.vars.push(value);
        self
    }

    /// Append an expression, re-binding its values in order.
    pub fn add_expr(&mut self, expr: &Expr) -> &mut Self {
        if !expr.is_balanced() {
            log::warn!(
                "Expression `{}` has {} placeholders but {} values",
                expr.sql,
                expr.placeholders(),
                expr.vars.len()
            );
        }
        let mut vars = expr.vars.iter();
        for piece in split_placeholders(&expr.sql) {
            match piece {
                SqlPiece::Text(v) => {
                    self.sql.push_str(v);
                }
                SqlPiece::Placeholder => match vars.next() {
                    Some(v) => {
                        self.add_var(v.clone());
                    }
                    None => {
                        self.add_var(Value::Null);
                    }
                },
            }
        }
        self
    }

    /// The statement with its values inlined, for logs.
    pub fn explain(&self) -> String {
        self.dialector.explain(&self.sql, &self.vars)
    }

    pub fn into_expr(self) -> Expr {
        Expr::new(self.sql, self.vars)
    }
}

impl Display for Statement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl Debug for Statement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("dialector", &self.dialector.name())
            .field("sql", &self.sql)
            .field("vars", &self.vars)
            .finish()
    }
}
