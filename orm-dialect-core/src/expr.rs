use crate::{SqlPiece, Value, split_placeholders};
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};

/// SQL fragment together with the values bound to its `?` placeholders, in order.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Expr {
    pub sql: Cow<'static, str>,
    pub vars: Vec<Value>,
}

impl Expr {
    pub fn new(sql: impl Into<Cow<'static, str>>, vars: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            vars,
        }
    }

    /// Fragment without placeholders.
    pub fn raw(sql: impl Into<Cow<'static, str>>) -> Self {
        Self::new(sql, Vec::new())
    }

    /// A single placeholder bound to `value`.
    pub fn bind(value: impl Into<Value>) -> Self {
        Self::new("?", vec![value.into()])
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty() && self.vars.is_empty()
    }

    /// Number of placeholders in the fragment.
    pub fn placeholders(&self) -> usize {
        split_placeholders(&self.sql)
            .filter(|v| *v == SqlPiece::Placeholder)
            .count()
    }

    /// Whether the placeholders and the bound values line up.
    pub fn is_balanced(&self) -> bool {
        self.placeholders() == self.vars.len()
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
