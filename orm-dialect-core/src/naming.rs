use std::borrow::Cow;

/// Maps model names to physical identifiers.
pub trait NamingStrategy: Send + Sync {
    fn table_name(&self, table: &str) -> String;

    fn column_name(&self, _table: &str, column: &str) -> String {
        column.to_owned()
    }

    fn index_name(&self, table: &str, column: &str) -> String {
        format!("idx_{}_{}", self.table_name(table), column)
    }
}

/// Identity naming: no pluralization, no case conversion. An optional prefix is prepended to tables.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct IdentityNaming {
    pub table_prefix: Cow<'static, str>,
}

impl IdentityNaming {
    pub const fn new() -> Self {
        Self {
            table_prefix: Cow::Borrowed(""),
        }
    }

    pub fn with_table_prefix(table_prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            table_prefix: table_prefix.into(),
        }
    }
}

impl NamingStrategy for IdentityNaming {
    fn table_name(&self, table: &str) -> String {
        let mut result = String::with_capacity(self.table_prefix.len() + table.len());
        result.push_str(&self.table_prefix);
        result.push_str(table);
        result
    }
}
