use crate::Field;
use std::borrow::Cow;

/// Desired shape of an index.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub name: Cow<'static, str>,
    /// Column names, before the naming strategy is applied.
    pub columns: Vec<Cow<'static, str>>,
    pub unique: bool,
}

impl IndexDef {
    pub fn new<C, I>(name: impl Into<Cow<'static, str>>, columns: I) -> Self
    where
        C: Into<Cow<'static, str>>,
        I: IntoIterator<Item = C>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Desired shape of a table, the input of the migrator.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct TableDef {
    /// Table name before the naming strategy is applied.
    pub name: Cow<'static, str>,
    pub fields: Vec<Field>,
    pub indexes: Vec<IndexDef>,
}

impl TableDef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
