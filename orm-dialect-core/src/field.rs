use crate::{DataType, Value};
use std::borrow::Cow;

/// Default of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Concrete value, rendered through a bound parameter.
    Value(Value),
    /// SQL expression written verbatim in the DDL (`CURRENT_TIMESTAMP`, `0`, ...).
    Expression(Cow<'static, str>),
}

/// Declarative description of one model column, supplied by the ORM.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Field {
    /// Column name before the naming strategy is applied.
    pub name: Cow<'static, str>,
    /// Logical type.
    pub data_type: DataType,
    /// Declared size, length for strings and bit width hint for numbers (0 => unspecified).
    pub size: u32,
    /// Declared precision (0 => unspecified).
    pub precision: u32,
    /// Declared scale.
    pub scale: u32,
    pub primary_key: bool,
    pub not_null: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,
}

impl Field {
    pub fn new(name: impl Into<Cow<'static, str>>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Default::default()
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn default_expression(mut self, expression: impl Into<Cow<'static, str>>) -> Self {
        self.default = Some(DefaultValue::Expression(expression.into()));
        self
    }

    /// The concrete default value, if one is declared and it is not `NULL`.
    pub fn default_value_ref(&self) -> Option<&Value> {
        match &self.default {
            Some(DefaultValue::Value(v)) if !v.is_null() => Some(v),
            _ => None,
        }
    }
}
