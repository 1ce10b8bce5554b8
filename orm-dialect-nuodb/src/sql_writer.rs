use orm_dialect_core::{DataType, Field, SqlWriter, Value};
use std::fmt::Write;

/// Longest string still declared as `varchar(n)`, longer or unsized ones become `text`.
pub const MAX_VARCHAR_SIZE: u32 = 4000;

#[derive(Default, Debug, Clone, Copy)]
pub struct NuoDbSqlWriter {}

impl NuoDbSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }

    pub fn write_savepoint(&self, out: &mut String, name: &str) {
        out.push_str("SAVEPOINT ");
        out.push_str(name);
    }

    pub fn write_rollback_to_savepoint(&self, out: &mut String, name: &str) {
        out.push_str("ROLLBACK TO SAVEPOINT ");
        out.push_str(name);
    }
}

impl SqlWriter for NuoDbSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_column_type(&self, out: &mut String, field: &Field) {
        match &field.data_type {
            DataType::Bool => out.push_str("boolean"),
            DataType::Int
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::UInt
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32 => out.push_str("integer"),
            DataType::Int64 | DataType::UInt64 => out.push_str("bigint"),
            DataType::Float32 | DataType::Float64 => out.push_str("double"),
            DataType::String => {
                if field.size > 0 && field.size <= MAX_VARCHAR_SIZE {
                    let _ = write!(out, "varchar({})", field.size);
                } else {
                    out.push_str("text");
                }
            }
            DataType::Time => out.push_str("timestamp"),
            DataType::Bytes => out.push_str("blob"),
            DataType::Custom(v) if v.trim().is_empty() => {
                log::warn!(
                    "Field `{}` has an empty declared type, falling back to text",
                    field.name
                );
                out.push_str("text");
            }
            DataType::Custom(v) => out.push_str(v),
        }
    }

    fn write_bind_var(&self, out: &mut String, _position: usize, _value: &Value) {
        out.push('?');
    }
}
