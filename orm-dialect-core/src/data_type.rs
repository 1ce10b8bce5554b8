use std::fmt::{self, Display, Formatter};

/// Logical type of a model field, independent of any engine.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    /// Platform sized signed integer.
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform sized unsigned integer.
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    #[default]
    String,
    Time,
    Bytes,
    /// Declared type with no logical counterpart, kept as written.
    Custom(String),
}

impl DataType {
    /// Raw declared-type string.
    pub fn as_str(&self) -> &str {
        match self {
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::UInt => "uint",
            DataType::UInt8 => "uint8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::String => "string",
            DataType::Time => "time",
            DataType::Bytes => "bytes",
            DataType::Custom(v) => v,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }
}

impl From<&str> for DataType {
    fn from(value: &str) -> Self {
        match value {
            "bool" => DataType::Bool,
            "int" => DataType::Int,
            "int8" => DataType::Int8,
            "int16" => DataType::Int16,
            "int32" => DataType::Int32,
            "int64" => DataType::Int64,
            "uint" => DataType::UInt,
            "uint8" => DataType::UInt8,
            "uint16" => DataType::UInt16,
            "uint32" => DataType::UInt32,
            "uint64" => DataType::UInt64,
            "float32" => DataType::Float32,
            "float64" => DataType::Float64,
            "string" => DataType::String,
            "time" => DataType::Time,
            "bytes" => DataType::Bytes,
            _ => DataType::Custom(value.to_owned()),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
