#![forbid(unsafe_code)]

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    U8,
    I32,
    I64,
    F16,
    F32,
    F64,
}

impl DType {
    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::U8 => "uint8",
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::F16 => "float16",
            DType::F32 => "float32",
            DType::F64 => "float64",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::F16 | DType::F32 | DType::F64)
    }

    pub fn is_integer(self) -> bool {
        matches!(self, DType::U8 | DType::I32 | DType::I64)
    }
}

/// Which dtypes an annotation admits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DTypeSpec {
    Any,
    Float,
    Int,
    Exact(DType),
}

impl DTypeSpec {
    pub fn accepts(&self, dtype: DType) -> bool {
        match self {
            DTypeSpec::Any => true,
            DTypeSpec::Float => dtype.is_float(),
            DTypeSpec::Int => dtype.is_integer(),
            DTypeSpec::Exact(want) => *want == dtype,
        }
    }

    pub fn display(&self) -> String {
        match self {
            DTypeSpec::Any => "Shaped".to_string(),
            DTypeSpec::Float => "Float".to_string(),
            DTypeSpec::Int => "Int".to_string(),
            DTypeSpec::Exact(dt) => match dt {
                DType::Bool => "Bool".to_string(),
                DType::U8 => "UInt8".to_string(),
                DType::I32 => "Int32".to_string(),
                DType::I64 => "Int64".to_string(),
                DType::F16 => "Float16".to_string(),
                DType::F32 => "Float32".to_string(),
                DType::F64 => "Float64".to_string(),
            },
        }
    }
}
