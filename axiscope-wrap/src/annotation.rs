#![forbid(unsafe_code)]

use axiscope_shape::{Array, DTypeSpec, ShapeAnnotation, ShapeParseError};

/// A declared type, as seen by the type-checking capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Annotation {
    Any,
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    Array(ShapeAnnotation),
    List(Box<Annotation>),
    Optional(Box<Annotation>),
    Union(Vec<Annotation>),

    // Nominal class, by name.
    Named(String),

    // `type[...]`: the value is itself a class.
    TypeOf(Vec<Annotation>),

    // Textual reference that was never resolved to a type.
    Forward(String),
}

impl Annotation {
    pub fn array(dtype: DTypeSpec, dims: &str) -> Result<Self, ShapeParseError> {
        Ok(Annotation::Array(ShapeAnnotation::new(dtype, dims)?))
    }

    /// Annotations that cannot be checked and are let through: unresolved
    /// textual references, and `type[...]` over a single textual reference.
    pub fn is_unverifiable(&self) -> bool {
        match self {
            Annotation::Forward(_) => true,
            Annotation::TypeOf(args) => matches!(args.as_slice(), [Annotation::Forward(_)]),
            _ => false,
        }
    }

    pub fn display(&self) -> String {
        let join = |items: &[Annotation]| {
            items
                .iter()
                .map(|a| a.display())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            Annotation::Any => "Any".to_string(),
            Annotation::NoneType => "None".to_string(),
            Annotation::Bool => "bool".to_string(),
            Annotation::Int => "int".to_string(),
            Annotation::Float => "float".to_string(),
            Annotation::Str => "str".to_string(),
            Annotation::Array(shape) => shape.display(),
            Annotation::List(elem) => format!("list[{}]", elem.display()),
            Annotation::Optional(inner) => format!("Optional[{}]", inner.display()),
            Annotation::Union(arms) => format!("Union[{}]", join(arms)),
            Annotation::Named(n) => n.clone(),
            Annotation::TypeOf(args) => format!("type[{}]", join(args)),
            Annotation::Forward(n) => format!("'{n}'"),
        }
    }
}

/// A runtime value handed to the type-checking capability.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Array),
    List(Vec<Value>),
    /// Instance of the named class.
    Object(String),
    /// The named class itself.
    Class(String),
}

impl Value {
    pub fn type_name(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::Array(arr) => {
                let dims = arr
                    .shape
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}[{dims}]", arr.dtype.name())
            }
            Value::List(items) => format!("list (len {})", items.len()),
            Value::Object(class) => class.clone(),
            Value::Class(class) => format!("type[{class}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use axiscope_shape::DType;

    use super::*;

    #[test]
    fn forward_reference_carve_outs() {
        assert!(Annotation::Forward("Tree".into()).is_unverifiable());
        assert!(Annotation::TypeOf(vec![Annotation::Forward("Tree".into())]).is_unverifiable());
        assert!(!Annotation::TypeOf(vec![Annotation::Named("Tree".into())]).is_unverifiable());
        assert!(
            !Annotation::TypeOf(vec![
                Annotation::Forward("A".into()),
                Annotation::Forward("B".into())
            ])
            .is_unverifiable()
        );
        assert!(!Annotation::Optional(Box::new(Annotation::Forward("A".into()))).is_unverifiable());
    }

    #[test]
    fn displays() {
        let ann = Annotation::Optional(Box::new(Annotation::Union(vec![
            Annotation::Int,
            Annotation::array(DTypeSpec::Float, "n").expect("parse"),
        ])));
        assert_eq!(ann.display(), "Optional[Union[int, Float[\"n\"]]]");
        assert_eq!(
            Value::Array(Array::new(DType::I64, vec![2, 3])).type_name(),
            "int64[2, 3]"
        );
    }
}
