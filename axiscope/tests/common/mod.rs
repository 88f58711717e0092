#![allow(dead_code)]

use axiscope::{Array, DType, DTypeSpec, ShapeAnnotation};

pub fn f32s(shape: &[usize]) -> Array {
    Array::new(DType::F32, shape.to_vec())
}

pub fn float(dims: &str) -> ShapeAnnotation {
    ShapeAnnotation::new(DTypeSpec::Float, dims).expect("shape pattern")
}
