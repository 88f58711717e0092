#![forbid(unsafe_code)]

use crate::dtype::DType;

/// Anything with a dtype and a shape can be checked against an annotation.
pub trait ArrayLike {
    fn dtype(&self) -> DType;
    fn shape(&self) -> &[usize];
}

/// Dtype and shape only; no element storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Array {
    pub dtype: DType,
    pub shape: Vec<usize>,
}

impl Array {
    pub fn new(dtype: DType, shape: Vec<usize>) -> Self {
        Self { dtype, shape }
    }
}

impl ArrayLike for Array {
    fn dtype(&self) -> DType {
        self.dtype
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }
}
