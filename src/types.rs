//! Tensor buffer handles shared with the host runtime.

/// Element type tag carried alongside a tensor buffer.
///
/// The engine computes in `f32` only. The tag travels with the buffer so
/// the host can enforce its own contracts; the engine performs no type
/// check on the hot path (caller contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DType {
    #[default]
    F32,
}

impl DType {
    pub fn size_of(&self) -> usize {
        match self {
            DType::F32 => 4,
        }
    }
}

/// Read-only tensor buffer: contiguous row-major data plus its shape.
///
/// The buffer is owned by the caller; the engine only reads it within one
/// invocation and never holds on to it.
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a> {
    pub data: &'a [f32],
    pub shape: &'a [usize],
    pub dtype: DType,
}

impl<'a> TensorView<'a> {
    pub fn new(data: &'a [f32], shape: &'a [usize]) -> Self {
        Self {
            data,
            shape,
            dtype: DType::F32,
        }
    }
}

/// Mutable tensor buffer for the result operand.
///
/// Pre-allocated by the caller to the full output extent; the engine fully
/// overwrites it within one invocation.
#[derive(Debug)]
pub struct TensorViewMut<'a> {
    pub data: &'a mut [f32],
    pub shape: &'a [usize],
    pub dtype: DType,
}

impl<'a> TensorViewMut<'a> {
    pub fn new(data: &'a mut [f32], shape: &'a [usize]) -> Self {
        Self {
            data,
            shape,
            dtype: DType::F32,
        }
    }
}
