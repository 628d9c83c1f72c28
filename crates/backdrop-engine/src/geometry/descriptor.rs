use thiserror::Error;

use crate::render::DrawCall;

/// Byte size of the `float32x4` position attribute.
const POSITION_SIZE: u64 = 16;

/// Byte size of the `float32x2` UV attribute.
const UV_SIZE: u64 = 8;

/// Vertex attribute offsets and strides must be 4-byte aligned.
const ATTRIBUTE_ALIGNMENT: u64 = 4;

/// Interleaved vertex layout constants.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Bytes between consecutive vertices.
    pub stride: u64,
    /// Byte offset of the `float32x4` position inside one vertex.
    pub position_offset: u64,
    /// Byte offset of the `float32x2` UV inside one vertex.
    pub uv_offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("mesh has no vertices")]
    Empty,

    #[error("vertex stride must be a non-zero multiple of 4 bytes (got {stride})")]
    BadStride { stride: u64 },

    #[error("{attribute} attribute at offset {offset} (+{size} bytes) does not fit a {stride}-byte vertex")]
    AttributeOutOfBounds {
        attribute: &'static str,
        offset: u64,
        size: u64,
        stride: u64,
    },

    #[error("{attribute} attribute offset {offset} is not 4-byte aligned")]
    MisalignedAttribute { attribute: &'static str, offset: u64 },

    #[error("{vertex_count} vertices at stride {stride} need {required} bytes, table holds {available}")]
    TableTooSmall {
        vertex_count: u32,
        stride: u64,
        required: u64,
        available: u64,
    },

    #[error("index table is empty")]
    EmptyIndices,

    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        index: u32,
        position: usize,
        vertex_count: u32,
    },
}

/// Validated mesh descriptor borrowing the external vertex/index tables.
///
/// Invariants (checked by [`Geometry::new`] / [`Geometry::with_indices`]):
/// - `stride * vertex_count <= byte_length`
/// - both attributes lie entirely within one stride
/// - every index addresses an existing vertex
#[derive(Debug, Copy, Clone)]
pub struct Geometry<'a> {
    vertices: &'a [f32],
    indices: Option<&'a [u32]>,
    layout: VertexLayout,
    vertex_count: u32,
}

impl<'a> Geometry<'a> {
    /// Describes a non-indexed mesh.
    pub fn new(
        vertices: &'a [f32],
        layout: VertexLayout,
        vertex_count: u32,
    ) -> Result<Self, GeometryError> {
        if vertex_count == 0 || vertices.is_empty() {
            return Err(GeometryError::Empty);
        }

        let stride = layout.stride;
        if stride == 0 || stride % ATTRIBUTE_ALIGNMENT != 0 {
            return Err(GeometryError::BadStride { stride });
        }

        check_attribute("position", layout.position_offset, POSITION_SIZE, stride)?;
        check_attribute("uv", layout.uv_offset, UV_SIZE, stride)?;

        let available = std::mem::size_of_val(vertices) as u64;
        let required = stride * u64::from(vertex_count);
        if required > available {
            return Err(GeometryError::TableTooSmall {
                vertex_count,
                stride,
                required,
                available,
            });
        }

        Ok(Self {
            vertices,
            indices: None,
            layout,
            vertex_count,
        })
    }

    /// Builds a descriptor from tables known to satisfy the invariants.
    ///
    /// Reserved for built-in assets; their tests run them through the checked path.
    pub(super) const fn trusted(
        vertices: &'a [f32],
        indices: Option<&'a [u32]>,
        layout: VertexLayout,
        vertex_count: u32,
    ) -> Self {
        Self {
            vertices,
            indices,
            layout,
            vertex_count,
        }
    }

    /// Attaches a 32-bit index table, turning this into an indexed mesh.
    pub fn with_indices(mut self, indices: &'a [u32]) -> Result<Self, GeometryError> {
        if indices.is_empty() {
            return Err(GeometryError::EmptyIndices);
        }

        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i >= self.vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange {
                index,
                position,
                vertex_count: self.vertex_count,
            });
        }

        self.indices = Some(indices);
        Ok(self)
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Size of the vertex table in bytes (the GPU vertex buffer size).
    #[inline]
    pub fn byte_length(&self) -> u64 {
        std::mem::size_of_val(self.vertices) as u64
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of indices, or `None` for a non-indexed mesh.
    #[inline]
    pub fn index_count(&self) -> Option<u32> {
        self.indices.map(|i| i.len() as u32)
    }

    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    pub fn index_bytes(&self) -> Option<&'a [u8]> {
        self.indices.map(bytemuck::cast_slice)
    }

    /// The single draw call that covers the whole mesh.
    pub fn draw_call(&self) -> DrawCall {
        match self.index_count() {
            Some(index_count) => DrawCall::Indexed { index_count },
            None => DrawCall::NonIndexed {
                vertex_count: self.vertex_count,
            },
        }
    }
}

fn check_attribute(
    attribute: &'static str,
    offset: u64,
    size: u64,
    stride: u64,
) -> Result<(), GeometryError> {
    if offset % ATTRIBUTE_ALIGNMENT != 0 {
        return Err(GeometryError::MisalignedAttribute { attribute, offset });
    }
    if offset + size > stride {
        return Err(GeometryError::AttributeOutOfBounds {
            attribute,
            offset,
            size,
            stride,
        });
    }
    Ok(())
}
