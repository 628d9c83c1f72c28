use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Byte offset of the transformation matrix.
pub const MATRIX_OFFSET: u64 = 0;

/// Size of the 4x4 `f32` matrix.
pub const MATRIX_SIZE: u64 = 4 * 16;

/// Byte offset of the trailer (timestamp, pixel ratio, padding).
pub const TRAILER_OFFSET: u64 = MATRIX_OFFSET + MATRIX_SIZE;

/// Bytes written into the trailer each frame: timestamp + pixel ratio.
pub const TRAILER_WRITE_SIZE: u64 = 4 * 2;

/// Total uniform buffer size: matrix plus one 16-byte aligned trailer.
pub const UNIFORM_BUFFER_SIZE: u64 = MATRIX_SIZE + 16;

/// CPU mirror of the shader's `Uniforms` struct.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub model_view_projection: [f32; 16],
    /// `[timestamp_ms, pixel_ratio]`
    pub trailer: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

const _: () = assert!(std::mem::size_of::<Uniforms>() as u64 == UNIFORM_BUFFER_SIZE);
const _: () = assert!(std::mem::size_of::<[f32; 2]>() as u64 == TRAILER_WRITE_SIZE);

/// One `queue.write_buffer` call into the uniform buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformWrite<'a> {
    pub offset: u64,
    pub bytes: &'a [u8],
}

impl Uniforms {
    pub fn new(model_view_projection: Mat4, timestamp_ms: f64, pixel_ratio: f64) -> Self {
        Self {
            model_view_projection: model_view_projection.to_cols_array(),
            trailer: [timestamp_ms as f32, pixel_ratio as f32],
            _pad: [0.0; 2],
        }
    }

    /// The two writes issued per frame, matrix first.
    ///
    /// The padding is never written; the GPU copy keeps whatever it was created with.
    pub fn writes(&self) -> [UniformWrite<'_>; 2] {
        [
            UniformWrite {
                offset: MATRIX_OFFSET,
                bytes: bytemuck::bytes_of(&self.model_view_projection),
            },
            UniformWrite {
                offset: TRAILER_OFFSET,
                bytes: bytemuck::bytes_of(&self.trailer),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_80_bytes() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 80);
        assert_eq!(UNIFORM_BUFFER_SIZE, 80);
    }

    #[test]
    fn writes_are_64_at_zero_then_8_at_64() {
        let u = Uniforms::new(Mat4::IDENTITY, 16.0, 2.0);
        let [matrix, trailer] = u.writes();

        assert_eq!((matrix.offset, matrix.bytes.len()), (0, 64));
        assert_eq!((trailer.offset, trailer.bytes.len()), (64, 8));
        assert_eq!(matrix.bytes.len() as u64, MATRIX_SIZE);
        assert_eq!(trailer.offset, TRAILER_OFFSET);
        assert_eq!(trailer.bytes.len() as u64, TRAILER_WRITE_SIZE);
    }

    #[test]
    fn writes_stay_inside_the_buffer() {
        let u = Uniforms::new(Mat4::IDENTITY, 0.0, 1.0);
        for w in u.writes() {
            assert!(w.offset + w.bytes.len() as u64 <= UNIFORM_BUFFER_SIZE);
            assert_eq!(w.offset % 4, 0);
        }
    }

    #[test]
    fn matrix_bytes_are_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let u = Uniforms::new(m, 0.0, 1.0);
        let floats: &[f32] = bytemuck::cast_slice(u.writes()[0].bytes);
        assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn trailer_carries_timestamp_then_pixel_ratio() {
        let u = Uniforms::new(Mat4::IDENTITY, 1234.5, 1.5);
        let floats: &[f32] = bytemuck::cast_slice(u.writes()[1].bytes);
        assert_eq!(floats, &[1234.5, 1.5]);
    }
}
