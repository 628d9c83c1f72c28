//! Built-in unit cube in the position(float4) + uv(float2) layout.
//!
//! Faces wind counter-clockwise when seen from outside, so back-face culling
//! hides the far side.

use super::{Geometry, VertexLayout};

pub const CUBE_LAYOUT: VertexLayout = VertexLayout {
    stride: 4 * 6,
    position_offset: 0,
    uv_offset: 4 * 4,
};

pub const CUBE_VERTEX_COUNT: u32 = 24;

#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; 6 * CUBE_VERTEX_COUNT as usize] = [
    // +X
     1.0, -1.0,  1.0, 1.0,   0.0, 1.0,
     1.0, -1.0, -1.0, 1.0,   1.0, 1.0,
     1.0,  1.0, -1.0, 1.0,   1.0, 0.0,
     1.0,  1.0,  1.0, 1.0,   0.0, 0.0,
    // -X
    -1.0, -1.0, -1.0, 1.0,   0.0, 1.0,
    -1.0, -1.0,  1.0, 1.0,   1.0, 1.0,
    -1.0,  1.0,  1.0, 1.0,   1.0, 0.0,
    -1.0,  1.0, -1.0, 1.0,   0.0, 0.0,
    // +Y
    -1.0,  1.0,  1.0, 1.0,   0.0, 1.0,
     1.0,  1.0,  1.0, 1.0,   1.0, 1.0,
     1.0,  1.0, -1.0, 1.0,   1.0, 0.0,
    -1.0,  1.0, -1.0, 1.0,   0.0, 0.0,
    // -Y
    -1.0, -1.0, -1.0, 1.0,   0.0, 1.0,
     1.0, -1.0, -1.0, 1.0,   1.0, 1.0,
     1.0, -1.0,  1.0, 1.0,   1.0, 0.0,
    -1.0, -1.0,  1.0, 1.0,   0.0, 0.0,
    // +Z
    -1.0, -1.0,  1.0, 1.0,   0.0, 1.0,
     1.0, -1.0,  1.0, 1.0,   1.0, 1.0,
     1.0,  1.0,  1.0, 1.0,   1.0, 0.0,
    -1.0,  1.0,  1.0, 1.0,   0.0, 0.0,
    // -Z
     1.0, -1.0, -1.0, 1.0,   0.0, 1.0,
    -1.0, -1.0, -1.0, 1.0,   1.0, 1.0,
    -1.0,  1.0, -1.0, 1.0,   1.0, 0.0,
     1.0,  1.0, -1.0, 1.0,   0.0, 0.0,
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
     0,  1,  2,   0,  2,  3,
     4,  5,  6,   4,  6,  7,
     8,  9, 10,   8, 10, 11,
    12, 13, 14,  12, 14, 15,
    16, 17, 18,  16, 18, 19,
    20, 21, 22,  20, 22, 23,
];

pub const CUBE: Geometry<'static> = Geometry::trusted(
    &CUBE_VERTICES,
    Some(&CUBE_INDICES),
    CUBE_LAYOUT,
    CUBE_VERTEX_COUNT,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawCall;

    fn position(v: usize) -> [f32; 3] {
        let base = v * 6;
        [CUBE_VERTICES[base], CUBE_VERTICES[base + 1], CUBE_VERTICES[base + 2]]
    }

    #[test]
    fn cube_passes_checked_construction() {
        let checked = Geometry::new(&CUBE_VERTICES, CUBE_LAYOUT, CUBE_VERTEX_COUNT)
            .and_then(|g| g.with_indices(&CUBE_INDICES));
        assert!(checked.is_ok());
    }

    #[test]
    fn cube_draws_36_indices() {
        assert_eq!(CUBE.draw_call(), DrawCall::Indexed { index_count: 36 });
        assert_eq!(CUBE.byte_length(), 24 * 24);
    }

    #[test]
    fn every_triangle_faces_outward() {
        for tri in CUBE_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| position(i as usize));
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            let outward = n[0] * centroid[0] + n[1] * centroid[1] + n[2] * centroid[2];
            assert!(outward > 0.0, "triangle {tri:?} winds inward");
        }
    }
}
