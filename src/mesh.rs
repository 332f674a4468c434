use glium::{implement_vertex, index::PrimitiveType, Display, IndexBuffer, VertexBuffer};
use glutin::surface::WindowSurface;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coords: [f32; 2],
}

implement_vertex!(MeshVertex, position, color, tex_coords);

/// The built-in meshes. Both share one thin box shape and differ only in vertex colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    Table,
    Box,
}

impl MeshKind {
    pub const ALL: [MeshKind; 2] = [MeshKind::Table, MeshKind::Box];

    pub fn vertices(self) -> [MeshVertex; 8] {
        let (front, back) = match self {
            MeshKind::Table => ([1.0, 0.0, 0.0, 0.0], [1.0, 0.0, 1.0, 0.0]),
            MeshKind::Box => ([1.0; 4], [1.0; 4]),
        };
        let v = |position, color, tex_coords| MeshVertex {
            position,
            color,
            tex_coords,
        };
        [
            v([0.25, 0.25, 0.0], front, [1.0, 1.0]),
            v([0.25, -0.25, 0.0], front, [1.0, 0.0]),
            v([-0.25, -0.25, 0.0], front, [0.0, 0.0]),
            v([-0.25, 0.25, 0.0], front, [0.0, 1.0]),
            v([0.25, -0.25, -0.1], back, [1.0, 1.0]),
            v([0.25, 0.25, -0.1], back, [1.0, 0.0]),
            v([-0.25, 0.25, -0.1], back, [0.0, 0.0]),
            v([-0.25, -0.25, -0.1], back, [0.0, 1.0]),
        ]
    }
}

/// Twelve triangles over the eight box corners.
pub const BOX_INDICES: [u16; 36] = [
    0, 1, 3, //
    1, 2, 3, //
    0, 1, 4, //
    0, 4, 5, //
    0, 5, 6, //
    0, 3, 6, //
    4, 5, 6, //
    4, 6, 7, //
    2, 3, 6, //
    2, 6, 7, //
    1, 4, 7, //
    1, 2, 7, //
];

/// A mesh uploaded to the GPU, created once at startup and dropped with the renderer.
pub struct GpuMesh {
    pub vertex_buffer: VertexBuffer<MeshVertex>,
    pub index_buffer: IndexBuffer<u16>,
}

impl GpuMesh {
    pub fn upload(display: &Display<WindowSurface>, kind: MeshKind) -> Result<Self, AppError> {
        let vertex_buffer = VertexBuffer::new(display, &kind.vertices())?;
        let index_buffer = IndexBuffer::new(display, PrimitiveType::TrianglesList, &BOX_INDICES)?;
        log::debug!(
            "uploaded {kind:?} mesh: {} vertices, {} triangles",
            vertex_buffer.len(),
            BOX_INDICES.len() / 3
        );
        Ok(Self {
            vertex_buffer,
            index_buffer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_in_bounds() {
        for kind in MeshKind::ALL {
            let vertex_count = kind.vertices().len();
            assert!(BOX_INDICES.iter().all(|&i| usize::from(i) < vertex_count));
        }
        assert_eq!(BOX_INDICES.len() % 3, 0);
    }

    #[test]
    fn kinds_share_geometry() {
        let table = MeshKind::Table.vertices();
        let case = MeshKind::Box.vertices();
        for (t, c) in table.iter().zip(case.iter()) {
            assert_eq!(t.position, c.position);
            assert_eq!(t.tex_coords, c.tex_coords);
        }
        assert!(case.iter().all(|v| v.color == [1.0; 4]));
    }

    #[test]
    fn every_triangle_is_non_degenerate() {
        let vertices = MeshKind::Box.vertices();
        for tri in BOX_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| glam::Vec3::from(vertices[usize::from(i)].position));
            assert!((b - a).cross(c - a).length() > 0.0, "degenerate triangle {tri:?}");
        }
    }
}
