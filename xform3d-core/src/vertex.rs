/// Vertices with color and texture coordinates
use crate::color::Color;
use crate::transform::Transform3;
use crate::{Vector2f, Vector3f};

/// A point in 3D space with a color and texture coordinates.
///
/// The layout is `#[repr(C)]` with no padding so slices of vertices can be
/// handed to a rendering API as raw bytes (see [`as_bytes`]).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3 {
    pub position: Vector3f,
    pub color: Color,
    /// Coordinates of the texture's pixel to map to the vertex
    pub tex_coords: Vector2f,
}

impl Vertex3 {
    /// White vertex with texture coordinates (0, 0)
    pub fn new(position: Vector3f) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_color(position: Vector3f, color: Color) -> Self {
        Self {
            position,
            color,
            ..Self::default()
        }
    }

    /// White vertex with the given texture coordinates
    pub fn with_tex_coords(position: Vector3f, tex_coords: Vector2f) -> Self {
        Self {
            position,
            tex_coords,
            ..Self::default()
        }
    }

    pub fn with_color_and_tex_coords(
        position: Vector3f,
        color: Color,
        tex_coords: Vector2f,
    ) -> Self {
        Self {
            position,
            color,
            tex_coords,
        }
    }

    /// Copy of the vertex with its position moved by `transform`
    pub fn transformed(&self, transform: &Transform3) -> Self {
        Self {
            position: transform.transform_point(self.position),
            ..*self
        }
    }
}

impl Default for Vertex3 {
    fn default() -> Self {
        Self {
            position: Vector3f::zeros(),
            color: Color::WHITE,
            tex_coords: Vector2f::zeros(),
        }
    }
}

/// Transform the positions of a vertex buffer in place
pub fn transform_vertices(transform: &Transform3, vertices: &mut [Vertex3]) {
    for vertex in vertices {
        vertex.position = transform.transform_point(vertex.position);
    }
}

/// View a vertex buffer as raw bytes
pub fn as_bytes(vertices: &[Vertex3]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Build a cube centered at the origin as a triangle list (36 vertices).
///
/// Faces are emitted in the order front (+Z), back (-Z), top (+Y),
/// bottom (-Y), right (+X), left (-X), each taking its color from
/// `face_colors`. Triangles wind counter-clockwise seen from outside.
pub fn cube(size: f32, face_colors: [Color; 6]) -> Vec<Vertex3> {
    let h = size / 2.0;
    // Corners of each face, counter-clockwise from outside
    let faces: [[[f32; 3]; 4]; 6] = [
        [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
        [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
        [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
        [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
        [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
        [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
    ];
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut vertices = Vec::with_capacity(36);
    for (corners, color) in faces.iter().zip(face_colors) {
        for i in [0, 1, 2, 0, 2, 3] {
            let [x, y, z] = corners[i];
            let [u, v] = uvs[i];
            vertices.push(Vertex3::with_color_and_tex_coords(
                Vector3f::new(x, y, z),
                color,
                Vector2f::new(u, v),
            ));
        }
    }
    vertices
}
