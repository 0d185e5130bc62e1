/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{self, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use xform3d_core::{Camera, Color, Transform3, Vector3f, Vertex3};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lowest brightness a lit face is drawn with, so dim faces keep their color
const AMBIENT: f32 = 0.2;

/// ASCII renderer that converts triangle lists of [`Vertex3`] to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::BLACK; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::BLACK);
    }

    /// Character currently stored at a cell
    pub fn cell(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    pub fn cell_color(&self, x: usize, y: usize) -> Color {
        self.color_buffer[y * self.width + x]
    }

    /// Render a triangle list; trailing vertices that do not form a full
    /// triangle are ignored.
    pub fn render_vertices(
        &mut self,
        vertices: &[Vertex3],
        model_matrix: &Transform3,
        camera: &Camera,
    ) {
        for triangle in vertices.chunks_exact(3) {
            self.render_triangle(triangle, model_matrix, camera);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &[Vertex3],
        model_matrix: &Transform3,
        camera: &Camera,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (coords, vertex) in screen_coords.iter_mut().zip(triangle) {
            match camera.project_to_screen(
                vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *coords = projected,
                None => return, // Triangle is clipped
            }
        }

        // Face normal in world space, lit from the camera
        let world: Vec<Vector3f> = triangle
            .iter()
            .map(|v| model_matrix.transform_point(v.position))
            .collect();
        let normal = (world[1] - world[0]).cross(&(world[2] - world[0]));
        let centroid = (world[0] + world[1] + world[2]) / 3.0;
        let to_camera = camera.position() - centroid;
        let brightness = match (normal.try_normalize(1e-9), to_camera.try_normalize(1e-9)) {
            (Some(n), Some(l)) => n.dot(&l),
            _ => return,
        };
        if brightness <= 0.0 {
            return; // Facing away
        }

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let character = LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)];

        let level = ((AMBIENT + (1.0 - AMBIENT) * brightness) * 255.0) as u8;
        let shade = Color::rgb(level, level, level);
        let colors = [
            triangle[0].color * shade,
            triangle[1].color * shade,
            triangle[2].color * shade,
        ];

        self.rasterize_triangle(&screen_coords, character, colors);
    }

    fn rasterize_triangle(
        &mut self,
        coords: &[(f32, f32, f32); 3],
        character: char,
        colors: [Color; 3],
    ) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    return; // Degenerate on screen
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                    self.color_buffer[idx] = blend(colors, (w0, w1, w2));
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let Color { r, g, b, .. } = self.color_buffer[idx];
                writer.queue(SetForegroundColor(style::Color::Rgb { r, g, b }))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Interpolate vertex colors with barycentric weights
fn blend(colors: [Color; 3], (w0, w1, w2): (f32, f32, f32)) -> Color {
    let mix = |a: u8, b: u8, c: u8| {
        let value = a as f32 * w0 + b as f32 * w1 + c as f32 * w2;
        value.round().clamp(0.0, 255.0) as u8
    };
    let [c0, c1, c2] = colors;
    Color::rgba(
        mix(c0.r, c1.r, c2.r),
        mix(c0.g, c1.g, c2.g),
        mix(c0.b, c1.b, c2.b),
        mix(c0.a, c1.a, c2.a),
    )
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
