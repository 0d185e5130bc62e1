/// Camera and projection utilities
use crate::angle::Angle;
use crate::transform::Transform3;
use crate::Vector3f;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering.
///
/// `placement` positions the camera in world space. An unrotated camera
/// looks down the negative Z axis with Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub placement: Transform3,
    pub fov: Angle,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            placement: Transform3::translation(Vector3f::new(0.0, 0.0, 5.0)),
            fov: Angle::from_degrees(45.0),
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn position(&self) -> Vector3f {
        self.placement.transform_point(Vector3f::zeros())
    }

    /// Create the view matrix (world to camera space)
    pub fn view_matrix(&self) -> Transform3 {
        self.placement.inverse()
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with `x`, `y` in pixels from the top-left
    /// corner, or `None` if the point is outside the view volume.
    pub fn project_to_screen(
        &self,
        point: Vector3f,
        model_matrix: &Transform3,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let model_view = self.view_matrix() * *model_matrix;
        let eye = model_view.transform_point(point);

        // Camera looks down -Z
        let depth = -eye.z;
        if depth < self.near || depth > self.far {
            return None;
        }

        let half_height = match self.mode {
            ProjectionMode::Perspective => (self.fov.as_radians() / 2.0).tan() * depth,
            ProjectionMode::Orthographic => {
                (self.fov.as_radians() / 2.0).tan() * self.position().norm()
            }
        };
        if half_height <= 0.0 {
            return None;
        }

        let ndc_x = eye.x / (half_height * self.aspect);
        let ndc_y = eye.y / half_height;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.position(), Vector3f::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        assert_eq!(view.transform_point(camera.position()), Vector3f::zeros());
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(800, 600);
        let (x, y, depth) = camera
            .project_to_screen(Vector3f::zeros(), &Transform3::IDENTITY, 800, 600)
            .unwrap();
        assert_relative_eq!(x, 400.0);
        assert_relative_eq!(y, 300.0);
        assert_relative_eq!(depth, 5.0);
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let camera = Camera::default();
        let (_, y, _) = camera
            .project_to_screen(Vector3f::new(0.0, 0.5, 0.0), &Transform3::IDENTITY, 800, 600)
            .unwrap();
        assert!(y < 300.0);
    }

    #[test]
    fn test_points_behind_camera_are_clipped() {
        let camera = Camera::default();
        let behind = Vector3f::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(behind, &Transform3::IDENTITY, 800, 600)
            .is_none());
        let off_screen = Vector3f::new(100.0, 0.0, 0.0);
        assert!(camera
            .project_to_screen(off_screen, &Transform3::IDENTITY, 800, 600)
            .is_none());
    }

    #[test]
    fn test_model_matrix_is_applied() {
        let camera = Camera::default();
        let model = Transform3::translation(Vector3f::new(0.0, 0.0, -5.0));
        let (_, _, depth) = camera
            .project_to_screen(Vector3f::zeros(), &model, 800, 600)
            .unwrap();
        assert_relative_eq!(depth, 10.0);
    }

    #[test]
    fn test_orthographic_ignores_depth() {
        let mut camera = Camera::default();
        camera.mode = ProjectionMode::Orthographic;
        let near = camera
            .project_to_screen(Vector3f::new(0.5, 0.0, 1.0), &Transform3::IDENTITY, 800, 600)
            .unwrap();
        let far = camera
            .project_to_screen(Vector3f::new(0.5, 0.0, -1.0), &Transform3::IDENTITY, 800, 600)
            .unwrap();
        assert_relative_eq!(near.0, far.0);
    }
}
