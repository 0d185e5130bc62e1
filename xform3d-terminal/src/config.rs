/// Viewer settings
use std::env;
use std::str::FromStr;
use xform3d_core::{Angle, Vector3f};

/// Environment variable overriding [`ViewerConfig::target_fps`]
pub const FPS_VAR: &str = "XFORM3D_FPS";
/// Environment variable scaling the automatic spin rates
pub const SPIN_VAR: &str = "XFORM3D_SPIN";

/// Settings for the terminal viewer
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub target_fps: u32,
    /// Automatic rotation applied every frame around the X axis
    pub spin_x: Angle,
    /// Automatic rotation applied every frame around the Y axis
    pub spin_y: Angle,
    /// Rotation applied per key press
    pub rotate_step: Angle,
    /// Scale factor applied per `+` press (its reciprocal for `-`)
    pub scale_step: f32,
    pub cube_size: f32,
    /// World position of the cube's center, which is also the pivot for
    /// every rotation and scaling
    pub center: Vector3f,
    pub camera_distance: f32,
    /// Width of a terminal cell divided by its height
    pub cell_aspect: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            spin_x: Angle::from_radians(0.01),
            spin_y: Angle::from_radians(0.015),
            rotate_step: Angle::from_radians(0.1),
            scale_step: 1.1,
            cube_size: 2.0,
            center: Vector3f::new(0.0, 0.0, -2.0),
            camera_distance: 7.0,
            cell_aspect: 0.5,
        }
    }
}

impl ViewerConfig {
    /// Defaults overridden by `XFORM3D_FPS` and `XFORM3D_SPIN` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(fps) = parse_var::<u32>(FPS_VAR).filter(|fps| *fps > 0) {
            config.target_fps = fps;
        }
        if let Some(spin) = parse_var::<f32>(SPIN_VAR) {
            config.spin_x = config.spin_x * spin;
            config.spin_y = config.spin_y * spin;
        }
        config
    }

    pub fn frame_millis(&self) -> u64 {
        1000 / u64::from(self.target_fps.max(1))
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("ignoring {name}={value:?}: not a valid value");
            None
        }
    }
}
