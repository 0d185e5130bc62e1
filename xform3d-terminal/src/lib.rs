/// Terminal viewer for spinning colored vertex meshes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use xform3d_core::{vertex, Camera, Transform3, Vector3f, Vertex3};

/// Key bindings shown in the status line
const CONTROLS_HELP: &str =
    "WASD/Arrows=Rotate E/R=Roll +/-=Scale 0=Reset Space=Pause Q=Quit";

pub mod config;
pub mod renderer;

pub use config::ViewerConfig;
pub use renderer::AsciiRenderer;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    vertices: Vec<Vertex3>,
    model: Transform3,
    camera: Camera,
    renderer: AsciiRenderer,
    config: ViewerConfig,
    running: bool,
    paused: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Create the viewer for a triangle list given in model space around the origin
    pub fn new(mut vertices: Vec<Vertex3>, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        log::info!("terminal size {width}x{height}, {} vertices", vertices.len());

        // Move the mesh to its world position once; later transforms pivot on it
        vertex::transform_vertices(&Transform3::translation(config.center), &mut vertices);

        Ok(Self {
            vertices,
            model: Transform3::IDENTITY,
            camera: Self::camera_for(&config, width, height),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            config,
            running: true,
            paused: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Colored cube centered on the configured pivot
    pub fn with_cube(config: ViewerConfig) -> io::Result<Self> {
        let faces = [
            xform3d_core::Color::RED,
            xform3d_core::Color::GREEN,
            xform3d_core::Color::BLUE,
            xform3d_core::Color::YELLOW,
            xform3d_core::Color::MAGENTA,
            xform3d_core::Color::CYAN,
        ];
        Self::new(vertex::cube(config.cube_size, faces), config)
    }

    fn camera_for(config: &ViewerConfig, width: u16, height: u16) -> Camera {
        let mut camera = Camera::new(width as u32, height as u32);
        camera.aspect *= config.cell_aspect;
        camera.placement = Transform3::translation(
            config.center + Vector3f::new(0.0, 0.0, config.camera_distance),
        );
        camera
    }

    pub fn model(&self) -> &Transform3 {
        &self.model
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(self.config.frame_millis());

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        log::info!("viewer stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => {
                log::debug!("resized to {width}x{height}");
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
                self.camera = Self::camera_for(&self.config, width, height);
                execute!(stdout(), terminal::Clear(terminal::ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply the action bound to a key
    pub fn handle_key(&mut self, code: KeyCode) {
        let step = self.config.rotate_step;
        let center = self.config.center;
        let mut change = Transform3::new();

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                return;
            }
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                log::debug!("auto spin paused: {}", self.paused);
                return;
            }
            KeyCode::Char('w') | KeyCode::Up => {
                change.rotate_x_around(-step, center);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                change.rotate_x_around(step, center);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                change.rotate_y_around(-step, center);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                change.rotate_y_around(step, center);
            }
            KeyCode::Char('e') => {
                change.rotate_z_around(step, center);
            }
            KeyCode::Char('r') => {
                change.rotate_z_around(-step, center);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                change.scale_around(Vector3f::repeat(self.config.scale_step), center);
            }
            KeyCode::Char('-') => {
                change.scale_around(Vector3f::repeat(1.0 / self.config.scale_step), center);
            }
            KeyCode::Char('0') => {
                self.model = Transform3::IDENTITY;
                return;
            }
            _ => return,
        }

        // Changes happen in world space, after the current model transform
        self.model = change * self.model;
    }

    /// Advance the automatic spin by one frame
    pub fn update(&mut self) {
        if self.paused {
            return;
        }
        let mut spin = Transform3::new();
        spin.rotate_y_around(self.config.spin_y, self.config.center)
            .rotate_x_around(self.config.spin_x, self.config.center);
        self.model = spin * self.model;
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_vertices(&self.vertices, &self.model, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!("xform3d | FPS: {:.1} | {}", self.fps, CONTROLS_HELP)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn app() -> TerminalApp {
        let config = ViewerConfig::default();
        let mut vertices = vertex::cube(config.cube_size, [xform3d_core::Color::WHITE; 6]);
        vertex::transform_vertices(&Transform3::translation(config.center), &mut vertices);
        TerminalApp {
            vertices,
            model: Transform3::IDENTITY,
            camera: TerminalApp::camera_for(&config, 80, 24),
            renderer: AsciiRenderer::new(80, 24),
            config,
            running: true,
            paused: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    #[test]
    fn test_rotation_keys_keep_center_fixed() {
        let mut app = app();
        let center = app.config.center;
        for key in [KeyCode::Up, KeyCode::Left, KeyCode::Char('e'), KeyCode::Char('+')] {
            app.handle_key(key);
        }
        app.update();
        assert_relative_eq!(app.model().transform_point(center), center, epsilon = 1e-5);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut app = app();
        let corner = app.vertices[0].position;
        app.handle_key(KeyCode::Char('w'));
        app.handle_key(KeyCode::Char('s'));
        app.handle_key(KeyCode::Char('+'));
        app.handle_key(KeyCode::Char('-'));
        assert_relative_eq!(app.model().transform_point(corner), corner, epsilon = 1e-5);
    }

    #[test]
    fn test_pause_reset_and_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        app.update();
        assert_eq!(*app.model(), Transform3::IDENTITY);

        app.handle_key(KeyCode::Char('d'));
        assert_ne!(*app.model(), Transform3::IDENTITY);
        app.handle_key(KeyCode::Char('0'));
        assert_eq!(*app.model(), Transform3::IDENTITY);

        app.handle_key(KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_camera_faces_center() {
        let app = app();
        let (x, y, depth) = app
            .camera
            .project_to_screen(app.config.center, &Transform3::IDENTITY, 80, 24)
            .unwrap();
        assert_relative_eq!(x, 40.0);
        assert_relative_eq!(y, 12.0);
        assert_relative_eq!(depth, app.config.camera_distance);
    }
}
