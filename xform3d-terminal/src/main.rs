/// xform3d Terminal Demo - Spinning Colored Cube
///
/// Demonstrates pivot rotations and scaling of a vertex buffer rendered
/// with the terminal ASCII rasterizer.
/// Controls:
///   - WASD / Arrow Keys: Rotate the cube
///   - E/R: Roll rotation
///   - +/-: Scale around the cube's center
///   - 0: Reset, Space: Pause auto spin
///   - Q/ESC: Quit
///
/// Set `RUST_LOG=debug` and redirect stderr to a file to see logs.
use anyhow::Context;
use xform3d_terminal::{TerminalApp, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::from_env();
    log::info!("starting viewer with {config:?}");

    let mut app = TerminalApp::with_cube(config).context("failed to query terminal size")?;
    app.run().context("terminal viewer failed")?;

    println!("Thank you for using the xform3d terminal viewer!");
    Ok(())
}
