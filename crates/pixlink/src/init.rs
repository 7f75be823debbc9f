//! Session setup.

use crate::{Options, Result, Viewer};

/// Installs `env_logger` as the log backend.
///
/// Safe to call more than once; later calls are no-ops. Filtering follows
/// `RUST_LOG` as usual.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Installs logging and creates a viewer with `options`.
///
/// # Errors
///
/// Returns an error if the baseline camera in `options` is degenerate.
///
/// # Example
///
/// ```no_run
/// use pixlink::*;
///
/// fn main() -> Result<()> {
///     let mut viewer = init(Options::default())?;
///
///     let positions = vec![Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 5.0)];
///     let pixels = vec![UVec2::new(10, 20), UVec2::new(11, 20)];
///     viewer.load(&mut VertexTable::new(positions).with_pixels(pixels))?;
///
///     if let Some(hit) = viewer.click_pixel(10, 20) {
///         println!("point {} (exact: {})", hit.index, hit.exact);
///     }
///     Ok(())
/// }
/// ```
pub fn init(options: Options) -> Result<Viewer> {
    init_logging();
    let viewer = Viewer::new(options)?;
    log::info!("pixlink viewer initialized");
    Ok(viewer)
}
