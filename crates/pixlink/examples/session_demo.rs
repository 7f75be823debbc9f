//! Scripted viewing session without a window.
//!
//! Builds a synthetic 64x48 "depth image" cloud, clicks a few pixels, moves
//! the camera, and prints where the distance label would be drawn.
//!
//! Run with: `RUST_LOG=debug cargo run --example session_demo [options.json]`

use pixlink::*;

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;

fn synthetic_cloud() -> VertexTable {
    let mut positions = Vec::new();
    let mut colors = Vec::new();
    let mut pixels = Vec::new();
    // Every other pixel gets a point so that some clicks fall back to nearest.
    for v in (0..HEIGHT).step_by(2) {
        for u in (0..WIDTH).step_by(2) {
            let x = (u as f32 - WIDTH as f32 / 2.0) * 0.1;
            let y = (v as f32 - HEIGHT as f32 / 2.0) * 0.1;
            let z = 5.0 + 0.5 * (x * 0.5).sin() * (y * 0.5).cos();
            positions.push(Vec3::new(x, y, z));
            colors.push([(u * 4) as u8, (v * 5) as u8, 128]);
            pixels.push(UVec2::new(u, v));
        }
    }
    VertexTable::new(positions)
        .with_colors(colors)
        .with_pixels(pixels)
}

fn print_frame(viewer: &Viewer) {
    println!("{}", viewer.camera_info().title());
    match viewer.frame().annotation {
        Some(annotation) => println!(
            "  label '{}' at ({:.1}, {:.1})",
            annotation.text, annotation.position.x, annotation.position.y
        ),
        None => println!("  label off screen"),
    }
}

fn main() -> Result<()> {
    let options = match std::env::args().nth(1) {
        Some(path) => Options::from_json(&std::fs::read_to_string(path)?)?,
        None => Options {
            baseline: CameraState::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Y)?,
            ..Options::default()
        },
    };

    let mut viewer = init(options)?;
    viewer.resize(1280, 720);

    let summary = viewer.load(&mut synthetic_cloud())?;
    println!(
        "loaded {} points (generation {})",
        summary.point_count, summary.generation
    );

    // The image is shown at 320x240 inside a 400x240 panel.
    let Some(fit) = ImageFit::new(WIDTH, HEIGHT, 400, 240) else {
        eprintln!("image or panel has no pixels; nothing to click");
        return Ok(());
    };
    for (x, y) in [(45, 10), (211, 123), (20, 20)] {
        let Some(pixel) = fit.widget_to_image(x, y) else {
            println!("click ({x}, {y}) is outside the image");
            continue;
        };
        viewer.handle(ViewerEvent::ImageClick {
            u: pixel.x,
            v: pixel.y,
        })?;
        if let Some(hit) = viewer.last_match() {
            println!(
                "pixel ({}, {}) -> point {} (exact: {})",
                pixel.x, pixel.y, hit.index, hit.exact
            );
        }
        if let Some(label) = viewer.distance_label() {
            println!("  {label}");
        }
    }
    print_frame(&viewer);

    let script = [
        ViewerEvent::Drag {
            button: MouseButton::Left,
            dx: 30.0,
            dy: -10.0,
        },
        ViewerEvent::Wheel { steps: 1.0 },
        ViewerEvent::Preset(ViewPreset::Top),
        ViewerEvent::RotateStep {
            axis: RotationAxis::Roll,
            reverse: false,
        },
    ];
    for event in script {
        viewer.handle(event)?;
        print_frame(&viewer);
    }

    viewer.handle(ViewerEvent::Reset)?;
    println!("after reset:\n{}", viewer.camera_info());
    Ok(())
}
