//! Isoline demo - drives an animated scene headlessly.
//!
//! Simulates a few seconds of the interactive visualizer: the grid is
//! refined and the number of isolines grows over time, the window is resized
//! once, and per-frame buffer sizes are logged.
//!
//! Run with: `RUST_LOG=info cargo run --example isoline_demo [options.json]`

use isofield::*;

const FRAMES: u32 = 300;
const DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    init_logging();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let mut scene = Scene::new(options, 800, 600)?;

    for i in 0..FRAMES {
        if i % 30 == 0 {
            scene.increase_isolines();
        }
        if i == 120 {
            scene.refine_grid()?;
        }
        if i == 200 {
            scene.resize(1024, 768)?;
        }

        scene.advance(DT);
        let frame = scene.frame();

        if frame.grid_changed {
            log::info!(
                "frame {i}: grid upload, {} nodes, {} triangle indices",
                scene.layout().positions().len(),
                scene.layout().triangle_indices().len()
            );
        }
        let vertices = frame.isolines.vertex_data();
        log::debug!(
            "frame {i}: t={:.2}s, {} levels, {} isoline vertices, {} segments",
            scene.time(),
            scene.levels().len(),
            vertices.len(),
            frame.isolines.num_segments()
        );
    }

    log::info!("rendered {FRAMES} frames");
    Ok(())
}
