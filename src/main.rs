//! Demo binary: renders the example scene in solid and wireframe modes.

use std::time::Instant;

use rastra::prelude::*;

const WIDTH: usize = 800;
const HEIGHT: usize = 600;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("starting software renderer, {WIDTH}x{HEIGHT}");

    let mut renderer = Renderer::new(WIDTH, HEIGHT);
    let scene = Scene::demo();

    log::info!("rendering solid pass");
    let start = Instant::now();
    scene.render(&mut renderer, false);
    log::info!("solid pass took {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);
    renderer.save_image("render_solid.ppm");
    renderer.save_png("render_solid.png");

    log::info!("rendering wireframe pass");
    let start = Instant::now();
    scene.render(&mut renderer, true);
    log::info!(
        "wireframe pass took {:.1} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
    renderer.save_image("render_wireframe.ppm");

    log::info!(
        "done: {} meshes, {} lights",
        scene.mesh_count(),
        scene.light_count()
    );
}
