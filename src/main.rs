//! Beamcast demo entry point
//!
//! Builds (or loads) a small mirror puzzle, runs one propagation pass, and
//! logs the resulting polyline. Pass a scene JSON path as the first
//! argument to trace a custom layout.

use glam::Vec2;

use beamcast::{
    BeamSource, ColliderScene, PathRenderer, RecordingRenderer, ReflectorKind, Shape, Surface,
    TickInput, tick,
};

fn demo_scene() -> ColliderScene {
    let mut scene = ColliderScene::new();
    // A corridor of mirrors ending in darkness
    scene.add(
        Shape::Segment {
            a: Vec2::new(20.0, -15.0),
            b: Vec2::new(20.0, 15.0),
        },
        Surface::Reflective(ReflectorKind::Mirror),
    );
    scene.add(
        Shape::Segment {
            a: Vec2::new(-20.0, -15.0),
            b: Vec2::new(-20.0, 15.0),
        },
        Surface::Reflective(ReflectorKind::Mirror),
    );
    scene.add(
        Shape::Circle {
            center: Vec2::new(0.0, 10.0),
            radius: 3.0,
        },
        Surface::Terminator,
    );
    scene
}

fn load_scene(path: &str) -> ColliderScene {
    match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(scene) => {
                log::info!("Loaded scene from {}", path);
                scene
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}, using demo scene", path, e);
                demo_scene()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {}: {}, using demo scene", path, e);
            demo_scene()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Beamcast starting...");

    let scene = match std::env::args().nth(1) {
        Some(path) => load_scene(&path),
        None => demo_scene(),
    };

    let mut source = BeamSource::new(Vec2::new(0.0, -10.0));
    let input = TickInput {
        aim: Some(Vec2::new(10.0, -5.0)),
    };

    let mut renderer = RecordingRenderer::new();
    match tick(&mut source, &input, &scene) {
        Ok(path) => {
            log::info!(
                "Traced {} segments ({:.1} units), ended: {:?}",
                path.len(),
                path.total_length(),
                path.termination
            );
            for (i, seg) in path.segments.iter().enumerate() {
                log::info!(
                    "  [{}] ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                    i,
                    seg.start.x,
                    seg.start.y,
                    seg.end.x,
                    seg.end.y
                );
            }
            renderer.submit(&path);
        }
        Err(e) => log::error!("Propagation pass aborted: {}", e),
    }
}
