use criterion::{black_box, criterion_group, criterion_main, Criterion};
use battlezone::core::{Camera, Game, GameConfig, SimpleRng};
use battlezone::term::{FrameBuffer, GameView, Viewport};
use battlezone::types::{GroundPos, HeldKeys, InputEvent, Key, Point3D};

const DT: f64 = 1.0 / 60.0;

fn playing_game() -> Game {
    let mut game = Game::new(GameConfig::default(), SimpleRng::new(12345));
    game.step(&[InputEvent::KeyDown(Key::Start)], HeldKeys::NONE, DT);
    // Let a few enemies arrive.
    for _ in 0..1200 {
        game.step(&[], HeldKeys::NONE, DT);
    }
    game
}

fn bench_step(c: &mut Criterion) {
    let mut game = playing_game();
    let held = HeldKeys {
        rotate_left: true,
        ..HeldKeys::NONE
    };

    c.bench_function("game_step_60hz", |b| {
        b.iter(|| {
            black_box(game.step(&[], black_box(held), DT).is_some());
        })
    });
}

fn bench_rasterize(c: &mut Criterion) {
    let mut game = playing_game();
    let mut view = GameView::new();
    let mut fb = FrameBuffer::new(160, 48);
    let vp = Viewport::new(160, 48);

    c.bench_function("rasterize_frame_160x48", |b| {
        b.iter(|| {
            if let Some(frame) = game.step(&[], HeldKeys::NONE, DT) {
                view.render_into(frame, vp, &mut fb);
            }
            black_box(fb.cells().len());
        })
    });
}

fn bench_projection(c: &mut Criterion) {
    let cam = Camera {
        pos: GroundPos::new(35.0, -20.0),
        yaw: 0.4,
    };

    c.bench_function("project_grid_points", |b| {
        b.iter(|| {
            let mut visible = 0;
            for z in (0..1000).step_by(100) {
                for x in (-500..=500).step_by(100) {
                    let p = Point3D::new(f64::from(x), 0.0, f64::from(z));
                    if cam.project(black_box(p)).is_some() {
                        visible += 1;
                    }
                }
            }
            black_box(visible)
        })
    });
}

criterion_group!(benches, bench_step, bench_rasterize, bench_projection);
criterion_main!(benches);
