use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stack_slide::core::{resolve_drop, Debris, DebrisField, GameSnapshot, GameState, Span, Variant};
use stack_slide::term::{FrameBuffer, GameView, Viewport};
use stack_slide::types::{GameAction, Phase, FRAME_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_10ms", |b| {
        b.iter(|| {
            state.tick(black_box(FRAME_MS));
        })
    });
}

fn bench_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("drop_block", |b| {
        b.iter(|| {
            state.tick(FRAME_MS * 3);
            if state.phase() != Phase::Playing || state.stack().len() > 40 {
                state.apply_action(GameAction::Restart);
            }
            black_box(state.drop_block());
            let _ = state.take_cues();
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let rules = Variant::StackSlide.ruleset();
    let top = Span::new(100.0, 120.0);

    c.bench_function("resolve_drop", |b| {
        b.iter(|| resolve_drop(black_box(Span::new(137.5, 120.0)), black_box(top), &rules))
    });
}

fn bench_debris_step(c: &mut Criterion) {
    c.bench_function("debris_step_full", |b| {
        b.iter(|| {
            let mut field = DebrisField::new();
            for i in 0..32 {
                field.spawn(Debris::new(i as f32 * 10.0, 80.0, 10.0, (i % 10) as u8));
            }
            while !field.is_empty() {
                field.step();
            }
        })
    });
}

fn bench_snapshot_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    state.tick(300);
    state.drop_block();

    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_drop,
    bench_resolve,
    bench_debris_step,
    bench_snapshot_render
);
criterion_main!(benches);
