use stack_slide::core::{DebrisSnapshot, GameState};
use stack_slide::term::{AnchorY, FrameBuffer, GameView, Viewport};
use stack_slide::types::{GameAction, Phase};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

fn playing() -> GameState {
    let mut gs = GameState::new(1);
    gs.apply_action(GameAction::Tap);
    gs
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // 40x20 field plus border => 42x22
    let fb = view.render(&snap, Viewport::new(42, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(41, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(41, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_base_active_and_guide() {
    let snap = playing().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(42, 22));

    // Base block: world x 100..220 => columns 12..28, bottom row.
    assert_eq!(fb.get(1 + 12, 1 + 19).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 27, 1 + 19).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 11, 1 + 19).unwrap().ch, ' ');
    assert_eq!(fb.get(1 + 28, 1 + 19).unwrap().ch, ' ');

    // Sliding block: world x 0..120 on row 4 (y = 80).
    assert_eq!(fb.get(1, 1 + 4).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 14, 1 + 4).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 15, 1 + 4).unwrap().ch, ' ');
    assert!(fb.get(1, 1 + 4).unwrap().style.bold);

    // Guide over the top block, one row above the sliding block.
    assert_eq!(fb.get(1 + 12, 1 + 3).unwrap().ch, '─');
    assert_eq!(fb.get(1 + 11, 1 + 3).unwrap().ch, ' ');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = playing().snapshot();
    snap.score = 1234;
    snap.best = 5678;
    snap.streak = 3;

    let all = screen_text(&GameView::default().render(&snap, Viewport::new(70, 22)));
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("BEST"));
    assert!(all.contains("5678"));
    assert!(all.contains("HEIGHT"));
    assert!(all.contains("x3 PERFECT!"));
    assert!(all.contains("stack-slide"));

    // Too narrow: no panel.
    let narrow = screen_text(&GameView::default().render(&snap, Viewport::new(42, 22)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_hides_streak_when_zero() {
    let snap = playing().snapshot();
    let all = screen_text(&GameView::default().render(&snap, Viewport::new(70, 22)));
    assert!(!all.contains("PERFECT!"));
}

#[test]
fn term_view_menu_overlay() {
    let snap = GameState::new(1).snapshot();
    let all = screen_text(&GameView::default().render(&snap, Viewport::new(42, 22)));
    assert!(all.contains("STACK & SLIDE"));
    assert!(all.contains("Tap to Start"));
    assert!(!all.contains("GAME OVER"));
}

#[test]
fn term_view_game_over_overlay() {
    let mut snap = playing().snapshot();
    snap.phase = Phase::Dead;
    snap.active = None;
    snap.guide = None;
    snap.score = 420;
    snap.height = 7;
    snap.new_best = true;

    let all = screen_text(&GameView::default().render(&snap, Viewport::new(42, 22)));
    assert!(all.contains("GAME OVER"));
    assert!(all.contains("420"));
    assert!(all.contains("Height: 7"));
    assert!(all.contains("NEW BEST!"));
    assert!(all.contains("Tap to Retry"));

    snap.new_best = false;
    let all = screen_text(&GameView::default().render(&snap, Viewport::new(42, 22)));
    assert!(!all.contains("NEW BEST!"));
}

#[test]
fn term_view_paused_overlay() {
    let mut gs = playing();
    gs.apply_action(GameAction::Pause);
    let all = screen_text(&GameView::default().render(&gs.snapshot(), Viewport::new(42, 22)));
    assert!(all.contains("PAUSED"));
}

#[test]
fn term_view_draws_debris_and_skips_offscreen() {
    let mut snap = GameState::new(1).snapshot();
    snap.debris.push(DebrisSnapshot {
        x: 16.0,
        y: 300.0,
        width: 16.0,
        rotation: 45.0,
        color: 2,
    });
    snap.debris.push(DebrisSnapshot {
        x: 16.0,
        y: 450.0,
        width: 16.0,
        rotation: 0.0,
        color: 2,
    });

    let fb = GameView::default().render(&snap, Viewport::new(42, 22));
    // Row 15, columns 2..4.
    assert_eq!(fb.get(1 + 2, 1 + 15).unwrap().ch, '▒');
    assert_eq!(fb.get(1 + 3, 1 + 15).unwrap().ch, '▒');
    assert_eq!(fb.get(1 + 4, 1 + 15).unwrap().ch, ' ');
    assert!(!screen_text(&fb).contains('▓'));
}

#[test]
fn term_view_centers_field_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    let fb = GameView::default().render(&snap, Viewport::new(42, 30));
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(42, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_survives_tiny_viewports() {
    let snap = playing().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}
