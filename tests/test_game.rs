use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;

use side_scroller::camera::Camera;
use side_scroller::compute::empty_world;
use side_scroller::config::{GameContext, Settings, Tuning, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use side_scroller::display::{render, Surface};
use side_scroller::entities::*;
use side_scroller::game::GameLoop;
use side_scroller::hooks::HookPipeline;
use side_scroller::input::InputFrame;
use side_scroller::GameError;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Rect(Rect, Color),
    Text(i32, i32, String),
    Present,
}

#[derive(Default)]
struct Recording {
    calls: Vec<Call>,
}

impl Surface for Recording {
    fn viewport(&self) -> (i32, i32) {
        (VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    fn clear(&mut self) -> Result<(), GameError> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, colour: Color) -> Result<(), GameError> {
        self.calls.push(Call::Rect(rect, colour));
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, _colour: Color) -> Result<(), GameError> {
        self.calls.push(Call::Text(x, y, text.to_string()));
        Ok(())
    }

    fn present(&mut self) -> Result<(), GameError> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

fn populated_world() -> World {
    let tuning = Tuning::default();
    let mut world = empty_world(2400, tuning);
    world.platforms.push(Platform::new(0, 550, 20_000, 50));
    world
        .collectibles
        .push(Collectible::new(600, 500, CollectibleKind::Life, &tuning));
    world.enemies.push(Enemy::new(1000, 100, 3, &tuning));
    world.projectiles.push(world.player.shoot(&tuning));
    world.player.score = 42;
    world
}

fn new_game(world: World) -> GameLoop {
    GameLoop::new(
        world,
        Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        HookPipeline::standard(),
    )
}

fn press(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn render_draws_back_to_front() {
    let world = populated_world();
    let mut camera = Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    camera.follow(&world.player);

    let mut surface = Recording::default();
    render(&mut surface, &world, &camera).unwrap();

    let calls = &surface.calls;
    assert_eq!(calls.first(), Some(&Call::Clear));
    assert_eq!(calls.last(), Some(&Call::Present));

    let rects: Vec<Rect> = calls
        .iter()
        .filter_map(|c| match c {
            Call::Rect(r, _) => Some(*r),
            _ => None,
        })
        .collect();
    let expected: Vec<Rect> = vec![
        camera.apply(&world.platforms[0]),
        camera.apply(&world.collectibles[0]),
        camera.apply(&world.enemies[0]),
        camera.apply(&world.projectiles[0]),
        camera.apply(&world.player),
    ];
    assert_eq!(rects, expected);

    // HUD comes after every sprite
    let first_text = calls
        .iter()
        .position(|c| matches!(c, Call::Text(..)))
        .unwrap();
    let last_rect = calls
        .iter()
        .rposition(|c| matches!(c, Call::Rect(..)))
        .unwrap();
    assert!(first_text > last_rect);
    assert_eq!(calls[first_text], Call::Text(20, 20, "Score: 42".to_string()));
}

#[test]
fn player_is_drawn_at_viewport_center() {
    let world = populated_world();
    let mut camera = Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    camera.follow(&world.player);
    assert_eq!(
        camera.apply(&world.player).center(),
        (VIEWPORT_WIDTH / 2, VIEWPORT_HEIGHT / 2)
    );
}

// ── Loop ──────────────────────────────────────────────────────────────────────

#[test]
fn step_keeps_camera_on_player() {
    let mut game = new_game(populated_world());
    for _ in 0..30 {
        let status = game.step(&InputFrame {
            right: true,
            ..InputFrame::default()
        });
        assert_eq!(status, GameStatus::Running);
        let on_screen = game.camera().apply(&game.world().player);
        assert_eq!(on_screen.center(), (VIEWPORT_WIDTH / 2, VIEWPORT_HEIGHT / 2));
    }
}

#[test]
fn step_returns_stopped_on_quit() {
    let mut game = new_game(populated_world());
    let status = game.step(&InputFrame {
        quit: true,
        ..InputFrame::default()
    });
    assert_eq!(status, GameStatus::Stopped);
    assert_eq!(game.world().status, GameStatus::Stopped);
}

fn fast_context() -> GameContext<Recording> {
    let settings = Settings {
        tick_rate: 1000,
        ..Settings::default()
    };
    GameContext::new(settings, Recording::default())
}

#[test]
fn run_shoots_then_quits_without_rendering_the_quit_tick() {
    let (tx, rx) = mpsc::channel();
    tx.send(press('f')).unwrap();
    tx.send(Event::FocusLost).unwrap();

    // No stray projectile, and a level wide enough that the shot cannot fly
    // out however long the quit takes to arrive.
    let mut world = populated_world();
    world.projectiles.clear();
    world.level_width = i32::MAX / 2;

    let mut ctx = fast_context();
    let mut game = new_game(world);

    // The first tick consumes the shot; quit arrives some ticks later.
    let handle = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(20));
        tx.send(press('q')).unwrap();
        tx
    });

    game.run(&mut ctx, &rx).unwrap();
    let _tx = handle.join().unwrap();

    assert_eq!(game.world().status, GameStatus::Stopped);
    assert_eq!(game.world().projectiles.len(), 1);
    assert!(game.world().tick >= 1);

    let frames = ctx
        .surface
        .calls
        .iter()
        .filter(|c| **c == Call::Present)
        .count() as u64;
    assert_eq!(frames, game.world().tick);
    assert_eq!(ctx.clock.ticks(), frames);
}

#[test]
fn run_honours_quit_even_if_input_closes() {
    let (tx, rx) = mpsc::channel();
    tx.send(press('q')).unwrap();
    drop(tx);

    let mut ctx = fast_context();
    let mut game = new_game(populated_world());
    game.run(&mut ctx, &rx).unwrap();
    assert!(ctx.surface.calls.is_empty());
}

#[test]
fn run_fails_when_input_closes() {
    let (tx, rx) = mpsc::channel::<Event>();
    drop(tx);

    let mut ctx = fast_context();
    let mut game = new_game(populated_world());
    let err = game.run(&mut ctx, &rx).unwrap_err();
    assert!(matches!(err, GameError::InputClosed));
}
