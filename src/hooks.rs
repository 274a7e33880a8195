//! Pre/post hooks composed around the per-tick step.
//!
//! A `HookPipeline` runs every hook's `before` in registration order, then
//! the step itself, then every hook's `after` in reverse order, so the first
//! hook registered wraps all the others.

use crate::entities::{GameStatus, World};
use crate::input::InputFrame;

pub trait TickHook {
    fn before(&mut self, _state: &World, _input: &InputFrame) {}

    fn after(&mut self, _before: &World, _after: &World) {}
}

#[derive(Default)]
pub struct HookPipeline {
    hooks: Vec<Box<dyn TickHook>>,
}

impl HookPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hooks the game runs with: quit, score and entity-count logging.
    pub fn standard() -> Self {
        Self::new().with(QuitLog).with(ScoreLog).with(Census)
    }

    pub fn with(mut self, hook: impl TickHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn run<F>(&mut self, state: &World, input: &InputFrame, step: F) -> World
    where
        F: FnOnce(&World, &InputFrame) -> World,
    {
        for hook in self.hooks.iter_mut() {
            hook.before(state, input);
        }
        let next = step(state, input);
        for hook in self.hooks.iter_mut().rev() {
            hook.after(state, &next);
        }
        next
    }
}

/// Logs score changes.
pub struct ScoreLog;

impl TickHook for ScoreLog {
    fn after(&mut self, before: &World, after: &World) {
        let (old, new) = (before.player.score, after.player.score);
        if new != old {
            log::debug!("Score {old} -> {new} (+{})", new.saturating_sub(old));
        }
    }
}

/// Logs the transition into `Stopped`.
pub struct QuitLog;

impl TickHook for QuitLog {
    fn after(&mut self, before: &World, after: &World) {
        if before.status == GameStatus::Running && after.status == GameStatus::Stopped {
            log::info!(
                "Quit after {} ticks with score {}",
                after.tick,
                after.player.score
            );
        }
    }
}

/// Per-tick entity counts, at trace level.
pub struct Census;

impl TickHook for Census {
    fn after(&mut self, _before: &World, after: &World) {
        log::trace!(
            "tick={} player=({}, {}) on_ground={} projectiles={} enemies={} collectibles={}",
            after.tick,
            after.player.body.x,
            after.player.body.y,
            after.player.on_ground,
            after.projectiles.len(),
            after.enemies.len(),
            after.collectibles.len()
        );
    }
}
