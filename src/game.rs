//! The fixed-rate game loop: input → simulation → camera → render → wait.

use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::Event;

use crate::camera::Camera;
use crate::compute::tick;
use crate::config::GameContext;
use crate::display::{render, Surface};
use crate::entities::{GameStatus, World};
use crate::error::GameError;
use crate::hooks::HookPipeline;
use crate::input::{InputFrame, KeyTracker};

pub struct GameLoop {
    world: World,
    camera: Camera,
    hooks: HookPipeline,
}

impl GameLoop {
    pub fn new(world: World, camera: Camera, hooks: HookPipeline) -> Self {
        let mut game = Self {
            world,
            camera,
            hooks,
        };
        game.camera.follow(&game.world.player);
        game
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Simulate one tick and point the camera at the player.
    pub fn step(&mut self, input: &InputFrame) -> GameStatus {
        self.world = self.hooks.run(&self.world, input, tick);
        if self.world.status == GameStatus::Running {
            self.camera.follow(&self.world.player);
        }
        self.world.status
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), GameError> {
        render(surface, &self.world, &self.camera)
    }

    /// Run until a quit signal arrives.  Input events are drained from
    /// `events` without blocking at the start of every tick; a quit that
    /// arrives together with the channel closing is still honoured.
    pub fn run<S: Surface>(
        &mut self,
        ctx: &mut GameContext<S>,
        events: &Receiver<Event>,
    ) -> Result<(), GameError> {
        let mut keys = KeyTracker::new(ctx.settings.tick_rate);

        loop {
            let mut input_closed = false;
            loop {
                match events.try_recv() {
                    Ok(event) => keys.handle(&event),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        input_closed = true;
                        break;
                    }
                }
            }

            if self.step(&keys.next_frame()) == GameStatus::Stopped {
                log::info!(
                    "Stopped after {:.1}s ({} late ticks)",
                    ctx.clock.elapsed().as_secs_f64(),
                    ctx.clock.overruns()
                );
                return Ok(());
            }
            if input_closed {
                return Err(GameError::InputClosed);
            }

            self.draw(&mut ctx.surface)?;
            ctx.clock.wait_for_next_tick();
        }
    }
}
