//! Startup configuration: command-line settings, entity tuning, and the
//! context bundle handed to the game loop.

use std::path::PathBuf;

use clap::Parser;

use crate::clock::FixedClock;
use crate::error::GameError;

/// Logical viewport the renderer draws into, regardless of terminal size.
pub const VIEWPORT_WIDTH: i32 = 800;
pub const VIEWPORT_HEIGHT: i32 = 600;

const MAX_TICK_RATE: u32 = 1000;

/// Side-scrolling arcade game in the terminal
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    pub tick_rate: u32,

    /// Right world bound; projectiles past it are removed
    #[arg(long, default_value_t = 2400)]
    pub level_width: i32,

    /// Number of enemies spawned at level setup
    #[arg(long, default_value_t = 10)]
    pub enemies: usize,

    /// Number of collectibles spawned at level setup
    #[arg(long, default_value_t = 10)]
    pub collectibles: usize,

    /// Seed for a reproducible level layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write log records to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            level_width: 2400,
            enemies: 10,
            collectibles: 10,
            seed: None,
            verbose: false,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.tick_rate == 0 || self.tick_rate > MAX_TICK_RATE {
            return Err(GameError::InvalidConfig(format!(
                "tick rate must be in 1..={MAX_TICK_RATE}, got {}",
                self.tick_rate
            )));
        }
        if self.level_width <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "level width must be positive, got {}",
                self.level_width
            )));
        }
        Ok(())
    }
}

/// Per-entity constants.  Units are world units per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub player_size: i32,
    pub player_speed: i32,
    /// Negative: upward.
    pub jump_speed: i32,
    pub gravity: i32,
    pub player_health: u32,
    pub player_lives: u32,
    pub projectile_size: i32,
    pub projectile_speed: i32,
    pub enemy_size: i32,
    /// Inclusive range each enemy's speed is drawn from.
    pub enemy_speed: (i32, i32),
    pub enemy_health: u32,
    pub collectible_size: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: 50,
            player_speed: 5,
            jump_speed: -15,
            gravity: 1,
            player_health: 100,
            player_lives: 3,
            projectile_size: 10,
            projectile_speed: 10,
            enemy_size: 50,
            enemy_speed: (2, 4),
            enemy_health: 50,
            collectible_size: 30,
        }
    }
}

/// Services every frame needs, built once in `main` and passed down
/// explicitly.
pub struct GameContext<S> {
    pub settings: Settings,
    pub clock: FixedClock,
    pub surface: S,
}

impl<S> GameContext<S> {
    pub fn new(settings: Settings, surface: S) -> Self {
        let clock = FixedClock::new(settings.tick_rate);
        Self {
            settings,
            clock,
            surface,
        }
    }
}
