//! Side-scrolling arcade game core: a player who runs, jumps, and shoots,
//! left-moving enemies, collectibles, static platforms, and a camera that
//! keeps the player centered.  Rendering goes through a `Surface`; the
//! binary draws to a terminal with crossterm.

pub mod camera;
pub mod capabilities;
pub mod clock;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod hooks;
pub mod input;
pub mod logging;

pub use error::GameError;
