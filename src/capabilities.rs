//! Capability traits attached to entity variants.
//!
//! Entities are plain data; each variant opts into the behaviour it has.
//! `Collidable` is implemented here since it only needs the box, `Updatable`
//! lives with the simulation in `compute`, and `Drawable` with the renderer
//! in `display`.

use crossterm::style::Color;

use crate::entities::{Bounds, Collectible, Enemy, Platform, Player, Projectile, Rect};

/// Anything with a bounding box that takes part in overlap tests.
pub trait Collidable {
    fn bbox(&self) -> Rect;

    fn collides_with<C: Collidable + ?Sized>(&self, other: &C) -> bool {
        self.bbox().intersects(&other.bbox())
    }
}

/// Entities that advance on their own once per tick.
pub trait Updatable {
    fn update(&mut self, bounds: &Bounds);

    /// `false` once the entity has met its removal condition.
    fn is_alive(&self) -> bool;
}

/// Entities drawn as a filled box.
pub trait Drawable: Collidable {
    fn colour(&self) -> Color;
}

macro_rules! collidable_body {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Collidable for $ty {
                fn bbox(&self) -> Rect {
                    self.body.bbox()
                }
            }
        )*
    };
}

collidable_body!(Player, Projectile, Enemy, Platform, Collectible);
