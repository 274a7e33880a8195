//! All game entity types — pure data, no logic.
//!
//! Behaviour lives in `compute` (simulation) and `display` (drawing); the
//! capability traits those modules implement are in `capabilities`.

use crate::config::Tuning;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in integer world units.  `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Position and size shared by every entity kind.  The bounding box is
/// derived on demand, so it can never go stale after a position change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Entity {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build an entity of the given size whose box is centered on `(cx, cy)`.
    pub fn centered_at(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::new(cx - width / 2, cy - height / 2, width, height)
    }

    pub fn bbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Horizontal extents beyond which moving entities are removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Entity,
    /// Vertical velocity; negative is upward.
    pub velocity_y: i32,
    pub speed: i32,
    pub jump_speed: i32,
    pub gravity: i32,
    /// Always within `0..=100`.  Nothing in the current rules changes it.
    pub health: u32,
    pub lives: u32,
    pub score: u32,
    pub on_ground: bool,
}

// ── Moving hazards & projectiles ──────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Entity,
    /// Rightward displacement per tick.
    pub speed: i32,
    pub alive: bool,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Entity,
    /// Leftward displacement per tick, fixed at spawn.
    pub speed: i32,
    pub health: u32,
    pub alive: bool,
}

// ── Static scenery & pickups ──────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Platform {
    pub body: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Worth a small score bump.  Does not restore health.
    Health,
    /// Worth a larger score bump.  Does not grant a life.
    Life,
}

#[derive(Clone, Debug)]
pub struct Collectible {
    pub body: Entity,
    pub kind: CollectibleKind,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: reached only through a quit signal.
    Stopped,
}

/// Everything the simulation owns.  Cloneable so `compute::tick` can return
/// a fresh copy without mutating its input.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub status: GameStatus,
    /// Number of ticks simulated so far.
    pub tick: u64,
    /// Right world bound; the left bound is always 0.
    pub level_width: i32,
    pub tuning: Tuning,
}

impl World {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: 0,
            right: self.level_width,
        }
    }
}
