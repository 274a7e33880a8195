//! Game-logic functions.
//!
//! `tick` takes an immutable reference to the current `World` plus the
//! tick's input and returns a brand-new `World`.  Level setup is the only
//! place randomness enters, through an injected RNG.

use rand::Rng;

use crate::capabilities::{Collidable, Updatable};
use crate::config::{Settings, Tuning, VIEWPORT_HEIGHT};
use crate::entities::{
    Bounds, Collectible, CollectibleKind, Enemy, Entity, GameStatus, Platform, Player, Projectile,
    World,
};
use crate::input::InputFrame;

// ── Level layout ──────────────────────────────────────────────────────────────

const PLAYER_START_X: i32 = 100;
const GROUND_WIDTH: i32 = 20_000;
const GROUND_HEIGHT: i32 = 50;
const ENEMY_SPAWN_X: (i32, i32) = (900, 1500);
const COLLECTIBLE_SPAWN_X: (i32, i32) = (500, 1500);

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Score awarded per enemy destroyed by a projectile.
pub const ENEMY_KILL_SCORE: u32 = 10;

/// Score awarded for picking up a collectible.
pub fn score_for(kind: CollectibleKind) -> u32 {
    match kind {
        CollectibleKind::Health => 5,
        CollectibleKind::Life => 20,
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

impl Player {
    pub fn new(x: i32, y: i32, tuning: &Tuning) -> Self {
        Self {
            body: Entity::new(x, y, tuning.player_size, tuning.player_size),
            velocity_y: 0,
            speed: tuning.player_speed,
            jump_speed: tuning.jump_speed,
            gravity: tuning.gravity,
            health: tuning.player_health,
            lives: tuning.player_lives,
            score: 0,
            on_ground: false,
        }
    }
}

impl Platform {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            body: Entity::new(x, y, width, height),
        }
    }
}

impl Enemy {
    pub fn new(x: i32, y: i32, speed: i32, tuning: &Tuning) -> Self {
        Self {
            body: Entity::new(x, y, tuning.enemy_size, tuning.enemy_size),
            speed,
            health: tuning.enemy_health,
            alive: true,
        }
    }
}

impl Collectible {
    pub fn new(x: i32, y: i32, kind: CollectibleKind, tuning: &Tuning) -> Self {
        Self {
            body: Entity::new(x, y, tuning.collectible_size, tuning.collectible_size),
            kind,
        }
    }
}

/// A world with no enemies, collectibles or platforms besides the ones the
/// caller adds.  The player starts where a fresh level would put them.
pub fn empty_world(level_width: i32, tuning: Tuning) -> World {
    World {
        player: Player::new(PLAYER_START_X, VIEWPORT_HEIGHT - 150, &tuning),
        platforms: Vec::new(),
        projectiles: Vec::new(),
        enemies: Vec::new(),
        collectibles: Vec::new(),
        status: GameStatus::Running,
        tick: 0,
        level_width,
        tuning,
    }
}

/// Build the starting level: one long ground platform plus a fixed number
/// of enemies and collectibles scattered ahead of the player.
pub fn init_world(settings: &Settings, tuning: Tuning, rng: &mut impl Rng) -> World {
    let mut world = empty_world(settings.level_width, tuning);
    let ground_y = VIEWPORT_HEIGHT - GROUND_HEIGHT;
    let spawn_y = VIEWPORT_HEIGHT - 100;

    world
        .platforms
        .push(Platform::new(0, ground_y, GROUND_WIDTH, GROUND_HEIGHT));

    let (slowest, fastest) = tuning.enemy_speed;
    world.enemies = (0..settings.enemies)
        .map(|_| {
            let x = rng.gen_range(ENEMY_SPAWN_X.0..=ENEMY_SPAWN_X.1);
            let speed = rng.gen_range(slowest..=fastest);
            Enemy::new(x, spawn_y, speed, &tuning)
        })
        .collect();

    world.collectibles = (0..settings.collectibles)
        .map(|_| {
            let x = rng.gen_range(COLLECTIBLE_SPAWN_X.0..=COLLECTIBLE_SPAWN_X.1);
            let kind = if rng.gen_bool(0.5) {
                CollectibleKind::Health
            } else {
                CollectibleKind::Life
            };
            Collectible::new(x, spawn_y, kind, &tuning)
        })
        .collect();

    log::debug!(
        "Level ready: {} platform(s), {} enemies, {} collectibles",
        world.platforms.len(),
        world.enemies.len(),
        world.collectibles.len()
    );
    world
}

// ── Player ────────────────────────────────────────────────────────────────────

impl Player {
    /// Run, jump, fall, and land for one tick.
    ///
    /// A jump is only honoured on the ground; it sets the velocity before
    /// gravity is integrated, so the jump tick moves by `jump_speed + gravity`.
    /// The first platform the player overlaps after moving catches them.
    pub fn update(&mut self, platforms: &[Platform], input: &InputFrame) {
        if input.left {
            self.body.x -= self.speed;
        }
        if input.right {
            self.body.x += self.speed;
        }

        if input.jump && self.on_ground {
            self.velocity_y = self.jump_speed;
        }

        self.velocity_y += self.gravity;
        self.body.y += self.velocity_y;

        self.on_ground = false;
        if let Some(platform) = platforms.iter().find(|p| self.collides_with(*p)) {
            self.on_ground = true;
            self.velocity_y = 0;
            self.body.y = platform.bbox().top() - self.body.height;
        }
    }

    /// Spawn a projectile at the center of the player's box.
    pub fn shoot(&self, tuning: &Tuning) -> Projectile {
        let (cx, cy) = self.bbox().center();
        Projectile {
            body: Entity::centered_at(cx, cy, tuning.projectile_size, tuning.projectile_size),
            speed: tuning.projectile_speed,
            alive: true,
        }
    }
}

// ── Self-moving entities ──────────────────────────────────────────────────────

impl Updatable for Projectile {
    fn update(&mut self, bounds: &Bounds) {
        self.body.x += self.speed;
        if self.body.x > bounds.right {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Updatable for Enemy {
    fn update(&mut self, bounds: &Bounds) {
        self.body.x -= self.speed;
        if self.bbox().right() < bounds.left {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Advance every entity in `items` and drop the ones that died doing so.
fn advance_all<T: Updatable>(items: &mut Vec<T>, bounds: &Bounds) {
    for item in items.iter_mut() {
        item.update(bounds);
    }
    items.retain(T::is_alive);
}

// ── Collisions ────────────────────────────────────────────────────────────────

/// Pair overlapping projectiles and enemies one-to-one and remove every
/// matched entity.  Returns the number of pairs.
///
/// Projectiles are visited in order and each takes the first live enemy it
/// overlaps, so an enemy hit by several projectiles at once is consumed by
/// only one of them and the rest fly on.
pub fn resolve_projectile_hits(projectiles: &mut Vec<Projectile>, enemies: &mut Vec<Enemy>) -> u32 {
    let mut pairs = 0;
    for projectile in projectiles.iter_mut().filter(|p| p.alive) {
        let target = enemies
            .iter_mut()
            .find(|e| e.alive && projectile.collides_with(&**e));
        if let Some(enemy) = target {
            enemy.alive = false;
            projectile.alive = false;
            pairs += 1;
        }
    }
    projectiles.retain(|p| p.alive);
    enemies.retain(|e| e.alive);
    pairs
}

/// Remove every collectible the player overlaps.  Returns the score gained.
pub fn collect_pickups(player: &Player, collectibles: &mut Vec<Collectible>) -> u32 {
    let mut gained = 0;
    collectibles.retain(|c| {
        if player.collides_with(c) {
            log::debug!("Picked up {:?} at x={}", c.kind, c.body.x);
            gained += score_for(c.kind);
            false
        } else {
            true
        }
    });
    gained
}

// ── Per-tick step ─────────────────────────────────────────────────────────────

/// Advance the simulation by one tick.
///
/// Order: quit check, queued shots, player, projectiles and enemies,
/// projectile–enemy hits, player pickups.  A quit stops the world before
/// anything else moves; a stopped world is returned unchanged.
pub fn tick(state: &World, input: &InputFrame) -> World {
    let mut next = state.clone();
    if next.status == GameStatus::Stopped {
        return next;
    }
    if input.quit {
        next.status = GameStatus::Stopped;
        return next;
    }
    next.tick += 1;

    for _ in 0..input.shoot {
        let projectile = next.player.shoot(&next.tuning);
        next.projectiles.push(projectile);
    }

    next.player.update(&next.platforms, input);

    let bounds = next.bounds();
    advance_all(&mut next.projectiles, &bounds);
    advance_all(&mut next.enemies, &bounds);

    let kills = resolve_projectile_hits(&mut next.projectiles, &mut next.enemies);
    if kills > 0 {
        log::debug!("Tick {}: {} enemy kill(s)", next.tick, kills);
    }
    let pickups = collect_pickups(&next.player, &mut next.collectibles);
    next.player.score += kills * ENEMY_KILL_SCORE + pickups;

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_all_drops_only_dead_entities() {
        let tuning = Tuning::default();
        let bounds = Bounds { left: 0, right: 800 };
        let mut enemies = vec![
            Enemy::new(-48, 0, 3, &tuning),
            Enemy::new(200, 0, 3, &tuning),
        ];
        advance_all(&mut enemies, &bounds);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].body.x, 197);
    }

    #[test]
    fn score_table() {
        assert_eq!(score_for(CollectibleKind::Health), 5);
        assert_eq!(score_for(CollectibleKind::Life), 20);
        assert_eq!(ENEMY_KILL_SCORE, 10);
    }
}
