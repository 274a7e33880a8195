//! Rendering layer.
//!
//! `render` translates the world into draw calls against a `Surface` in
//! screen space; no game logic happens here.  `TerminalSurface` is the
//! crossterm-backed surface the binary uses: it scales the fixed logical
//! viewport onto whatever cell grid the terminal currently has.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::camera::Camera;
use crate::capabilities::Drawable;
use crate::config::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entities::{Collectible, CollectibleKind, Enemy, Platform, Player, Projectile, Rect, World};
use crate::error::GameError;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_PROJECTILE: Color = Color::White;
const C_PLATFORM: Color = Color::Grey;
const C_HEALTH: Color = Color::Green;
const C_LIFE: Color = Color::Red;
const C_HUD_SCORE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// HUD text anchor in screen space.
const SCORE_POS: (i32, i32) = (20, 20);
const HINT_POS: (i32, i32) = (20, VIEWPORT_HEIGHT - 30);

// ── Surface ───────────────────────────────────────────────────────────────────

/// Window/renderer surface the core draws on.  Coordinates are screen
/// space: `(0, 0)` is the viewport's top-left corner.
pub trait Surface {
    /// Fixed logical size of the viewport.
    fn viewport(&self) -> (i32, i32);

    fn clear(&mut self) -> Result<(), GameError>;

    fn fill_rect(&mut self, rect: Rect, colour: Color) -> Result<(), GameError>;

    fn draw_text(&mut self, x: i32, y: i32, text: &str, colour: Color) -> Result<(), GameError>;

    fn present(&mut self) -> Result<(), GameError>;
}

impl Drawable for Player {
    fn colour(&self) -> Color {
        C_PLAYER
    }
}

impl Drawable for Enemy {
    fn colour(&self) -> Color {
        C_ENEMY
    }
}

impl Drawable for Projectile {
    fn colour(&self) -> Color {
        C_PROJECTILE
    }
}

impl Drawable for Platform {
    fn colour(&self) -> Color {
        C_PLATFORM
    }
}

impl Drawable for Collectible {
    fn colour(&self) -> Color {
        match self.kind {
            CollectibleKind::Health => C_HEALTH,
            CollectibleKind::Life => C_LIFE,
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame, back to front: platforms, collectibles,
/// enemies, projectiles, player, then the HUD.
pub fn render<S: Surface>(surface: &mut S, world: &World, camera: &Camera) -> Result<(), GameError> {
    surface.clear()?;

    for platform in &world.platforms {
        draw_sprite(surface, camera, platform)?;
    }
    for collectible in &world.collectibles {
        draw_sprite(surface, camera, collectible)?;
    }
    for enemy in &world.enemies {
        draw_sprite(surface, camera, enemy)?;
    }
    for projectile in &world.projectiles {
        draw_sprite(surface, camera, projectile)?;
    }
    draw_sprite(surface, camera, &world.player)?;

    draw_hud(surface, world)?;
    surface.present()
}

fn draw_sprite<S: Surface, D: Drawable>(
    surface: &mut S,
    camera: &Camera,
    item: &D,
) -> Result<(), GameError> {
    surface.fill_rect(camera.apply(item), item.colour())
}

fn draw_hud<S: Surface>(surface: &mut S, world: &World) -> Result<(), GameError> {
    let score = format!("Score: {}", world.player.score);
    surface.draw_text(SCORE_POS.0, SCORE_POS.1, &score, C_HUD_SCORE)?;
    surface.draw_text(
        HINT_POS.0,
        HINT_POS.1,
        "← → / A D : Run   SPACE : Jump   F : Shoot   Q : Quit",
        C_HINT,
    )
}

// ── Terminal surface ──────────────────────────────────────────────────────────

/// Cell-grid span covering a screen-space span, clipped to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellSpan {
    start: u16,
    len: u16,
}

/// Map `[pos, pos + extent)` of a `viewport`-wide axis onto `cells` cells.
/// Partially covered cells count as covered; anything outside is clipped.
fn to_cells(pos: i32, extent: i32, viewport: i32, cells: u16) -> Option<CellSpan> {
    if extent <= 0 || viewport <= 0 || cells == 0 {
        return None;
    }
    let cells = i64::from(cells);
    let viewport = i64::from(viewport);
    let lo = (i64::from(pos) * cells).div_euclid(viewport);
    let hi = -((-(i64::from(pos) + i64::from(extent)) * cells).div_euclid(viewport));

    let lo = lo.clamp(0, cells);
    let hi = hi.clamp(0, cells);
    if hi <= lo {
        return None;
    }
    Some(CellSpan {
        start: lo as u16,
        len: (hi - lo) as u16,
    })
}

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Re-read the terminal size on every `clear`.
    track_terminal: bool,
}

impl<W: Write> TerminalSurface<W> {
    /// Surface sized to the real terminal, following resizes.
    pub fn new(out: W) -> Result<Self, GameError> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            track_terminal: true,
        })
    }

    /// Surface with a fixed cell grid, independent of any real terminal.
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            track_terminal: false,
        }
    }

    /// Current cell grid as `(cols, rows)`.
    pub fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn viewport(&self) -> (i32, i32) {
        (VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    fn clear(&mut self) -> Result<(), GameError> {
        if self.track_terminal {
            let (cols, rows) = terminal::size()?;
            self.cols = cols;
            self.rows = rows;
        }
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, colour: Color) -> Result<(), GameError> {
        let (vw, vh) = self.viewport();
        let (Some(xs), Some(ys)) = (
            to_cells(rect.x, rect.w, vw, self.cols),
            to_cells(rect.y, rect.h, vh, self.rows),
        ) else {
            return Ok(());
        };

        let fill = "█".repeat(usize::from(xs.len));
        self.out.queue(style::SetForegroundColor(colour))?;
        for row in ys.start..ys.start + ys.len {
            self.out.queue(cursor::MoveTo(xs.start, row))?;
            self.out.queue(Print(&fill))?;
        }
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, colour: Color) -> Result<(), GameError> {
        let (vw, vh) = self.viewport();
        let (Some(xs), Some(ys)) = (
            to_cells(x, 1, vw, self.cols),
            to_cells(y, 1, vh, self.rows),
        ) else {
            return Ok(());
        };

        let room = usize::from(self.cols - xs.start);
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(xs.start, ys.start))?;
        self.out.queue(style::SetForegroundColor(colour))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), GameError> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
