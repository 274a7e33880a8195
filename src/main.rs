use std::io::{self, stdout, BufWriter, Stdout};
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

use side_scroller::camera::Camera;
use side_scroller::compute::init_world;
use side_scroller::config::{GameContext, Settings, Tuning, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use side_scroller::display::TerminalSurface;
use side_scroller::game::GameLoop;
use side_scroller::hooks::HookPipeline;
use side_scroller::{logging, GameError};

type Out = BufWriter<Stdout>;

fn main() -> Result<(), GameError> {
    let settings = Settings::parse();
    logging::init(settings.verbose, settings.log_file.as_deref())?;
    settings.validate()?;
    log::info!("Starting with {settings:?}");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    let keyboard_enhanced = match enter_screen(&mut out) {
        Ok(enhanced) => enhanced,
        Err(err) => {
            restore_terminal(&mut out, false);
            return Err(err);
        }
    };

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::error!("Input read failed: {err}");
                break;
            }
        }
    });

    let result = run(settings, &mut out, &rx);

    // Always restore the terminal
    restore_terminal(&mut out, keyboard_enhanced);
    if let Err(err) = &result {
        log::error!("Exiting: {err}");
    }
    result
}

/// Switch to the alternate screen.  Returns whether key-release reporting
/// could be enabled.
fn enter_screen(out: &mut Out) -> Result<bool, GameError> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal, but only
    // where the kitty keyboard protocol is actually supported.  The query
    // reads the terminal's reply, so it must run before the reader thread
    // starts.
    let enhanced = enable_enhancement(terminal::supports_keyboard_enhancement(), || {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .map(|_| ())
    });
    log::debug!("Keyboard enhancement: {enhanced}");
    Ok(enhanced)
}

/// Push the enhancement flags only when the terminal reported support.
fn enable_enhancement<F>(supported: io::Result<bool>, push: F) -> bool
where
    F: FnOnce() -> io::Result<()>,
{
    match supported {
        Ok(true) => push().is_ok(),
        Ok(false) => false,
        Err(err) => {
            log::debug!("Keyboard enhancement query failed: {err}");
            false
        }
    }
}

fn restore_terminal(out: &mut Out, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn run(settings: Settings, out: &mut Out, rx: &mpsc::Receiver<Event>) -> Result<(), GameError> {
    let tuning = Tuning::default();
    let world = match settings.seed {
        Some(seed) => init_world(&settings, tuning, &mut StdRng::seed_from_u64(seed)),
        None => init_world(&settings, tuning, &mut thread_rng()),
    };

    let surface = TerminalSurface::new(out)?;
    let mut ctx = GameContext::new(settings, surface);
    let mut game = GameLoop::new(
        world,
        Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        HookPipeline::standard(),
    );
    game.run(&mut ctx, rx)
}
