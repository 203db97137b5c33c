use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        MouseButton, MouseEvent, MouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use math_shooter::audio::SilentAudio;
use math_shooter::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use math_shooter::director::Director;
use math_shooter::display::TermSurface;
use math_shooter::input::Key;
use math_shooter::rect::Bounds;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Simultaneous-input handling ───────────────────────────────────────────────

/// A key counts as "held" if its last press/repeat event arrived within this
/// many frames. Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is always refreshed before
/// expiry while the key is physically down.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_fresh(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_fresh(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|&key| is_fresh(key_frame, key, frame))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: held keys (movement, fire) go through the freshness map so
/// several can act at once; one-shot keys (pause, resume) are latched into
/// the input snapshot on the press edge and consumed by the director, so one
/// physical press triggers at most one toggle.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let bounds = Bounds::new(WORLD_WIDTH, WORLD_HEIGHT);
    let mut director = Director::new(bounds, Box::new(SilentAudio), StdRng::from_entropy());

    let (cols, rows) = terminal::size()?;
    let mut surface = TermSurface::new(cols, rows);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Esc => director.input_mut().set_held(Key::Escape, true),
                            KeyCode::Char('p') | KeyCode::Char('P') => {
                                director.input_mut().set_held(Key::P, true);
                            }
                            KeyCode::Char('c') | KeyCode::Char('C') => {
                                director.input_mut().set_held(Key::C, true);
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so the key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    // Release: drop immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let input = director.input_mut();
                    input.mouse_x = surface.virtual_x(column);
                    input.mouse_y = surface.virtual_y(row);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            input.clicked = true;
                            input.mouse_down = true;
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            input.mouse_down = false;
                        }
                        _ => {}
                    }
                }
                Event::Resize(new_cols, new_rows) => surface.resize(new_cols, new_rows),
                _ => {}
            }
        }

        // ── Refresh the held-key snapshot ──────────────────────────────────
        {
            let input = director.input_mut();
            input.set_held(
                Key::Left,
                any_fresh(
                    &key_frame,
                    &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                    frame,
                ),
            );
            input.set_held(
                Key::Right,
                any_fresh(
                    &key_frame,
                    &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                    frame,
                ),
            );
            input.set_held(
                Key::Up,
                any_fresh(
                    &key_frame,
                    &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                    frame,
                ),
            );
            input.set_held(Key::Fire, is_fresh(&key_frame, KeyCode::Char(' '), frame));
        }

        director.update();
        director.render(&mut surface);
        surface.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(event::EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back
    // gracefully to the hold-window model.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(event::DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
