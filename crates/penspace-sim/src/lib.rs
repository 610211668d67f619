//! penspace-sim: keyboard-driven stylus sandbox
//!
//! Renders a front view of a small scene (a three-button menu panel and two
//! world markers) and drives a [`penspace::StylusRig`] from a keyboard
//! stylus, so the pointer, writer mode, anchoring and grab can be tried
//! without hardware.
//!
//! Controls:
//! - Arrows / PgUp / PgDn: move the stylus
//! - i/j/k/l: aim
//! - m: toggle the middle button (draw or grab)
//! - f: front button (click), b: back button (finish a word)
//! - x: toggle tracking
//! - w: writer mode, u: suspend pointer, n: finalize, r: reset
//! - q / Esc: quit

mod handlers;
mod scene;
mod state;
mod ui;
mod view;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use penspace::StylusConfig;
use tokio::runtime::Handle;
use tracing::info;

use handlers::handle_key;
use state::SimState;
use view::FrontView;

/// Run the sandbox until the user quits
pub fn run(config: StylusConfig, tick_rate: Duration, handle: Handle) -> anyhow::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let result = run_loop(config, tick_rate, handle);

    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;

    result
}

fn run_loop(config: StylusConfig, tick_rate: Duration, handle: Handle) -> anyhow::Result<()> {
    let mut view = FrontView::new()?;
    let mut state = SimState::new(config, handle);
    let mut last_tick = Instant::now();

    info!("Sandbox started at {:?} per tick", tick_rate);

    loop {
        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if !handle_key(key, &mut state) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            state.update(last_tick.elapsed());

            view.begin_frame()?;
            ui::render(&state, &mut view);
            view.end_frame()?;

            last_tick = Instant::now();
        }
    }

    info!("Sandbox stopped");
    Ok(())
}
