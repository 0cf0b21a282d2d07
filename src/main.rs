mod audio;
mod brr;
mod controller;
mod grid;
mod shared;
mod synth;
mod tui;

use crossterm::terminal;
use env_logger::{Builder, Env};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use audio::{AudioError, PlaybackHandle};
use controller::{Action, EditorController};
use grid::Voice;

/// No output device, no instrument.
const EXIT_NO_DEVICE: i32 = 2;

fn main() {
    // quiet by default; RUST_LOG=debug for troubleshooting
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        let code = if e.downcast_ref::<AudioError>().is_some() {
            EXIT_NO_DEVICE
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn run() -> anyhow::Result<()> {
    let playback = audio::start_audio()?;

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let mut ctl = EditorController::new();
    term.draw(|frame| {
        let area = frame.area();
        tui::view::render(frame, area, &ctl.grid);
    })?;

    loop {
        let action = ctl.handle(tui::input::next_event()?);
        if action == Action::Quit {
            break;
        }
        // render reflects the mutation before any playback starts
        term.draw(|frame| {
            let area = frame.area();
            tui::view::render(frame, area, &ctl.grid);
        })?;

        if let Action::Play(row) = action {
            play_voice(&playback, &ctl.grid.voices[row])?;
            // playback can outlast the inter-keystroke interval; whatever
            // was typed during it is dropped, not replayed
            tui::input::drain_pending()?;
        }
    }

    Ok(())
}

/// The full regenerate cycle for one row: synthesize, run the buffer through
/// the lo-fi codec round trip, and block on the sink until it has played out.
fn play_voice(playback: &PlaybackHandle, voice: &Voice) -> anyhow::Result<()> {
    let pcm = synth::synthesize(voice.seed, voice.len, voice.dtx)?;
    let pcm = brr::decode(&brr::encode(&pcm), pcm.len());
    playback.play(&pcm)
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
