//! Pipe Runner entry point
//!
//! Sets up the terminal and runs the real-time loop: drain input, advance the
//! fixed-timestep simulation, draw, then sleep until the next frame.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{event, terminal};

use pipe_runner::audio::AudioManager;
use pipe_runner::platform::{Command, KeyTracker, TerminalSession};
use pipe_runner::renderer::Renderer;
use pipe_runner::{Game, Settings, Stage, Tuning};

/// Target redraw interval (~60 fps)
const FRAME: Duration = Duration::from_millis(16);

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut settings = Settings::load();
    if let Some(arg) = std::env::args().nth(1) {
        match Stage::from_str(&arg) {
            Some(stage) => settings.stage = stage,
            None => {
                eprintln!(
                    "Unknown stage '{}'. Expected one of: {}",
                    arg,
                    Stage::ALL.map(|s| s.as_str()).join(", ")
                );
                std::process::exit(2);
            }
        }
    }
    log::info!("Pipe Runner starting (stage: {})", settings.stage.as_str());

    // Audio backends may print while probing devices; do it before raw mode
    let tuning = settings.tuning();
    let audio = AudioManager::new(tuning.sound, &settings);

    let session = TerminalSession::enter(BufWriter::new(io::stdout()))?;
    run(session, settings, tuning, audio)
}

fn run<W: Write>(
    mut session: TerminalSession<W>,
    settings: Settings,
    tuning: Tuning,
    mut audio: AudioManager,
) -> io::Result<()> {
    let mut game = Game::new(settings.seed.unwrap_or_else(clock_seed), tuning);
    let mut keys = KeyTracker::new(session.enhanced);

    let (cols, rows) = terminal::size()?;
    let mut renderer = Renderer::new(cols, rows);

    let mut last = Instant::now();
    let mut fps_window = (Instant::now(), 0u32);
    let mut fps = 0u32;

    loop {
        let frame_start = Instant::now();

        // Input: drain everything queued before this frame
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                event::Event::Key(key) => {
                    match keys.handle(key, game.state.game_on(), Instant::now()) {
                        Some(Command::Quit) => {
                            log::info!("Quit (best score {})", game.state.score.best());
                            return Ok(());
                        }
                        Some(Command::ToggleMute) => {
                            // Persist only the preference, not CLI overrides
                            let mut stored = Settings::load();
                            stored.muted = audio.toggle_muted();
                            stored.save();
                        }
                        Some(Command::Game(input)) => game.push(input),
                        None => {}
                    }
                }
                event::Event::Resize(c, r) => renderer.resize(c, r),
                _ => {}
            }
        }
        if let Some(Command::Game(input)) = keys.expire(Instant::now()) {
            game.push(input);
        }

        // Update
        let now = Instant::now();
        let events = game.update(now.duration_since(last).as_secs_f32());
        last = now;
        audio.play_events(&events);

        // Render
        fps_window.1 += 1;
        if fps_window.0.elapsed() >= Duration::from_secs(1) {
            fps = fps_window.1;
            fps_window = (Instant::now(), 0);
        }
        renderer.draw(&game.view(), settings.show_fps.then_some(fps));
        renderer.present(session.out())?;
        session.out().flush()?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}
