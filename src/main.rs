use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use neonflap::audio::{Audio, SoundEffect};
use neonflap::game::logic::{process_intent, process_tick};
use neonflap::game::types::TICK_MS;
use neonflap::ui;
use neonflap::utils::persistence;
use neonflap::{GamePhase, Intent, TickEvent, World};
use rand::Rng;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("neonflap {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Neonflap - a neon flappy bird for the terminal\n");
                println!("Usage: neonflap\n");
                println!("Controls:");
                println!("  Space/Up/Enter  Flap (or start a session)");
                println!("  q/Esc           Quit");
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'neonflap --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let mut rng = rand::thread_rng();
    let mut world = World::new(&mut rng, persistence::load_high_score());
    let mut audio = Audio::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut world, &mut audio, &mut rng);

    // Restore terminal even when the loop errored
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    result
}

/// Frame loop: poll input, advance the simulation one tick, draw, pace to
/// the tick rate.
fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    world: &mut World,
    audio: &mut Option<Audio>,
    rng: &mut impl Rng,
) -> io::Result<()> {
    let frame_duration = Duration::from_millis(TICK_MS);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        // Outside a session the same keys start one.
                        let intent = if matches!(world.phase, GamePhase::Playing) {
                            Intent::Flap
                        } else {
                            Intent::Start
                        };
                        let events = process_intent(world, intent);
                        apply_events(&events, audio);
                    }
                    _ => {}
                }
            }
        }

        let events = process_tick(world, rng);
        apply_events(&events, audio);

        terminal.draw(|frame| ui::draw(frame, world))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }
}

/// Turn simulation events into the side effects they ask for. Audio and
/// storage are fire-and-forget; their failures never reach the simulation.
fn apply_events(events: &[TickEvent], audio: &mut Option<Audio>) {
    for event in events {
        match event {
            TickEvent::SessionStarted => {
                if let Some(audio) = audio {
                    audio.play_music();
                }
            }
            TickEvent::Flapped => {
                if let Some(audio) = audio {
                    audio.play_effect(SoundEffect::Flap);
                }
            }
            TickEvent::Scored => {
                if let Some(audio) = audio {
                    audio.play_effect(SoundEffect::Score);
                }
            }
            TickEvent::Crashed { high_score, .. } => {
                if let Some(audio) = audio {
                    audio.stop_music();
                    audio.play_effect(SoundEffect::Hit);
                }
                let _ = persistence::save_high_score(*high_score);
            }
            TickEvent::GameOverRevealed => {}
        }
    }
}
