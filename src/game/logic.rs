//! Simulation step and state machine for the neon flappy game.
//!
//! `process_intent` handles player input, `process_tick` advances the world
//! by one fixed step. Both are pure over the world state plus an RNG; side
//! effects (audio, persistence, screen toggles) are reported back to the
//! driver as [`TickEvent`]s.

use super::types::{
    GamePhase, Particle, ParticleKind, Pipe, World, AUTO_FLAP_DELAY_TICKS, EXPLOSION_BURST,
    PIPE_INTERVAL_TICKS, SCORE_BURST, TICK_MS, TRAIL_INTERVAL,
};
use rand::Rng;

/// Abstract input event, decoupled from its physical trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Begin (or restart) a session.
    Start,
    /// Flap. While idle this doubles as start, but only once a session has
    /// ever run.
    Flap,
}

/// Everything a tick or intent can ask the driver to do. The simulation
/// never calls audio or storage itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// A session started: reset UI, start background music.
    SessionStarted,
    /// The bird flapped: play the flap sound.
    Flapped,
    /// A pipe was passed: play the score sound.
    Scored,
    /// The session ended: play the hit sound, stop music, persist the
    /// (already updated) high score.
    Crashed { score: u32, high_score: u32 },
    /// The game-over delay elapsed; show the final score panel.
    GameOverRevealed,
}

/// Apply one input intent to the world.
pub fn process_intent(world: &mut World, intent: Intent) -> Vec<TickEvent> {
    let mut events = Vec::new();
    match intent {
        Intent::Start => {
            if !matches!(world.phase, GamePhase::Playing) {
                start_session(world, &mut events);
            }
        }
        Intent::Flap => match world.phase {
            GamePhase::Playing => {
                world.bird.flap();
                events.push(TickEvent::Flapped);
            }
            // Before the first ever session only an explicit start begins
            // play; afterwards a flap restarts from idle or game over.
            _ => {
                if world.has_played {
                    start_session(world, &mut events);
                }
            }
        },
    }
    events
}

/// Advance the entire world by one tick.
///
/// Stars animate in every phase. The bird, pipes, spawning, and scoring run
/// only while playing; particles keep decaying afterwards so the crash
/// explosion plays out; the game-over countdown runs until the overlay is
/// revealed.
pub fn process_tick<R: Rng>(world: &mut World, rng: &mut R) -> Vec<TickEvent> {
    let mut events = Vec::new();
    world.tick_count += 1;

    if matches!(world.phase, GamePhase::Playing) {
        tick_auto_flap(world, &mut events);
        tick_bird(world, rng, &mut events);
    }
    // The bird may have struck the floor above, so re-check the phase.
    if matches!(world.phase, GamePhase::Playing) {
        tick_pipes(world, rng, &mut events);
    }
    if matches!(world.phase, GamePhase::Playing) {
        world.ticks_since_pipe += 1;
        if world.ticks_since_pipe > PIPE_INTERVAL_TICKS {
            world.pipes.push(Pipe::spawn(rng));
            world.ticks_since_pipe = 0;
        }
    }

    for particle in &mut world.particles {
        particle.tick();
    }
    world.particles.retain(|p| !p.expired());

    let elapsed_ms = world.tick_count as f64 * TICK_MS as f64;
    for star in &mut world.stars {
        star.tick(rng, elapsed_ms);
    }

    if let GamePhase::GameOver { reveal_in, revealed } = world.phase {
        if !revealed {
            if reveal_in <= 1 {
                world.phase = GamePhase::GameOver {
                    reveal_in: 0,
                    revealed: true,
                };
                events.push(TickEvent::GameOverRevealed);
            } else {
                world.phase = GamePhase::GameOver {
                    reveal_in: reveal_in - 1,
                    revealed: false,
                };
            }
        }
    }

    events
}

fn start_session(world: &mut World, events: &mut Vec<TickEvent>) {
    world.bird = super::types::Bird::new();
    world.pipes.clear();
    world.particles.clear();
    world.score = 0;
    world.ticks_since_pipe = 0;
    world.auto_flap_in = Some(AUTO_FLAP_DELAY_TICKS);
    world.phase = GamePhase::Playing;
    world.has_played = true;
    events.push(TickEvent::SessionStarted);
}

fn tick_auto_flap(world: &mut World, events: &mut Vec<TickEvent>) {
    if let Some(ticks) = world.auto_flap_in {
        if ticks <= 1 {
            world.auto_flap_in = None;
            world.bird.flap();
            events.push(TickEvent::Flapped);
        } else {
            world.auto_flap_in = Some(ticks - 1);
        }
    }
}

fn tick_bird<R: Rng>(world: &mut World, rng: &mut R, events: &mut Vec<TickEvent>) {
    let floor_hit = world.bird.tick();

    if world.bird.trail_timer % TRAIL_INTERVAL == 0 {
        let dx = rng.gen_range(1.0..4.0);
        let dy = rng.gen_range(1.0..4.0);
        let particle = Particle::new(
            rng,
            world.bird.x - 5.0,
            world.bird.y + world.bird.height / 2.0,
            dx,
            dy,
            ParticleKind::Trail,
            0.7,
        );
        world.particles.push(particle);
    }

    if floor_hit {
        crash(world, rng, events);
    }
}

fn tick_pipes<R: Rng>(world: &mut World, rng: &mut R, events: &mut Vec<TickEvent>) {
    for pipe in &mut world.pipes {
        pipe.tick();

        if !pipe.scored && pipe.passed_by(&world.bird) {
            pipe.scored = true;
            world.score += 1;
            events.push(TickEvent::Scored);
            for _ in 0..SCORE_BURST {
                let dx = rng.gen_range(-1.5..1.5);
                let dy = rng.gen_range(-1.5..1.5);
                let particle = Particle::new(
                    rng,
                    world.bird.x + world.bird.width,
                    world.bird.y,
                    dx,
                    dy,
                    ParticleKind::Score,
                    1.0,
                );
                world.particles.push(particle);
            }
        }
    }

    let collided = world.pipes.iter().any(|p| p.collides(&world.bird));
    if collided {
        crash(world, rng, events);
    }

    world.pipes.retain(|p| !p.off_screen());
}

/// End the session. No-op unless currently playing, so a floor strike and a
/// pipe collision in the same tick still produce a single transition.
fn crash<R: Rng>(world: &mut World, rng: &mut R, events: &mut Vec<TickEvent>) {
    if !matches!(world.phase, GamePhase::Playing) {
        return;
    }
    world.phase = GamePhase::GameOver {
        reveal_in: super::types::REVEAL_DELAY_TICKS,
        revealed: false,
    };

    for _ in 0..EXPLOSION_BURST {
        let dx = rng.gen_range(-3.0..3.0);
        let dy = rng.gen_range(-3.0..3.0);
        let particle = Particle::new(
            rng,
            world.bird.x,
            world.bird.y,
            dx,
            dy,
            ParticleKind::Explosion,
            1.0,
        );
        world.particles.push(particle);
    }

    if world.score > world.high_score {
        world.high_score = world.score;
    }
    events.push(TickEvent::Crashed {
        score: world.score,
        high_score: world.high_score,
    });
}
