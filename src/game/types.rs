//! Entity models and world state for the neon flappy game.
//!
//! All positions live in a fixed 360x640 world space; the renderer scales
//! down to whatever terminal area it gets. Physics constants are per-tick
//! values at the 16ms tick rate.

use rand::Rng;

/// World dimensions in world units.
pub const WORLD_W: f64 = 360.0;
pub const WORLD_H: f64 = 640.0;

/// Height of the ground strip at the bottom of the world.
pub const FLOOR_H: f64 = 50.0;

/// Simulation tick length in milliseconds (~60 ticks/sec).
pub const TICK_MS: u64 = 16;

/// Downward acceleration added to bird velocity each tick.
pub const GRAVITY: f64 = 0.4;

/// Velocity override applied by a flap (negative = upward).
pub const FLAP_IMPULSE: f64 = -10.0;

/// Horizontal scroll speed of pipes in world units per tick. The bird's x
/// never changes; the world scrolls past it.
pub const GAME_SPEED: f64 = 2.0;

/// Vertical opening between a pipe's top and bottom stubs.
pub const PIPE_GAP: f64 = 150.0;

/// Pipe width in world units.
pub const PIPE_W: f64 = 60.0;

/// Ticks between pipe spawns (1500ms at the 16ms tick).
pub const PIPE_INTERVAL_TICKS: u64 = 1500 / TICK_MS;

/// Bird hitbox size.
pub const BIRD_W: f64 = 40.0;
pub const BIRD_H: f64 = 30.0;

/// A trail particle is emitted every 3rd bird tick while playing.
pub const TRAIL_INTERVAL: u64 = 3;

/// Particle burst sizes for scoring and crashing.
pub const SCORE_BURST: usize = 10;
pub const EXPLOSION_BURST: usize = 30;

/// Initial particle life in ticks and per-tick opacity decay.
pub const PARTICLE_LIFE: i32 = 30;
pub const ALPHA_DECAY: f64 = 0.02;

/// Size of the decorative star pool, created once at startup.
pub const STAR_COUNT: usize = 100;

/// Delay before the game-over overlay is revealed (1000ms).
pub const REVEAL_DELAY_TICKS: u32 = (1000 / TICK_MS) as u32;

/// Delay before the automatic flap after a session starts (100ms), so a
/// fresh session does not begin in free fall.
pub const AUTO_FLAP_DELAY_TICKS: u32 = (100 / TICK_MS) as u32;

/// Lowest and highest allowed gap top, keeping the gap on screen with
/// margin from both ceiling and floor.
pub const GAP_TOP_MIN: f64 = 50.0;
pub const GAP_TOP_MAX: f64 = WORLD_H - PIPE_GAP - 150.0;

/// Top edge of the ground strip.
pub fn floor_y() -> f64 {
    WORLD_H - FLOOR_H
}

/// The player-controlled bird. Its x position is fixed; only y moves.
#[derive(Debug, Clone)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity in world units per tick (positive = downward).
    pub velocity: f64,
    /// Display tilt derived from velocity, clamped to [-45deg, 45deg].
    pub rotation: f64,
    /// Counts bird ticks for trail particle emission.
    pub trail_timer: u64,
}

impl Bird {
    /// Bird at the session spawn point, with the half-strength starting
    /// flap already applied.
    pub fn new() -> Self {
        Self {
            x: WORLD_W / 3.0,
            y: WORLD_H / 2.0,
            width: BIRD_W,
            height: BIRD_H,
            velocity: FLAP_IMPULSE / 2.0,
            rotation: 0.0,
            trail_timer: 0,
        }
    }

    /// Non-interactive bird shown on the start screen, velocity pinned to
    /// zero so it hangs in place.
    pub fn display() -> Self {
        Self {
            velocity: 0.0,
            ..Self::new()
        }
    }

    pub fn flap(&mut self) {
        self.velocity = FLAP_IMPULSE;
    }

    /// One physics tick: gravity, integration, tilt, boundary clamps.
    /// Returns true if the bird struck the floor this tick. Ceiling contact
    /// only zeroes velocity; it never ends the game.
    pub fn tick(&mut self) -> bool {
        self.velocity += GRAVITY;
        self.y += self.velocity;
        self.rotation = (self.velocity * 0.04).clamp(
            -std::f64::consts::FRAC_PI_4,
            std::f64::consts::FRAC_PI_4,
        );
        self.trail_timer += 1;

        let mut floor_hit = false;
        if self.y + self.height > floor_y() {
            self.y = floor_y() - self.height;
            self.velocity = 0.0;
            floor_hit = true;
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
        floor_hit
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// An obstacle pair: a top stub down to `top` and a bottom stub up from
/// `bottom`, with the gap between them.
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Left edge x position, scrolling left each tick.
    pub x: f64,
    /// Bottom edge of the top stub (gap top).
    pub top: f64,
    /// Top edge of the bottom stub (gap bottom).
    pub bottom: f64,
    /// Set exactly once, when the bird has passed this pipe.
    pub scored: bool,
}

impl Pipe {
    /// New pipe at the right edge with a uniformly random gap position.
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let top = rng.gen_range(GAP_TOP_MIN..GAP_TOP_MAX);
        Self::at(WORLD_W, top)
    }

    pub fn at(x: f64, top: f64) -> Self {
        Self {
            x,
            top,
            bottom: top + PIPE_GAP,
            scored: false,
        }
    }

    pub fn tick(&mut self) {
        self.x -= GAME_SPEED;
    }

    /// Fully past the left edge of the world.
    pub fn off_screen(&self) -> bool {
        self.x + PIPE_W < 0.0
    }

    /// Horizontal overlap between bird and pipe.
    pub fn overlaps(&self, bird: &Bird) -> bool {
        bird.x + bird.width > self.x && bird.x < self.x + PIPE_W
    }

    /// Overlapping horizontally while the bird sits outside the gap.
    pub fn collides(&self, bird: &Bird) -> bool {
        self.overlaps(bird) && (bird.y < self.top || bird.y + bird.height > self.bottom)
    }

    /// The bird's leading edge has passed the pipe's trailing edge.
    pub fn passed_by(&self, bird: &Bird) -> bool {
        bird.x > self.x + PIPE_W
    }
}

/// Visual grouping for particles; the renderer maps these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Cyan motion trail behind the bird.
    Trail,
    /// Yellow burst on scoring.
    Score,
    /// Red burst on crashing.
    Explosion,
}

/// A short-lived visual effect point.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub size: f64,
    pub kind: ParticleKind,
    /// Opacity, decaying linearly each tick.
    pub alpha: f64,
    /// Remaining life in ticks.
    pub life: i32,
}

impl Particle {
    pub fn new<R: Rng>(
        rng: &mut R,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        kind: ParticleKind,
        alpha: f64,
    ) -> Self {
        Self {
            x,
            y,
            dx,
            dy,
            size: rng.gen_range(2.0..7.0),
            kind,
            alpha,
            life: PARTICLE_LIFE,
        }
    }

    pub fn tick(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
        self.life -= 1;
        self.alpha -= ALPHA_DECAY;
    }

    pub fn expired(&self) -> bool {
        self.life <= 0 || self.alpha <= 0.0
    }
}

/// Decorative background star. Drifts left, twinkles, and wraps to the
/// right edge instead of despawning.
#[derive(Debug, Clone)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub brightness: f64,
}

impl Star {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..WORLD_W),
            y: rng.gen_range(0.0..WORLD_H),
            size: rng.gen_range(0.5..2.5),
            speed: rng.gen_range(0.1..0.6),
            brightness: rng.gen_range(0.0..1.0),
        }
    }

    /// Drift, wrap, and twinkle. `elapsed_ms` is total simulation time,
    /// used as the twinkle oscillator input.
    pub fn tick<R: Rng>(&mut self, rng: &mut R, elapsed_ms: f64) {
        self.x -= self.speed;
        if self.x < 0.0 {
            self.x = WORLD_W;
            self.y = rng.gen_range(0.0..WORLD_H);
        }
        self.brightness = 0.3 + (elapsed_ms * 0.001 * self.speed).sin().abs() * 0.7;
    }
}

/// Game phase. GameOver keeps a countdown until the overlay is revealed;
/// restart is accepted in either sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Playing,
    GameOver { reveal_in: u32, revealed: bool },
}

/// The whole simulation state: entities, score, phase.
#[derive(Debug, Clone)]
pub struct World {
    pub phase: GamePhase,
    /// Whether any session has ever started. While idle, a flap only
    /// doubles as start once this is set.
    pub has_played: bool,

    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,

    /// Pipes passed this session.
    pub score: u32,
    /// Best score across sessions, persisted by the driver.
    pub high_score: u32,

    /// Total simulation ticks since startup.
    pub tick_count: u64,
    /// Ticks since the last pipe spawn.
    pub ticks_since_pipe: u64,
    /// Countdown to the automatic flap scheduled at session start.
    pub auto_flap_in: Option<u32>,
}

impl World {
    /// Fresh idle world with the star pool created and a display bird.
    pub fn new<R: Rng>(rng: &mut R, high_score: u32) -> Self {
        let stars = (0..STAR_COUNT).map(|_| Star::new(rng)).collect();
        Self {
            phase: GamePhase::Idle,
            has_played: false,
            bird: Bird::display(),
            pipes: Vec::new(),
            particles: Vec::new(),
            stars,
            score: 0,
            high_score,
            tick_count: 0,
            ticks_since_pipe: 0,
            auto_flap_in: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_world_defaults() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let world = World::new(&mut rng, 7);
        assert_eq!(world.phase, GamePhase::Idle);
        assert!(!world.has_played);
        assert_eq!(world.score, 0);
        assert_eq!(world.high_score, 7);
        assert!(world.pipes.is_empty());
        assert!(world.particles.is_empty());
        assert_eq!(world.stars.len(), STAR_COUNT);
        // Display bird hangs in place
        assert_eq!(world.bird.velocity, 0.0);
    }

    #[test]
    fn test_session_bird_starts_with_half_flap() {
        let bird = Bird::new();
        assert!((bird.x - WORLD_W / 3.0).abs() < f64::EPSILON);
        assert!((bird.y - WORLD_H / 2.0).abs() < f64::EPSILON);
        assert!((bird.velocity - FLAP_IMPULSE / 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bird_gravity_and_tilt() {
        let mut bird = Bird::new();
        bird.velocity = 0.0;
        let y0 = bird.y;
        bird.tick();
        assert!((bird.velocity - GRAVITY).abs() < f64::EPSILON);
        assert!(bird.y > y0);
        assert!(bird.rotation > 0.0);
        assert!(bird.rotation <= std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn test_bird_floor_clamp() {
        let mut bird = Bird::new();
        bird.y = floor_y() - bird.height;
        bird.velocity = 5.0;
        let floor_hit = bird.tick();
        assert!(floor_hit);
        assert!((bird.y - (floor_y() - bird.height)).abs() < f64::EPSILON);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_bird_ceiling_clamp() {
        let mut bird = Bird::new();
        bird.y = 2.0;
        bird.velocity = -20.0;
        let floor_hit = bird.tick();
        assert!(!floor_hit);
        assert_eq!(bird.y, 0.0);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_pipe_gap_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..200 {
            let pipe = Pipe::spawn(&mut rng);
            assert!(pipe.top >= GAP_TOP_MIN);
            assert!(pipe.top < GAP_TOP_MAX);
            assert!((pipe.bottom - pipe.top - PIPE_GAP).abs() < f64::EPSILON);
            // Gap bottom stays well above the floor
            assert!(pipe.bottom < floor_y());
        }
    }

    #[test]
    fn test_pipe_scroll_and_removal() {
        let mut pipe = Pipe::at(0.0, 100.0);
        assert!(!pipe.off_screen());
        for _ in 0..40 {
            pipe.tick();
        }
        // 40 ticks * 2.0 = 80 > pipe width
        assert!(pipe.off_screen());
    }

    #[test]
    fn test_pipe_gap_geometry() {
        // top = 50, spacing = 150 => bottom = 200
        let pipe = Pipe::at(Bird::new().x, 50.0);
        assert!((pipe.bottom - 200.0).abs() < f64::EPSILON);

        let mut bird = Bird::new();
        bird.y = 100.0;
        assert!(pipe.overlaps(&bird));
        assert!(!pipe.collides(&bird));

        bird.y = 40.0;
        assert!(pipe.collides(&bird));
    }

    #[test]
    fn test_particle_decay() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut p = Particle::new(&mut rng, 0.0, 0.0, 1.0, -1.0, ParticleKind::Score, 1.0);
        assert!(!p.expired());
        for _ in 0..PARTICLE_LIFE {
            p.tick();
        }
        assert!(p.expired());
    }

    #[test]
    fn test_low_alpha_particle_expires_early() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut p = Particle::new(&mut rng, 0.0, 0.0, 0.0, 0.0, ParticleKind::Trail, 0.05);
        let mut ticks = 0;
        while !p.expired() {
            p.tick();
            ticks += 1;
        }
        // alpha 0.05 at 0.02/tick decay runs out long before life does
        assert!(ticks <= 3);
    }

    #[test]
    fn test_star_wraps_with_new_row() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut star = Star::new(&mut rng);
        star.x = 0.05;
        star.speed = 0.5;
        star.tick(&mut rng, 0.0);
        assert!((star.x - WORLD_W).abs() < f64::EPSILON);
        assert!(star.y >= 0.0 && star.y < WORLD_H);
    }

    #[test]
    fn test_star_brightness_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut star = Star::new(&mut rng);
        for t in 0..500 {
            star.tick(&mut rng, t as f64 * TICK_MS as f64);
            assert!(star.brightness >= 0.3);
            assert!(star.brightness <= 1.0);
        }
    }
}
