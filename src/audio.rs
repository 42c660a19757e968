//! Fire-and-forget audio: synthesized effects and a looping background
//! track, played through rodio. No sound device just means a silent game;
//! nothing here can fail into the simulation.

use fundsp::prelude::*;
use rodio::{self, mixer::Mixer, OutputStream, OutputStreamBuilder, Sink};
use std::time::Duration;

/// One-shot effects, restarted from the beginning on every trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Flap,
    Score,
    Hit,
}

pub struct Audio {
    stream: OutputStream,
    music: Option<Sink>,
}

impl Audio {
    /// Open the default output device. `None` when no device is available.
    pub fn new() -> Option<Self> {
        let stream = OutputStreamBuilder::open_default_stream().ok()?;
        Some(Self {
            stream,
            music: None,
        })
    }

    pub fn play_effect(&self, effect: SoundEffect) {
        let mixer = self.stream.mixer();
        match effect {
            SoundEffect::Flap => play_flap(mixer),
            SoundEffect::Score => play_score(mixer),
            SoundEffect::Hit => play_hit(mixer),
        }
    }

    /// (Re)start the background loop.
    pub fn play_music(&mut self) {
        self.stop_music();
        let sink = Sink::connect_new(self.stream.mixer());

        // Slow four-note arpeggio with a gentle tremolo, looped forever.
        let freq = lfo(|t: f64| {
            const NOTES: [f64; 4] = [110.0, 146.83, 164.81, 196.0];
            NOTES[((t / 0.5) as usize) % NOTES.len()]
        });
        let gain = lfo(|t: f64| 0.05 + 0.02 * (t * 2.0).sin());
        let sound = freq >> saw() >> mul(gain);

        let source = rodio::source::from_iter(sound.take(44100 * 2.0))
            .convert_samples::<f32>()
            .periodic_samples(Duration::from_secs_f32(1.0 / 44100.0), 1)
            .repeat_infinite();
        sink.append(source);
        self.music = Some(sink);
    }

    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}

/// Short rising chirp.
fn play_flap(mixer: &Mixer) {
    let sink = Sink::connect_new(mixer);

    let freq = lfo(|t: f64| lerp11(300.0, 700.0, (t / 0.12).min(1.0)));
    let gain = lfo(|t: f64| lerp11(0.2, 0.0, (t / 0.15).min(1.0)));
    let sound = freq >> sine() >> mul(gain);

    let source = rodio::source::from_iter(sound.take(44100 * 0.15))
        .convert_samples::<f32>()
        .periodic_samples(Duration::from_secs_f32(1.0 / 44100.0), 1);
    sink.append(source);
    sink.detach();
}

/// Two-tone ding.
fn play_score(mixer: &Mixer) {
    let sink = Sink::connect_new(mixer);

    let freq = lfo(|t: f64| if t < 0.08 { 880.0 } else { 1174.66 });
    let gain = lfo(|t: f64| lerp11(0.15, 0.0, (t / 0.2).min(1.0)));
    let sound = freq >> sine() >> mul(gain);

    let source = rodio::source::from_iter(sound.take(44100 * 0.2))
        .convert_samples::<f32>()
        .periodic_samples(Duration::from_secs_f32(1.0 / 44100.0), 1);
    sink.append(source);
    sink.detach();
}

/// Falling buzz for the crash (400Hz down to 80Hz).
fn play_hit(mixer: &Mixer) {
    let sink = Sink::connect_new(mixer);

    let freq = lfo(|t: f64| lerp11(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f64| lerp11(0.2, 0.0, (t / 0.5).min(1.0)));
    let sound = freq >> saw() >> mul(gain);

    let source = rodio::source::from_iter(sound.take(44100 * 0.5))
        .convert_samples::<f32>()
        .periodic_samples(Duration::from_secs_f32(1.0 / 44100.0), 1);
    sink.append(source);
    sink.detach();
}
