//! Audio system
//!
//! Gameplay events map to [`SoundEffect`]s. Each effect is a short
//! synthesized sweep rendered with fundsp and played on the default output
//! device through rodio. Without an output device the game stays silent.

use std::time::Duration;

use fundsp::prelude32::{AudioUnit, lerp, lfo, saw, sine, square};
use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Output sample rate in Hz
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump or bounce launch
    Jump,
    /// Runner hit a pipe
    Crash,
    /// Scroll speed stepped up
    SpeedUp,
    /// Finished run beat the session best
    HighScore,
}

impl SoundEffect {
    /// Cue for a gameplay event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped | GameEvent::Bounced => Some(SoundEffect::Jump),
            GameEvent::Crashed { .. } => Some(SoundEffect::Crash),
            GameEvent::SpeedUp { .. } => Some(SoundEffect::SpeedUp),
            GameEvent::ScoreCaptured { new_best: true, .. } => Some(SoundEffect::HighScore),
            _ => None,
        }
    }

    fn tone(&self) -> Tone {
        match self {
            // Short rising blip
            SoundEffect::Jump => Tone {
                wave: Waveform::Square,
                from_hz: 220.0,
                to_hz: 660.0,
                peak: 0.12,
                seconds: 0.12,
            },
            // Falling buzz
            SoundEffect::Crash => Tone {
                wave: Waveform::Saw,
                from_hz: 400.0,
                to_hz: 80.0,
                peak: 0.2,
                seconds: 0.5,
            },
            SoundEffect::SpeedUp => Tone {
                wave: Waveform::Sine,
                from_hz: 600.0,
                to_hz: 900.0,
                peak: 0.25,
                seconds: 0.2,
            },
            SoundEffect::HighScore => Tone {
                wave: Waveform::Sine,
                from_hz: 520.0,
                to_hz: 1040.0,
                peak: 0.3,
                seconds: 0.4,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Waveform {
    Sine,
    Saw,
    Square,
}

/// Linear frequency sweep with a linear fade-out
#[derive(Debug, Clone, Copy)]
struct Tone {
    wave: Waveform,
    from_hz: f32,
    to_hz: f32,
    /// Starting gain at full volume
    peak: f32,
    seconds: f32,
}

impl Tone {
    /// Render mono samples at `volume` (0.0 - 1.0)
    fn render(&self, volume: f32) -> Vec<f32> {
        let Tone {
            from_hz,
            to_hz,
            seconds,
            ..
        } = *self;
        let peak = self.peak * volume;

        let freq = lfo(move |t: f32| lerp(from_hz, to_hz, (t / seconds).min(1.0)));
        let gain = lfo(move |t: f32| lerp(peak, 0.0, (t / seconds).min(1.0)));
        let mut unit: Box<dyn AudioUnit> = match self.wave {
            Waveform::Sine => Box::new((freq >> sine()) * gain),
            Waveform::Saw => Box::new((freq >> saw()) * gain),
            Waveform::Square => Box::new((freq >> square()) * gain),
        };
        unit.set_sample_rate(f64::from(SAMPLE_RATE));

        let len = (seconds * SAMPLE_RATE as f32) as usize;
        (0..len).map(|_| unit.get_mono()).collect()
    }

    fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.seconds)
    }
}

/// Open output device; the stream must outlive every sink on its handle
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Output {
    fn open() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                log::warn!("No audio output ({}), playing silently", e);
                None
            }
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    /// Stage has sound at all
    enabled: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    output: Option<Output>,
}

impl AudioManager {
    /// Open the default output device when the stage has sound
    pub fn new(enabled: bool, settings: &Settings) -> Self {
        let mut audio = Self::silent(enabled, settings);
        if enabled {
            audio.output = Output::open();
        }
        audio
    }

    /// Manager that computes cues but never touches a device
    fn silent(enabled: bool, settings: &Settings) -> Self {
        Self {
            enabled,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            output: None,
        }
    }

    /// Flip mute; returns the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted || !self.enabled {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Samples for `effect` at the current volume, `None` when silent
    fn cue(&self, effect: SoundEffect) -> Option<Vec<f32>> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return None;
        }
        Some(effect.tone().render(vol))
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let Some(output) = &self.output else { return };
        let Some(samples) = self.cue(effect) else { return };

        let sink = match Sink::try_new(&output.handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::warn!("Cannot play {:?}: {}", effect, e);
                return;
            }
        };
        log::trace!("Sound {:?} ({:?})", effect, effect.tone().duration());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.detach();
    }

    /// Play the cues for a batch of events
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0, |m, s| m.max(s.abs()))
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Jumped),
            Some(SoundEffect::Jump)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Bounced),
            Some(SoundEffect::Jump)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ScoreCaptured {
                score: 3,
                new_best: false
            }),
            None
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Landed), None);
    }

    #[test]
    fn test_jump_is_audible_at_default_volume() {
        let audio = AudioManager::silent(true, &Settings::default());
        let samples = audio.cue(SoundEffect::Jump).expect("jump cue");
        assert_eq!(samples.len(), (0.12 * SAMPLE_RATE as f32) as usize);
        assert!(peak(&samples) > 0.01);
    }

    #[test]
    fn test_volume_scales_cue() {
        let loud = AudioManager::silent(true, &Settings::default());
        let quiet = AudioManager::silent(
            true,
            &Settings {
                master_volume: 0.2,
                ..Settings::default()
            },
        );
        let loud = peak(&loud.cue(SoundEffect::Crash).expect("crash cue"));
        let quiet = peak(&quiet.cue(SoundEffect::Crash).expect("crash cue"));
        assert!(quiet < loud);
        assert!(loud <= SoundEffect::Crash.tone().peak + 1e-3);
    }

    #[test]
    fn test_muted_or_disabled_is_silent() {
        let mut muted = AudioManager::silent(true, &Settings::default());
        assert!(muted.toggle_muted());
        assert!(muted.cue(SoundEffect::Crash).is_none());
        assert!(!muted.toggle_muted());
        assert!(muted.cue(SoundEffect::Crash).is_some());

        let disabled = AudioManager::silent(false, &Settings::default());
        assert!(disabled.cue(SoundEffect::HighScore).is_none());
        // No device: playing is a no-op
        disabled.play(SoundEffect::HighScore);
    }
}
