use rodio::{OutputStream, OutputStreamHandle, Sink, Source, source::SineWave};
use std::time::Duration;
use tracing::{debug, warn};

use crate::game::GameEvent;

/// A short synthesized beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration: Duration,
    pub volume: f32,
}

impl Tone {
    const fn new(frequency: f32, millis: u64, volume: f32) -> Self {
        Self {
            frequency,
            duration: Duration::from_millis(millis),
            volume,
        }
    }
}

/// Which tone, if any, accompanies a game event.
pub fn cue_for(event: GameEvent) -> Option<Tone> {
    match event {
        GameEvent::Fired => Some(Tone::new(880.0, 40, 0.05)),
        GameEvent::AliensDestroyed(_) => Some(Tone::new(220.0, 80, 0.08)),
        GameEvent::ShipLost { .. } => Some(Tone::new(110.0, 400, 0.1)),
        GameEvent::LevelUp(_) => Some(Tone::new(660.0, 150, 0.08)),
        GameEvent::Started | GameEvent::GameOver { .. } => None,
    }
}

/// Audio manager for playing sound effects
pub struct AudioManager {
    /// Output device; `None` when muted or no device could be opened
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioManager {
    /// Opens the default output device. Failure is logged and leaves the
    /// manager silent.
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            debug!("audio muted");
            return Self::silent();
        }

        match OutputStream::try_default() {
            Ok(output) => Self {
                output: Some(output),
            },
            Err(err) => {
                warn!(%err, "failed to initialize audio, continuing without sound");
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self { output: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn play(&self, event: GameEvent) {
        if let Some(tone) = cue_for(event) {
            self.play_tone(tone);
        }
    }

    pub fn play_tone(&self, tone: Tone) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        // Playback errors are not worth interrupting the game for
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.append(
                    SineWave::new(tone.frequency)
                        .take_duration(tone.duration)
                        .amplify(tone.volume),
                );
                sink.detach();
            }
            Err(err) => debug!(%err, "could not play tone"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues() {
        assert_eq!(cue_for(GameEvent::Fired).map(|t| t.frequency), Some(880.0));
        assert_eq!(
            cue_for(GameEvent::ShipLost { ships_left: 2 }).map(|t| t.duration),
            Some(Duration::from_millis(400))
        );
        assert!(cue_for(GameEvent::Started).is_none());
        assert!(cue_for(GameEvent::GameOver { score: 10 }).is_none());
    }

    #[test]
    fn test_silent_manager_ignores_events() {
        let audio = AudioManager::new(false);
        assert!(!audio.is_enabled());
        audio.play(GameEvent::Fired);
    }
}
