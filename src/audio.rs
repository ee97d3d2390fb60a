//! This module handles sound selection for the game.
//!
//! Mixing and playback belong to whatever backend the host provides; this module only
//! decides which clip to play, at what pitch, and whether anything should play at all.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::trace;

use crate::constants::SFX_PITCH_RANGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Footstep(u8),
    Eat(u8),
    Drink(u8),
    GameOver,
}

/// A set of interchangeable clips, one of which is picked at random on playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum SoundGroup {
    Footsteps,
    Eat,
    Drink,
    GameOver,
}

impl SoundGroup {
    pub fn variants(self) -> &'static [Sound] {
        match self {
            SoundGroup::Footsteps => &[Sound::Footstep(0), Sound::Footstep(1)],
            SoundGroup::Eat => &[Sound::Eat(0), Sound::Eat(1)],
            SoundGroup::Drink => &[Sound::Drink(0), Sound::Drink(1)],
            SoundGroup::GameOver => &[Sound::GameOver],
        }
    }
}

/// The host's playback device.
pub trait AudioBackend {
    /// Plays a sound effect once at the given pitch multiplier.
    fn play(&mut self, sound: Sound, pitch: f32);

    /// Stops the background music track.
    fn stop_music(&mut self);
}

/// A backend that plays nothing. Used when the host has no audio device.
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, sound: Sound, pitch: f32) {
        trace!(?sound, pitch, "Discarding sound (null backend)");
    }

    fn stop_music(&mut self) {
        trace!("Discarding music stop (null backend)");
    }
}

/// Sound effect front-end.
///
/// If no backend is available, the audio system is disabled and all
/// functions silently do nothing.
pub struct Audio {
    backend: Option<Box<dyn AudioBackend>>,
    rng: SmallRng,
    state: AudioState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioState {
    Enabled,
    Muted,
    Disabled,
}

impl Audio {
    /// Creates an enabled `Audio` around the given backend.
    ///
    /// `seed` fixes the variant and pitch selection; `None` seeds from the thread RNG.
    pub fn new(backend: Box<dyn AudioBackend>, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            backend: Some(backend),
            rng: SmallRng::seed_from_u64(seed),
            state: AudioState::Enabled,
        }
    }

    /// Creates an `Audio` that never plays anything.
    pub fn disabled() -> Self {
        Self {
            backend: None,
            rng: SmallRng::seed_from_u64(0),
            state: AudioState::Disabled,
        }
    }

    /// Plays a random variant of the group at a slightly randomized pitch.
    ///
    /// Returns the chosen sound and pitch, or `None` when muted or disabled.
    pub fn randomize(&mut self, group: SoundGroup) -> Option<(Sound, f32)> {
        if self.state != AudioState::Enabled {
            return None;
        }
        let backend = self.backend.as_mut()?;

        let variants = group.variants();
        let sound = variants[self.rng.random_range(0..variants.len())];
        let pitch = self.rng.random_range(SFX_PITCH_RANGE.0..=SFX_PITCH_RANGE.1);

        backend.play(sound, pitch);
        Some((sound, pitch))
    }

    /// Stops the background music. Works while muted, so the track stays stopped on unmute.
    pub fn stop_music(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.stop_music();
        }
    }

    pub fn set_mute(&mut self, mute: bool) {
        match (self.state, mute) {
            (AudioState::Enabled, true) => self.state = AudioState::Muted,
            (AudioState::Muted, false) => self.state = AudioState::Enabled,
            _ => {}
        }
    }

    pub fn is_muted(&self) -> bool {
        self.state == AudioState::Muted
    }

    pub fn is_disabled(&self) -> bool {
        self.state == AudioState::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_group_variants_are_nonempty() {
        for group in SoundGroup::iter() {
            assert!(!group.variants().is_empty());
        }
    }

    #[test]
    fn test_randomize_picks_from_group_within_pitch_range() {
        let mut audio = Audio::new(Box::new(NullBackend), Some(7));
        for _ in 0..32 {
            let (sound, pitch) = audio.randomize(SoundGroup::Eat).expect("enabled audio should play");
            assert!(SoundGroup::Eat.variants().contains(&sound));
            assert!((SFX_PITCH_RANGE.0..=SFX_PITCH_RANGE.1).contains(&pitch));
        }
    }

    #[test]
    fn test_muted_and_disabled_play_nothing() {
        let mut audio = Audio::new(Box::new(NullBackend), Some(1));
        audio.set_mute(true);
        assert!(audio.is_muted());
        assert_eq!(audio.randomize(SoundGroup::Footsteps), None);

        let mut disabled = Audio::disabled();
        disabled.set_mute(false);
        assert!(disabled.is_disabled());
        assert_eq!(disabled.randomize(SoundGroup::GameOver), None);
    }
}
