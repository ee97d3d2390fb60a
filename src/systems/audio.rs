//! Audio system for handling sound playback.
//!
//! This module provides an ECS-based audio system on top of [`Audio`]. The backend is
//! owned by the host and may not be thread-safe, so it lives in a non-send resource.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::{NonSendMut, Res},
};
use tracing::{debug, trace};

use crate::audio::{Audio, SoundGroup};

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play a random variant of a sound group
    Randomize(SoundGroup),
    /// Stop the background music
    StopMusic,
}

/// Non-send resource wrapper for the audio front-end
pub struct AudioResource(pub Audio);

/// System that processes audio events and plays sounds
pub fn audio_system(mut audio: NonSendMut<AudioResource>, state: Res<AudioState>, mut events: EventReader<AudioEvent>) {
    // Set mute state if it has changed
    if audio.0.is_muted() != state.muted && !audio.0.is_disabled() {
        debug!(muted = state.muted, "Audio mute state changed");
        audio.0.set_mute(state.muted);
    }

    for event in events.read() {
        match event {
            AudioEvent::Randomize(group) => match audio.0.randomize(*group) {
                Some((sound, pitch)) => trace!(?group, ?sound, pitch, "Playing sound"),
                None => trace!(
                    ?group,
                    disabled = audio.0.is_disabled(),
                    muted = audio.0.is_muted(),
                    "Skipping sound due to audio state"
                ),
            },
            AudioEvent::StopMusic => {
                debug!("Stopping music");
                audio.0.stop_music();
            }
        }
    }
}
