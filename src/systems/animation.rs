use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::{Event, EventReader},
    system::Query,
};
use strum_macros::AsRefStr;
use tracing::trace;

use crate::map::direction::Direction;

/// Named triggers understood by the player's animation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum AnimationTrigger {
    PlayerUp,
    PlayerDown,
    PlayerLeft,
    PlayerRight,
}

impl AnimationTrigger {
    /// The trigger for walking one tile in `direction`.
    pub const fn movement(direction: Direction) -> AnimationTrigger {
        match direction {
            Direction::Up => AnimationTrigger::PlayerUp,
            Direction::Down => AnimationTrigger::PlayerDown,
            Direction::Left => AnimationTrigger::PlayerLeft,
            Direction::Right => AnimationTrigger::PlayerRight,
        }
    }
}

/// Request to activate a trigger on an entity's animator.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationEvent {
    pub entity: Entity,
    pub trigger: AnimationTrigger,
}

/// Animation trigger sink read by the host's animation state machine.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Animator {
    last: Option<AnimationTrigger>,
}

impl Animator {
    pub fn set_trigger(&mut self, trigger: AnimationTrigger) {
        self.last = Some(trigger);
    }

    /// The most recently activated trigger.
    pub fn last_trigger(&self) -> Option<AnimationTrigger> {
        self.last
    }
}

pub fn animation_system(mut events: EventReader<AnimationEvent>, mut animators: Query<&mut Animator>) {
    for event in events.read() {
        match animators.get_mut(event.entity) {
            Ok(mut animator) => {
                trace!(entity = ?event.entity, trigger = event.trigger.as_ref(), "Animation trigger set");
                animator.set_trigger(event.trigger);
            }
            Err(_) => trace!(entity = ?event.entity, "Dropping animation trigger for entity without animator"),
        }
    }
}
