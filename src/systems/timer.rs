use std::time::Duration;

use bevy_ecs::{
    entity::Entity,
    event::{Event, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use smallvec::SmallVec;
use tracing::debug;

use crate::systems::{components::DeltaTime, state::GameManager};

/// Work deferred until some time has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    RestartLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledAction {
    pub id: ActionId,
    /// The entity that requested the action; despawning it cancels the action
    pub owner: Entity,
    pub remaining: Duration,
    pub action: DeferredAction,
}

/// Queue of delayed actions, advanced once per tick by [`scheduler_system`].
#[derive(Resource, Debug, Default)]
pub struct ScheduledActions {
    next_id: u64,
    entries: Vec<ScheduledAction>,
}

impl ScheduledActions {
    pub fn schedule(&mut self, owner: Entity, delay: Duration, action: DeferredAction) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id += 1;
        self.entries.push(ScheduledAction {
            id,
            owner,
            remaining: delay,
            action,
        });
        id
    }

    /// Drops every pending action, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Removes every pending action owned by `owner`, returning how many were dropped.
    pub fn cancel_owned_by(&mut self, owner: Entity) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.owner != owner);
        before - self.entries.len()
    }

    /// Advances all timers by `dt` and removes the ones that expired, in scheduling order.
    pub fn advance(&mut self, dt: Duration) -> SmallVec<[ScheduledAction; 2]> {
        let mut fired = SmallVec::new();
        self.entries.retain_mut(|entry| {
            entry.remaining = entry.remaining.saturating_sub(dt);
            if entry.remaining.is_zero() {
                fired.push(entry.clone());
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledAction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Level transitions requested by gameplay, handled by the game driver after the schedule runs.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    Restart,
}

/// Advances scheduled actions and fires the expired ones.
///
/// Once the run is over nothing fires: pending actions are dropped.
pub fn scheduler_system(
    dt: Res<DeltaTime>,
    manager: Res<GameManager>,
    mut scheduled: ResMut<ScheduledActions>,
    mut level_events: EventWriter<LevelEvent>,
) {
    if scheduled.is_empty() {
        return;
    }

    if manager.is_over() {
        let dropped = scheduled.clear();
        debug!(dropped, "Run is over, dropping scheduled actions");
        return;
    }

    for entry in scheduled.advance(dt.duration()) {
        debug!(id = ?entry.id, owner = ?entry.owner, action = ?entry.action, "Scheduled action fired");
        match entry.action {
            DeferredAction::RestartLevel => {
                level_events.write(LevelEvent::Restart);
            }
        }
    }
}
