use bevy_ecs::entity::Entity;
use glam::IVec2;

use crate::map::{direction::Direction, level::Level};

/// Result of probing the cell next to a mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The target cell is free and the mover now occupies it.
    Moved(IVec2),
    /// The target cell is taken. Carries the blocking entity, or `None` for the level boundary.
    Blocked(Option<Entity>),
}

/// A single one-tile step request and what came of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveAttempt {
    pub direction: Direction,
    pub outcome: MoveOutcome,
}

impl MoveAttempt {
    /// Probes the cell one step from `from` in `direction`.
    ///
    /// Outer walls and cells outside the level block without a target. Otherwise the
    /// first blocking entity found in the target cell is reported.
    pub fn resolve(
        level: &Level,
        from: IVec2,
        direction: Direction,
        blockers: impl IntoIterator<Item = (Entity, IVec2)>,
    ) -> MoveAttempt {
        let target = from + direction.as_ivec2();

        let outcome = if level.is_solid(target) {
            MoveOutcome::Blocked(None)
        } else {
            match blockers.into_iter().find(|(_, cell)| *cell == target) {
                Some((entity, _)) => MoveOutcome::Blocked(Some(entity)),
                None => MoveOutcome::Moved(target),
            }
        };

        MoveAttempt { direction, outcome }
    }
}
