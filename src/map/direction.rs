use glam::IVec2;

/// A single grid step a mover can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the grid offset of a single step in this direction.
    ///
    /// Rows grow downwards, so `Up` decreases the y coordinate.
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Builds a direction from signed axis values, as produced by input devices.
    ///
    /// Horizontal movement takes priority: a non-zero `horizontal` discards `vertical`.
    /// A positive `vertical` means up.
    pub const fn from_axes(horizontal: i32, vertical: i32) -> Option<Direction> {
        if horizontal > 0 {
            Some(Direction::Right)
        } else if horizontal < 0 {
            Some(Direction::Left)
        } else if vertical > 0 {
            Some(Direction::Up)
        } else if vertical < 0 {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}
