use num_enum::{IntoPrimitive, TryFromPrimitive};

/// A grid position `(x, y)`, with `y = 0` being the bottom row of the layout.
pub type Position = (usize, usize);

/// A move an agent can make. Ghosts may never `Stop`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Action {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
    Stop = 4,
}

impl Action {
    /// All actions, in the order legal actions are reported.
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Stop,
    ];

    /// Converts the given action index into an `Action`.
    ///
    /// Panics if index is outside the range `0..5`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    /// Returns the `(dx, dy)` offset of this action.
    pub fn vector(self) -> (isize, isize) {
        match self {
            Action::North => (0, 1),
            Action::South => (0, -1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
            Action::Stop => (0, 0),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Action::North => Action::South,
            Action::South => Action::North,
            Action::East => Action::West,
            Action::West => Action::East,
            Action::Stop => Action::Stop,
        }
    }

    /// Returns the position reached by taking this action from `pos`, or None if
    /// it would leave the non-negative quadrant.
    pub fn apply(self, pos: Position) -> Option<Position> {
        let (dx, dy) = self.vector();
        Some((pos.0.checked_add_signed(dx)?, pos.1.checked_add_signed(dy)?))
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::North => "North",
            Action::South => "South",
            Action::East => "East",
            Action::West => "West",
            Action::Stop => "Stop",
        }
    }
}

/// Enum for layout cell values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum GridValue {
    Wall = 1,
    Food = 2,
    Empty = 3,
    Capsule = 4,
}

// game params
pub const SCARED_TIME: u32 = 40;
pub const TIME_PENALTY: i32 = 1;
pub const FOOD_SCORE: i32 = 10;
pub const WIN_SCORE: i32 = 500;
pub const LOSE_PENALTY: i32 = 500;
pub const GHOST_SCORE: i32 = 200;

// agent params
pub const DEFAULT_DEPTH: u32 = 2;

// reflex heuristic params
pub const GHOST_COLLISION_PENALTY: f64 = 100.0;
pub const SCARED_GHOST_BONUS: f64 = 100.0;
pub const STOP_PENALTY: f64 = 100.0;
pub const CAPSULE_BONUS: f64 = 100.0;
