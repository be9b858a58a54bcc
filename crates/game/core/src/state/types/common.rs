use std::fmt;

/// Unique identifier for any entity tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Placeholder carried by freshly instantiated entities until the
    /// registry assigns a real identifier.
    pub const UNASSIGNED: Self = Self(u32::MAX);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line (euclidean) distance to another cell.
    pub fn distance(self, other: Position) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev distance, the number of king moves between two cells.
    pub fn chebyshev(self, other: Position) -> i32 {
        (other.x - self.x).abs().max((other.y - self.y).abs())
    }

    pub fn offset(self, offset: Offset) -> Position {
        Position::new(self.x + offset.dx, self.y + offset.dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit step on the grid. Each component is -1, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// The eight neighbouring directions, clockwise from north.
    pub const NEIGHBORS: [Offset; 8] = [
        Offset::new(0, 1),
        Offset::new(1, 1),
        Offset::new(1, 0),
        Offset::new(1, -1),
        Offset::new(0, -1),
        Offset::new(-1, -1),
        Offset::new(-1, 0),
        Offset::new(-1, 1),
    ];

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Unit step from `from` towards `to`, clamping each axis to [-1, 1].
    pub fn towards(from: Position, to: Position) -> Self {
        Self::new((to.x - from.x).signum(), (to.y - from.y).signum())
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}
