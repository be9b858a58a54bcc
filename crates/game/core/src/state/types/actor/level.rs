/// Experience curve parameters: the threshold for the next level is
/// `base + current_level * factor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelCurve {
    pub base: i32,
    pub factor: i32,
}

impl LevelCurve {
    pub fn threshold(&self, current_level: i32) -> i32 {
        self.base + current_level * self.factor
    }
}

/// Persistent progression numbers. Only the player's copy is saved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelState {
    pub current_level: i32,
    pub current_xp: i32,
    pub xp_to_next_level: i32,
    pub level_points: i32,
}

impl LevelState {
    pub fn new(curve: LevelCurve) -> Self {
        Self {
            current_level: 1,
            current_xp: 0,
            xp_to_next_level: curve.threshold(1),
            level_points: 0,
        }
    }

    /// Adds experience and levels up at most once.
    ///
    /// Returns true when a level was gained. Excess experience carries over.
    pub fn add_experience(&mut self, xp: i32, curve: LevelCurve) -> bool {
        if xp == 0 || curve.base == 0 {
            return false;
        }

        self.current_xp += xp;

        if self.current_xp < self.xp_to_next_level {
            return false;
        }

        self.current_xp -= self.xp_to_next_level;
        self.current_level += 1;
        self.xp_to_next_level = curve.threshold(self.current_level);
        self.level_points += 1;
        true
    }
}

/// Progression capability: the persistent state plus the experience this
/// actor is worth when killed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    pub state: LevelState,
    pub xp_given: i32,
}

impl Level {
    pub fn new(state: LevelState, xp_given: i32) -> Self {
        Self { state, xp_given }
    }
}
