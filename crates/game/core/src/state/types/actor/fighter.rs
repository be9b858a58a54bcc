use crate::state::EntityId;

/// Persistent combat numbers of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterState {
    pub max_hp: i32,
    pub hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
}

impl FighterState {
    pub fn new(max_hp: i32, base_defense: i32, base_power: i32) -> Self {
        Self {
            max_hp,
            hp: max_hp,
            base_defense,
            base_power,
        }
    }
}

/// Combat capability of an actor.
///
/// `target` is transient: it is reassigned by the pursue policy on the first
/// turn after a restore and is never written into a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Fighter {
    pub state: FighterState,
    pub target: Option<EntityId>,
}

impl Fighter {
    pub fn new(state: FighterState) -> Self {
        Self {
            state,
            target: None,
        }
    }

    #[inline]
    pub fn hp(&self) -> i32 {
        self.state.hp
    }

    #[inline]
    pub fn max_hp(&self) -> i32 {
        self.state.max_hp
    }

    /// Sets hit points clamped to `[0, max_hp]`.
    ///
    /// Returns true when the new value is zero, which the caller turns into a
    /// death transition.
    pub fn set_hp(&mut self, value: i32) -> bool {
        self.state.hp = value.clamp(0, self.state.max_hp.max(0));
        self.state.hp == 0
    }

    /// Restores up to `amount` hit points and returns how many were recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.state.hp >= self.state.max_hp {
            return 0;
        }

        let new_hp = (self.state.hp + amount).min(self.state.max_hp);
        let recovered = new_hp - self.state.hp;
        self.state.hp = new_hp;
        recovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_hp_clamps_at_zero_and_reports_death() {
        let mut fighter = Fighter::new(FighterState::new(10, 0, 3));

        assert!(fighter.set_hp(10 - 12));
        assert_eq!(fighter.hp(), 0);
    }

    #[test]
    fn set_hp_never_exceeds_max() {
        let mut fighter = Fighter::new(FighterState::new(10, 0, 3));

        assert!(!fighter.set_hp(25));
        assert_eq!(fighter.hp(), 10);
    }

    #[test]
    fn heal_reports_recovered_amount() {
        let mut fighter = Fighter::new(FighterState::new(30, 2, 5));
        fighter.set_hp(28);

        assert_eq!(fighter.heal(4), 2);
        assert_eq!(fighter.heal(4), 0);
    }
}
