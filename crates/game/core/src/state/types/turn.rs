use std::collections::VecDeque;
use std::time::Duration;

use super::EntityId;

/// Turn rotation and pacing.
///
/// The rotation is a FIFO over every actor that takes turns. The head is the
/// actor whose turn it is; finishing a turn moves it to the tail. The delay
/// between turns is recomputed whenever the population changes as
/// `base_interval / actor_count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    pub rotation: VecDeque<EntityId>,

    /// Set while the head of the rotation is the player and input is expected.
    pub player_turn: bool,

    pub base_interval: Duration,
    pub delay: Duration,

    /// Time left before the next `advance`. `None` when nothing is scheduled.
    pub pending: Option<Duration>,
}

impl TurnState {
    pub fn new(base_interval: Duration) -> Self {
        Self {
            rotation: VecDeque::new(),
            player_turn: false,
            base_interval,
            delay: base_interval,
            pending: None,
        }
    }

    pub fn head(&self) -> Option<EntityId> {
        self.rotation.front().copied()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.rotation.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.rotation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotation.is_empty()
    }

    /// Enqueues a newly added actor at the tail and recomputes the delay.
    pub fn on_actor_added(&mut self, entity: EntityId) {
        if !self.contains(entity) {
            self.rotation.push_back(entity);
        }
        self.recompute_delay();
    }

    /// Drops an actor from the rotation and recomputes the delay.
    ///
    /// The player is never dropped; its death is a flag, not a removal.
    pub fn on_actor_removed(&mut self, entity: EntityId) {
        if entity.is_player() {
            return;
        }
        self.rotation.retain(|queued| *queued != entity);
        self.recompute_delay();
    }

    /// Moves the head to the tail. Returns the rotated actor.
    pub fn rotate(&mut self) -> Option<EntityId> {
        let head = self.rotation.pop_front()?;
        self.rotation.push_back(head);
        Some(head)
    }

    /// Empties the rotation except for the player.
    pub fn retain_player(&mut self) {
        self.rotation.retain(|queued| queued.is_player());
        self.pending = None;
        self.recompute_delay();
    }

    pub fn clear(&mut self) {
        self.rotation.clear();
        self.player_turn = false;
        self.pending = None;
        self.recompute_delay();
    }

    fn recompute_delay(&mut self) {
        self.delay = match u32::try_from(self.rotation.len()) {
            Ok(0) => self.base_interval,
            Ok(count) => self.base_interval / count,
            Err(_) => Duration::ZERO,
        };
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(crate::config::GameConfig::DEFAULT_BASE_TURN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_millis(120);

    #[test]
    fn delay_tracks_population() {
        let mut turn = TurnState::new(BASE);

        for n in 0..6u32 {
            turn.on_actor_added(EntityId(n));
            assert_eq!(turn.delay, BASE / (n + 1));
        }

        turn.on_actor_removed(EntityId(3));
        assert_eq!(turn.delay, BASE / 5);
    }

    #[test]
    fn player_is_never_dropped() {
        let mut turn = TurnState::new(BASE);
        turn.on_actor_added(EntityId::PLAYER);
        turn.on_actor_added(EntityId(1));

        turn.on_actor_removed(EntityId::PLAYER);

        assert!(turn.contains(EntityId::PLAYER));
        assert_eq!(turn.delay, BASE / 2);
    }

    #[test]
    fn rotation_is_stable_fifo() {
        let mut turn = TurnState::new(BASE);
        let ids: Vec<_> = (0..4).map(EntityId).collect();
        for id in &ids {
            turn.on_actor_added(*id);
        }

        let order: Vec<_> = (0..ids.len()).filter_map(|_| turn.rotate()).collect();

        assert_eq!(order, ids);
        assert_eq!(turn.rotation, VecDeque::from(ids));
    }
}
