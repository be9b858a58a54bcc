use std::collections::{BTreeMap, VecDeque};

use game_core::{MapMemory, Offset, Pathfinder, Position};

/// Breadth-first search over walkable tiles; returns the first step of a
/// shortest path. Actors are not obstacles here, a step into an occupied cell
/// is resolved by the move rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsPathfinder;

impl Pathfinder for BfsPathfinder {
    fn direction_towards(&self, map: &MapMemory, origin: Position, target: Position) -> Offset {
        if origin == target {
            return Offset::ZERO;
        }

        let mut came_from: BTreeMap<Position, Position> = BTreeMap::new();
        let mut frontier = VecDeque::from([origin]);
        came_from.insert(origin, origin);

        while let Some(current) = frontier.pop_front() {
            if current == target {
                return first_step(&came_from, origin, target);
            }
            for offset in Offset::NEIGHBORS {
                let next = current.offset(offset);
                if came_from.contains_key(&next) {
                    continue;
                }
                if next == target || map.is_walkable(next) {
                    came_from.insert(next, current);
                    frontier.push_back(next);
                }
            }
        }

        Offset::ZERO
    }
}

fn first_step(came_from: &BTreeMap<Position, Position>, origin: Position, target: Position) -> Offset {
    let mut step = target;
    while let Some(previous) = came_from.get(&step).copied() {
        if previous == origin {
            return Offset::towards(origin, step);
        }
        step = previous;
    }
    Offset::ZERO
}
