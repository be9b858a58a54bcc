use std::collections::BTreeSet;

use game_core::{FieldOfView, MapMemory, Position};

/// Circular field of view with Bresenham line-of-sight.
///
/// A cell is visible when the line towards it, in either direction, crosses
/// only transparent cells, which keeps visibility symmetric between two cells.
/// Opaque cells are visible themselves; they only hide what lies behind them.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineOfSightFov;

impl FieldOfView for LineOfSightFov {
    fn compute(&self, map: &MapMemory, origin: Position, range: u32) -> BTreeSet<Position> {
        let mut visible = BTreeSet::new();
        if !map.in_bounds(origin) {
            return visible;
        }
        visible.insert(origin);

        let radius = i32::try_from(range).unwrap_or(i32::MAX / 2);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let target = Position::new(origin.x + dx, origin.y + dy);
                if !map.in_bounds(target) || target == origin {
                    continue;
                }
                if clear_between(map, origin, target) || clear_between(map, target, origin) {
                    visible.insert(target);
                }
            }
        }
        visible
    }
}

/// Whether every cell strictly between `from` and `to` is transparent.
fn clear_between(map: &MapMemory, from: Position, to: Position) -> bool {
    bresenham(from, to)
        .into_iter()
        .filter(|cell| *cell != from && *cell != to)
        .all(|cell| map.is_transparent(cell))
}

fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut cells = Vec::new();
    let (mut x, mut y) = (from.x, from.y);
    let mut error = dx + dy;
    loop {
        cells.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += sx;
        }
        if doubled <= dx {
            error += dx;
            y += sy;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use game_core::TileKind;

    use super::*;

    fn room_with_pillar() -> MapMemory {
        let mut map = MapMemory::new(9, 9);
        for x in 0..9 {
            for y in 0..9 {
                map.set_tile(Position::new(x, y), TileKind::Floor);
            }
        }
        map.set_tile(Position::new(4, 2), TileKind::Wall);
        map
    }

    #[test]
    fn pillar_casts_a_shadow() {
        let map = room_with_pillar();

        let visible = LineOfSightFov.compute(&map, Position::new(4, 4), 8);

        assert!(visible.contains(&Position::new(4, 2)));
        assert!(!visible.contains(&Position::new(4, 0)));
        assert!(visible.contains(&Position::new(3, 3)));
    }

    #[test]
    fn range_bounds_the_circle() {
        let map = room_with_pillar();

        let visible = LineOfSightFov.compute(&map, Position::new(0, 8), 2);

        assert!(visible.contains(&Position::new(2, 8)));
        assert!(!visible.contains(&Position::new(3, 8)));
        assert!(!visible.contains(&Position::new(2, 6)));
    }

    #[test]
    fn visibility_is_symmetric() {
        let map = room_with_pillar();
        let a = Position::new(1, 4);
        let b = Position::new(6, 1);

        let from_a = LineOfSightFov.compute(&map, a, 8).contains(&b);
        let from_b = LineOfSightFov.compute(&map, b, 8).contains(&a);

        assert_eq!(from_a, from_b);
    }
}
