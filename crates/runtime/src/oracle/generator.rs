use std::collections::BTreeMap;

use game_core::{DungeonGenerator, GeneratedFloor, GenerationParams, Offset, Position, Room, TileKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Rectangular rooms joined by L-shaped corridors.
///
/// Rooms are placed at random and rejected when they overlap an earlier one.
/// Each accepted room is tunnelled to the previous one. The last room holds
/// the down stairs; below the first floor the first room holds the up stairs.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoomsAndCorridors;

impl DungeonGenerator for RoomsAndCorridors {
    fn generate(&self, params: &GenerationParams) -> GeneratedFloor {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut floor = GeneratedFloor::default();
        let min_size = params.room_min_size.min(params.room_max_size).max(3);
        let max_size = params.room_max_size.max(min_size);

        for _ in 0..params.max_rooms {
            let width = rng.gen_range(min_size..=max_size);
            let height = rng.gen_range(min_size..=max_size);
            if width >= params.width || height >= params.height {
                continue;
            }
            let room = Room::new(
                rng.gen_range(0..params.width - width),
                rng.gen_range(0..params.height - height),
                width,
                height,
            );
            if floor.rooms.iter().any(|other| room.intersects(other)) {
                continue;
            }

            carve_room(&mut floor.tiles, &room);
            if let Some(previous) = floor.rooms.last() {
                let horizontal_first = rng.gen_bool(0.5);
                carve_tunnel(&mut floor.tiles, previous.center(), room.center(), horizontal_first);
            }
            floor.rooms.push(room);
        }

        if params.floor > 1
            && let Some(first) = floor.rooms.first()
        {
            floor.tiles.insert(first.center(), TileKind::UpStairs);
        }
        if floor.rooms.len() > 1
            && let Some(last) = floor.rooms.last()
        {
            floor.tiles.insert(last.center(), TileKind::DownStairs);
        }

        debug!(
            floor = params.floor,
            rooms = floor.rooms.len(),
            tiles = floor.tiles.len(),
            "floor generated"
        );
        floor
    }
}

fn carve_room(tiles: &mut BTreeMap<Position, TileKind>, room: &Room) {
    for x in room.x..room.x + room.width {
        for y in room.y..room.y + room.height {
            let position = Position::new(x, y);
            if room.contains(position) {
                tiles.insert(position, TileKind::Floor);
            } else {
                tiles.entry(position).or_insert(TileKind::Wall);
            }
        }
    }
}

/// Digs floor along an L from `start` to `end` and walls in the sides.
fn carve_tunnel(
    tiles: &mut BTreeMap<Position, TileKind>,
    start: Position,
    end: Position,
    horizontal_first: bool,
) {
    let corner = if horizontal_first {
        Position::new(end.x, start.y)
    } else {
        Position::new(start.x, end.y)
    };

    for position in segment(start, corner).chain(segment(corner, end)) {
        tiles.insert(position, TileKind::Floor);
        for offset in Offset::NEIGHBORS {
            tiles.entry(position.offset(offset)).or_insert(TileKind::Wall);
        }
    }
}

/// Cells of an axis-aligned segment, both ends included.
fn segment(from: Position, to: Position) -> impl Iterator<Item = Position> {
    let step = Offset::towards(from, to);
    let length = (to.x - from.x).abs().max((to.y - from.y).abs());
    (0..=length).map(move |i| Position::new(from.x + step.dx * i, from.y + step.dy * i))
}
