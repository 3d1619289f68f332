use log::warn;
use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::{RoomCatalog, RoomTemplate};
use crate::generator::GeneratorConfig;
use crate::geometry::{euclidean_distance, Direction, GridPoint, Rotation};
use crate::grid::{CellGrid, CellKind};

/// A doorway exposed by a placed room, in grid coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Door {
    pub pos: GridPoint,
    pub dir: Direction,
    /// Ordinal of the owning room (the Nth room placed).
    pub owner: usize,
}

/// A room accepted by the sampler.
#[derive(Clone, Debug)]
pub struct PlacedRoom {
    pub name: String,
    pub anchor: GridPoint,
    pub rotation: Rotation,
    pub cells: Vec<GridPoint>,
    pub ordinal: usize,
}

/// Everything the sampler hands to the later stages.
#[derive(Clone, Debug)]
pub struct RoomPlacement {
    pub rooms: Vec<PlacedRoom>,
    pub doors: Vec<Door>,
    pub spawn: Option<GridPoint>,
}

/// Rejection-samples up to `max_rooms` rooms onto the grid.
///
/// Each room slot draws up to `placement_samples` random (position, rotation)
/// candidates and keeps the first valid one. Slots whose budget runs out are
/// skipped; the result may hold fewer rooms than asked for.
pub fn place_rooms(
    grid: &mut CellGrid,
    catalog: &RoomCatalog,
    config: &GeneratorConfig,
    rng: &mut StdRng,
) -> RoomPlacement {
    let mut rooms: Vec<PlacedRoom> = Vec::new();
    let mut doors: Vec<Door> = Vec::new();
    let mut spawn = None;
    // Cells taken by earlier rooms, for the separation check. Much cheaper
    // than rescanning the whole grid per candidate.
    let mut occupied: Vec<GridPoint> = Vec::new();

    let dims = grid.dims();

    // Without a room body to draw from, only the spawn and boss slots exist.
    let slots = if catalog.rooms.is_empty() {
        config.max_rooms.min(2)
    } else {
        config.max_rooms
    };

    for slot in 0..slots {
        let mut placed = false;

        for _ in 0..config.placement_samples {
            let template = match slot {
                0 => &catalog.spawn,
                1 => &catalog.boss,
                _ => &catalog.rooms[rng.gen_range(0..catalog.rooms.len())],
            };
            let anchor = GridPoint::new(
                rng.gen_range(0..dims.x),
                rng.gen_range(0..dims.y),
                rng.gen_range(0..dims.z),
            );
            let rotation = Rotation::ALL[rng.gen_range(0..Rotation::ALL.len())];

            let cells: Vec<GridPoint> = template
                .footprint
                .iter()
                .map(|&offset| anchor + rotation.apply(offset))
                .collect();

            if !placement_is_valid(grid, &cells, &occupied, config) {
                continue;
            }

            let ordinal = rooms.len();
            for &cell in &cells {
                grid.set(cell, CellKind::Room);
                occupied.push(cell);
            }
            record_doors(grid, template, anchor, rotation, ordinal, &mut doors);

            if slot == 0 {
                if let Some(offset) = template.spawn_offset {
                    spawn = Some(anchor + rotation.apply(offset));
                }
            }

            rooms.push(PlacedRoom {
                name: template.name.clone(),
                anchor,
                rotation,
                cells,
                ordinal,
            });
            placed = true;
            break;
        }

        if !placed {
            warn!(
                "No valid placement for room slot {} within {} samples; skipping it",
                slot, config.placement_samples
            );
        }
    }

    RoomPlacement {
        rooms,
        doors,
        spawn,
    }
}

fn placement_is_valid(
    grid: &CellGrid,
    cells: &[GridPoint],
    occupied: &[GridPoint],
    config: &GeneratorConfig,
) -> bool {
    let dims = grid.dims();

    for &cell in cells {
        if !grid.in_bounds(cell) {
            return false;
        }
        if grid.get(cell) != CellKind::Empty {
            return false;
        }
        // Keep clear of the configured band along every grid face.
        if cell.x > dims.x - config.padding
            || cell.x < config.padding
            || cell.y > dims.y - config.padding
            || cell.y < config.padding
            || cell.z > dims.z - config.padding
            || cell.z < config.padding
        {
            return false;
        }
        for &point in occupied {
            if euclidean_distance(cell, point) < config.separation {
                return false;
            }
        }
    }

    true
}

fn record_doors(
    grid: &CellGrid,
    template: &RoomTemplate,
    anchor: GridPoint,
    rotation: Rotation,
    ordinal: usize,
    doors: &mut Vec<Door>,
) {
    for door in &template.doors {
        let pos = anchor + rotation.apply(door.offset);
        // Doors rotated out of the grid are dropped; the room still stands.
        if grid.in_bounds(pos) {
            doors.push(Door {
                pos,
                dir: door.dir.rotated(rotation),
                owner: ordinal,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_config() -> GeneratorConfig {
        GeneratorConfig {
            grid_size: GridPoint::new(24, 3, 24),
            max_rooms: 8,
            placement_samples: 128,
            separation: 2.0,
            padding: 1,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn footprints_stay_in_bounds_and_marked() {
        let config = test_config();
        let mut grid = CellGrid::new(config.grid_size);
        let mut rng = StdRng::seed_from_u64(7);

        let placement = place_rooms(&mut grid, &RoomCatalog::demo(), &config, &mut rng);

        assert!(!placement.rooms.is_empty());
        for room in &placement.rooms {
            for &cell in &room.cells {
                assert!(grid.in_bounds(cell));
                assert_eq!(CellKind::Room, grid.get(cell));
            }
        }
    }

    #[test]
    fn footprints_do_not_overlap() {
        let config = test_config();
        let mut grid = CellGrid::new(config.grid_size);
        let mut rng = StdRng::seed_from_u64(11);

        let placement = place_rooms(&mut grid, &RoomCatalog::demo(), &config, &mut rng);

        let mut seen = std::collections::HashSet::new();
        for room in &placement.rooms {
            for &cell in &room.cells {
                assert!(seen.insert(cell), "cell {:?} claimed twice", cell);
            }
        }
    }

    #[test]
    fn separation_distance_is_honoured() {
        let config = test_config();
        let mut grid = CellGrid::new(config.grid_size);
        let mut rng = StdRng::seed_from_u64(13);

        let placement = place_rooms(&mut grid, &RoomCatalog::demo(), &config, &mut rng);

        for a in &placement.rooms {
            for b in &placement.rooms {
                if a.ordinal == b.ordinal {
                    continue;
                }
                for &cell_a in &a.cells {
                    for &cell_b in &b.cells {
                        assert!(
                            euclidean_distance(cell_a, cell_b) >= config.separation,
                            "rooms {} and {} are {} apart",
                            a.ordinal,
                            b.ordinal,
                            euclidean_distance(cell_a, cell_b),
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn door_owners_are_placed_room_ordinals() {
        let config = test_config();
        let mut grid = CellGrid::new(config.grid_size);
        let mut rng = StdRng::seed_from_u64(17);

        let placement = place_rooms(&mut grid, &RoomCatalog::demo(), &config, &mut rng);

        for door in &placement.doors {
            assert!(door.owner < placement.rooms.len());
            assert!(grid.in_bounds(door.pos));
        }
    }

    #[test]
    fn spawn_point_lies_in_the_first_room() {
        let config = test_config();
        let mut grid = CellGrid::new(config.grid_size);
        let mut rng = StdRng::seed_from_u64(19);

        let placement = place_rooms(&mut grid, &RoomCatalog::demo(), &config, &mut rng);

        let spawn = placement.spawn.expect("spawn room placed");
        assert!(placement.rooms[0].cells.contains(&spawn));
    }

    #[test]
    fn same_seed_places_identically() {
        let config = test_config();
        let catalog = RoomCatalog::demo();

        let mut grid_a = CellGrid::new(config.grid_size);
        let mut rng_a = StdRng::seed_from_u64(23);
        let a = place_rooms(&mut grid_a, &catalog, &config, &mut rng_a);

        let mut grid_b = CellGrid::new(config.grid_size);
        let mut rng_b = StdRng::seed_from_u64(23);
        let b = place_rooms(&mut grid_b, &catalog, &config, &mut rng_b);

        assert_eq!(a.doors, b.doors);
        assert_eq!(a.spawn, b.spawn);
        assert_eq!(a.rooms.len(), b.rooms.len());
    }
}
