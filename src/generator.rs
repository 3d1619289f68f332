use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assemble::{assemble, Placement};
use crate::catalog::RoomCatalog;
use crate::geometry::GridPoint;
use crate::grid::CellGrid;
use crate::network::{build_network, report_isolated_rooms, Edge};
use crate::pathplan::plan_paths;
use crate::rooms::{place_rooms, Door, PlacedRoom};

/// Tunables for one generation run.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub grid_size: GridPoint,
    /// World-space length of one cell edge, for the renderer.
    pub cell_scale: f32,
    /// How many rooms to try for; fewer may fit.
    pub max_rooms: usize,
    /// Random (position, rotation) candidates per room slot.
    pub placement_samples: usize,
    /// Minimum Euclidean distance between cells of different rooms.
    pub separation: f32,
    /// Cells kept clear along every grid face.
    pub padding: i32,
    /// Safety bound on each corridor search.
    pub iteration_cap: usize,
    pub seed: u64,
    pub randomize_seed: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            grid_size: GridPoint::new(32, 4, 32),
            cell_scale: 10.0,
            max_rooms: 12,
            placement_samples: 64,
            separation: 3.0,
            padding: 1,
            iteration_cap: 10_000,
            seed: 0,
            randomize_seed: false,
        }
    }
}

/// The finalized layout, handed to the renderer as plain data.
#[derive(Clone, Debug)]
pub struct DungeonLayout {
    pub grid: CellGrid,
    pub rooms: Vec<PlacedRoom>,
    pub doors: Vec<Door>,
    pub edges: Vec<Edge>,
    pub placements: Vec<Placement>,
    pub spawn: Option<GridPoint>,
}

/// Runs the full pipeline: room sampling, spanning network, path planning,
/// layout assembly. Every stage finishes before the next reads its output;
/// the grid passes from stage to stage by explicit borrow.
pub fn generate(config: &GeneratorConfig, catalog: &RoomCatalog) -> DungeonLayout {
    let seed = if config.randomize_seed {
        rand::random()
    } else {
        config.seed
    };
    let mut rng = StdRng::seed_from_u64(seed);
    info!("Generating dungeon layout with seed {}", seed);

    let mut grid = CellGrid::new(config.grid_size);

    let placement = place_rooms(&mut grid, catalog, config, &mut rng);
    info!(
        "Placed {} of {} rooms, exposing {} doors",
        placement.rooms.len(),
        config.max_rooms,
        placement.doors.len()
    );

    #[cfg(feature = "debug_images")]
    crate::map_image::save_layer_maps(&grid, &[], "D-01 rooms");

    let mut edges = build_network(&placement.doors);
    info!("Spanning network holds {} corridors", edges.len());
    report_isolated_rooms(&placement.rooms, &placement.doors, &edges);

    plan_paths(&mut grid, &mut edges, config.iteration_cap);

    let placements = assemble(&grid, &edges, &placement.doors);
    info!("Assembled {} placements", placements.len());

    DungeonLayout {
        grid,
        rooms: placement.rooms,
        doors: placement.doors,
        edges,
        placements,
        spawn: placement.spawn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use crate::grid::CellKind;
    use crate::rooms::Door;

    fn test_config() -> GeneratorConfig {
        GeneratorConfig {
            grid_size: GridPoint::new(24, 4, 24),
            max_rooms: 6,
            placement_samples: 128,
            separation: 2.0,
            padding: 1,
            seed: 41,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let config = test_config();
        let catalog = RoomCatalog::demo();

        let a = generate(&config, &catalog);
        let b = generate(&config, &catalog);

        assert_eq!(a.grid, b.grid);
        assert_eq!(a.doors, b.doors);
        assert_eq!(a.placements, b.placements);
        assert_eq!(a.spawn, b.spawn);
        assert_eq!(a.edges.len(), b.edges.len());
        for (edge_a, edge_b) in a.edges.iter().zip(b.edges.iter()) {
            assert_eq!(edge_a.path, edge_b.path);
            assert_eq!(edge_a.sub_edges, edge_b.sub_edges);
        }
    }

    #[test]
    fn room_cells_survive_the_whole_pipeline() {
        let layout = generate(&test_config(), &RoomCatalog::demo());

        for room in &layout.rooms {
            for &cell in &room.cells {
                assert_eq!(CellKind::Room, layout.grid.get(cell));
            }
        }
    }

    #[test]
    fn path_points_are_never_left_unclassified() {
        let layout = generate(&test_config(), &RoomCatalog::demo());

        for edge in &layout.edges {
            for &point in &edge.path {
                assert_ne!(CellKind::Empty, layout.grid.get(point));
            }
        }
    }

    #[test]
    fn two_lone_rooms_connect_with_one_corridor() {
        // Minimal fixed scene: a spawn room cell at the origin corner and a
        // boss room cell mid-grid, one door each.
        let mut grid = CellGrid::new(GridPoint::new(10, 3, 10));
        grid.set(GridPoint::new(0, 0, 0), CellKind::Room);
        grid.set(GridPoint::new(5, 0, 5), CellKind::Room);
        let doors = vec![
            Door {
                pos: GridPoint::new(1, 0, 0),
                dir: Direction::PosX,
                owner: 0,
            },
            Door {
                pos: GridPoint::new(4, 0, 5),
                dir: Direction::NegX,
                owner: 1,
            },
        ];

        let mut edges = build_network(&doors);
        assert_eq!(1, edges.len());

        plan_paths(&mut grid, &mut edges, 10_000);

        assert!(!edges[0].path.is_empty());
        assert_eq!(Some(&doors[0].pos), edges[0].path.first());
        assert_eq!(Some(&doors[1].pos), edges[0].path.last());
    }

    #[test]
    fn layout_works_without_any_body_rooms() {
        let mut catalog = RoomCatalog::demo();
        catalog.rooms.clear();

        let layout = generate(&test_config(), &catalog);

        assert!(layout.rooms.len() <= 2);
    }
}
