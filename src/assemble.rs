use crate::geometry::{Direction, GridPoint, Rotation};
use crate::grid::{CellGrid, CellKind};
use crate::network::Edge;
use crate::rooms::Door;

// What should the renderer put where?
///////////////////////////////////////

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlacementKind {
    HallwayFloor,
    HallwayWall,
    Staircase,
    DoorFiller,
}

/// One planned object for the external renderer. The assembler only plans;
/// it never touches a scene.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Placement {
    pub kind: PlacementKind,
    pub position: GridPoint,
    pub rotation: Rotation,
}

impl Placement {
    /// Grid position scaled into world space for the renderer.
    pub fn world_position(&self, cell_scale: f32) -> (f32, f32, f32) {
        (
            self.position.x as f32 * cell_scale,
            self.position.y as f32 * cell_scale,
            self.position.z as f32 * cell_scale,
        )
    }
}

/// Walks every finalized edge path and derives the physical hallway, wall
/// and staircase configuration, then fills doors no corridor ever reached.
///
/// Pure function of its inputs: assembling the same state twice yields the
/// same plan.
pub fn assemble(grid: &CellGrid, edges: &[Edge], doors: &[Door]) -> Vec<Placement> {
    let mut placements = Vec::new();
    // Cells already planned; corridors sharing a cell plan it only once
    // (the open-side union is the same seen from either edge).
    let mut planned = std::collections::HashSet::new();

    for (edge_index, edge) in edges.iter().enumerate() {
        // Which sub-edge's staircase comes next along this path.
        let mut stair_index = 0;

        for (point_index, &point) in edge.path.iter().enumerate() {
            match grid.get(point) {
                CellKind::Hallway => {
                    if !planned.insert(point) {
                        continue;
                    }
                    let open = open_sides(grid, edges, edge_index, point, doors);

                    placements.push(Placement {
                        kind: PlacementKind::HallwayFloor,
                        position: point,
                        rotation: Rotation::R0,
                    });
                    for direction in Direction::ALL.iter() {
                        if !open[direction.index()] {
                            placements.push(Placement {
                                kind: PlacementKind::HallwayWall,
                                position: point,
                                rotation: direction.facing_rotation(),
                            });
                        }
                    }
                }
                CellKind::Stairs => {
                    // Place the staircase object once per vertical pair, at
                    // the cell sitting below its path neighbour.
                    let above = point + GridPoint::vertical(1);
                    let next_is_above = edge.path.get(point_index + 1) == Some(&above);
                    let previous_is_above =
                        point_index > 0 && edge.path.get(point_index - 1) == Some(&above);

                    if next_is_above || previous_is_above {
                        let rotation = edge
                            .sub_edges
                            .get(stair_index)
                            .and_then(|sub_edge| sub_edge.stair_bias)
                            .map_or(Rotation::R0, Direction::facing_rotation);
                        placements.push(Placement {
                            kind: PlacementKind::Staircase,
                            position: point,
                            rotation,
                        });
                        stair_index += 1;
                    }
                }
                CellKind::Room | CellKind::Empty => (),
            }
        }
    }

    // Doors no corridor ever attached to get filled in, facing the doorway.
    for door in doors {
        let used = edges
            .iter()
            .any(|edge| edge.v1 == door.pos || edge.v2 == door.pos);
        if !used {
            placements.push(Placement {
                kind: PlacementKind::DoorFiller,
                position: door.pos,
                rotation: door.dir.opposite().facing_rotation(),
            });
        }
    }

    placements
}

/// Which of the four sides of a hallway cell stay open (wall-free).
fn open_sides(
    grid: &CellGrid,
    edges: &[Edge],
    edge_index: usize,
    point: GridPoint,
    doors: &[Door],
) -> [bool; 4] {
    let mut open = [false; 4];

    // A doorway cell opens back into its room.
    if let Some(door) = doors.iter().find(|door| door.pos == point) {
        open[door.dir.opposite().index()] = true;
    }

    // Neighbouring path points of the owning edge.
    mark_adjacent_path_points(&mut open, &edges[edge_index].path, point);

    // Corridors of other edges crossing through this very cell.
    for (other_index, other) in edges.iter().enumerate() {
        if other_index != edge_index && other.path.contains(&point) {
            mark_adjacent_path_points(&mut open, &other.path, point);
        }
    }

    // Stairs directly alongside.
    for direction in Direction::ALL.iter() {
        let side = point + direction.offset();
        if grid.in_bounds(side) && grid.get(side) == CellKind::Stairs {
            open[direction.index()] = true;
        }
    }

    open
}

fn mark_adjacent_path_points(open: &mut [bool; 4], path: &[GridPoint], point: GridPoint) {
    for &other in path {
        if other == point {
            continue;
        }
        for direction in Direction::ALL.iter() {
            if other == point + direction.offset() {
                open[direction.index()] = true;
            }
        }
    }
}
