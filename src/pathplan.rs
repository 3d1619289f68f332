use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use log::warn;

use crate::geometry::{euclidean_distance, manhattan_xz, Axis, Direction, GridPoint};
use crate::grid::{CellGrid, CellKind};
use crate::network::{Edge, SubEdge};

/// Expands every network edge into a concrete path through the grid,
/// inserting staircases where the endpoints sit on different layers.
///
/// Edges are planned strictly in order; each edge's corridor cells are
/// committed to the grid before the next edge is searched, so later
/// corridors route around earlier ones.
pub fn plan_paths(grid: &mut CellGrid, edges: &mut [Edge], iteration_cap: usize) {
    for edge in edges.iter_mut() {
        plan_edge(grid, edge, iteration_cap);
    }
}

fn plan_edge(grid: &mut CellGrid, edge: &mut Edge, iteration_cap: usize) {
    let split = split_at_stairs(grid, edge.v1, edge.v2);

    // Path points are assembled in traversal order: each leg's corridor,
    // then the two cells of the staircase it runs into.
    let mut path: Vec<GridPoint> = Vec::new();
    for (index, sub_edge) in split.sub_edges.iter().enumerate() {
        if index > 0 {
            if let Some(&(first, second)) = split.stair_pairs.get(index - 1) {
                path.push(first);
                path.push(second);
            }
        }
        match search_corridor(grid, sub_edge.start, sub_edge.end, iteration_cap) {
            Some(points) => path.extend(points),
            None => warn!(
                "No corridor found from {:?} to {:?}; leaving the connection incomplete",
                sub_edge.start, sub_edge.end
            ),
        }
    }

    // Corridor cells become hallways; staircase cells keep their kind.
    for &point in &path {
        if grid.get(point) == CellKind::Empty {
            grid.set(point, CellKind::Hallway);
        }
    }

    edge.path = path;
    edge.sub_edges = split.sub_edges;
}

// Vertical phase
//////////////////

struct VerticalSplit {
    sub_edges: Vec<SubEdge>,
    /// Per transition, the staircase cells in traversal order
    /// (departure layer first).
    stair_pairs: Vec<(GridPoint, GridPoint)>,
}

/// Splits an edge into horizontal legs, claiming a staircase column for each
/// layer transition. The elevation step is clamped to one layer at a time;
/// edges spanning several layers get one transition per layer.
fn split_at_stairs(grid: &mut CellGrid, start: GridPoint, end: GridPoint) -> VerticalSplit {
    let mut sub_edges = Vec::new();
    let mut stair_pairs = Vec::new();

    let y_delta = (end.y - start.y).clamp(-1, 1);
    if y_delta == 0 {
        sub_edges.push(SubEdge::new(start, end));
        return VerticalSplit {
            sub_edges,
            stair_pairs,
        };
    }

    let mut previous_exit: Option<GridPoint> = None;
    let mut selected_y = start.y;

    while selected_y != end.y {
        let site = match find_stair_site(grid, selected_y, y_delta, start, end) {
            Some(site) => site,
            None => {
                warn!(
                    "No staircase column free between layers {} and {}; abandoning the climb",
                    selected_y,
                    selected_y + y_delta
                );
                break;
            }
        };
        let bias = ideal_offset(site, end);

        let landing = site + GridPoint::vertical(y_delta);
        grid.set(site, CellKind::Stairs);
        grid.set(landing, CellKind::Stairs);
        stair_pairs.push((site, landing));

        // The corridor aims one cell short of the staircase, leaving the
        // stair cells themselves clear of the search.
        sub_edges.push(SubEdge {
            start: previous_exit.unwrap_or(start),
            end: site - bias,
            stair_bias: stair_exit_direction(bias, y_delta),
        });

        previous_exit = Some(landing + bias);
        selected_y += y_delta;
    }

    // Final leg to the true end point.
    sub_edges.push(SubEdge::new(previous_exit.unwrap_or(start), end));

    VerticalSplit {
        sub_edges,
        stair_pairs,
    }
}

/// Scans the whole layer for the staircase column minimizing combined
/// distance to both endpoints, measured at the arrival layer.
fn find_stair_site(
    grid: &CellGrid,
    layer: i32,
    y_delta: i32,
    start: GridPoint,
    end: GridPoint,
) -> Option<GridPoint> {
    let dims = grid.dims();
    let mut best: Option<(f32, GridPoint)> = None;

    for x in 0..dims.x {
        for z in 0..dims.z {
            let site = GridPoint::new(x, layer, z);
            if !stair_clearance(grid, site, y_delta) {
                continue;
            }
            let landing = site + GridPoint::vertical(y_delta);
            let cost = euclidean_distance(start, landing) + euclidean_distance(end, landing);
            match best {
                Some((lowest, _)) if cost >= lowest => (),
                _ => best = Some((cost, site)),
            }
        }
    }

    best.map(|(_, site)| site)
}

/// A column qualifies only if it and its four side neighbours are empty on
/// both the departure and the arrival layer.
fn stair_clearance(grid: &CellGrid, site: GridPoint, y_delta: i32) -> bool {
    for &layer_step in &[0, y_delta] {
        let center = site + GridPoint::vertical(layer_step);
        if !grid.in_bounds(center) || grid.get(center) != CellKind::Empty {
            return false;
        }
        for direction in Direction::ALL.iter() {
            let side = center + direction.offset();
            if !grid.in_bounds(side) || grid.get(side) != CellKind::Empty {
                return false;
            }
        }
    }
    true
}

/// Unit bias keeping corridor approach points off the staircase column,
/// along the dominant remaining axis towards `end`.
///
/// Axis ties resolve X, then Y, then Z; a dominant vertical axis still
/// biases along x, signed by the vertical distance.
fn ideal_offset(current: GridPoint, end: GridPoint) -> GridPoint {
    let delta = end - current;
    match dominant_axis(delta) {
        Axis::X => GridPoint::new(delta.x.clamp(-1, 1), 0, 0),
        Axis::Y => GridPoint::new(delta.y.clamp(-1, 1), 0, 0),
        Axis::Z => GridPoint::new(0, 0, delta.z.clamp(-1, 1)),
    }
}

fn dominant_axis(delta: GridPoint) -> Axis {
    let (x, y, z) = (delta.x.abs(), delta.y.abs(), delta.z.abs());
    if x >= y && x >= z {
        Axis::X
    } else if y >= x && y >= z {
        Axis::Y
    } else {
        Axis::Z
    }
}

/// Orientation for the staircase a leg runs into: the bias as seen from the
/// arrival side, so descending transitions flip it.
fn stair_exit_direction(bias: GridPoint, y_delta: i32) -> Option<Direction> {
    let oriented = if y_delta < 0 { -bias } else { bias };
    Direction::from_offset(oriented)
}

// Horizontal phase
////////////////////

/// Search nodes live in an arena; the frontier and parent links hold plain
/// indices into it.
struct SearchNode {
    pos: GridPoint,
    parent: Option<usize>,
}

/// Best-first search over one layer, restricted to the four horizontal
/// neighbours. The node cost counts Manhattan distance to BOTH endpoints;
/// that formula is part of the layout's observable shape and is kept as is
/// rather than replaced by admissible A*.
///
/// Returns the path from `start` to `end` inclusive, or None when the search
/// exhausts its frontier or the iteration cap.
fn search_corridor(
    grid: &CellGrid,
    start: GridPoint,
    end: GridPoint,
    iteration_cap: usize,
) -> Option<Vec<GridPoint>> {
    let mut arena = vec![SearchNode {
        pos: start,
        parent: None,
    }];
    let mut frontier: BinaryHeap<(Reverse<i32>, usize)> = BinaryHeap::new();
    frontier.push((Reverse(0), 0));

    let mut in_frontier: HashSet<GridPoint> = HashSet::new();
    in_frontier.insert(start);
    let mut visited: HashSet<GridPoint> = HashSet::new();

    let mut iterations = 0;
    while let Some((_, handle)) = frontier.pop() {
        iterations += 1;
        if iterations > iteration_cap {
            warn!(
                "Corridor search from {:?} to {:?} stopped at the {} iteration cap",
                start, end, iteration_cap
            );
            return None;
        }

        let current = arena[handle].pos;
        in_frontier.remove(&current);
        visited.insert(current);

        if current == end {
            return Some(reconstruct(&arena, handle));
        }

        for direction in Direction::ALL.iter() {
            let neighbour = current + direction.offset();
            if !grid.in_bounds(neighbour) {
                continue;
            }
            if grid.get(neighbour) != CellKind::Empty {
                continue;
            }
            if visited.contains(&neighbour) || in_frontier.contains(&neighbour) {
                continue;
            }

            let cost = manhattan_xz(neighbour, end) + manhattan_xz(neighbour, start);
            arena.push(SearchNode {
                pos: neighbour,
                parent: Some(handle),
            });
            frontier.push((Reverse(cost), arena.len() - 1));
            in_frontier.insert(neighbour);
        }
    }

    None
}

/// Walks parent handles back to the root; an explicit loop, as paths can get
/// long on big grids.
fn reconstruct(arena: &[SearchNode], goal: usize) -> Vec<GridPoint> {
    let mut points = Vec::new();
    let mut cursor = Some(goal);
    while let Some(handle) = cursor {
        points.push(arena[handle].pos);
        cursor = arena[handle].parent;
    }
    points.reverse();
    points
}
