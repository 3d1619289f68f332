use std::collections::HashMap;

use log::warn;
use pathfinding::prelude::connected_components;

use crate::geometry::{sub_unit_distance, Direction, GridPoint};
use crate::rooms::{Door, PlacedRoom};

/// One horizontal leg of an edge, split at staircase transitions.
///
/// `stair_bias` is the unit direction used to orient the staircase this leg
/// runs into; the final leg of an edge carries none.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubEdge {
    pub start: GridPoint,
    pub end: GridPoint,
    pub stair_bias: Option<Direction>,
}

impl SubEdge {
    pub fn new(start: GridPoint, end: GridPoint) -> Self {
        SubEdge {
            start,
            end,
            stair_bias: None,
        }
    }
}

/// A planned connection between two doors. Created here with empty `path`
/// and `sub_edges`; the path planner fills both in, immutable thereafter.
#[derive(Clone, Debug)]
pub struct Edge {
    pub v1: GridPoint,
    pub v2: GridPoint,
    pub path: Vec<GridPoint>,
    pub sub_edges: Vec<SubEdge>,
}

impl Edge {
    pub fn new(v1: GridPoint, v2: GridPoint) -> Self {
        Edge {
            v1,
            v2,
            path: Vec::new(),
            sub_edges: Vec::new(),
        }
    }
}

/// Builds a greedy spanning network over all doors.
///
/// Grows from the first door by repeatedly taking the pending door nearest to
/// the door selected last, then rechecking the whole network for a closer
/// attachment point. The recheck makes this deliberately NOT textbook Prim:
/// the resulting network can be sub-optimal, and a room whose doors only ever
/// pair with their own room can end up unconnected. Both are accepted;
/// `report_isolated_rooms` surfaces the latter.
pub fn build_network(doors: &[Door]) -> Vec<Edge> {
    let mut edges = Vec::new();
    if doors.is_empty() {
        return edges;
    }

    let mut selected = doors[0];
    let mut used: Vec<Door> = vec![selected];
    let mut pending: Vec<Door> = doors[1..].to_vec();

    while !pending.is_empty() {
        // Pending door nearest to the most recently connected one.
        let mut closest_dist = u64::MAX;
        let mut closest_index = 0;
        for (index, door) in pending.iter().enumerate() {
            let dist = sub_unit_distance(selected.pos, door.pos);
            if dist < closest_dist {
                closest_dist = dist;
                closest_index = index;
            }
        }
        let chosen = pending.remove(closest_index);

        // A door already in the network may be closer still; if so, attach
        // the new corridor there instead.
        let mut source = selected;
        for &door in &used {
            let dist = sub_unit_distance(door.pos, chosen.pos);
            if dist < closest_dist {
                closest_dist = dist;
                source = door;
            }
        }

        // Two doors of the same room make no corridor; the door is still
        // consumed, which can leave its room hanging on a later edge.
        if source.owner != chosen.owner {
            edges.push(Edge::new(source.pos, chosen.pos));
        }

        selected = chosen;
        used.push(chosen);
    }

    edges
}

/// Post-pass: warn about rooms the greedy network failed to bridge.
pub fn report_isolated_rooms(rooms: &[PlacedRoom], doors: &[Door], edges: &[Edge]) {
    if rooms.len() < 2 {
        return;
    }

    let owner_of: HashMap<GridPoint, usize> =
        doors.iter().map(|door| (door.pos, door.owner)).collect();

    let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
    for edge in edges {
        if let (Some(&a), Some(&b)) = (owner_of.get(&edge.v1), owner_of.get(&edge.v2)) {
            adjacency.entry(a).or_insert_with(Vec::new).push(b);
            adjacency.entry(b).or_insert_with(Vec::new).push(a);
        }
    }

    let ordinals: Vec<usize> = rooms.iter().map(|room| room.ordinal).collect();
    let components = connected_components(&ordinals, |ordinal| {
        adjacency.get(ordinal).cloned().unwrap_or_default()
    });

    let spawn_ordinal = rooms[0].ordinal;
    for room in rooms {
        let reachable = components
            .iter()
            .any(|component| component.contains(&room.ordinal) && component.contains(&spawn_ordinal));
        if !reachable {
            warn!(
                "Room {} ({}) is not connected to the spawn room",
                room.ordinal, room.name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door(x: i32, z: i32, owner: usize) -> Door {
        Door {
            pos: GridPoint::new(x, 0, z),
            dir: Direction::PosX,
            owner,
        }
    }

    #[test]
    fn no_doors_no_edges() {
        assert!(build_network(&[]).is_empty());
    }

    #[test]
    fn two_rooms_one_edge() {
        let doors = [door(0, 0, 0), door(5, 5, 1)];
        let edges = build_network(&doors);

        assert_eq!(1, edges.len());
        assert_eq!(GridPoint::new(0, 0, 0), edges[0].v1);
        assert_eq!(GridPoint::new(5, 0, 5), edges[0].v2);
    }

    #[test]
    fn same_room_doors_make_no_edge() {
        let doors = [door(0, 0, 0), door(3, 0, 0)];
        assert!(build_network(&doors).is_empty());
    }

    #[test]
    fn network_spans_in_nearest_first_order() {
        // Chain of three rooms along the x axis; each link picks the door
        // nearest to the one selected last.
        let doors = [door(0, 0, 0), door(4, 0, 1), door(9, 0, 2)];
        let edges = build_network(&doors);

        assert_eq!(2, edges.len());
        assert_eq!(GridPoint::new(0, 0, 0), edges[0].v1);
        assert_eq!(GridPoint::new(4, 0, 0), edges[0].v2);
        assert_eq!(GridPoint::new(4, 0, 0), edges[1].v1);
        assert_eq!(GridPoint::new(9, 0, 0), edges[1].v2);
    }

    #[test]
    fn closer_used_door_becomes_the_source() {
        // The walk detours to (0,1) first. The next pending door at (3,0) is
        // nearest to that detour door, but the recheck finds the very first
        // door at (0,0) closer still and attaches the corridor there.
        let doors = [door(0, 0, 0), door(3, 0, 1), door(6, 0, 2), door(0, 1, 3)];
        let edges = build_network(&doors);

        assert_eq!(3, edges.len());
        assert_eq!(GridPoint::new(0, 0, 0), edges[0].v1);
        assert_eq!(GridPoint::new(0, 0, 1), edges[0].v2);
        assert_eq!(GridPoint::new(0, 0, 0), edges[1].v1);
        assert_eq!(GridPoint::new(3, 0, 0), edges[1].v2);
        assert_eq!(GridPoint::new(3, 0, 0), edges[2].v1);
        assert_eq!(GridPoint::new(6, 0, 0), edges[2].v2);
    }
}
