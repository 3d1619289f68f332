use crate::geometry::{Direction, GridPoint};

// What can be placed into the dungeon?
////////////////////////////////////////

/// A doorway of a room template, in local room coordinates. The door cell
/// itself lies outside the footprint; `dir` points away from the room.
#[derive(Clone, Copy, Debug)]
pub struct DoorSpec {
    pub offset: GridPoint,
    pub dir: Direction,
}

/// One placeable room: its occupied cells and doorways, both grid-relative.
#[derive(Clone, Debug)]
pub struct RoomTemplate {
    pub name: String,
    pub footprint: Vec<GridPoint>,
    pub doors: Vec<DoorSpec>,
    /// Interior cell where an avatar may appear, for the spawn room.
    pub spawn_offset: Option<GridPoint>,
}

impl RoomTemplate {
    pub fn new(name: &str, footprint: Vec<GridPoint>, doors: Vec<DoorSpec>) -> Self {
        RoomTemplate {
            name: name.to_string(),
            footprint,
            doors,
            spawn_offset: None,
        }
    }

    pub fn with_spawn_offset(mut self, offset: GridPoint) -> Self {
        self.spawn_offset = Some(offset);
        self
    }
}

/// The ordered room collection the sampler draws from. The first placed room
/// always uses `spawn`, the second always `boss`; the rest draw from `rooms`.
#[derive(Clone, Debug)]
pub struct RoomCatalog {
    pub spawn: RoomTemplate,
    pub boss: RoomTemplate,
    pub rooms: Vec<RoomTemplate>,
}

impl RoomCatalog {
    /// A small handcrafted catalog so the binary runs without external data.
    pub fn demo() -> Self {
        let spawn = RoomTemplate::new(
            "landing",
            vec![
                GridPoint::new(0, 0, 0),
                GridPoint::new(1, 0, 0),
                GridPoint::new(0, 0, 1),
                GridPoint::new(1, 0, 1),
            ],
            vec![
                DoorSpec {
                    offset: GridPoint::new(2, 0, 0),
                    dir: Direction::PosX,
                },
                DoorSpec {
                    offset: GridPoint::new(-1, 0, 1),
                    dir: Direction::NegX,
                },
            ],
        )
        .with_spawn_offset(GridPoint::new(0, 0, 0));

        let boss = RoomTemplate::new(
            "sanctum",
            vec![
                GridPoint::new(0, 0, 0),
                GridPoint::new(1, 0, 0),
                GridPoint::new(2, 0, 0),
                GridPoint::new(0, 0, 1),
                GridPoint::new(1, 0, 1),
                GridPoint::new(2, 0, 1),
                GridPoint::new(0, 0, 2),
                GridPoint::new(1, 0, 2),
                GridPoint::new(2, 0, 2),
            ],
            vec![
                DoorSpec {
                    offset: GridPoint::new(1, 0, -1),
                    dir: Direction::NegZ,
                },
                DoorSpec {
                    offset: GridPoint::new(1, 0, 3),
                    dir: Direction::PosZ,
                },
            ],
        );

        let cell = RoomTemplate::new(
            "cell",
            vec![GridPoint::new(0, 0, 0)],
            vec![
                DoorSpec {
                    offset: GridPoint::new(1, 0, 0),
                    dir: Direction::PosX,
                },
                DoorSpec {
                    offset: GridPoint::new(-1, 0, 0),
                    dir: Direction::NegX,
                },
            ],
        );

        let gallery = RoomTemplate::new(
            "gallery",
            vec![
                GridPoint::new(0, 0, 0),
                GridPoint::new(1, 0, 0),
                GridPoint::new(2, 0, 0),
            ],
            vec![
                DoorSpec {
                    offset: GridPoint::new(1, 0, 1),
                    dir: Direction::PosZ,
                },
                DoorSpec {
                    offset: GridPoint::new(1, 0, -1),
                    dir: Direction::NegZ,
                },
            ],
        );

        let nook = RoomTemplate::new(
            "nook",
            vec![
                GridPoint::new(0, 0, 0),
                GridPoint::new(1, 0, 0),
                GridPoint::new(0, 0, 1),
            ],
            vec![
                DoorSpec {
                    offset: GridPoint::new(2, 0, 0),
                    dir: Direction::PosX,
                },
                DoorSpec {
                    offset: GridPoint::new(0, 0, 2),
                    dir: Direction::PosZ,
                },
            ],
        );

        RoomCatalog {
            spawn,
            boss,
            rooms: vec![cell, gallery, nook],
        }
    }
}
