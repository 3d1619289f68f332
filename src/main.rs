//! Dungrid - grid-based dungeon layout generator

mod assemble;
mod catalog;
mod generator;
mod geometry;
mod grid;
mod map_image;
mod network;
mod pathplan;
mod rooms;

use crate::catalog::RoomCatalog;
use crate::generator::{generate, GeneratorConfig};
use crate::geometry::GridPoint;

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    // Read arguments
    // **************
    let matches = matches();
    let defaults = GeneratorConfig::default();

    let config = GeneratorConfig {
        grid_size: GridPoint::new(
            matches
                .value_of("grid_x")
                .map(parse_i64_or_exit)
                .map(|v| v as i32)
                .unwrap_or(defaults.grid_size.x),
            matches
                .value_of("grid_y")
                .map(parse_i64_or_exit)
                .map(|v| v as i32)
                .unwrap_or(defaults.grid_size.y),
            matches
                .value_of("grid_z")
                .map(parse_i64_or_exit)
                .map(|v| v as i32)
                .unwrap_or(defaults.grid_size.z),
        ),
        cell_scale: matches
            .value_of("scale")
            .map(parse_f32_or_exit)
            .unwrap_or(defaults.cell_scale),
        max_rooms: matches
            .value_of("rooms")
            .map(parse_i64_or_exit)
            .map(|v| v as usize)
            .unwrap_or(defaults.max_rooms),
        placement_samples: matches
            .value_of("samples")
            .map(parse_i64_or_exit)
            .map(|v| v as usize)
            .unwrap_or(defaults.placement_samples),
        separation: matches
            .value_of("separation")
            .map(parse_f32_or_exit)
            .unwrap_or(defaults.separation),
        padding: matches
            .value_of("padding")
            .map(parse_i64_or_exit)
            .map(|v| v as i32)
            .unwrap_or(defaults.padding),
        iteration_cap: matches
            .value_of("iteration_cap")
            .map(parse_i64_or_exit)
            .map(|v| v as usize)
            .unwrap_or(defaults.iteration_cap),
        seed: matches
            .value_of("seed")
            .map(parse_i64_or_exit)
            .map(|v| v as u64)
            .unwrap_or(defaults.seed),
        randomize_seed: matches.is_present("randomize_seed"),
    };


    // Layout generation
    // *****************
    let catalog = RoomCatalog::demo();
    let layout = generate(&config, &catalog);

    println!(
        "Placed {} rooms exposing {} doors",
        layout.rooms.len(),
        layout.doors.len()
    );
    println!(
        "Planned {} corridors into {} placements",
        layout.edges.len(),
        layout.placements.len()
    );
    match layout.spawn {
        Some(spawn) => println!("Avatar spawn at grid {:?}", spawn),
        None => println!("No spawn room placed; avatar placement left to the caller"),
    }

    if matches.is_present("print_plan") {
        print_plan(&layout, config.cell_scale);
    }


    // Map export
    // **********
    if let Some(prefix) = matches.value_of("maps") {
        map_image::save_layer_maps(&layout.grid, &layout.edges, prefix);
    }
}

// Dump the finalized layout the way the renderer will consume it.
fn print_plan(layout: &generator::DungeonLayout, cell_scale: f32) {
    for room in &layout.rooms {
        println!(
            "room {:>3}  {:<12} anchored {:?} facing {}deg",
            room.ordinal,
            room.name,
            room.anchor,
            room.rotation.degrees()
        );
    }
    for placement in &layout.placements {
        let (x, y, z) = placement.world_position(cell_scale);
        println!(
            "{:?} at ({}, {}, {}) facing {}deg",
            placement.kind,
            x,
            y,
            z,
            placement.rotation.degrees()
        );
    }
}

fn parse_i64_or_exit(string: &str) -> i64 {
    string.parse::<i64>().unwrap_or_else(|_| {
        eprintln!("Not an integer: {}", string);
        std::process::exit(1);
    })
}

fn parse_f32_or_exit(string: &str) -> f32 {
    string.parse::<f32>().unwrap_or_else(|_| {
        eprintln!("Not a number: {}", string);
        std::process::exit(1);
    })
}

fn matches() -> clap::ArgMatches<'static> {
    clap::App::new("dungrid - grid-based dungeon layout generator.")
        .set_term_width(80)
        .version(clap::crate_version!())
        .arg(
            clap::Arg::with_name("grid_x")
                .short("-x")
                .long("grid-x")
                .value_name("cell count")
                .help("Grid size along the x axis.")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("grid_y")
                .short("-y")
                .long("grid-y")
                .value_name("cell count")
                .help("Grid size along the vertical axis (layer count).")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("grid_z")
                .short("-z")
                .long("grid-z")
                .value_name("cell count")
                .help("Grid size along the z axis.")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("scale")
                .long("scale")
                .value_name("length")
                .help("World-space length of one cell edge.")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("rooms")
                .short("-r")
                .long("rooms")
                .value_name("count")
                .help("Room budget. Fewer rooms may fit.")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("samples")
                .long("samples")
                .value_name("count")
                .help("Placement candidates drawn per room slot.")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("separation")
                .long("separation")
                .value_name("distance")
                .help("Minimum distance between cells of different rooms.")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("padding")
                .long("padding")
                .value_name("cell count")
                .help("Cells kept clear of rooms along every grid face.")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("iteration_cap")
                .long("iteration-cap")
                .value_name("count")
                .help("Safety bound on each corridor search.")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("seed")
                .short("-s")
                .long("seed")
                .value_name("seed")
                .help("Random seed. The same seed reproduces the same layout.")
                .takes_value(true)
                .number_of_values(1)
                .allow_hyphen_values(true),
        )
        .arg(
            clap::Arg::with_name("randomize_seed")
                .long("randomize-seed")
                .help("Draw a fresh seed instead of using --seed."),
        )
        .arg(
            clap::Arg::with_name("print_plan")
                .long("print-plan")
                .help("Print every placement in world coordinates."),
        )
        .arg(
            clap::Arg::with_name("maps")
                .short("-m")
                .long("maps")
                .value_name("prefix")
                .help("Save one top-down map image per layer, named <prefix>_layer_<y>.png.")
                .takes_value(true)
                .number_of_values(1),
        )
        .get_matches()
}
