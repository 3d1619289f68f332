use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use log::info;

use crate::geometry::GridPoint;
use crate::grid::{CellGrid, CellKind};
use crate::network::Edge;

const PIXELS_PER_CELL: u32 = 8;

fn cell_colour(kind: CellKind) -> Rgb<u8> {
    match kind {
        CellKind::Empty => Rgb([24u8, 24u8, 24u8]),
        CellKind::Room => Rgb([63u8, 63u8, 191u8]),
        CellKind::Hallway => Rgb([191u8, 32u8, 32u8]),
        CellKind::Stairs => Rgb([32u8, 191u8, 32u8]),
    }
}

/// Top-down map of one grid layer, with that layer's corridor legs drawn on
/// top of the cell classification.
pub fn layer_map(grid: &CellGrid, edges: &[Edge], layer: i32) -> RgbImage {
    let dims = grid.dims();
    let mut image = RgbImage::new(
        dims.x as u32 * PIXELS_PER_CELL,
        dims.z as u32 * PIXELS_PER_CELL,
    );

    for x in 0..dims.x {
        for z in 0..dims.z {
            let colour = cell_colour(grid.get(GridPoint::new(x, layer, z)));
            for px in 0..PIXELS_PER_CELL {
                for pz in 0..PIXELS_PER_CELL {
                    image.put_pixel(
                        x as u32 * PIXELS_PER_CELL + px,
                        z as u32 * PIXELS_PER_CELL + pz,
                        colour,
                    );
                }
            }
        }
    }

    // Overlay the planned legs that stay on this layer.
    for edge in edges {
        for sub_edge in &edge.sub_edges {
            if sub_edge.start.y == layer && sub_edge.end.y == layer {
                let start = (
                    pixel_center(sub_edge.start.x),
                    pixel_center(sub_edge.start.z),
                );
                let end = (pixel_center(sub_edge.end.x), pixel_center(sub_edge.end.z));
                draw_line_segment_mut(&mut image, start, end, Rgb([191u8, 191u8, 32u8]));
            }
        }
    }

    image
}

fn pixel_center(cell: i32) -> f32 {
    cell as f32 * PIXELS_PER_CELL as f32 + PIXELS_PER_CELL as f32 / 2.0
}

/// Saves one map per grid layer as `<prefix>_layer_<y>.png`.
pub fn save_layer_maps(grid: &CellGrid, edges: &[Edge], prefix: &str) {
    for layer in 0..grid.dims().y {
        let file_name = format!("{}_layer_{:0>2}.png", prefix, layer);
        layer_map(grid, edges, layer).save(&file_name).unwrap();
        info!("Saved {}", file_name);
    }
}
