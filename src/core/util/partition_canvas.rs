use crate::core::data::point::Point;
use crate::core::data::tile::Tile;

/// Splits a canvas into `tile_size` squares in row-major order. Tiles on the
/// right and bottom edges are cut short, so the tiles cover the canvas exactly
/// once. A zero `tile_size` is treated as 1.
#[must_use]
pub fn partition_canvas(canvas_width: u32, canvas_height: u32, tile_size: u32) -> Vec<Tile> {
    let tile_size = tile_size.max(1);

    (0..canvas_height)
        .step_by(tile_size as usize)
        .flat_map(|y| {
            (0..canvas_width).step_by(tile_size as usize).map(move |x| {
                let width = tile_size.min(canvas_width - x);
                let height = tile_size.min(canvas_height - y);
                Tile::new(x as i32, y as i32, width, height)
            })
        })
        .collect()
}

/// Sorts tiles so those closest to the canvas centre come first. Ties keep
/// their existing order.
pub fn order_center_outward(tiles: &mut [Tile], canvas_width: u32, canvas_height: u32) {
    let canvas_center = Point {
        x: (canvas_width / 2) as i32,
        y: (canvas_height / 2) as i32,
    };

    tiles.sort_by_key(|tile| tile.center().distance_squared(canvas_center));
}
