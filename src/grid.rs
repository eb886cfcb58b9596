use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Channel value a pixel's blue component must exceed, on top of dominating
/// red and green, before the tile under it counts as water.
const WATER_BLUE_FLOOR: u8 = 100;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("map image has zero width or height")]
    InvalidImage,
    #[error("tile size must be a positive number of pixels")]
    InvalidTileSize,
}

/// Mutable per-tile state carried by every water tile. `world_x`/`world_y`
/// hold the tile's world-space origin so rendering callers do not have to
/// re-derive it from the column/row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterCell {
    pub pollution: f64,
    pub residue: f64,
    pub world_x: f64,
    pub world_y: f64,
}

/// Water/land classification of a map at a fixed tile resolution.
///
/// The classification is computed once at construction and never changes;
/// only the numeric fields of the water cells mutate over a run. Lookups
/// treat any out-of-range coordinate as land rather than an error, so
/// callers probing around the edge of the map need no pre-checks.
pub struct WaterGrid {
    width: u32,
    height: u32,
    tile_size: u32,
    cells: Vec<Option<WaterCell>>,
}

impl WaterGrid {
    /// Classify `image` into a grid of `ceil(w / tile_size)` by
    /// `ceil(h / tile_size)` tiles by sampling the centre pixel of each
    /// tile (clamped to the image bounds for partial edge tiles). A tile is
    /// water when its sample is blue-dominant: `b > r && b > g && b > 100`.
    pub fn from_image(image: &RgbaImage, tile_size: u32) -> Result<Self, GridError> {
        let (image_w, image_h) = image.dimensions();
        if image_w == 0 || image_h == 0 {
            return Err(GridError::InvalidImage);
        }
        if tile_size == 0 {
            return Err(GridError::InvalidTileSize);
        }

        let width = image_w.div_ceil(tile_size);
        let height = image_h.div_ceil(tile_size);
        let mut cells = Vec::with_capacity((width * height) as usize);
        let mut water_cells = 0usize;

        for row in 0..height {
            for col in 0..width {
                let px = (col * tile_size + tile_size / 2).min(image_w - 1);
                let py = (row * tile_size + tile_size / 2).min(image_h - 1);
                let [r, g, b, _] = image.get_pixel(px, py).0;
                if b > r && b > g && b > WATER_BLUE_FLOOR {
                    water_cells += 1;
                    cells.push(Some(WaterCell {
                        pollution: 0.0,
                        residue: 0.0,
                        world_x: (col * tile_size) as f64,
                        world_y: (row * tile_size) as f64,
                    }));
                } else {
                    cells.push(None);
                }
            }
        }

        tracing::debug!(width, height, water_cells, "classified water grid");
        Ok(Self {
            width,
            height,
            tile_size,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tile column/row under a world-space position.
    pub fn tile_at(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x / self.tile_size as f64).floor() as i32,
            (y / self.tile_size as f64).floor() as i32,
        )
    }

    /// False for land and for any coordinate outside the grid.
    pub fn is_water(&self, col: i32, row: i32) -> bool {
        match self.index(col, row) {
            Some(idx) => self.cells[idx].is_some(),
            None => false,
        }
    }

    /// None for land tiles and out-of-range coordinates alike.
    pub fn cell(&self, col: i32, row: i32) -> Option<&WaterCell> {
        self.index(col, row).and_then(|idx| self.cells[idx].as_ref())
    }

    pub fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut WaterCell> {
        match self.index(col, row) {
            Some(idx) => self.cells[idx].as_mut(),
            None => None,
        }
    }

    /// All water cells, in row-major sweep order.
    pub fn water_cells(&self) -> impl Iterator<Item = &WaterCell> {
        self.cells.iter().flatten()
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WATER: Rgba<u8> = Rgba([30, 90, 200, 255]);
    const LAND: Rgba<u8> = Rgba([110, 130, 60, 255]);

    #[test]
    fn blue_must_dominate_and_clear_the_floor() {
        let mut image = RgbaImage::from_pixel(24, 8, LAND);
        // exactly at the floor: not water
        image.put_pixel(4, 4, Rgba([0, 0, 100, 255]));
        // above the floor but tied with red: not water
        image.put_pixel(12, 4, Rgba([150, 0, 150, 255]));
        // above the floor and dominant: water
        image.put_pixel(20, 4, Rgba([0, 0, 101, 255]));

        let grid = WaterGrid::from_image(&image, 8).unwrap();
        assert!(!grid.is_water(0, 0));
        assert!(!grid.is_water(1, 0));
        assert!(grid.is_water(2, 0));
    }

    #[test]
    fn partial_edge_tiles_sample_inside_the_image() {
        // 9x9 image at tile size 8 gives a 2x2 grid whose edge tiles would
        // sample at x=12/y=12 without clamping.
        let mut image = RgbaImage::from_pixel(9, 9, LAND);
        image.put_pixel(8, 4, WATER);
        let grid = WaterGrid::from_image(&image, 8).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert!(grid.is_water(1, 0));
        assert!(!grid.is_water(1, 1));
    }

    #[test]
    fn world_origin_is_stored_per_cell() {
        let image = RgbaImage::from_pixel(32, 32, WATER);
        let grid = WaterGrid::from_image(&image, 8).unwrap();
        let cell = grid.cell(3, 2).unwrap();
        assert_eq!((cell.world_x, cell.world_y), (24.0, 16.0));
    }

    #[test]
    fn tile_at_floors_world_coordinates() {
        let image = RgbaImage::from_pixel(32, 32, WATER);
        let grid = WaterGrid::from_image(&image, 8).unwrap();
        assert_eq!(grid.tile_at(0.0, 0.0), (0, 0));
        assert_eq!(grid.tile_at(7.9, 8.0), (0, 1));
        assert_eq!(grid.tile_at(31.0, 16.5), (3, 2));
    }
}
