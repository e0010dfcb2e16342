use itertools::Itertools;

/// A square window into the source image, the detector's input unit.
///
/// Tiles are ephemeral: they exist only while one detection call walks the
/// grid, and are never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Horizontal origin in global image coordinates.
    pub x: u32,
    /// Vertical origin in global image coordinates.
    pub y: u32,
    /// Edge length of the square window.
    pub size: u32,
}

/// The overlapping tile grid covering one image.
#[derive(Clone, Debug)]
pub struct TileGrid {
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Lays out tile origins spaced by `stride` along each axis. If the
    /// last regular step would leave pixels uncovered at the far edge, one
    /// extra tile is placed flush against that edge instead of extending
    /// past the image bound. An image smaller than one tile along an axis
    /// gets a single origin at 0 on that axis.
    pub fn new(image_width: u32, image_height: u32, tile_size: u32, stride: u32) -> Self {
        let xs = axis_offsets(image_width, tile_size, stride);
        let ys = axis_offsets(image_height, tile_size, stride);
        let tiles = ys
            .iter()
            .cartesian_product(xs.iter())
            .map(|(&y, &x)| Tile {
                x,
                y,
                size: tile_size,
            })
            .collect();
        Self { tiles }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Tile origins along one axis.
fn axis_offsets(dim: u32, tile_size: u32, stride: u32) -> Vec<u32> {
    if dim <= tile_size {
        return vec![0];
    }
    let stride = stride.max(1);
    let mut offsets = Vec::new();
    let mut offset = 0;
    while offset + tile_size < dim {
        offsets.push(offset);
        offset += stride;
    }
    // The loop stops before covering the far edge; a final tile sits flush
    // against it.
    offsets.push(dim - tile_size);
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_no_larger_than_tile_yields_single_origin_tile() {
        for (w, h) in [(100, 100), (1280, 1280), (1280, 640)] {
            let grid = TileGrid::new(w, h, 1280, 1000);
            assert_eq!(grid.len(), 1);
            let tile = grid.iter().next().unwrap();
            assert_eq!((tile.x, tile.y), (0, 0));
        }
    }

    #[test]
    fn final_tile_is_flush_with_far_edge() {
        let grid = TileGrid::new(2280, 1280, 1280, 1000);
        let xs: Vec<u32> = grid.iter().map(|t| t.x).collect();
        assert_eq!(xs, vec![0, 1000]);
        // 1000 + 1280 reaches exactly the image width.
        assert_eq!(xs.last().unwrap() + 1280, 2280);
    }

    #[test]
    fn irregular_remainder_adds_flush_tile() {
        let offs = axis_offsets(3000, 1280, 1000);
        assert_eq!(offs, vec![0, 1000, 1720]);
    }

    #[test]
    fn grid_covers_every_pixel() {
        for dim in [1281u32, 2000, 2280, 3000, 5555, 10240] {
            let offs = axis_offsets(dim, 1280, 1000);
            let mut covered_to = 0u32;
            for &o in &offs {
                assert!(o <= covered_to, "gap before offset {o} at dim {dim}");
                assert!(o + 1280 <= dim, "tile past bound at dim {dim}");
                covered_to = covered_to.max(o + 1280);
            }
            assert_eq!(covered_to, dim, "far edge uncovered at dim {dim}");
        }
    }

    #[test]
    fn grid_is_row_major() {
        let grid = TileGrid::new(2280, 2280, 1280, 1000);
        let origins: Vec<(u32, u32)> = grid.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(origins, vec![(0, 0), (1000, 0), (0, 1000), (1000, 1000)]);
    }
}
