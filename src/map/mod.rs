//! Map model
//!
//! The map is a rectangular arena of [`Tile`] values addressed by `(x, y)`
//! index arithmetic. The world is a cylinder: neighbor addressing wraps
//! around horizontally and clamps at the poles. Tiles never hold references
//! to each other, so serialization and resizing cannot produce dangling
//! neighbors.

pub mod editor;
pub mod generator;
pub mod io;
pub mod tile;

pub use editor::{Brush, DrawMode, MapEditor, Tool};
pub use generator::MapGenerator;
pub use tile::{Elevation, Moisture, Rockiness, Tile, TileDirection};

use serde::{Deserialize, Serialize};

/// Rectangular tile arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    width: usize,
    height: usize,
    /// Seed the map was generated from; kept with the map so a save file is
    /// enough to reproduce the session.
    seed: u64,
    tiles: Vec<Tile>,
}

impl Map {
    /// Creates a map filled with default (ocean) tiles.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        Self {
            width,
            height,
            seed,
            tiles: vec![Tile::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.contains(x, y));
        y * self.width + x
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        let index = self.index(x, y);
        &mut self.tiles[index]
    }

    /// Coordinates of the neighbor of `(x, y)` in `direction`: x wraps around
    /// the cylinder, y clamps at the poles (a polar tile is its own northern
    /// or southern neighbor).
    pub fn neighbor_coords(&self, x: usize, y: usize, direction: TileDirection) -> (usize, usize) {
        debug_assert!(self.contains(x, y));
        let (dx, dy) = direction.offset();
        let nx = (x as isize + dx).rem_euclid(self.width as isize) as usize;
        let ny = (y as isize + dy).clamp(0, self.height as isize - 1) as usize;
        (nx, ny)
    }

    /// Coordinates of all eight neighbors, in `TileDirection::ALL` order.
    /// At the poles some entries coincide with `(x, y)` or with each other.
    pub fn neighborhood(&self, x: usize, y: usize) -> [(usize, usize); 8] {
        let mut coords = [(0, 0); 8];
        for (slot, direction) in coords.iter_mut().zip(TileDirection::ALL) {
            *slot = self.neighbor_coords(x, y, direction);
        }
        coords
    }

    /// Snapshot of the eight neighbor tiles, in `TileDirection::ALL` order.
    pub fn neighborhood_tiles(&self, x: usize, y: usize) -> [Tile; 8] {
        self.neighborhood(x, y)
            .map(|(nx, ny)| *self.tile(nx, ny))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}
