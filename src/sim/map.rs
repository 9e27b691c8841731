//! Procedural tile map
//!
//! Rooms are placed at random with rejection, sprinkled with pillars for
//! cover, then each room is linked forward to its nearest later room by a
//! three-tile-wide corridor. The grid is read-only once generated.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Random samples tried before falling back to an exhaustive floor scan
const FLOOR_SAMPLE_LIMIT: u32 = 1000;

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    #[default]
    Floor,
    Corridor,
}

impl Tile {
    /// Returns true if the tile blocks movement
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Wall)
    }
}

/// A rectangular room in tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center tile (integer halves)
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Overlap test with `padding` tiles of clearance; touching edges count
    pub fn intersects(&self, other: &Room, padding: usize) -> bool {
        self.x <= other.x + other.width + padding
            && self.x + self.width + padding >= other.x
            && self.y <= other.y + other.height + padding
            && self.y + self.height + padding >= other.y
    }

    /// Squared Euclidean distance between room centers
    fn center_distance_sq(&self, other: &Room) -> usize {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ax.abs_diff(bx).pow(2) + ay.abs_diff(by).pow(2)
    }
}

/// Tile grid plus the rooms carved into it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    /// Row-major, `y * width + x`
    tiles: Vec<Tile>,
    rooms: Vec<Room>,
}

impl TileMap {
    /// Generate a fresh map of the standard size
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut map = Self::bordered(MAP_WIDTH, MAP_HEIGHT);

        map.place_rooms(rng);
        if map.rooms.is_empty() {
            let room = Room::new(
                (map.width - MIN_ROOM_SIZE) / 2,
                (map.height - MIN_ROOM_SIZE) / 2,
                MIN_ROOM_SIZE,
                MIN_ROOM_SIZE,
            );
            log::warn!("No room could be placed, using fallback room {:?}", room);
            map.rooms.push(room);
        }
        map.connect_rooms();

        log::info!("Generated map with {} rooms", map.rooms.len());
        map
    }

    /// Bordered map with a single room spanning the whole interior and no pillars
    pub fn open() -> Self {
        let mut map = Self::bordered(MAP_WIDTH, MAP_HEIGHT);
        map.rooms
            .push(Room::new(1, 1, MAP_WIDTH - 2, MAP_HEIGHT - 2));
        map
    }

    /// All-floor grid with a one-tile wall border
    fn bordered(width: usize, height: usize) -> Self {
        let mut map = Self {
            width,
            height,
            tiles: vec![Tile::Floor; width * height],
            rooms: Vec::new(),
        };
        for x in 0..width {
            map.set(x, 0, Tile::Wall);
            map.set(x, height - 1, Tile::Wall);
        }
        for y in 0..height {
            map.set(0, y, Tile::Wall);
            map.set(width - 1, y, Tile::Wall);
        }
        map
    }

    fn place_rooms<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let target = rng.random_range(MIN_ROOMS..=MAX_ROOMS);
        let mut attempts = 0;

        while self.rooms.len() < target && attempts < ROOM_PLACEMENT_ATTEMPTS {
            attempts += 1;

            let width = rng.random_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE);
            let height = rng.random_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE);
            let x = rng.random_range(2..=self.width - width - 2);
            let y = rng.random_range(2..=self.height - height - 2);
            let candidate = Room::new(x, y, width, height);

            if self.rooms.iter().any(|room| candidate.intersects(room, 1)) {
                continue;
            }
            self.rooms.push(candidate);
            self.add_pillars(&candidate, rng);
        }

        if self.rooms.len() < target {
            log::debug!(
                "Placed {} of {} rooms after {} attempts",
                self.rooms.len(),
                target,
                attempts
            );
        }
    }

    /// Stamp 1-5 wall tiles strictly inside the room for cover
    fn add_pillars<R: Rng + ?Sized>(&mut self, room: &Room, rng: &mut R) {
        let count = rng.random_range(1..=5);
        for _ in 0..count {
            let x = rng.random_range(room.x + 1..=room.x + room.width - 2);
            let y = rng.random_range(room.y + 1..=room.y + room.height - 2);
            self.set(x, y, Tile::Wall);
        }
    }

    /// Link each room (except the last) to its nearest later room.
    ///
    /// Forward-only linking: the result is not guaranteed to be connected.
    fn connect_rooms(&mut self) {
        for i in 0..self.rooms.len().saturating_sub(1) {
            let from = self.rooms[i];
            let mut nearest: Option<(usize, Room)> = None;
            for candidate in &self.rooms[i + 1..] {
                let dist = from.center_distance_sq(candidate);
                if nearest.is_none_or(|(best, _)| dist < best) {
                    nearest = Some((dist, *candidate));
                }
            }
            if let Some((_, to)) = nearest {
                self.carve_corridor(&from, &to);
            }
        }
    }

    /// Horizontal band along `from`'s center row, then vertical band along
    /// `to`'s center column; both three tiles wide and clipped to the interior
    fn carve_corridor(&mut self, from: &Room, to: &Room) {
        let (x1, y1) = from.center();
        let (x2, y2) = to.center();

        for x in x1.min(x2).saturating_sub(1)..=x1.max(x2) + 1 {
            for y in y1.saturating_sub(1)..=y1 + 1 {
                self.carve(x, y);
            }
        }
        for y in y1.min(y2).saturating_sub(1)..=y1.max(y2) + 1 {
            for x in x2.saturating_sub(1)..=x2 + 1 {
                self.carve(x, y);
            }
        }
    }

    fn carve(&mut self, x: usize, y: usize) {
        if x > 0 && x < self.width - 1 && y > 0 && y < self.height - 1 {
            self.set(x, y, Tile::Floor);
        }
    }

    fn set(&mut self, x: usize, y: usize, tile: Tile) {
        let idx = y * self.width + x;
        self.tiles[idx] = tile;
    }

    #[cfg(test)]
    pub(crate) fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        self.set(x, y, tile);
    }

    #[cfg(test)]
    pub(crate) fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Tile at grid coordinates, `None` outside the grid
    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.tiles[y * self.width + x])
        } else {
            None
        }
    }

    /// Grid coordinates containing a pixel, `None` outside the grid
    pub fn pixel_to_tile(&self, px: f32, py: f32) -> Option<(usize, usize)> {
        let tx = (px / TILE_SIZE).floor();
        let ty = (py / TILE_SIZE).floor();
        if tx < 0.0 || ty < 0.0 || tx >= self.width as f32 || ty >= self.height as f32 {
            return None;
        }
        Some((tx as usize, ty as usize))
    }

    /// Tile type under a pixel; anything outside the grid is a wall
    pub fn tile_at(&self, px: f32, py: f32) -> Tile {
        self.pixel_to_tile(px, py)
            .and_then(|(x, y)| self.tile(x, y))
            .unwrap_or(Tile::Wall)
    }

    pub fn is_wall(&self, px: f32, py: f32) -> bool {
        self.tile_at(px, py).is_solid()
    }

    /// Pixel-space center of a tile
    pub fn tile_center(x: usize, y: usize) -> Vec2 {
        let half = (TILE_SIZE as u32 / 2) as f32;
        Vec2::new(x as f32 * TILE_SIZE + half, y as f32 * TILE_SIZE + half)
    }

    /// Center of a random FLOOR tile inside a random room.
    ///
    /// Returns `None` only when no room contains a FLOOR tile.
    pub fn random_floor_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec2> {
        for _ in 0..FLOOR_SAMPLE_LIMIT {
            let room = self.rooms.choose(rng)?;
            let x = rng.random_range(room.x..room.x + room.width);
            let y = rng.random_range(room.y..room.y + room.height);
            if self.tile(x, y) == Some(Tile::Floor) {
                return Some(Self::tile_center(x, y));
            }
        }

        log::warn!("Floor sampling exhausted, scanning rooms for floor tiles");
        let floor: Vec<(usize, usize)> = self
            .rooms
            .iter()
            .flat_map(|room| {
                (room.y..room.y + room.height)
                    .flat_map(move |y| (room.x..room.x + room.width).map(move |x| (x, y)))
            })
            .filter(|&(x, y)| self.tile(x, y) == Some(Tile::Floor))
            .collect();
        floor
            .choose(rng)
            .map(|&(x, y)| Self::tile_center(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn all_walls() -> TileMap {
        let mut map = TileMap::open();
        map.tiles.fill(Tile::Wall);
        map
    }

    proptest! {
        #[test]
        fn test_generated_border_is_wall(seed in any::<u64>()) {
            let map = TileMap::generate(&mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(map.width(), 32);
            prop_assert_eq!(map.height(), 18);
            for x in 0..map.width() {
                prop_assert_eq!(map.tile(x, 0), Some(Tile::Wall));
                prop_assert_eq!(map.tile(x, map.height() - 1), Some(Tile::Wall));
            }
            for y in 0..map.height() {
                prop_assert_eq!(map.tile(0, y), Some(Tile::Wall));
                prop_assert_eq!(map.tile(map.width() - 1, y), Some(Tile::Wall));
            }
        }

        #[test]
        fn test_generated_rooms_are_inside_and_apart(seed in any::<u64>()) {
            let map = TileMap::generate(&mut Pcg32::seed_from_u64(seed));
            let rooms = map.rooms();
            prop_assert!(!rooms.is_empty());
            prop_assert!(rooms.len() <= MAX_ROOMS);
            for room in rooms {
                prop_assert!(room.x >= 2 && room.y >= 2, "{:?} too close to the border", room);
                prop_assert!(room.x + room.width <= map.width() - 2);
                prop_assert!(room.y + room.height <= map.height() - 2);
            }
            for (i, a) in rooms.iter().enumerate() {
                for b in &rooms[i + 1..] {
                    prop_assert!(!a.intersects(b, 1), "{:?} overlaps {:?}", a, b);
                }
            }
        }

        #[test]
        fn test_random_floor_position_lands_on_floor(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let map = TileMap::generate(&mut rng);
            for _ in 0..20 {
                let pos = map.random_floor_position(&mut rng).expect("floor exists");
                prop_assert_eq!(map.tile_at(pos.x, pos.y), Tile::Floor);
            }
        }
    }

    #[test]
    fn test_out_of_grid_is_wall() {
        let map = TileMap::open();
        assert!(map.is_wall(-1.0, 100.0));
        assert!(map.is_wall(100.0, -0.5));
        assert!(map.is_wall(32.0 * TILE_SIZE, 100.0));
        assert!(map.is_wall(100.0, 18.0 * TILE_SIZE + 3.0));
        assert_eq!(map.tile_at(5000.0, 5000.0), Tile::Wall);
    }

    #[test]
    fn test_pixel_to_tile_uses_integer_division() {
        let map = TileMap::open();
        assert_eq!(map.pixel_to_tile(0.0, 0.0), Some((0, 0)));
        assert_eq!(map.pixel_to_tile(39.9, 40.0), Some((0, 1)));
        assert_eq!(map.pixel_to_tile(640.0, 360.0), Some((16, 9)));
        // Border tile vs first interior tile
        assert!(map.is_wall(39.0, 100.0));
        assert!(!map.is_wall(41.0, 100.0));
    }

    #[test]
    fn test_room_intersects_with_padding() {
        let a = Room::new(2, 2, 6, 6);
        // Gap of one tile still counts as overlapping with padding 1
        assert!(a.intersects(&Room::new(9, 2, 6, 6), 1));
        // Two tiles apart is clear
        assert!(!a.intersects(&Room::new(10, 2, 6, 6), 1));
        assert!(!a.intersects(&Room::new(2, 11, 6, 6), 1));
        assert_eq!(a.center(), (5, 5));
    }

    #[test]
    fn test_corridor_carves_through_walls() {
        let mut map = all_walls();
        let from = Room::new(2, 2, 6, 6);
        let to = Room::new(20, 8, 6, 6);
        map.carve_corridor(&from, &to);

        // Horizontal band around row 5 from x=4..=24
        for x in 4..=24 {
            for y in 4..=6 {
                assert_eq!(map.tile(x, y), Some(Tile::Floor), "({x},{y})");
            }
        }
        // Vertical band around column 23 from y=4..=12
        for y in 4..=12 {
            for x in 22..=24 {
                assert_eq!(map.tile(x, y), Some(Tile::Floor), "({x},{y})");
            }
        }
        assert_eq!(map.tile(10, 10), Some(Tile::Wall));
    }

    #[test]
    fn test_corridor_never_touches_border() {
        let mut map = TileMap::open();
        map.carve_corridor(&Room::new(0, 0, 2, 2), &Room::new(29, 15, 2, 2));
        for x in 0..map.width() {
            assert_eq!(map.tile(x, 0), Some(Tile::Wall));
            assert_eq!(map.tile(x, map.height() - 1), Some(Tile::Wall));
        }
    }

    #[test]
    fn test_random_floor_position_none_without_floor() {
        let map = all_walls();
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(map.random_floor_position(&mut rng).is_none());
    }

    #[test]
    fn test_random_floor_position_falls_back_to_scan() {
        // One floor tile in a large room: sampling may miss, scan must find it
        let mut map = all_walls();
        map.set(17, 9, Tile::Floor);
        let mut rng = Pcg32::seed_from_u64(3);
        let pos = map.random_floor_position(&mut rng).expect("single floor tile");
        assert_eq!(pos, TileMap::tile_center(17, 9));
        assert_eq!(pos, Vec2::new(700.0, 380.0));
    }

    #[test]
    fn test_generation_is_seed_deterministic() {
        let a = TileMap::generate(&mut Pcg32::seed_from_u64(42));
        let b = TileMap::generate(&mut Pcg32::seed_from_u64(42));
        assert_eq!(a.rooms(), b.rooms());
        assert_eq!(a.tiles, b.tiles);
    }
}
