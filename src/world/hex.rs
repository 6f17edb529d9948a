//! Axial hex coordinates (q, r)
//!
//! Pointy-top hexagons. Coordinates order by `(q, r)` so maps keyed by them
//! iterate deterministically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default hex size (center to corner) for pixel projection
pub const HEX_SIZE: f32 = 10.0;

/// Neighbor offsets in fixed order: E, NE, NW, W, SW, SE
pub const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Axial hex coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Distance in hex steps
    pub fn distance(&self, other: &HexCoord) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        (dq + dr + ds) / 2
    }

    /// Neighbor in direction `dir` (taken modulo 6)
    pub fn neighbor(&self, dir: usize) -> HexCoord {
        let (dq, dr) = DIRECTIONS[dir % 6];
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// Get all 6 adjacent hexes
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            self.neighbor(0),
            self.neighbor(1),
            self.neighbor(2),
            self.neighbor(3),
            self.neighbor(4),
            self.neighbor(5),
        ]
    }

    /// Hexes at exactly `radius` steps, starting at the SW corner.
    /// Radius 0 is the hex itself.
    pub fn ring(&self, radius: u32) -> Vec<HexCoord> {
        if radius == 0 {
            return vec![*self];
        }
        let radius = radius as i32;
        let mut results = Vec::with_capacity(6 * radius as usize);
        let (dq, dr) = DIRECTIONS[4];
        let mut current = HexCoord::new(self.q + dq * radius, self.r + dr * radius);
        for dir in 0..6 {
            for _ in 0..radius {
                results.push(current);
                current = current.neighbor(dir);
            }
        }
        results
    }

    /// All hexes within `range` (inclusive), innermost ring first
    pub fn hexes_in_range(&self, range: u32) -> Vec<HexCoord> {
        (0..=range).flat_map(|r| self.ring(r)).collect()
    }

    /// Hexes on a straight line from self to other (inclusive)
    pub fn line_to(&self, other: &HexCoord) -> Vec<HexCoord> {
        let n = self.distance(other);
        if n == 0 {
            return vec![*self];
        }

        // Nudge avoids landing exactly on hex edges
        let eps = 1e-6;
        let mut results = Vec::with_capacity((n + 1) as usize);
        for i in 0..=n {
            let t = i as f32 / n as f32;
            let q = self.q as f32 + eps + (other.q - self.q) as f32 * t;
            let r = self.r as f32 + eps + (other.r - self.r) as f32 * t;
            results.push(hex_round(q, r));
        }
        results
    }

    /// Pixel center of this hex for a pointy-top layout
    pub fn to_pixel(&self, size: f32) -> Vec2 {
        let x = size * (3.0_f32.sqrt() * self.q as f32 + 3.0_f32.sqrt() / 2.0 * self.r as f32);
        let y = size * (3.0 / 2.0 * self.r as f32);
        Vec2::new(x, y)
    }
}

/// Round fractional hex coordinates to the nearest integer hex.
pub fn hex_round(q: f32, r: f32) -> HexCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }

    HexCoord::new(rq as i32, rr as i32)
}

/// Convert a pixel position to the nearest hex coordinate.
pub fn pixel_to_hex(pos: Vec2, size: f32) -> HexCoord {
    let q = (3.0_f32.sqrt() / 3.0 * pos.x - 1.0 / 3.0 * pos.y) / size;
    let r = (2.0 / 3.0 * pos.y) / size;
    hex_round(q, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_coord_distance() {
        let a = HexCoord::new(0, 0);
        assert_eq!(a.distance(&HexCoord::new(2, 1)), 3);
        assert_eq!(a.distance(&HexCoord::new(0, 3)), 3);
        assert_eq!(a.distance(&HexCoord::new(2, -2)), 2);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_hex_neighbors() {
        let center = HexCoord::new(3, -1);
        for n in center.neighbors() {
            assert_eq!(center.distance(&n), 1);
        }
        assert_eq!(center.neighbor(0), HexCoord::new(4, -1));
        assert_eq!(center.neighbor(6), center.neighbor(0));
    }

    #[test]
    fn test_ring_sizes() {
        let center = HexCoord::new(0, 0);
        assert_eq!(center.ring(0), vec![center]);
        assert_eq!(center.ring(1).len(), 6);
        assert_eq!(center.ring(3).len(), 18);
        for h in center.ring(3) {
            assert_eq!(center.distance(&h), 3);
        }
    }

    #[test]
    fn test_hexes_in_range() {
        let center = HexCoord::new(5, 5);
        assert_eq!(center.hexes_in_range(1).len(), 7);
        assert_eq!(center.hexes_in_range(2).len(), 19);
        assert_eq!(center.hexes_in_range(2)[0], center);
    }

    #[test]
    fn test_line_endpoints() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(3, -1);
        let line = a.line_to(&b);
        assert_eq!(line.len(), 4);
        assert_eq!(line.first(), Some(&a));
        assert_eq!(line.last(), Some(&b));
        for pair in line.windows(2) {
            assert_eq!(pair[0].distance(&pair[1]), 1);
        }
    }

    #[test]
    fn test_pixel_round_trip() {
        for coord in HexCoord::new(0, 0).hexes_in_range(3) {
            let px = coord.to_pixel(HEX_SIZE);
            assert_eq!(pixel_to_hex(px, HEX_SIZE), coord);
        }
        assert_eq!(HexCoord::ORIGIN.to_pixel(HEX_SIZE), Vec2::ZERO);
    }
}
