//! Macro phase of world generation
//!
//! Mountain ranges, rivers, lakes, migration routes and volcanic clusters are
//! planned once per region as ordered `(coord, terrain)` lists. Per-hex
//! inference consults them first.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::hex::{HexCoord, DIRECTIONS};
use super::terrain::TerrainId;

pub const MOUNTAIN_RANGES: RangeInclusive<usize> = 2..=3;
pub const MOUNTAIN_LENGTH: RangeInclusive<usize> = 6..=12;
pub const MOUNTAIN_TURN_CHANCE: f32 = 0.3;
pub const MOUNTAIN_BRANCH_CHANCE: f32 = 0.12;

pub const RIVERS: RangeInclusive<usize> = 2..=3;
pub const RIVER_LENGTH: RangeInclusive<usize> = 8..=18;
pub const RIVER_MEANDER_CHANCE: f32 = 0.3;
/// Chance a river starts beside a mountain range and is pathfound downhill
pub const RIVER_FROM_MOUNTAIN: f32 = 0.5;
/// Chance a pathfound river ends in a lake rather than the region edge
pub const RIVER_TO_LAKE: f32 = 0.4;
pub const LAKE_RING_CHANCE: f32 = 0.5;

pub const MIGRATION_ROUTE_CHANCE: f32 = 0.5;
pub const MIGRATION_MEANDER_CHANCE: f32 = 0.2;

pub const VOLCANIC_CLUSTER_CHANCE: f32 = 0.3;
pub const LAVA_RING_1_CHANCE: f32 = 0.6;
pub const LAVA_RING_2_CHANCE: f32 = 0.3;
pub const VOLCANO_MIN_DISTANCE: i32 = 4;

/// Hexes this close to a region center never receive blocking features
pub const CLEAR_RADIUS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    MountainRange,
    River,
    Lake,
    MigrationRoute,
    VolcanicCluster,
}

/// A pre-planned macro feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearFeature {
    pub kind: FeatureKind,
    pub cells: Vec<(HexCoord, TerrainId)>,
}

impl LinearFeature {
    fn new(kind: FeatureKind) -> Self {
        Self {
            kind,
            cells: Vec::new(),
        }
    }

    fn push(&mut self, coord: HexCoord, terrain: TerrainId) {
        if !self.contains(&coord) {
            self.cells.push((coord, terrain));
        }
    }

    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.cells.iter().any(|(c, _)| c == coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One macro-planning session's area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub center: HexCoord,
    pub radius: i32,
}

impl Region {
    pub fn new(center: HexCoord, radius: i32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.center.distance(coord) <= self.radius
    }

    /// Within `margin` hexes of the edge (or outside)
    pub fn near_edge(&self, coord: &HexCoord, margin: i32) -> bool {
        self.center.distance(coord) > self.radius - margin
    }

    fn clear_zone(&self, coord: &HexCoord) -> bool {
        self.center.distance(coord) <= CLEAR_RADIUS
    }

    /// Uniform random hex inside the region
    fn random_coord(&self, rng: &mut ChaCha8Rng) -> HexCoord {
        let n = self.radius;
        let dq = rng.gen_range(-n..=n);
        let dr = rng.gen_range((-n).max(-dq - n)..=n.min(-dq + n));
        HexCoord::new(self.center.q + dq, self.center.r + dr)
    }

    /// Corner of the region in direction `dir`
    fn edge_point(&self, dir: usize) -> HexCoord {
        let (dq, dr) = DIRECTIONS[dir % 6];
        HexCoord::new(
            self.center.q + dq * self.radius,
            self.center.r + dr * self.radius,
        )
    }
}

/// All planned features plus a first-wins coordinate index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    features: Vec<LinearFeature>,
    regions: Vec<Region>,
    index: BTreeMap<HexCoord, TerrainId>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Planned terrain at `coord`, if any feature claims it
    pub fn terrain_at(&self, coord: &HexCoord) -> Option<TerrainId> {
        self.index.get(coord).copied()
    }

    pub fn features(&self) -> &[LinearFeature] {
        &self.features
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// True when no planned region comfortably covers `coord`
    pub fn needs_region(&self, coord: &HexCoord, margin: i32) -> bool {
        self.regions.iter().all(|r| r.near_edge(coord, margin))
    }

    /// Record a planned region and its features. Earlier claims on a
    /// coordinate are kept.
    pub fn add_region(&mut self, region: Region, features: Vec<LinearFeature>) {
        for feature in &features {
            for &(coord, terrain) in &feature.cells {
                self.index.entry(coord).or_insert(terrain);
            }
        }
        self.features.extend(features);
        self.regions.push(region);
    }
}

/// Plan the macro features of one region.
///
/// Deterministic for a given RNG state.
pub fn plan_region_features(region: Region, rng: &mut ChaCha8Rng) -> Vec<LinearFeature> {
    let mut features = Vec::new();

    let range_count = rng.gen_range(MOUNTAIN_RANGES);
    for _ in 0..range_count {
        let range = plan_mountain_range(&region, rng);
        if !range.is_empty() {
            features.push(range);
        }
    }

    let river_count = rng.gen_range(RIVERS);
    for _ in 0..river_count {
        let (river, lake) = {
            let mountains: Vec<&LinearFeature> = features
                .iter()
                .filter(|f| f.kind == FeatureKind::MountainRange)
                .collect();
            plan_river(&region, &mountains, rng)
        };
        if !river.is_empty() {
            features.push(river);
        }
        if let Some(lake) = lake {
            features.push(lake);
        }
    }

    if rng.gen::<f32>() < MIGRATION_ROUTE_CHANCE {
        let route = plan_migration_route(&region, rng);
        if !route.is_empty() {
            features.push(route);
        }
    }

    if rng.gen::<f32>() < VOLCANIC_CLUSTER_CHANCE {
        if let Some(cluster) = plan_volcanic_cluster(&region, rng) {
            features.push(cluster);
        }
    }

    tracing::info!(
        "planned region at ({}, {}) radius {}: {} features",
        region.center.q,
        region.center.r,
        region.radius,
        features.len()
    );
    features
}

fn turn(dir: usize, rng: &mut ChaCha8Rng) -> usize {
    if rng.gen_bool(0.5) {
        (dir + 1) % 6
    } else {
        (dir + 5) % 6
    }
}

fn plan_mountain_range(region: &Region, rng: &mut ChaCha8Rng) -> LinearFeature {
    let mut feature = LinearFeature::new(FeatureKind::MountainRange);
    let start = region.random_coord(rng);
    let length = rng.gen_range(MOUNTAIN_LENGTH);
    let dir = rng.gen_range(0..6);

    let mut branches = Vec::new();
    walk_range(region, start, dir, length, true, rng, &mut feature, &mut branches);
    for (pos, dir, len) in branches {
        walk_range(region, pos, dir, len, false, rng, &mut feature, &mut Vec::new());
    }

    tracing::debug!("mountain range with {} cells", feature.len());
    feature
}

#[allow(clippy::too_many_arguments)]
fn walk_range(
    region: &Region,
    start: HexCoord,
    mut dir: usize,
    length: usize,
    allow_branch: bool,
    rng: &mut ChaCha8Rng,
    feature: &mut LinearFeature,
    branches: &mut Vec<(HexCoord, usize, usize)>,
) {
    let mut pos = start;
    for step in 0..length {
        if region.contains(&pos) && !region.clear_zone(&pos) {
            feature.push(pos, TerrainId::Mountain);
        }
        if allow_branch && step > 1 && rng.gen::<f32>() < MOUNTAIN_BRANCH_CHANCE {
            branches.push((pos, turn(dir, rng), length / 2));
        }
        if rng.gen::<f32>() < MOUNTAIN_TURN_CHANCE {
            dir = turn(dir, rng);
        }
        pos = pos.neighbor(dir);
    }
}

/// Greedy descent from `start` toward `target`, occasionally stepping
/// sideways. Returns the visited path excluding `target`.
fn descend_toward(
    start: HexCoord,
    target: HexCoord,
    meander: f32,
    max_steps: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<HexCoord> {
    let mut path = vec![start];
    let mut pos = start;
    let mut sideways_left = start.distance(&target).max(1) as usize / 2;

    while pos != target && path.len() < max_steps {
        let d = pos.distance(&target);
        let closer: Vec<HexCoord> = pos
            .neighbors()
            .into_iter()
            .filter(|n| n.distance(&target) < d)
            .collect();
        let sideways: Vec<HexCoord> = pos
            .neighbors()
            .into_iter()
            .filter(|n| n.distance(&target) == d && !path.contains(n))
            .collect();

        let next = if sideways_left > 0 && !sideways.is_empty() && rng.gen::<f32>() < meander {
            sideways_left -= 1;
            sideways[rng.gen_range(0..sideways.len())]
        } else if closer.len() > 1 && rng.gen_bool(0.5) {
            closer[1]
        } else {
            closer[0]
        };

        if next == target {
            break;
        }
        path.push(next);
        pos = next;
    }
    path
}

fn plan_river(
    region: &Region,
    mountains: &[&LinearFeature],
    rng: &mut ChaCha8Rng,
) -> (LinearFeature, Option<LinearFeature>) {
    let mut river = LinearFeature::new(FeatureKind::River);
    let mut lake = None;

    if !mountains.is_empty() && rng.gen::<f32>() < RIVER_FROM_MOUNTAIN {
        let range = mountains[rng.gen_range(0..mountains.len())];
        let (peak, _) = range.cells[rng.gen_range(0..range.cells.len())];
        let start = peak.neighbor(rng.gen_range(0..6));

        let to_lake = rng.gen::<f32>() < RIVER_TO_LAKE;
        let target = if to_lake {
            let mut t = region.random_coord(rng);
            for _ in 0..8 {
                if t.distance(&start) >= 4 {
                    break;
                }
                t = region.random_coord(rng);
            }
            t
        } else {
            let edge = region.center.ring(region.radius as u32);
            edge[rng.gen_range(0..edge.len())]
        };

        let max_steps = (region.radius * 3) as usize;
        for pos in descend_toward(start, target, RIVER_MEANDER_CHANCE, max_steps, rng) {
            if region.contains(&pos) && !region.clear_zone(&pos) {
                river.push(pos, TerrainId::River);
            }
        }

        if to_lake && !region.clear_zone(&target) {
            let mut basin = LinearFeature::new(FeatureKind::Lake);
            basin.push(target, TerrainId::Lake);
            for n in target.neighbors() {
                if region.contains(&n)
                    && !region.clear_zone(&n)
                    && !river.contains(&n)
                    && rng.gen::<f32>() < LAKE_RING_CHANCE
                {
                    basin.push(n, TerrainId::Lake);
                }
            }
            lake = Some(basin);
        }
    } else {
        let mut pos = region.random_coord(rng);
        let mut dir = rng.gen_range(0..6);
        let length = rng.gen_range(RIVER_LENGTH);
        for _ in 0..length {
            if region.contains(&pos) && !region.clear_zone(&pos) {
                river.push(pos, TerrainId::River);
            }
            if rng.gen::<f32>() < RIVER_MEANDER_CHANCE {
                dir = turn(dir, rng);
            }
            pos = pos.neighbor(dir);
        }
    }

    tracing::debug!(
        "river with {} cells{}",
        river.len(),
        if lake.is_some() { ", ending in a lake" } else { "" }
    );
    (river, lake)
}

fn plan_migration_route(region: &Region, rng: &mut ChaCha8Rng) -> LinearFeature {
    let mut route = LinearFeature::new(FeatureKind::MigrationRoute);
    let dir = rng.gen_range(0..6);
    let from = region.edge_point(dir);
    let to = region.edge_point(dir + 3);

    let max_steps = (region.radius * 4) as usize;
    let mut path = descend_toward(from, to, MIGRATION_MEANDER_CHANCE, max_steps, rng);
    path.push(to);
    for pos in path {
        if region.contains(&pos) && !region.clear_zone(&pos) {
            route.push(pos, TerrainId::GameTrail);
        }
    }
    tracing::debug!("migration route with {} cells", route.len());
    route
}

fn plan_volcanic_cluster(region: &Region, rng: &mut ChaCha8Rng) -> Option<LinearFeature> {
    let mut center = None;
    for _ in 0..8 {
        let candidate = region.random_coord(rng);
        if candidate.distance(&region.center) >= VOLCANO_MIN_DISTANCE {
            center = Some(candidate);
            break;
        }
    }
    let center = center?;

    let mut cluster = LinearFeature::new(FeatureKind::VolcanicCluster);
    cluster.push(center, TerrainId::Volcano);
    for n in center.ring(1) {
        if region.contains(&n)
            && !region.clear_zone(&n)
            && rng.gen::<f32>() < LAVA_RING_1_CHANCE
        {
            cluster.push(n, TerrainId::Lava);
        }
    }
    for n in center.ring(2) {
        if region.contains(&n)
            && !region.clear_zone(&n)
            && rng.gen::<f32>() < LAVA_RING_2_CHANCE
        {
            cluster.push(n, TerrainId::Lava);
        }
    }
    tracing::debug!("volcanic cluster at ({}, {})", center.q, center.r);
    Some(cluster)
}
