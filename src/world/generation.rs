//! Per-hex terrain inference
//!
//! A coordinate's terrain is decided the first time it is requested, from
//! planned linear features or from the terrain already placed around it.
//! Rules are tried in a fixed order, each guarded by a probability. The
//! final fallback is always `Plains`, so inference never fails.

use ahash::AHashMap;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::features::FeatureSet;
use super::hex::HexCoord;
use super::map::{ring_terrains, HexCell, HexMap};
use super::postprocess::settle_batch;
use super::terrain::{arid_terrain, forest_terrain, TerrainCategory, TerrainId};
use crate::core::config::SimConfig;

/// Drawn when a hex has no generated neighbors
pub const SEED_TERRAINS: [(TerrainId, f32); 6] = [
    (TerrainId::Plains, 40.0),
    (TerrainId::OpenWoods, 20.0),
    (TerrainId::Forest, 15.0),
    (TerrainId::Scrubland, 10.0),
    (TerrainId::Hills, 10.0),
    (TerrainId::Marsh, 5.0),
];

pub const QUICKSAND_CHANCE: f32 = 0.04;
pub const WATER_RULE_CHANCE: f32 = 0.55;
pub const VOLCANIC_RULE_CHANCE: f32 = 0.6;
pub const MOUNTAIN_RULE_CHANCE: f32 = 0.5;
/// Indexed by forest tier - 1
pub const FOREST_RULE_CHANCE: [f32; 3] = [0.35, 0.55, 0.7];
pub const PLAINS_VARIANT_CHANCE: f32 = 0.5;
pub const ARID_BASE_CHANCE: f32 = 0.04;
pub const ARID_PRESSURE_SCALE: f32 = 0.3;
/// Plains/arid share of the outer rings needed before savanna and beyond
pub const ARID_MIN_PRESSURE: f32 = 0.5;

/// What the generator sees around a coordinate
struct Neighborhood {
    ring1: Vec<TerrainId>,
    ring2: Vec<TerrainId>,
    ring3: Vec<TerrainId>,
}

impl Neighborhood {
    fn gather(map: &HexMap, coord: &HexCoord) -> Self {
        Self {
            ring1: ring_terrains(map, coord, 1),
            ring2: ring_terrains(map, coord, 2),
            ring3: ring_terrains(map, coord, 3),
        }
    }

    fn count(&self, pred: impl Fn(&TerrainId) -> bool) -> usize {
        self.ring1.iter().filter(|t| pred(t)).count()
    }

    fn count_category(&self, category: TerrainCategory) -> usize {
        self.count(|t| t.category() == category)
    }

    /// Share of plains or arid terrain in a ring; 0 for an empty ring
    fn open_share(ring: &[TerrainId]) -> f32 {
        if ring.is_empty() {
            return 0.0;
        }
        let open = ring
            .iter()
            .filter(|t| matches!(t.category(), TerrainCategory::Plains | TerrainCategory::Arid))
            .count();
        open as f32 / ring.len() as f32
    }
}

type Rule = fn(&Neighborhood, &mut ChaCha8Rng) -> Option<TerrainId>;

/// Ecological rules in priority order
const RULES: [Rule; 5] = [
    water_rule,
    volcanic_rule,
    mountain_rule,
    forest_rule,
    plains_rule,
];

/// Pick from a weighted list. Weights need not sum to 1.
pub fn pick_weighted<T: Copy>(options: &[(T, f32)], rng: &mut ChaCha8Rng) -> T {
    let total: f32 = options.iter().map(|(_, w)| w.max(0.0)).sum();
    let mut roll = rng.gen::<f32>() * total;
    for &(item, weight) in options {
        let weight = weight.max(0.0);
        if roll < weight {
            return item;
        }
        roll -= weight;
    }
    options[options.len() - 1].0
}

fn water_rule(n: &Neighborhood, rng: &mut ChaCha8Rng) -> Option<TerrainId> {
    if n.count(|t| *t == TerrainId::Marsh) >= 2 && rng.gen::<f32>() < QUICKSAND_CHANCE {
        return Some(TerrainId::Quicksand);
    }
    if n.count(|t| t.is_water()) == 0 || rng.gen::<f32>() >= WATER_RULE_CHANCE {
        return None;
    }
    let options = if n.count_category(TerrainCategory::Forest) > 0 {
        [
            (TerrainId::Riverbank, 0.4),
            (TerrainId::Marsh, 0.2),
            (TerrainId::GalleryForest, 0.4),
        ]
    } else {
        [
            (TerrainId::Riverbank, 0.55),
            (TerrainId::Marsh, 0.3),
            (TerrainId::GalleryForest, 0.15),
        ]
    };
    Some(pick_weighted(&options, rng))
}

fn volcanic_rule(n: &Neighborhood, rng: &mut ChaCha8Rng) -> Option<TerrainId> {
    let volcanic = n.count(|t| matches!(t, TerrainId::Lava | TerrainId::Volcano));
    if volcanic == 0 || rng.gen::<f32>() >= VOLCANIC_RULE_CHANCE {
        return None;
    }
    Some(pick_weighted(
        &[
            (TerrainId::Lava, 0.3),
            (TerrainId::DeadForest, 0.45),
            (TerrainId::Rocky, 0.25),
        ],
        rng,
    ))
}

fn mountain_rule(n: &Neighborhood, rng: &mut ChaCha8Rng) -> Option<TerrainId> {
    if n.count(|t| *t == TerrainId::Mountain) == 0 || rng.gen::<f32>() >= MOUNTAIN_RULE_CHANCE {
        return None;
    }
    Some(pick_weighted(
        &[(TerrainId::Rocky, 0.5), (TerrainId::Hills, 0.5)],
        rng,
    ))
}

fn forest_rule(n: &Neighborhood, rng: &mut ChaCha8Rng) -> Option<TerrainId> {
    let forests = n.count_category(TerrainCategory::Forest);
    let density_tier: u8 = match forests {
        0 => return None,
        1 => 1,
        2 | 3 => 2,
        _ => 3,
    };
    let max_tier = n.ring1.iter().map(|t| t.forest_tier()).max().unwrap_or(0);
    let tier = density_tier.min(max_tier + 1).max(1);
    if rng.gen::<f32>() >= FOREST_RULE_CHANCE[(tier - 1) as usize] {
        return None;
    }
    Some(forest_terrain(tier))
}

fn plains_rule(n: &Neighborhood, rng: &mut ChaCha8Rng) -> Option<TerrainId> {
    let plains = n.count_category(TerrainCategory::Plains);
    let arid = n.count_category(TerrainCategory::Arid);
    if plains + arid < 2 {
        return None;
    }

    let pressure =
        0.6 * Neighborhood::open_share(&n.ring2) + 0.4 * Neighborhood::open_share(&n.ring3);
    let max_arid = n.ring1.iter().map(|t| t.arid_tier()).max().unwrap_or(0);
    let next_tier = (max_arid + 1).min(4);

    // Beyond scrubland the surrounding country has to be open as well
    let arid_chance = if next_tier == 1 || pressure >= ARID_MIN_PRESSURE {
        ARID_BASE_CHANCE + ARID_PRESSURE_SCALE * pressure
    } else {
        0.0
    };
    if rng.gen::<f32>() < arid_chance {
        return Some(arid_terrain(next_tier));
    }

    if plains >= 3 && rng.gen::<f32>() < PLAINS_VARIANT_CHANCE {
        return Some(if plains >= 4 {
            TerrainId::Meadow
        } else {
            TerrainId::Plains
        });
    }
    None
}

/// Category transition weights used when the dominant category is not
/// continued
fn transition_weights(from: TerrainCategory) -> &'static [(TerrainCategory, f32)] {
    use TerrainCategory as C;
    match from {
        C::Water => &[(C::Wetland, 5.0), (C::Plains, 3.0), (C::Forest, 2.0)],
        C::Wetland => &[(C::Forest, 5.0), (C::Plains, 5.0)],
        C::Forest => &[(C::Plains, 5.0), (C::Wetland, 2.0), (C::Mountain, 2.0)],
        C::Plains => &[
            (C::Forest, 4.0),
            (C::Arid, 3.0),
            (C::Wetland, 2.0),
            (C::Mountain, 1.0),
        ],
        C::Arid => &[(C::Plains, 6.0), (C::Mountain, 4.0)],
        C::Mountain => &[(C::Plains, 4.0), (C::Forest, 3.0), (C::Arid, 3.0)],
        C::Volcanic => &[(C::Mountain, 6.0), (C::Arid, 4.0)],
    }
}

/// Most frequent category among `terrains`; ties go to the lowest
/// `TerrainCategory` ordinal.
pub fn dominant_category(terrains: &[TerrainId]) -> Option<TerrainCategory> {
    let mut counts: AHashMap<TerrainCategory, usize> = AHashMap::new();
    for t in terrains {
        *counts.entry(t.category()).or_default() += 1;
    }
    let mut best: Option<(TerrainCategory, usize)> = None;
    for category in TerrainCategory::ALL {
        let count = counts.get(&category).copied().unwrap_or(0);
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category)
}

/// Most frequent terrain of `category` among `terrains`; ties go to the
/// lowest `TerrainId` ordinal.
fn dominant_terrain(terrains: &[TerrainId], category: TerrainCategory) -> Option<TerrainId> {
    let mut counts: AHashMap<TerrainId, usize> = AHashMap::new();
    for t in terrains.iter().filter(|t| t.category() == category) {
        *counts.entry(*t).or_default() += 1;
    }
    let mut best: Option<(TerrainId, usize)> = None;
    for terrain in TerrainId::ALL {
        let count = counts.get(&terrain).copied().unwrap_or(0);
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((terrain, count));
        }
    }
    best.map(|(terrain, _)| terrain)
}

fn fallback(n: &Neighborhood, config: &SimConfig, rng: &mut ChaCha8Rng) -> TerrainId {
    let Some(category) = dominant_category(&n.ring1) else {
        return TerrainId::Plains;
    };
    if rng.gen::<f32>() < config.continue_category_chance {
        return dominant_terrain(&n.ring1, category)
            .map(|t| t.continuation())
            .unwrap_or_else(|| category.default_terrain());
    }
    pick_weighted(transition_weights(category), rng).default_terrain()
}

/// Replace desert with a buffer terrain when forest is adjacent
fn veto_desert(terrain: TerrainId, n: &Neighborhood, rng: &mut ChaCha8Rng) -> TerrainId {
    if terrain != TerrainId::Desert || n.count_category(TerrainCategory::Forest) == 0 {
        return terrain;
    }
    const BUFFERS: [TerrainId; 3] = [TerrainId::Plains, TerrainId::Savanna, TerrainId::Scrubland];
    BUFFERS[rng.gen_range(0..BUFFERS.len())]
}

/// Decide the terrain for an ungenerated coordinate.
pub fn infer_terrain(
    coord: HexCoord,
    map: &HexMap,
    features: &FeatureSet,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> TerrainId {
    if let Some(planned) = features.terrain_at(&coord) {
        return planned;
    }

    let n = Neighborhood::gather(map, &coord);
    if n.ring1.is_empty() {
        return pick_weighted(&SEED_TERRAINS, rng);
    }

    let ruled = RULES.iter().find_map(|rule| rule(&n, rng));
    let terrain = match ruled {
        Some(t) => t,
        None => fallback(&n, config, rng),
    };
    veto_desert(terrain, &n, rng)
}

/// Generate every missing coordinate of `coords` in order and settle the
/// new batch. Returns the newly created coordinates.
pub fn generate_hexes(
    coords: &[HexCoord],
    map: &mut HexMap,
    features: &FeatureSet,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<HexCoord> {
    let mut created = Vec::new();
    for &coord in coords {
        if map.contains_key(&coord) {
            continue;
        }
        let terrain = infer_terrain(coord, map, features, config, rng);
        map.insert(coord, HexCell::new(coord, terrain));
        created.push(coord);
    }
    if !created.is_empty() {
        settle_batch(map, &created, config, rng);
        tracing::debug!("generated {} hexes", created.len());
    }
    created
}

/// Generate the disc of `radius` around `center`, inner rings first.
pub fn generate_around(
    center: HexCoord,
    radius: u32,
    map: &mut HexMap,
    features: &FeatureSet,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<HexCoord> {
    generate_hexes(&center.hexes_in_range(radius), map, features, config, rng)
}
