use noise::{NoiseFn, Perlin};

use crate::dispatch::CancelToken;
use crate::game::settings::{CloudCover, Erosion, Lifeforms, MapSettings, OceanCoverage};
use crate::util::SessionRandom;

use super::tile::{features, Moisture, Rockiness, ELEVATION_MAX, ELEVATION_MIN};
use super::Map;

// Elevation amplitude before the erosion factor is applied.
const BASE_AMPLITUDE: f64 = 3000.0;
// Large features (continents) vs. small features (hills).
const CONTINENT_SCALE: f64 = 0.8;
const DETAIL_SCALE: f64 = 3.0;
const DETAIL_AMPLITUDE: f64 = 0.25;
const MOISTURE_SCALE: f64 = 1.5;
// Narrow band of the detail field that becomes rivers.
const RIVER_BAND: f64 = 0.03;

/// Procedural map generator.
///
/// Cooperative: checks the cancellation token once per map row and returns
/// `None` when cancellation was observed, leaving no partial map behind.
pub struct MapGenerator {
    elevation_noise: Perlin,
    moisture_noise: Perlin,
    detail_noise: Perlin,
}

impl MapGenerator {
    pub fn new(seed: u64) -> Self {
        let noise_seed = seed as u32;
        Self {
            elevation_noise: Perlin::new(noise_seed),
            moisture_noise: Perlin::new(noise_seed.wrapping_add(1)),
            detail_noise: Perlin::new(noise_seed.wrapping_add(2)),
        }
    }

    /// Generates a full map from `settings` and the session RNG.
    pub fn generate(
        &self,
        settings: &MapSettings,
        random: &mut SessionRandom,
        cancel: &CancelToken,
    ) -> Option<Map> {
        let (width, height) = settings.dimensions();
        let mut map = Map::new(width, height, random.seed());

        let sea_bias = ocean_bias(settings.ocean);
        let amplitude = BASE_AMPLITUDE * erosion_factor(settings.erosion);
        let moisture_bias = cloud_bias(settings.clouds);
        let fungus_probability = fungus_probability(settings.lifeforms);

        for y in 0..height {
            if cancel.is_cancelled() {
                log::info!("map generation aborted at row {}/{}", y, height);
                return None;
            }
            for x in 0..width {
                // Sample on a cylinder so the east and west map edges line up.
                let angle = x as f64 / width as f64 * std::f64::consts::TAU;
                let (cx, cy) = (angle.cos(), angle.sin());
                let v = y as f64 / width as f64 * std::f64::consts::TAU;

                let continents = self.elevation_noise.get([
                    cx * CONTINENT_SCALE,
                    cy * CONTINENT_SCALE,
                    v * CONTINENT_SCALE,
                ]);
                let detail = self.detail_noise.get([
                    cx * DETAIL_SCALE,
                    cy * DETAIL_SCALE,
                    v * DETAIL_SCALE,
                ]);
                let raw = continents + detail * DETAIL_AMPLITUDE - sea_bias;
                let elevation = ((raw * amplitude) as i16).clamp(ELEVATION_MIN, ELEVATION_MAX);

                let rainfall = self.moisture_noise.get([
                    cx * MOISTURE_SCALE,
                    cy * MOISTURE_SCALE,
                    v * MOISTURE_SCALE,
                ]) + moisture_bias;

                let tile = map.tile_mut(x, y);
                tile.elevation = elevation;
                tile.moisture = if rainfall < -0.25 {
                    Moisture::Arid
                } else if rainfall < 0.35 {
                    Moisture::Moist
                } else {
                    Moisture::Rainy
                };
                tile.rockiness = if detail < 0.0 {
                    Rockiness::Flat
                } else if detail < 0.5 {
                    Rockiness::Rolling
                } else {
                    Rockiness::Rocky
                };

                if tile.is_land() {
                    if detail.abs() < RIVER_BAND {
                        tile.add_feature(features::RIVER);
                    }
                    if random.chance(fungus_probability) {
                        tile.add_feature(features::FUNGUS);
                    }
                }
            }
        }

        Some(map)
    }
}

fn ocean_bias(ocean: OceanCoverage) -> f64 {
    match ocean {
        OceanCoverage::Small => -0.2,
        OceanCoverage::Average => 0.0,
        OceanCoverage::Large => 0.2,
    }
}

fn erosion_factor(erosion: Erosion) -> f64 {
    match erosion {
        Erosion::Strong => 0.6,
        Erosion::Average => 1.0,
        Erosion::Weak => 1.4,
    }
}

fn cloud_bias(clouds: CloudCover) -> f64 {
    match clouds {
        CloudCover::Sparse => -0.2,
        CloudCover::Average => 0.0,
        CloudCover::Dense => 0.2,
    }
}

fn fungus_probability(lifeforms: Lifeforms) -> f64 {
    match lifeforms {
        Lifeforms::Rare => 0.05,
        Lifeforms::Average => 0.1,
        Lifeforms::Abundant => 0.2,
    }
}
