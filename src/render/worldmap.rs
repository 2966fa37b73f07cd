//! World choropleth of album countries

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::core::countries::normalize_country_key;
use crate::models::WorldGeo;
use crate::render::chart;
use crate::render::surface::{mix_rgb, Color, Stroke, Surface, INK};

/// Fill for countries with no albums
const LAND: Color = Color::rgb(219, 210, 196);
/// Shade intensity growth per album
const RAMP: f64 = 0.55;

/// How the country data matched the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSummary {
    /// Countries from the collection found on the map
    pub matched: usize,
    /// Distinct countries in the collection
    pub total_countries: usize,
}

/// Draw an equirectangular choropleth shaded by album count
///
/// The projection is fit to the surface at a 2:1 aspect and centered.
/// Antarctica is skipped. Shade saturates smoothly: one album is visibly
/// darker than none, while large collections do not blow out the ramp.
pub fn draw_world_map(
    surface: &mut dyn Surface,
    world: &WorldGeo,
    country_album_counts: &HashMap<String, u64>,
    width: u32,
    height: u32,
) -> MapSummary {
    chart::prepare(surface, width, height);

    let scale = (width as f32 / 360.0).min(height as f32 / 180.0);
    let offset_x = (width as f32 - 360.0 * scale) / 2.0;
    let offset_y = (height as f32 - 180.0 * scale) / 2.0;
    let project = |lon: f32, lat: f32| {
        (
            offset_x + (lon + 180.0) * scale,
            offset_y + (90.0 - lat) * scale,
        )
    };

    let mut map_keys: HashSet<String> = HashSet::new();
    for feature in &world.features {
        let name = feature.name();
        if name.eq_ignore_ascii_case("antarctica") {
            continue;
        }
        let key = normalize_country_key(name);
        let count = country_album_counts.get(&key).copied().unwrap_or(0);
        if !key.is_empty() {
            map_keys.insert(key);
        }
        let Some(geometry) = &feature.geometry else {
            continue;
        };

        // all rings in one even-odd path so holes stay unfilled
        surface.begin_path();
        for ring in geometry.rings() {
            let mut positions = ring
                .iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| project(pos[0] as f32, pos[1] as f32));
            let Some((x, y)) = positions.next() else {
                continue;
            };
            surface.move_to(x, y);
            for (x, y) in positions {
                surface.line_to(x, y);
            }
            surface.close_path();
        }
        let shade = 1.0 - (-RAMP * count as f64).exp();
        surface.fill(mix_rgb(LAND, INK, shade as f32));
        surface.stroke(Stroke::solid(INK.with_alpha(0.3), 1.0));
    }

    let matched = country_album_counts
        .keys()
        .filter(|key| map_keys.contains(*key))
        .count();
    let summary = MapSummary {
        matched,
        total_countries: country_album_counts.len(),
    };
    if summary.matched < summary.total_countries {
        debug!(
            matched = summary.matched,
            total = summary.total_countries,
            "some collection countries missing from the map"
        );
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raster::RasterSurface;
    use crate::render::surface::PAPER;

    fn world(features: &str) -> WorldGeo {
        serde_json::from_str(&format!(r#"{{"features": [{features}]}}"#)).unwrap()
    }

    fn square_feature(name: &str, lon: f64, lat: f64) -> String {
        format!(
            r#"{{"properties": {{"name": "{name}"}},
                 "geometry": {{"type": "Polygon", "coordinates": [[
                    [{lon}, {lat}], [{}, {lat}], [{}, {}], [{lon}, {}]
                 ]]}}}}"#,
            lon + 40.0,
            lon + 40.0,
            lat - 40.0,
            lat - 40.0
        )
    }

    #[test]
    fn test_summary_counts_matches() {
        let mut surface = RasterSurface::new(1, 1);
        let geo = world(&square_feature("Germany", 0.0, 60.0));
        let counts = HashMap::from([
            ("germany".to_string(), 3),
            ("atlantis".to_string(), 1),
        ]);
        let summary = draw_world_map(&mut surface, &geo, &counts, 360, 180);
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.total_countries, 2);
    }

    #[test]
    fn test_counted_country_darker_than_empty() {
        let mut surface = RasterSurface::new(1, 1);
        let geo = world(&format!(
            "{},{}",
            square_feature("Loud", -120.0, 60.0),
            square_feature("Quiet", 60.0, 60.0)
        ));
        let counts = HashMap::from([("loud".to_string(), 10)]);
        draw_world_map(&mut surface, &geo, &counts, 360, 180);
        // feature interiors: Loud spans lon -120..-80 lat 20..60,
        // Quiet spans lon 60..100
        let loud = surface.pixel(80, 50);
        let quiet = surface.pixel(260, 50);
        assert!(loud.0 < quiet.0, "shaded country must be darker");
        let land = (LAND.r, LAND.g, LAND.b, 255);
        assert_eq!(quiet, land);
    }

    #[test]
    fn test_antarctica_skipped() {
        let mut surface = RasterSurface::new(1, 1);
        let geo = world(&square_feature("Antarctica", -60.0, -50.0));
        let summary = draw_world_map(&mut surface, &geo, &HashMap::new(), 360, 180);
        assert_eq!(summary.matched, 0);
        // interior stays background
        assert_eq!(surface.pixel(140, 160), (PAPER.r, PAPER.g, PAPER.b, 255));
    }

    #[test]
    fn test_no_geometry_feature_is_harmless() {
        let mut surface = RasterSurface::new(1, 1);
        let geo = world(r#"{"properties": {"ADMIN": "Nowhere"}}"#);
        let summary = draw_world_map(&mut surface, &geo, &HashMap::new(), 100, 50);
        assert_eq!(summary.total_countries, 0);
    }
}
