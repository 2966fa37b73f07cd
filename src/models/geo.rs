//! World boundaries GeoJSON model
//!
//! Only the subset of GeoJSON the world choropleth needs: a feature
//! collection of named Polygon/MultiPolygon countries with `[lon, lat]`
//! ring coordinates.

use serde::Deserialize;

/// A ring of `[lon, lat, ...]` positions (extra ordinates are ignored)
pub type Ring = Vec<Vec<f64>>;

/// GeoJSON FeatureCollection of country outlines
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldGeo {
    #[serde(default)]
    pub features: Vec<WorldFeature>,
}

/// One country feature
#[derive(Debug, Clone, Deserialize)]
pub struct WorldFeature {
    #[serde(default)]
    pub properties: FeatureProperties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl WorldFeature {
    /// Country name from whichever property the source carries
    pub fn name(&self) -> &str {
        self.properties
            .name
            .as_deref()
            .or(self.properties.admin_upper.as_deref())
            .or(self.properties.admin.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "ADMIN")]
    pub admin_upper: Option<String>,
    #[serde(default)]
    pub admin: Option<String>,
}

/// Polygon geometry as carried by the world boundaries source
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

impl Geometry {
    /// All rings of the geometry, outer and holes alike
    pub fn rings(&self) -> Vec<&Ring> {
        match self {
            Geometry::Polygon { coordinates } => coordinates.iter().collect(),
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().flatten().collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_polygon_and_multipolygon() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Atlantis"},
                    "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]}
                },
                {
                    "type": "Feature",
                    "properties": {"ADMIN": "Mu"},
                    "geometry": {"type": "MultiPolygon", "coordinates": [[[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0]]]]}
                }
            ]
        }"#;
        let geo: WorldGeo = serde_json::from_str(json).unwrap();
        assert_eq!(geo.features.len(), 2);
        assert_eq!(geo.features[0].name(), "Atlantis");
        assert_eq!(geo.features[1].name(), "Mu");
        let rings = geo.features[1].geometry.as_ref().unwrap().rings();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][1], vec![3.0, 2.0]);
    }

    #[test]
    fn test_missing_geometry_and_name() {
        let json = r#"{"features": [{"properties": {}}]}"#;
        let geo: WorldGeo = serde_json::from_str(json).unwrap();
        assert_eq!(geo.features[0].name(), "");
        assert!(geo.features[0].geometry.is_none());
    }
}
