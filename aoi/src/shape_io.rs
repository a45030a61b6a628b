//! Import/export GeoJSON de la forme active
//!
//! Convertit entre l'anneau interne (`Ring`, ordre lat/lng, fermeture
//! implicite) et les géométries GeoJSON externes (ordre [lng, lat],
//! anneau explicitement fermé).

use geojson::{Feature, GeoJson, Geometry, Value};

use crate::error::AoiError;
use crate::types::{GeoPoint, Ring};

/// Nom de fichier suggéré pour l'export
pub const EXPORT_FILENAME: &str = "area-of-interest.geojson";

/// Exporte un anneau actif en GeoJSON `Feature` + géométrie `Polygon`
///
/// Les sommets sont émis en ordre `[lng, lat]` et le premier sommet est
/// dupliqué en fin d'anneau, conformément à la convention GeoJSON.
///
/// # Errors
///
/// `NoActiveShape` si l'anneau compte moins de 3 sommets.
pub fn export(ring: &Ring) -> Result<String, AoiError> {
    if !ring.is_active() {
        return Err(AoiError::NoActiveShape);
    }

    let polygon = geo::Polygon::new(ring.to_line_string(), vec![]);
    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&polygon))),
        id: None,
        properties: None,
        foreign_members: None,
    };

    Ok(GeoJson::Feature(feature).to_string())
}

/// Importe la première géométrie polygonale d'un texte GeoJSON
///
/// Accepte un `Polygon` nu, une `Feature` enveloppant un `Polygon` ou un
/// `MultiPolygon`, ou une `FeatureCollection` (première feature polygonale
/// dans l'ordre de parcours). Pour un `MultiPolygon`, seul le premier
/// membre est retenu ; les suivants sont ignorés silencieusement. Seul
/// l'anneau extérieur est importé, les trous sont ignorés. Le point de
/// fermeture dupliqué est retiré (la fermeture est implicite en interne).
///
/// # Errors
///
/// `MalformedShape` si le texte n'est pas du JSON valide ou si aucune
/// géométrie polygonale n'est trouvée.
pub fn import(text: &str) -> Result<Ring, AoiError> {
    let parsed: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| AoiError::malformed_shape(e.to_string()))?;

    let ring = match &parsed {
        GeoJson::Geometry(geometry) => ring_from_value(&geometry.value),
        GeoJson::Feature(feature) => feature
            .geometry
            .as_ref()
            .and_then(|g| ring_from_value(&g.value)),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .iter()
            .find_map(|f| f.geometry.as_ref().and_then(|g| ring_from_value(&g.value))),
    };

    ring.ok_or_else(|| AoiError::malformed_shape("no polygon geometry found"))
}

/// Extrait l'anneau extérieur d'une géométrie polygonale
fn ring_from_value(value: &Value) -> Option<Ring> {
    let outer = match value {
        Value::Polygon(rings) => rings.first()?,
        // Premier membre seulement, les suivants sont ignorés
        Value::MultiPolygon(polygons) => polygons.first()?.first()?,
        _ => return None,
    };

    let mut vertices: Vec<GeoPoint> = outer
        .iter()
        .filter_map(|position| {
            Some(GeoPoint {
                lng: *position.first()?,
                lat: *position.get(1)?,
            })
        })
        .collect();

    // Retirer le point de fermeture dupliqué
    if vertices.len() >= 2 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    Some(Ring::new(vertices))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Ring {
        Ring::new(vec![
            GeoPoint::new(18.50, 73.80),
            GeoPoint::new(18.50, 73.90),
            GeoPoint::new(18.60, 73.85),
        ])
    }

    #[test]
    fn test_export_rejects_inactive_ring() {
        let two = Ring::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]);
        assert_eq!(export(&two), Err(AoiError::NoActiveShape));
    }

    #[test]
    fn test_export_is_closed_lng_lat_feature() {
        let json = export(&triangle()).unwrap();

        assert!(json.contains(r#""type":"Feature""#));
        assert!(json.contains(r#""type":"Polygon""#));
        // Ordre [lng, lat] : le premier sommet (lat 18.5, lng 73.8)
        assert!(json.contains("[73.8,18.5]"), "json={}", json);

        let ring = import(&json).unwrap();
        // 3 sommets + fermeture à l'export, fermeture retirée à l'import
        assert_eq!(ring, triangle());
    }

    #[test]
    fn test_import_bare_polygon() {
        let json = r#"{"type":"Polygon","coordinates":[[[73.8,18.5],[73.9,18.5],[73.85,18.6],[73.8,18.5]]]}"#;
        let ring = import(json).unwrap();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.vertices[0], GeoPoint::new(18.5, 73.8));
    }

    #[test]
    fn test_import_feature_drops_holes() {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"Polygon","coordinates":[
            [[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,1.0],[0.0,0.0]],
            [[0.2,0.2],[0.8,0.2],[0.8,0.8],[0.2,0.2]]
        ]}}"#;
        let ring = import(json).unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_import_feature_collection_scan_order() {
        // La première feature n'a pas de géométrie polygonale : on passe à la suivante
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1.0,2.0]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Polygon","coordinates":[[[10.0,20.0],[11.0,20.0],[11.0,21.0],[10.0,20.0]]]}}
        ]}"#;
        let ring = import(json).unwrap();
        assert_eq!(ring.vertices[0], GeoPoint::new(20.0, 10.0));
    }

    #[test]
    fn test_import_multipolygon_first_member_only() {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"MultiPolygon","coordinates":[
                [[[0.0,0.0],[2.0,0.0],[2.0,2.0],[0.0,2.0],[0.0,0.0]]],
                [[[50.0,50.0],[51.0,50.0],[51.0,51.0],[50.0,50.0]]]
            ]}}
        ]}"#;
        let ring = import(json).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.vertices[2], GeoPoint::new(2.0, 2.0));
    }

    #[test]
    fn test_import_invalid_json() {
        let err = import("{not json").unwrap_err();
        assert!(matches!(err, AoiError::MalformedShape(_)));
    }

    #[test]
    fn test_import_no_polygon_geometry() {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[0.0,0.0],[1.0,1.0]]}}"#;
        let err = import(json).unwrap_err();
        assert!(matches!(err, AoiError::MalformedShape(_)));
    }

    #[test]
    fn test_round_trip_preserves_vertices() {
        let json = export(&triangle()).unwrap();
        let ring = import(&json).unwrap();
        assert_eq!(ring.len(), triangle().len());
        for (a, b) in ring.vertices.iter().zip(triangle().vertices.iter()) {
            assert!((a.lat - b.lat).abs() < 1e-12);
            assert!((a.lng - b.lng).abs() < 1e-12);
        }
    }
}
