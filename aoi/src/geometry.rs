//! Calculs géométriques purs sur la sphère terrestre
//!
//! Fonctions totales, sans effet de bord ni état partagé : les entrées
//! dégénérées (anneau vide, sommets consécutifs dupliqués) donnent 0,
//! jamais une erreur.

use crate::types::{GeoPoint, Ring};

/// Rayon moyen de la Terre en kilomètres (formule de haversine)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rayon équatorial WGS84 en mètres (Mercator sphérique, EPSG:3857)
pub const MERCATOR_RADIUS_M: f64 = 6378137.0;

/// Distance orthodromique entre deux points, en kilomètres
///
/// Formule de haversine sur une sphère de rayon 6371 km. Symétrique,
/// nulle si et seulement si `a == b`. Le terme intermédiaire est borné
/// à [0, 1] avant `asin` pour parer les dépassements flottants sur les
/// points quasi antipodaux.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lng - a.lng).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    // Borner avant asin : h peut dépasser 1.0 d'un ulp aux antipodes
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Périmètre d'un anneau fermé, en kilomètres
///
/// Somme des distances orthodromiques sur les paires de sommets
/// consécutifs, en refermant du dernier sommet vers le premier.
/// Retourne 0 pour moins de 2 sommets.
pub fn perimeter(ring: &Ring) -> f64 {
    let vertices = &ring.vertices;
    if vertices.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for i in 0..vertices.len() {
        let next = (i + 1) % vertices.len();
        total += distance(vertices[i], vertices[next]);
    }
    total
}

/// Aire d'un anneau, en km²
///
/// Chaque sommet est projeté en Mercator sphérique (rayon 6378137 m),
/// puis la formule du lacet (shoelace) est appliquée sur le plan projeté ;
/// valeur absolue, division par 2, conversion m² → km².
///
/// Invariante par rotation de la liste des sommets et par inversion du
/// sens de parcours (la valeur absolue neutralise l'orientation). C'est
/// une approximation conforme : valide pour des régions petites devant le
/// rayon terrestre, l'aire est surestimée aux latitudes élevées. Les
/// anneaux auto-intersectants ne sont ni rejetés ni signalés ; le lacet
/// retourne une valeur numérique pour eux aussi.
///
/// Retourne 0 pour moins de 3 sommets.
pub fn area(ring: &Ring) -> f64 {
    let vertices = &ring.vertices;
    if vertices.len() < 3 {
        return 0.0;
    }

    let projected: Vec<(f64, f64)> = vertices.iter().map(|p| web_mercator(*p)).collect();

    let mut sum = 0.0;
    for i in 0..projected.len() {
        let (x1, y1) = projected[i];
        let (x2, y2) = projected[(i + 1) % projected.len()];
        sum += x1 * y2 - x2 * y1;
    }

    let area_m2 = sum.abs() / 2.0;
    area_m2 / 1_000_000.0
}

/// Centre de la boîte englobante d'un anneau
///
/// `(min + max) / 2` sur chaque axe, balayage O(N). Ce n'est PAS le
/// centroïde : le résultat est biaisé vers le centre de la boîte
/// englobante. Comportement conservé tel quel pour parité avec le
/// recentrage historique. Retourne `None` pour un anneau vide.
pub fn bounding_box_center(ring: &Ring) -> Option<GeoPoint> {
    let first = ring.vertices.first()?;

    let (mut min_lat, mut max_lat) = (first.lat, first.lat);
    let (mut min_lng, mut max_lng) = (first.lng, first.lng);

    for p in &ring.vertices[1..] {
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
        min_lng = min_lng.min(p.lng);
        max_lng = max_lng.max(p.lng);
    }

    Some(GeoPoint {
        lat: (min_lat + max_lat) / 2.0,
        lng: (min_lng + max_lng) / 2.0,
    })
}

/// Projection Mercator sphérique (EPSG:3857), en mètres
///
/// La latitude est bornée à ±85° pour éviter l'infini aux pôles.
fn web_mercator(p: GeoPoint) -> (f64, f64) {
    let lat = p.lat.to_radians().clamp(-85.0_f64.to_radians(), 85.0_f64.to_radians());
    let lng = p.lng.to_radians();

    let x = MERCATOR_RADIUS_M * lng;
    let y = MERCATOR_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();

    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring() -> Ring {
        // Carré de 0.1° de côté près de l'équateur
        Ring::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.1),
            GeoPoint::new(0.1, 0.1),
            GeoPoint::new(0.1, 0.0),
        ])
    }

    #[test]
    fn test_distance_identity() {
        let p = GeoPoint::new(48.85, 2.35);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let paris = GeoPoint::new(48.8566, 2.3522);
        let lyon = GeoPoint::new(45.764, 4.8357);
        assert_eq!(distance(paris, lyon), distance(lyon, paris));
    }

    #[test]
    fn test_distance_paris_lyon() {
        // Paris - Lyon : environ 392 km à vol d'oiseau
        let paris = GeoPoint::new(48.8566, 2.3522);
        let lyon = GeoPoint::new(45.764, 4.8357);
        let d = distance(paris, lyon);
        assert!((d - 392.0).abs() < 5.0, "d={}", d);
    }

    #[test]
    fn test_distance_antipodal_no_nan() {
        // Points quasi antipodaux : le clamp doit empêcher tout NaN
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = distance(a, b);
        assert!(d.is_finite());
        // Demi-circonférence de la sphère de 6371 km
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0, "d={}", d);
    }

    #[test]
    fn test_distance_triangle_inequality() {
        let a = GeoPoint::new(48.85, 2.35);
        let b = GeoPoint::new(45.76, 4.84);
        let c = GeoPoint::new(43.3, 5.37);
        assert!(distance(a, c) <= distance(a, b) + distance(b, c) + 1e-9);
    }

    #[test]
    fn test_perimeter_degenerate() {
        assert_eq!(perimeter(&Ring::default()), 0.0);
        assert_eq!(perimeter(&Ring::new(vec![GeoPoint::new(1.0, 1.0)])), 0.0);
    }

    #[test]
    fn test_perimeter_two_points_is_round_trip() {
        // Deux sommets : aller-retour, donc deux fois la distance
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let ring = Ring::new(vec![a, b]);
        let p = perimeter(&ring);
        assert!((p - 2.0 * distance(a, b)).abs() < 1e-9);
    }

    #[test]
    fn test_perimeter_rotation_invariance() {
        let ring = square_ring();
        let mut rotated = ring.clone();
        rotated.vertices.rotate_left(2);
        assert!((perimeter(&ring) - perimeter(&rotated)).abs() < 1e-9);
    }

    #[test]
    fn test_perimeter_reversal_invariance() {
        let ring = square_ring();
        let mut reversed = ring.clone();
        reversed.vertices.reverse();
        assert!((perimeter(&ring) - perimeter(&reversed)).abs() < 1e-9);
    }

    #[test]
    fn test_perimeter_duplicate_vertices() {
        // Les arêtes de longueur nulle contribuent zéro
        let mut ring = square_ring();
        ring.vertices.insert(1, ring.vertices[1]);
        assert!((perimeter(&ring) - perimeter(&square_ring())).abs() < 1e-9);
    }

    #[test]
    fn test_area_degenerate() {
        assert_eq!(area(&Ring::default()), 0.0);
        let two = Ring::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]);
        assert_eq!(area(&two), 0.0);
    }

    #[test]
    fn test_area_equator_square() {
        // 0.1° x 0.1° à l'équateur : environ 11132 m de côté en projeté
        let a = area(&square_ring());
        assert!((a - 123.9).abs() < 1.0, "a={}", a);
    }

    #[test]
    fn test_area_rotation_invariance() {
        let ring = square_ring();
        let mut rotated = ring.clone();
        rotated.vertices.rotate_left(1);
        assert!((area(&ring) - area(&rotated)).abs() < 1e-9);
    }

    #[test]
    fn test_area_winding_invariance() {
        let ring = square_ring();
        let mut reversed = ring.clone();
        reversed.vertices.reverse();
        assert!((area(&ring) - area(&reversed)).abs() < 1e-9);
    }

    #[test]
    fn test_area_self_intersecting_is_numeric() {
        // Papillon auto-intersectant : accepté, valeur numérique finie
        let bowtie = Ring::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.1, 0.1),
            GeoPoint::new(0.0, 0.1),
            GeoPoint::new(0.1, 0.0),
        ]);
        assert!(area(&bowtie).is_finite());
    }

    #[test]
    fn test_bounding_box_center() {
        let ring = Ring::new(vec![
            GeoPoint::new(10.0, 20.0),
            GeoPoint::new(30.0, 40.0),
            GeoPoint::new(20.0, 60.0),
        ]);
        let center = bounding_box_center(&ring).unwrap();
        assert_eq!(center.lat, 20.0);
        assert_eq!(center.lng, 40.0);
    }

    #[test]
    fn test_bounding_box_center_empty() {
        assert_eq!(bounding_box_center(&Ring::default()), None);
    }

    #[test]
    fn test_web_mercator_paris() {
        // Paris: 2.35°E, 48.85°N -> X ≈ 261600, Y ≈ 6250000
        let (x, y) = web_mercator(GeoPoint::new(48.85, 2.35));
        assert!((x - 261600.0).abs() < 1000.0, "x={}", x);
        assert!((y - 6250000.0).abs() < 10000.0, "y={}", y);
    }
}
