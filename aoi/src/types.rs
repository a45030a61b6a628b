//! Types de données pour le crate aoi

use serde::{Deserialize, Serialize};

/// Point géographique en degrés (latitude, longitude)
///
/// `lat` dans [-90, 90], `lng` dans [-180, 180]. Type valeur immuable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude en degrés
    pub lat: f64,

    /// Longitude en degrés
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<GeoPoint> for geo::Coord {
    fn from(p: GeoPoint) -> Self {
        geo::Coord { x: p.lng, y: p.lat }
    }
}

impl From<geo::Coord> for GeoPoint {
    fn from(c: geo::Coord) -> Self {
        Self { lat: c.y, lng: c.x }
    }
}

/// Anneau polygonal : séquence ordonnée de sommets, fermeture implicite
///
/// L'ordre d'insertion est l'ordre de dessin. Le point de fermeture n'est
/// jamais stocké : l'arête du dernier sommet vers le premier est implicite.
/// Un anneau est « actif » pour les statistiques et l'export seulement
/// à partir de 3 sommets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring {
    /// Sommets dans l'ordre de dessin
    pub vertices: Vec<GeoPoint>,
}

impl Ring {
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Un anneau est actif (statistiques, export, recentrage) avec ≥3 sommets
    pub fn is_active(&self) -> bool {
        self.vertices.len() >= 3
    }

    pub fn push(&mut self, point: GeoPoint) {
        self.vertices.push(point);
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Convertit en `geo::LineString` fermée (point de fermeture ajouté)
    pub fn to_line_string(&self) -> geo::LineString {
        let mut coords: Vec<geo::Coord> = self.vertices.iter().map(|p| (*p).into()).collect();
        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }
        geo::LineString::new(coords)
    }
}

/// Mode d'interaction avec la carte
///
/// Exactement un mode est actif à la fois ; le mode détermine comment les
/// clics sur la carte sont interprétés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Aucun outil actif
    #[default]
    Idle,

    /// Outil pointeur (pan/zoom seulement, les clics sont ignorés)
    Pointer,

    /// Outil de dessin : chaque clic ajoute un sommet au buffer
    Drawing,
}

/// État du viewport : centre + niveau de zoom
///
/// Valeur unique partagée ; seul le synchroniseur de viewport l'applique
/// et émet les notifications de changement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Centre de la vue
    pub center: GeoPoint,

    /// Niveau de zoom entier, dans [MIN_ZOOM, MAX_ZOOM]
    pub zoom: u8,
}

/// Statistiques dérivées de la forme active
///
/// Jamais stockées : recalculées à la demande depuis l'anneau actif.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AoiStats {
    /// Nombre de sommets
    pub vertices: usize,

    /// Périmètre de l'anneau fermé, en kilomètres
    pub perimeter_km: f64,

    /// Aire projetée (Mercator sphérique + shoelace), en km²
    pub area_km2: f64,
}

/// Résultat de géocodage, transitoire
///
/// Produit par le `SearchProvider`, consommé une seule fois par le
/// synchroniseur de viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Libellé lisible du lieu trouvé
    pub label: String,

    /// Position du lieu
    pub location: GeoPoint,
}
