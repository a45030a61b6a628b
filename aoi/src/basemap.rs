//! Fonds de carte disponibles
//!
//! Les chaînes d'attribution sont contractuelles : tout consommateur peut
//! les reconnaître par les motifs `/OpenStreetMap/i` (fond « street ») et
//! `/Esri/i` (fond « satellite »). Ne pas les reformuler.

/// Descripteur de source de tuiles remis au widget cartographique
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSource {
    /// Gabarit d'URL des tuiles ({z}/{x}/{y})
    pub url_template: &'static str,

    /// Texte d'attribution affiché sur la carte
    pub attribution: &'static str,
}

/// Fond de carte sélectionnable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Basemap {
    /// Plan de rues OpenStreetMap
    #[default]
    Street,

    /// Imagerie satellite Esri
    Satellite,
}

impl Basemap {
    /// Source de tuiles associée au fond
    pub fn tile_source(self) -> TileSource {
        match self {
            Basemap::Street => TileSource {
                url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
                attribution: "© OpenStreetMap contributors",
            },
            Basemap::Satellite => TileSource {
                url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
                attribution: "Tiles © Esri, Maxar, Earthstar Geographics, and the GIS User Community",
            },
        }
    }
}
