//! Capacités externes (collaborateurs)
//!
//! Les accès plateforme (rendu, géolocalisation, écriture de fichier) sont
//! abstraits derrière ces traits : le cœur AOI n'a aucune dépendance sur un
//! toolkit d'interface. C'est la couture qui rend le cœur testable.

use crate::basemap::TileSource;
use crate::error::AoiError;
use crate::session::Overlays;
use crate::types::{GeoPoint, ViewportState};

/// Widget de rendu cartographique
///
/// Reçoit l'état de vue, la source de tuiles et les surcouches à dessiner.
/// Les événements utilisateur (clic, fin de pan, fin de zoom) remontent par
/// les handlers `on_click` / `on_move_end` / `on_zoom_end` du `Workspace`.
pub trait MapWidget {
    fn render(&mut self, view: ViewportState, tiles: TileSource, overlays: Overlays<'_>);
}

/// Capacité de géolocalisation de la plateforme
pub trait GeolocationProvider {
    /// Position courante de l'utilisateur
    ///
    /// # Errors
    ///
    /// `GeolocationUnsupported` si la plateforme n'offre pas la capacité,
    /// `GeolocationDenied` si l'utilisateur refuse.
    fn locate(&self) -> Result<GeoPoint, AoiError>;
}

/// Destination de l'export (téléchargement, boîte d'enregistrement...)
pub trait ExportSink {
    /// Livre le contenu exporté sous le nom de fichier suggéré
    fn deliver(&mut self, filename: &str, contents: &str) -> std::io::Result<()>;
}
