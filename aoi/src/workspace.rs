//! Façade composant la session AOI, le viewport et le fond de carte
//!
//! Implémente les opérations transverses (recherche, import, recentrage,
//! géolocalisation, export) en orchestrant les modules feuilles. Toutes les
//! erreurs sont récupérées ici au point de l'opération : rien ne remonte
//! plus haut, l'état reste cohérent après un échec.

use tracing::{info, warn};

use crate::basemap::{Basemap, TileSource};
use crate::capabilities::{GeolocationProvider, MapWidget};
use crate::error::AoiError;
use crate::geometry;
use crate::search::{validate_query, SearchProvider, SearchTracker, Ticket};
use crate::session::AoiSession;
use crate::shape_io;
use crate::types::{AoiStats, GeoPoint, SearchResult, ViewportState};
use crate::viewport::{
    ViewportSync, GEOLOCATE_ZOOM, IMPORT_ZOOM, SEARCH_ZOOM, SHAPE_ZOOM,
};

/// Espace de travail : état complet d'une session utilisateur en mémoire
#[derive(Debug, Default)]
pub struct Workspace {
    session: AoiSession,
    viewport: ViewportSync,
    basemap: Basemap,
    tracker: SearchTracker,
    selected_label: Option<String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &AoiSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AoiSession {
        &mut self.session
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportSync {
        &mut self.viewport
    }

    pub fn basemap(&self) -> Basemap {
        self.basemap
    }

    pub fn set_basemap(&mut self, basemap: Basemap) {
        self.basemap = basemap;
    }

    pub fn tile_source(&self) -> TileSource {
        self.basemap.tile_source()
    }

    /// Libellé « Selected: ... » du dernier résultat de recherche appliqué
    pub fn selected_label(&self) -> Option<&str> {
        self.selected_label.as_deref()
    }

    // --- Recherche ---------------------------------------------------------

    /// Ouvre une recherche : valide la requête et émet un ticket
    ///
    /// # Errors
    ///
    /// `EmptyQuery` pour une requête blanche (aucun appel réseau à émettre).
    pub fn begin_search(&mut self, query: &str) -> Result<Ticket, AoiError> {
        validate_query(query)?;
        Ok(self.tracker.begin())
    }

    /// Applique la complétion d'une recherche
    ///
    /// Une complétion périmée (ticket supplanté) est abandonnée : retour
    /// `None`, aucun état modifié. Sinon le succès recentre le viewport au
    /// zoom recherche et retient le libellé ; l'erreur est rendue à
    /// l'appelant pour affichage en ligne, état inchangé.
    pub fn complete_search(
        &mut self,
        ticket: Ticket,
        outcome: Result<SearchResult, AoiError>,
    ) -> Option<Result<(), AoiError>> {
        if !self.tracker.settle(ticket) {
            warn!("Stale search completion dropped");
            return None;
        }

        Some(match outcome {
            Ok(result) => {
                info!(label = %result.label, "Search result applied");
                self.viewport.recenter_to(result.location, SEARCH_ZOOM);
                self.selected_label = Some(result.label);
                Ok(())
            }
            Err(e) => Err(e),
        })
    }

    /// Recherche complète : émission, géocodage, application
    ///
    /// Pratique pour les hôtes qui sérialisent les recherches (CLI) ; les
    /// hôtes réentrants utilisent [`begin_search`](Self::begin_search) /
    /// [`complete_search`](Self::complete_search) directement.
    pub async fn search<P: SearchProvider>(
        &mut self,
        provider: &P,
        query: &str,
    ) -> Result<(), AoiError> {
        let query = validate_query(query)?.to_string();
        let ticket = self.tracker.begin();
        let outcome = provider.geocode(&query).await;
        match self.complete_search(ticket, outcome) {
            Some(applied) => applied,
            // `&mut self` est détenu pendant l'attente : le ticket ne peut
            // pas avoir été supplanté
            None => Ok(()),
        }
    }

    /// Une recherche est-elle encore en vol ? (gate d'affichage du résultat)
    pub fn search_pending(&self) -> bool {
        self.tracker.is_pending()
    }

    // --- Forme -------------------------------------------------------------

    /// Importe un texte GeoJSON : remplace la forme et recentre le viewport
    ///
    /// # Errors
    ///
    /// `MalformedShape` si le texte est illisible ; dans ce cas rien n'est
    /// modifié (ni forme, ni viewport).
    pub fn apply_import(&mut self, text: &str) -> Result<(), AoiError> {
        let ring = shape_io::import(text)?;
        info!(vertices = ring.len(), "Shape imported");

        if let Some(center) = geometry::bounding_box_center(&ring) {
            self.viewport.recenter_to(center, IMPORT_ZOOM);
        }
        self.session.import(ring);
        Ok(())
    }

    /// Recentre le viewport sur la boîte englobante de la forme active
    ///
    /// # Errors
    ///
    /// `NoActiveShape` sans forme qualifiante.
    pub fn zoom_to_shape(&mut self) -> Result<(), AoiError> {
        let shape = self.session.active_shape().ok_or(AoiError::NoActiveShape)?;
        let center = geometry::bounding_box_center(shape).ok_or(AoiError::NoActiveShape)?;
        self.viewport.recenter_to(center, SHAPE_ZOOM);
        Ok(())
    }

    /// Statistiques de la forme active
    pub fn stats(&self) -> Option<AoiStats> {
        self.session.stats()
    }

    /// Exporte la forme active en GeoJSON
    ///
    /// # Errors
    ///
    /// `NoActiveShape` sans forme qualifiante.
    pub fn export(&self) -> Result<String, AoiError> {
        let shape = self.session.active_shape().ok_or(AoiError::NoActiveShape)?;
        shape_io::export(shape)
    }

    // --- Viewport ----------------------------------------------------------

    /// Recentre sur la position de l'utilisateur
    ///
    /// # Errors
    ///
    /// `GeolocationUnsupported` ou `GeolocationDenied`, surfacées telles
    /// quelles ; le viewport reste inchangé.
    pub fn geolocate<G: GeolocationProvider>(&mut self, provider: &G) -> Result<(), AoiError> {
        let point = provider.locate()?;
        self.viewport.recenter_to(point, GEOLOCATE_ZOOM);
        Ok(())
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_by(1);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_by(-1);
    }

    // --- Événements du widget ----------------------------------------------

    /// Clic sur la carte (interprété selon le mode d'interaction)
    pub fn on_click(&mut self, point: GeoPoint) {
        self.session.click(point);
    }

    /// Fin de pan manuel : retour du widget, non republié
    pub fn on_move_end(&mut self, center: GeoPoint) {
        self.viewport.on_external_move(center);
    }

    /// Fin de zoom manuel : retour du widget, non republié
    pub fn on_zoom_end(&mut self, zoom: u8) {
        self.viewport.on_external_zoom(zoom);
    }

    /// Pousse l'état courant vers un widget de rendu
    pub fn render_to<W: MapWidget>(&self, widget: &mut W) {
        widget.render(
            self.viewport.state(),
            self.basemap.tile_source(),
            self.session.overlays(),
        );
    }
}
