//! Synchroniseur de viewport
//!
//! Détient l'unique `ViewportState` et fait autorité sur ses mutations.
//! Tout composant peut demander un changement ; seules les commandes
//! programmatiques (recentrage, zoom) sont publiées aux abonnés. Les
//! retours du widget (pan/zoom manuel) mettent l'état à jour SANS
//! republication : une modification d'origine externe ne doit pas être
//! réappliquée au widget comme une nouvelle commande.

use std::fmt;

use tracing::debug;

use crate::types::{GeoPoint, ViewportState};

/// Zoom minimal autorisé
pub const MIN_ZOOM: u8 = 2;

/// Zoom maximal autorisé
pub const MAX_ZOOM: u8 = 18;

/// Zoom appliqué après un résultat de recherche
pub const SEARCH_ZOOM: u8 = 11;

/// Zoom appliqué par l'action « zoomer sur la forme »
///
/// Volontairement plus grossier que ce qu'un ajustement aux bornes
/// impliquerait : le widget sous-jacent n'ajuste pas automatiquement
/// sur une emprise.
pub const SHAPE_ZOOM: u8 = 13;

/// Zoom appliqué après une géolocalisation
pub const GEOLOCATE_ZOOM: u8 = 13;

/// Zoom appliqué après un import de forme
pub const IMPORT_ZOOM: u8 = 12;

type Subscriber = Box<dyn FnMut(ViewportState)>;

/// Synchroniseur : état du viewport + abonnés aux commandes programmatiques
pub struct ViewportSync {
    state: ViewportState,
    subscribers: Vec<Subscriber>,
}

impl ViewportSync {
    pub fn new(initial: ViewportState) -> Self {
        Self {
            state: ViewportState {
                center: initial.center,
                zoom: initial.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            },
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Abonne un observateur aux changements programmatiques du viewport
    pub fn subscribe(&mut self, subscriber: impl FnMut(ViewportState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Recentrage inconditionnel (recherche, géolocalisation, zoom-forme)
    pub fn recenter_to(&mut self, center: GeoPoint, zoom: u8) {
        self.state = ViewportState {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        };
        debug!(lat = center.lat, lng = center.lng, zoom = self.state.zoom, "Viewport recentered");
        self.publish();
    }

    /// Zoom relatif, borné à [MIN_ZOOM, MAX_ZOOM] (boutons +/-)
    pub fn zoom_by(&mut self, delta: i8) {
        let zoom = (i16::from(self.state.zoom) + i16::from(delta))
            .clamp(i16::from(MIN_ZOOM), i16::from(MAX_ZOOM)) as u8;
        if zoom == self.state.zoom {
            return;
        }
        self.state.zoom = zoom;
        debug!(zoom, "Viewport zoom changed");
        self.publish();
    }

    /// Retour du widget : l'utilisateur a déplacé la carte
    ///
    /// Met l'état à jour sans notifier (pas de boucle commande/retour).
    pub fn on_external_move(&mut self, center: GeoPoint) {
        self.state.center = center;
    }

    /// Retour du widget : l'utilisateur a zoomé directement
    pub fn on_external_zoom(&mut self, zoom: u8) {
        self.state.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn publish(&mut self) {
        let state = self.state;
        for subscriber in &mut self.subscribers {
            subscriber(state);
        }
    }
}

impl Default for ViewportSync {
    fn default() -> Self {
        // Vue initiale : sous-continent indien, zoom pays
        Self::new(ViewportState {
            center: GeoPoint::new(20.5937, 78.9629),
            zoom: 5,
        })
    }
}

impl fmt::Debug for ViewportSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportSync")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
