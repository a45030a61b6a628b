//! Machine à états de la zone d'intérêt (AOI)
//!
//! Possède le polygone courant (confirmé ou en cours de dessin) et le mode
//! d'interaction actif. Mutée uniquement par le thread de la boucle
//! d'événements : les transitions sont donc atomiques entre elles, aucun
//! verrou n'est nécessaire.

use tracing::debug;

use crate::geometry;
use crate::types::{AoiStats, GeoPoint, InteractionMode, Ring};

/// État de dessin remis au widget cartographique
///
/// Pendant le dessin, le polygone confirmé est masqué (mais conservé) et le
/// buffer en cours est rendu comme polyligne ouverte avec un marqueur par
/// sommet. Hors dessin, la forme active est rendue comme polygone fermé.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlays<'a> {
    /// Polygone fermé à afficher, s'il y en a un
    pub polygon: Option<&'a Ring>,

    /// Polyligne ouverte du tracé en cours
    pub path: &'a [GeoPoint],

    /// Marqueurs de sommets du tracé en cours
    pub markers: &'a [GeoPoint],
}

/// Machine à états AOI : mode d'interaction + polygone confirmé + buffer
#[derive(Debug, Clone, Default)]
pub struct AoiSession {
    mode: InteractionMode,
    confirmed: Option<Ring>,
    buffer: Ring,
}

impl AoiSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Polygone confirmé (commité ou importé), s'il existe
    pub fn confirmed(&self) -> Option<&Ring> {
        self.confirmed.as_ref()
    }

    /// Buffer de sommets en cours de dessin
    pub fn buffer(&self) -> &Ring {
        &self.buffer
    }

    /// Change de mode d'interaction
    ///
    /// Entrer en `Drawing` vide le buffer (le polygone confirmé est masqué
    /// mais conservé jusqu'au commit ou à l'abandon). Quitter `Drawing` vers
    /// un autre mode abandonne le buffer sans commit : pour committer,
    /// utiliser [`stop_drawing`](Self::stop_drawing).
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = ?self.mode, to = ?mode, "AOI mode transition");

        self.buffer.clear();
        self.mode = mode;
    }

    /// Active l'outil de dessin (buffer vidé)
    pub fn start_drawing(&mut self) {
        self.set_mode(InteractionMode::Drawing);
    }

    /// Désactive l'outil de dessin en tentant le commit
    ///
    /// Si le buffer compte ≥3 sommets, il devient le polygone confirmé.
    /// Sinon le buffer est abandonné et le polygone confirmé précédent
    /// (s'il existe) reste actif. Retourne `true` si un commit a eu lieu.
    pub fn stop_drawing(&mut self) -> bool {
        if self.mode != InteractionMode::Drawing {
            return false;
        }
        self.mode = InteractionMode::Idle;

        if self.buffer.is_active() {
            let committed = std::mem::take(&mut self.buffer);
            debug!(vertices = committed.len(), "AOI committed");
            self.confirmed = Some(committed);
            true
        } else {
            debug!(vertices = self.buffer.len(), "Draw buffer discarded (<3 vertices)");
            self.buffer.clear();
            false
        }
    }

    /// Bascule l'outil de dessin (toggle du bouton de dessin)
    pub fn toggle_drawing(&mut self) {
        if self.mode == InteractionMode::Drawing {
            self.stop_drawing();
        } else {
            self.start_drawing();
        }
    }

    /// Clic sur la carte
    ///
    /// En mode `Drawing`, ajoute un sommet au buffer (pas de borne
    /// supérieure, pas de validation d'auto-intersection). Ignoré dans
    /// les autres modes.
    pub fn click(&mut self, point: GeoPoint) {
        if self.mode == InteractionMode::Drawing {
            self.buffer.push(point);
        }
    }

    /// Remise à zéro explicite : mode `Idle`, polygone et buffer vidés
    pub fn clear(&mut self) {
        debug!("AOI cleared");
        self.mode = InteractionMode::Idle;
        self.confirmed = None;
        self.buffer.clear();
    }

    /// Import d'une forme : gagne toujours
    ///
    /// Remplace le polygone confirmé, vide le buffer et force le mode
    /// `Idle`. Le recentrage du viewport est à la charge de l'appelant.
    pub fn import(&mut self, ring: Ring) {
        debug!(vertices = ring.len(), "AOI replaced by import");
        self.confirmed = Some(ring);
        self.buffer.clear();
        self.mode = InteractionMode::Idle;
    }

    /// Résolution de la forme active
    ///
    /// Le polygone confirmé s'il existe, sinon le buffer en cours s'il
    /// compte ≥3 sommets, sinon aucune forme.
    pub fn active_shape(&self) -> Option<&Ring> {
        if let Some(confirmed) = &self.confirmed {
            return Some(confirmed);
        }
        if self.buffer.is_active() {
            return Some(&self.buffer);
        }
        None
    }

    /// Statistiques dérivées de la forme active, recalculées à la demande
    pub fn stats(&self) -> Option<AoiStats> {
        let shape = self.active_shape()?;
        Some(AoiStats {
            vertices: shape.len(),
            perimeter_km: geometry::perimeter(shape),
            area_km2: geometry::area(shape),
        })
    }

    /// État de dessin pour le widget cartographique
    pub fn overlays(&self) -> Overlays<'_> {
        if self.mode == InteractionMode::Drawing {
            Overlays {
                polygon: None,
                path: &self.buffer.vertices,
                markers: &self.buffer.vertices,
            }
        } else {
            Overlays {
                polygon: self.active_shape(),
                path: &[],
                markers: &[],
            }
        }
    }
}
