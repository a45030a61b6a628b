//! # aoi
//!
//! Moteur d'interaction et de géométrie pour une zone d'intérêt (AOI) :
//! sélection d'une région géographique par recherche textuelle, dessin
//! à main levée ou import GeoJSON, statistiques dérivées (sommets,
//! périmètre, aire) et export GeoJSON.
//!
//! ## Features
//!
//! - Géométrie pure : haversine, périmètre d'anneau fermé, aire par
//!   projection Mercator sphérique + formule du lacet
//! - Machine à états d'interaction (pointeur / dessin / repos)
//! - Synchroniseur de viewport sans boucle commande/retour
//! - Import/export GeoJSON (`Polygon`, `Feature`, `FeatureCollection`)
//! - Collaborateurs externes derrière des traits de capacité
//!
//! ## Usage
//!
//! ```rust
//! use aoi::{GeoPoint, Workspace};
//!
//! let mut workspace = Workspace::new();
//! workspace.session_mut().start_drawing();
//! workspace.on_click(GeoPoint::new(18.50, 73.80));
//! workspace.on_click(GeoPoint::new(18.50, 73.90));
//! workspace.on_click(GeoPoint::new(18.60, 73.85));
//! workspace.session_mut().stop_drawing();
//!
//! let stats = workspace.stats().unwrap();
//! assert_eq!(stats.vertices, 3);
//! let geojson = workspace.export().unwrap();
//! assert!(geojson.contains("Polygon"));
//! ```

pub mod basemap;
pub mod capabilities;
pub mod error;
pub mod geometry;
pub mod search;
pub mod session;
pub mod shape_io;
pub mod types;
pub mod viewport;
pub mod workspace;

pub use basemap::{Basemap, TileSource};
pub use capabilities::{ExportSink, GeolocationProvider, MapWidget};
pub use error::AoiError;
pub use search::{SearchProvider, SearchTracker, Ticket};
pub use session::{AoiSession, Overlays};
pub use shape_io::EXPORT_FILENAME;
pub use types::{AoiStats, GeoPoint, InteractionMode, Ring, SearchResult, ViewportState};
pub use viewport::{ViewportSync, MAX_ZOOM, MIN_ZOOM};
pub use workspace::Workspace;
