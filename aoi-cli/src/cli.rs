//! Définition et implémentation des commandes CLI
//!
//! - `inspect` : GeoJSON → statistiques de la forme (sommets, périmètre, aire)
//! - `export`  : GeoJSON → forme normalisée (anneau extérieur seul, fermé)
//! - `search`  : géocodage d'un libellé de lieu via Nominatim

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use aoi::viewport::SEARCH_ZOOM;
use aoi::{ExportSink, Workspace, EXPORT_FILENAME};

use crate::geocode::Nominatim;

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect a GeoJSON shape: vertex count, perimeter, area, center
    Inspect {
        /// Path to a GeoJSON file (Polygon, Feature or FeatureCollection)
        #[arg(short, long)]
        path: PathBuf,
    },

    /// Normalize a GeoJSON shape (outer ring only) and write it back out
    Export {
        /// Path to a GeoJSON file
        #[arg(short, long)]
        path: PathBuf,

        /// Output file (défaut : area-of-interest.geojson)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Geocode a place label through the configured geocoder
    Search {
        /// Place label to resolve (e.g. "Pune")
        query: String,
    },
}

/// Écrit l'export sur disque sous le nom suggéré
struct FileSink {
    directory: PathBuf,
    output: Option<PathBuf>,
}

impl ExportSink for FileSink {
    fn deliver(&mut self, filename: &str, contents: &str) -> std::io::Result<()> {
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| self.directory.join(filename));
        std::fs::write(&path, contents)?;
        println!("Written: {}", path.display());
        Ok(())
    }
}

/// Exécute la commande inspect
pub fn cmd_inspect(path: &Path) -> Result<()> {
    let workspace = load_shape(path)?;
    let stats = workspace
        .stats()
        .context("Shape has fewer than 3 vertices, no statistics available")?;
    let center = workspace.viewport().center;

    println!("=== Inspect {} ===", path.display());
    println!("Vertices: {}", stats.vertices);
    println!("Perimeter: {:.3} km", stats.perimeter_km);
    println!("Area: {:.3} km²", stats.area_km2);
    println!("Bounding-box center: {:.5}, {:.5}", center.lat, center.lng);
    Ok(())
}

/// Exécute la commande export
pub fn cmd_export(path: &Path, output: Option<&Path>) -> Result<()> {
    let workspace = load_shape(path)?;
    let exported = workspace.export()?;

    let mut sink = FileSink {
        directory: std::env::current_dir().context("Cannot resolve working directory")?,
        output: output.map(Path::to_path_buf),
    };
    sink.deliver(EXPORT_FILENAME, &exported)
        .context("Failed to write export")?;
    Ok(())
}

/// Exécute la commande search
pub async fn cmd_search(query: &str) -> Result<()> {
    let geocoder = Nominatim::from_env()?;
    let mut workspace = Workspace::new();

    workspace.search(&geocoder, query).await?;

    let view = workspace.viewport();
    println!("=== Search \"{}\" ===", query);
    if let Some(label) = workspace.selected_label() {
        println!("Selected: {}", label);
    }
    println!("Location: {:.5}, {:.5}", view.center.lat, view.center.lng);
    println!("Zoom: {}", SEARCH_ZOOM);
    Ok(())
}

/// Charge un fichier GeoJSON dans un espace de travail neuf
fn load_shape(path: &Path) -> Result<Workspace> {
    let text = std::fs::read_to_string(path)
        .context(format!("Failed to read file: {}", path.display()))?;

    let mut workspace = Workspace::new();
    workspace.apply_import(&text)?;
    Ok(workspace)
}
