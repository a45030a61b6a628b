//! Géocodage via l'API de recherche Nominatim
//!
//! Implémentation HTTP du `SearchProvider` du cœur. L'endpoint et le
//! user-agent sont configurables par environnement (`AOI_GEOCODER_URL`,
//! `AOI_GEOCODER_AGENT`) ; Nominatim exige un user-agent identifiant.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use aoi::{AoiError, GeoPoint, SearchProvider, SearchResult};

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
const DEFAULT_USER_AGENT: &str = concat!("aoi-cli/", env!("CARGO_PKG_VERSION"));

/// Client de géocodage Nominatim
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: reqwest::Client,
    endpoint: String,
}

/// Une entrée de la réponse JSON de Nominatim
///
/// Les coordonnées sont des chaînes dans le format de l'API.
#[derive(Debug, Deserialize)]
struct Place {
    display_name: String,
    lat: String,
    lon: String,
}

impl Nominatim {
    pub fn new(endpoint: impl Into<String>, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Construit le client depuis l'environnement (ou les défauts)
    pub fn from_env() -> Result<Self> {
        let endpoint =
            std::env::var("AOI_GEOCODER_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let agent =
            std::env::var("AOI_GEOCODER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        Self::new(endpoint, &agent)
    }
}

impl SearchProvider for Nominatim {
    async fn geocode(&self, query: &str) -> Result<SearchResult, AoiError> {
        debug!(query, endpoint = %self.endpoint, "Geocoding request");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| AoiError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AoiError::network(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AoiError::network(e.to_string()))?;

        parse_response(&body, query)
    }
}

/// Décode la réponse Nominatim ; tableau vide = lieu introuvable
fn parse_response(body: &str, query: &str) -> Result<SearchResult, AoiError> {
    let places: Vec<Place> = serde_json::from_str(body)
        .map_err(|e| AoiError::network(format!("invalid geocoder response: {}", e)))?;

    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| AoiError::NotFound(query.to_string()))?;

    let lat: f64 = place
        .lat
        .parse()
        .map_err(|_| AoiError::network(format!("invalid latitude: {}", place.lat)))?;
    let lng: f64 = place
        .lon
        .parse()
        .map_err(|_| AoiError::network(format!("invalid longitude: {}", place.lon)))?;

    Ok(SearchResult {
        label: place.display_name,
        location: GeoPoint::new(lat, lng),
    })
}
