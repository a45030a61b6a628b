//! Types d'erreurs pour le crate aoi

use thiserror::Error;

/// Erreurs pouvant survenir lors des opérations AOI
///
/// Toutes ces erreurs sont récupérables au point de l'opération qui échoue :
/// aucune ne doit remonter jusqu'à un handler global ni terminer l'application.
/// Le module géométrie ne produit jamais d'erreur (les entrées dégénérées
/// donnent 0, pas un échec).
#[derive(Debug, Error, PartialEq)]
pub enum AoiError {
    /// Requête de recherche vide (ignorée silencieusement, aucun appel réseau)
    #[error("Empty search query")]
    EmptyQuery,

    /// Le géocodage n'a retourné aucun résultat
    #[error("No results found for \"{0}\"")]
    NotFound(String),

    /// La requête de géocodage a échoué (transport, HTTP, décodage)
    #[error("Geocoding request failed: {0}")]
    Network(String),

    /// Fichier illisible : JSON invalide ou aucune géométrie polygonale
    #[error("Unrecognized shape: {0}")]
    MalformedShape(String),

    /// Export ou recentrage demandé sans forme active (≥3 sommets)
    #[error("No active shape: draw or import a polygon first")]
    NoActiveShape,

    /// La plateforme n'offre pas de capacité de géolocalisation
    #[error("Geolocation is not supported on this platform")]
    GeolocationUnsupported,

    /// L'utilisateur a refusé la géolocalisation
    #[error("Geolocation permission was denied")]
    GeolocationDenied,
}

impl AoiError {
    /// Crée une erreur de forme invalide avec contexte
    pub fn malformed_shape(reason: impl Into<String>) -> Self {
        Self::MalformedShape(reason.into())
    }

    /// Crée une erreur réseau avec contexte
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network(reason.into())
    }
}
