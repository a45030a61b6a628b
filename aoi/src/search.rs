//! Adaptateur de recherche (géocodage)
//!
//! La recherche est le seul point de suspension réseau du système. Pendant
//! qu'une requête est en vol, l'interface reste réentrante : une nouvelle
//! saisie peut lancer une requête plus récente. Le `SearchTracker` garantit
//! qu'une complétion périmée (requête supplantée, arrivée en retard) n'est
//! jamais appliquée par-dessus une complétion plus récente.

use crate::error::AoiError;
use crate::types::SearchResult;

/// Capacité de géocodage externe
///
/// Enveloppe l'appel HTTP réel ; le cœur AOI n'a aucune dépendance sur un
/// client réseau particulier. La requête vide est filtrée en amont par
/// [`validate_query`], aucun appel ne doit être émis pour elle.
pub trait SearchProvider {
    /// Résout un libellé de lieu en position géographique
    fn geocode(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<SearchResult, AoiError>> + Send;
}

/// Valide et normalise une requête de recherche
///
/// # Errors
///
/// `EmptyQuery` pour une requête vide ou blanche (ignorée silencieusement
/// par l'appelant, sans appel réseau).
pub fn validate_query(query: &str) -> Result<&str, AoiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(AoiError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Ticket identifiant une requête de recherche émise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Garde anti-péremption des recherches concurrentes
///
/// Chaque requête émise reçoit un ticket strictement croissant ; seule la
/// complétion portant le ticket le plus récent est appliquée. Un drapeau
/// `pending` masque l'affichage du résultat (succès ou erreur) tant que la
/// requête la plus récente n'est pas réglée.
#[derive(Debug, Default)]
pub struct SearchTracker {
    next: u64,
    latest: Option<u64>,
    pending: bool,
}

impl SearchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Émet un ticket pour une nouvelle requête (supplante la précédente)
    pub fn begin(&mut self) -> Ticket {
        let id = self.next;
        self.next += 1;
        self.latest = Some(id);
        self.pending = true;
        Ticket(id)
    }

    /// Règle une complétion ; `false` si elle est périmée et doit être ignorée
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.latest == Some(ticket.0) {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Une requête est-elle encore en vol ?
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("  Pune  "), Ok("Pune"));
        assert_eq!(validate_query(""), Err(AoiError::EmptyQuery));
        assert_eq!(validate_query("   "), Err(AoiError::EmptyQuery));
    }

    #[test]
    fn test_latest_ticket_settles() {
        let mut tracker = SearchTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.is_pending());
        assert!(tracker.settle(ticket));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut tracker = SearchTracker::new();
        let old = tracker.begin();
        let new = tracker.begin();

        // L'ancienne requête arrive en retard : ignorée, pending reste vrai
        assert!(!tracker.settle(old));
        assert!(tracker.is_pending());

        assert!(tracker.settle(new));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn test_stale_completion_after_settle() {
        let mut tracker = SearchTracker::new();
        let old = tracker.begin();
        let new = tracker.begin();

        assert!(tracker.settle(new));
        // La plus récente est réglée ; l'ancienne ne doit pas l'écraser
        assert!(!tracker.settle(old));
        assert!(!tracker.is_pending());
    }
}
