//! Error types for report generation

use thiserror::Error;

/// User-facing message for any upstream failure
pub const GENERATION_FAILED_MESSAGE: &str = "Une erreur est survenue lors de la génération du rapport. Vérifiez votre connexion et la clé OPENAI_API_KEY côté serveur.";

/// Error type for report generation
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("Adresse, type de bien, niveau de détail et notes sont requis.")]
    MissingFields(Vec<&'static str>),

    #[error("Clé API manquante. Configurez OPENAI_API_KEY côté serveur.")]
    MissingCredential,

    #[error("Réponse vide du modèle.")]
    EmptyResponse,

    /// Upstream failure; the inner detail is logged, never shown to the user
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    GenerationFailed(String),

    #[error("Génération annulée.")]
    Cancelled,
}
