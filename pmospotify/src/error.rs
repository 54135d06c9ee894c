//! Gestion des erreurs pour la traduction des playlists Spotify

use thiserror::Error;

/// Type Result personnalisé pour pmospotify
pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Erreurs remontées par une session Spotify distante
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// URI inconnue du service
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Le chargement d'un objet a échoué
    #[error("Load failed: {0}")]
    LoadFailed(String),

    /// Session indisponible (déconnectée, hors ligne, ...)
    #[error("Session unavailable: {0}")]
    Unavailable(String),
}

impl SessionError {
    /// Vérifie si l'erreur signale une ressource inconnue
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::NotFound(_))
    }
}

/// Erreurs possibles lors de la traduction des playlists
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Erreur de la session distante
    #[error("Spotify session error: {0}")]
    Session(#[from] SessionError),

    /// Le chargement synchrone d'une playlist a échoué
    #[error("Failed to load playlist {uri}: {source}")]
    Load {
        uri: String,
        #[source]
        source: SessionError,
    },

    /// Marqueurs de dossiers déséquilibrés dans le conteneur
    #[error("Malformed playlist container: {0}")]
    MalformedContainer(String),

    /// Fixture YAML invalide
    #[error("Fixture parsing error: {0}")]
    Fixture(#[from] serde_yaml::Error),
}
