//! Modèle générique de playlist exposé au serveur hôte

use serde::{Deserialize, Serialize};

/// Playlist telle que consommée par le serveur hôte
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Nom affiché, préfixé par les dossiers et suffixé par le propriétaire
    pub name: String,
    /// URI Spotify d'origine
    pub uri: String,
    /// Pistes, dans l'ordre de la playlist distante
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Piste telle que consommée par le serveur hôte
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    /// Durée en millisecondes
    pub length: u64,
    pub track_no: u32,
}

impl Playlist {
    pub fn new(name: impl Into<String>, uri: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            tracks,
        }
    }
}

impl Track {
    pub fn new(uri: impl Into<String>, name: impl Into<String>, length: u64, track_no: u32) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            length,
            track_no,
        }
    }
}
