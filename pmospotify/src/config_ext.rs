//! Extension pour intégrer la configuration Spotify dans pmoconfig
//!
//! Ce module fournit le trait `SpotifyConfigExt` qui ajoute à
//! `pmoconfig::Config` les réglages de la source Spotify, rangés sous
//! `sources.spotify`.
//!
//! # Exemple
//!
//! ```no_run
//! use pmoconfig::Config;
//! use pmospotify::{MemorySession, SpotifyConfigExt, SpotifyPlaylistsProvider};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load_config("")?;
//! if !config.get_spotify_enabled()? {
//!     return Ok(());
//! }
//!
//! let options = config.get_spotify_playlist_options()?;
//! let provider = SpotifyPlaylistsProvider::with_options(MemorySession::new("alice"), options);
//! # Ok(())
//! # }
//! ```

use crate::playlists::{DEFAULT_FOLDER_SEPARATOR, PlaylistOptions};
use anyhow::Result;
use pmoconfig::Config;
use serde_yaml::Value;

const ENABLED_PATH: &[&str] = &["sources", "spotify", "enabled"];
const FOLDER_SEPARATOR_PATH: &[&str] = &["sources", "spotify", "folder_separator"];

/// Trait d'extension pour gérer la configuration Spotify dans pmoconfig
pub trait SpotifyConfigExt {
    /// Vérifie si la source Spotify est activée (défaut : `true`)
    fn get_spotify_enabled(&self) -> Result<bool>;

    /// Active ou désactive la source Spotify
    fn set_spotify_enabled(&self, enabled: bool) -> Result<()>;

    /// Récupère le séparateur inséré entre les noms de dossiers
    ///
    /// Une valeur absente ou vide donne le séparateur par défaut (`/`).
    fn get_spotify_folder_separator(&self) -> Result<String>;

    /// Définit le séparateur de dossiers
    fn set_spotify_folder_separator(&self, separator: &str) -> Result<()>;

    /// Construit les options de traduction des playlists
    fn get_spotify_playlist_options(&self) -> Result<PlaylistOptions>;
}

impl SpotifyConfigExt for Config {
    fn get_spotify_enabled(&self) -> Result<bool> {
        match self.get_value(ENABLED_PATH) {
            Ok(Value::Bool(b)) => Ok(b),
            _ => Ok(true),
        }
    }

    fn set_spotify_enabled(&self, enabled: bool) -> Result<()> {
        self.set_value(ENABLED_PATH, Value::Bool(enabled))
    }

    fn get_spotify_folder_separator(&self) -> Result<String> {
        match self.get_value(FOLDER_SEPARATOR_PATH) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            Ok(_) => Ok(DEFAULT_FOLDER_SEPARATOR.to_string()), // Empty string or wrong type
            Err(_) => Ok(DEFAULT_FOLDER_SEPARATOR.to_string()), // Not configured
        }
    }

    fn set_spotify_folder_separator(&self, separator: &str) -> Result<()> {
        self.set_value(FOLDER_SEPARATOR_PATH, Value::String(separator.to_string()))
    }

    fn get_spotify_playlist_options(&self) -> Result<PlaylistOptions> {
        Ok(PlaylistOptions {
            folder_separator: self.get_spotify_folder_separator()?,
        })
    }
}
