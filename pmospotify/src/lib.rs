//! # pmospotify - Playlists Spotify pour PMOMusic
//!
//! Cette crate traduit les playlists d'une session Spotify dans le modèle de
//! playlist générique du serveur PMOMusic.
//!
//! ## Vue d'ensemble
//!
//! - `SpotifyPlaylistsProvider` : recherche d'une playlist par URI et listing
//!   complet du conteneur de l'utilisateur
//! - `session` : contrat de la session Spotify (`RemoteSession`, `RemotePlaylist`)
//! - `models` : modèle exposé au serveur (`Playlist`, `Track`)
//! - `memory` : session en mémoire pour les tests et les démos
//! - `config_ext` : intégration avec `pmoconfig`
//!
//! ## Règles de nommage
//!
//! - une playlist appartenant à un autre utilisateur est suffixée par
//!   ` by {propriétaire}`
//! - une playlist rangée dans des dossiers est préfixée par leurs noms,
//!   du plus externe au plus interne : `Bar/Baz by bob`
//! - le listing ignore les playlists pas encore chargées, la recherche par
//!   URI les charge (une seule fois, de façon bloquante)
//!
//! ## Utilisation
//!
//! ```rust
//! use pmospotify::{
//!     ContainerEntry, FolderMarker, MemoryPlaylist, MemorySession, PlaylistsProvider,
//!     SpotifyPlaylistsProvider,
//! };
//!
//! let session = MemorySession::new("alice").with_container(vec![
//!     ContainerEntry::Folder(FolderMarker::start(17, "Bar")),
//!     ContainerEntry::Playlist(MemoryPlaylist::new("spotify:playlist:bob:baz", "Baz", "bob")),
//!     ContainerEntry::Folder(FolderMarker::end(17)),
//! ]);
//!
//! let provider = SpotifyPlaylistsProvider::new(session);
//! assert_eq!(provider.playlists()[0].name, "Bar/Baz by bob");
//! ```
//!
//! ## Gestion des erreurs
//!
//! Une URI inconnue n'est pas une erreur : `lookup` renvoie `Ok(None)`.
//! Seuls les échecs de la session (chargement, déconnexion) remontent en
//! `SpotifyError`.

pub mod config_ext;
pub mod error;
mod folders;
pub mod memory;
pub mod models;
pub mod playlists;
pub mod provider;
pub mod session;

pub use config_ext::SpotifyConfigExt;
pub use error::{Result, SessionError, SpotifyError};
pub use memory::{LoadState, MemoryPlaylist, MemorySession};
pub use models::{Playlist, Track};
pub use playlists::{PlaylistOptions, SpotifyPlaylistsProvider};
pub use provider::PlaylistsProvider;
pub use session::{
    ContainerEntry, FolderKind, FolderMarker, RemotePlaylist, RemoteSession, RemoteTrack,
    RemoteUser,
};
