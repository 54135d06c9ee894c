//! Exemple de listing des playlists Spotify
//!
//! Cet exemple montre comment :
//! - Charger une session en mémoire depuis une fixture YAML
//! - Lire les options de traduction depuis pmoconfig
//! - Lister les playlists et en rechercher une par URI
//!
//! Usage:
//!   cargo run -p pmospotify --example list_playlists -- [fixture.yaml] [uri]

use pmoconfig::Config;
use pmospotify::{MemorySession, PlaylistsProvider, SpotifyConfigExt, SpotifyPlaylistsProvider};

const DEFAULT_FIXTURE: &str = include_str!("../tests/fixtures/session.yaml");

fn main() -> anyhow::Result<()> {
    // Initialiser le logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    let fixture = match args.get(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_FIXTURE.to_string(),
    };
    let session = MemorySession::from_yaml_str(&fixture)?;

    let config = Config::from_yaml_str("")?;
    if !config.get_spotify_enabled()? {
        println!("Spotify est désactivé");
        return Ok(());
    }
    let provider =
        SpotifyPlaylistsProvider::with_options(session, config.get_spotify_playlist_options()?);

    println!("=== Playlists ===\n");
    for playlist in provider.playlists() {
        println!("  {} ({} piste(s))", playlist.name, playlist.tracks.len());
        println!("    {}", playlist.uri);
    }

    if let Some(uri) = args.get(2) {
        println!("\n--- Recherche de {} ---", uri);
        match provider.lookup(uri)? {
            Some(playlist) => {
                println!("✓ {}", playlist.name);
                for track in &playlist.tracks {
                    println!(
                        "  {}. {} ({} ms) - {}",
                        track.track_no, track.name, track.length, track.uri
                    );
                }
            }
            None => println!("✗ Playlist inconnue"),
        }
    }

    Ok(())
}
