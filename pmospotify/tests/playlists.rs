use pmoconfig::Config;
use pmospotify::{
    ContainerEntry, FolderMarker, LoadState, MemoryPlaylist, MemorySession, Playlist,
    PlaylistsProvider, RemotePlaylist, RemoteTrack, SessionError, SpotifyConfigExt, SpotifyError,
    SpotifyPlaylistsProvider, Track,
};
use std::sync::Arc;

const FIXTURE: &str = include_str!("fixtures/session.yaml");

fn foo() -> MemoryPlaylist {
    MemoryPlaylist::new("spotify:playlist:alice:foo", "Foo", "alice").with_tracks(vec![
        RemoteTrack {
            uri: "spotify:track:abc".to_string(),
            name: "ABC 123".to_string(),
            length: 174_300,
            track_no: 7,
        },
    ])
}

fn baz() -> MemoryPlaylist {
    MemoryPlaylist::new("spotify:playlist:bob:baz", "Baz", "bob")
}

fn unloaded() -> MemoryPlaylist {
    MemoryPlaylist::new("spotify:playlist:alice:pending", "Pending", "alice")
        .with_state(LoadState::Pending)
}

/// Foo, then Baz inside folder Bar, then a playlist still loading
fn session() -> MemorySession {
    MemorySession::new("alice").with_container(vec![
        ContainerEntry::Playlist(foo()),
        ContainerEntry::Folder(FolderMarker::start(17, "Bar")),
        ContainerEntry::Playlist(baz()),
        ContainerEntry::Folder(FolderMarker::end(17)),
        ContainerEntry::Playlist(unloaded()),
    ])
}

fn expected_listing() -> Vec<Playlist> {
    vec![
        Playlist::new(
            "Foo",
            "spotify:playlist:alice:foo",
            vec![Track::new("spotify:track:abc", "ABC 123", 174_300, 7)],
        ),
        Playlist::new("Bar/Baz by bob", "spotify:playlist:bob:baz", vec![]),
    ]
}

fn assert_is_provider<P: PlaylistsProvider>(_: &P) {}

#[test]
fn test_is_a_playlists_provider() {
    let provider = SpotifyPlaylistsProvider::new(session());
    assert_is_provider(&provider);
}

#[test]
fn test_lookup() {
    let provider = SpotifyPlaylistsProvider::new(session());

    let playlist = provider
        .lookup("spotify:playlist:alice:foo")
        .unwrap()
        .expect("playlist");

    assert_eq!(playlist.uri, "spotify:playlist:alice:foo");
    assert_eq!(playlist.name, "Foo");
    assert_eq!(
        playlist.tracks,
        vec![Track::new("spotify:track:abc", "ABC 123", 174_300, 7)]
    );
}

#[test]
fn test_lookup_loads_playlist_when_a_playlist_isnt_loaded() {
    let pending = MemoryPlaylist::new("spotify:playlist:alice:foo", "Foo", "alice")
        .with_state(LoadState::Pending);
    let session = MemorySession::new("alice").with_playlist(pending.clone());
    let provider = SpotifyPlaylistsProvider::new(session);

    let playlist = provider
        .lookup("spotify:playlist:alice:foo")
        .unwrap()
        .expect("playlist");

    assert_eq!(pending.load_calls(), 1);
    assert!(pending.is_loaded());
    assert_eq!(playlist.uri, "spotify:playlist:alice:foo");
    assert_eq!(playlist.name, "Foo");
}

#[test]
fn test_lookup_does_not_reload_a_loaded_playlist() {
    let loaded = foo();
    let provider =
        SpotifyPlaylistsProvider::new(MemorySession::new("alice").with_playlist(loaded.clone()));

    provider.lookup("spotify:playlist:alice:foo").unwrap();

    assert_eq!(loaded.load_calls(), 0);
}

#[test]
fn test_lookup_when_playlist_is_unknown() {
    let provider = SpotifyPlaylistsProvider::new(session());

    assert_eq!(provider.lookup("foo").unwrap(), None);
}

#[test]
fn test_lookup_of_playlist_with_other_owner() {
    let session = MemorySession::new("alice").with_playlist(MemoryPlaylist::new(
        "spotify:playlist:alice:foo",
        "Foo",
        "bob",
    ));
    let provider = SpotifyPlaylistsProvider::new(session);

    let playlist = provider
        .lookup("spotify:playlist:alice:foo")
        .unwrap()
        .expect("playlist");

    assert_eq!(playlist.uri, "spotify:playlist:alice:foo");
    assert_eq!(playlist.name, "Foo by bob");
}

#[test]
fn test_lookup_propagates_load_failure() {
    let failing = MemoryPlaylist::new("spotify:playlist:alice:foo", "Foo", "alice")
        .with_state(LoadState::Failing);
    let provider =
        SpotifyPlaylistsProvider::new(MemorySession::new("alice").with_playlist(failing));

    let err = provider.lookup("spotify:playlist:alice:foo").unwrap_err();

    match err {
        SpotifyError::Load { uri, source } => {
            assert_eq!(uri, "spotify:playlist:alice:foo");
            assert!(matches!(source, SessionError::LoadFailed(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lookup_is_absent_when_load_does_not_complete() {
    let stuck = MemoryPlaylist::new("spotify:playlist:alice:foo", "Foo", "alice")
        .with_state(LoadState::Stuck);
    let provider =
        SpotifyPlaylistsProvider::new(MemorySession::new("alice").with_playlist(stuck.clone()));

    assert_eq!(provider.lookup("spotify:playlist:alice:foo").unwrap(), None);
    assert_eq!(stuck.load_calls(), 1);
}

#[test]
fn test_lookup_propagates_unavailable_session() {
    let provider = SpotifyPlaylistsProvider::new(session().with_unavailable("offline"));

    let err = provider.lookup("spotify:playlist:alice:foo").unwrap_err();

    assert!(matches!(
        err,
        SpotifyError::Session(SessionError::Unavailable(_))
    ));
}

#[test]
fn test_playlists_when_playlist_container_isnt_loaded() {
    let provider = SpotifyPlaylistsProvider::new(session().without_container());

    assert!(provider.playlists().is_empty());
    assert!(provider.try_playlists().unwrap().is_empty());
}

#[test]
fn test_playlists_with_folders_and_ignored_unloaded_playlist() {
    let provider = SpotifyPlaylistsProvider::new(session());

    assert_eq!(provider.playlists(), expected_listing());
    assert_eq!(provider.try_playlists().unwrap(), expected_listing());
}

#[test]
fn test_playlists_is_idempotent() {
    let provider = SpotifyPlaylistsProvider::new(session());

    assert_eq!(provider.playlists(), provider.playlists());
}

#[test]
fn test_playlists_include_playlist_once_loaded_by_lookup() {
    let session = Arc::new(session());
    let provider = SpotifyPlaylistsProvider::new(Arc::clone(&session));

    assert_eq!(provider.playlists().len(), 2);

    provider
        .lookup("spotify:playlist:alice:pending")
        .unwrap()
        .expect("playlist");

    let names = provider
        .playlists()
        .into_iter()
        .map(|p| p.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Foo", "Bar/Baz by bob", "Pending"]);
}

#[test]
fn test_strict_listing_rejects_mismatched_folder_ids() {
    let session = MemorySession::new("alice").with_container(vec![
        ContainerEntry::Folder(FolderMarker::start(17, "Bar")),
        ContainerEntry::Playlist(baz()),
        ContainerEntry::Folder(FolderMarker::end(18)),
        ContainerEntry::Playlist(foo()),
    ]);
    let provider = SpotifyPlaylistsProvider::new(&session);

    assert!(matches!(
        provider.try_playlists(),
        Err(SpotifyError::MalformedContainer(_))
    ));
    // Best effort: the end marker still closes the folder
    assert_eq!(
        provider
            .playlists()
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>(),
        vec!["Bar/Baz by bob", "Foo"]
    );
}

#[test]
fn test_fixture_matches_programmatic_session() {
    let session = MemorySession::from_yaml_str(FIXTURE).unwrap();
    let provider = SpotifyPlaylistsProvider::new(&session);

    assert_eq!(provider.playlists(), expected_listing());
    assert!(
        !session
            .playlist("spotify:playlist:alice:pending")
            .expect("pending playlist")
            .is_loaded()
    );
}

#[test]
fn test_options_from_config() {
    let config =
        Config::from_yaml_str("sources:\n  spotify:\n    folder_separator: \" :: \"\n").unwrap();
    let options = config.get_spotify_playlist_options().unwrap();
    let provider = SpotifyPlaylistsProvider::with_options(session(), options);

    assert_eq!(provider.playlists()[1].name, "Bar :: Baz by bob");
}
