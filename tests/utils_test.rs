use std::str::FromStr;

use spotidash::spotify::auth::encode_client_creds;
use spotidash::types::{Artist, TimeRange, Track, TrackArtist};
use spotidash::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artist_name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec![TrackArtist {
            id: Some(format!("{}_artist_id", id)),
            name: artist_name.to_string(),
        }],
    }
}

// Helper function to create a test artist
fn create_test_artist(id: &str, name: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

#[test]
fn test_encode_client_creds() {
    // Standard Base64 of "id:secret"
    assert_eq!(encode_client_creds("id", "secret"), "aWQ6c2VjcmV0");

    // Different inputs produce different credentials
    assert_ne!(
        encode_client_creds("id", "secret"),
        encode_client_creds("id2", "secret")
    );
}

#[test]
fn test_extract_top_tracks_preserves_order_and_length() {
    let tracks = vec![
        create_test_track("t1", "Song One", "Artist A"),
        create_test_track("t2", "Song Two", "Artist B"),
        create_test_track("t3", "Song Three", "Artist C"),
    ];

    let view = extract_top_tracks(&tracks);

    assert_eq!(view.tracks, vec!["Song One", "Song Two", "Song Three"]);
    assert_eq!(view.artists, vec!["Artist A", "Artist B", "Artist C"]);
}

#[test]
fn test_extract_top_tracks_uses_first_artist() {
    let mut track = create_test_track("t1", "Duet", "Lead Artist");
    track.artists.push(TrackArtist {
        id: None,
        name: "Featured Artist".to_string(),
    });

    let view = extract_top_tracks(&[track]);
    assert_eq!(view.artists, vec!["Lead Artist"]);
}

#[test]
fn test_extract_top_tracks_empty_input() {
    let view = extract_top_tracks(&[]);
    assert!(view.tracks.is_empty());
    assert!(view.artists.is_empty());
}

#[test]
fn test_extract_top_artists_preserves_order() {
    let artists = vec![
        create_test_artist("a1", "Zeta", &[]),
        create_test_artist("a2", "Alpha", &[]),
    ];

    // Input order, not alphabetical order
    assert_eq!(extract_top_artists(&artists), vec!["Zeta", "Alpha"]);
    assert!(extract_top_artists(&[]).is_empty());
}

#[test]
fn test_extract_genre_counts_sorted_non_increasing() {
    let artists = vec![
        create_test_artist("a1", "Artist A", &["rock", "indie"]),
        create_test_artist("a2", "Artist B", &["rock", "pop"]),
        create_test_artist("a3", "Artist C", &["rock"]),
    ];

    let counts = extract_genre_counts(&artists);

    // Sorted by count descending
    for window in counts.windows(2) {
        assert!(window[0].1 >= window[1].1);
    }
    assert_eq!(counts[0], ("rock".to_string(), 3));

    // Sum of counts equals total genre-tag occurrences
    let total: u64 = counts.iter().map(|(_, c)| c).sum();
    assert_eq!(total, 5);
}

#[test]
fn test_extract_genre_counts_ties_broken_by_name() {
    let artists = vec![
        create_test_artist("a1", "Artist A", &["pop", "ambient"]),
        create_test_artist("a2", "Artist B", &["rock"]),
    ];

    let counts = extract_genre_counts(&artists);

    // All counts equal; order falls back to genre name ascending
    assert_eq!(
        counts,
        vec![
            ("ambient".to_string(), 1),
            ("pop".to_string(), 1),
            ("rock".to_string(), 1),
        ]
    );
}

#[test]
fn test_extract_genre_counts_empty_input() {
    assert!(extract_genre_counts(&[]).is_empty());

    // Artists without genre tags contribute nothing
    let artists = vec![create_test_artist("a1", "Artist A", &[])];
    assert!(extract_genre_counts(&artists).is_empty());
}

#[test]
fn test_time_range_round_trip() {
    for range in TimeRange::ALL {
        assert_eq!(TimeRange::from_str(range.as_str()).unwrap(), range);
    }

    assert_eq!(TimeRange::LongTerm.to_string(), "long_term");
    assert!(TimeRange::from_str("last_week").is_err());
}
