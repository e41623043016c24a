use std::{cmp::Ordering, collections::HashMap};

use crate::types::{Artist, TopTracksView, Track};

/// Flattens a top-tracks list into parallel artist/track name vectors.
///
/// The first listed artist represents each track; input order and length
/// are preserved. Empty input yields empty vectors.
pub fn extract_top_tracks(tracks: &[Track]) -> TopTracksView {
    let mut view = TopTracksView {
        artists: Vec::with_capacity(tracks.len()),
        tracks: Vec::with_capacity(tracks.len()),
    };

    for track in tracks {
        view.artists.push(
            track
                .artists
                .first()
                .map(|artist| artist.name.clone())
                .unwrap_or_default(),
        );
        view.tracks.push(track.name.clone());
    }

    view
}

/// Flattens a top-artists list into its names, order preserved.
pub fn extract_top_artists(artists: &[Artist]) -> Vec<String> {
    artists.iter().map(|artist| artist.name.clone()).collect()
}

/// Tallies every genre tag across the given artists.
///
/// Sorted by count descending; ties are broken by genre name ascending so
/// the output is deterministic.
pub fn extract_genre_counts(artists: &[Artist]) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for artist in artists {
        for genre in &artist.genres {
            *counts.entry(genre.as_str()).or_insert(0) += 1;
        }
    }

    let mut tally: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(genre, count)| (genre.to_string(), count))
        .collect();

    tally.sort_by(|a, b| {
        match b.1.cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0), // secondary sort: genre ascending
            other => other,
        }
    });

    tally
}
