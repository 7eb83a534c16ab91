use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, TimeZone, Utc};
use eracli::types::{
    CreatePlaylistRequest, Era, EraProfile, SavedTrack, SpotifyArtist, SpotifyTrack, Tag, Track,
};
use eracli::utils::*;

fn saved(id: Option<&str>, added_at: &str, artists: &[&str]) -> SavedTrack {
    SavedTrack {
        added_at: added_at.to_string(),
        track: SpotifyTrack {
            id: id.map(str::to_string),
            name: "Song".to_string(),
            artists: artists
                .iter()
                .map(|a| SpotifyArtist {
                    id: None,
                    name: a.to_string(),
                })
                .collect(),
        },
    }
}

fn track(id: &str, day: u32) -> Track {
    Track::new(
        id,
        "Song",
        "Artist",
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
    )
}

#[test]
fn test_plural() {
    assert_eq!(plural(0, "era", "eras"), "eras");
    assert_eq!(plural(1, "era", "eras"), "era");
    assert_eq!(plural(2, "era", "eras"), "eras");
}

#[test]
fn test_parse_added_at_rfc3339() {
    let parsed = parse_added_at("2024-03-05T10:15:00Z").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 0).unwrap());

    let offset = parse_added_at("2024-03-05T12:15:00+02:00").unwrap();
    assert_eq!(offset, parsed);
}

#[test]
fn test_parse_added_at_invalid() {
    assert!(parse_added_at("yesterday").is_none());
    assert!(parse_added_at("").is_none());
}

#[test]
fn test_convert_saved_track_joins_artists() {
    let track = convert_saved_track(saved(
        Some("abc"),
        "2024-01-02T03:04:05Z",
        &["Daft Punk", "Pharrell Williams"],
    ))
    .unwrap();

    assert_eq!(track.id, "abc");
    assert_eq!(track.artist, "Daft Punk, Pharrell Williams");
    assert_eq!(
        track.added_at,
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    );
    assert!(track.tags.is_empty());
    assert!(track.energy.is_none());
}

#[test]
fn test_convert_saved_track_skips_local_files() {
    assert!(convert_saved_track(saved(None, "2024-01-02T03:04:05Z", &["X"])).is_none());
}

#[test]
fn test_convert_saved_track_bad_timestamp_uses_epoch() {
    let track = convert_saved_track(saved(Some("abc"), "not a date", &["X"])).unwrap();
    assert_eq!(track.added_at.timestamp(), 0);
}

#[test]
fn test_apply_tags_only_touches_known_ids() {
    let mut tracks = vec![track("a", 1), track("b", 2).with_tags(vec![Tag::new("jazz", 5)])];
    let mut tags = HashMap::new();
    tags.insert("a".to_string(), vec![Tag::new("rock", 100)]);
    tags.insert("zzz".to_string(), vec![Tag::new("pop", 1)]);

    let applied = apply_tags(&mut tracks, &tags);

    assert_eq!(applied, 1);
    assert_eq!(tracks[0].tags, vec![Tag::new("rock", 100)]);
    assert_eq!(tracks[1].tags, vec![Tag::new("jazz", 5)]);
}

#[test]
fn test_era_table_rows() {
    let tracks = vec![track("a", 1), track("b", 4)];
    let eras = vec![
        Era {
            name: "Added: Mar 1, 2024 - Mar 4, 2024".to_string(),
            tracks: tracks.clone(),
            start_date: tracks[0].added_at,
            end_date: tracks[1].added_at,
            profile: EraProfile::Temporal,
            split_index: 2,
            split_total: 3,
        },
        Era {
            name: "rock & indie: Mar 1, 2024 - Mar 4, 2024".to_string(),
            tracks: tracks.clone(),
            start_date: tracks[0].added_at,
            end_date: tracks[1].added_at,
            profile: EraProfile::Tags {
                top_tags: vec!["rock".to_string(), "indie".to_string()],
            },
            split_index: 0,
            split_total: 0,
        },
    ];

    let rows = era_table_rows(&eras);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].start, "2024-03-01");
    assert_eq!(rows[0].end, "2024-03-04");
    assert_eq!(rows[0].tracks, 2);
    assert_eq!(rows[0].part, "2/3");
    assert_eq!(rows[1].name, "rock & indie");
    assert_eq!(rows[1].part, "");
}

#[test]
fn test_parse_positive() {
    assert_eq!(parse_positive("3"), Ok(3));
    assert!(parse_positive("0").is_err());
    assert!(parse_positive("-1").is_err());
    assert!(parse_positive("three").is_err());
}

#[test]
fn test_parse_gap_days() {
    assert_eq!(parse_gap_days("7"), Ok(Duration::days(7)));
    assert_eq!(parse_gap_days("0.5"), Ok(Duration::hours(12)));
    assert!(parse_gap_days("0").is_err());
    assert!(parse_gap_days("-2").is_err());
    assert!(parse_gap_days("NaN").is_err());
    assert!(parse_gap_days("week").is_err());
}

fn era_of(profile: EraProfile) -> Era {
    let tracks = vec![track("a", 1), track("b", 4)];
    Era {
        name: "Added: Mar 1, 2024 - Mar 4, 2024".to_string(),
        start_date: tracks[0].added_at,
        end_date: tracks[1].added_at,
        tracks,
        profile,
        split_index: 0,
        split_total: 0,
    }
}

#[test]
fn test_parse_count_accepts_zero() {
    assert_eq!(parse_count("0"), Ok(0));
    assert_eq!(parse_count("30"), Ok(30));
    assert!(parse_count("-1").is_err());
    assert!(parse_count("lots").is_err());
}

#[test]
fn test_limit_eras() {
    let eras = vec![
        era_of(EraProfile::Temporal),
        era_of(EraProfile::Temporal),
        era_of(EraProfile::Temporal),
    ];
    assert_eq!(limit_eras(&eras, 2).len(), 2);
    assert_eq!(limit_eras(&eras, 0).len(), 3);
    assert_eq!(limit_eras(&eras, 10).len(), 3);
}

#[test]
fn test_track_uris() {
    assert_eq!(
        track_uris(&[track("abc", 1), track("def", 2)]),
        vec!["spotify:track:abc", "spotify:track:def"]
    );
}

#[test]
fn test_playlist_description_per_profile() {
    assert_eq!(
        playlist_description(&era_of(EraProfile::Temporal)),
        "Tracks added from 2024-03-01 to 2024-03-04."
    );
    assert_eq!(
        playlist_description(&era_of(EraProfile::Tags {
            top_tags: vec!["rock".to_string(), "indie".to_string()]
        })),
        "Top tags: rock, indie. Added from 2024-03-01 to 2024-03-04."
    );

    let centroid = BTreeMap::from([
        ("energy".to_string(), 0.3),
        ("valence".to_string(), 0.8),
        ("danceability".to_string(), 0.4),
        ("acousticness".to_string(), 0.2),
    ]);
    let mood = playlist_description(&era_of(EraProfile::Mood { centroid }));
    assert!(mood.starts_with("Relaxed and uplifting"), "{}", mood);
    assert!(mood.ends_with("Added from 2024-03-01 to 2024-03-04."));
}

#[test]
fn test_era_playlist_request_is_private() {
    let era = era_of(EraProfile::Temporal);
    assert_eq!(
        era_playlist_request(&era),
        CreatePlaylistRequest {
            name: "Added: Mar 1, 2024 - Mar 4, 2024".to_string(),
            description: "Tracks added from 2024-03-01 to 2024-03-04.".to_string(),
            public: false,
            collaborative: false,
        }
    );
}
