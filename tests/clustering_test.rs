use chrono::{DateTime, Duration, TimeZone, Utc};
use eracli::EraError;
use std::collections::HashMap;

use eracli::clustering::tags::{
    VocabularyEntry, build_tag_vector, build_tag_vocabulary, extract_top_tags,
};
use eracli::clustering::{
    MoodConfig, Observation, Strategy, TagClusterConfig, TemporalConfig, detect, detect_eras,
    detect_mood_eras, detect_tag_eras, format_era_summary, mood, split_large_eras,
};
use eracli::types::{Era, EraProfile, Tag, Track};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn track_at(id: &str, at: DateTime<Utc>) -> Track {
    Track::new(id, &format!("Song {}", id), "Artist", at)
}

fn tracks_on_days(days: &[i64]) -> Vec<Track> {
    days.iter()
        .enumerate()
        .map(|(i, d)| track_at(&format!("t{}", i), base() + Duration::days(*d)))
        .collect()
}

fn tagged(id: &str, day: i64, tags: &[(&str, u32)]) -> Track {
    track_at(id, base() + Duration::days(day))
        .with_tags(tags.iter().map(|(n, c)| Tag::new(n, *c)).collect())
}

fn with_mood(id: &str, day: i64, f: [f32; 4]) -> Track {
    let mut t = track_at(id, base() + Duration::days(day));
    t.energy = Some(f[0]);
    t.valence = Some(f[1]);
    t.danceability = Some(f[2]);
    t.acousticness = Some(f[3]);
    t
}

fn ids(tracks: &[Track]) -> Vec<String> {
    let mut ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
    ids.sort();
    ids
}

#[test]
fn test_empty_input_has_no_eras() {
    let (eras, outliers) = detect_eras(&[], &TemporalConfig::default());
    assert!(eras.is_empty());
    assert!(outliers.is_empty());

    let (eras, outliers) = detect_tag_eras(&[], &TagClusterConfig::default());
    assert!(eras.is_empty() && outliers.is_empty());

    let (eras, outliers) = detect_mood_eras(&[], &MoodConfig::default());
    assert!(eras.is_empty() && outliers.is_empty());
}

#[test]
fn test_gap_equal_to_threshold_starts_new_era() {
    let tracks = tracks_on_days(&[0, 1, 2, 9, 10, 11]);
    let (eras, outliers) = detect_eras(&tracks, &TemporalConfig::default());

    assert_eq!(eras.len(), 2);
    assert!(outliers.is_empty());
    assert_eq!(ids(&eras[0].tracks), vec!["t0", "t1", "t2"]);
    assert_eq!(ids(&eras[1].tracks), vec!["t3", "t4", "t5"]);
}

#[test]
fn test_gap_just_below_threshold_joins_era() {
    let just_below = Duration::days(2) + Duration::days(7) - Duration::seconds(1);
    let mut tracks = tracks_on_days(&[0, 1, 2]);
    tracks.push(track_at("t3", base() + just_below));
    tracks.push(track_at("t4", base() + just_below + Duration::days(1)));
    tracks.push(track_at("t5", base() + just_below + Duration::days(2)));

    let (eras, outliers) = detect_eras(&tracks, &TemporalConfig::default());

    assert_eq!(eras.len(), 1);
    assert_eq!(eras[0].tracks.len(), 6);
    assert!(outliers.is_empty());
}

#[test]
fn test_small_runs_become_outliers() {
    let tracks = tracks_on_days(&[0, 1, 20, 21, 22]);
    let (eras, outliers) = detect_eras(&tracks, &TemporalConfig::default());

    assert_eq!(eras.len(), 1);
    assert_eq!(ids(&eras[0].tracks), vec!["t2", "t3", "t4"]);
    assert_eq!(ids(&outliers), vec!["t0", "t1"]);
}

#[test]
fn test_every_track_ends_up_exactly_once() {
    let tracks = tracks_on_days(&[40, 0, 1, 2, 15, 30, 31, 32, 33, 60]);
    let (eras, outliers) = detect_eras(&tracks, &TemporalConfig::default());

    let mut seen: Vec<Track> = outliers.clone();
    for era in &eras {
        seen.extend(era.tracks.iter().cloned());
    }
    assert_eq!(ids(&seen), ids(&tracks));
}

#[test]
fn test_input_is_not_modified() {
    let tracks = tracks_on_days(&[5, 0, 3, 1, 2, 4]);
    let before = tracks.clone();

    let _ = detect_eras(&tracks, &TemporalConfig::default());

    assert_eq!(tracks, before);
}

#[test]
fn test_eras_are_chronological_and_tracks_sorted() {
    let tracks = tracks_on_days(&[31, 30, 32, 2, 0, 1]);
    let (eras, _) = detect_eras(&tracks, &TemporalConfig::default());

    assert_eq!(eras.len(), 2);
    assert!(eras[0].start_date < eras[1].start_date);
    for era in &eras {
        assert!(era.tracks.windows(2).all(|w| w[0].added_at <= w[1].added_at));
        assert_eq!(era.start_date, era.tracks[0].added_at);
        assert_eq!(era.end_date, era.tracks[era.tracks.len() - 1].added_at);
    }
}

#[test]
fn test_identical_timestamps_form_one_era() {
    let tracks: Vec<Track> = (0..5)
        .map(|i| track_at(&format!("t{}", i), base()))
        .collect();
    let (eras, outliers) = detect_eras(&tracks, &TemporalConfig::default());

    assert_eq!(eras.len(), 1);
    assert_eq!(eras[0].tracks.len(), 5);
    assert!(outliers.is_empty());
    assert_eq!(eras[0].name, "Added: Jan 1, 2024");
}

#[test]
fn test_split_cuts_at_largest_gap() {
    let mut tracks: Vec<Track> = (0..7)
        .map(|h| track_at(&format!("a{}", h), base() + Duration::hours(h)))
        .collect();
    tracks.extend((0..5).map(|h| track_at(&format!("b{}", h), base() + Duration::hours(30 + h))));

    let (eras, _) = detect_eras(&tracks, &TemporalConfig::default());
    assert_eq!(eras.len(), 1);

    let split = split_large_eras(eras, 10);

    assert_eq!(split.len(), 2);
    assert_eq!(split[0].tracks.len(), 7);
    assert_eq!(split[1].tracks.len(), 5);
    assert_eq!(split[0].tracks[6].id, "a6");
    assert_eq!(split[1].tracks[0].id, "b0");
    assert_eq!((split[0].split_index, split[0].split_total), (1, 2));
    assert_eq!((split[1].split_index, split[1].split_total), (2, 2));
    assert!(split[0].name.starts_with("Added (part 1/2): "));
}

#[test]
fn test_split_leaves_small_eras_alone() {
    let tracks = tracks_on_days(&[0, 1, 2, 20, 21, 22, 23]);
    let (eras, _) = detect_eras(&tracks, &TemporalConfig::default());
    let before = eras.clone();

    let split = split_large_eras(eras, 10);

    assert_eq!(split, before);
    assert!(split.iter().all(|e| !e.is_split()));
}

#[test]
fn test_detect_orders_most_recent_first() {
    let tracks = tracks_on_days(&[0, 1, 2, 30, 31, 32, 60, 61, 62]);
    let detection = detect(&tracks, &Strategy::Temporal(TemporalConfig::default())).unwrap();

    assert_eq!(detection.eras.len(), 3);
    assert!(
        detection
            .eras
            .windows(2)
            .all(|w| w[0].start_date > w[1].start_date)
    );
    assert_eq!(detection.total_tracks(), tracks.len());
}

#[test]
fn test_detect_rejects_invalid_config() {
    let tracks = tracks_on_days(&[0, 1, 2]);

    let temporal = Strategy::Temporal(TemporalConfig {
        min_cluster_size: 0,
        ..TemporalConfig::default()
    });
    assert!(matches!(detect(&tracks, &temporal), Err(EraError::Config(_))));

    let tags = Strategy::Tags(TagClusterConfig {
        num_clusters: 0,
        ..TagClusterConfig::default()
    });
    assert!(matches!(detect(&tracks, &tags), Err(EraError::Config(_))));

    let mood = Strategy::Mood(MoodConfig {
        min_cluster_size: 0,
        ..MoodConfig::default()
    });
    assert!(matches!(detect(&tracks, &mood), Err(EraError::Config(_))));
}

#[test]
fn test_tag_clusters_separate_genres() {
    let tracks = vec![
        tagged("r1", 0, &[("rock", 100), ("guitar", 60)]),
        tagged("r2", 1, &[("rock", 90), ("guitar", 70)]),
        tagged("r3", 2, &[("rock", 95), ("guitar", 50)]),
        tagged("r4", 3, &[("rock", 80), ("indie", 40)]),
        tagged("e1", 10, &[("electronic", 100), ("techno", 60)]),
        tagged("e2", 11, &[("electronic", 90), ("techno", 80)]),
        tagged("e3", 12, &[("electronic", 85), ("house", 50)]),
        tagged("e4", 13, &[("electronic", 100), ("techno", 40)]),
        track_at("untagged", base()),
    ];
    let cfg = TagClusterConfig {
        num_clusters: 2,
        ..TagClusterConfig::default()
    };

    let (eras, outliers) = detect_tag_eras(&tracks, &cfg);

    assert_eq!(eras.len(), 2);
    assert_eq!(ids(&outliers), vec!["untagged"]);

    // most recent first
    assert_eq!(ids(&eras[0].tracks), vec!["e1", "e2", "e3", "e4"]);
    assert_eq!(ids(&eras[1].tracks), vec!["r1", "r2", "r3", "r4"]);
    assert_eq!(eras[0].top_tags()[0], "electronic");
    assert_eq!(eras[1].top_tags()[0], "rock");
    assert!(matches!(eras[1].profile, EraProfile::Tags { .. }));
    assert!(eras[1].name.starts_with("rock & guitar"));
}

#[test]
fn test_too_few_tagged_tracks_are_all_outliers() {
    let tracks = vec![
        tagged("a", 0, &[("rock", 10)]),
        tagged("b", 1, &[("jazz", 10)]),
        track_at("c", base()),
    ];
    let (eras, outliers) = detect_tag_eras(&tracks, &TagClusterConfig::default());

    assert!(eras.is_empty());
    assert_eq!(ids(&outliers), vec!["a", "b", "c"]);
}

#[test]
fn test_mood_tracks_without_features_are_outliers() {
    let tracks = vec![
        with_mood("p1", 0, [0.9, 0.9, 0.9, 0.1]),
        with_mood("p2", 1, [0.85, 0.8, 0.9, 0.05]),
        with_mood("p3", 2, [0.95, 0.85, 0.8, 0.1]),
        with_mood("m1", 3, [0.2, 0.2, 0.3, 0.9]),
        with_mood("m2", 4, [0.25, 0.15, 0.2, 0.8]),
        with_mood("m3", 5, [0.15, 0.1, 0.25, 0.85]),
        track_at("plain", base()),
    ];
    let cfg = MoodConfig {
        num_clusters: 2,
        ..MoodConfig::default()
    };

    let (eras, outliers) = detect_mood_eras(&tracks, &cfg);

    assert_eq!(eras.len(), 2);
    assert_eq!(ids(&outliers), vec!["plain"]);
    let names: Vec<&str> = eras.iter().map(|e| e.name.as_str()).collect();
    assert!(names.iter().any(|n| n.starts_with("Upbeat Party")));
    assert!(
        names
            .iter()
            .any(|n| n.starts_with("Reflective & Melancholy (Acoustic)"))
    );
}

#[test]
fn test_summary_of_detection() {
    let tracks = tracks_on_days(&[0, 1, 2, 3, 30]);
    let detection = detect(&tracks, &Strategy::Temporal(TemporalConfig::default())).unwrap();

    let out = format_era_summary(&detection.eras, &detection.outliers);

    assert!(out.starts_with("Found 1 era from 5 tracks (1 outlier skipped)\n"));
    assert!(out.contains("Era 1: 2024-01-01 to 2024-01-04 (4 tracks)"));
    assert!(out.contains("  ... and 1 more"));
}

fn assert_conserved(eras: &[Era], outliers: &[Track], input: &[Track]) {
    let mut seen: Vec<Track> = outliers.to_vec();
    for era in eras {
        seen.extend(era.tracks.iter().cloned());
    }
    assert_eq!(seen.len(), input.len());
    assert_eq!(ids(&seen), ids(input));
}

#[test]
fn test_validate_rejects_sub_second_gap() {
    let cfg = TemporalConfig {
        gap_threshold: Duration::milliseconds(500),
        ..TemporalConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(EraError::Config(_))));
    assert!(TemporalConfig::default().validate().is_ok());
    assert!(TagClusterConfig::default().validate().is_ok());
    assert!(
        TagClusterConfig {
            max_tags: 0,
            ..TagClusterConfig::default()
        }
        .validate()
        .is_err()
    );
}

#[test]
fn test_split_picks_largest_gaps_in_position_order() {
    // gaps after t2 (10h) and t5 (50h)
    let tracks: Vec<Track> = [0, 1, 2, 12, 13, 14, 64, 65, 66]
        .iter()
        .enumerate()
        .map(|(i, h)| track_at(&format!("t{}", i), base() + Duration::hours(*h)))
        .collect();
    let (eras, _) = detect_eras(&tracks, &TemporalConfig::default());
    assert_eq!(eras.len(), 1);

    let subs = split_large_eras(eras, 3);

    assert_eq!(subs.len(), 3);
    let firsts: Vec<&str> = subs.iter().map(|e| e.tracks[0].id.as_str()).collect();
    assert_eq!(firsts, vec!["t0", "t3", "t6"]);
    for (i, sub) in subs.iter().enumerate() {
        assert_eq!(sub.tracks.len(), 3);
        assert_eq!((sub.split_index, sub.split_total), (i + 1, 3));
    }
    assert_eq!(subs[1].name, "Added (part 2/3): Jan 2, 2024");
}

#[test]
fn test_split_keeps_tag_profile_and_label() {
    let tracks: Vec<Track> = [0, 1, 2, 3, 20, 21, 22, 23]
        .iter()
        .map(|d| tagged(&format!("r{}", d), *d, &[("rock", 100), ("indie", 50)]))
        .collect();
    let cfg = TagClusterConfig {
        num_clusters: 1,
        ..TagClusterConfig::default()
    };
    let (eras, _) = detect_tag_eras(&tracks, &cfg);
    assert_eq!(eras.len(), 1);

    let subs = split_large_eras(eras, 4);

    assert_eq!(subs.len(), 2);
    assert_eq!(subs[1].tracks[0].id, "r20");
    for (i, sub) in subs.iter().enumerate() {
        assert_eq!(sub.tracks.len(), 4);
        assert_eq!(sub.top_tags(), ["rock".to_string(), "indie".to_string()]);
        assert!(matches!(sub.profile, EraProfile::Tags { .. }));
        assert!(
            sub.name
                .starts_with(&format!("rock & indie (part {}/2): ", i + 1)),
            "unexpected name {}",
            sub.name
        );
    }
}

#[test]
fn test_split_keeps_mood_profile() {
    let tracks: Vec<Track> = [0, 1, 2, 10, 11, 12]
        .iter()
        .map(|d| with_mood(&format!("m{}", d), *d, [0.9, 0.9, 0.8, 0.1]))
        .collect();
    let (eras, _) = detect_mood_eras(
        &tracks,
        &MoodConfig {
            num_clusters: 1,
            ..MoodConfig::default()
        },
    );

    let subs = split_large_eras(eras, 3);

    assert_eq!(subs.len(), 2);
    assert!(subs.iter().all(|e| matches!(e.profile, EraProfile::Mood { .. })));
    assert!(subs[0].name.starts_with("Upbeat Party (part 1/2): "));
}

#[test]
fn test_split_disabled_with_zero() {
    let tracks = tracks_on_days(&[0, 1, 2, 3, 4, 5]);
    let (eras, _) = detect_eras(&tracks, &TemporalConfig::default());
    let before = eras.clone();
    assert_eq!(split_large_eras(eras, 0), before);
}

#[test]
fn test_duplicate_tag_vectors_still_form_eras() {
    let mut tracks: Vec<Track> = (0..5)
        .map(|i| tagged(&format!("r{}", i), i, &[("rock", 100)]))
        .collect();
    tracks.extend((0..5).map(|i| tagged(&format!("j{}", i), 20 + i, &[("jazz", 100)])));

    // default asks for 3 clusters but only 2 distinct vectors exist
    let (eras, outliers) = detect_tag_eras(&tracks, &TagClusterConfig::default());

    assert_eq!(eras.len(), 2);
    assert!(outliers.is_empty());
    assert_eq!(ids(&eras[0].tracks), vec!["j0", "j1", "j2", "j3", "j4"]);
    assert_eq!(eras[0].top_tags(), ["jazz".to_string()]);
    assert_eq!(eras[1].top_tags(), ["rock".to_string()]);
    assert_conserved(&eras, &outliers, &tracks);
}

#[test]
fn test_identical_tag_vectors_form_one_era() {
    let tracks: Vec<Track> = (0..6)
        .map(|i| tagged(&format!("t{}", i), i, &[("ambient", 40)]))
        .collect();

    let (eras, outliers) = detect_tag_eras(&tracks, &TagClusterConfig::default());

    assert_eq!(eras.len(), 1);
    assert_eq!(eras[0].tracks.len(), 6);
    assert!(outliers.is_empty());
}

#[test]
fn test_identical_mood_vectors_form_one_era() {
    let tracks: Vec<Track> = (0..4)
        .map(|i| with_mood(&format!("m{}", i), i, [0.3, 0.3, 0.3, 0.9]))
        .collect();

    let (eras, outliers) = detect_mood_eras(&tracks, &MoodConfig::default());

    assert_eq!(eras.len(), 1);
    assert!(outliers.is_empty());
}

#[test]
fn test_small_tag_cluster_is_demoted_to_outliers() {
    let mut tracks: Vec<Track> = (0..4)
        .map(|i| tagged(&format!("r{}", i), i, &[("rock", 100), ("guitar", 50 + i as u32)]))
        .collect();
    tracks.extend(
        (0..4).map(|i| tagged(&format!("j{}", i), 10 + i, &[("jazz", 100), ("sax", 50 + i as u32)])),
    );
    tracks.push(tagged("x", 30, &[("polka", 100)]));
    tracks.push(tagged("y", 31, &[("polka", 90)]));

    let cfg = TagClusterConfig {
        num_clusters: 3,
        min_cluster_size: 3,
        ..TagClusterConfig::default()
    };
    let (eras, outliers) = detect_tag_eras(&tracks, &cfg);

    assert_eq!(eras.len(), 2);
    assert_eq!(ids(&outliers), vec!["x", "y"]);
    assert_conserved(&eras, &outliers, &tracks);
}

#[test]
fn test_small_mood_cluster_is_demoted_to_outliers() {
    let tracks = vec![
        with_mood("p1", 0, [0.9, 0.9, 0.9, 0.1]),
        with_mood("p2", 1, [0.85, 0.8, 0.9, 0.05]),
        with_mood("p3", 2, [0.95, 0.85, 0.8, 0.1]),
        with_mood("m1", 3, [0.2, 0.2, 0.3, 0.9]),
        with_mood("m2", 4, [0.25, 0.15, 0.2, 0.8]),
    ];
    let cfg = MoodConfig {
        num_clusters: 2,
        min_cluster_size: 3,
    };

    let (eras, outliers) = detect_mood_eras(&tracks, &cfg);

    assert_eq!(eras.len(), 1);
    assert_eq!(ids(&eras[0].tracks), vec!["p1", "p2", "p3"]);
    assert_eq!(ids(&outliers), vec!["m1", "m2"]);
}

#[test]
fn test_tag_and_mood_strategies_conserve_tracks() {
    let mut tracks = Vec::new();
    for i in 0..12 {
        let mut t = tagged(
            &format!("t{}", i),
            i,
            &[(["rock", "jazz", "techno"][i as usize % 3], 100), ("misc", 10)],
        );
        if i % 4 != 0 {
            let x = (i % 3) as f32 / 3.0;
            t.energy = Some(x);
            t.valence = Some(1.0 - x);
            t.danceability = Some(0.5);
            t.acousticness = Some(x / 2.0);
        }
        tracks.push(t);
    }
    tracks.push(track_at("bare", base()));

    let (eras, outliers) = detect_tag_eras(&tracks, &TagClusterConfig::default());
    assert_conserved(&eras, &outliers, &tracks);
    assert!(outliers.iter().any(|t| t.id == "bare"));

    let (eras, outliers) = detect_mood_eras(&tracks, &MoodConfig::default());
    assert_conserved(&eras, &outliers, &tracks);
    assert!(outliers.iter().any(|t| t.id == "bare"));
    assert!(outliers.iter().any(|t| t.id == "t0"));

    for strategy in [
        Strategy::Tags(TagClusterConfig::default()),
        Strategy::Mood(MoodConfig::default()),
    ] {
        let detection = detect(&tracks, &strategy).unwrap();
        assert_eq!(detection.total_tracks(), tracks.len());
    }
}

#[test]
fn test_zero_weight_tags_leave_everything_as_outliers() {
    let tracks: Vec<Track> = (0..5)
        .map(|i| tagged(&format!("z{}", i), i, &[("silence", 0)]))
        .collect();

    let (eras, outliers) = detect_tag_eras(&tracks, &TagClusterConfig::default());

    assert!(eras.is_empty());
    assert_eq!(ids(&outliers), ids(&tracks));
}

#[test]
fn test_failed_kmeans_falls_back_to_outliers() {
    let mut tracks: Vec<Track> = (0..6)
        .map(|i| with_mood(&format!("m{}", i), i, [0.1 * i as f32, 0.5, 0.5, 0.5]))
        .collect();
    tracks[2].energy = Some(f32::NAN);

    let (eras, outliers) = detect_mood_eras(&tracks, &MoodConfig::default());

    assert!(eras.is_empty());
    assert_conserved(&eras, &outliers, &tracks);
}

#[test]
fn test_vocabulary_merges_case_insensitively() {
    let a = tagged("a", 0, &[("Rock", 100), ("indie", 40)]);
    let b = tagged("b", 1, &[("rock", 80)]);
    let c = tagged("c", 2, &[("ROCK", 70), ("Indie", 20)]);

    let vocab = build_tag_vocabulary(&[&a, &b, &c], 50);

    assert_eq!(
        vocab,
        vec![
            VocabularyEntry {
                name: "rock".into(),
                weight: 250
            },
            VocabularyEntry {
                name: "indie".into(),
                weight: 60
            },
        ]
    );
}

#[test]
fn test_vocabulary_respects_max_tags_and_skips_zero_weight() {
    let a = tagged("a", 0, &[("a", 5), ("b", 4), ("c", 3), ("zero", 0)]);
    let names: Vec<String> = build_tag_vocabulary(&[&a], 2)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let tie = tagged("t", 0, &[("zeta", 5), ("alpha", 5)]);
    assert_eq!(build_tag_vocabulary(&[&tie], 1)[0].name, "alpha");
}

#[test]
fn test_tag_vector_normalises_per_track() {
    let track = tagged("a", 0, &[("Rock", 50), ("jazz", 100), ("unknown", 10)]);
    let index: HashMap<&str, usize> = HashMap::from([("rock", 0), ("jazz", 1), ("pop", 2)]);
    assert_eq!(build_tag_vector(&track, &index), vec![0.5, 1.0, 0.0]);

    let zero = tagged("z", 0, &[("rock", 0)]);
    assert_eq!(build_tag_vector(&zero, &index), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_extract_top_tags_skips_zero_weights() {
    let vocab: Vec<String> = ["rock", "pop", "jazz", "folk"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        extract_top_tags(&[0.2, 0.0, 0.9, 0.0], &vocab, 3),
        vec!["jazz", "rock"]
    );
    assert_eq!(
        extract_top_tags(&[0.4, 0.3, 0.2, 0.1], &vocab, 3),
        vec!["rock", "pop", "jazz"]
    );
    assert!(extract_top_tags(&[], &vocab, 3).is_empty());
}

#[test]
fn test_extract_features_requires_all_four() {
    let mut t = with_mood("a", 0, [0.1, 0.2, 0.3, 0.4]);
    let coords = mood::extract_features(&t).unwrap();
    assert_eq!(coords.len(), 4);
    assert!((coords[3] - 0.4).abs() < 1e-6);

    t.valence = None;
    assert!(mood::extract_features(&t).is_none());
    assert!(!mood::has_audio_features(&t));
}

struct Point(Vec<f64>);

impl Observation for Point {
    fn coordinates(&self) -> &[f64] {
        &self.0
    }
}

#[test]
fn test_observation_distance_is_euclidean() {
    let p = Point(vec![0.0, 3.0]);
    assert!((p.distance(&[4.0, 0.0]) - 5.0).abs() < 1e-9);
}
