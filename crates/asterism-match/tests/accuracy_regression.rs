//! Accuracy regression tests for asterism-match.
//!
//! These tests verify that changes to preparation or scoring do not degrade
//! classification of the seven reference constellations under the drawing
//! transformations the matcher is meant to ignore.

use asterism_match::{match_shape, Catalog, CatalogEntry, MatchConfig, Matcher};
use asterism_shape::PointSequence;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const STARS: [(&str, &[(f64, f64)]); 7] = [
    ("Orion", &[(10.0, 20.0), (60.0, 80.0), (110.0, 60.0), (160.0, 150.0)]),
    (
        "Big Dipper",
        &[
            (5.0, 10.0),
            (40.0, 50.0),
            (80.0, 90.0),
            (120.0, 45.0),
            (150.0, 80.0),
            (185.0, 115.0),
            (220.0, 140.0),
        ],
    ),
    (
        "Cassiopeia",
        &[(20.0, 30.0), (50.0, 60.0), (80.0, 30.0), (110.0, 60.0), (140.0, 30.0)],
    ),
    (
        "Cygnus",
        &[(30.0, 100.0), (70.0, 80.0), (110.0, 100.0), (150.0, 80.0), (190.0, 100.0)],
    ),
    (
        "Scorpius",
        &[
            (20.0, 120.0),
            (40.0, 150.0),
            (60.0, 180.0),
            (80.0, 160.0),
            (100.0, 140.0),
            (120.0, 160.0),
            (140.0, 180.0),
            (160.0, 150.0),
            (180.0, 120.0),
        ],
    ),
    (
        "Ursa Minor",
        &[
            (10.0, 10.0),
            (30.0, 40.0),
            (50.0, 70.0),
            (70.0, 60.0),
            (90.0, 50.0),
            (110.0, 40.0),
            (130.0, 30.0),
        ],
    ),
    ("Lyra", &[(60.0, 20.0), (80.0, 40.0), (100.0, 20.0), (120.0, 40.0), (140.0, 20.0)]),
];

/// Constellations whose shape is unique in the catalog. Lyra and Cassiopeia
/// are the same zig-zag at different scales and always score alike.
const DISTINCT: [&str; 5] = ["Orion", "Big Dipper", "Cygnus", "Scorpius", "Ursa Minor"];

fn seq(pairs: &[(f64, f64)]) -> PointSequence {
    PointSequence::from_xy(pairs.iter().copied()).expect("valid test sequence")
}

fn sky() -> Catalog {
    STARS
        .iter()
        .map(|(name, stars)| CatalogEntry::new(*name, seq(stars)).expect("named entry"))
        .collect()
}

fn stars_of(name: &str) -> &'static [(f64, f64)] {
    STARS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, s)| *s)
        .expect("known constellation")
}

fn map_stars(name: &str, f: impl Fn(f64, f64) -> (f64, f64)) -> PointSequence {
    seq(&stars_of(name).iter().map(|&(x, y)| f(x, y)).collect::<Vec<_>>())
}

// ---------------------------------------------------------------------------
// a) every distinct constellation matches itself exactly
// ---------------------------------------------------------------------------

#[test]
fn each_constellation_matches_itself() {
    let matcher = Matcher::new(&sky(), MatchConfig::default());
    for name in DISTINCT {
        let result = matcher.find(&seq(stars_of(name))).unwrap();
        assert_eq!(result.name, name);
        assert!(result.score.value() < 1e-9, "{name} scored {}", result.score);
        assert_eq!(sky().get(result.entry_index).unwrap().name(), name);
    }
}

/// Same-shape entries both score zero; neither beats the other by a margin.
#[test]
fn lyra_and_cassiopeia_are_indistinguishable() {
    let matcher = Matcher::new(&sky(), MatchConfig::default());
    let ranked = matcher.rank(&seq(stars_of("Lyra")), 2);
    let mut names: Vec<_> = ranked.iter().map(|m| m.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["Cassiopeia", "Lyra"]);
    for m in &ranked {
        assert!(m.score.value() < 1e-9, "{} scored {}", m.name, m.score);
    }
}

// ---------------------------------------------------------------------------
// b) translation, scale, quarter turns and mirroring are ignored
// ---------------------------------------------------------------------------

#[test]
fn translation_and_scale_are_ignored() {
    let matcher = Matcher::new(&sky(), MatchConfig::default());
    for name in DISTINCT {
        let drawing = map_stars(name, |x, y| (0.3 * x + 417.0, 0.3 * y - 52.0));
        let result = matcher.find(&drawing).unwrap();
        assert_eq!(result.name, name);
        assert!(result.score.value() < 1e-9, "{name} scored {}", result.score);
    }
}

/// Quarter turns keep the bounding box extent, so normalization is unchanged
/// and the aligner recovers the rotation exactly.
///
/// Only quarter turns are checked. Any other angle changes the box aspect and
/// with it the normalization scale, so the rotated drawing no longer aligns
/// onto its source exactly and can land closer to a different constellation
/// (Orion turned 30 degrees reads as the Big Dipper).
#[test]
fn quarter_turns_are_ignored() {
    let matcher = Matcher::new(&sky(), MatchConfig::default());
    let turns: [fn(f64, f64) -> (f64, f64); 3] =
        [|x, y| (-y, x), |x, y| (-x, -y), |x, y| (y, -x)];
    for name in DISTINCT {
        for turn in turns {
            let drawing = map_stars(name, |x, y| {
                let (rx, ry) = turn(x, y);
                (2.5 * rx + 300.0, 2.5 * ry - 40.0)
            });
            let result = matcher.find(&drawing).unwrap();
            assert_eq!(result.name, name);
            assert!(result.score.value() < 1e-9, "{name} scored {}", result.score);
        }
    }
}

#[test]
fn mirror_images_are_ignored() {
    let matcher = Matcher::new(&sky(), MatchConfig::default());
    for name in DISTINCT {
        for drawing in [map_stars(name, |x, y| (-x, y)), map_stars(name, |x, y| (x, -y))] {
            let result = matcher.find(&drawing).unwrap();
            assert_eq!(result.name, name);
            assert!(result.score.value() < 1e-9, "{name} scored {}", result.score);
        }
    }
}

// ---------------------------------------------------------------------------
// c) hand-drawn jitter still lands on the right constellation
// ---------------------------------------------------------------------------

#[test]
fn jittered_drawings_still_match() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let matcher = Matcher::new(&sky(), MatchConfig::default());
    for name in DISTINCT {
        for _ in 0..25 {
            let drawing = map_stars(name, |x, y| (x, y));
            let jittered = PointSequence::from_xy(drawing.iter().map(|p| {
                (
                    p.x + rng.gen_range(-2.0..2.0),
                    p.y + rng.gen_range(-2.0..2.0),
                )
            }))
            .unwrap();
            assert_eq!(matcher.find(&jittered).unwrap().name, name);
        }
    }
}

// ---------------------------------------------------------------------------
// d) absence and tie-break rules
// ---------------------------------------------------------------------------

#[test]
fn short_drawings_never_match() {
    let catalog = sky();
    let config = MatchConfig::default();
    assert!(match_shape(&PointSequence::default(), &catalog, &config).is_none());
    assert!(match_shape(&seq(&[(40.0, 40.0)]), &catalog, &config).is_none());
}

#[test]
fn duplicate_entries_resolve_to_first() {
    let mut entries: Vec<CatalogEntry> = sky().iter().cloned().collect();
    entries.push(CatalogEntry::new("Orion Again", seq(stars_of("Orion"))).unwrap());
    entries.insert(0, CatalogEntry::new("Orion First", seq(stars_of("Orion"))).unwrap());
    let catalog = Catalog::new(entries);

    let result = match_shape(&seq(stars_of("Orion")), &catalog, &MatchConfig::default()).unwrap();
    assert_eq!(result.name, "Orion First");
    assert_eq!(result.entry_index, 0);
}

#[test]
fn larger_sample_counts_keep_classification() {
    let config = MatchConfig::new(64, 100.0).unwrap();
    let matcher = Matcher::new(&sky(), config);
    for name in DISTINCT {
        let drawing = map_stars(name, |x, y| (x * 1.7 - 12.0, y * 1.7 + 99.0));
        assert_eq!(matcher.find(&drawing).unwrap().name, name);
    }
}

// ---------------------------------------------------------------------------
// e) batch and ranking agree with single matching
// ---------------------------------------------------------------------------

#[test]
fn batch_agrees_with_find() {
    let matcher = Matcher::new(&sky(), MatchConfig::default());
    let drawings: Vec<PointSequence> = STARS
        .iter()
        .map(|(_, stars)| seq(stars))
        .chain([PointSequence::default(), seq(&[(1.0, 1.0)])])
        .collect();

    let batch = matcher.find_batch(&drawings);
    assert_eq!(batch.len(), drawings.len());
    for (drawing, result) in drawings.iter().zip(&batch) {
        assert_eq!(*result, matcher.find(drawing));
    }
}

#[test]
fn rank_head_is_find() {
    let matcher = Matcher::new(&sky(), MatchConfig::default());
    for name in DISTINCT {
        let drawing = map_stars(name, |x, y| (y, x));
        let ranked = matcher.rank(&drawing, STARS.len());
        assert_eq!(ranked.len(), STARS.len());
        assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
        assert_eq!(Some(ranked[0].clone()), matcher.find(&drawing));
    }
}
