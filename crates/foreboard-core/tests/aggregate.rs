mod common;

use std::time::Duration;

use chrono::NaiveDate;
use foreboard_core::{
    filter_table, fingerprint, round_summaries, summarize_rounds, summarize_rounds_cached,
    CacheStatus, FilterParams, HitMiss, SummaryCache,
};
use polars::prelude::*;

use common::{enriched, hole, season, standard_pars};

#[test]
fn two_hole_round_summary_matches_hand_totals() -> PolarsResult<()> {
    let df = enriched(
        &[
            hole("A", "2023-01-01", "X", 1, 5, 2, Some("H")),
            hole("A", "2023-01-01", "X", 2, 4, 1, None),
        ],
        &standard_pars(),
    );

    let summary = summarize_rounds(&df).unwrap();

    assert_eq!(summary.height(), 1);
    assert_eq!(summary.column("Score")?.i64()?.get(0), Some(9));
    assert_eq!(summary.column("ScoreToPar")?.i64()?.get(0), Some(2));
    assert_eq!(summary.column("Putts")?.i64()?.get(0), Some(3));
    assert_eq!(summary.column("PuttsToPar")?.i64()?.get(0), Some(-1));
    assert_eq!(summary.column("NumHoles")?.i64()?.get(0), Some(2));
    assert_eq!(summary.column("GreensHit")?.i64()?.get(0), Some(0));
    assert_eq!(summary.column("GIR")?.f64()?.get(0), Some(0.0));
    assert_eq!(summary.column("NumFairways")?.i64()?.get(0), Some(1));
    assert_eq!(summary.column("FairwaysHit")?.i64()?.get(0), Some(1));
    assert_eq!(summary.column("FIR")?.f64()?.get(0), Some(1.0));

    Ok(())
}

#[test]
fn summary_rows_are_sorted_by_round_key() {
    let summary = summarize_rounds(&season()).unwrap();
    let rounds = round_summaries(&summary).unwrap();

    let keys: Vec<(&str, NaiveDate, &str)> = rounds
        .iter()
        .map(|round| (round.golfer.as_str(), round.date, round.course.as_str()))
        .collect();

    let ymd = |m: u32| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
    assert_eq!(
        keys,
        vec![
            ("A", ymd(1), "X"),
            ("A", ymd(2), "Y"),
            ("A", ymd(3), "Y"),
            ("B", ymd(3), "X"),
            ("C", ymd(4), "X"),
        ]
    );
}

#[test]
fn num_holes_matches_rows_in_group() {
    let df = season();
    let params = FilterParams::new().with_golfers(["B"]).with_courses(["X"]);
    let single_round = filter_table(&df, &params).unwrap();

    let summary = summarize_rounds(&single_round).unwrap();
    let rounds = round_summaries(&summary).unwrap();

    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].num_holes as usize, single_round.height());
}

#[test]
fn par_three_only_round_has_no_fairway_rate() {
    let df = enriched(
        &[hole("A", "2023-01-01", "X", 2, 3, 2, None)],
        &standard_pars(),
    );

    let rounds = round_summaries(&summarize_rounds(&df).unwrap()).unwrap();

    assert_eq!(rounds[0].num_fairways, 0);
    assert_eq!(rounds[0].fairways_hit, 0);
    assert_eq!(rounds[0].fir, None);
    assert_eq!(rounds[0].greens_hit, 1);
    assert_eq!(rounds[0].gir, 1.0);
    assert_eq!(rounds[0].fairways().percent, None);
}

#[test]
fn unmatched_holes_are_left_out_of_totals() {
    let df = enriched(
        &[
            hole("A", "2023-01-01", "X", 1, 5, 2, Some("H")),
            hole("A", "2023-01-01", "X", 7, 9, 4, Some("L")),
        ],
        &standard_pars(),
    );

    let rounds = round_summaries(&summarize_rounds(&df).unwrap()).unwrap();

    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].num_holes, 1);
    assert_eq!(rounds[0].score, 5);
    assert_eq!(rounds[0].putts, 2);
}

#[test]
fn duplicate_upload_merges_into_one_round() {
    let df = enriched(
        &[
            hole("A", "2023-01-01", "X", 1, 5, 2, Some("H")),
            hole("A", "2023-01-01", "X", 1, 5, 2, Some("H")),
        ],
        &standard_pars(),
    );

    let rounds = round_summaries(&summarize_rounds(&df).unwrap()).unwrap();

    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].num_holes, 2);
    assert_eq!(rounds[0].score, 10);
}

#[test]
fn empty_table_summarizes_to_empty_table() {
    let df = season().clear();
    let summary = summarize_rounds(&df).unwrap();

    assert_eq!(summary.height(), 0);
    assert!(round_summaries(&summary).unwrap().is_empty());
}

#[test]
fn hit_miss_rounds_percentage() {
    assert_eq!(
        HitMiss::new(1, 3),
        HitMiss {
            hit: 1,
            missed: 2,
            percent: Some(33.0),
        }
    );
    assert_eq!(HitMiss::new(0, 0).percent, None);
}

#[test]
fn hit_miss_rounds_halves_to_even() {
    assert_eq!(HitMiss::new(1, 8).percent, Some(12.0));
    assert_eq!(HitMiss::new(3, 8).percent, Some(38.0));
    assert_eq!(HitMiss::new(5, 8).percent, Some(62.0));
}

#[test]
fn cache_reuses_summary_for_identical_content() {
    let cache = SummaryCache::new(Duration::from_secs(60));
    let first = season();
    let rebuilt = season();

    let (a, first_status) = summarize_rounds_cached(&first, &cache).unwrap();
    let (b, second_status) = summarize_rounds_cached(&rebuilt, &cache).unwrap();

    assert_eq!(first_status, CacheStatus::Miss);
    assert_eq!(second_status, CacheStatus::Hit);
    assert_eq!(cache.len(), 1);
    assert!(a.equals_missing(&b));
    assert_eq!(fingerprint(&first).unwrap(), fingerprint(&rebuilt).unwrap());
}

#[test]
fn cache_separates_different_content() {
    let cache = SummaryCache::new(Duration::from_secs(60));
    let df = season();
    let params = FilterParams::new().with_golfers(["A"]);
    let subset = filter_table(&df, &params).unwrap();

    summarize_rounds_cached(&df, &cache).unwrap();
    let (cached_subset, status) = summarize_rounds_cached(&subset, &cache).unwrap();

    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(cache.len(), 2);
    assert_eq!(cached_subset.height(), 3);
    assert_ne!(fingerprint(&df).unwrap(), fingerprint(&subset).unwrap());
}

#[test]
fn expired_entries_are_recomputed() {
    let cache = SummaryCache::new(Duration::ZERO);
    let df = season();
    let key = foreboard_core::CacheKey::new(fingerprint(&df).unwrap(), "rounds");

    let mut computed = 0;
    for _ in 0..2 {
        let (_, status) = cache
            .get_or_try_insert_with(key.clone(), || {
                computed += 1;
                summarize_rounds(&df)
            })
            .unwrap();
        assert_eq!(status, CacheStatus::Miss);
    }

    assert_eq!(computed, 2);
    assert!(cache.is_empty());
}
