use super::*;
use chrono::{Duration, NaiveDate};

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn weighted_single_author() {
    let mut ledger = Ledger::new();
    ledger.record_change(0, 1, anchor(), anchor()).unwrap();
    compute_authorship(&mut ledger, Formula::Weighted);
    let c = ledger.contribution(0, 1).unwrap();
    assert!(approx(c.authorship, 3.0 + 1.0 + 2.4 * 2f64.ln()));
    assert!(approx(c.normalized_authorship, 1.0));
    assert!(Formula::Weighted.is_major(c));
}

#[test]
fn legacy_single_author() {
    let mut ledger = Ledger::new();
    ledger.record_change(0, 1, anchor(), anchor()).unwrap();
    compute_authorship(&mut ledger, Formula::Legacy);
    let c = ledger.contribution(0, 1).unwrap();
    assert!(approx(c.authorship, SHIFT + OWNERSHIP_SLOPE + COMMITS_SLOPE));
    assert!(Formula::Legacy.is_major(c));
}

#[test]
fn weighted_owner_term_uses_decay_weight() {
    let mut ledger = Ledger::new();
    let old = anchor() - Duration::days(90);
    ledger.record_change(0, 1, old, anchor()).unwrap();
    ledger.record_change(0, 2, anchor(), anchor()).unwrap();
    compute_authorship(&mut ledger, Formula::Weighted);

    let w = (-1.0f64).exp();
    let total = 1.0 + w;
    let bob = ledger.contribution(0, 2).unwrap();
    let alice = ledger.contribution(0, 1).unwrap();
    let expected_bob = weighted_score(1.0, 1.0, total, w, 0.0, 0.0, 0.0);
    let expected_alice = weighted_score(0.0, w, total, 1.0, 0.0, 0.0, 0.0);
    assert!(approx(bob.authorship, expected_bob));
    assert!(approx(alice.authorship, expected_alice));
    assert!(approx(bob.normalized_authorship, 1.0));
    assert!(Formula::Weighted.is_major(bob));
    assert!(!Formula::Weighted.is_major(alice));
}

#[test]
fn reviews_feed_both_formulas() {
    let with_review = legacy_score(0.0, 1.0, 0.0, 2.0, 0.0);
    let without = legacy_score(0.0, 1.0, 0.0, 0.0, 0.0);
    assert!(approx(with_review - without, 2.0 * REVIEWS_SLOPE));

    let crowd = legacy_score(0.0, 1.0, 9.0, 0.0, 0.0);
    assert!(approx(without - crowd, OTHER_COMMITS_SLOPE * 10f64.ln()));

    let weighted = weighted_score(0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0);
    assert!(approx(weighted, REVIEWS_SLOPE_NEW + OTHER_REVIEWS_SLOPE_NEW * 2f64.ln()));
}

#[test]
fn normalization_max_is_one() {
    let mut ledger = Ledger::new();
    for (file, user, days) in [(0, 1, 0), (0, 2, 10), (0, 3, 200), (1, 2, 5), (1, 3, 5)] {
        let date = anchor() - Duration::days(days);
        ledger.record_change(file, user, date, anchor()).unwrap();
    }
    for formula in [Formula::Weighted, Formula::Legacy] {
        compute_authorship(&mut ledger, formula);
        for (_, ownership) in ledger.files() {
            let max = ownership
                .values()
                .map(|c| c.normalized_authorship)
                .fold(f64::NEG_INFINITY, f64::max);
            assert!(approx(max, 1.0));
        }
    }
}

#[test]
fn legacy_crowd_with_negative_scores_still_normalizes() {
    let mut ownership: BTreeMap<UserId, Contribution> = (0..100_000)
        .map(|user| {
            let c = Contribution {
                commits: 1,
                ..Contribution::default()
            };
            (user, c)
        })
        .collect();
    score_file(Formula::Legacy, None, &mut ownership);
    for c in ownership.values() {
        assert!(c.authorship < 0.0);
        assert!(approx(c.normalized_authorship, 1.0));
    }
}

#[test]
fn legacy_threshold_is_stricter() {
    let c = Contribution {
        authorship: 2.0,
        normalized_authorship: 1.0,
        ..Contribution::default()
    };
    assert!(Formula::Weighted.is_major(&c));
    assert!(!Formula::Legacy.is_major(&c));

    let low_share = Contribution {
        authorship: 10.0,
        normalized_authorship: 0.75,
        ..Contribution::default()
    };
    assert!(!Formula::Weighted.is_major(&low_share));
}

#[test]
fn user_stats_single_file_marks_minor() {
    let mut ledger = Ledger::new();
    for _ in 0..30 {
        ledger.record_change(0, 1, anchor(), anchor()).unwrap();
    }
    ledger
        .record_change(0, 2, anchor() - Duration::days(400), anchor())
        .unwrap();
    compute_authorship(&mut ledger, Formula::Weighted);

    let stats = files_user_stats(&ledger, &[0]);
    let main = &stats[&1];
    let minor = &stats[&2];
    assert_eq!(main.commits, 30);
    assert!(main.main_contributor);
    assert!(!main.minor_contributor);
    assert!(minor.minor_contributor);
    assert!(!minor.main_contributor);
}

#[test]
fn user_stats_over_many_files_never_minor() {
    let mut ledger = Ledger::new();
    ledger.record_change(0, 1, anchor(), anchor()).unwrap();
    ledger.record_change(1, 1, anchor(), anchor()).unwrap();
    ledger.record_review(1, 2, anchor(), anchor()).unwrap();
    compute_authorship(&mut ledger, Formula::Weighted);

    let stats = files_user_stats(&ledger, &[0, 1, 7]);
    assert_eq!(stats[&1].commits, 2);
    assert_eq!(stats[&2].reviews, 1);
    assert!(stats.values().all(|s| !s.minor_contributor));
    assert!(approx(stats[&1].normalized_authorship, 1.0));
    assert!(
        approx(stats[&1].authorship,
        ledger.contribution(0, 1).unwrap().authorship + ledger.contribution(1, 1).unwrap().authorship)
    );
}

#[test]
fn user_stats_empty_set() {
    let ledger = Ledger::new();
    assert!(files_user_stats(&ledger, &[]).is_empty());
}
