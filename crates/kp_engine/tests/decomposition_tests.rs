use approx::assert_abs_diff_eq;
use kp_engine::angle::normalize_degrees;
use kp_engine::vedic::nakshatra::{nakshatra_index, pada, NAKSHATRA_WIDTH, PADA_WIDTH};
use kp_engine::vedic::sublord::sub_lord_segments;
use kp_engine::{decompose, sub_lord, Lord, Sign};

#[test]
fn test_start_of_aries() {
    let p = decompose(0.0);
    assert_eq!(p.sign, Sign::Aries);
    assert_eq!(p.degree_in_sign, 0.0);
    assert_eq!(p.nakshatra, "Ashwini");
    assert_eq!(p.nakshatra_index, 0);
    assert_eq!(p.pada, 1);
    assert_eq!(p.nakshatra_lord, Lord::Ketu);
    assert_eq!(sub_lord(0.0), Lord::Ketu);
}

#[test]
fn test_exact_nakshatra_width_is_bharani() {
    let p = decompose(360.0 / 27.0);
    assert_eq!(p.nakshatra_index, 1);
    assert_eq!(p.nakshatra, "Bharani");
    assert_eq!(p.pada, 1);
    assert_eq!(sub_lord(360.0 / 27.0), Lord::Venus);
}

#[test]
fn test_sign_boundary_moves_to_next_sign() {
    let p = decompose(30.0 - 1e-9);
    assert_eq!(p.sign, Sign::Taurus);
    assert_eq!(p.degree_in_sign, 0.0);
    assert_eq!(p.sign_lord, Lord::Venus);
}

#[test]
fn test_end_of_zodiac_stays_in_pisces() {
    let p = decompose(359.9999999);
    assert_eq!(p.sign, Sign::Pisces);
    assert_eq!(p.nakshatra, "Revati");
    assert_eq!(p.pada, 4);
}

#[test]
fn test_indices_stay_in_range_over_the_circle() {
    let mut lon = -720.0;
    while lon < 720.0 {
        let idx = nakshatra_index(lon);
        let pd = pada(lon);
        assert!(idx <= 26, "index {} for {}", idx, lon);
        assert!((1..=4).contains(&pd), "pada {} for {}", pd, lon);
        let n = normalize_degrees(lon);
        assert!((0.0..360.0).contains(&n));
        lon += 0.0371;
    }
}

#[test]
fn test_pada_quarters() {
    let start = 3.0 * NAKSHATRA_WIDTH;
    assert_eq!(pada(start + 0.5 * PADA_WIDTH), 1);
    assert_eq!(pada(start + 1.5 * PADA_WIDTH), 2);
    assert_eq!(pada(start + 2.5 * PADA_WIDTH), 3);
    assert_eq!(pada(start + 3.5 * PADA_WIDTH), 4);
}

#[test]
fn test_sub_lord_agrees_with_segments_away_from_edges() {
    for index in [0usize, 7, 13, 26] {
        for segment in sub_lord_segments(index) {
            let middle = (segment.start + segment.end) / 2.0;
            assert_eq!(sub_lord(middle), segment.lord, "nakshatra {}", index);
        }
    }
}

#[test]
fn test_sub_lord_segments_are_contiguous() {
    let segments = sub_lord_segments(4);
    assert_abs_diff_eq!(segments[0].start, 4.0 * NAKSHATRA_WIDTH, epsilon = 1e-12);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_abs_diff_eq!(segments[8].end, 5.0 * NAKSHATRA_WIDTH, epsilon = 1e-9);
}

#[test]
fn test_dms_display_of_placement() {
    let p = decompose(45.5);
    assert_eq!(p.sign, Sign::Taurus);
    assert_eq!(
        kp_engine::angle::Dms::from_degrees(p.degree_in_sign).to_string(),
        "15°30'00\""
    );
}
