use super::*;

// -----------------------------------------------------------------------
// normalize_location / extract_city_state
// -----------------------------------------------------------------------

#[test]
fn normalize_strips_punctuation_and_folds_case() {
    assert_eq!(
        normalize_location("Mumbai, Maharashtra!"),
        "mumbai maharashtra"
    );
}

#[test]
fn normalize_drops_digits_and_outer_whitespace() {
    assert_eq!(normalize_location("  Sector 21, Noida  "), "sector  noida");
}

#[test]
fn normalize_empty_is_empty() {
    assert_eq!(normalize_location(""), "");
    assert_eq!(normalize_location("   "), "");
}

#[test]
fn extract_city_state_splits_on_comma() {
    assert_eq!(
        extract_city_state("Ratnagiri, Maharashtra"),
        ("ratnagiri".to_string(), "maharashtra".to_string())
    );
}

#[test]
fn extract_city_state_without_comma_has_empty_state() {
    assert_eq!(
        extract_city_state("Delhi"),
        ("delhi".to_string(), String::new())
    );
}

#[test]
fn extract_city_state_keeps_extra_commas_in_state() {
    assert_eq!(
        extract_city_state("Some Area, Mumbai, Maharashtra"),
        ("some area".to_string(), "mumbai, maharashtra".to_string())
    );
}

#[test]
fn extract_city_state_empty_input() {
    assert_eq!(extract_city_state(""), (String::new(), String::new()));
}

// -----------------------------------------------------------------------
// location_distance
// -----------------------------------------------------------------------

#[test]
fn identical_locations_are_zero() {
    assert_eq!(
        location_distance("Mumbai, Maharashtra", "Mumbai, Maharashtra"),
        0
    );
}

#[test]
fn identical_after_normalization_is_zero() {
    assert_eq!(
        location_distance("MUMBAI, Maharashtra.", "mumbai maharashtra"),
        0
    );
}

#[test]
fn same_city_different_suffix_is_ten() {
    assert_eq!(location_distance("Pune, Maharashtra", "Pune, MH"), 10);
}

#[test]
fn same_state_different_city_is_fifty() {
    assert_eq!(
        location_distance("Pune, Maharashtra", "Mumbai, Maharashtra"),
        50
    );
}

#[test]
fn different_state_is_five_hundred() {
    assert_eq!(
        location_distance("Chennai, Tamil Nadu", "Mumbai, Maharashtra"),
        500
    );
}

#[test]
fn empty_side_is_unknown() {
    assert_eq!(location_distance("", "Mumbai, Maharashtra"), 1000);
    assert_eq!(location_distance("Mumbai, Maharashtra", ""), 1000);
}

#[test]
fn two_empty_inputs_are_unknown_not_identical() {
    assert_eq!(classify_distance("", ""), DistanceTier::Unknown);
}

#[test]
fn punctuation_only_inputs_are_identical() {
    // Non-empty raw strings that both normalize to "" pass the emptiness guard.
    assert_eq!(classify_distance("123", "!!"), DistanceTier::Identical);
}

#[test]
fn cityless_locations_share_empty_state() {
    // Both state parts are "" so the state tier matches.
    assert_eq!(
        classify_distance("Delhi", "Chandigarh"),
        DistanceTier::SameState
    );
}

#[test]
fn distance_is_symmetric_and_reflexive() {
    let samples = [
        "Mumbai, Maharashtra",
        "Pune, Maharashtra",
        "Chennai, Tamil Nadu",
        "Delhi",
        "Some Area, Mumbai, Maharashtra",
        "Navi Mumbai, Maharashtra",
        "kochi,kerala",
    ];
    for a in samples {
        assert_eq!(location_distance(a, a), 0, "reflexive for {a}");
        for b in samples {
            assert_eq!(
                location_distance(a, b),
                location_distance(b, a),
                "symmetric for {a} / {b}"
            );
        }
    }
}

#[test]
fn tiers_are_ordered_by_value() {
    assert!(DistanceTier::Identical < DistanceTier::SameCity);
    assert!(DistanceTier::SameState < DistanceTier::Elsewhere);
    assert!(DistanceTier::Elsewhere.value() < DistanceTier::Unknown.value());
}

// -----------------------------------------------------------------------
// is_within_delivery_range
// -----------------------------------------------------------------------

#[test]
fn product_without_location_is_hidden_once_customer_picks_one() {
    assert!(!is_within_delivery_range(
        "",
        "Mumbai, Maharashtra",
        DEFAULT_MAX_DISTANCE
    ));
}

#[test]
fn no_customer_location_shows_everything() {
    assert!(is_within_delivery_range(
        "Pune, Maharashtra",
        "",
        DEFAULT_MAX_DISTANCE
    ));
    assert!(is_within_delivery_range("", "", 0));
}

#[test]
fn same_state_is_within_default_range() {
    assert!(is_within_delivery_range(
        "Pune, Maharashtra",
        "Mumbai, Maharashtra",
        100
    ));
}

#[test]
fn same_state_is_outside_city_only_range() {
    assert!(!is_within_delivery_range(
        "Pune, Maharashtra",
        "Mumbai, Maharashtra",
        10
    ));
}

#[test]
fn different_state_is_outside_default_range() {
    assert!(!is_within_delivery_range(
        "Chennai, Tamil Nadu",
        "Mumbai, Maharashtra",
        DEFAULT_MAX_DISTANCE
    ));
}

#[test]
fn large_threshold_admits_every_known_location() {
    assert!(is_within_delivery_range(
        "Chennai, Tamil Nadu",
        "Mumbai, Maharashtra",
        500
    ));
}

#[test]
fn tier_display_matches_serde_name() {
    let json = serde_json::to_string(&DistanceTier::SameState).expect("serialize");
    assert_eq!(json, "\"same_state\"");
    assert_eq!(DistanceTier::SameState.to_string(), "same_state");
}
