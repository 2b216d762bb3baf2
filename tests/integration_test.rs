// End-to-end tests for the aidmatch matching pipeline
use aidmatch::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

fn vocabulary() -> CategoryVocabulary {
    CategoryVocabulary::new(["Food", "Medical", "Rescue", "Shelter", "Transportation"])
}

fn volunteer(id: &str, skill: &str, lat: f64, lon: f64, available: bool) -> VolunteerRecord {
    VolunteerRecord::new(id)
        .with_skill(skill)
        .with_location(Location::coordinates(lat, lon))
        .with_availability(available)
}

/// Five volunteers with distinct categories and locations.
fn distinct_pool() -> Vec<VolunteerRecord> {
    vec![
        volunteer("medic", "Medical", 6.50, 3.40, true),
        volunteer("cook", "Food", 52.52, 13.40, true),
        volunteer("rescuer", "Rescue", 9.05, 7.49, false),
        volunteer("host", "Shelter", -33.92, 18.42, true),
        volunteer("driver", "Transportation", 35.68, 139.69, false),
    ]
}

fn medical_request() -> RequestRecord {
    RequestRecord::new("req-1", "Medical")
        .with_location(Location::coordinates(6.52, 3.37))
        .with_urgency(Urgency::High)
}

#[test]
fn scenario_a_matching_category_and_nearest_location_ranks_first() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()));
    let matches = matcher.top_matches(&medical_request(), &distinct_pool());

    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].volunteer.id, "medic".into());
}

#[test]
fn scenario_b_pool_smaller_than_k() {
    let matcher = Matcher::new(MatcherConfig::new(CategoryVocabulary::new(["Food", "Medical"])));
    let pool = vec![
        volunteer("a", "Medical", 1.0, 2.0, true),
        volunteer("b", "Food", 3.0, 4.0, false),
    ];

    let matches = matcher.top_matches(&medical_request(), &pool);
    assert_eq!(matches.len(), 2);
}

#[test]
fn scenario_c_empty_pool() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()));
    let matches = matcher.top_matches(&medical_request(), &[]);
    assert!(matches.is_empty());
}

#[test]
fn scenario_d_malformed_location_excluded_rest_still_matched() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()));
    let mut pool = distinct_pool();
    let malformed: VolunteerRecord = serde_json::from_value(serde_json::json!({
        "id": "broken",
        "skills": "Medical",
        "location": {"latitude": "six", "longitude": "three"}
    }))
    .unwrap();
    pool.insert(2, malformed);

    let matches = matcher.top_matches(&medical_request(), &pool);
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|m| m.volunteer.id != "broken".into()));

    let report = matcher.top_matches_debug(&medical_request(), &pool);
    // The malformed record is absent from the matrix but recorded as a warning
    assert_eq!(report.volunteer_features.len(), 5);
    assert!(report
        .processing_warnings
        .iter()
        .any(|w| w.contains("broken")));
}

#[test]
fn scenario_e_zero_variance_pool_fails_softly() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()));
    let pool = vec![
        volunteer("a", "Medical", 1.0, 1.0, true),
        volunteer("b", "Medical", 1.0, 1.0, true),
        volunteer("c", "Medical", 1.0, 1.0, true),
    ];

    let matches = matcher.top_matches(&medical_request(), &pool);
    assert!(matches.is_empty());

    let report = matcher.top_matches_debug(&medical_request(), &pool);
    assert!(report.matched_volunteers.is_empty());
    assert!(report
        .processing_warnings
        .iter()
        .any(|w| w.contains("scaling")));
}

#[test]
fn matches_are_drawn_from_pool_without_duplicates() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()).with_k(4));
    let pool = distinct_pool();
    let matches = matcher.top_matches(&medical_request(), &pool);

    assert!(matches.len() <= 4);
    let pool_ids: HashSet<String> = pool.iter().map(|v| v.id.to_string()).collect();
    let mut seen = HashSet::new();
    for m in &matches {
        let id = m.volunteer.id.to_string();
        assert!(pool_ids.contains(&id));
        assert!(seen.insert(id), "duplicate match");
    }
}

#[test]
fn k_at_least_pool_size_returns_full_pool_ascending() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()).with_k(50));
    let matches = matcher.top_matches(&medical_request(), &distinct_pool());

    assert_eq!(matches.len(), 5);
    for pair in matches.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[test]
fn unknown_category_encodes_to_zero_vector() {
    let vocab = vocabulary();
    let zero = vec![0.0; vocab.len()];
    assert_eq!(vocab.encode("Quilting"), zero);
    assert_eq!(vocab.encode("Juggling"), vocab.encode("Quilting"));
    assert_eq!(vocab.encode(""), zero);
}

#[test]
fn matching_is_idempotent() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()));
    let request = medical_request();
    let pool = distinct_pool();

    let first = matcher.top_matches(&request, &pool);
    let second = matcher.top_matches(&request, &pool);
    assert_eq!(first, second);
}

#[test]
fn debug_output_is_consistent_with_plain_output() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()));
    let request = medical_request();
    let pool = distinct_pool();

    let plain = matcher.top_matches(&request, &pool);
    let report = matcher.top_matches_debug(&request, &pool);

    assert_eq!(
        plain.iter().map(|m| &m.volunteer).collect::<Vec<_>>(),
        report.matched_volunteers.iter().collect::<Vec<_>>()
    );
    assert_eq!(
        plain.iter().map(|m| m.distance).collect::<Vec<_>>(),
        report.distances
    );
    assert_eq!(report.request_features.len(), 2 + vocabulary().len() + 1);
    assert_eq!(report.volunteer_features.len(), 5);
    assert_eq!(report.x_scaled.len(), 5);
    assert_eq!(report.req_scaled.len(), report.request_features.len());
}

#[test]
fn sentinel_coordinate_records_stay_in_the_pool() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()));
    let mut pool = distinct_pool();
    // Address with no geocoder configured resolves to the sentinel
    pool.push(
        VolunteerRecord::new("unresolved")
            .with_skill("Rescue")
            .with_location(Location::address("Somewhere remote"))
            .with_availability(true),
    );

    let report = matcher.top_matches_debug(&medical_request(), &pool);
    assert_eq!(report.volunteer_features.len(), 6);
    let last = report.volunteer_features.last().unwrap();
    assert_eq!(&last[..2], &[0.0, 0.0]);
    assert!(report
        .processing_warnings
        .iter()
        .any(|w| w.contains("Somewhere remote")));
}

#[test]
fn addresses_resolve_through_the_geocoder() {
    let geocoder = StaticGeocoder::new()
        .with_entry("Lagos, Nigeria", 6.52, 3.37)
        .with_entry("Berlin, Germany", 52.52, 13.40);

    let config = MatcherConfig::new(vocabulary()).with_geocode_timeout(Duration::from_secs(2));
    let matcher = Matcher::with_geocoder(config, Box::new(geocoder));

    let request = RequestRecord::new("req-1", "Medical")
        .with_location(Location::address("Lagos, Nigeria"))
        .with_urgency(Urgency::High);
    let mut pool = distinct_pool();
    pool[0].location = Some(Location::address("Lagos, Nigeria"));

    let report = matcher.top_matches_debug(&request, &pool);
    assert_eq!(&report.request_features[..2], &[6.52, 3.37]);
    assert_eq!(&report.volunteer_features[0][..2], &[6.52, 3.37]);
    assert_eq!(report.matched_volunteers[0].id, "medic".into());
}

#[test]
fn records_deserialize_from_boundary_json() {
    let request: RequestRecord = serde_json::from_value(serde_json::json!({
        "id": "req-9",
        "category": "Rescue",
        "location": "Kumasi, Ghana",
        "urgency": "low"
    }))
    .unwrap();
    assert_eq!(request.urgency_score(), 1.0);

    let pool: Vec<VolunteerRecord> = serde_json::from_value(serde_json::json!([
        {"id": 1, "skills": "Medical", "location": {"latitude": 6.5, "longitude": 3.4}, "availability": true},
        {"id": 2, "skills": ["Rescue", "Food"], "location": "Accra, Ghana", "availability": "yes"},
        {"id": 3}
    ]))
    .unwrap();

    assert_eq!(pool[0].availability_flag(), 1.0);
    assert_eq!(pool[1].first_skill(), Some("Rescue"));
    assert_eq!(pool[1].availability_flag(), 1.0);
    assert_eq!(pool[2].first_skill(), None);
    assert_eq!(pool[2].availability_flag(), 0.0);
}

#[test]
fn debug_report_round_trips_as_json() {
    let matcher = Matcher::new(MatcherConfig::new(vocabulary()));
    let report = matcher.top_matches_debug(&medical_request(), &distinct_pool());

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"X_scaled\""));
    let parsed: MatchReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}
