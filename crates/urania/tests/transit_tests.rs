use chrono::{TimeZone, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use urania::aspects::AspectKind;
use urania::chart::{
    synastry_aspects, transit_aspects, ChartRef, SynastryReport, TransitReport, SOURCE_UNAVAILABLE,
};
use urania::points::{CelestialPoint, PointSet, RawChart, RawPoint};
use urania::AspectClassifier;
use uuid::Uuid;

fn set(points: &[(&str, f64)]) -> PointSet {
    points
        .iter()
        .map(|(name, lon)| CelestialPoint::from_longitude(*name, *lon, false))
        .collect()
}

fn raw_transits() -> RawChart {
    let mut points = BTreeMap::new();
    for (name, abs_pos, sign_num) in [("sun", 45.0, 1), ("moon", 122.0, 4), ("mercury", 30.0, 1)] {
        points.insert(
            name.to_string(),
            RawPoint {
                abs_pos: Some(abs_pos),
                sign_num: Some(sign_num),
                position: Some(abs_pos % 30.0),
                retrograde: Some(false),
            },
        );
    }
    RawChart {
        points,
        houses: BTreeMap::new(),
    }
}

fn stored_natal() -> serde_json::Value {
    json!({
        "Sun": { "name": "Sun", "longitude": 15.0 },
        "Moon": { "name": "Moon", "longitude": 75.0 },
        "Mars": { "name": "Mars", "longitude": 125.0 }
    })
}

#[test]
fn test_transit_sun_to_natal_sun_and_moon() {
    let classifier = AspectClassifier::default();
    let natal = set(&[("Sun", 15.0), ("Moon", 75.0)]);
    let transiting = set(&[("Sun", 45.0)]);

    let aspects = transit_aspects(&transiting, &natal, &classifier);

    assert_eq!(aspects.len(), 2);
    for aspect in &aspects {
        assert_eq!(aspect.transiting_planet, "Sun");
        assert_eq!(aspect.aspect_name, AspectKind::SemiSextile);
        assert_eq!(aspect.orb, 0.0);
    }
    let mut natal_names: Vec<_> = aspects.iter().map(|a| a.natal_planet.as_str()).collect();
    natal_names.sort();
    assert_eq!(natal_names, vec!["Moon", "Sun"]);
}

#[test]
fn test_transit_report() {
    let classifier = AspectClassifier::default();
    let at = Utc.with_ymd_and_hms(2024, 7, 29, 12, 0, 0).unwrap();

    let report = TransitReport::calculate(&stored_natal(), Some(&raw_transits()), at, &classifier);

    assert!(report.calculation_error.is_none());
    assert_eq!(report.transit_datetime, at);
    assert_eq!(report.transiting_planets.get("Sun").unwrap().sign, "Taurus");
    assert_eq!(report.transiting_planets.get("Moon").unwrap().sign, "Leo");
    assert_eq!(report.transiting_planets.get("Mercury").unwrap().sign, "Taurus");

    assert!(report.aspects_to_natal.iter().any(|a| a.transiting_planet == "Sun"
        && a.natal_planet == "Sun"
        && a.aspect_name == AspectKind::SemiSextile
        && a.orb == 0.0));
    assert!(report.aspects_to_natal.iter().any(|a| a.transiting_planet == "Moon"
        && a.natal_planet == "Mars"
        && a.aspect_name == AspectKind::Conjunction
        && (a.orb - 3.0).abs() < 1e-9));
    assert!(report.aspects_to_natal.windows(2).all(|w| w[0].orb <= w[1].orb));
}

#[test]
fn test_transit_report_with_malformed_natal() {
    let classifier = AspectClassifier::default();
    let at = Utc.with_ymd_and_hms(2024, 7, 29, 12, 0, 0).unwrap();
    let natal = json!({ "Sun": { "longitude": 15.0 } });

    let report = TransitReport::calculate(&natal, Some(&raw_transits()), at, &classifier);

    assert_eq!(report.calculation_error.as_deref(), Some("Natal planets data malformed."));
    assert_eq!(report.transiting_planets.len(), 3);
    assert!(report.aspects_to_natal.is_empty());
}

#[test]
fn test_transit_report_without_upstream() {
    let classifier = AspectClassifier::default();
    let at = Utc.with_ymd_and_hms(2024, 7, 29, 12, 0, 0).unwrap();

    let report = TransitReport::calculate(&stored_natal(), None, at, &classifier);

    assert_eq!(report.calculation_error.as_deref(), Some(SOURCE_UNAVAILABLE));
    assert!(report.transiting_planets.is_empty());
    assert!(report.aspects_to_natal.is_empty());
}

#[test]
fn test_non_numeric_longitudes_are_excluded() {
    let classifier = AspectClassifier::default();
    let at = Utc.with_ymd_and_hms(2024, 7, 29, 12, 0, 0).unwrap();
    let natal = json!({
        "Sun": { "name": "Sun", "longitude": 15.0 },
        "Moon": { "name": "Moon", "longitude": null }
    });

    let report = TransitReport::calculate(&natal, Some(&raw_transits()), at, &classifier);

    assert!(report.calculation_error.is_none());
    assert!(report.aspects_to_natal.iter().all(|a| a.natal_planet == "Sun"));
}

#[test]
fn test_transit_aspect_serialization() {
    let classifier = AspectClassifier::default();
    let aspects = transit_aspects(&set(&[("Mars", 10.0)]), &set(&[("Venus", 100.0)]), &classifier);
    let json = serde_json::to_value(&aspects[0]).unwrap();

    assert_eq!(json["transiting_planet"], "Mars");
    assert_eq!(json["natal_planet"], "Venus");
    assert_eq!(json["aspect_name"], "Square");
    assert_eq!(json["orb"], 0.0);
}

#[test]
fn test_cross_product_output_is_orb_sorted() {
    let classifier = AspectClassifier::default();
    let a: PointSet = (0..24)
        .map(|i| CelestialPoint::from_longitude(format!("A{}", i), i as f64 * 14.7, false))
        .collect();
    let b: PointSet = (0..24)
        .map(|i| CelestialPoint::from_longitude(format!("B{}", i), i as f64 * 11.3 + 3.0, false))
        .collect();

    let aspects = synastry_aspects(&a, &b, &classifier);

    assert!(aspects.len() >= 2);
    assert!(aspects.windows(2).all(|w| w[0].orb <= w[1].orb));
}

#[test]
fn test_synastry_keeps_same_name_pairs() {
    let classifier = AspectClassifier::default();
    let a = set(&[("Venus", 200.0)]);
    let b = set(&[("Venus", 203.0)]);
    let aspects = synastry_aspects(&a, &b, &classifier);

    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].planet1, "Venus");
    assert_eq!(aspects[0].planet2, "Venus");
    assert_eq!(aspects[0].aspect_name, AspectKind::Conjunction);
}

#[test]
fn test_synastry_report() {
    let classifier = AspectClassifier::default();
    let chart1 = ChartRef::new(Uuid::new_v4(), "Alex");
    let chart2 = ChartRef::new(Uuid::new_v4(), "Sam");
    let planets2 = json!({
        "Sun": { "name": "Sun", "longitude": 195.0 },
        "Moon": { "name": "Moon", "longitude": 80.0 }
    });

    let report =
        SynastryReport::calculate(chart1.clone(), &stored_natal(), chart2, &planets2, &classifier);

    assert!(report.calculation_error.is_none());
    assert_eq!(report.chart1, chart1);
    // Sun 15 / Sun 195 -> exact opposition
    assert_eq!(report.aspects[0].orb, 0.0);
    assert!(report.aspects.iter().any(|a| {
        a.planet1 == "Sun" && a.planet2 == "Sun" && a.aspect_name == AspectKind::Opposition
    }));
    assert!(report.aspects.windows(2).all(|w| w[0].orb <= w[1].orb));
}

#[test]
fn test_synastry_report_malformed() {
    let classifier = AspectClassifier::default();
    let report = SynastryReport::calculate(
        ChartRef::new(Uuid::new_v4(), "Alex"),
        &stored_natal(),
        ChartRef::new(Uuid::new_v4(), "Sam"),
        &json!("not a chart"),
        &classifier,
    );

    assert!(report.calculation_error.is_some());
    assert!(report.aspects.is_empty());
}
