//! End-to-end segmentation scenarios
//!
//! These tests drive a radar session the way the weighting screens do:
//! slider edits, preset picks and segment clicks from the 3D view.

use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;
use segment_studio::{RadarSurface, SegmentClickBridge, SegmentationSession};
use segment_studio_config::Settings;
use segment_studio_core::{
    PercentageNormalizer, PresetCatalog, RoundingPolicy, SegmentProfile, SegmentSynthesizer,
    WeightVector, DIGITAL_ENGAGEMENT_DOMAIN,
};

fn digital_session() -> SegmentationSession {
    SegmentationSession::for_domain(&Settings::default(), DIGITAL_ENGAGEMENT_DOMAIN).unwrap()
}

fn names(segments: &[SegmentProfile]) -> Vec<&str> {
    segments.iter().map(|s| s.name.as_str()).collect()
}

fn total(segments: &[SegmentProfile]) -> u32 {
    segments.iter().map(|s| s.percentage).sum()
}

/// Digital engagement, every weight at 80: three active segments
#[test]
fn test_digital_high_band() {
    let mut session = digital_session();
    let segments = session
        .on_weights_changed(WeightVector::uniform(6, 80.0).unwrap())
        .unwrap();

    assert_eq!(
        names(segments),
        vec!["Digital Natives", "Tech-Savvy Professionals", "Selective Digital Users"]
    );
    assert_eq!(total(segments), 100);
    assert_eq!(
        segments.iter().map(|s| s.percentage).collect::<Vec<_>>(),
        vec![43, 38, 19]
    );
}

/// Digital engagement, every weight at 50: two transitional segments
#[test]
fn test_digital_middle_band() {
    let mut session = digital_session();
    let segments = session
        .on_weights_changed(WeightVector::uniform(6, 50.0).unwrap())
        .unwrap();

    assert_eq!(names(segments), vec!["Emerging Digital", "Traditional Preference"]);
    assert_eq!(total(segments), 100);
}

/// Digital engagement, every weight at 20: one segment holding everyone
#[test]
fn test_digital_low_band() {
    let mut session = digital_session();
    let segments = session
        .on_weights_changed(WeightVector::uniform(6, 20.0).unwrap())
        .unwrap();

    assert_eq!(names(segments), vec!["Traditional Bankers"]);
    assert_eq!(segments[0].percentage, 100);
}

/// Generic domain with the default weights
#[test]
fn test_generic_default_weights() {
    let session =
        SegmentationSession::for_domain(&Settings::default(), "financial-capacity").unwrap();

    assert_eq!(
        session.weights().values(),
        &[40.0, 60.0, 80.0, 70.0, 50.0, 90.0]
    );
    assert_eq!(
        names(session.segments()),
        vec!["High Performers", "Growth Potential", "Standard Segment"]
    );
    assert_eq!(total(session.segments()), 100);
}

#[test]
fn test_digital_first_preset_overrides_previous_weights() {
    let mut session = digital_session();
    session.edit_dimension(2, 3.0).unwrap();
    session.edit_dimension(5, 99.0).unwrap();

    session.select_preset("digital-first").unwrap();
    assert_eq!(
        session.weights().values(),
        &[95.0, 90.0, 85.0, 80.0, 75.0, 85.0]
    );
}

#[test]
fn test_unknown_preset_keeps_weights() {
    let mut session = digital_session();
    session.edit_dimension(0, 12.0).unwrap();
    let before = session.weights().clone();
    let count = session.synthesis_count();

    session.select_preset("unknown-id").unwrap();
    assert_eq!(session.weights(), &before);
    assert_eq!(session.synthesis_count(), count);
}

#[test]
fn test_extreme_vectors_follow_bands() {
    let mut session = digital_session();

    let low = session
        .on_weights_changed(WeightVector::uniform(6, 0.0).unwrap())
        .unwrap();
    assert_eq!(names(low), vec!["Traditional Bankers"]);

    // Raw shares 65/40/10 round independently to a total of 101
    let high = session
        .on_weights_changed(WeightVector::uniform(6, 100.0).unwrap())
        .unwrap();
    assert_eq!(
        high.iter().map(|s| s.percentage).collect::<Vec<_>>(),
        vec![57, 35, 9]
    );
    assert!((99..=101).contains(&total(high)));
}

#[test]
fn test_top_of_range_with_largest_remainder() {
    let mut settings = Settings::default();
    settings.normalization.rounding = RoundingPolicy::LargestRemainder;
    let mut session = SegmentationSession::for_domain(&settings, DIGITAL_ENGAGEMENT_DOMAIN).unwrap();

    let high = session
        .on_weights_changed(WeightVector::uniform(6, 100.0).unwrap())
        .unwrap();
    assert_eq!(
        high.iter().map(|s| s.percentage).collect::<Vec<_>>(),
        vec![56, 35, 9]
    );
    assert_eq!(total(high), 100);
}

#[test]
fn test_slider_drag_crosses_band() {
    let mut session = digital_session();
    session.select_preset("balanced").unwrap();
    assert_eq!(session.segments().len(), 2);

    // Mean rises from 60 to about 78
    session.edit_dimension(3, 100.0).unwrap();
    session.edit_dimension(4, 100.0).unwrap();
    let segments = session.edit_dimension(5, 90.0).unwrap();
    assert_eq!(segments.len(), 3);
}

#[test]
fn test_largest_remainder_settings() {
    let mut settings = Settings::default();
    settings.normalization.rounding = RoundingPolicy::LargestRemainder;

    let mut session = SegmentationSession::for_domain(&settings, "life-stage").unwrap();
    for value in [0.0, 13.0, 33.3, 66.7, 100.0] {
        let segments = session
            .on_weights_changed(WeightVector::uniform(6, value).unwrap())
            .unwrap();
        assert_eq!(total(segments), 100);
    }
}

#[test]
fn test_segment_click_reaches_view() {
    let settings = Settings::default();
    let bridge = SegmentClickBridge::from_settings(&settings);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let subscription = bridge.subscribe(move |sel| {
        sink.lock().push((sel.attribute.id.clone(), sel.selected));
    });

    bridge.dispatch("digital-engagement", "true");
    bridge.dispatch("not-an-attribute", "false");
    drop(subscription);
    bridge.dispatch("life-stage", "true");

    assert_eq!(
        *seen.lock(),
        vec![
            ("digital-engagement".to_string(), true),
            ("financial-capacity".to_string(), false),
        ]
    );
}

proptest! {
    #[test]
    fn prop_normalized_segments_sum_near_hundred(values in prop::collection::vec(0.0f64..=100.0, 6)) {
        let synthesizer = SegmentSynthesizer::new();
        let normalizer = PercentageNormalizer::default();
        let w = WeightVector::new(values).unwrap();

        for domain in [DIGITAL_ENGAGEMENT_DOMAIN, "product-affinity"] {
            let segments = synthesizer.profiles(&w, domain, &normalizer);
            let sum = total(&segments);
            prop_assert!((99..=101).contains(&sum), "sum was {}", sum);
        }
    }

    #[test]
    fn prop_preset_then_edit_is_deterministic(index in 0usize..6, value in 0.0f64..=100.0) {
        let mut a = digital_session();
        let mut b = digital_session();
        for preset in PresetCatalog::builtin().ids() {
            a.select_preset(preset).unwrap();
            b.select_preset(preset).unwrap();
        }
        let left = a.edit_dimension(index, value).unwrap().to_vec();
        let right = b.edit_dimension(index, value).unwrap().to_vec();
        prop_assert_eq!(left, right);
    }
}
