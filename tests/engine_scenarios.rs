use std::f64::consts::PI;
use rppg_sentinel::{
    AlertBand, EngineConfig, EngineOutput, Feed, Reading, SampleSlot, SourceFeed, StatusLabel,
    ThreatScoreEngine, TickFeed,
};
use rppg_sentinel::drivers::ManualSource;
fn engine() -> ThreatScoreEngine {
    ThreatScoreEngine::new(EngineConfig::default()).expect("default config is valid")
}
fn sine_sample(freq_hz: f64, i: usize) -> f64 {
    128.0 + 5.0 * (2.0 * PI * freq_hz * i as f64 / 30.0).sin()
}
#[test]
fn first_score_arrives_exactly_when_window_fills() {
    let mut engine = engine();
    for k in 1..150 {
        match engine.tick(Some(128.0)) {
            EngineOutput::Calibrating { percent } => assert_eq!(percent as usize, 100 * k / 150),
            other => panic!("tick {k}: expected calibration, got {other:?}"),
        }
    }
    assert!(matches!(engine.tick(Some(128.0)), EngineOutput::Scored { .. }));
}
#[test]
fn flat_feed_drifts_towards_high_alert() {
    let mut engine = engine();
    let mut last = EngineOutput::Obscured;
    for _ in 0..150 + 60 {
        last = engine.tick(Some(128.0));
    }
    // 61 scored ticks at raw 87.5: 87.5 * (1 - 0.85^61)
    let expected = 87.5 * (1.0 - 0.85f64.powi(61));
    assert!((engine.display_score() - expected).abs() < 1e-6);
    assert_eq!(
        last,
        EngineOutput::Scored {
            probability: 88,
            score: expected.round() as u8
        }
    );
    assert_eq!(last.band(), Some(AlertBand::High));
    assert_eq!(last.status(), Some(StatusLabel::Alert));
}
#[test]
fn slow_pulse_stays_verified() {
    let mut engine = engine();
    for i in 0..350 {
        let out = engine.tick(Some(sine_sample(0.78, i)));
        if let EngineOutput::Scored { probability, score } = out {
            assert!(probability <= 6, "sample {i}: raw {probability}");
            assert!(score <= 6, "sample {i}: score {score}");
        }
    }
    let report = engine.last_report().expect("scored at least once");
    assert!(report.energy > 0.9 && report.energy < 2.1);
    assert!(engine.display_score() < 6.0);
}
#[test]
fn resting_heart_rate_tone_is_too_energetic() {
    // A pure 1.2 Hz tone normalized to unit variance carries far more
    // first-difference energy than the plausible band allows.
    let mut engine = engine();
    let mut raw = 0;
    for i in 0..150 {
        if let EngineOutput::Scored { probability, .. } = engine.tick(Some(sine_sample(1.2, i))) {
            raw = probability;
        }
    }
    assert_eq!(raw, 100);
    let report = engine.last_report().unwrap();
    assert!(report.energy > 8.0 && report.energy < 10.5);
    let spectrum = report.spectrum.as_ref().unwrap();
    assert!((spectrum.bpm - 72.0).abs() < 1e-6);
}
#[test]
fn obscured_ticks_interleave_without_side_effects() {
    let mut with_gaps = engine();
    let mut without = engine();
    for i in 0..200 {
        let sample = sine_sample(0.78, i);
        without.tick(Some(sample));
        with_gaps.tick(Some(sample));
        if i % 3 == 0 {
            let before = with_gaps.buffer().snapshot();
            let score = with_gaps.display_score();
            assert_eq!(with_gaps.tick(None), EngineOutput::Obscured);
            assert_eq!(with_gaps.buffer().snapshot(), before);
            assert_eq!(with_gaps.display_score(), score);
        }
    }
    assert_eq!(with_gaps.buffer().snapshot(), without.buffer().snapshot());
    assert_eq!(with_gaps.display_score(), without.display_score());
}
#[test]
fn glitch_frame_is_absorbed() {
    let mut clean = engine();
    let mut glitched = engine();
    for i in 0..150 {
        let sample = sine_sample(0.78, i);
        clean.tick(Some(sample));
        glitched.tick(Some(if i == 90 { 255.0 } else { sample }));
    }
    let a = clean.last_report().unwrap().energy;
    let b = glitched.last_report().unwrap().energy;
    assert!((a - b).abs() < 0.05, "clean {a} vs glitched {b}");
}
#[test]
fn numeric_blowup_degrades_to_zero_and_recovers() {
    let mut engine = ThreatScoreEngine::new(EngineConfig {
        capacity: 30,
        ..EngineConfig::default()
    })
    .unwrap();
    for _ in 0..30 {
        engine.tick(Some(128.0));
    }
    let held = engine.display_score();
    assert_eq!(
        engine.tick(Some(1.5e308)),
        EngineOutput::Scored {
            probability: 0,
            score: 0
        }
    );
    assert_eq!(engine.faults(), 1);
    assert_eq!(engine.display_score(), held);
    // Once the bad sample ages out of the window, scoring resumes.
    let mut out = EngineOutput::Obscured;
    for _ in 0..30 {
        out = engine.tick(Some(128.0));
    }
    assert!(matches!(out, EngineOutput::Scored { probability: 88, .. }));
    assert!(engine.display_score() > held);
}
#[test]
fn feeds_are_usable_from_the_crate_root() {
    fn drain<F: TickFeed>(feed: &mut F) -> Vec<Feed> {
        std::iter::from_fn(|| match feed.poll() {
            Feed::Closed => None,
            other => Some(other),
        })
        .collect()
    }
    let mut source = SourceFeed(ManualSource::new([Reading::Face(1.0), Reading::NoFace]));
    assert_eq!(
        drain(&mut source),
        vec![Feed::Ready(Reading::Face(1.0)), Feed::Ready(Reading::NoFace)]
    );
    let mut slot = SampleSlot::new();
    slot.offer(Reading::Face(2.0));
    slot.close();
    assert_eq!(drain(&mut slot), vec![Feed::Ready(Reading::Face(2.0))]);
}
