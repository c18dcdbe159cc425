use handtrack_rs::integration::ImageOps;
use handtrack_rs::tracker::{Contour, MismatchPolicy, annotate_defects};
use handtrack_rs::{
    CycleOutcome, CycleStage, GestureLabel, HandTracker, ImageprocOps, Roi, SegmentationMode,
    SegmentationParams, TrackerConfig, TrackerError,
};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn hsv_config(width: u32, height: u32) -> TrackerConfig {
    TrackerConfig {
        roi: Roi::new(0, 0, width, height),
        segmentation: SegmentationParams {
            mode: SegmentationMode::HsvRange,
            ..SegmentationParams::default()
        },
        ..TrackerConfig::default()
    }
}

/// Palm with five raised fingers, middle finger tallest.
fn open_hand() -> RgbImage {
    let mut frame = RgbImage::new(300, 320);
    draw_filled_rect_mut(&mut frame, Rect::at(60, 240).of_size(180, 70), WHITE);
    for (x, top) in [(70, 90), (105, 55), (140, 40), (175, 55), (210, 90)] {
        draw_filled_rect_mut(&mut frame, Rect::at(x, top).of_size(16, (241 - top) as u32), WHITE);
    }
    frame
}

#[test]
fn test_open_hand_counts_five() {
    let mut tracker = HandTracker::new(hsv_config(300, 320));
    let report = tracker.process(&open_hand()).unwrap();

    assert_eq!(report.stage, CycleStage::Classified);
    assert_eq!(
        report.outcome,
        CycleOutcome::Classified {
            fingertip_count: 5,
            gesture: GestureLabel::Hello,
        }
    );
    // Every fingertip sits on a finger top.
    assert!(report.fingertips.iter().all(|p| p.y <= 90));
    // The gaps between fingers show up as marked defects.
    assert!(report.defects.iter().filter(|d| d.marked).count() >= 4);
}

#[test]
fn test_fist_counts_zero() {
    let mut tracker = HandTracker::new(hsv_config(300, 320));
    let mut frame = RgbImage::new(300, 320);
    draw_filled_circle_mut(&mut frame, (150, 160), 70, WHITE);

    let report = tracker.process(&frame).unwrap();
    assert_eq!(report.fingertip_count(), 0);
    assert_eq!(report.gesture(), Some(GestureLabel::Fist));
}

#[test]
fn test_empty_mask_reports_no_hand() {
    let mut tracker = HandTracker::new(hsv_config(300, 320));
    let report = tracker.process(&RgbImage::new(300, 320)).unwrap();

    assert_eq!(report.outcome, CycleOutcome::NoHand);
    assert_eq!(report.fingertip_count(), 0);
    assert!(report.contour.is_none());
    assert!(report.defects.is_empty());
}

#[test]
fn test_resized_roi_falls_back_without_differencing() {
    let mut config = hsv_config(300, 320);
    config.segmentation.mode = SegmentationMode::BackgroundDiff;
    let mut tracker = HandTracker::new(config);

    tracker.set_roi(Roi::new(0, 0, 100, 100));
    tracker.recapture_background(&RgbImage::new(300, 320)).unwrap();
    tracker.set_roi(Roi::new(0, 0, 300, 320));

    let frame = open_hand();
    let report = tracker.process(&frame).unwrap();

    let ops = ImageprocOps::new();
    let params = tracker.segmentation_params();
    let blurred = ops.gaussian_blur(&ops.to_gray(&frame), params.blur_sigma);
    let expected = ops.open(&ops.threshold(&blurred, params.sensitivity), params.opening_radius);
    assert_eq!(report.mask, expected);
}

#[test]
fn test_resized_roi_can_demand_recapture() {
    let mut config = hsv_config(300, 320);
    config.segmentation.mode = SegmentationMode::BackgroundDiff;
    config.mismatch_policy = MismatchPolicy::RequireRecapture;
    let mut tracker = HandTracker::new(config);

    tracker.set_roi(Roi::new(0, 0, 100, 100));
    tracker.recapture_background(&RgbImage::new(300, 320)).unwrap();
    tracker.set_roi(Roi::new(0, 0, 300, 320));

    let err = tracker.process(&open_hand()).unwrap_err();
    assert_eq!(
        err,
        TrackerError::BackgroundMismatch {
            background: (100, 100),
            frame: (300, 320),
        }
    );

    tracker.recapture_background(&RgbImage::new(300, 320)).unwrap();
    assert!(tracker.process(&open_hand()).is_ok());
}

#[test]
fn test_zero_blur_sigma_uses_automatic_sigma() {
    let config: TrackerConfig =
        serde_json::from_str(r#"{ "roi": { "x": 0, "y": 0, "width": 300, "height": 320 },
                                  "segmentation": { "blur_sigma": 0.0 } }"#)
            .unwrap();
    let mut zero = HandTracker::new(config.clone());
    let mut auto = HandTracker::new(TrackerConfig {
        segmentation: SegmentationParams::default(),
        ..config
    });
    for tracker in [&mut zero, &mut auto] {
        tracker.recapture_background(&RgbImage::new(300, 320)).unwrap();
    }

    let zero_report = zero.process(&open_hand()).unwrap();
    let auto_report = auto.process(&open_hand()).unwrap();
    assert_eq!(zero_report.mask, auto_report.mask);
    assert_eq!(zero_report.outcome, auto_report.outcome);
}

#[test]
fn test_non_finite_blur_sigma_is_an_error() {
    let mut config = hsv_config(300, 320);
    config.segmentation.mode = SegmentationMode::BackgroundDiff;
    config.segmentation.blur_sigma = f32::NAN;
    let mut tracker = HandTracker::new(config);
    tracker.recapture_background(&RgbImage::new(300, 320)).unwrap();

    let err = tracker.process(&open_hand()).unwrap_err();
    assert!(matches!(err, TrackerError::InvalidBlurSigma { .. }));
}

#[test]
fn test_self_intersecting_contour_has_no_defects() {
    let ops = ImageprocOps::new();
    let points = [(0, 0), (120, 120), (120, 0), (0, 120), (60, 40)]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
    let contour = Contour::new(&ops, points);
    assert!(annotate_defects(&ops, &contour, 0.0).is_empty());
}

#[test]
fn test_config_loads_over_defaults() {
    let config: TrackerConfig = serde_json::from_str(
        r#"{
            "roi": { "x": 10, "y": 20, "width": 200, "height": 150 },
            "segmentation": { "mode": "Hybrid", "sensitivity": 30 },
            "fingertips": { "min_finger_distance": 65.0 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.roi, Roi::new(10, 20, 200, 150));
    assert_eq!(config.segmentation.mode, SegmentationMode::Hybrid);
    assert_eq!(config.segmentation.sensitivity, 30);
    assert_eq!(config.segmentation.hsv.lower, [0, 0, 82]);
    assert_eq!(config.fingertips.min_finger_distance, 65.0);
    assert_eq!(config.fingertips.y_slack, 20.0);
    assert_eq!(config.depth_threshold, 10.0);
    assert_eq!(config.mismatch_policy, MismatchPolicy::Fallback);

    let round_trip: TrackerConfig =
        serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(round_trip, config);
}
