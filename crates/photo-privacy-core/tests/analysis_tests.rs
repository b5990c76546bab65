mod common;

use common::LOCATED_JPEG;
use photo_privacy_core::inference::ClassificationBundle;
use photo_privacy_core::intake::PhotoUpload;
use photo_privacy_core::report::{RiskLevel, RiskType};
use photo_privacy_core::session::AnalysisSession;
use photo_privacy_core::vision::{StaticVisionProvider, VisionProvider, VisionResponse};
use photo_privacy_core::{Config, Error, Locale, PhotoPrivacy, Result, VISION_NOT_CONFIGURED};
use tempfile::tempdir;

const HIKER_RESPONSE: &str = r#"{
    "labelAnnotations": [
        {"description": "Person", "score": 0.92},
        {"description": "Hiking", "score": 0.88},
        {"description": "Mountain", "score": 0.81}
    ],
    "faceAnnotations": [
        {
            "joyLikelihood": "VERY_LIKELY",
            "sorrowLikelihood": "VERY_UNLIKELY",
            "angerLikelihood": "VERY_UNLIKELY",
            "surpriseLikelihood": "VERY_UNLIKELY"
        }
    ]
}"#;

struct FailingProvider;

impl VisionProvider for FailingProvider {
    fn annotate(&self, _image: &[u8]) -> Result<VisionResponse> {
        Err(Error::ExternalService("503 Service Unavailable".to_string()))
    }
}

fn located_upload() -> PhotoUpload {
    PhotoUpload::from_parts("trail.jpg", "image/jpeg", LOCATED_JPEG.to_vec())
}

#[test]
fn test_report_for_located_photo() {
    let privacy = PhotoPrivacy::default();
    let analysis = privacy.analyze(&located_upload(), None).unwrap();

    let report = &analysis.report;
    assert_eq!(report.file_name, "trail.jpg");
    assert!(report.has_metadata);
    assert_eq!(report.summary.risk_score, 50);
    assert_eq!(report.summary.high_risks, 1);
    assert_eq!(report.summary.medium_risks, 1);
    assert_eq!(report.summary.low_risks, 1);

    let location = &report.risks[0];
    assert_eq!(location.kind, RiskType::Location);
    assert_eq!(location.level, RiskLevel::High);
    assert!(location
        .details
        .as_deref()
        .unwrap()
        .starts_with("Latitude: 37.000000, Longitude: -122.000000"));

    // Without a vision provider the classification degrades to defaults
    assert!(analysis.labels.is_empty());
    assert_eq!(
        analysis.classification.error.as_deref(),
        Some(VISION_NOT_CONFIGURED)
    );
    assert_eq!(analysis.classification.objects, vec!["image"]);
}

#[test]
fn test_chinese_report() {
    let config = Config {
        locale: Locale::Chinese,
        ..Config::default()
    };
    let analysis = PhotoPrivacy::new(config)
        .analyze(&located_upload(), None)
        .unwrap();
    assert_ne!(
        analysis.report.summary.recommendation,
        PhotoPrivacy::default()
            .analyze(&located_upload(), None)
            .unwrap()
            .report
            .summary
            .recommendation
    );
}

#[test]
fn test_classification_from_saved_response() {
    let provider = StaticVisionProvider::from_json(HIKER_RESPONSE).unwrap();
    let analysis = PhotoPrivacy::default()
        .analyze(&located_upload(), Some(&provider))
        .unwrap();

    let classification = &analysis.classification;
    assert!(classification.error.is_none());
    assert!(analysis
        .labels
        .iter()
        .any(|l| l.description.eq_ignore_ascii_case("hiking")));
    assert!(analysis.labels.windows(2).all(|w| w[0].score >= w[1].score));

    assert_eq!(classification.people.count, 1);
    assert_eq!(classification.people.emotions[0].person, "Person 1");
    assert_eq!(classification.people.emotions[0].emotion, "Joy");
    assert!(classification.interests.iter().any(|i| i == "Nature"));
    assert!(!classification.targeted_ads.is_empty());
    assert!(classification.targeted_ads.len() <= 8);
}

#[test]
fn test_vision_failure_keeps_metadata_report() {
    let analysis = PhotoPrivacy::default()
        .analyze(&located_upload(), Some(&FailingProvider))
        .unwrap();

    assert_eq!(analysis.report.summary.risk_score, 50);
    assert!(analysis.labels.is_empty());

    let defaults = ClassificationBundle::default();
    let classification = &analysis.classification;
    assert!(classification.error.as_deref().unwrap().contains("503"));
    assert_eq!(classification.people, defaults.people);
    assert_eq!(classification.interests, defaults.interests);
    assert_eq!(classification.targeted_ads, defaults.targeted_ads);
}

#[test]
fn test_intake_rejections() {
    let privacy = PhotoPrivacy::default();

    let gif = PhotoUpload::from_parts("anim.gif", "image/gif", b"GIF89a....".to_vec());
    assert!(matches!(
        privacy.analyze(&gif, None),
        Err(Error::UnsupportedFormat(_))
    ));

    let empty = PhotoUpload::from_parts("empty.jpg", "image/jpeg", Vec::new());
    assert!(matches!(privacy.strip(&empty), Err(Error::EmptyFile(_))));

    let mislabeled = PhotoUpload::from_parts("photo.png", "image/png", LOCATED_JPEG.to_vec());
    assert!(matches!(privacy.analyze(&mislabeled, None), Err(Error::Upload(_))));

    let small = PhotoPrivacy::new(Config {
        max_upload_bytes: 16,
        ..Config::default()
    });
    assert!(matches!(
        small.analyze(&located_upload(), None),
        Err(Error::FileTooLarge { .. })
    ));
}

#[test]
fn test_upload_from_path_and_strip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trail.jpg");
    std::fs::write(&path, LOCATED_JPEG.as_slice()).unwrap();

    let privacy = PhotoPrivacy::default();
    let upload = PhotoUpload::from_path(&path).unwrap();
    assert_eq!(upload.file_name, "trail.jpg");

    let stripped = privacy.strip(&upload).unwrap();
    let reupload = PhotoUpload::from_parts(&stripped.file_name, "image/jpeg", stripped.bytes);
    let analysis = privacy.analyze(&reupload, None).unwrap();
    assert!(!analysis.report.has_metadata);
    assert_eq!(analysis.report.summary.risk_score, 0);
}

#[test]
fn test_session_keeps_latest_analysis() {
    let privacy = PhotoPrivacy::default();
    let mut session = AnalysisSession::new();

    let slow = session.begin();
    let fast = session.begin();

    let clean = PhotoUpload::from_parts("clean.jpg", "image/jpeg", common::plain_jpeg(8, 8));
    assert!(session.publish(fast, privacy.analyze(&clean, None).unwrap()));
    assert!(!session.publish(slow, privacy.analyze(&located_upload(), None).unwrap()));

    let shown = session.current().unwrap();
    assert_eq!(shown.report.file_name, "clean.jpg");
}

#[test]
fn test_request_must_carry_exactly_one_photo() {
    let privacy = PhotoPrivacy::default();

    assert!(matches!(
        privacy.analyze_request(Vec::new(), None),
        Err(Error::Upload(_))
    ));
    assert!(matches!(
        privacy.analyze_request(vec![located_upload(), located_upload()], None),
        Err(Error::Upload(_))
    ));
    assert!(matches!(privacy.strip_request(Vec::new()), Err(Error::Upload(_))));
    assert!(matches!(
        privacy.strip_request(vec![located_upload(), located_upload()]),
        Err(Error::Upload(_))
    ));

    let analysis = privacy.analyze_request(vec![located_upload()], None).unwrap();
    assert_eq!(analysis.report.summary.risk_score, 50);
    let stripped = privacy.strip_request(vec![located_upload()]).unwrap();
    assert!(stripped.file_name.starts_with("metadata_removed_"));
}
