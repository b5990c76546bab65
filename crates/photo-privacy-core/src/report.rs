//! Privacy report built from normalized metadata.
//!
//! Building is total: every record, including an empty one, yields a valid
//! report. Risk levels are fixed per category (location high, device medium,
//! capture time low) and the score thresholds are constants.

use serde::{Deserialize, Serialize};

use crate::metadata::NormalizedMetadata;
use crate::types::Locale;

const HIGH_RISK_WEIGHT: u32 = 30;
const MEDIUM_RISK_WEIGHT: u32 = 15;
const LOW_RISK_WEIGHT: u32 = 5;
const MAX_RISK_SCORE: u32 = 100;

const STRONG_WARNING_SCORE: u32 = 70;
const MODERATE_WARNING_SCORE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskType {
    Location,
    Device,
    Time,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    fn weight(self) -> u32 {
        match self {
            RiskLevel::High => HIGH_RISK_WEIGHT,
            RiskLevel::Medium => MEDIUM_RISK_WEIGHT,
            RiskLevel::Low => LOW_RISK_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyRisk {
    #[serde(rename = "type")]
    pub kind: RiskType,
    pub level: RiskLevel,
    pub description: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataCategory {
    pub category: String,
    pub items: Vec<MetadataItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// 0-100
    pub risk_score: u32,
    pub high_risks: usize,
    pub medium_risks: usize,
    pub low_risks: usize,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub file_name: String,
    pub has_metadata: bool,
    pub risks: Vec<PrivacyRisk>,
    pub summary: ReportSummary,
    pub detected_metadata: Vec<MetadataCategory>,
}

/// User-facing strings for one locale
struct ReportText {
    location_risk: &'static str,
    device_risk: &'static str,
    time_risk: &'static str,
    latitude: &'static str,
    longitude: &'static str,
    altitude: &'static str,
    metres: &'static str,
    location: &'static str,
    device: &'static str,
    make: &'static str,
    model: &'static str,
    software: &'static str,
    time: &'static str,
    capture_time: &'static str,
    camera: &'static str,
    exposure: &'static str,
    seconds: &'static str,
    aperture: &'static str,
    focal_length: &'static str,
    strong_warning: &'static str,
    moderate_warning: &'static str,
    mild_note: &'static str,
    no_risk: &'static str,
}

const ENGLISH: ReportText = ReportText {
    location_risk: "Photo contains precise GPS location",
    device_risk: "Photo contains device information",
    time_risk: "Photo contains capture time",
    latitude: "Latitude",
    longitude: "Longitude",
    altitude: "Altitude",
    metres: "m",
    location: "Location",
    device: "Device",
    make: "Make",
    model: "Model",
    software: "Software",
    time: "Time",
    capture_time: "Capture time",
    camera: "Camera Parameters",
    exposure: "Exposure",
    seconds: "s",
    aperture: "Aperture",
    focal_length: "Focal length",
    strong_warning: "Strongly recommended to remove metadata before sharing, especially location",
    moderate_warning: "Recommended to remove metadata before sharing sensitive photos",
    mild_note: "Photo contains a little metadata; consider removing it before sharing sensitive content",
    no_risk: "No privacy risk detected",
};

const CHINESE: ReportText = ReportText {
    location_risk: "照片包含精确的GPS位置信息",
    device_risk: "照片包含设备信息",
    time_risk: "照片包含时间信息",
    latitude: "纬度",
    longitude: "经度",
    altitude: "海拔",
    metres: "米",
    location: "位置信息",
    device: "设备信息",
    make: "设备品牌",
    model: "设备型号",
    software: "软件",
    time: "时间信息",
    capture_time: "拍摄时间",
    camera: "相机参数",
    exposure: "曝光时间",
    seconds: "秒",
    aperture: "光圈",
    focal_length: "焦距",
    strong_warning: "强烈建议在分享前清除照片元数据，特别是位置信息",
    moderate_warning: "建议在分享敏感照片前清除元数据",
    mild_note: "照片包含少量元数据，分享敏感内容时应考虑清除",
    no_risk: "未检测到隐私风险",
};

fn text_for(locale: Locale) -> &'static ReportText {
    match locale {
        Locale::English => &ENGLISH,
        Locale::Chinese => &CHINESE,
    }
}

fn item(name: &str, value: impl Into<String>) -> MetadataItem {
    MetadataItem {
        name: name.to_string(),
        value: value.into(),
    }
}

/// Weighted risk score, capped at 100
pub fn risk_score(risks: &[PrivacyRisk]) -> u32 {
    risks
        .iter()
        .map(|r| r.level.weight())
        .sum::<u32>()
        .min(MAX_RISK_SCORE)
}

fn recommendation(score: u32, text: &ReportText) -> &'static str {
    if score >= STRONG_WARNING_SCORE {
        text.strong_warning
    } else if score >= MODERATE_WARNING_SCORE {
        text.moderate_warning
    } else if score > 0 {
        text.mild_note
    } else {
        text.no_risk
    }
}

/// Build the privacy report for one photo
pub fn build_report(file_name: &str, metadata: &NormalizedMetadata, locale: Locale) -> AnalysisReport {
    let text = text_for(locale);
    let mut risks = Vec::new();
    let mut detected = Vec::new();

    if let Some(gps) = &metadata.gps {
        let latitude = format!("{:.6}", gps.latitude);
        let longitude = format!("{:.6}", gps.longitude);
        let altitude = gps.altitude.map(|a| format!("{:.1}{}", a, text.metres));

        let mut details = format!(
            "{}: {}, {}: {}",
            text.latitude, latitude, text.longitude, longitude
        );
        if let Some(altitude) = &altitude {
            details.push_str(&format!(", {}: {}", text.altitude, altitude));
        }
        risks.push(PrivacyRisk {
            kind: RiskType::Location,
            level: RiskLevel::High,
            description: text.location_risk.to_string(),
            details: Some(details),
        });

        let mut items = vec![item(text.latitude, latitude), item(text.longitude, longitude)];
        items.extend(altitude.map(|a| item(text.altitude, a)));
        detected.push(MetadataCategory {
            category: text.location.to_string(),
            items,
        });
    }

    if metadata.has_device_info() {
        let device = format!(
            "{} {}",
            metadata.make.as_deref().unwrap_or_default(),
            metadata.model.as_deref().unwrap_or_default()
        );
        risks.push(PrivacyRisk {
            kind: RiskType::Device,
            level: RiskLevel::Medium,
            description: text.device_risk.to_string(),
            details: Some(device.trim().to_string()),
        });

        let mut items = Vec::new();
        items.extend(metadata.make.as_deref().map(|v| item(text.make, v)));
        items.extend(metadata.model.as_deref().map(|v| item(text.model, v)));
        items.extend(metadata.software.as_deref().map(|v| item(text.software, v)));
        detected.push(MetadataCategory {
            category: text.device.to_string(),
            items,
        });
    }

    if let Some(capture_time) = &metadata.capture_time {
        let when = capture_time.display();
        risks.push(PrivacyRisk {
            kind: RiskType::Time,
            level: RiskLevel::Low,
            description: text.time_risk.to_string(),
            details: Some(when.clone()),
        });
        detected.push(MetadataCategory {
            category: text.time.to_string(),
            items: vec![item(text.capture_time, when)],
        });
    }

    let mut camera = Vec::new();
    if let Some(exposure) = metadata.exposure_time {
        camera.push(item(text.exposure, format!("{}{}", exposure, text.seconds)));
    }
    if let Some(f_number) = metadata.f_number {
        camera.push(item(text.aperture, format!("f/{}", f_number)));
    }
    if let Some(iso) = metadata.iso {
        camera.push(item("ISO", iso.to_string()));
    }
    if let Some(focal_length) = metadata.focal_length {
        camera.push(item(text.focal_length, format!("{}mm", focal_length)));
    }
    if !camera.is_empty() {
        detected.push(MetadataCategory {
            category: text.camera.to_string(),
            items: camera,
        });
    }

    let count = |level: RiskLevel| risks.iter().filter(|r| r.level == level).count();
    let score = risk_score(&risks);
    let summary = ReportSummary {
        risk_score: score,
        high_risks: count(RiskLevel::High),
        medium_risks: count(RiskLevel::Medium),
        low_risks: count(RiskLevel::Low),
        recommendation: recommendation(score, text).to_string(),
    };

    AnalysisReport {
        file_name: file_name.to_string(),
        has_metadata: !metadata.is_empty(),
        risks,
        summary,
        detected_metadata: detected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{CaptureTime, GpsCoordinate};

    fn located_device() -> NormalizedMetadata {
        NormalizedMetadata {
            gps: GpsCoordinate::new(37.0, 122.0, None),
            make: Some("Acme".to_string()),
            model: Some("X1".to_string()),
            ..NormalizedMetadata::default()
        }
    }

    #[test]
    fn test_location_and_device() {
        let report = build_report("photo.jpg", &located_device(), Locale::English);

        assert_eq!(report.risks.len(), 2);
        assert_eq!(report.risks[0].kind, RiskType::Location);
        assert_eq!(report.risks[0].level, RiskLevel::High);
        assert_eq!(report.risks[1].kind, RiskType::Device);
        assert_eq!(report.risks[1].level, RiskLevel::Medium);
        assert_eq!(report.risks[1].details.as_deref(), Some("Acme X1"));
        assert_eq!(report.summary.risk_score, 45);
        assert_eq!(
            report.summary.recommendation,
            "Recommended to remove metadata before sharing sensitive photos"
        );
        assert!(report.has_metadata);
    }

    #[test]
    fn test_empty_metadata() {
        let report = build_report("blank.png", &NormalizedMetadata::default(), Locale::Chinese);
        assert!(report.risks.is_empty());
        assert!(!report.has_metadata);
        assert_eq!(report.summary.risk_score, 0);
        assert_eq!(report.summary.recommendation, "未检测到隐私风险");
        assert!(report.detected_metadata.is_empty());
    }

    #[test]
    fn test_detail_formatting() {
        let metadata = NormalizedMetadata {
            gps: GpsCoordinate::new(-33.8688, 151.2093, Some(58.3)),
            model: Some("X1".to_string()),
            capture_time: Some(CaptureTime::parse("2024:05:01 14:03:22")),
            f_number: Some(1.8),
            iso: Some(100),
            focal_length: Some(26.0),
            ..NormalizedMetadata::default()
        };
        let report = build_report("photo.jpg", &metadata, Locale::English);

        assert_eq!(
            report.risks[0].details.as_deref(),
            Some("Latitude: -33.868800, Longitude: 151.209300, Altitude: 58.3m")
        );
        assert_eq!(report.risks[1].details.as_deref(), Some("X1"));
        assert_eq!(report.risks[2].details.as_deref(), Some("2024-05-01 14:03:22"));
        assert_eq!(report.summary.risk_score, 50);

        let camera = report
            .detected_metadata
            .iter()
            .find(|c| c.category == "Camera Parameters")
            .unwrap();
        let values: Vec<&str> = camera.items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["f/1.8", "100", "26mm"]);
    }

    #[test]
    fn test_score_is_monotone_and_capped() {
        let risk = |level| PrivacyRisk {
            kind: RiskType::Other,
            level,
            description: String::new(),
            details: None,
        };
        let mut risks = Vec::new();
        let mut previous = 0;
        for _ in 0..5 {
            risks.push(risk(RiskLevel::High));
            let score = risk_score(&risks);
            assert!(score >= previous);
            assert!(score <= 100);
            previous = score;
        }
        assert_eq!(previous, 100);
    }
}
