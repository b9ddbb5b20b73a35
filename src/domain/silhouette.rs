//! Body-type classification for the made-to-measure journey.
//!
//! A fixed rule chain over bust, waist and hips. The first matching rule
//! wins and the last one always matches, so every input yields exactly one
//! [`BodyType`].

use serde::Serialize;

use crate::domain::value_objects::Measurements;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    Hourglass,
    Pear,
    InvertedTriangle,
    Rectangle,
    Noble,
}

impl BodyType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hourglass => "Đồng Hồ Cát",
            Self::Pear => "Quả Lê",
            Self::InvertedTriangle => "Tam Giác Ngược",
            Self::Rectangle => "Chữ H",
            Self::Noble => "Quý Phái",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Hourglass => "Tỉ lệ cân đối hoàn hảo",
            Self::Pear => "Hông rộng, eo thon",
            Self::InvertedTriangle => "Vai rộng, dáng thanh",
            Self::Rectangle => "Dáng thẳng thanh thoát",
            Self::Noble => "Dáng người độc đáo",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Hourglass => "Áo Dài Ngũ Thân sẽ tôn vinh đường cong tuyệt mỹ của bạn!",
            Self::Pear => "Áo Dài tứ thân sẽ cân bằng hoàn hảo tỉ lệ cơ thể.",
            Self::InvertedTriangle => "Áo Dài cổ cao sẽ tạo sự cân đối tuyệt vời.",
            Self::Rectangle => "Áo Dài cách tân sẽ tạo đường cong mềm mại.",
            Self::Noble => "Áo Dài may đo sẽ tôn vinh vẻ đẹp riêng của bạn!",
        }
    }
}

/// Differences of at least this much from the waist count as a defined curve.
const CURVE_MIN: i64 = 10;
/// Bust and hips within this distance are balanced; beyond it one dominates.
const BALANCE_TOLERANCE: i64 = 5;
/// Both differences under this read as a straight silhouette.
const STRAIGHT_MAX: i64 = 8;

pub fn classify(bust: i64, waist: i64, hips: i64) -> BodyType {
    let bust_waist = bust - waist;
    let hips_waist = hips - waist;

    if bust_waist >= CURVE_MIN && hips_waist >= CURVE_MIN && (bust - hips).abs() <= BALANCE_TOLERANCE {
        BodyType::Hourglass
    } else if hips > bust + BALANCE_TOLERANCE {
        BodyType::Pear
    } else if bust > hips + BALANCE_TOLERANCE {
        BodyType::InvertedTriangle
    } else if bust_waist < STRAIGHT_MAX && hips_waist < STRAIGHT_MAX {
        BodyType::Rectangle
    } else {
        BodyType::Noble
    }
}

/// Result of the measurement journey: the classification plus the inputs it came from.
#[derive(Clone, Debug, Serialize)]
pub struct MeasurementProfile {
    pub body_type: BodyType,
    pub label: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
    pub measurements: Measurements,
    pub summary: String,
}

impl MeasurementProfile {
    pub fn from_measurements(measurements: Measurements) -> Self {
        let body_type = classify(
            i64::from(measurements.bust()),
            i64::from(measurements.waist()),
            i64::from(measurements.hips()),
        );
        Self {
            body_type,
            label: body_type.label(),
            description: body_type.description(),
            recommendation: body_type.recommendation(),
            summary: measurements.summary(),
            measurements,
        }
    }
}
