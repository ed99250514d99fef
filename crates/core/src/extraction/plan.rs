use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use url::Url;

/// Number of plans every extraction must produce.
pub const PLAN_COUNT: usize = 3;

/// Number of highlights every plan must list.
pub const HIGHLIGHT_COUNT: usize = 4;

const RATING_RANGE: RangeInclusive<f64> = 0.0..=5.0;
const MAX_CONFIDENCE: u32 = 100;

/// What the traveler asked for.
///
/// Fields the conversation didn't settle are expected to hold the
/// sentinel values the extraction instruction asks for ("Flexible",
/// "Solo"); they are not filled in locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPreferences {
    pub destination: String,
    pub duration: String,
    pub budget: String,
    pub group_size: String,
    pub travel_style: String,
    pub interests: Vec<String>,
    pub conversation_summary: String,
    /// Fields the model added beyond the contract, passed through as is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One of the proposed trips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub destination: String,
    pub duration: String,
    pub group_size: String,
    pub total_cost: f64,
    pub rating: f64,
    #[serde(deserialize_with = "whole_number")]
    pub review_count: u64,
    pub image: String,
    pub highlights: Vec<String>,
    /// Category (hotels, activities, ...) to how many are included.
    pub included: BTreeMap<String, u32>,
    pub tags: Vec<String>,
    /// How well the plan fits, in percent.
    #[serde(deserialize_with = "whole_number")]
    pub ai_confidence: u32,
    /// Fields the model added beyond the contract, passed through as is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts integers as well as floats with no fractional part, `92.0`
/// reads as `92`.
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let number = Number::deserialize(deserializer)?;
    let whole = match (number.as_u64(), number.as_f64()) {
        (Some(n), _) => Some(n),
        (None, Some(f)) if f.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(&f) => {
            Some(f as u64)
        }
        _ => None,
    };
    whole
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| D::Error::custom(format!("expected a whole number, got {number}")))
}

impl TravelPlan {
    /// Checks the constraints JSON types alone can't express.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if !self.total_cost.is_finite() || self.total_cost < 0.0 {
            return Err(format!(
                "plan {:?} has an invalid total cost {}",
                self.id, self.total_cost
            ));
        }
        if !RATING_RANGE.contains(&self.rating) {
            return Err(format!(
                "plan {:?} has a rating of {} outside {RATING_RANGE:?}",
                self.id, self.rating
            ));
        }
        if self.ai_confidence > MAX_CONFIDENCE {
            return Err(format!(
                "plan {:?} has a confidence of {}%",
                self.id, self.ai_confidence
            ));
        }
        if self.highlights.len() != HIGHLIGHT_COUNT {
            return Err(format!(
                "plan {:?} has {} highlights, expected {HIGHLIGHT_COUNT}",
                self.id,
                self.highlights.len()
            ));
        }
        match Url::parse(&self.image) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(format!(
                "plan {:?} has an invalid image URL {:?}",
                self.id, self.image
            )),
        }
    }
}

/// The validated result of an extraction: the preferences and exactly
/// [`PLAN_COUNT`] plans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub preferences: ExtractedPreferences,
    pub plans: Vec<TravelPlan>,
}

impl Extraction {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.plans.len() != PLAN_COUNT {
            return Err(format!(
                "got {} plans, expected {PLAN_COUNT}",
                self.plans.len()
            ));
        }
        self.plans.iter().try_for_each(TravelPlan::validate)
    }
}
