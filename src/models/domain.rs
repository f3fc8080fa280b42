use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use validator::Validate;

/// Candidate record as supplied by the directory/search layer
///
/// The engine treats this as read-only input. The viewer is described by the
/// same shape.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateProfile {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(rename = "primarySign", default, deserialize_with = "lenient")]
    pub primary_sign: Option<ZodiacSign>,
    #[serde(default)]
    pub questionnaire: Questionnaire,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(rename = "cityName", default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub tier: SubscriptionTier,
}

impl CandidateProfile {
    /// Profile with only an id, every signal absent
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            primary_sign: None,
            questionnaire: Questionnaire::default(),
            location: None,
            city_name: None,
            tier: SubscriptionTier::Base,
        }
    }
}

/// Lifestyle questionnaire, every answer optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    #[serde(default, deserialize_with = "lenient")]
    pub objective: Option<Objective>,
    #[serde(rename = "weekendStyle", default, deserialize_with = "lenient")]
    pub weekend_style: Option<WeekendStyle>,
    #[serde(rename = "lifestyleRhythm", default, deserialize_with = "lenient")]
    pub lifestyle_rhythm: Option<LifestyleRhythm>,
    #[serde(rename = "coreValue", default, deserialize_with = "lenient")]
    pub core_value: Option<CoreValue>,
}

/// Geographic coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

/// Unknown strings and non-string values resolve to "absent"
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(value) => value.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];
}

/// Error returned when a categorical string names no known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ZodiacSign {
    type Err = UnknownCategory;

    // Accepts English names and the French names used by the mobile app
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sign = match s.to_lowercase().as_str() {
            "aries" | "bélier" | "belier" => ZodiacSign::Aries,
            "taurus" | "taureau" => ZodiacSign::Taurus,
            "gemini" | "gémeaux" | "gemeaux" => ZodiacSign::Gemini,
            "cancer" => ZodiacSign::Cancer,
            "leo" | "lion" => ZodiacSign::Leo,
            "virgo" | "vierge" => ZodiacSign::Virgo,
            "libra" | "balance" => ZodiacSign::Libra,
            "scorpio" | "scorpion" => ZodiacSign::Scorpio,
            "sagittarius" | "sagittaire" => ZodiacSign::Sagittarius,
            "capricorn" | "capricorne" => ZodiacSign::Capricorn,
            "aquarius" | "verseau" => ZodiacSign::Aquarius,
            "pisces" | "poissons" => ZodiacSign::Pisces,
            _ => return Err(UnknownCategory(s.to_string())),
        };
        Ok(sign)
    }
}

/// What the person is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Love,
    Serious,
    Adventure,
    Unsure,
}

impl FromStr for Objective {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "love" | "amour" => Ok(Objective::Love),
            "serious" | "serieux" | "sérieux" => Ok(Objective::Serious),
            "adventure" | "aventure" => Ok(Objective::Adventure),
            "unsure" | "sais_pas" => Ok(Objective::Unsure),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// How a free weekend is usually spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekendStyle {
    PartyGoer,
    Homebody,
    Adventurer,
    Cultural,
}

impl FromStr for WeekendStyle {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "party_goer" | "fetard" | "fêtard" => Ok(WeekendStyle::PartyGoer),
            "homebody" | "casanier" => Ok(WeekendStyle::Homebody),
            "adventurer" | "aventurier" => Ok(WeekendStyle::Adventurer),
            "cultural" | "culturel" => Ok(WeekendStyle::Cultural),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Day-to-day rhythm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleRhythm {
    Nightlife,
    Balanced,
    Homebody,
    Flexible,
}

impl FromStr for LifestyleRhythm {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nightlife" | "fetard" | "fêtard" => Ok(LifestyleRhythm::Nightlife),
            "balanced" | "equilibre" | "équilibré" => Ok(LifestyleRhythm::Balanced),
            "homebody" | "casanier" => Ok(LifestyleRhythm::Homebody),
            "flexible" => Ok(LifestyleRhythm::Flexible),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Value the person cares about most in a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreValue {
    Loyal,
    Independent,
    Humor,
    Ambitious,
}

impl FromStr for CoreValue {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loyal" => Ok(CoreValue::Loyal),
            "independent" | "independant" | "indépendant" => Ok(CoreValue::Independent),
            "humor" | "humour" => Ok(CoreValue::Humor),
            "ambitious" | "ambitieux" => Ok(CoreValue::Ambitious),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Subscription level, closed set
///
/// Any value outside the known aliases deserializes to `Base`, the most
/// restrictive tier. That includes `null`, numbers and other non-strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Value")]
pub enum SubscriptionTier {
    #[default]
    Base,
    Plus,
    Top,
}

impl SubscriptionTier {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "plus" | "premium" => SubscriptionTier::Plus,
            "top" | "elite" | "premium_plus" | "premium_elite" => SubscriptionTier::Top,
            _ => SubscriptionTier::Base,
        }
    }
}

impl From<Value> for SubscriptionTier {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::parse(&name),
            _ => SubscriptionTier::Base,
        }
    }
}

/// Scoring weights, summing to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub sign: f64,
    pub objective: f64,
    pub core_value: f64,
    pub lifestyle_rhythm: f64,
    pub weekend_style: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            sign: 0.25,
            objective: 0.35,
            core_value: 0.20,
            lifestyle_rhythm: 0.10,
            weekend_style: 0.10,
        }
    }
}

/// Per-dimension view of one pairwise score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub sign: u8,
    pub objective: u8,
    pub core_value: u8,
    pub lifestyle_rhythm: u8,
    pub weekend_style: u8,
    pub same_city_bonus: u8,
    pub proximity_bonus: u8,
    pub distance_km: Option<f64>,
    pub total: u8,
}

/// Candidate with its score against the current viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub profile: CandidateProfile,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Render fidelity of a candidate at a given rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fidelity {
    Full,
    Locked,
}

/// 2D point in the shared layout space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Position assigned to one candidate by a layout pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord {
    pub candidate_id: String,
    pub angle_radians: f64,
    pub radial_distance: f64,
    pub x: f64,
    pub y: f64,
    pub score: u8,
    pub fidelity: Fidelity,
    /// Set when the attempt budget ran out; separation may not hold for this entry
    pub fallback: bool,
}

impl PlacementRecord {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Live pan/zoom state of one view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerTransform {
    pub zoom_scale: f64,
    pub pan_offset: Point,
}

impl Default for ViewerTransform {
    fn default() -> Self {
        Self {
            zoom_scale: 1.0,
            pan_offset: Point::default(),
        }
    }
}

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ViewportRect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[validate(range(min = 1.0))]
    pub width: f64,
    #[validate(range(min = 1.0))]
    pub height: f64,
}

impl ViewportRect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smaller of the two half extents
    pub fn half_extent(&self) -> f64 {
        (self.width / 2.0).min(self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_parses_french_names() {
        assert_eq!("Bélier".parse::<ZodiacSign>().unwrap(), ZodiacSign::Aries);
        assert_eq!("GÉMEAUX".parse::<ZodiacSign>().unwrap(), ZodiacSign::Gemini);
        assert_eq!("pisces".parse::<ZodiacSign>().unwrap(), ZodiacSign::Pisces);
        assert!("ophiuchus".parse::<ZodiacSign>().is_err());
    }

    #[test]
    fn test_unknown_tier_is_base() {
        assert_eq!(SubscriptionTier::parse("premium"), SubscriptionTier::Plus);
        assert_eq!(SubscriptionTier::parse("elite"), SubscriptionTier::Top);
        assert_eq!(SubscriptionTier::parse("platinum"), SubscriptionTier::Base);

        let tier: SubscriptionTier = serde_json::from_str("\"diamond\"").unwrap();
        assert_eq!(tier, SubscriptionTier::Base);
    }

    #[test]
    fn test_non_string_tier_is_base() {
        for raw in ["null", "2", "true", "{\"name\":\"top\"}"] {
            let tier: SubscriptionTier = serde_json::from_str(raw).unwrap();
            assert_eq!(tier, SubscriptionTier::Base, "{}", raw);
        }

        let profile: CandidateProfile = serde_json::from_str(r#"{"id": "a", "tier": null}"#).unwrap();
        assert_eq!(profile.tier, SubscriptionTier::Base);
    }

    #[test]
    fn test_non_string_categories_are_absent() {
        let json = r#"{
            "id": "u2",
            "primarySign": 3,
            "questionnaire": { "objective": null, "coreValue": ["loyal"], "lifestyleRhythm": "flexible" }
        }"#;

        let profile: CandidateProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.primary_sign, None);
        assert_eq!(profile.questionnaire.objective, None);
        assert_eq!(profile.questionnaire.core_value, None);
        assert_eq!(profile.questionnaire.lifestyle_rhythm, Some(LifestyleRhythm::Flexible));
    }

    #[test]
    fn test_profile_deserializes_leniently() {
        let json = r#"{
            "id": "u1",
            "primarySign": "not-a-sign",
            "questionnaire": { "objective": "serieux", "weekendStyle": "bowling" },
            "cityName": "Lyon"
        }"#;

        let profile: CandidateProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.primary_sign, None);
        assert_eq!(profile.questionnaire.objective, Some(Objective::Serious));
        assert_eq!(profile.questionnaire.weekend_style, None);
        assert_eq!(profile.tier, SubscriptionTier::Base);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        let sum = w.sign + w.objective + w.core_value + w.lifestyle_rhythm + w.weekend_style;
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
