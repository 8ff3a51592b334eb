use serde::{Deserialize, Serialize};

/// Student preferences gathered from a call or the dashboard form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(rename = "budgetMin")]
    pub budget_min: u32,
    #[serde(rename = "budgetMax")]
    pub budget_max: u32,
    #[serde(rename = "preferredAreas", default)]
    pub preferred_areas: Vec<String>,
    #[serde(rename = "moveInDate", default)]
    pub move_in_date: String,
    #[serde(rename = "vibeKeywords", default)]
    pub vibe_keywords: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl StudentProfile {
    /// Name used in greetings, falling back to "there"
    pub fn display_name(&self) -> &str {
        let trimmed = self.first_name.trim();
        if trimmed.is_empty() {
            "there"
        } else {
            trimmed
        }
    }

    /// Midpoint of the budget range
    pub fn budget_mid(&self) -> f64 {
        (self.budget_min as f64 + self.budget_max as f64) / 2.0
    }

    pub fn within_budget(&self, weekly_rent: u32) -> bool {
        self.budget_min <= weekly_rent && weekly_rent <= self.budget_max
    }
}

/// Catalog listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub code: String,
    pub title: String,
    pub area: String,
    #[serde(rename = "weeklyRent")]
    pub weekly_rent: u32,
    #[serde(rename = "distanceToCampus")]
    pub distance_to_campus: String,
    #[serde(rename = "roomType")]
    pub room_type: String,
    #[serde(rename = "vibeTags", default)]
    pub vibe_tags: Vec<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Property paired with the score it was ranked by
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProperty {
    #[serde(flatten)]
    pub property: Property,
    pub score: f64,
}

impl AsRef<Property> for Property {
    fn as_ref(&self) -> &Property {
        self
    }
}

impl AsRef<Property> for ScoredProperty {
    fn as_ref(&self) -> &Property {
        &self.property
    }
}

/// How preferred areas are compared against a property's area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaMatching {
    /// Exact match scores full marks, substring either way scores partial
    #[default]
    Graded,
    /// Property area containing any preferred area scores full marks
    Substring,
}

/// Ordering applied to equally scored properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    CheaperFirst,
    Stable,
}

/// Scoring constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub budget_bonus: f64,
    pub budget_penalty_divisor: f64,
    pub area_exact: f64,
    pub area_partial: f64,
    pub vibe_match: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            budget_bonus: 4.0,
            budget_penalty_divisor: 50.0,
            area_exact: 3.0,
            area_partial: 1.5,
            vibe_match: 1.5,
        }
    }
}

/// Voice of the generated reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    #[serde(alias = "friendly")]
    Friendly,
    #[serde(alias = "professional")]
    Professional,
    #[serde(alias = "hype")]
    Hype,
    #[serde(alias = "concise")]
    Concise,
}

/// Channel the reply is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    #[serde(alias = "email")]
    Email,
    #[serde(alias = "whatsapp")]
    WhatsApp,
}

/// Result returned by the speech-to-text provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub language_code: String,
    pub language_probability: f64,
}

/// Key facts pulled out of a call transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    pub budget: String,
    pub location: String,
    pub move_in_date: String,
    pub key_concerns: Vec<String>,
}

impl ExtractedInfo {
    /// Weekly amount from a budget such as "£160/week"
    pub fn weekly_budget(&self) -> Option<u32> {
        let digits: String = self
            .budget
            .trim_start_matches('£')
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }

    /// Place name from a location such as "Fallowfield area"
    pub fn area(&self) -> Option<String> {
        self.location
            .strip_suffix(" area")
            .map(|area| area.trim().to_lowercase())
            .filter(|area| !area.is_empty())
    }

    /// Profile for ranking the catalog after a call
    ///
    /// A budget that could not be read leaves the range open.
    pub fn to_profile(&self) -> StudentProfile {
        let (budget_min, budget_max) = match self.weekly_budget() {
            Some(amount) => (amount, amount),
            None => (0, u32::MAX),
        };

        StudentProfile {
            budget_min,
            budget_max,
            preferred_areas: self.area().into_iter().collect(),
            ..Default::default()
        }
    }
}

/// Subject and body of a drafted email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Email and voice note sent after a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFollowup {
    pub email: EmailDraft,
    pub voice_note_text: String,
}

/// Compliance checks for a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskChecks {
    pub deposit_mentioned: bool,
    pub bills_clarified: bool,
    pub over_promises: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub risk_level: String,
    pub checks: RiskChecks,
    pub flags: Vec<String>,
    pub notes: String,
}

impl RiskAnalysis {
    /// The analysis reported for every sample call
    pub fn baseline() -> Self {
        Self {
            risk_level: "Low".to_string(),
            checks: RiskChecks {
                deposit_mentioned: true,
                bills_clarified: true,
                over_promises: false,
            },
            flags: vec![],
            notes: "All key policies were properly explained. No compliance issues detected."
                .to_string(),
        }
    }
}
