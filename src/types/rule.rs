use super::{Action, Answers, Condition};

/// Priority assigned to rules that carry none (or an unusable one).
pub const DEFAULT_PRIORITY: i64 = 1;

/// A conditional branch scoped to one block: if the conditions hold, the
/// actions decide where the respondent goes next.
///
/// Rules are created via [`RuleSetBuilder`](super::RuleSetBuilder) or decoded
/// from the persisted JSON form. Lower `priority` values are evaluated first
/// among the rules of a block; equal priorities keep insertion order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Rule {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub survey_id: String,
    pub block_id: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default = "enabled_default"))]
    pub enabled: bool,
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "priority_default",
            deserialize_with = "lenient_priority"
        )
    )]
    pub priority: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: Vec<Action>,
}

impl Rule {
    /// Create an enabled rule with default priority and no conditions or actions.
    pub fn new(id: impl Into<String>, block_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            survey_id: String::new(),
            block_id: block_id.into(),
            name: None,
            enabled: true,
            priority: DEFAULT_PRIORITY,
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Whether the rule's conditions hold for the given answers.
    ///
    /// Conditions fold strictly left to right: `A AND B OR C` is
    /// `(A AND B) OR C`. A rule without conditions never matches.
    #[must_use]
    pub fn matches(&self, answers: &Answers) -> bool {
        crate::evaluate::matches(&self.conditions, answers)
    }

    /// Human label, falling back to the id.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(feature = "serde")]
fn enabled_default() -> bool {
    true
}

#[cfg(feature = "serde")]
fn priority_default() -> i64 {
    DEFAULT_PRIORITY
}

/// Accepts integers, whole floats and numeric strings; anything else
/// (null, fractions, garbage) becomes [`DEFAULT_PRIORITY`].
#[cfg(feature = "serde")]
fn lenient_priority<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPriority {
        Int(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    #[allow(clippy::cast_possible_truncation)]
    let priority = match RawPriority::deserialize(deserializer)? {
        RawPriority::Int(v) => Some(v),
        RawPriority::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
        RawPriority::Text(s) => s.trim().parse::<i64>().ok(),
        RawPriority::Float(_) | RawPriority::Other(_) => None,
    };
    Ok(priority.unwrap_or(DEFAULT_PRIORITY))
}
