use std::collections::BTreeSet;
use std::fmt;

use super::error::InvalidTargetError;

/// The resolved "next thing to show".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")
)]
pub enum NavigationTarget {
    /// A specific question.
    Question {
        block_id: String,
        question_id: String,
    },
    /// The start of a block.
    Block { block_id: String },
    /// The survey is over.
    End,
}

impl NavigationTarget {
    pub fn question(block_id: impl Into<String>, question_id: impl Into<String>) -> Self {
        NavigationTarget::Question {
            block_id: block_id.into(),
            question_id: question_id.into(),
        }
    }

    pub fn block(block_id: impl Into<String>) -> Self {
        NavigationTarget::Block {
            block_id: block_id.into(),
        }
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, NavigationTarget::End)
    }

    /// The block the target lands in, if any.
    #[must_use]
    pub fn block_id(&self) -> Option<&str> {
        match self {
            NavigationTarget::Question { block_id, .. } | NavigationTarget::Block { block_id } => {
                Some(block_id)
            }
            NavigationTarget::End => None,
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Question {
                block_id,
                question_id,
            } => write!(f, "question {block_id}/{question_id}"),
            NavigationTarget::Block { block_id } => write!(f, "block {block_id}"),
            NavigationTarget::End => write!(f, "end"),
        }
    }
}

/// Where the respondent currently is.
///
/// A position without a question means the whole block has been submitted
/// (page-per-block surveys); linear fallback then moves to the next block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Position {
    pub block_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub question_id: Option<String>,
}

impl Position {
    pub fn block(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            question_id: None,
        }
    }

    pub fn question(block_id: impl Into<String>, question_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            question_id: Some(question_id.into()),
        }
    }
}

/// Blocks and questions to pass over during linear traversal.
///
/// Owned by the caller's session: the resolver reads it and reports the skips
/// a fired rule adds, but never stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkipSet {
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub questions: BTreeSet<String>,
}

impl SkipSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.questions.is_empty()
    }

    #[must_use]
    pub fn skips_block(&self, block_id: &str) -> bool {
        self.blocks.contains(block_id)
    }

    #[must_use]
    pub fn skips_question(&self, question_id: &str) -> bool {
        self.questions.contains(question_id)
    }

    /// Add every skip from `other`.
    pub fn merge(&mut self, other: &SkipSet) {
        self.blocks.extend(other.blocks.iter().cloned());
        self.questions.extend(other.questions.iter().cloned());
    }

    #[must_use]
    pub fn union(&self, other: &SkipSet) -> SkipSet {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }
}

/// The outcome of one navigation decision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[must_use]
pub struct Navigation {
    target: NavigationTarget,
    fired_rule: Option<String>,
    messages: Vec<String>,
    skips: SkipSet,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_invalid_target"))]
    invalid_target: Option<InvalidTargetError>,
}

impl Navigation {
    pub(crate) fn new(
        target: NavigationTarget,
        fired_rule: Option<String>,
        messages: Vec<String>,
        skips: SkipSet,
        invalid_target: Option<InvalidTargetError>,
    ) -> Self {
        Self {
            target,
            fired_rule,
            messages,
            skips,
            invalid_target,
        }
    }

    /// Plain linear navigation with no rule involved.
    pub fn linear(target: NavigationTarget) -> Self {
        Self::new(target, None, Vec::new(), SkipSet::new(), None)
    }

    pub fn target(&self) -> &NavigationTarget {
        &self.target
    }

    pub fn into_target(self) -> NavigationTarget {
        self.target
    }

    /// Id of the rule that fired, if any.
    #[must_use]
    pub fn fired_rule(&self) -> Option<&str> {
        self.fired_rule.as_deref()
    }

    /// Messages from `show_message` actions of the fired rule, in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Skips contributed by the fired rule. Callers that keep skips for the
    /// rest of the session merge these into their [`SkipSet`].
    pub fn skips(&self) -> &SkipSet {
        &self.skips
    }

    /// Set when the fired rule pointed at a block or question that does not
    /// exist; the target is then [`NavigationTarget::End`].
    #[must_use]
    pub fn invalid_target(&self) -> Option<&InvalidTargetError> {
        self.invalid_target.as_ref()
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)?;
        if let Some(rule) = &self.fired_rule {
            write!(f, " (rule {rule})")?;
        }
        if let Some(err) = &self.invalid_target {
            write!(f, " [{err}]")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
fn serialize_invalid_target<S>(
    err: &Option<InvalidTargetError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match err {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}
