use std::fmt;
use std::time::Duration;

use super::condition::{Logic, Operator};
use super::{Action, Answer, Navigation};

/// How one condition evaluated: expected vs. actual value and the result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConditionTrace {
    pub question_id: String,
    pub operator: Operator,
    pub logic: Logic,
    pub expected: Answer,
    pub actual: Option<Answer>,
    pub result: bool,
}

/// What happened to a candidate rule during one navigation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RuleOutcome {
    /// Conditions held; this rule decided the navigation.
    Matched,
    /// Conditions did not hold.
    NotMatched,
    /// An earlier rule already fired.
    NotEvaluated,
}

/// Trace entry for one candidate rule, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RuleTrace {
    pub rule_id: String,
    pub priority: i64,
    pub outcome: RuleOutcome,
    /// Empty when the rule was not evaluated.
    pub conditions: Vec<ConditionTrace>,
    /// The rule's actions, present only for the rule that fired.
    pub actions: Vec<Action>,
}

/// Detailed navigation report returned by
/// [`RuleSet::next_target_detailed()`](super::RuleSet::next_target_detailed).
///
/// Built without side effects, so simulation tooling can show which rule
/// fired and why.
#[derive(Debug, Clone)]
#[must_use]
pub struct NavigationReport {
    navigation: Navigation,
    rules: Vec<RuleTrace>,
    duration: Duration,
}

impl NavigationReport {
    pub(crate) fn new(navigation: Navigation, rules: Vec<RuleTrace>, duration: Duration) -> Self {
        Self {
            navigation,
            rules,
            duration,
        }
    }

    /// The decision, same as [`RuleSet::next_target()`](super::RuleSet::next_target).
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Candidate rules of the current block in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleTrace] {
        &self.rules
    }

    /// The trace of the rule that fired, if any.
    #[must_use]
    pub fn fired(&self) -> Option<&RuleTrace> {
        self.rules
            .iter()
            .find(|r| r.outcome == RuleOutcome::Matched)
    }

    /// Wall-clock duration of the decision.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for NavigationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target: {}", self.navigation.target())?;
        match self.navigation.fired_rule() {
            Some(rule) => write!(f, ", fired: {rule}")?,
            None => write!(f, ", fired: none")?,
        }
        let checked: Vec<&str> = self
            .rules
            .iter()
            .filter(|r| r.outcome != RuleOutcome::NotEvaluated)
            .map(|r| r.rule_id.as_str())
            .collect();
        write!(f, ", checked: [{}]", checked.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
