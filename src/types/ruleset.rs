use std::collections::HashMap;
use std::fmt;

use super::condition::Condition;
use super::error::RuleIssue;
use super::report::NavigationReport;
use super::rule::Rule;
use super::survey::{Block, Survey};
use super::target::{Navigation, Position, SkipSet};
use super::{Action, Answers};

/// Builder for constructing a [`RuleSet`].
///
/// Rules are defined via closures and bound to a [`Survey`] layout into an
/// immutable, thread-safe structure.
///
/// # Example
///
/// ```
/// use waypoint::{Action, Block, RuleSetBuilder, Survey, question};
///
/// let survey = Survey::new(vec![
///     Block::new("intro", 0, ["has_pets"]),
///     Block::new("pets", 1, ["pet_kind"]),
///     Block::new("outro", 2, ["feedback"]),
/// ]);
///
/// let ruleset = RuleSetBuilder::new()
///     .rule("no_pets", "intro", |r| {
///         r.when(question("has_pets").equals("no"))
///             .then(Action::goto_block("outro"))
///     })
///     .build(survey);
/// assert_eq!(ruleset.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug)]
pub struct RuleBuilder {
    rule: Rule,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule scoped to `block_id`. The closure adds conditions with
    /// `.when()` / `.or_when()` and actions with `.then()`.
    #[must_use]
    pub fn rule(
        mut self,
        id: &str,
        block_id: &str,
        f: impl FnOnce(RuleBuilder) -> RuleBuilder,
    ) -> Self {
        let builder = f(RuleBuilder {
            rule: Rule::new(id, block_id),
        });
        self.rules.push(builder.rule);
        self
    }

    /// Add an already constructed rule, e.g. one decoded from storage.
    #[must_use]
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Bind the rules to a survey layout.
    ///
    /// Rules scoped to blocks the survey does not contain are set aside as
    /// orphaned and never evaluated.
    pub fn build(self, survey: Survey) -> RuleSet {
        RuleSet::new(survey, self.rules)
    }
}

impl RuleBuilder {
    /// Add a condition combined with AND.
    #[must_use]
    pub fn when(mut self, mut condition: Condition) -> Self {
        condition.condition_logic = super::Logic::And;
        self.rule.conditions.push(condition);
        self
    }

    /// Add a condition combined with OR.
    #[must_use]
    pub fn or_when(mut self, condition: Condition) -> Self {
        self.rule.conditions.push(condition.or());
        self
    }

    /// Append an action.
    #[must_use]
    pub fn then(mut self, action: Action) -> Self {
        self.rule.actions.push(action);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.rule.priority = priority;
        self
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.rule.name = Some(name.to_owned());
        self
    }

    #[must_use]
    pub fn survey(mut self, survey_id: &str) -> Self {
        self.rule.survey_id = survey_id.to_owned();
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.rule.enabled = false;
        self
    }
}

/// Rules bound to a survey layout. Immutable and designed to live behind
/// `Arc`; every navigation call is independent.
#[derive(Debug, Clone)]
pub struct RuleSet {
    survey: Survey,
    rules: Vec<Rule>,
    /// Indices into `rules` per block: enabled only, in evaluation order.
    by_block: HashMap<String, Vec<usize>>,
    orphaned: Vec<usize>,
}

impl RuleSet {
    /// Group `rules` by block in evaluation order. Disabled rules are kept
    /// for inspection but never evaluated; orphaned rules are logged.
    pub fn new(survey: Survey, rules: Vec<Rule>) -> Self {
        let mut by_block: HashMap<String, Vec<usize>> = HashMap::new();
        let mut orphaned = Vec::new();

        for (index, rule) in rules.iter().enumerate() {
            if !survey.contains_block(&rule.block_id) {
                tracing::warn!(
                    rule = %rule.id,
                    block = %rule.block_id,
                    "rule scoped to unknown block, excluded from evaluation"
                );
                orphaned.push(index);
                continue;
            }
            if rule.enabled {
                by_block.entry(rule.block_id.clone()).or_default().push(index);
            }
        }

        for indices in by_block.values_mut() {
            indices.sort_by_key(|&i| (rules[i].priority, i));
        }

        Self {
            survey,
            rules,
            by_block,
            orphaned,
        }
    }

    /// Decide where to go after `position`.
    ///
    /// The enabled rules of the current block are tried in priority order and
    /// the first whose conditions hold decides; otherwise progression is
    /// linear, passing over anything in `skips`. Never fails: dangling targets
    /// end the survey and are reported on the returned [`Navigation`].
    pub fn next_target(
        &self,
        position: &Position,
        answers: &Answers,
        skips: &SkipSet,
    ) -> Navigation {
        crate::navigate::decide(
            &self.survey,
            self.candidates(&position.block_id),
            position,
            answers,
            skips,
            None,
        )
    }

    /// Same decision as [`next_target()`](Self::next_target), with a trace of
    /// every candidate rule and condition.
    pub fn next_target_detailed(
        &self,
        position: &Position,
        answers: &Answers,
        skips: &SkipSet,
    ) -> NavigationReport {
        crate::navigate::decide_detailed(
            &self.survey,
            self.candidates(&position.block_id),
            position,
            answers,
            skips,
        )
    }

    /// The rules that would be evaluated in `block_id`, in evaluation order.
    pub fn candidates<'a>(&'a self, block_id: &str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.by_block
            .get(block_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.rules[i])
    }

    /// Authoring diagnostics for this rule set. See [`validate_rules`](crate::validate_rules).
    #[must_use]
    pub fn lint(&self) -> Vec<RuleIssue> {
        crate::validate::validate_rules(&self.survey, &self.rules)
    }

    #[must_use]
    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// Every rule as given, including disabled and orphaned ones.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules scoped to blocks missing from the survey.
    pub fn orphaned(&self) -> impl Iterator<Item = &Rule> {
        self.orphaned.iter().map(|&i| &self.rules[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Decode a survey document (`{"blocks": [...], "rules": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::Json`](crate::WaypointError::Json) if the
    /// document is not valid JSON or does not have the expected shape.
    #[cfg(feature = "serde")]
    pub fn from_json(input: &str) -> Result<Self, crate::WaypointError> {
        let doc: SurveyDocument = serde_json::from_str(input)?;
        Ok(doc.into_ruleset())
    }

    /// Read a survey document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError`](crate::WaypointError) on I/O or decode failure.
    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::WaypointError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// Encode the layout and rules back into a survey document.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::Json`](crate::WaypointError::Json) if encoding fails.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, crate::WaypointError> {
        let doc = SurveyDocument {
            blocks: self.survey.blocks().to_vec(),
            rules: self.rules.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

/// The persisted shape of a survey's blocks and branching rules.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurveyDocument {
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks: Vec<Block>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<Rule>,
}

impl SurveyDocument {
    pub fn into_ruleset(self) -> RuleSet {
        RuleSet::new(Survey::new(self.blocks), self.rules)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleSet({} rules, {} blocks, {} orphaned)",
            self.rules.len(),
            self.survey.len(),
            self.orphaned.len(),
        )
    }
}
