use std::time::Instant;

use crate::resolve::{ResolveContext, resolve_actions};
use crate::types::{NavigationReport, RuleOutcome, RuleTrace};
use crate::{Answers, Navigation, NavigationTarget, Position, Rule, SkipSet, Survey};

/// The block immediately after `current` in `block_order`.
///
/// `None` (end of survey) when `current` is last or not in the order.
/// Purely positional: rules and skips are not consulted.
#[must_use]
pub fn next_block<'a>(current: &str, block_order: &'a [String]) -> Option<&'a str> {
    let idx = block_order.iter().position(|b| b == current)?;
    block_order.get(idx + 1).map(String::as_str)
}

/// Everything one navigation decision reads.
#[derive(Debug, Clone, Copy)]
pub struct NavigationInput<'a> {
    pub rules: &'a [Rule],
    pub survey: &'a Survey,
    pub answers: &'a Answers,
    pub position: &'a Position,
    /// Skips accumulated earlier in the respondent's session.
    pub skips: &'a SkipSet,
}

/// Decide the next target from an unprepared rule collection.
///
/// Equivalent to building a [`RuleSet`](crate::RuleSet) and calling
/// [`next_target`](crate::RuleSet::next_target), without the up-front grouping.
pub fn next_target(input: &NavigationInput<'_>) -> Navigation {
    let block = input.position.block_id.as_str();
    let candidates = if input.survey.contains_block(block) {
        crate::select::select_applicable(input.rules, block)
    } else {
        Vec::new()
    };
    decide(
        input.survey,
        candidates,
        input.position,
        input.answers,
        input.skips,
        None,
    )
}

/// First-match-wins over `candidates` (already in evaluation order), then
/// linear fallback. When `traces` is given every candidate gets an entry.
pub(crate) fn decide<'r>(
    survey: &Survey,
    candidates: impl IntoIterator<Item = &'r Rule>,
    position: &Position,
    answers: &Answers,
    skips: &SkipSet,
    mut traces: Option<&mut Vec<RuleTrace>>,
) -> Navigation {
    let mut fired = None;

    for rule in candidates {
        if fired.is_some() {
            match traces.as_deref_mut() {
                Some(traces) => traces.push(RuleTrace {
                    rule_id: rule.id.clone(),
                    priority: rule.priority,
                    outcome: RuleOutcome::NotEvaluated,
                    conditions: Vec::new(),
                    actions: Vec::new(),
                }),
                None => break,
            }
            continue;
        }

        let matched = match traces.as_deref_mut() {
            Some(traces) => {
                let (matched, conditions) =
                    crate::evaluate::matches_traced(&rule.conditions, answers);
                traces.push(RuleTrace {
                    rule_id: rule.id.clone(),
                    priority: rule.priority,
                    outcome: if matched {
                        RuleOutcome::Matched
                    } else {
                        RuleOutcome::NotMatched
                    },
                    conditions,
                    actions: if matched {
                        rule.actions.clone()
                    } else {
                        Vec::new()
                    },
                });
                matched
            }
            None => rule.matches(answers),
        };

        if matched {
            tracing::debug!(rule = %rule.id, block = %rule.block_id, "rule fired");
            fired = Some(rule);
        }
    }

    let Some(rule) = fired else {
        return Navigation::linear(linear_target(survey, position, skips));
    };

    let ctx = ResolveContext {
        survey,
        rule_id: &rule.id,
        block_id: &rule.block_id,
    };
    let resolution = resolve_actions(&rule.actions, &ctx);
    let target = match resolution.target {
        Some(target) if !reenters(&target, position) => target,
        direct => {
            if let Some(target) = direct {
                tracing::debug!(
                    rule = %rule.id,
                    next = %target,
                    "target re-enters the position being left, falling back"
                );
            }
            let combined = skips.union(&resolution.skips);
            linear_target(survey, position, &combined)
        }
    };

    Navigation::new(
        target,
        Some(rule.id.clone()),
        resolution.messages,
        resolution.skips,
        resolution.invalid_target,
    )
}

/// Same as [`decide`], timed and with a trace entry per candidate.
pub(crate) fn decide_detailed<'r>(
    survey: &Survey,
    candidates: impl IntoIterator<Item = &'r Rule>,
    position: &Position,
    answers: &Answers,
    skips: &SkipSet,
) -> NavigationReport {
    let start = Instant::now();
    let mut traces = Vec::new();
    let navigation = decide(survey, candidates, position, answers, skips, Some(&mut traces));
    NavigationReport::new(navigation, traces, start.elapsed())
}

/// Whether `target` sends the respondent back to the position being left:
/// the same question, or the same block when the whole block was submitted.
fn reenters(target: &NavigationTarget, position: &Position) -> bool {
    match (target, position.question_id.as_deref()) {
        (NavigationTarget::Question { block_id, question_id }, Some(current)) => {
            *block_id == position.block_id && question_id == current
        }
        (
            NavigationTarget::Question { block_id, .. } | NavigationTarget::Block { block_id },
            None,
        ) => *block_id == position.block_id,
        _ => false,
    }
}

/// Linear progression: the next unskipped question of the current block,
/// otherwise the next block that is not skipped and still has something to
/// answer, otherwise the end.
pub(crate) fn linear_target(
    survey: &Survey,
    position: &Position,
    skips: &SkipSet,
) -> NavigationTarget {
    let block = position.block_id.as_str();

    if let Some(current) = position.question_id.as_deref() {
        let questions = survey.questions(block);
        let next = questions
            .iter()
            .position(|q| q == current)
            .and_then(|idx| {
                questions[idx + 1..]
                    .iter()
                    .find(|q| !skips.skips_question(q))
            });
        if let Some(question) = next {
            return NavigationTarget::question(block, question.as_str());
        }
    }

    let order = survey.block_order();
    let Some(idx) = order.iter().position(|b| b == block) else {
        tracing::debug!(block, "current block not in survey, ending");
        return NavigationTarget::End;
    };
    order[idx + 1..]
        .iter()
        .find(|b| !skips.skips_block(b) && !all_questions_skipped(survey, b, skips))
        .map_or(NavigationTarget::End, |b| NavigationTarget::block(b.as_str()))
}

/// A block with questions, every one of them skipped. Blocks without any
/// questions are not considered exhausted.
fn all_questions_skipped(survey: &Survey, block_id: &str, skips: &SkipSet) -> bool {
    let questions = survey.questions(block_id);
    !questions.is_empty() && questions.iter().all(|q| skips.skips_question(q))
}
