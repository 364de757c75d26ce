use std::collections::HashSet;

use crate::{Action, InvalidTargetError, Rule, RuleIssue, Survey};

/// Check authored rules against a survey layout.
///
/// Reports orphaned rules, dangling `goto_*` targets, conditions on
/// questions outside the rule's block, numeric operators with non-numeric
/// expected values, rules with no conditions or no actions, and duplicate
/// ids. Disabled rules are checked too, since they may be re-enabled.
/// Rules sharing a priority are not an issue: insertion order breaks ties.
#[must_use]
pub fn validate_rules(survey: &Survey, rules: &[Rule]) -> Vec<RuleIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for rule in rules {
        if !seen.insert(rule.id.as_str()) {
            issues.push(RuleIssue::DuplicateRule {
                rule: rule.id.clone(),
            });
        }

        let orphaned = !survey.contains_block(&rule.block_id);
        if orphaned {
            issues.push(RuleIssue::OrphanedRule {
                rule: rule.id.clone(),
                block: rule.block_id.clone(),
            });
        }

        if rule.conditions.is_empty() {
            issues.push(RuleIssue::NoConditions {
                rule: rule.id.clone(),
            });
        }
        if rule.actions.is_empty() {
            issues.push(RuleIssue::NoActions {
                rule: rule.id.clone(),
            });
        }

        check_conditions(survey, rule, orphaned, &mut issues);
        check_targets(survey, rule, &mut issues);
    }

    issues
}

fn check_conditions(survey: &Survey, rule: &Rule, orphaned: bool, issues: &mut Vec<RuleIssue>) {
    for condition in &rule.conditions {
        // Foreign questions are meaningless to report for an orphaned rule.
        if !orphaned && !survey.block_has_question(&rule.block_id, &condition.question_id) {
            issues.push(RuleIssue::ForeignQuestion {
                rule: rule.id.clone(),
                block: rule.block_id.clone(),
                question: condition.question_id.clone(),
            });
        }
        if condition.operator.is_numeric() && condition.value.coerce_number().is_none() {
            issues.push(RuleIssue::NonNumericOperand {
                rule: rule.id.clone(),
                question: condition.question_id.clone(),
                operator: condition.operator.to_string(),
                value: condition.value.to_string(),
            });
        }
    }
}

fn check_targets(survey: &Survey, rule: &Rule, issues: &mut Vec<RuleIssue>) {
    let unknown_block = |block: &str| InvalidTargetError::UnknownBlock {
        rule: rule.id.clone(),
        block: block.to_owned(),
    };
    let unknown_question = |block: &str, question: &str| InvalidTargetError::UnknownQuestion {
        rule: rule.id.clone(),
        block: block.to_owned(),
        question: question.to_owned(),
    };

    for action in &rule.actions {
        let dangling = match action {
            Action::GotoBlock { block_id } if !survey.contains_block(block_id) => {
                Some(unknown_block(block_id))
            }
            Action::GotoBlockQuestion {
                target_block_id,
                target_question_id,
            } => {
                if !survey.contains_block(target_block_id) {
                    Some(unknown_block(target_block_id))
                } else {
                    match target_question_id.as_deref() {
                        Some(q)
                            if !q.is_empty() && !survey.block_has_question(target_block_id, q) =>
                        {
                            Some(unknown_question(target_block_id, q))
                        }
                        _ => None,
                    }
                }
            }
            Action::GotoQuestion { question_id }
                if !survey.block_has_question(&rule.block_id, question_id) =>
            {
                Some(unknown_question(&rule.block_id, question_id))
            }
            Action::SkipBlock { block_ids } => block_ids
                .iter()
                .find(|b| !survey.contains_block(b))
                .map(|b| unknown_block(b)),
            _ => None,
        };
        issues.extend(dangling.map(RuleIssue::DanglingTarget));
    }
}
