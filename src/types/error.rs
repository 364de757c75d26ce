use thiserror::Error;

/// A fired rule pointed at a block or question that does not exist.
///
/// Navigation recovers by ending the survey; this value lets tooling tell
/// that apart from an intentional `end` action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTargetError {
    #[error("rule '{rule}' targets unknown block '{block}'")]
    UnknownBlock { rule: String, block: String },

    #[error("rule '{rule}' targets unknown question '{question}' in block '{block}'")]
    UnknownQuestion {
        rule: String,
        block: String,
        question: String,
    },
}

impl InvalidTargetError {
    /// Id of the rule carrying the dangling reference.
    #[must_use]
    pub fn rule(&self) -> &str {
        match self {
            InvalidTargetError::UnknownBlock { rule, .. }
            | InvalidTargetError::UnknownQuestion { rule, .. } => rule,
        }
    }
}

/// A data-integrity problem in an authored rule, reported by
/// [`validate_rules`](crate::validate_rules). None of these stop navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleIssue {
    #[error("rule '{rule}' is scoped to unknown block '{block}'")]
    OrphanedRule { rule: String, block: String },

    #[error("duplicate rule id '{rule}'")]
    DuplicateRule { rule: String },

    #[error("rule '{rule}' has no conditions and will never fire")]
    NoConditions { rule: String },

    #[error("rule '{rule}' has no actions")]
    NoActions { rule: String },

    #[error("rule '{rule}' has a condition on question '{question}' outside block '{block}'")]
    ForeignQuestion {
        rule: String,
        block: String,
        question: String,
    },

    #[error("rule '{rule}' applies {operator} to question '{question}' with non-numeric {value}")]
    NonNumericOperand {
        rule: String,
        question: String,
        operator: String,
        value: String,
    },

    #[error(transparent)]
    DanglingTarget(#[from] InvalidTargetError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_block_message() {
        let err = InvalidTargetError::UnknownBlock {
            rule: "r1".into(),
            block: "B9".into(),
        };
        assert_eq!(err.to_string(), "rule 'r1' targets unknown block 'B9'");
        assert_eq!(err.rule(), "r1");
    }

    #[test]
    fn unknown_question_message() {
        let err = InvalidTargetError::UnknownQuestion {
            rule: "r2".into(),
            block: "B1".into(),
            question: "q9".into(),
        };
        assert_eq!(
            err.to_string(),
            "rule 'r2' targets unknown question 'q9' in block 'B1'"
        );
        assert_eq!(err.rule(), "r2");
    }

    #[test]
    fn orphaned_rule_message() {
        let issue = RuleIssue::OrphanedRule {
            rule: "r1".into(),
            block: "gone".into(),
        };
        assert_eq!(issue.to_string(), "rule 'r1' is scoped to unknown block 'gone'");
    }

    #[test]
    fn non_numeric_operand_message() {
        let issue = RuleIssue::NonNumericOperand {
            rule: "r1".into(),
            question: "age".into(),
            operator: "greater_than".into(),
            value: "\"old\"".into(),
        };
        assert_eq!(
            issue.to_string(),
            "rule 'r1' applies greater_than to question 'age' with non-numeric \"old\""
        );
    }

    #[test]
    fn dangling_target_is_transparent() {
        let issue = RuleIssue::from(InvalidTargetError::UnknownBlock {
            rule: "r1".into(),
            block: "B9".into(),
        });
        assert_eq!(issue.to_string(), "rule 'r1' targets unknown block 'B9'");
    }

    #[test]
    fn simple_messages() {
        assert_eq!(
            RuleIssue::DuplicateRule { rule: "r1".into() }.to_string(),
            "duplicate rule id 'r1'"
        );
        assert_eq!(
            RuleIssue::NoConditions { rule: "r1".into() }.to_string(),
            "rule 'r1' has no conditions and will never fire"
        );
        assert_eq!(
            RuleIssue::NoActions { rule: "r1".into() }.to_string(),
            "rule 'r1' has no actions"
        );
    }
}
