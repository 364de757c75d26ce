use std::fmt;

use super::{Answer, Answers};

/// Comparison operators available to rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operator {
    /// Loose string equality.
    Equals,
    /// Negation of [`Operator::Equals`].
    NotEquals,
    /// Numeric `>`; only meaningful for numeric questions.
    GreaterThan,
    /// Numeric `<`; only meaningful for numeric questions.
    LessThan,
}

impl Operator {
    /// Whether the operator compares numerically.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::LessThan)
    }
}

/// How a condition combines with the accumulated result of the conditions
/// before it. Ignored on the first condition of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Logic {
    #[default]
    And,
    Or,
}

/// A single comparison between a question's answer and an expected value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Condition {
    pub question_id: String,
    pub operator: Operator,
    pub value: Answer,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition_logic: Logic,
}

impl Condition {
    pub fn new(
        question_id: impl Into<String>,
        operator: Operator,
        value: impl Into<Answer>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            operator,
            value: value.into(),
            condition_logic: Logic::And,
        }
    }

    /// Return this condition chained with `OR` onto the conditions before it.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.condition_logic = Logic::Or;
        self
    }

    /// Evaluate against the answer map. A missing answer never matches.
    #[must_use]
    pub fn evaluate(&self, answers: &Answers) -> bool {
        crate::evaluate::eval_condition(self, answers.get(&self.question_id))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equals => write!(f, "equals"),
            Operator::NotEquals => write!(f, "not_equals"),
            Operator::GreaterThan => write!(f, "greater_than"),
            Operator::LessThan => write!(f, "less_than"),
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::And => write!(f, "AND"),
            Logic::Or => write!(f, "OR"),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.question_id, self.operator, self.value)
    }
}

/// Intermediate builder for conditions on one question.
/// Created by [`question()`]; requires an operator method to produce a [`Condition`].
#[derive(Debug, Clone)]
pub struct QuestionRef {
    id: String,
}

impl QuestionRef {
    #[must_use]
    pub fn equals(self, value: impl Into<Answer>) -> Condition {
        Condition::new(self.id, Operator::Equals, value)
    }

    #[must_use]
    pub fn not_equals(self, value: impl Into<Answer>) -> Condition {
        Condition::new(self.id, Operator::NotEquals, value)
    }

    #[must_use]
    pub fn greater_than(self, value: impl Into<Answer>) -> Condition {
        Condition::new(self.id, Operator::GreaterThan, value)
    }

    #[must_use]
    pub fn less_than(self, value: impl Into<Answer>) -> Condition {
        Condition::new(self.id, Operator::LessThan, value)
    }
}

/// Start a condition on the answer to `id`.
#[must_use]
pub fn question(id: &str) -> QuestionRef {
    QuestionRef { id: id.to_owned() }
}
