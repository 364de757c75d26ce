mod action;
mod answer;
mod answers;
mod condition;
mod error;
mod report;
mod rule;
mod ruleset;
mod survey;
mod target;

pub use action::Action;
pub use answer::Answer;
pub use answers::Answers;
pub use condition::{Condition, Logic, Operator, QuestionRef, question};
pub use error::{InvalidTargetError, RuleIssue};
pub use report::{ConditionTrace, NavigationReport, RuleOutcome, RuleTrace};
pub use rule::{DEFAULT_PRIORITY, Rule};
pub use ruleset::{RuleBuilder, RuleSet, RuleSetBuilder, SurveyDocument};
pub use survey::{Block, Survey};
pub use target::{Navigation, NavigationTarget, Position, SkipSet};
