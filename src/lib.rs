//! Branching and skip-logic engine for block-structured surveys.
//!
//! Rules are scoped to a block. When the respondent leaves a question or
//! block, the enabled rules of that block are tried in priority order; the
//! first whose conditions hold decides where to go next (a question, a block
//! or the end). When none fires, progression is linear through the block
//! order. Evaluation is pure: the same inputs always give the same target.
//!
//! ```
//! use waypoint::{
//!     Action, Answers, Block, NavigationTarget, Position, RuleSetBuilder, SkipSet, Survey,
//!     question,
//! };
//!
//! let survey = Survey::new(vec![
//!     Block::new("about", 0, ["age"]),
//!     Block::new("adults", 1, ["job"]),
//!     Block::new("wrap_up", 2, ["comments"]),
//! ]);
//! let ruleset = RuleSetBuilder::new()
//!     .rule("minors_skip", "about", |r| {
//!         r.when(question("age").less_than(18_i64))
//!             .then(Action::goto_block("wrap_up"))
//!     })
//!     .build(survey);
//!
//! let nav = ruleset.next_target(
//!     &Position::question("about", "age"),
//!     &Answers::new().set("age", "15"),
//!     &SkipSet::new(),
//! );
//! assert_eq!(nav.target(), &NavigationTarget::block("wrap_up"));
//! ```

#[cfg(feature = "serde")]
mod error;
mod evaluate;
mod navigate;
mod resolve;
mod select;
mod session;
mod types;
mod validate;

#[cfg(feature = "serde")]
pub use error::WaypointError;
pub use navigate::{NavigationInput, next_block, next_target};
pub use resolve::{Resolution, ResolveContext, resolve_actions};
pub use select::select_applicable;
pub use session::Session;
pub use types::{
    Action, Answer, Answers, Block, Condition, ConditionTrace, DEFAULT_PRIORITY, InvalidTargetError,
    Logic, Navigation, NavigationReport, NavigationTarget, Operator, Position, QuestionRef, Rule,
    RuleBuilder, RuleIssue, RuleOutcome, RuleSet, RuleSetBuilder, RuleTrace, SkipSet, Survey,
    SurveyDocument, question,
};
pub use validate::validate_rules;
