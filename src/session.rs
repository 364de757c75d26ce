use crate::{Answer, Answers, Navigation, NavigationTarget, Position, RuleSet, SkipSet};

/// Caller-owned state for one respondent working through a survey.
///
/// Skips triggered by fired rules persist for the rest of the session. The
/// rule set itself holds no per-respondent state, so one `RuleSet` can serve
/// any number of sessions.
#[derive(Debug, Clone)]
pub struct Session {
    answers: Answers,
    position: Option<Position>,
    skips: SkipSet,
    history: Vec<Position>,
    messages: Vec<String>,
    paged: bool,
}

impl Session {
    /// Start at the first question of the first block, one question per step.
    #[must_use]
    pub fn start(ruleset: &RuleSet) -> Self {
        Self::begin(ruleset, false)
    }

    /// Start at the first block, one whole block per step.
    #[must_use]
    pub fn start_paged(ruleset: &RuleSet) -> Self {
        Self::begin(ruleset, true)
    }

    fn begin(ruleset: &RuleSet, paged: bool) -> Self {
        let mut session = Self {
            answers: Answers::new(),
            position: None,
            skips: SkipSet::new(),
            history: Vec::new(),
            messages: Vec::new(),
            paged,
        };
        if let Some(first) = ruleset.survey().block_order().first() {
            session.position = Some(session.entry_position(ruleset, first));
        }
        session
    }

    /// Record an answer to the current (or any) question.
    pub fn answer(&mut self, question_id: &str, answer: impl Into<Answer>) {
        self.answers.insert(question_id, answer.into());
    }

    /// Compute the next target from the current position and move there.
    ///
    /// Returns `None` once the survey has ended.
    pub fn advance(&mut self, ruleset: &RuleSet) -> Option<Navigation> {
        let current = self.position.take()?;
        let navigation = ruleset.next_target(&current, &self.answers, &self.skips);
        self.skips.merge(navigation.skips());
        self.messages.extend(navigation.messages().iter().cloned());

        self.position = match navigation.target() {
            NavigationTarget::End => None,
            NavigationTarget::Block { block_id } => Some(self.entry_position(ruleset, block_id)),
            NavigationTarget::Question {
                block_id,
                question_id,
            } => Some(self.question_position(block_id, question_id)),
        };
        self.history.push(current);

        tracing::debug!(next = %navigation.target(), "session advanced");
        Some(navigation)
    }

    /// Step back to the previous position. Answers and skips are kept.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.position = Some(previous);
                true
            }
            None => false,
        }
    }

    /// Where the respondent is now; `None` once the survey has ended.
    #[must_use]
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position.is_none()
    }

    #[must_use]
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    #[must_use]
    pub fn skips(&self) -> &SkipSet {
        &self.skips
    }

    /// Positions visited so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Every message shown so far, in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn entry_position(&self, ruleset: &RuleSet, block_id: &str) -> Position {
        if self.paged {
            return Position::block(block_id);
        }
        ruleset
            .survey()
            .questions(block_id)
            .iter()
            .find(|q| !self.skips.skips_question(q))
            .map_or_else(|| Position::block(block_id), |q| Position::question(block_id, q.as_str()))
    }

    fn question_position(&self, block_id: &str, question_id: &str) -> Position {
        if self.paged {
            Position::block(block_id)
        } else {
            Position::question(block_id, question_id)
        }
    }
}
