use std::fmt;

/// An effect triggered when a rule's conditions are satisfied.
///
/// Each variant carries only the fields valid for its kind; the persisted
/// form is tagged by `type` (`goto_block`, `skip_questions`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")
)]
pub enum Action {
    /// Jump to the first question of a block.
    GotoBlock { block_id: String },
    /// Jump to a specific question in another block. An empty or missing
    /// question behaves like [`Action::GotoBlock`].
    GotoBlockQuestion {
        target_block_id: String,
        #[cfg_attr(feature = "serde", serde(default))]
        target_question_id: Option<String>,
    },
    /// Jump to a question within the rule's own block.
    GotoQuestion { question_id: String },
    /// Skip the listed blocks during linear traversal.
    SkipBlock { block_ids: Vec<String> },
    /// Skip the listed questions of the current block.
    SkipQuestions { question_ids: Vec<String> },
    /// Display a message; does not change navigation.
    ShowMessage { message: String },
    /// Terminate the survey.
    End,
}

impl Action {
    #[must_use]
    pub fn goto_block(block_id: &str) -> Self {
        Action::GotoBlock {
            block_id: block_id.to_owned(),
        }
    }

    #[must_use]
    pub fn goto_block_question(block_id: &str, question_id: &str) -> Self {
        Action::GotoBlockQuestion {
            target_block_id: block_id.to_owned(),
            target_question_id: Some(question_id.to_owned()),
        }
    }

    #[must_use]
    pub fn goto_question(question_id: &str) -> Self {
        Action::GotoQuestion {
            question_id: question_id.to_owned(),
        }
    }

    #[must_use]
    pub fn skip_blocks<'a>(block_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Action::SkipBlock {
            block_ids: block_ids.into_iter().map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn skip_questions<'a>(question_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Action::SkipQuestions {
            question_ids: question_ids.into_iter().map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn show_message(message: &str) -> Self {
        Action::ShowMessage {
            message: message.to_owned(),
        }
    }

    /// Whether this action decides the next target on its own
    /// (`goto_*` and `end`), as opposed to skips and messages.
    #[must_use]
    pub fn is_direct_navigation(&self) -> bool {
        matches!(
            self,
            Action::GotoBlock { .. }
                | Action::GotoBlockQuestion { .. }
                | Action::GotoQuestion { .. }
                | Action::End
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::GotoBlock { block_id } => write!(f, "goto_block {block_id}"),
            Action::GotoBlockQuestion {
                target_block_id,
                target_question_id: Some(q),
            } if !q.is_empty() => write!(f, "goto_block_question {target_block_id}/{q}"),
            Action::GotoBlockQuestion {
                target_block_id, ..
            } => write!(f, "goto_block_question {target_block_id}"),
            Action::GotoQuestion { question_id } => write!(f, "goto_question {question_id}"),
            Action::SkipBlock { block_ids } => write!(f, "skip_block [{}]", block_ids.join(", ")),
            Action::SkipQuestions { question_ids } => {
                write!(f, "skip_questions [{}]", question_ids.join(", "))
            }
            Action::ShowMessage { message } => write!(f, "show_message {message:?}"),
            Action::End => write!(f, "end"),
        }
    }
}
