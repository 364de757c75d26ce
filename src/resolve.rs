use crate::{Action, InvalidTargetError, NavigationTarget, SkipSet, Survey};

/// What the action resolver needs to know about the firing rule.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub survey: &'a Survey,
    /// Id of the rule whose actions are being resolved.
    pub rule_id: &'a str,
    /// The block the rule is scoped to; `goto_question` resolves within it.
    pub block_id: &'a str,
}

/// The concrete effect of a fired rule's action list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Set by the first direct-navigation action (`goto_*` or `end`).
    /// `None` means linear fallback applies, honoring `skips`.
    pub target: Option<NavigationTarget>,
    /// The dangling reference, when the winning `goto_*` could not be
    /// resolved. `target` is then [`NavigationTarget::End`].
    pub invalid_target: Option<InvalidTargetError>,
    /// `show_message` texts in list order.
    pub messages: Vec<String>,
    /// Every `skip_block` / `skip_questions` entry in the list.
    pub skips: SkipSet,
}

/// Turn an action list into a navigation outcome.
///
/// The first direct-navigation action wins; later ones are ignored. Skips and
/// messages are collected from the whole list regardless of where the winning
/// action sits, and never override it.
pub fn resolve_actions(actions: &[Action], ctx: &ResolveContext<'_>) -> Resolution {
    let mut resolution = Resolution::default();

    for action in actions {
        match action {
            Action::ShowMessage { message } => resolution.messages.push(message.clone()),
            Action::SkipBlock { block_ids } => {
                resolution.skips.blocks.extend(block_ids.iter().cloned());
            }
            Action::SkipQuestions { question_ids } => {
                resolution
                    .skips
                    .questions
                    .extend(question_ids.iter().cloned());
            }
            direct if resolution.target.is_none() => match resolve_direct(direct, ctx) {
                Ok(target) => resolution.target = Some(target),
                Err(err) => {
                    tracing::warn!(
                        rule = ctx.rule_id,
                        error = %err,
                        "dangling navigation target, ending survey"
                    );
                    resolution.target = Some(NavigationTarget::End);
                    resolution.invalid_target = Some(err);
                }
            },
            _ => {}
        }
    }

    resolution
}

fn resolve_direct(
    action: &Action,
    ctx: &ResolveContext<'_>,
) -> Result<NavigationTarget, InvalidTargetError> {
    match action {
        Action::GotoBlock { block_id } => goto_block(block_id, ctx),
        Action::GotoBlockQuestion {
            target_block_id,
            target_question_id,
        } => match target_question_id.as_deref() {
            None | Some("") => goto_block(target_block_id, ctx),
            Some(question) => {
                goto_block(target_block_id, ctx)?;
                goto_question_in(target_block_id, question, ctx)
            }
        },
        Action::GotoQuestion { question_id } => goto_question_in(ctx.block_id, question_id, ctx),
        _ => Ok(NavigationTarget::End),
    }
}

fn goto_block(
    block_id: &str,
    ctx: &ResolveContext<'_>,
) -> Result<NavigationTarget, InvalidTargetError> {
    if ctx.survey.contains_block(block_id) {
        Ok(NavigationTarget::block(block_id))
    } else {
        Err(InvalidTargetError::UnknownBlock {
            rule: ctx.rule_id.to_owned(),
            block: block_id.to_owned(),
        })
    }
}

fn goto_question_in(
    block_id: &str,
    question_id: &str,
    ctx: &ResolveContext<'_>,
) -> Result<NavigationTarget, InvalidTargetError> {
    if ctx.survey.block_has_question(block_id, question_id) {
        Ok(NavigationTarget::question(block_id, question_id))
    } else {
        Err(InvalidTargetError::UnknownQuestion {
            rule: ctx.rule_id.to_owned(),
            block: block_id.to_owned(),
            question: question_id.to_owned(),
        })
    }
}
