use tracing::debug;

use crate::error::EngineResult;
use crate::pipeline::{System, TurnContext};
use crate::world::{CommandInput, Flag, QuestionSequence};

/// Puts a [`QuestionSequence`] to the player one question at a time.
///
/// Each run does one thing: ask the next question, or take the pending
/// input as the answer to the outstanding one. Once every question has an
/// answer the sequence stays inert.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionResponseSystem;

impl System for QuestionResponseSystem {
    fn name(&self) -> &str {
        "question response"
    }

    fn bypass_flag(&self) -> Option<Flag> {
        Some(Flag::BypassQuestionSequence)
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let player = ctx.player;
        let Some(awaiting) = ctx
            .player_entity()?
            .find_first::<QuestionSequence>()
            .map(|s| s.awaiting_answer())
        else {
            return Ok(());
        };

        if !awaiting {
            let question = ctx
                .player_entity_mut()?
                .first_mut::<QuestionSequence>()
                .and_then(|s| s.ask_next().map(str::to_string));
            if let Some(question) = question {
                debug!(%question, "asking question");
                ctx.output(question)?;
            }
            return Ok(());
        }

        let Some(id) = ctx
            .player_entity()?
            .find_first::<CommandInput>()
            .map(|c| c.id)
        else {
            return Ok(());
        };
        let Some(input) = ctx.take_marker::<CommandInput>(player, id) else {
            return Ok(());
        };
        let answer = input.tokens.raw().to_string();
        if let Some(sequence) = ctx.player_entity_mut()?.first_mut::<QuestionSequence>() {
            sequence.answer(answer.clone());
        }
        ctx.output(format!("You answered with: {answer}"))
    }
}
