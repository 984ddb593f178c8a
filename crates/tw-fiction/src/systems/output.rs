use crate::error::EngineResult;
use crate::pipeline::{OutputLine, System, TurnContext};
use crate::world::{Output, query};

/// Renders every queued [`Output`] into the turn outcome and clears the
/// output entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFlushSystem;

impl System for OutputFlushSystem {
    fn name(&self) -> &str {
        "output flush"
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let Some(target) = query::output_entity(ctx.world) else {
            return Ok(());
        };
        for output in ctx.take_markers::<Output>(target) {
            ctx.emit_line(OutputLine::render(&output));
        }
        Ok(())
    }
}
