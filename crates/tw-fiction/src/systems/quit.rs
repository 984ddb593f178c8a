use tracing::info;

use crate::error::EngineResult;
use crate::pipeline::{System, TurnContext};
use crate::world::Quit;

/// Runs the action carried by each [`Quit`] marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuitSystem;

impl System for QuitSystem {
    fn name(&self) -> &str {
        "quit"
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let player = ctx.player;
        for quit in ctx.take_markers::<Quit>(player) {
            info!(action = %quit.action, "quit requested");
            ctx.invoke(&quit.action)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::keys;
    use crate::testing::Fixture;

    #[test]
    fn quit_marker_ends_session() {
        let mut fx = Fixture::new();
        fx.run(keys::QUIT, "quit");
        assert!(!fx.outcome.quit_requested);
        fx.run_system(&QuitSystem, None);
        assert!(fx.outcome.quit_requested);
        assert_eq!(fx.world.entity(fx.player).unwrap().count::<Quit>(), 0);
    }

    #[test]
    fn nothing_to_do_without_marker() {
        let mut fx = Fixture::new();
        fx.run_system(&QuitSystem, None);
        assert!(!fx.outcome.quit_requested);
    }
}
