use tracing::trace;
use tw_core::{ComponentId, Entity, EntityId, EntityManager};

use super::marker::{Marker, MarkerAction, MarkerEvent, MarkerLog};
use super::turn::{OutputLine, TurnOutcome};
use crate::action::{ActionKey, ActionRegistry};
use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::world::query;
use crate::world::{CommandAction, Output, OutputKind};

/// Everything a system or action can touch during a turn.
///
/// Markers go through [`push_marker`](Self::push_marker) and the `take_*`
/// methods so that each produce and consume lands in the marker log. Taking
/// a marker removes it; there is no way to read one as consumed and leave
/// it behind.
pub struct TurnContext<'a> {
    /// The player this turn is for.
    pub player: EntityId,
    /// The shared world state.
    pub world: &'a mut EntityManager,
    /// Actions that world data may refer to.
    pub actions: &'a ActionRegistry,
    /// Session configuration.
    pub config: &'a GameConfig,
    input: Option<&'a str>,
    turn: u64,
    system: &'a str,
    markers: &'a mut MarkerLog,
    outcome: &'a mut TurnOutcome,
}

impl<'a> TurnContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        player: EntityId,
        world: &'a mut EntityManager,
        actions: &'a ActionRegistry,
        config: &'a GameConfig,
        input: Option<&'a str>,
        turn: u64,
        system: &'a str,
        markers: &'a mut MarkerLog,
        outcome: &'a mut TurnOutcome,
    ) -> Self {
        Self {
            player,
            world,
            actions,
            config,
            input,
            turn,
            system,
            markers,
            outcome,
        }
    }

    /// The current turn number.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Name of the running system.
    pub fn system(&self) -> &str {
        self.system
    }

    /// The raw line submitted for this turn, if any.
    pub fn input(&self) -> Option<&'a str> {
        self.input
    }

    /// The player entity.
    pub fn player_entity(&self) -> EngineResult<&Entity> {
        self.world
            .entity(self.player)
            .ok_or(EngineError::PlayerNotFound(self.player))
    }

    /// The player entity, mutably.
    pub fn player_entity_mut(&mut self) -> EngineResult<&mut Entity> {
        self.world
            .entity_mut(self.player)
            .ok_or(EngineError::PlayerNotFound(self.player))
    }

    /// The room the player is in.
    pub fn current_room(&self) -> Option<EntityId> {
        query::current_room(self.world, self.player)
    }

    /// The command whose action is running, if called from an action.
    pub fn command(&self) -> Option<CommandAction> {
        self.world
            .entity(self.player)?
            .find_first::<CommandAction>()
            .map(|c| c.value.clone())
    }

    // -----------------------------------------------------------------------
    // Markers
    // -----------------------------------------------------------------------

    /// Attach a marker to `target`.
    pub fn push_marker<M: Marker>(&mut self, target: EntityId, marker: M) -> EngineResult<ComponentId> {
        let entity = self
            .world
            .entity_mut(target)
            .ok_or(EngineError::EntityNotFound(target))?;
        let id = entity.add(M::KIND.as_str(), marker);
        self.record(MarkerAction::Produced, M::KIND, target);
        Ok(id)
    }

    /// Remove and return one marker by id.
    pub fn take_marker<M: Marker>(&mut self, target: EntityId, id: ComponentId) -> Option<M> {
        let marker = self.world.entity_mut(target)?.take::<M>(id)?;
        self.record(MarkerAction::Consumed, M::KIND, target);
        Some(marker)
    }

    /// Remove and return every marker of type `M` on `target`.
    pub fn take_markers<M: Marker>(&mut self, target: EntityId) -> Vec<M> {
        self.take_markers_where(target, |_: &M| true)
    }

    /// Remove and return the markers of type `M` on `target` that match.
    pub fn take_markers_where<M: Marker>(
        &mut self,
        target: EntityId,
        predicate: impl Fn(&M) -> bool,
    ) -> Vec<M> {
        let Some(entity) = self.world.entity_mut(target) else {
            return Vec::new();
        };
        let taken = entity.drain_where(predicate);
        for _ in &taken {
            self.record(MarkerAction::Consumed, M::KIND, target);
        }
        taken
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Queue regular text on the output entity.
    pub fn output(&mut self, text: impl Into<String>) -> EngineResult<()> {
        self.output_as(OutputKind::Regular, text)
    }

    /// Queue text of a given kind on the output entity.
    pub fn output_as(&mut self, kind: OutputKind, text: impl Into<String>) -> EngineResult<()> {
        let target = query::ensure_output_entity(self.world);
        self.push_marker(
            target,
            Output {
                text: text.into(),
                kind,
            },
        )?;
        Ok(())
    }

    /// Hand a rendered line to the presentation layer.
    pub fn emit_line(&mut self, line: OutputLine) {
        self.outcome.lines.push(line);
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// Run a registered action.
    pub fn invoke(&mut self, key: &ActionKey) -> EngineResult<()> {
        let actions = self.actions;
        trace!(action = %key, system = self.system, "invoking action");
        actions.invoke(key, self)
    }

    /// Ask for the session to end after this turn.
    pub fn request_quit(&mut self) {
        self.outcome.quit_requested = true;
    }

    fn record(&mut self, action: MarkerAction, kind: super::MarkerKind, entity: EntityId) {
        self.markers.push(MarkerEvent {
            turn: self.turn,
            system: self.system.to_string(),
            action,
            kind,
            entity,
        });
    }
}
