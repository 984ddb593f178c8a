//! Component payloads attached to players, rooms, items and NPCs.

use std::collections::HashMap;

use tw_core::{ComponentId, DetachedComponent, Entity, EntityId};

use crate::action::ActionKey;
use crate::parser::CommandTokens;
use crate::pipeline::{Marker, MarkerKind};
use crate::world::Direction;

/// Name of the one-shot message-of-the-day [`Description`] on a player.
pub const MOTD: &str = "motd";

/// Key of the action an item runs when used.
pub const DEFAULT_ITEM_ACTION: &str = "default";

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// A line of player input waiting to be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInput {
    /// The tokenized line.
    pub tokens: CommandTokens,
}

/// A resolved command whose action is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAction {
    /// The tokenized line.
    pub tokens: CommandTokens,
    /// The command-set phrase that matched.
    pub phrase: String,
    /// The action bound to the phrase.
    pub action: ActionKey,
}

impl CommandAction {
    /// The lowercased words that follow the matched phrase.
    pub fn remainder(&self) -> String {
        let matched = self.phrase.split(' ').filter(|w| !w.is_empty()).count();
        self.tokens
            .tokens()
            .into_iter()
            .skip(matched)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Something for the description system to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowDescription {
    /// A room's description.
    Room(EntityId),
    /// A player looking at themselves.
    Player(EntityId),
    /// The NPCs present in a room.
    Npcs(EntityId),
    /// The visible exits of a room.
    Exits(EntityId),
}

/// How an output line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// The message of the day.
    MessageOfTheDay,
    /// Ordinary game text.
    Regular,
    /// The player's input echoed back.
    Command,
    /// A blank separator.
    Separator,
}

/// A line of text queued on the shared output entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// The text.
    pub text: String,
    /// How it should be presented.
    pub kind: OutputKind,
}

impl Output {
    /// Ordinary game text.
    pub fn regular(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: OutputKind::Regular,
        }
    }
}

/// A request to end the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quit {
    /// The action that performs the shutdown.
    pub action: ActionKey,
}

impl Marker for CommandInput {
    const KIND: MarkerKind = MarkerKind::CommandInput;
}

impl Marker for CommandAction {
    const KIND: MarkerKind = MarkerKind::CommandAction;
}

impl Marker for ShowDescription {
    const KIND: MarkerKind = MarkerKind::ShowDescription;
}

impl Marker for Output {
    const KIND: MarkerKind = MarkerKind::Output;
}

impl Marker for Quit {
    const KIND: MarkerKind = MarkerKind::Quit;
}

// ---------------------------------------------------------------------------
// World data
// ---------------------------------------------------------------------------

/// Descriptive text. Rooms, NPCs, items and players carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// The text.
    pub text: String,
}

impl Description {
    /// Create a description.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The room an entity is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentRoom {
    /// The room entity.
    pub room: EntityId,
}

/// A way out of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    /// Which way the exit leads.
    pub direction: Direction,
    /// The destination room.
    pub room: EntityId,
    /// The destination's name, for exit listings.
    pub room_name: String,
    /// Hidden exits are usable but not listed.
    pub hidden: bool,
}

/// An item definition, attached to an entity in the items group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Description shown by `show`.
    pub description: String,
    /// Other names the item answers to.
    pub synonyms: Vec<String>,
    /// Consumed on use.
    pub consumable: bool,
    /// Named actions; `"default"` runs on use.
    pub actions: HashMap<String, ActionKey>,
}

impl Item {
    /// Create an item with no actions.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Mark the item as consumed on use.
    pub fn consumable(mut self) -> Self {
        self.consumable = true;
        self
    }

    /// Add a synonym.
    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.push(synonym.into());
        self
    }

    /// Bind a named action.
    pub fn with_action(mut self, name: impl Into<String>, action: impl Into<ActionKey>) -> Self {
        self.actions.insert(name.into(), action.into());
        self
    }

    /// Bind the action run on use.
    pub fn on_use(self, action: impl Into<ActionKey>) -> Self {
        self.with_action(DEFAULT_ITEM_ACTION, action)
    }

    /// The action run on use, if any.
    pub fn default_action(&self) -> Option<&ActionKey> {
        self.actions.get(DEFAULT_ITEM_ACTION)
    }

    /// Whether `name` refers to this item, ignoring case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.synonyms.iter().any(|s| s.eq_ignore_ascii_case(name))
    }
}

/// Items lying in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDrop(pub crate::world::ItemStack);

/// A bounded numeric stat such as health or gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value {
    /// Current amount, always within `0..=max`.
    pub current: i64,
    /// Upper bound.
    pub max: i64,
}

impl Value {
    /// Create a stat, clamping `current` into range.
    pub fn new(current: i64, max: i64) -> Self {
        Self {
            current: current.clamp(0, max.max(0)),
            max: max.max(0),
        }
    }

    /// Add (or subtract, with a negative amount) and clamp.
    pub fn adjust(&mut self, amount: i64) {
        self.current = self.current.saturating_add(amount).clamp(0, self.max);
    }
}

/// Adjust the [`Value`] named `stat` on `entity`, returning the new amount.
pub fn adjust_value(entity: &mut Entity, stat: &str, amount: i64) -> Option<i64> {
    let value = entity.first_mut_by_name::<Value>(stat)?;
    value.adjust(amount);
    Some(value.current)
}

/// One thing an NPC can say in reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogResponse {
    /// What the NPC says.
    pub text: String,
    /// Action run after replying.
    pub action: Option<ActionKey>,
}

/// An NPC's replies, keyed by lowercase trigger phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialog {
    responses: HashMap<String, DialogResponse>,
}

impl Dialog {
    /// An NPC with nothing to say.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `trigger` with `text`.
    pub fn with_response(mut self, trigger: &str, text: impl Into<String>) -> Self {
        self.responses.insert(
            trigger.to_lowercase(),
            DialogResponse {
                text: text.into(),
                action: None,
            },
        );
        self
    }

    /// Reply to `trigger` with `text`, then run `action`.
    pub fn with_action(
        mut self,
        trigger: &str,
        text: impl Into<String>,
        action: impl Into<ActionKey>,
    ) -> Self {
        self.responses.insert(
            trigger.to_lowercase(),
            DialogResponse {
                text: text.into(),
                action: Some(action.into()),
            },
        );
        self
    }

    /// The reply to a phrase, ignoring case.
    pub fn respond(&self, phrase: &str) -> Option<&DialogResponse> {
        self.responses.get(&phrase.to_lowercase())
    }

    /// Every action referenced by this dialog.
    pub fn actions(&self) -> impl Iterator<Item = &ActionKey> {
        self.responses.values().filter_map(|r| r.action.as_ref())
    }
}

/// A scripted list of questions put to the player one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSequence {
    questions: Vec<String>,
    responses: Vec<String>,
    awaiting_answer: bool,
}

impl QuestionSequence {
    /// Queue `questions` in order.
    pub fn new<I, S>(questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            questions: questions.into_iter().map(Into::into).collect(),
            responses: Vec::new(),
            awaiting_answer: false,
        }
    }

    /// Whether a question has been asked and not yet answered.
    pub fn awaiting_answer(&self) -> bool {
        self.awaiting_answer
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.responses.len() >= self.questions.len()
    }

    /// Mark the next question as asked and return it.
    pub fn ask_next(&mut self) -> Option<&str> {
        if self.awaiting_answer || self.is_complete() {
            return None;
        }
        self.awaiting_answer = true;
        self.questions.get(self.responses.len()).map(String::as_str)
    }

    /// Record an answer to the outstanding question.
    pub fn answer(&mut self, answer: impl Into<String>) -> bool {
        if !self.awaiting_answer {
            return false;
        }
        self.responses.push(answer.into());
        self.awaiting_answer = false;
        true
    }

    /// Answers given so far.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Total number of questions.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Per-entity switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Skip the command dispatch system.
    BypassCommandDispatch,
    /// Skip the room movement system.
    BypassRoomMovement,
    /// Skip the description system.
    BypassDescription,
    /// Skip the inventory system.
    BypassInventory,
    /// Skip the question/response system.
    BypassQuestionSequence,
    /// The player is talking to the NPC named by [`Flags::subject`].
    NpcDialogEngagement,
}

/// A set of [`Flag`]s, optionally about another entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    flags: Vec<Flag>,
    subject: Option<EntityId>,
}

impl Flags {
    /// A set holding `flags`.
    pub fn new(flags: impl IntoIterator<Item = Flag>) -> Self {
        Self {
            flags: flags.into_iter().collect(),
            subject: None,
        }
    }

    /// The engagement flag for a conversation with `npc`.
    pub fn engaged_with(npc: EntityId) -> Self {
        Self {
            flags: vec![Flag::NpcDialogEngagement],
            subject: Some(npc),
        }
    }

    /// Whether `flag` is set.
    pub fn is_set(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    /// Set `flag`.
    pub fn set(&mut self, flag: Flag) {
        if !self.is_set(flag) {
            self.flags.push(flag);
        }
    }

    /// Clear `flag`. Clearing the engagement flag also forgets the subject.
    pub fn unset(&mut self, flag: Flag) {
        self.flags.retain(|f| *f != flag);
        if flag == Flag::NpcDialogEngagement {
            self.subject = None;
        }
    }

    /// Whether no flag is set.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// The entity these flags concern.
    pub fn subject(&self) -> Option<EntityId> {
        self.subject
    }
}

/// Whether any [`Flags`] component on `entity` has `flag` set.
pub fn has_flag(entity: &Entity, flag: Flag) -> bool {
    entity.find_all::<Flags>().iter().any(|f| f.is_set(flag))
}

/// The NPC `entity` is talking to, if any.
pub fn engaged_npc(entity: &Entity) -> Option<EntityId> {
    entity
        .find_first_where::<Flags>(|f| f.is_set(Flag::NpcDialogEngagement))
        .and_then(|f| f.subject())
}

/// Stop any conversation `entity` is in. Flags components left with nothing
/// set are removed. Returns whether a conversation was ended.
pub fn end_engagement(entity: &mut Entity) -> bool {
    if !has_flag(entity, Flag::NpcDialogEngagement) {
        return false;
    }
    let ids: Vec<ComponentId> = entity.find_all::<Flags>().iter().map(|f| f.id).collect();
    for id in ids {
        if let Some(flags) = entity.get_mut::<Flags>(id) {
            flags.unset(Flag::NpcDialogEngagement);
        }
    }
    entity.drain_where::<Flags>(Flags::is_empty);
    true
}

/// Components parked off an entity, to be restored later.
#[derive(Debug, Default)]
pub struct ComponentsOnHold {
    held: Vec<DetachedComponent>,
}

impl ComponentsOnHold {
    /// Nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of held components.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

/// Move every `T` on `entity` into its [`ComponentsOnHold`] store.
/// Returns how many were parked.
pub fn hold_components<T: 'static>(entity: &mut Entity) -> usize {
    let detached = entity.detach_all::<T>();
    let count = detached.len();
    if count == 0 {
        return 0;
    }
    if !entity.has::<ComponentsOnHold>() {
        entity.add("on hold", ComponentsOnHold::new());
    }
    if let Some(store) = entity.first_mut::<ComponentsOnHold>() {
        store.held.extend(detached);
    }
    count
}

/// Re-attach every held `T` to `entity`, keeping their ids.
/// Returns how many were restored.
pub fn release_components<T: 'static>(entity: &mut Entity) -> usize {
    let Some(store) = entity.first_mut::<ComponentsOnHold>() else {
        return 0;
    };
    let (released, kept): (Vec<_>, Vec<_>) = store.held.drain(..).partition(|c| c.is::<T>());
    store.held = kept;
    let count = released.len();
    for component in released {
        entity.attach(component);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;
    use tw_core::EntityManager;

    #[test]
    fn command_action_remainder_skips_phrase() {
        let action = |line: &str, phrase: &str| CommandAction {
            tokens: tokenize(line),
            phrase: phrase.into(),
            action: "x".into(),
        };
        assert_eq!(action("talk to Old Man", "talk to").remainder(), "old man");
        assert_eq!(action("take all", "take all").remainder(), "");
        assert_eq!(action("say Hello there", "say").remainder(), "hello there");
    }

    #[test]
    fn item_answers_to_name_and_synonyms() {
        let item = Item::new("Coin Purse", "A small purse").with_synonym("purse");
        assert!(item.answers_to("coin purse"));
        assert!(item.answers_to("PURSE"));
        assert!(!item.answers_to("coin"));
    }

    #[test]
    fn item_default_action() {
        let item = Item::new("Potion", "Red").consumable().on_use("heal");
        assert!(item.consumable);
        assert_eq!(item.default_action().map(ActionKey::as_str), Some("heal"));
        assert!(Item::new("Rock", "Grey").default_action().is_none());
    }

    #[test]
    fn value_clamps() {
        let mut health = Value::new(10, 100);
        health.adjust(500);
        assert_eq!(health.current, 100);
        health.adjust(-1000);
        assert_eq!(health.current, 0);
        assert_eq!(Value::new(150, 100).current, 100);
    }

    #[test]
    fn adjust_value_by_name() {
        let mut em = EntityManager::new();
        let id = em.create_entity("players", "p");
        let player = em.entity_mut(id).unwrap();
        player.add("health", Value::new(10, 100));
        player.add("gold", Value::new(0, 50));
        assert_eq!(adjust_value(player, "gold", 80), Some(50));
        assert_eq!(adjust_value(player, "health", -3), Some(7));
        assert_eq!(adjust_value(player, "mana", 1), None);
    }

    #[test]
    fn dialog_lookup_ignores_case() {
        let dialog = Dialog::new()
            .with_response("Hello", "Hi there!")
            .with_action("quest", "Find my cat.", "quest.start");
        assert_eq!(dialog.respond("HELLO").unwrap().text, "Hi there!");
        assert!(dialog.respond("weather").is_none());
        assert_eq!(dialog.actions().count(), 1);
    }

    #[test]
    fn question_sequence_state_machine() {
        let mut seq = QuestionSequence::new(["What is your name?", "Favourite colour?"]);
        assert!(!seq.answer("early"));
        assert_eq!(seq.ask_next(), Some("What is your name?"));
        assert!(seq.awaiting_answer());
        assert_eq!(seq.ask_next(), None);
        assert!(seq.answer("Frank"));
        assert_eq!(seq.ask_next(), Some("Favourite colour?"));
        assert!(seq.answer("red"));
        assert!(seq.is_complete());
        assert_eq!(seq.ask_next(), None);
        assert_eq!(seq.responses(), ["Frank", "red"]);
    }

    #[test]
    fn empty_question_sequence_is_complete() {
        let mut seq = QuestionSequence::new(Vec::<String>::new());
        assert!(seq.is_complete());
        assert_eq!(seq.ask_next(), None);
    }

    #[test]
    fn flags_set_and_unset() {
        let mut flags = Flags::new([Flag::BypassInventory]);
        assert!(flags.is_set(Flag::BypassInventory));
        flags.set(Flag::BypassDescription);
        flags.set(Flag::BypassDescription);
        flags.unset(Flag::BypassInventory);
        assert!(!flags.is_set(Flag::BypassInventory));
        assert!(flags.is_set(Flag::BypassDescription));
        assert!(flags.subject().is_none());
    }

    #[test]
    fn has_flag_checks_every_flags_component() {
        let mut em = EntityManager::new();
        let id = em.create_entity("players", "p");
        let player = em.entity_mut(id).unwrap();
        player.add("engagement", Flags::engaged_with(EntityId::from_raw(9)));
        player.add("scripted", Flags::new([Flag::BypassRoomMovement]));
        assert!(has_flag(player, Flag::NpcDialogEngagement));
        assert!(has_flag(player, Flag::BypassRoomMovement));
        assert!(!has_flag(player, Flag::BypassInventory));
    }

    #[test]
    fn end_engagement_keeps_other_flags() {
        let mut em = EntityManager::new();
        let id = em.create_entity("players", "p");
        let npc = EntityId::from_raw(9);
        let player = em.entity_mut(id).unwrap();
        assert!(!end_engagement(player));

        player.add("engagement", Flags::engaged_with(npc));
        let mut mixed = Flags::new([Flag::BypassInventory]);
        mixed.set(Flag::NpcDialogEngagement);
        player.add("scripted", mixed);
        assert_eq!(engaged_npc(player), Some(npc));

        assert!(end_engagement(player));
        assert_eq!(engaged_npc(player), None);
        assert_eq!(player.count::<Flags>(), 1);
        assert!(has_flag(player, Flag::BypassInventory));
    }

    #[test]
    fn hold_and_release_components() {
        let mut em = EntityManager::new();
        let id = em.create_entity("players", "p");
        let player = em.entity_mut(id).unwrap();
        let original = player.add("set", crate::parser::CommandSet::new().with("look", "look"));
        player.add("desc", Description::new("me"));

        assert_eq!(hold_components::<crate::parser::CommandSet>(player), 1);
        assert!(!player.has::<crate::parser::CommandSet>());
        assert_eq!(player.find_first::<ComponentsOnHold>().unwrap().len(), 1);
        assert_eq!(hold_components::<Quit>(player), 0);

        assert_eq!(release_components::<crate::parser::CommandSet>(player), 1);
        assert_eq!(player.find_first::<crate::parser::CommandSet>().unwrap().id, original);
        assert!(player.find_first::<ComponentsOnHold>().unwrap().is_empty());
    }
}
