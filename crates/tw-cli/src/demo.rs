//! The built-in demo adventure.

use tw_core::{EntityId, EntityManager};
use tw_fiction::world::{Dialog, Item, adjust_value};
use tw_fiction::{ActionRegistry, Direction, EngineResult, GameConfig, WorldBuilder};

const MOTD: &str = "Welcome to Textworld! Look around, have fun!";

/// Build the demo world and the actions its items use.
pub fn build(config: &GameConfig) -> EngineResult<(EntityManager, ActionRegistry, EntityId)> {
    let mut builder = WorldBuilder::from_config(config);

    let field = builder.room(
        "Open Field",
        "You are standing in an open field. All around you stands tall vibrant green grass. \
         You can hear the sound of flowing water off in the distance which you suspect is a stream.",
    );
    let stream = builder.room(
        "Stream",
        "A shallow rocky stream is swiftly flowing from your west to east. \
         The water looks approximately one foot deep from where you are standing.",
    );
    let rock = builder.room(
        "Large Rock",
        "You are standing beside a large rock. \
         The rock looks out of place with respect to the rest of your surroundings.",
    );
    let forest = builder.room(
        "Old Forest",
        "Thick tall trees block your way but seem to have allowed the stream safe passage. \
         It doesn't appear as though you can travel any further in this direction.",
    );
    let passage = builder.room(
        "Dark Passage",
        "Somehow you found a way to get into the forest. It's dark in here, \
         the sound of the stream calms your nerves but you still feel a bit uneasy in here.",
    );
    builder
        .two_way_exit(field, Direction::North, stream)
        .two_way_exit(stream, Direction::East, rock)
        .two_way_exit(rock, Direction::East, forest)
        .hidden_exit(forest, Direction::East, passage)
        .exit(passage, Direction::West, forest);

    let purse = builder.item(
        Item::new(
            "Coin Purse",
            "Extremely worn leather purse. The leather is soft and flexible and its color has faded. \
             There are 100 coins inside.",
        )
        .with_synonym("purse")
        .consumable()
        .on_use("demo.open_purse"),
    );
    let potion = builder.item(
        Item::new(
            "Health Potion",
            "An oddly shaped bottle with a cool blue liquid inside. The liquid glows with an intense light.",
        )
        .with_synonym("potion")
        .consumable()
        .on_use("demo.drink_potion"),
    );
    let lamp = builder.item(Item::new("Lamp", "A rusty old oil lamp").on_use("demo.light_lamp"));
    builder
        .place_item(field, purse, 1)
        .place_item(field, potion, 3)
        .place_item(rock, lamp, 1);

    builder.npc(
        "Old Man",
        "A really old man",
        stream,
        Some(Dialog::new().with_response("hello", "Hi there!")),
    );

    let player = builder.player(
        &config.player_name,
        "You are the epitome of a hero. You're tall, dapper, strong and ready to take on the world!",
        field,
    );
    builder.motd(player, MOTD);
    let world = builder.build()?;

    let mut actions = ActionRegistry::with_core_actions();
    actions.register("demo.open_purse", |ctx| {
        let gold = adjust_value(ctx.player_entity_mut()?, "gold", 100).unwrap_or_default();
        ctx.output(format!("You count the coins. You now have {gold} gold."))
    });
    actions.register("demo.drink_potion", |ctx| {
        let health = adjust_value(ctx.player_entity_mut()?, "health", 25).unwrap_or_default();
        ctx.output(format!("You feel much better. Health: {health}"))
    });
    actions.register("demo.light_lamp", |ctx| {
        ctx.output("The lamp flickers with a tiny flame")
    });

    Ok((world, actions, player))
}
