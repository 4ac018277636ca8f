//! Interactive play session.

use adv_core::{Direction, ItemId, World};
use adv_save::{SaveError, SaveStore, SlotName};

use crate::describe::render_room;
use crate::error::{FictionError, FictionResult};
use crate::interaction::{
    DropOutcome, MoveOutcome, TakeOutcome, UseOutcome, drop_item, examine, move_player, take_item,
    use_item,
};
use crate::parser::{Command, Scope, find_item, suggest_items};

/// How many "did you mean" names to offer.
const MAX_SUGGESTIONS: usize = 2;

const HELP_TEXT: &str = "\
=== COMMANDS ===
  look, l              - Look around current room
  go <dir>, <dir>      - Move (north/south/east/west/up/down)
  take <item>          - Pick up an item
  drop <item>          - Drop an item
  use <item>           - Use an item you carry
  examine <item>       - Examine an item closely
  inventory, i         - Show your inventory
  save <slot>          - Save game to slot
  load <slot>          - Load game from slot
  saves                - List all save slots
  restart              - Start over from the beginning
  help, ?              - Show this help
  quit, exit           - Quit the game";

/// What the session says back to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Player-facing text, possibly several lines.
    pub text: String,
    /// The player asked to leave.
    pub quit: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

/// A game in progress: the world, its name, and where saves go.
pub struct FictionSession {
    world: World,
    initial: World,
    world_name: String,
    saves: Option<SaveStore>,
    turns: u32,
}

impl FictionSession {
    /// Start a session on a freshly loaded world.
    pub fn new(world: World, world_name: impl Into<String>) -> Self {
        Self {
            initial: world.clone(),
            world,
            world_name: world_name.into(),
            saves: None,
            turns: 0,
        }
    }

    /// Enable the save, load, and saves commands.
    pub fn with_saves(mut self, store: SaveStore) -> Self {
        self.saves = Some(store);
        self
    }

    /// Get the current world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Display name of the world being played.
    pub fn world_name(&self) -> &str {
        &self.world_name
    }

    /// Number of commands handled, not counting blank lines or quitting.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Describe the current room.
    pub fn look(&mut self) -> String {
        render_room(&mut self.world)
    }

    /// Restore a slot into this session. The current world is kept if the
    /// slot cannot be loaded.
    pub fn load_slot(&mut self, slot: &str) -> FictionResult<()> {
        let store = self.saves.as_ref().ok_or(FictionError::NoSaveStore)?;
        let slot = SlotName::new(slot)?;
        let (world, _) = store.load(&self.world, &slot)?;
        self.world = world;
        Ok(())
    }

    /// Process a line of player input.
    pub fn process(&mut self, input: &str) -> FictionResult<Reply> {
        match Command::parse(input) {
            Some(command) => self.execute(command),
            None => Ok(Reply::say("")),
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> FictionResult<Reply> {
        if command != Command::Quit {
            self.turns += 1;
        }

        let text = match command {
            Command::Quit => {
                return Ok(Reply {
                    text: "Thanks for playing! Goodbye.".to_string(),
                    quit: true,
                });
            }
            Command::Look => self.look(),
            Command::Move { direction } => self.do_move(direction),
            Command::Go { target: None } => "Go where? Try 'go north' or just 'north'.".into(),
            Command::Go { target: Some(_) } => "I don't know that direction.".into(),
            Command::Take { item } => self.do_take(item.as_deref()),
            Command::Drop { item } => self.do_drop(item.as_deref()),
            Command::Use { item } => self.do_use(item.as_deref()),
            Command::Examine { item } => self.do_examine(item.as_deref()),
            Command::Inventory => self.do_inventory(),
            Command::Save { slot } => self.do_save(slot.as_deref())?,
            Command::Load { slot } => self.do_load(slot.as_deref())?,
            Command::Saves => self.do_saves()?,
            Command::Restart => self.do_restart(),
            Command::Help => HELP_TEXT.to_string(),
            Command::Unknown { .. } => {
                "I don't know how to do that. Type 'help' for commands.".into()
            }
        };
        Ok(Reply::say(text))
    }

    fn do_move(&mut self, direction: Direction) -> String {
        let from = self.world.current_room_id();
        match move_player(&mut self.world, direction) {
            MoveOutcome::Moved { unlocked: false, .. } => self.look(),
            MoveOutcome::Moved { unlocked: true, .. } => {
                let key = self
                    .world
                    .room(from)
                    .and_then(|room| room.exit(direction).key.clone())
                    .unwrap_or_default();
                let key = self.item_name(&key);
                format!("You unlock the way {direction} with the {key}.\n{}", self.look())
            }
            MoveOutcome::NoExit => "You can't go that way.".into(),
            MoveOutcome::Locked { key } => {
                format!("The way {direction} is locked. You need the {}.", self.item_name(&key))
            }
        }
    }

    /// Display name for an item id, falling back to the id itself.
    fn item_name(&self, id: &str) -> String {
        self.world
            .find_item(id)
            .and_then(|item| self.world.item(item))
            .map_or_else(|| id.to_string(), |item| item.name.clone())
    }

    /// "You don't see that here." plus a hint when something is close.
    fn not_found(&self, query: &str, scope: Scope, base: &str) -> String {
        match suggest_items(&self.world, query, scope, MAX_SUGGESTIONS).first() {
            Some(name) => format!("{base} Did you mean the {name}?"),
            None => base.to_string(),
        }
    }

    fn do_take(&mut self, item: Option<&str>) -> String {
        let Some(query) = item else {
            return "Take what?".into();
        };
        let Some(id) = find_item(&self.world, query, Scope::Room) else {
            if find_item(&self.world, query, Scope::Inventory).is_some() {
                return "You already have that.".into();
            }
            return self.not_found(query, Scope::Room, "You don't see that here.");
        };
        let name = self.item_name_by_id(id);
        match take_item(&mut self.world, id) {
            TakeOutcome::Taken => format!("You take the {name}."),
            TakeOutcome::NotHere => "You don't see that here.".into(),
            TakeOutcome::NotTakeable => format!("You can't take the {name}."),
            TakeOutcome::InventoryFull => "Your inventory is full!".into(),
        }
    }

    fn do_drop(&mut self, item: Option<&str>) -> String {
        let Some(query) = item else {
            return "Drop what?".into();
        };
        let Some(id) = find_item(&self.world, query, Scope::Inventory) else {
            return self.not_found(query, Scope::Inventory, "You don't have that.");
        };
        let name = self.item_name_by_id(id);
        match drop_item(&mut self.world, id) {
            DropOutcome::Dropped => format!("You drop the {name}."),
            DropOutcome::NotCarried => "You don't have that.".into(),
            DropOutcome::RoomFull => "You can't drop that here.".into(),
        }
    }

    fn do_use(&mut self, item: Option<&str>) -> String {
        let Some(query) = item else {
            return "Use what?".into();
        };
        let name = find_item(&self.world, query, Scope::Inventory)
            .map(|id| self.item_name_by_id(id))
            .unwrap_or_default();
        match use_item(&mut self.world, query) {
            UseOutcome::NotFound => {
                if find_item(&self.world, query, Scope::Room).is_some() {
                    "You need to pick that up first.".into()
                } else {
                    self.not_found(query, Scope::Inventory, "You don't have that.")
                }
            }
            UseOutcome::NotUsable => format!("You can't use the {name}."),
            UseOutcome::Used {
                message,
                consumed: false,
            } => message,
            UseOutcome::Used {
                message,
                consumed: true,
            } => format!("{message}\n(The {name} is used up.)"),
        }
    }

    fn do_examine(&self, item: Option<&str>) -> String {
        let Some(query) = item else {
            return "Examine what?".into();
        };
        match examine(&self.world, query) {
            Some(item) => format!("{}\n{}", item.name, item.description),
            None => self.not_found(query, Scope::Both, "You don't see that here."),
        }
    }

    fn do_inventory(&self) -> String {
        let mut lines = vec!["=== INVENTORY ===".to_string()];
        let names: Vec<String> = self
            .world
            .inventory()
            .iter()
            .map(|&id| format!("  - {}", self.item_name_by_id(id)))
            .collect();
        if names.is_empty() {
            lines.push("  (empty)".into());
        } else {
            lines.extend(names);
        }
        lines.join("\n")
    }

    fn do_save(&self, slot: Option<&str>) -> FictionResult<String> {
        let Some(slot) = slot else {
            return Ok("Save to which slot? Example: save slot1".into());
        };
        let store = self.saves.as_ref().ok_or(FictionError::NoSaveStore)?;
        let slot = match SlotName::new(slot) {
            Ok(slot) => slot,
            Err(e) => return Ok(format!("Failed to save game. {}", capitalize(&e.to_string()))),
        };
        store.save(&self.world, &slot, &self.world_name)?;
        Ok(format!("Game saved to slot '{slot}'"))
    }

    fn do_load(&mut self, slot: Option<&str>) -> FictionResult<String> {
        let Some(slot) = slot else {
            return Ok("Load from which slot? Example: load slot1".into());
        };
        match self.load_slot(slot) {
            Ok(()) => Ok(format!("Game loaded successfully!\n{}", self.look())),
            Err(FictionError::Save(SaveError::NotFound(_) | SaveError::InvalidSlotName(_))) => {
                Ok("Failed to load game. Slot may not exist.".into())
            }
            Err(e) => Err(e),
        }
    }

    fn do_saves(&self) -> FictionResult<String> {
        let store = self.saves.as_ref().ok_or(FictionError::NoSaveStore)?;
        let mut lines = vec!["=== SAVE SLOTS ===".to_string()];
        let slots = store.list()?;
        if slots.is_empty() {
            lines.push("  (no saves found)".into());
        }
        lines.extend(slots.iter().map(|info| format!("  - {}", info.name)));
        Ok(lines.join("\n"))
    }

    /// Throw away all progress and start again from the world as loaded.
    fn do_restart(&mut self) -> String {
        self.world = self.initial.clone();
        self.turns = 0;
        tracing::debug!(world = %self.world_name, "session restarted");
        format!("You begin again.\n{}", self.look())
    }

    fn item_name_by_id(&self, id: ItemId) -> String {
        self.world
            .item(id)
            .map(|item| item.name.clone())
            .unwrap_or_default()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adv_dsl::parse_world;
    use tempfile::TempDir;

    const WORLD: &str = "\
[WORLD]
name: Test Keep
start: entrance

[ROOM:entrance]
name: Entrance
description: A draughty entrance.
exits: north=hall
description_if(first_visit): You step out of the rain.

[ROOM:hall]
name: Great Hall
description: Banners hang from the rafters.
exits: south=entrance, east=vault
locked_exits: east=key

[ROOM:vault]
name: Vault
description: Gold glitters everywhere.
exits: west=hall

[ITEM:key]
name: iron key
description: A heavy iron key.
takeable: yes
location: entrance

[ITEM:statue]
name: statue
description: A knight in stone.
location: entrance

[ITEM:potion]
name: red potion
description: It fizzes.
takeable: yes
location: entrance
use_message: You feel braver.
use_consumable: yes
";

    fn session() -> FictionSession {
        let loaded = parse_world(WORLD).unwrap();
        FictionSession::new(loaded.world, loaded.name)
    }

    fn say(session: &mut FictionSession, input: &str) -> String {
        session.process(input).unwrap().text
    }

    #[test]
    fn look_shows_first_visit_once() {
        let mut s = session();
        let first = say(&mut s, "look");
        assert!(first.starts_with("Entrance\nYou step out of the rain."));
        assert!(first.contains("Exits: north"));
        assert!(first.contains("You see: iron key"));
        assert!(say(&mut s, "l").contains("A draughty entrance."));
    }

    #[test]
    fn movement_messages() {
        let mut s = session();
        assert_eq!(say(&mut s, "west"), "You can't go that way.");
        assert_eq!(say(&mut s, "go"), "Go where? Try 'go north' or just 'north'.");
        assert_eq!(say(&mut s, "go sideways"), "I don't know that direction.");
        assert!(say(&mut s, "n").starts_with("Great Hall"));
        assert_eq!(
            say(&mut s, "e"),
            "The way east is locked. You need the iron key."
        );
    }

    #[test]
    fn unlocking_with_key() {
        let mut s = session();
        assert_eq!(say(&mut s, "take key"), "You take the iron key.");
        say(&mut s, "north");
        let reply = say(&mut s, "east");
        assert!(reply.starts_with("You unlock the way east with the iron key.\nVault"));

        say(&mut s, "drop key");
        say(&mut s, "west");
        assert!(say(&mut s, "east").starts_with("Vault"));
    }

    #[test]
    fn take_and_drop_messages() {
        let mut s = session();
        assert_eq!(say(&mut s, "take"), "Take what?");
        assert_eq!(say(&mut s, "take statue"), "You can't take the statue.");
        assert_eq!(say(&mut s, "take sword"), "You don't see that here.");
        assert_eq!(
            say(&mut s, "take statu"),
            "You can't take the statue."
        );
        assert_eq!(say(&mut s, "get key"), "You take the iron key.");
        assert_eq!(say(&mut s, "take key"), "You already have that.");
        assert_eq!(say(&mut s, "drop"), "Drop what?");
        assert_eq!(say(&mut s, "drop statue"), "You don't have that.");
        assert_eq!(say(&mut s, "put iron key"), "You drop the iron key.");
    }

    #[test]
    fn suggestion_for_typo() {
        let mut s = session();
        assert_eq!(
            say(&mut s, "take potoin"),
            "You don't see that here. Did you mean the red potion?"
        );
    }

    #[test]
    fn inventory_listing() {
        let mut s = session();
        assert_eq!(say(&mut s, "i"), "=== INVENTORY ===\n  (empty)");
        say(&mut s, "take key");
        say(&mut s, "take potion");
        assert_eq!(
            say(&mut s, "inventory"),
            "=== INVENTORY ===\n  - iron key\n  - red potion"
        );
    }

    #[test]
    fn use_messages() {
        let mut s = session();
        assert_eq!(say(&mut s, "use"), "Use what?");
        assert_eq!(say(&mut s, "use potion"), "You need to pick that up first.");
        say(&mut s, "take potion");
        say(&mut s, "take key");
        assert_eq!(say(&mut s, "use key"), "You can't use the iron key.");
        assert_eq!(
            say(&mut s, "use potion"),
            "You feel braver.\n(The red potion is used up.)"
        );
        assert_eq!(say(&mut s, "use potion"), "You don't have that.");
    }

    #[test]
    fn examine_messages() {
        let mut s = session();
        assert_eq!(say(&mut s, "examine"), "Examine what?");
        assert_eq!(say(&mut s, "x statue"), "statue\nA knight in stone.");
        assert_eq!(say(&mut s, "look at key"), "iron key\nA heavy iron key.");
    }

    #[test]
    fn help_unknown_and_blank() {
        let mut s = session();
        assert!(say(&mut s, "help").starts_with("=== COMMANDS ==="));
        assert_eq!(
            say(&mut s, "dance"),
            "I don't know how to do that. Type 'help' for commands."
        );
        assert_eq!(say(&mut s, "   "), "");
        assert_eq!(s.turns(), 2);
    }

    #[test]
    fn quit_does_not_count_as_turn() {
        let mut s = session();
        say(&mut s, "look");
        let reply = s.process("quit").unwrap();
        assert!(reply.quit);
        assert_eq!(reply.text, "Thanks for playing! Goodbye.");
        assert_eq!(s.turns(), 1);
    }

    #[test]
    fn save_commands_without_store() {
        let mut s = session();
        assert_eq!(
            say(&mut s, "save"),
            "Save to which slot? Example: save slot1"
        );
        assert!(matches!(
            s.process("save one"),
            Err(FictionError::NoSaveStore)
        ));
        assert!(matches!(s.process("saves"), Err(FictionError::NoSaveStore)));
    }

    #[test]
    fn save_list_and_load() {
        let dir = TempDir::new().unwrap();
        let mut s = session().with_saves(SaveStore::new(dir.path()));

        assert_eq!(say(&mut s, "saves"), "=== SAVE SLOTS ===\n  (no saves found)");
        say(&mut s, "take key");
        say(&mut s, "north");
        say(&mut s, "east");
        assert_eq!(say(&mut s, "save slot1"), "Game saved to slot 'slot1'");
        assert_eq!(say(&mut s, "saves"), "=== SAVE SLOTS ===\n  - slot1");

        say(&mut s, "west");
        say(&mut s, "drop key");
        let reply = say(&mut s, "load slot1");
        assert!(reply.starts_with("Game loaded successfully!\nVault"));
        assert!(s.world().has_item("key"));
        assert!(
            s.world()
                .room(s.world().find_room("hall").unwrap())
                .unwrap()
                .exit(Direction::East)
                .unlocked
        );
    }

    #[test]
    fn mixed_case_slot_matches_store() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path());
        let mut s = session().with_saves(SaveStore::new(dir.path()));

        say(&mut s, "take key");
        assert_eq!(say(&mut s, "save MySave"), "Game saved to slot 'MySave'");
        assert!(dir.path().join("MySave.sav").is_file());

        let (world, _) = store
            .load(s.world(), &SlotName::new("MySave").unwrap())
            .unwrap();
        assert!(world.has_item("key"));

        say(&mut s, "drop key");
        assert!(say(&mut s, "LOAD MySave").starts_with("Game loaded successfully!"));
        assert!(s.world().has_item("key"));
    }

    #[test]
    fn restart_restores_loaded_world() {
        let mut s = session();
        say(&mut s, "look");
        say(&mut s, "take key");
        say(&mut s, "take potion");
        say(&mut s, "use potion");
        say(&mut s, "north");
        say(&mut s, "east");

        let reply = say(&mut s, "restart");
        assert!(reply.starts_with("You begin again.\nEntrance\nYou step out of the rain."));
        assert_eq!(s.turns(), 0);
        assert!(!s.world().has_item("key"));
        assert!(s.world().inventory().is_empty());

        let hall = s.world().find_room("hall").unwrap();
        assert!(s.world().room(hall).unwrap().exit(Direction::East).is_locked());
        assert!(!s.world().room(hall).unwrap().visited);
        assert!(say(&mut s, "take potion").starts_with("You take the red potion."));
    }

    #[test]
    fn bad_slots() {
        let dir = TempDir::new().unwrap();
        let mut s = session().with_saves(SaveStore::new(dir.path()));
        assert_eq!(
            say(&mut s, "load nothing"),
            "Failed to load game. Slot may not exist."
        );
        assert_eq!(
            say(&mut s, "load ../etc"),
            "Failed to load game. Slot may not exist."
        );
        assert!(say(&mut s, "save ../etc").starts_with("Failed to save game."));
        assert_eq!(say(&mut s, "load"), "Load from which slot? Example: load slot1");
    }
}
