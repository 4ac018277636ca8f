//! The versioned flat-text save format.
//!
//! A save holds only the mutable part of a world: player position, visited
//! flags, item placement, and (from version 2) unlocked exits. It is applied on
//! top of a world loaded from the same world file.
//!
//! ```text
//! # Adventure Engine Save File
//! VERSION: 2
//! WORLD: <world name>
//!
//! [STATE]
//! current_room: <index>
//! room_count: <n>
//! item_count: <n>
//!
//! [INVENTORY]
//! <item index>            one per line
//!
//! [VISITED]
//! <0|1>                   one per room, in room order
//!
//! [ROOM_ITEMS]
//! ROOM:<index>:<item indices, comma separated>
//!
//! [UNLOCKED_EXITS]        version 2 only
//! ROOM:<index>:<six 0|1 flags, north south east west up down>
//! ```

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use adv_core::{Direction, ItemId, RoomId, World};
use chrono::{DateTime, Utc};

use crate::error::{SaveError, SaveResult};

/// Version written by [`encode`].
pub const CURRENT_VERSION: u32 = 2;
/// Oldest version [`decode`] accepts.
pub const MIN_VERSION: u32 = 1;

const HEADER_COMMENT: &str = "# Adventure Engine Save File";

/// Unlocked flags of one room, indexed by [`Direction::index`].
pub type ExitFlags = [bool; Direction::COUNT];

/// A decoded save document.
///
/// Indices refer to rooms and items in definition order. Room lists are keyed
/// by room index; rooms without an entry hold no items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSnapshot {
    pub version: u32,
    pub world_name: String,
    pub current_room: usize,
    pub room_count: usize,
    pub item_count: usize,
    pub inventory: Vec<usize>,
    pub visited: Vec<bool>,
    pub room_items: BTreeMap<usize, Vec<usize>>,
    /// Always empty for version 1 documents.
    pub unlocked: BTreeMap<usize, ExitFlags>,
}

impl SaveSnapshot {
    /// Capture the mutable state of a world.
    pub fn capture(world: &World, world_name: &str) -> Self {
        let rooms = world.rooms();
        Self {
            version: CURRENT_VERSION,
            world_name: world_name.to_string(),
            current_room: world.current_room_id().index(),
            room_count: rooms.len(),
            item_count: world.item_count(),
            inventory: world.inventory().iter().map(|item| item.index()).collect(),
            visited: rooms.iter().map(|room| room.visited).collect(),
            room_items: rooms
                .iter()
                .enumerate()
                .map(|(idx, room)| (idx, room.items().iter().map(|i| i.index()).collect()))
                .collect(),
            unlocked: rooms
                .iter()
                .enumerate()
                .map(|(idx, room)| (idx, Direction::ALL.map(|dir| room.exit(dir).unlocked)))
                .collect(),
        }
    }

    /// Render the document. The unlocked-exit section is only written for
    /// version 2 and later.
    pub fn to_text(&self, saved_at: DateTime<Utc>) -> String {
        let mut lines = vec![
            HEADER_COMMENT.to_string(),
            format!("# Saved at {}", saved_at.to_rfc3339()),
            format!("VERSION: {}", self.version),
            format!("WORLD: {}", self.world_name),
            String::new(),
            "[STATE]".to_string(),
            format!("current_room: {}", self.current_room),
            format!("room_count: {}", self.room_count),
            format!("item_count: {}", self.item_count),
            String::new(),
            "[INVENTORY]".to_string(),
        ];
        lines.extend(self.inventory.iter().map(usize::to_string));

        lines.push(String::new());
        lines.push("[VISITED]".to_string());
        lines.extend(self.visited.iter().map(|&v| flag(v).to_string()));

        lines.push(String::new());
        lines.push("[ROOM_ITEMS]".to_string());
        for (room, items) in &self.room_items {
            lines.push(format!("ROOM:{room}:{}", join(items.iter().map(usize::to_string))));
        }

        if self.version >= 2 {
            lines.push(String::new());
            lines.push("[UNLOCKED_EXITS]".to_string());
            for (room, flags) in &self.unlocked {
                lines.push(format!("ROOM:{room}:{}", join(flags.iter().map(|&f| flag(f)))));
            }
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn join<S: AsRef<str>>(parts: impl Iterator<Item = S>) -> String {
    parts
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode the world's mutable state at the current version.
pub fn encode(world: &World, world_name: &str) -> String {
    encode_at(world, world_name, Utc::now())
}

/// Encode with an explicit save time.
pub fn encode_at(world: &World, world_name: &str, saved_at: DateTime<Utc>) -> String {
    SaveSnapshot::capture(world, world_name).to_text(saved_at)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    State,
    Inventory,
    Visited,
    RoomItems,
    UnlockedExits,
    Unknown,
}

impl Section {
    fn from_name(name: &str) -> Self {
        match name.trim() {
            "STATE" => Self::State,
            "INVENTORY" => Self::Inventory,
            "VISITED" => Self::Visited,
            "ROOM_ITEMS" => Self::RoomItems,
            "UNLOCKED_EXITS" => Self::UnlockedExits,
            _ => Self::Unknown,
        }
    }
}

/// Parse a save document.
///
/// The version is checked before any section is read, so a document from an
/// unsupported version is rejected as such rather than as corrupt.
pub fn decode(text: &str) -> SaveResult<SaveSnapshot> {
    let mut snapshot = SaveSnapshot {
        version: 0,
        world_name: String::new(),
        current_room: 0,
        room_count: 0,
        item_count: 0,
        inventory: Vec::new(),
        visited: Vec::new(),
        room_items: BTreeMap::new(),
        unlocked: BTreeMap::new(),
    };
    let mut version = None;
    let mut room_count = None;
    let mut section = Section::Header;
    let mut seen_items = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let corrupt = |message: String| SaveError::Corrupt {
            line: number,
            message,
        };

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| corrupt(format!("malformed section header '{line}'")))?;
            if section == Section::Header {
                snapshot.version = check_version(version)?;
            }
            section = Section::from_name(name);
            if section == Section::Unknown {
                tracing::warn!(line = number, section = name, "ignoring unknown save section");
            }
            continue;
        }

        match section {
            Section::Header => {
                let (key, value) = split_key(line).ok_or_else(|| {
                    corrupt(format!("expected 'KEY: value', found '{line}'"))
                })?;
                match key {
                    "VERSION" => version = Some(parse_number(value, number, "version")?),
                    "WORLD" => snapshot.world_name = value.to_string(),
                    _ => {}
                }
            }
            Section::State => {
                let (key, value) = split_key(line).ok_or_else(|| {
                    corrupt(format!("expected 'key: value', found '{line}'"))
                })?;
                match key {
                    "current_room" => {
                        snapshot.current_room = parse_number(value, number, "room index")?;
                    }
                    "room_count" => room_count = Some(parse_number(value, number, "room count")?),
                    "item_count" => {
                        snapshot.item_count = parse_number(value, number, "item count")?;
                    }
                    _ => {}
                }
            }
            Section::Inventory => {
                let item = parse_number(line, number, "item index")?;
                claim_item(&mut seen_items, item, number)?;
                snapshot.inventory.push(item);
            }
            Section::Visited => {
                let value: u32 = parse_number(line, number, "visited flag")?;
                snapshot.visited.push(value != 0);
            }
            Section::RoomItems => {
                let (room, list) = split_room_line(line, number)?;
                let mut items = Vec::new();
                for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    let item = parse_number(token, number, "item index")?;
                    claim_item(&mut seen_items, item, number)?;
                    items.push(item);
                }
                if snapshot.room_items.insert(room, items).is_some() {
                    return Err(corrupt(format!("room {room} listed twice")));
                }
            }
            Section::UnlockedExits => {
                if snapshot.version < 2 {
                    tracing::debug!(line = number, "ignoring unlocked exits in a version 1 save");
                    continue;
                }
                let (room, list) = split_room_line(line, number)?;
                let flags = list
                    .split(',')
                    .map(|token| parse_number::<u32>(token, number, "exit flag").map(|f| f != 0))
                    .collect::<SaveResult<Vec<_>>>()?;
                let flags: ExitFlags = flags.try_into().map_err(|_| {
                    corrupt(format!(
                        "expected {} exit flags for room {room}",
                        Direction::COUNT
                    ))
                })?;
                if snapshot.unlocked.insert(room, flags).is_some() {
                    return Err(corrupt(format!("room {room} listed twice")));
                }
            }
            Section::Unknown => {}
        }
    }

    if section == Section::Header {
        snapshot.version = check_version(version)?;
    }
    snapshot.room_count = room_count.unwrap_or(snapshot.visited.len());
    Ok(snapshot)
}

fn check_version(version: Option<u32>) -> SaveResult<u32> {
    let found = version.ok_or(SaveError::MissingVersion)?;
    if (MIN_VERSION..=CURRENT_VERSION).contains(&found) {
        Ok(found)
    } else {
        Err(SaveError::UnsupportedVersion {
            found,
            min: MIN_VERSION,
            max: CURRENT_VERSION,
        })
    }
}

fn split_key(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

fn split_room_line(line: &str, number: usize) -> SaveResult<(usize, &str)> {
    let (room, rest) = line
        .strip_prefix("ROOM:")
        .and_then(|rest| rest.split_once(':'))
        .ok_or_else(|| SaveError::Corrupt {
            line: number,
            message: format!("expected 'ROOM:<index>:<list>', found '{line}'"),
        })?;
    Ok((parse_number(room, number, "room index")?, rest))
}

fn parse_number<T: FromStr>(text: &str, line: usize, what: &str) -> SaveResult<T> {
    let text = text.trim();
    text.parse().map_err(|_| SaveError::Corrupt {
        line,
        message: format!("invalid {what} '{text}'"),
    })
}

fn claim_item(seen: &mut HashSet<usize>, item: usize, line: usize) -> SaveResult<()> {
    if seen.insert(item) {
        Ok(())
    } else {
        Err(SaveError::Corrupt {
            line,
            message: format!("item {item} appears in more than one place"),
        })
    }
}

// ---------------------------------------------------------------------------
// Applying
// ---------------------------------------------------------------------------

/// Restore a snapshot onto a world loaded from the same world file.
///
/// Everything is validated before the world is touched; on error the world is
/// unchanged. Room state is applied to the first `min(world rooms, saved rooms)`
/// rooms and the rest is ignored. Item indices the world does not have are
/// dropped. Items that were carried or lying in an applied room but are not
/// placed by the save end up nowhere, as if consumed.
pub fn apply(snapshot: &SaveSnapshot, world: &mut World) -> SaveResult<()> {
    let plan = Plan::build(snapshot, world)?;

    // Clear the slots the save is about to fill.
    for item in world.inventory().to_vec() {
        world.detach_item(item);
    }
    for idx in 0..plan.applied_rooms {
        let items = world
            .room(RoomId(idx))
            .map(|room| room.items().to_vec())
            .unwrap_or_default();
        for item in items {
            world.detach_item(item);
        }
    }

    for (room, items) in plan.rooms {
        for item in items {
            world.place_item(item, room)?;
        }
    }
    for item in plan.inventory {
        world.put_in_inventory(item)?;
    }

    for idx in 0..plan.applied_rooms {
        let visited = snapshot.visited.get(idx).copied().unwrap_or(false);
        let unlocked = snapshot.unlocked.get(&idx).copied().unwrap_or_default();
        if let Some(room) = world.room_mut(RoomId(idx)) {
            room.visited = visited;
            for dir in Direction::ALL {
                room.exit_mut(dir).unlocked = unlocked[dir.index()];
            }
        }
    }

    world.set_current_room(RoomId(snapshot.current_room))?;
    Ok(())
}

/// Decode a document and apply it in one step.
pub fn restore(text: &str, world: &mut World) -> SaveResult<SaveSnapshot> {
    let snapshot = decode(text)?;
    apply(&snapshot, world)?;
    Ok(snapshot)
}

/// Validated placements, resolved against the target world.
struct Plan {
    applied_rooms: usize,
    inventory: Vec<ItemId>,
    rooms: Vec<(RoomId, Vec<ItemId>)>,
}

impl Plan {
    fn build(snapshot: &SaveSnapshot, world: &World) -> SaveResult<Self> {
        let room_total = world.room_count();
        let item_total = world.item_count();
        let limits = world.limits();

        if snapshot.current_room >= room_total {
            return Err(SaveError::Mismatch(format!(
                "current room {} does not exist, world has {room_total} rooms",
                snapshot.current_room
            )));
        }

        let applied_rooms = room_total.min(snapshot.room_count);
        if snapshot.room_count != room_total {
            tracing::warn!(
                saved = snapshot.room_count,
                world = room_total,
                "save room count differs from world, applying {applied_rooms} rooms"
            );
        }
        if snapshot.item_count != item_total {
            tracing::warn!(
                saved = snapshot.item_count,
                world = item_total,
                "save item count differs from world"
            );
        }
        if !snapshot.world_name.is_empty() && snapshot.world_name != world.name {
            tracing::warn!(
                saved = %snapshot.world_name,
                world = %world.name,
                "save was made for a different world"
            );
        }

        let known_item = |idx: usize| {
            if idx < item_total {
                Some(ItemId(idx))
            } else {
                tracing::warn!(item = idx, "dropping unknown item from save");
                None
            }
        };

        let inventory: Vec<ItemId> = snapshot
            .inventory
            .iter()
            .filter_map(|&idx| known_item(idx))
            .collect();
        if inventory.len() > limits.max_inventory {
            return Err(SaveError::Mismatch(format!(
                "inventory holds {} items, limit is {}",
                inventory.len(),
                limits.max_inventory
            )));
        }

        let mut rooms = Vec::new();
        for (&room, items) in &snapshot.room_items {
            if room >= applied_rooms {
                tracing::warn!(room, "ignoring items of a room outside the applied range");
                continue;
            }
            let items: Vec<ItemId> = items.iter().filter_map(|&idx| known_item(idx)).collect();
            if items.len() > limits.max_room_items {
                return Err(SaveError::Mismatch(format!(
                    "room {room} holds {} items, limit is {}",
                    items.len(),
                    limits.max_room_items
                )));
            }
            rooms.push((RoomId(room), items));
        }

        Ok(Self {
            applied_rooms,
            inventory,
            rooms,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> World {
        let mut world = World::new("Grid");
        for r in 0..4 {
            let id = world
                .add_room(adv_core::Room::new(format!("r{r}"), "Room", "A room."))
                .unwrap();
            if r > 0 {
                world.connect(id, Direction::North, RoomId(r - 1)).unwrap();
                world
                    .room_mut(id)
                    .unwrap()
                    .lock_exit(Direction::North, format!("i{r}"));
            }
        }
        for i in 0..5 {
            let id = world
                .add_item(adv_core::Item::new(format!("i{i}"), "thing", "A thing."))
                .unwrap();
            world.place_item(id, RoomId(i % 4)).unwrap();
        }
        world
    }

    proptest! {
        #[test]
        fn save_then_load_preserves_state(
            moves in prop::collection::vec((0usize..5, 0usize..5), 0..20),
            visited in prop::collection::vec(any::<bool>(), 4),
            unlocked in prop::collection::vec(any::<bool>(), 4),
            current in 0usize..4,
        ) {
            let mut world = base();
            for (item, dest) in moves {
                if dest == 4 {
                    world.put_in_inventory(ItemId(item)).unwrap();
                } else {
                    world.place_item(ItemId(item), RoomId(dest)).unwrap();
                }
            }
            for r in 0..4 {
                let room = world.room_mut(RoomId(r)).unwrap();
                room.visited = visited[r];
                room.exit_mut(Direction::North).unlocked = unlocked[r];
            }
            world.set_current_room(RoomId(current)).unwrap();

            let mut restored = base();
            restore(&encode(&world, "Grid"), &mut restored).unwrap();

            prop_assert_eq!(
                SaveSnapshot::capture(&restored, "Grid"),
                SaveSnapshot::capture(&world, "Grid")
            );
        }
    }
}
