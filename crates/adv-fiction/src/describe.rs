//! Room description resolution and the "look" text.

use adv_core::{ConditionKind, ConditionalDescription, RoomId, World};

/// Whether a condition holds for `room` right now, before negation.
fn holds(world: &World, room: RoomId, condition: &ConditionKind) -> bool {
    match condition {
        ConditionKind::FirstVisit => world.room(room).is_some_and(|r| !r.description_shown),
        ConditionKind::Visited => world.room(room).is_some_and(|r| r.visited),
        ConditionKind::HasItem(item) => world.has_item(item),
        ConditionKind::RoomHasItem(item) => world.room_has_item(room, item),
        ConditionKind::ItemUsed(item) => world
            .find_item(item)
            .and_then(|id| world.item(id))
            .is_some_and(|i| i.used),
    }
}

/// Whether a rule matches, negation included.
pub fn rule_matches(world: &World, room: RoomId, rule: &ConditionalDescription) -> bool {
    holds(world, room, &rule.condition) != rule.negate
}

/// Pick the rule that overrides the room's description, if any.
///
/// The matching rule with the highest priority wins; among equals the one
/// defined first wins. Pure: no flags change.
pub fn select_rule(world: &World, room: RoomId) -> Option<&ConditionalDescription> {
    let mut best: Option<&ConditionalDescription> = None;
    for rule in world.room(room)?.conditional_descriptions.iter() {
        if !rule_matches(world, room, rule) {
            continue;
        }
        if best.is_none_or(|b| rule.condition.priority() > b.condition.priority()) {
            best = Some(rule);
        }
    }
    best
}

/// The description to show for a room, marking it as shown.
///
/// Once shown, the room never matches `first_visit` again.
pub fn resolve_description(world: &mut World, room: RoomId) -> String {
    let text = match select_rule(world, room) {
        Some(rule) => rule.text.clone(),
        None => world
            .room(room)
            .map(|r| r.description.clone())
            .unwrap_or_default(),
    };
    if let Some(r) = world.room_mut(room) {
        r.description_shown = true;
    }
    text
}

/// Full text for looking around the current room: name, description,
/// exits, and visible items, one per line.
pub fn render_room(world: &mut World) -> String {
    let here = world.current_room_id();
    let description = resolve_description(world, here);
    let Some(room) = world.room(here) else {
        return String::from("You are nowhere.");
    };

    let mut lines = vec![room.name.clone(), description];

    let exits: Vec<String> = room
        .open_directions()
        .map(|dir| {
            if room.exit(dir).is_locked() {
                format!("{dir} (locked)")
            } else {
                dir.to_string()
            }
        })
        .collect();
    if exits.is_empty() {
        lines.push("Exits: none".to_string());
    } else {
        lines.push(format!("Exits: {}", exits.join(", ")));
    }

    lines.extend(
        room.items()
            .iter()
            .filter_map(|&id| world.item(id))
            .filter(|item| item.visible)
            .map(|item| format!("You see: {}", item.name)),
    );

    lines.join("\n")
}
