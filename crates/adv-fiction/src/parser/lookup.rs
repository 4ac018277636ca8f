//! Item name resolution for player commands.

use adv_core::{ItemId, World};
use strsim::jaro_winkler;

/// Minimum similarity score for "did you mean" suggestions (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.7;

/// Where to look for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the player's inventory.
    Inventory,
    /// Only the current room.
    Room,
    /// Inventory first, then the current room.
    Both,
}

/// Candidate items in scan order: inventory first, then the current room.
fn candidates(world: &World, scope: Scope) -> Vec<ItemId> {
    let mut items = Vec::new();
    if matches!(scope, Scope::Inventory | Scope::Both) {
        items.extend_from_slice(world.inventory());
    }
    if matches!(scope, Scope::Room | Scope::Both) {
        if let Some(room) = world.current_room() {
            items.extend_from_slice(room.items());
        }
    }
    items
}

/// Resolve what the player typed to an item.
///
/// Tries an exact id match, then an exact name match, then a substring of id
/// or name. Within each stage the first candidate wins. Matching ignores case.
pub fn find_item(world: &World, query: &str, scope: Scope) -> Option<ItemId> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let items: Vec<(ItemId, String, String)> = candidates(world, scope)
        .into_iter()
        .filter_map(|id| {
            world
                .item(id)
                .map(|item| (id, item.id.to_lowercase(), item.name.to_lowercase()))
        })
        .collect();

    let by = |pred: &dyn Fn(&str, &str) -> bool| {
        items
            .iter()
            .find(|(_, id, name)| pred(id.as_str(), name.as_str()))
            .map(|(item, _, _)| *item)
    };

    by(&|id, _| id == query)
        .or_else(|| by(&|_, name| name == query))
        .or_else(|| by(&|id, name| id.contains(&query) || name.contains(&query)))
}

/// Suggest item names in scope that look like the query.
pub fn suggest_items(world: &World, query: &str, scope: Scope, limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<(String, f64)> = candidates(world, scope)
        .into_iter()
        .filter_map(|id| world.item(id))
        .filter_map(|item| {
            let score = jaro_winkler(&query, &item.name.to_lowercase())
                .max(jaro_winkler(&query, &item.id.to_lowercase()));
            if score >= SUGGEST_THRESHOLD {
                Some((item.name.clone(), score))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    suggestions
        .into_iter()
        .take(limit)
        .map(|(name, _)| name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use adv_core::{Item, Room};

    fn test_world() -> World {
        let mut world = World::new("Lookup");
        let hall = world.add_room(Room::new("hall", "Hall", "A hall.")).unwrap();
        let items = [
            ("lamp", "brass lamp"),
            ("key", "rusty key"),
            ("skeleton_key", "skeleton key"),
            ("Crown", "golden crown"),
        ];
        for (id, name) in items {
            let item = world.add_item(Item::new(id, name, "Something.")).unwrap();
            world.place_item(item, hall).unwrap();
        }
        world
    }

    fn id_of(world: &World, found: Option<ItemId>) -> Option<&str> {
        found.and_then(|id| world.item(id)).map(|item| item.id.as_str())
    }

    #[test]
    fn exact_id_beats_substring() {
        let world = test_world();
        let found = find_item(&world, "key", Scope::Room);
        assert_eq!(id_of(&world, found), Some("key"));
    }

    #[test]
    fn exact_name_match() {
        let world = test_world();
        let found = find_item(&world, "skeleton key", Scope::Room);
        assert_eq!(id_of(&world, found), Some("skeleton_key"));
    }

    #[test]
    fn substring_of_name_or_id() {
        let world = test_world();
        assert_eq!(id_of(&world, find_item(&world, "brass", Scope::Room)), Some("lamp"));
        assert_eq!(id_of(&world, find_item(&world, "skel", Scope::Room)), Some("skeleton_key"));
    }

    #[test]
    fn case_insensitive() {
        let world = test_world();
        assert_eq!(id_of(&world, find_item(&world, "crown", Scope::Room)), Some("Crown"));
        assert_eq!(id_of(&world, find_item(&world, "LAMP", Scope::Room)), Some("lamp"));
    }

    #[test]
    fn inventory_scanned_before_room() {
        let mut world = test_world();
        let skeleton = world.find_item("skeleton_key").unwrap();
        world.put_in_inventory(skeleton).unwrap();

        // Both keys match "key" as a substring stage; the exact id still wins.
        assert_eq!(id_of(&world, find_item(&world, "key", Scope::Both)), Some("key"));
        // Substring stage: the carried key comes first.
        assert_eq!(
            id_of(&world, find_item(&world, "ke", Scope::Both)),
            Some("skeleton_key")
        );
    }

    #[test]
    fn scope_limits_search() {
        let world = test_world();
        assert_eq!(find_item(&world, "lamp", Scope::Inventory), None);
        assert_eq!(find_item(&world, "", Scope::Both), None);
        assert_eq!(find_item(&world, "sword", Scope::Both), None);
    }

    #[test]
    fn suggestions_for_typos() {
        let world = test_world();
        let suggestions = suggest_items(&world, "lmap", Scope::Room, 3);
        assert_eq!(suggestions.first().map(String::as_str), Some("brass lamp"));
        assert!(suggest_items(&world, "zzzzzz", Scope::Room, 3).is_empty());
    }
}
