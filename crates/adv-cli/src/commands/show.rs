use std::path::Path;

use adv_core::{ItemId, ItemLocation, World};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path, json: bool) -> Result<(), String> {
    let loaded = super::load_world(path)?;
    let world = &loaded.world;

    if json {
        let out = serde_json::to_string_pretty(world)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    let start = world
        .room(world.start_room())
        .map(|room| room.id.as_str())
        .unwrap_or("-");
    println!("  {} (starts in {})", loaded.name.bold(), start.dimmed());
    println!();

    let mut rooms = Table::new();
    rooms.set_content_arrangement(ContentArrangement::Dynamic);
    rooms.set_header(vec!["Room", "Name", "Exits", "Rules"]);
    for room in world.rooms() {
        let exits: Vec<String> = room
            .open_directions()
            .map(|dir| {
                let exit = room.exit(dir);
                let target = exit
                    .target
                    .and_then(|id| world.room(id))
                    .map(|r| r.id.as_str())
                    .unwrap_or("?");
                match &exit.key {
                    Some(key) => format!("{dir}={target} [{key}]"),
                    None => format!("{dir}={target}"),
                }
            })
            .collect();
        rooms.add_row(vec![
            room.id.clone(),
            room.name.clone(),
            exits.join(", "),
            room.conditional_descriptions.len().to_string(),
        ]);
    }
    println!("{rooms}");
    println!();

    let mut items = Table::new();
    items.set_content_arrangement(ContentArrangement::Dynamic);
    items.set_header(vec!["Item", "Name", "Location", "Flags"]);
    for (idx, item) in world.items().iter().enumerate() {
        let mut flags = Vec::new();
        if item.takeable {
            flags.push("takeable");
        }
        if item.is_usable() {
            flags.push(if item.use_consumable { "consumable" } else { "usable" });
        }
        items.add_row(vec![
            item.id.clone(),
            item.name.clone(),
            location_label(world, ItemId(idx)),
            flags.join(", "),
        ]);
    }
    println!("{items}");
    println!();
    println!(
        "  {}, {}",
        super::plural(world.room_count(), "room"),
        super::plural(world.item_count(), "item")
    );

    Ok(())
}

fn location_label(world: &World, item: ItemId) -> String {
    match world.location_of(item) {
        Some(ItemLocation::Room(room)) => world
            .room(room)
            .map(|r| r.id.clone())
            .unwrap_or_default(),
        Some(ItemLocation::Inventory) => "inventory".to_string(),
        None => "-".to_string(),
    }
}
