use std::path::Path;

pub fn run(path: &Path) -> Result<(), String> {
    let loaded = super::load_world(path)?;
    let world = &loaded.world;

    if loaded.warnings.is_empty() {
        println!("  All checks passed for '{}'.", loaded.name);
    } else {
        println!(
            "  '{}' loaded with {}.",
            loaded.name,
            super::plural(loaded.warnings.len(), "warning")
        );
    }
    println!(
        "  {}, {}",
        super::plural(world.room_count(), "room"),
        super::plural(world.item_count(), "item")
    );

    Ok(())
}
