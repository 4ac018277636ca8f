use adv_save::{SaveConfig, SaveStore};
use comfy_table::{ContentArrangement, Table};

pub fn run(config: &SaveConfig) -> Result<(), String> {
    let store = SaveStore::from_config(config);
    let slots = store.list().map_err(|e| e.to_string())?;

    if slots.is_empty() {
        println!("  No saves found in {}.", store.dir().display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slot", "World", "Version", "Saved"]);
    for slot in &slots {
        table.add_row(vec![
            slot.name.to_string(),
            slot.world_name.clone().unwrap_or_else(|| "?".into()),
            slot.version.map_or_else(|| "?".into(), |v| v.to_string()),
            slot.modified
                .map_or_else(|| "?".into(), |m| m.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {}", super::plural(slots.len(), "save"));

    Ok(())
}
