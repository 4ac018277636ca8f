use adv_save::{SaveConfig, SaveStore, SlotName};

pub fn run(config: &SaveConfig, slot: &str) -> Result<(), String> {
    let slot = SlotName::new(slot).map_err(|e| e.to_string())?;
    SaveStore::from_config(config)
        .delete(&slot)
        .map_err(|e| e.to_string())?;
    println!("  Deleted save '{slot}'.");
    Ok(())
}
