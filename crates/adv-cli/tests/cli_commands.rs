#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEEP: &str = r#"[WORLD]
name: The Ruined Keep
start: gate

[ROOM:gate]
name: Gatehouse
description: A collapsed gatehouse.
exits: north=courtyard
description_if(first_visit): Rain lashes the broken gatehouse.

[ROOM:courtyard]
name: Courtyard
description: Weeds push through the flagstones.
exits: south=gate, east=chapel, down=cellar
locked_exits: down=iron_key

[ROOM:chapel]
name: Chapel
description: Pews lie scattered.
exits: west=courtyard

[ROOM:cellar]
name: Cellar
description: Barrels line the damp walls.
exits: up=courtyard

[ITEM:lantern]
name: brass lantern
description: A dented lantern.
takeable: yes
location: gate
use_message: You light the lantern.

[ITEM:iron_key]
name: iron key
description: A heavy key.
takeable: yes
location: chapel
"#;

/// Create a temp directory with a world file and an empty save directory.
fn test_world() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.world");
    fs::write(&path, KEEP).unwrap();
    (dir, path)
}

fn write_world(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

fn adventure(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("adventure").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("ADVENTURE_SAVE_DIR")
        .env("NO_COLOR", "1")
        .arg("--save-dir")
        .arg(dir.path().join("saves"));
    cmd
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_valid_world() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("check")
        .arg(&world)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "All checks passed for 'The Ruined Keep'.",
        ))
        .stdout(predicate::str::contains("4 rooms, 2 items"));
}

#[test]
fn check_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let world = write_world(
        dir.path(),
        "warn.world",
        "[ROOM:a]\nname: A\ndescription: Alone.\nexits: north=nowhere\n",
    );
    adventure(&dir)
        .arg("check")
        .arg(&world)
        .assert()
        .success()
        .stdout(predicate::str::contains("loaded with 1 warning."))
        .stderr(predicate::str::contains("non-existent room 'nowhere'"));
}

#[test]
fn check_missing_field_fails() {
    let dir = TempDir::new().unwrap();
    let world = write_world(dir.path(), "bad.world", "[ROOM:a]\nname: A\n");
    adventure(&dir)
        .arg("check")
        .arg(&world)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required fields"))
        .stderr(predicate::str::contains("error: failed to load"));
}

#[test]
fn check_world_without_rooms_fails() {
    let dir = TempDir::new().unwrap();
    let world = write_world(dir.path(), "empty.world", "[WORLD]\nname: Void\n");
    adventure(&dir)
        .arg("check")
        .arg(&world)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No rooms defined in world"));
}

#[test]
fn check_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    adventure(&dir)
        .arg("check")
        .arg(dir.path().join("nope.world"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_tables() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("show")
        .arg(&world)
        .assert()
        .success()
        .stdout(predicate::str::contains("The Ruined Keep"))
        .stdout(predicate::str::contains("Gatehouse"))
        .stdout(predicate::str::contains("down=cellar [iron_key]"))
        .stdout(predicate::str::contains("takeable, usable"));
}

#[test]
fn show_json() {
    let (dir, world) = test_world();
    let output = adventure(&dir)
        .arg("show")
        .arg(&world)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "The Ruined Keep");
    assert_eq!(json["rooms"].as_array().unwrap().len(), 4);
    assert_eq!(json["items"][1]["id"], "iron_key");
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_through_locked_door() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("play")
        .arg(&world)
        .write_stdin("take lantern\nn\nd\ne\ntake key\nw\nd\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rain lashes the broken gatehouse."))
        .stdout(predicate::str::contains("You take the brass lantern."))
        .stdout(predicate::str::contains(
            "The way down is locked. You need the iron key.",
        ))
        .stdout(predicate::str::contains(
            "You unlock the way down with the iron key.",
        ))
        .stdout(predicate::str::contains("Barrels line the damp walls."))
        .stdout(predicate::str::contains("Thanks for playing! Goodbye."))
        .stdout(predicate::str::contains("Adventure complete. Total turns: 7"));
}

#[test]
fn play_ends_on_eof() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("play")
        .arg(&world)
        .write_stdin("look\nfly\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I don't know how to do that. Type 'help' for commands.",
        ))
        .stdout(predicate::str::contains("Adventure complete. Total turns: 2"));
}

#[test]
fn save_then_resume() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("play")
        .arg(&world)
        .write_stdin("take lantern\nn\nsave slot1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game saved to slot 'slot1'"));
    assert!(dir.path().join("saves/slot1.sav").is_file());

    adventure(&dir)
        .arg("play")
        .arg(&world)
        .arg("--load")
        .arg("slot1")
        .write_stdin("i\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Courtyard"))
        .stdout(predicate::str::contains("  - brass lantern"));
}

#[test]
fn mixed_case_slot_resumes_and_deletes() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("play")
        .arg(&world)
        .write_stdin("take lantern\nSave MySave\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game saved to slot 'MySave'"));

    adventure(&dir)
        .arg("play")
        .arg(&world)
        .arg("--load")
        .arg("MySave")
        .write_stdin("i\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - brass lantern"));

    adventure(&dir)
        .arg("delete-save")
        .arg("MySave")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted save 'MySave'."));
}

#[test]
fn restart_in_play() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("play")
        .arg(&world)
        .write_stdin("take lantern\nrestart\nlook\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You begin again."))
        .stdout(predicate::str::contains("You see: brass lantern"))
        .stdout(predicate::str::contains("Adventure complete. Total turns: 1"));
}

#[test]
fn resume_missing_slot_fails() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("play")
        .arg(&world)
        .arg("--load")
        .arg("nope")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resume from 'nope'"));
}

// ---------------------------------------------------------------------------
// saves / delete-save
// ---------------------------------------------------------------------------

#[test]
fn saves_empty() {
    let dir = TempDir::new().unwrap();
    adventure(&dir)
        .arg("saves")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saves found"));
}

#[test]
fn saves_list_and_delete() {
    let (dir, world) = test_world();
    adventure(&dir)
        .arg("play")
        .arg(&world)
        .write_stdin("save alpha\nsave beta\nquit\n")
        .assert()
        .success();

    adventure(&dir)
        .arg("saves")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("The Ruined Keep"))
        .stdout(predicate::str::contains("2 saves"));

    adventure(&dir)
        .arg("delete-save")
        .arg("alpha")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted save 'alpha'."));

    adventure(&dir)
        .arg("delete-save")
        .arg("alpha")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no save named \"alpha\""));
}

#[test]
fn delete_save_rejects_unsafe_name() {
    let dir = TempDir::new().unwrap();
    adventure(&dir)
        .arg("delete-save")
        .arg("../etc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid save name"));
}
