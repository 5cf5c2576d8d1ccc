use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn inventory(name: &str, content: Option<&str>) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(format!("{name}.json"));
    match content {
        Some(content) => fs::write(&path, content).unwrap(),
        None => {
            let _ = fs::remove_file(&path);
        }
    }
    path
}

fn hikctl(inventory: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hikctl"))
        .arg(format!("--inventory={}", inventory.display()))
        .args(args)
        .env("RUST_LOG", "debug")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const INVENTORY: &str = r#"{
    "entries": {
        "nvr": {"host": "192.0.2.1", "username": "admin", "password": "secret"}
    },
    "entities": {
        "camera.broken": {"config_entry_id": "nvr", "unique_id": "DS7608"},
        "camera.orphan": {"config_entry_id": "removed", "unique_id": "DS7608_101"}
    }
}"#;

#[test]
fn ptz_move_on_unknown_entity_fails_with_entity_in_message() {
    let file = inventory("unknown_entity", None);
    let output = hikctl(&file, &["ptz-move", "camera.missing", "--direction=up"]);
    assert!(!output.status.success());
    assert!(stderr(&output)
        .contains("PTZ control failed for camera.missing: Entity camera.missing not found"));
}

#[test]
fn ptz_move_on_malformed_unique_id_fails_without_contacting_device() {
    let file = inventory("malformed_unique_id", Some(INVENTORY));
    let output = hikctl(&file, &["ptz-move", "camera.broken", "--pan", "-10"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains(
        "PTZ control failed for camera.broken: Cannot determine channel ID from unique ID DS7608"
    ));
}

#[test]
fn ptz_stop_on_entity_without_entry_fails() {
    let file = inventory("orphan", Some(INVENTORY));
    let output = hikctl(&file, &["ptz-stop", "camera.orphan"]);
    assert!(!output.status.success());
    assert!(stderr(&output)
        .contains("PTZ stop failed for camera.orphan: Config entry for camera.orphan not found"));
}

#[test]
fn request_to_unknown_entry_fails() {
    let file = inventory("unknown_entry", Some(INVENTORY));
    let output = hikctl(&file, &["request", "doorbell", "System/deviceInfo", "-X", "GET"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Config entry doorbell not found"));
}

#[test]
fn call_without_movement_fails() {
    let file = inventory("call_without_movement", None);
    let output = hikctl(
        &file,
        &["call", "ptz_move", r#"{"entity_id": "camera.driveway"}"#],
    );
    assert!(!output.status.success());
    assert!(stderr(&output)
        .contains("Either direction or pan/tilt/zoom parameters must be provided"));
}

#[test]
fn call_unknown_action_fails() {
    let file = inventory("call_unknown_action", None);
    let output = hikctl(&file, &["call", "snapshot"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown action: snapshot"));
}

#[test]
fn invalid_inventory_fails() {
    let file = inventory("invalid", Some("{"));
    let output = hikctl(&file, &["ptz-stop", "camera.driveway"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to deserialize inventory"));
}

#[test]
fn completions_do_not_need_an_inventory() {
    let file = inventory("invalid_for_completions", Some("{"));
    let output = hikctl(&file, &["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("hikctl"));
}
