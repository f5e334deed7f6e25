//! End-to-end tests for `moonlander-dvorak validate` command.

mod fixtures;
use fixtures::*;

#[test]
fn test_validate_builtin_keymap() {
    let output = run(&["validate"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "Built-in keymap should validate. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Validation passed"));
    assert!(stdout.contains("Layer taps: passed"));
}

#[test]
fn test_validate_builtin_keymap_json() {
    let output = run(&["validate", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["valid"], true);
    assert!(result["errors"].as_array().unwrap().is_empty());
    for check in ["shape", "keycodes", "base_layer", "wiring", "layer_taps"] {
        assert_eq!(result["checks"][check], "passed", "{check}");
    }
}

#[test]
fn test_validate_exported_keymap_file() {
    let (path, _temp_dir) = create_temp_keymap_file(&builtin_raw_keymap());

    let output = run(&["validate", "--keymap", path.to_str().unwrap(), "--strict"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_validate_invalid_keycode_with_suggestion() {
    let mut raw = builtin_raw_keymap();
    raw.layers[0][1] = "KC_ESCAP".to_string();
    let (path, _temp_dir) = create_temp_keymap_file(&raw);

    let output = run(&["validate", "-k", path.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let result = stdout_json(&output);
    assert_eq!(result["valid"], false);
    assert_eq!(result["checks"]["keycodes"], "failed");

    let error = &result["errors"][0];
    assert_eq!(error["severity"], "error");
    assert!(error["message"].as_str().unwrap().contains("KC_ESCAP"));
    assert!(error["suggestion"]
        .as_str()
        .unwrap()
        .contains("Did you mean"));
}

#[test]
fn test_validate_transparent_base_key() {
    let mut raw = builtin_raw_keymap();
    raw.layers[0][0] = "_______".to_string();
    let (path, _temp_dir) = create_temp_keymap_file(&raw);

    let output = run(&["validate", "-k", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ Validation failed"));
    assert!(stdout.contains("Base layer: failed"));
}

#[test]
fn test_validate_wrong_key_count() {
    let mut raw = builtin_raw_keymap();
    raw.layers[1].pop();
    let (path, _temp_dir) = create_temp_keymap_file(&raw);

    let output = run(&["validate", "-k", path.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["checks"]["shape"], "failed");
}

#[test]
fn test_validate_self_referencing_layer_tap() {
    let mut raw = builtin_raw_keymap();
    // Put a MEDIA layer-tap on the MEDIA layer itself
    raw.layers[1][41] = "LT(1, KC_MINS)".to_string();
    let (path, _temp_dir) = create_temp_keymap_file(&raw);

    let output = run(&["validate", "-k", path.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["checks"]["layer_taps"], "failed");
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let mut raw = builtin_raw_keymap();
    // Without the layer-tap key nothing reaches MEDIA
    raw.layers[0][41] = "KC_MINS".to_string();
    let (path, _temp_dir) = create_temp_keymap_file(&raw);

    let lenient = run(&["validate", "-k", path.to_str().unwrap()]);
    assert_eq!(lenient.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("cannot be reached"));

    let strict = run(&["validate", "-k", path.to_str().unwrap(), "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_validate_missing_file() {
    let output = run(&["validate", "-k", "/nonexistent/keymap.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load keymap"));
}

#[test]
fn test_validate_malformed_json() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("keymap.json");
    std::fs::write(&path, "{ not json").unwrap();

    let output = run(&["validate", "-k", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_validate_keymap_for_another_board_warns() {
    let mut raw = builtin_raw_keymap();
    raw.keyboard = "crkbd/rev1".to_string();
    let (path, _temp_dir) = create_temp_keymap_file(&raw);

    let output = run(&["validate", "-k", path.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result = stdout_json(&output);
    assert_eq!(result["valid"], true);
    assert_eq!(result["checks"]["target"], "warning");
    assert_eq!(result["checks"]["layer_taps"], "passed");
    assert!(result["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("crkbd/rev1"));

    let strict = run(&["validate", "-k", path.to_str().unwrap(), "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
}
