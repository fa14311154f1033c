//! Integration tests for the luna CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DESIGN: &str = "lunasites.behaviors.design_schema.IDesignSchema";
const BASE: &str = "http://localhost:8080/Plone";

/// Helper to get a luna command isolated from the user's config and env
fn luna(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("luna").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env_remove("LUNA_BASE_URL")
        .env_remove("LUNA_ACTOR")
        .env_remove("LUNA_ROLES")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a site in a temp directory
fn setup_test_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    luna(tmp.path()).arg("init").assert().success();
    tmp
}

/// Helper to write a page file under content/
fn write_page(tmp: &TempDir, rel: &str, yaml: &str) {
    let path = tmp.path().join("content").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, yaml).unwrap();
}

/// Helper to run a command and parse its stdout as JSON
fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// A products section that sets a width and two colors, with a child page
/// overriding only the primary color
fn setup_products(tmp: &TempDir) {
    write_page(
        tmp,
        "products/index.yaml",
        r##"title: Products
fields:
  navbar_width: wide
  color_schema:
    primary_color: "#222222"
    secondary_color: "#333333"
"##,
    );
    write_page(
        tmp,
        "products/widgets.yaml",
        r##"title: Widgets
fields:
  color_schema:
    primary_color: "#111111"
  view_type: grid
"##,
    );
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    luna(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inherit"))
        .stdout(predicate::str::contains("colors"))
        .stdout(predicate::str::contains("sections"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    luna(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("luna"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    luna(tmp.path()).arg("publish").assert().failure();
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    luna(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("luna"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_site_structure() {
    let tmp = TempDir::new().unwrap();
    luna(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Luna site"));

    assert!(tmp.path().join(".luna/config.yaml").exists());
    assert!(tmp.path().join(".luna/registry.yaml").exists());
    assert!(tmp.path().join("content/index.yaml").exists());
}

#[test]
fn test_init_twice_reports_existing_site() {
    let tmp = setup_test_site();
    luna(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_keeps_pages() {
    let tmp = setup_test_site();
    write_page(&tmp, "index.yaml", "title: My Site\n");
    luna(tmp.path()).args(["init", "--force"]).assert().success();

    let root = fs::read_to_string(tmp.path().join("content/index.yaml")).unwrap();
    assert_eq!(root, "title: My Site\n");
}

#[test]
fn test_commands_outside_site_fail() {
    let tmp = TempDir::new().unwrap();
    luna(tmp.path()).arg("inherit").assert().failure();
}

// ============================================================================
// Inherit Tests
// ============================================================================

#[test]
fn test_inherit_root_of_fresh_site() {
    let tmp = setup_test_site();
    let out = json_output(luna(tmp.path()).arg("inherit"));

    let result = &out[DESIGN];
    let data = result["data"].as_object().unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(data["color_schema"], serde_json::json!({}));
    assert_eq!(data["tools_header"], serde_json::json!([]));
    assert_eq!(data["hide_login_button"], Value::Bool(false));
    assert_eq!(data["navbar_width"], Value::Null);
    assert_eq!(result["from"]["@id"], BASE);
    assert_eq!(result["from"]["title"], "Site");
}

#[test]
fn test_inherit_nearest_ancestor_and_per_key_colors() {
    let tmp = setup_test_site();
    setup_products(&tmp);

    let out = json_output(luna(tmp.path()).args(["inherit", "/products/widgets"]));
    let result = &out[DESIGN];

    assert_eq!(result["data"]["navbar_width"], "wide");
    assert_eq!(result["data"]["view_type"], "grid");
    assert_eq!(
        result["data"]["color_schema"],
        serde_json::json!({"primary_color": "#111111", "secondary_color": "#333333"})
    );

    let sources = &result["field_sources"];
    assert_eq!(sources["navbar_width"]["@id"], format!("{}/products", BASE));
    assert_eq!(
        sources["color_schema_details"]["primary_color"]["@id"],
        format!("{}/products/widgets", BASE)
    );
    assert_eq!(
        sources["color_schema_details"]["secondary_color"]["@id"],
        format!("{}/products", BASE)
    );
    assert_eq!(result["from"]["@id"], format!("{}/products/widgets", BASE));
}

#[test]
fn test_inherit_view_type_not_inherited() {
    let tmp = setup_test_site();
    write_page(&tmp, "docs/index.yaml", "title: Docs\nfields:\n  view_type: list\n");
    write_page(&tmp, "docs/intro.yaml", "title: Intro\n");

    let out = json_output(luna(tmp.path()).args(["inherit", "/docs/intro"]));
    assert_eq!(out[DESIGN]["data"]["view_type"], Value::Null);
}

#[test]
fn test_inherit_unknown_page_fails() {
    let tmp = setup_test_site();
    luna(tmp.path())
        .args(["inherit", "/nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no page at"));
}

#[test]
fn test_inherit_forbidden_page() {
    let tmp = setup_test_site();
    write_page(&tmp, "intranet/index.yaml", "title: Intranet\nview_roles: [Editor]\n");

    luna(tmp.path())
        .args(["inherit", "/intranet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not allowed"));

    luna(tmp.path())
        .args(["inherit", "/intranet", "--roles", "Editor"])
        .assert()
        .success();

    luna(tmp.path())
        .args(["inherit", "/intranet"])
        .env("LUNA_ROLES", "Manager")
        .assert()
        .success();
}

#[test]
fn test_inherit_skips_hidden_ancestor() {
    let tmp = setup_test_site();
    write_page(
        &tmp,
        "private/index.yaml",
        "title: Private\nview_roles: [Editor]\nfields:\n  navbar_width: narrow\n",
    );
    write_page(&tmp, "private/public.yaml", "title: Public\n");

    let out = json_output(luna(tmp.path()).args(["inherit", "/private/public"]));
    assert_eq!(out[DESIGN]["data"]["navbar_width"], Value::Null);

    let out = json_output(luna(tmp.path()).args(["inherit", "/private/public", "--roles", "Editor"]));
    assert_eq!(out[DESIGN]["data"]["navbar_width"], "narrow");
}

#[test]
fn test_inherit_behavior_selection() {
    let tmp = setup_test_site();

    let out = json_output(luna(tmp.path()).args(["inherit", "/", "--behaviors", ""]));
    assert_eq!(out, serde_json::json!({}));

    let out = json_output(
        luna(tmp.path()).args(["inherit", "/", "--behaviors", &format!("plone.unknown,{}", DESIGN)]),
    );
    let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec![DESIGN]);
}

#[test]
fn test_inherit_base_url_from_env() {
    let tmp = setup_test_site();
    let out = json_output(
        luna(tmp.path())
            .arg("inherit")
            .env("LUNA_BASE_URL", "https://example.org/site/"),
    );
    assert_eq!(out[DESIGN]["from"]["@id"], "https://example.org/site");
}

#[test]
fn test_inherit_logo_image_download_path() {
    let tmp = setup_test_site();
    write_page(
        &tmp,
        "brand/index.yaml",
        "title: Brand\nfields:\n  logo_image:\n    filename: logo.png\n    content_type: image/png\n    size: 2048\n",
    );
    write_page(&tmp, "brand/kit.yaml", "title: Kit\n");

    let out = json_output(luna(tmp.path()).args(["inherit", "/brand/kit"]));
    let logo = &out[DESIGN]["data"]["logo_image"];
    assert_eq!(logo["filename"], "logo.png");
    assert_eq!(
        logo["download"],
        format!("{}/brand/@@download/logo_image", BASE)
    );
}

#[test]
fn test_inherit_yaml_output() {
    let tmp = setup_test_site();
    luna(tmp.path())
        .args(["inherit", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("field_sources:"));
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_list() {
    let tmp = setup_test_site();
    setup_products(&tmp);

    luna(tmp.path())
        .args(["page", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/products/widgets"))
        .stdout(predicate::str::contains("3 page(s) found"));
}

#[test]
fn test_page_chain_json() {
    let tmp = setup_test_site();
    setup_products(&tmp);

    let out = json_output(luna(tmp.path()).args(["page", "chain", "/products/widgets", "-f", "json"]));
    let paths: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["/products/widgets", "/products", "/"]);
    assert_eq!(out[0]["viewable"], Value::Bool(true));
}

#[test]
fn test_page_show() {
    let tmp = setup_test_site();
    setup_products(&tmp);

    luna(tmp.path())
        .args(["page", "show", "/products"])
        .assert()
        .success()
        .stdout(predicate::str::contains("navbar_width: wide"));
}

// ============================================================================
// Color Schema Tests
// ============================================================================

#[test]
fn test_colors_set_and_show() {
    let tmp = setup_test_site();

    let updated = json_output(luna(tmp.path()).args([
        "colors",
        "set",
        "primary_color=#0070ae",
        "text_color=not-a-color",
        "-f",
        "json",
    ]));
    assert_eq!(updated["success"], Value::Bool(true));
    assert_eq!(
        updated["updated_schema"],
        serde_json::json!({"primary_color": "#0070ae"})
    );
    assert_eq!(updated["suggestions"][0]["color"], "#338cbe");

    let shown = json_output(luna(tmp.path()).args(["colors", "show"]));
    assert_eq!(shown["current_schema"]["primary_color"], "#0070ae");
}

#[test]
fn test_colors_preset_round_trip() {
    let tmp = setup_test_site();
    luna(tmp.path())
        .args(["colors", "set", "primary_color=#123456"])
        .assert()
        .success();
    luna(tmp.path())
        .args(["colors", "save-preset", "Brand"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved preset"));
    luna(tmp.path())
        .args(["colors", "set", "primary_color=#654321"])
        .assert()
        .success();

    let applied = json_output(luna(tmp.path()).args(["colors", "apply", "Brand", "-f", "json"]));
    assert_eq!(applied["schema"]["primary_color"], "#123456");
}

#[test]
fn test_colors_apply_unknown_preset_fails() {
    let tmp = setup_test_site();
    luna(tmp.path())
        .args(["colors", "apply", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preset not found"));
}

#[test]
fn test_presets_listed() {
    let tmp = TempDir::new().unwrap();
    let out = json_output(luna(tmp.path()).arg("presets"));
    let ids: Vec<&str> = out["presets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["default", "dark", "corporate", "nature"]);
    assert_eq!(out["available_fields"].as_array().unwrap().len(), 13);
}

// ============================================================================
// Section Template Tests
// ============================================================================

#[test]
fn test_sections_create_list_delete() {
    let tmp = setup_test_site();

    let created = json_output(
        luna(tmp.path())
            .args([
                "sections",
                "new",
                "--name",
                "Hero",
                "--data",
                r#"{"blocks": {"a": {"@type": "slate"}}}"#,
                "-f",
                "json",
            ])
            .env("LUNA_ACTOR", "editor"),
    );
    assert_eq!(created["category"], "General");
    assert_eq!(created["created_by"], "editor");
    let id = created["id"].as_str().unwrap().to_string();

    let listing = json_output(luna(tmp.path()).args(["sections", "list"]));
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["categories"], serde_json::json!(["General"]));

    luna(tmp.path())
        .args(["sections", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Section deleted successfully"));

    luna(tmp.path())
        .args(["sections", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Section not found"));
}

#[test]
fn test_sections_require_data() {
    let tmp = setup_test_site();
    luna(tmp.path())
        .args(["sections", "new", "--name", "Empty", "--data", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Section data is required"));
}

// ============================================================================
// Theming Tests
// ============================================================================

#[test]
fn test_theming_defaults_and_update() {
    let tmp = setup_test_site();

    let shown = json_output(luna(tmp.path()).args(["theming", "show"]));
    assert_eq!(shown["source"], "registry");
    assert!(shown["luna_theming"]["colors"].is_object());

    let updated = json_output(luna(tmp.path()).args([
        "theming",
        "set",
        r##"{"colors": {"primary_color": "#094ce1", "bogus": "#fff"}}"##,
        "-f",
        "json",
    ]));
    assert_eq!(updated["status"], "updated");
    assert_eq!(
        updated["luna_theming"]["colors"],
        serde_json::json!({"primary_color": "#094ce1"})
    );
}

#[test]
fn test_theming_reset() {
    let tmp = setup_test_site();
    luna(tmp.path())
        .args(["theming", "set", r##"{"colors": {"primary_color": "#111111"}}"##])
        .assert()
        .success();

    luna(tmp.path())
        .args(["theming", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to built-in"));

    let shown = json_output(luna(tmp.path()).args(["theming", "show"]));
    assert_eq!(shown["luna_theming"]["colors"]["primary_color"], "#094ce1");
}

#[test]
fn test_sections_survive_legacy_timestamps() {
    let tmp = setup_test_site();
    fs::write(
        tmp.path().join(".luna/registry.yaml"),
        r#"lunasites.custom_sections:
  legacy:
    id: legacy
    name: Legacy
    data: {blocks: {}}
    created: "2024-05-01T10:00:00.123456"
    created_by: admin
"#,
    )
    .unwrap();

    luna(tmp.path())
        .args(["sections", "new", "--name", "Hero", "--data", "{blocks: {a: {}}}"])
        .assert()
        .success();

    let listing = json_output(luna(tmp.path()).args(["sections", "list"]));
    assert_eq!(listing["count"], 2);
    assert_eq!(listing["sections"][0]["id"], "legacy");
}

// ============================================================================
// Validate Tests
// ============================================================================

#[test]
fn test_validate_fresh_site_passes() {
    let tmp = setup_test_site();
    luna(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All files passed validation"));
}

#[test]
fn test_validate_reports_bad_page() {
    let tmp = setup_test_site();
    write_page(&tmp, "bad.yaml", "title: Bad\nfields:\n  tools_header: contact\n");

    luna(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("bad.yaml"));
}

#[test]
fn test_validate_reports_yaml_syntax_error() {
    let tmp = setup_test_site();
    write_page(&tmp, "broken.yaml", "title: [unclosed\n");

    luna(tmp.path())
        .args(["validate", "--keep-going"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("YAML parse error"));
}
