use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn gallery(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_noisegallery"))
        .env("NOISEGALLERY_CONFIG_DIR", root.join("config"))
        .env("NOISEGALLERY_DATA_DIR", root.join("data"))
        .env_remove("NOISEGALLERY_CONFIG")
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("failed to run noisegallery")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "noisegallery failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn uniform(report: &Value, name: &str) -> f64 {
    report["uniforms"][name]
        .as_f64()
        .unwrap_or_else(|| panic!("missing scalar uniform {name}"))
}

#[test]
fn lists_builtins_in_display_order() {
    let root = TempDir::new().unwrap();
    let text = stdout(&gallery(root.path(), &["list"]));
    let ids: Vec<_> = text
        .lines()
        .map(|line| line.split('\t').next().unwrap())
        .collect();
    assert_eq!(
        ids,
        ["perlin", "simplex", "worley", "island", "island-perlin", "island-simplex"]
    );
}

#[test]
fn default_location_resolves_default_shader() {
    let root = TempDir::new().unwrap();
    let report: Value =
        serde_json::from_str(&stdout(&gallery(root.path(), &["uniforms"]))).unwrap();
    assert_eq!(report["shader"], "island-perlin");
    assert_eq!(report["location"], "/");
    assert!((uniform(&report, "u_amplitude") - 0.5).abs() < 1e-6);
    assert_eq!(report["uniforms"]["u_octaves"], 4);
    assert_eq!(report["uniforms"]["u_resolution"], serde_json::json!([800.0, 600.0]));
}

#[test]
fn unknown_shader_in_location_falls_back() {
    let root = TempDir::new().unwrap();
    let output = gallery(
        root.path(),
        &["uniforms", "--location", "/?shader=missing&scale=3"],
    );
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["shader"], "island-perlin");
    assert!((uniform(&report, "u_scale") - 3.0).abs() < 1e-6);
}

#[test]
fn set_edits_flow_into_location_and_uniforms() {
    let root = TempDir::new().unwrap();
    let output = gallery(
        root.path(),
        &["uniforms", "island-perlin", "--set", "amplitude=25", "--time", "1.5"],
    );
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["location"], "/?shader=island-perlin&amplitude=25");
    assert!((uniform(&report, "u_amplitude") - 0.25).abs() < 1e-6);
    assert!((uniform(&report, "u_time") - 1.5).abs() < 1e-6);
}

#[test]
fn set_rejects_wrong_shape() {
    let root = TempDir::new().unwrap();
    let output = gallery(root.path(), &["uniforms", "perlin", "--set", "position=1"]);
    assert!(!output.status.success());
}

#[test]
fn check_passes_for_builtins() {
    let root = TempDir::new().unwrap();
    let text = stdout(&gallery(root.path(), &["check"]));
    assert!(text.contains("6 shader(s) ok"));
}

#[test]
fn packs_are_listed_after_builtins() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("data/packs/ridged");
    fs::create_dir_all(&pack).unwrap();
    fs::write(
        pack.join("shader.toml"),
        "name = \"Ridged\"\n\n[[uniforms]]\nkey = \"scale\"\nname = \"Scale\"\nkind = \"float\"\ndefault = 2.0\n",
    )
    .unwrap();
    fs::write(
        pack.join("shader.frag.glsl"),
        "uniform float u_scale;\nvoid main() {}\n",
    )
    .unwrap();

    let text = stdout(&gallery(root.path(), &["list"]));
    assert_eq!(text.lines().last(), Some("ridged\tRidged"));

    let text = stdout(&gallery(root.path(), &["check"]));
    assert!(text.contains("7 shader(s) ok"));
}

#[test]
fn config_changes_default_shader() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("config")).unwrap();
    fs::write(
        root.path().join("config/gallery.toml"),
        "default_shader = \"worley\"\nshader_field = \"s\"\n",
    )
    .unwrap();

    let output = gallery(root.path(), &["uniforms", "--location", "/?shader=perlin"]);
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["shader"], "worley");

    let output = gallery(root.path(), &["uniforms", "--location", "/?s=perlin"]);
    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["shader"], "perlin");
}
