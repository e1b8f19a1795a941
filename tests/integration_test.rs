use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DECK: &str = "# Welcome\n\nFirst slide.\n\n---\n\n![a](left.png)\n![b](right.png)\n\n---\n\n<div>raw</div>\n";

fn run_command(store_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quickslides"))
        .env("QUICKSLIDES_STORE_DIR", store_dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn write_deck(dir: &Path) -> String {
    let path = dir.join("deck.md");
    fs::write(&path, DECK).expect("Failed to write document");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_list_command_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck = write_deck(temp_dir.path());

    let output = run_command(temp_dir.path(), &["list", "-i", &deck, "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let listing: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output is not JSON");
    let slides = listing.as_array().expect("Listing is not an array");
    assert_eq!(slides.len(), 3);
    assert_eq!(slides[0]["content"]["variant"], "rich_text");
    assert_eq!(slides[1]["content"]["variant"], "split_cover");
    assert_eq!(slides[1]["content"]["first"], "left.png");
    assert_eq!(slides[2]["content"]["variant"], "pure_markup");
}

#[test]
fn test_locate_and_select_commands() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck = write_deck(temp_dir.path());

    let offset = DECK.find("![a]").unwrap().to_string();
    let output = run_command(temp_dir.path(), &["locate", "-i", &deck, "--offset", &offset]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");

    let output = run_command(temp_dir.path(), &["select", "-i", &deck, "--slide", "2"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let selection: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let start = selection["start"].as_u64().unwrap() as usize;
    assert!(DECK[start..].starts_with("![a]"));
}

#[test]
fn test_html_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck = write_deck(temp_dir.path());
    let output_path = temp_dir.path().join("site").join("deck.html");

    let output = run_command(
        temp_dir.path(),
        &["html", "-i", &deck, "-o", output_path.to_str().unwrap()],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);

    let html_content = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(html_content.contains("<h1>Welcome</h1>"), "Missing markdown content");
    assert!(html_content.contains("split-cover-slide"), "Missing split cover");
    assert!(html_content.contains("sandbox="), "Markup slide is not sandboxed");
}

#[test]
fn test_share_and_unshare_commands() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck = write_deck(temp_dir.path());

    let output = run_command(
        temp_dir.path(),
        &["share", "-i", &deck, "--base-url", "https://slides.example/"],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);
    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert!(url.starts_with("https://slides.example/?doc="));

    let restored = temp_dir.path().join("restored.md");
    let output = run_command(
        temp_dir.path(),
        &["unshare", &url, "-o", restored.to_str().unwrap()],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(fs::read_to_string(&restored).unwrap(), DECK);
}

#[test]
fn test_import_then_export_uses_store() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store_dir = temp_dir.path().join("store");
    let deck = write_deck(temp_dir.path());

    let output = run_command(&store_dir, &["import", "-i", &deck]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(store_dir.join("quickslides-content.md").exists());

    let exported = temp_dir.path().join("exported.md");
    let output = run_command(&store_dir, &["export", "-o", exported.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(fs::read_to_string(&exported).unwrap(), DECK);
}

#[test]
fn test_list_without_store_uses_default_document() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run_command(temp_dir.path(), &["list"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("QuickSlides"));
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing.md");

    let output = run_command(temp_dir.path(), &["list", "-i", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path not found"));
}
