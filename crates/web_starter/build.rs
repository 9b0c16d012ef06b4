use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SiteSection {
    title: String,
    body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LandingManifest {
    heading: String,
    lead: String,
    #[serde(default)]
    sections: Vec<SiteSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SiteManifest {
    title: String,
    description: String,
    mount_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SiteFile {
    schema_version: u32,
    site: SiteManifest,
    landing: LandingManifest,
}

#[derive(Debug, Clone, Serialize)]
struct BundledConfig<'a> {
    title: &'a str,
    description: &'a str,
    mount_id: &'a str,
    landing: &'a LandingManifest,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("site.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let file: SiteFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if file.schema_version != 1 {
        panic!(
            "site config schema mismatch in {}: expected 1 found {}",
            path.display(),
            file.schema_version
        );
    }
    for (field, value) in [
        ("site.title", &file.site.title),
        ("site.mount_id", &file.site.mount_id),
        ("landing.heading", &file.landing.heading),
    ] {
        if value.trim().is_empty() {
            panic!("{field} must not be empty in {}", path.display());
        }
    }

    let bundled = BundledConfig {
        title: &file.site.title,
        description: &file.site.description,
        mount_id: &file.site.mount_id,
        landing: &file.landing,
    };
    let json = serde_json::to_string_pretty(&bundled).expect("serialize bundled site config");
    let generated = format!(
        "/// Build-time generated site configuration JSON.\n\
pub const SITE_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("site_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
