use chrono::Utc;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("version.rs");
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let cargo_toml_path = Path::new(&manifest_dir).join("Cargo.toml");

    let mut f = File::create(&dest_path).unwrap();

    // Read component API version from Cargo.toml metadata
    let cargo_toml_content = std::fs::read_to_string(&cargo_toml_path).unwrap();

    let component_api_version = match cargo_toml_content.parse::<toml::Table>() {
        Ok(cargo_toml) => cargo_toml
            .get("package")
            .and_then(|p| p.as_table())
            .and_then(|p| p.get("metadata"))
            .and_then(|m| m.as_table())
            .and_then(|m| m.get("component_api_version"))
            .and_then(|v| v.as_integer())
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        Err(_) => "unknown".to_string(),
    };
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    writeln!(
        &mut f,
        r###"pub const COMPONENT_API_VERSION: &str = "{}";
pub const BUILD_TIME: &str = "{}";"###,
        component_api_version, build_time
    )
    .unwrap();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
