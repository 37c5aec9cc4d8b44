use std::env;
use std::fs;
use std::path::PathBuf;

/// Accept only values that look like a version number
fn looks_like_version(value: &str) -> bool {
    value.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn main() {
    let cargo_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    // A VERSION file at the repo root wins over Cargo.toml for release builds
    let version_file = env::var("CARGO_MANIFEST_DIR")
        .ok()
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().and_then(|p| p.parent()).map(|root| root.join("VERSION")));

    let mut version = cargo_version.clone();
    if let Some(path) = version_file {
        println!("cargo:rerun-if-changed={}", path.display());
        if let Ok(contents) = fs::read_to_string(&path) {
            let candidate = contents.trim();
            if looks_like_version(candidate) {
                version = candidate.to_string();
            }
        }
    }

    println!("cargo:rustc-env=SF_VERSION={version}");
    if version != cargo_version {
        println!("cargo:warning=Using version {version} from VERSION file (Cargo.toml has {cargo_version})");
    }
}
