//! Build script for spotistats.
//!
//! Copies the `.env.example` template into the user's config directory so the
//! overridable settings are documented right next to `config.json`.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the config directory.
///
/// # File Operations
///
/// ## Source Location
/// `.env.example` in the crate root directory (where Cargo.toml resides).
///
/// ## Destination Location
/// `$SPOTISTATS_CONFIG_DIR/.env.example` when that variable is set at build
/// time, otherwise `~/.config/spotistats/.env.example`.
///
/// # Error Handling Strategy
///
/// - **Missing Template**: Issues a cargo warning but continues the build
/// - **Directory Creation Failures**: Returns errors (critical)
/// - **File Copy Failures**: Returns errors (critical)
///
/// # Environment Variables Used
///
/// - `CARGO_MANIFEST_DIR` - Path to the crate root directory (provided by cargo)
/// - `SPOTISTATS_CONFIG_DIR` - Optional config directory override
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");
    println!("cargo:rerun-if-env-changed=SPOTISTATS_CONFIG_DIR");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let out_dir = match env::var("SPOTISTATS_CONFIG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => {
            let mut dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            dir.push(".config/spotistats");
            dir
        }
    };

    if env_example_path.is_file() {
        fs::create_dir_all(&out_dir)?;
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
