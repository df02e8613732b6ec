use std::env;
use std::path::Path;

const HINT_ENV: &str = "M22_DATA_DIR_HINT";

fn main() {
    println!("cargo:rerun-if-env-changed={HINT_ENV}");

    let Some(raw) = env::var_os(HINT_ENV).filter(|value| !value.is_empty()) else {
        return;
    };
    let hint = Path::new(&raw);
    let dir = hint.canonicalize().unwrap_or_else(|_| hint.to_path_buf());
    if !dir.join("bezel.csv").is_file() {
        println!(
            "cargo:warning={HINT_ENV}={} has no bezel.csv and will be skipped at runtime",
            dir.display()
        );
    }
    println!("cargo:rustc-env={HINT_ENV}={}", dir.display());
}
