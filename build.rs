use std::env;
use std::fs;
use std::path::Path;

/// Only keys with this prefix are forwarded to `option_env!`.
const ENV_PREFIX: &str = "AETHERIS_";

fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let Some((key, value)) = line.split_once('=') else {
                    continue;
                };
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');

                if !key.starts_with(ENV_PREFIX) {
                    continue;
                }

                // Variables already exported by the shell win over .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, using built-in defaults (see .env.example)");
    }

    for key in [
        "AETHERIS_API_URL",
        "AETHERIS_REQUEST_TIMEOUT_MS",
        "AETHERIS_TOKEN_KEY",
        "AETHERIS_POLL_INTERVAL_MS",
        "AETHERIS_FAST_POLL_INTERVAL_MS",
        "AETHERIS_MAX_NOTICES",
        "AETHERIS_ENABLE_LOGGING",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
