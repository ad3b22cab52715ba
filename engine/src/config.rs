use std::env;
use std::path::PathBuf;

/// Directory for the file-backed session store. Overridable through
/// KIOSK_DATA_DIR (also read from a local .env file).
pub fn storage_dir() -> PathBuf {
    dotenvy::dotenv().ok();
    env::var("KIOSK_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./kiosk-data"))
}
