use std::path::Path;

use colored::Colorize;
use pizzeria::db::{Database, SCHEMA_VERSION};

pub fn run(db_path: &Path) -> Result<(), String> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| format!("failed to create directory: {e}"))?;
    }

    let db = Database::open(db_path).map_err(|e| format!("failed to open database: {e}"))?;
    db.migrate().map_err(|e| format!("migration failed: {e}"))?;
    db.set_config("version", env!("CARGO_PKG_VERSION"))
        .map_err(|e| format!("failed to set config: {e}"))?;

    println!(
        "{} pizzeria database at {}",
        "Initialized".green(),
        db_path.display()
    );
    println!("Schema version: {SCHEMA_VERSION}");
    Ok(())
}
