pub mod init;
pub mod list;
pub mod seed;
pub mod serve;
pub mod show;

use colored::Colorize;
use pizzeria::db::Database;
use pizzeria::models::{Pizza, Restaurant};
use serde::Serialize;
use std::path::Path;

/// Open a database that `pizzeria init` has already created.
pub fn open_existing(db_path: &Path) -> Result<Database, String> {
    if !db_path.exists() {
        return Err(format!(
            "no database at {}. run `pizzeria init` first",
            db_path.display()
        ));
    }
    Database::open(db_path).map_err(|e| format!("failed to open database: {e}"))
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let j = serde_json::to_string_pretty(value).map_err(|e| format!("json error: {e}"))?;
    println!("{j}");
    Ok(())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let cut: String = s.chars().take(width - 3).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

/// Print restaurants as a table or JSON.
pub fn print_restaurants(restaurants: &[Restaurant], json: bool) -> Result<(), String> {
    if json {
        return print_json(restaurants);
    }

    if restaurants.is_empty() {
        println!("No restaurants found.");
        return Ok(());
    }

    println!("{}", format!("{:<6} {:<32} ADDRESS", "ID", "NAME").bold());
    println!("{}", "-".repeat(72));
    for r in restaurants {
        println!("{:<6} {:<32} {}", r.id, truncate(&r.name, 32), r.address);
    }
    Ok(())
}

/// Print pizzas as a table or JSON.
pub fn print_pizzas(pizzas: &[Pizza], json: bool) -> Result<(), String> {
    if json {
        return print_json(pizzas);
    }

    if pizzas.is_empty() {
        println!("No pizzas found.");
        return Ok(());
    }

    println!("{}", format!("{:<6} {:<20} INGREDIENTS", "ID", "NAME").bold());
    println!("{}", "-".repeat(72));
    for p in pizzas {
        println!(
            "{:<6} {:<20} {}",
            p.id,
            truncate(&p.name, 20),
            p.ingredients.bright_black()
        );
    }
    Ok(())
}
