use std::path::Path;

use colored::Colorize;
use pizzeria::db::DbError;

use super::{open_existing, print_json};

pub fn run(db_path: &Path, id: i64, json: bool) -> Result<(), String> {
    let db = open_existing(db_path)?;
    let detail = match db.store().restaurant_detail(id) {
        Ok(d) => d,
        Err(DbError::NotFound(msg)) => return Err(format!("{msg}: {id}")),
        Err(e) => return Err(e.to_string()),
    };

    if json {
        return print_json(&detail);
    }

    println!("{} {}", format!("#{}", detail.id).bold(), detail.name.bold());
    println!("{}", detail.address);
    println!();

    if detail.restaurant_pizzas.is_empty() {
        println!("No pizzas on the menu.");
        return Ok(());
    }

    println!("{}", format!("{:<6} {:<20} INGREDIENTS", "PRICE", "PIZZA").bold());
    println!("{}", "-".repeat(72));
    for entry in &detail.restaurant_pizzas {
        println!(
            "{:<6} {:<20} {}",
            format!("${}", entry.price).green(),
            entry.pizza.name,
            entry.pizza.ingredients.bright_black()
        );
    }
    Ok(())
}
