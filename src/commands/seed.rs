use std::path::Path;

use colored::Colorize;
use pizzeria::models::NewRestaurantPizza;
use serde_json::json;
use tracing::info;

use super::{open_existing, print_json};

const RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const MENU: &[(usize, usize, f64)] = &[(0, 0, 1.0), (1, 1, 4.0), (2, 2, 5.0)];

pub fn run(db_path: &Path, keep: bool, json: bool) -> Result<(), String> {
    let mut db = open_existing(db_path)?;

    let (restaurants, pizzas, entries) = db
        .transaction(|store| {
            if !keep {
                store.clear_all()?;
            }

            let restaurants = RESTAURANTS
                .iter()
                .map(|(name, address)| store.insert_restaurant(name, address))
                .collect::<Result<Vec<_>, _>>()?;
            let pizzas = PIZZAS
                .iter()
                .map(|(name, ingredients)| store.insert_pizza(name, ingredients))
                .collect::<Result<Vec<_>, _>>()?;

            let mut entries = 0;
            for &(r, p, price) in MENU {
                store.create_restaurant_pizza(&NewRestaurantPizza {
                    price,
                    pizza_id: pizzas[p].id,
                    restaurant_id: restaurants[r].id,
                })?;
                entries += 1;
            }

            Ok((restaurants.len(), pizzas.len(), entries))
        })
        .map_err(|e| format!("seed failed: {e}"))?;

    info!(restaurants, pizzas, entries, keep, "seeded database");

    if json {
        return print_json(&json!({
            "restaurants": restaurants,
            "pizzas": pizzas,
            "menu_entries": entries,
        }));
    }

    println!(
        "{} {restaurants} restaurants, {pizzas} pizzas, {entries} menu entries",
        "Seeded".green()
    );
    Ok(())
}
