use std::path::Path;

use super::{open_existing, print_pizzas, print_restaurants};

pub fn restaurants(db_path: &Path, json: bool) -> Result<(), String> {
    let db = open_existing(db_path)?;
    let restaurants = db
        .store()
        .list_restaurants()
        .map_err(|e| e.to_string())?;
    print_restaurants(&restaurants, json)
}

pub fn pizzas(db_path: &Path, json: bool) -> Result<(), String> {
    let db = open_existing(db_path)?;
    let pizzas = db.store().list_pizzas().map_err(|e| e.to_string())?;
    print_pizzas(&pizzas, json)
}
