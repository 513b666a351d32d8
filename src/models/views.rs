//! Fixed-depth response shapes.
//!
//! Restaurants and pizzas reference each other through `RestaurantPizza`, so a
//! naive nested serialization never terminates. Each endpoint gets its own
//! struct that spells out exactly how deep the graph is expanded.

use serde::Serialize;

use super::{Pizza, Restaurant, RestaurantPizza, serialize_price};

/// A menu entry as seen from its restaurant: the pizza is expanded, the
/// restaurant back-reference is not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuEntry {
    pub id: i64,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub pizza: Pizza,
}

impl MenuEntry {
    pub fn new(entry: RestaurantPizza, pizza: Pizza) -> Self {
        MenuEntry {
            id: entry.id,
            price: entry.price,
            pizza_id: entry.pizza_id,
            restaurant_id: entry.restaurant_id,
            pizza,
        }
    }
}

/// `GET /restaurants/{id}`: the restaurant plus one level of menu entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantDetail {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<MenuEntry>,
}

impl RestaurantDetail {
    pub fn new(restaurant: Restaurant, restaurant_pizzas: Vec<MenuEntry>) -> Self {
        RestaurantDetail {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            restaurant_pizzas,
        }
    }
}

/// `POST /restaurant_pizzas`: the new join record with both ends expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantPizzaDetail {
    pub id: i64,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

impl RestaurantPizzaDetail {
    pub fn new(entry: RestaurantPizza, pizza: Pizza, restaurant: Restaurant) -> Self {
        RestaurantPizzaDetail {
            id: entry.id,
            price: entry.price,
            pizza_id: entry.pizza_id,
            restaurant_id: entry.restaurant_id,
            pizza,
            restaurant,
        }
    }
}
