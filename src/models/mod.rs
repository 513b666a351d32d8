use serde::{Deserialize, Serialize, Serializer};

/// Response projections used by the HTTP layer and `--json` CLI output.
pub mod views;

/// Lowest price a restaurant may charge for a pizza.
pub const MIN_PRICE: f64 = 1.0;
/// Highest price a restaurant may charge for a pizza.
pub const MAX_PRICE: f64 = 30.0;

/// Validate a menu price. Fractional prices are fine as long as they are in range.
pub fn validate_price(price: f64) -> Result<(), String> {
    if (MIN_PRICE..=MAX_PRICE).contains(&price) {
        Ok(())
    } else {
        Err(format!(
            "invalid price: {price}. price must be between {MIN_PRICE} and {MAX_PRICE}"
        ))
    }
}

/// Write whole prices as JSON integers (`5`, not `5.0`), others as floats.
pub fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    /// Comma-separated free text, e.g. "Dough, Tomato Sauce, Cheese".
    pub ingredients: String,
}

/// A pizza on a restaurant's menu, with the price that restaurant charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantPizza {
    pub id: i64,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
}

/// Request body for `POST /restaurant_pizzas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRestaurantPizza {
    pub price: f64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
}
