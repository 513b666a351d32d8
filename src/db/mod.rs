use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::models::views::{MenuEntry, RestaurantDetail, RestaurantPizzaDetail};
use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza, validate_price};

/// Version recorded in the `config` table by `migrate`.
pub const SCHEMA_VERSION: i32 = 1;

/// Message carried by `DbError::NotFound` for restaurant lookups.
pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";

#[derive(Debug, Error)]
pub enum DbError {
    /// The requested row does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The row was rejected before reaching the database.
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    /// True for foreign key, CHECK and NOT NULL failures reported by SQLite.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DbError::Sqlite(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        debug!(path = %path.display(), "opened database");
        Ok(Database { conn })
    }

    /// Open a private in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Database { conn })
    }

    /// Create the schema if it doesn't exist and record the schema version.
    pub fn migrate(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS restaurants (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                name    TEXT NOT NULL,
                address TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pizzas (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                ingredients TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS restaurant_pizzas (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                price         NUMERIC NOT NULL CHECK (price BETWEEN 1 AND 30),
                pizza_id      INTEGER NOT NULL REFERENCES pizzas(id) ON DELETE CASCADE,
                restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_rp_restaurant ON restaurant_pizzas(restaurant_id);
            CREATE INDEX IF NOT EXISTS idx_rp_pizza ON restaurant_pizzas(pizza_id);
            ",
        )?;
        self.set_config("schema_version", &SCHEMA_VERSION.to_string())
    }

    // -- Config --

    pub fn set_config(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_config(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM config WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    // -- Storage contexts --

    /// A store running in autocommit mode, for reads.
    pub fn store(&self) -> Store<'_> {
        Store { conn: &self.conn }
    }

    /// Run `f` inside a transaction.
    ///
    /// The transaction commits only when `f` returns `Ok`. Any error, or a
    /// panic inside `f`, drops the transaction and SQLite rolls it back.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Store<'_>) -> Result<T, DbError>,
    {
        let tx = self.conn.transaction()?;
        let value = f(&Store { conn: &tx })?;
        tx.commit()?;
        Ok(value)
    }
}

/// Storage operations over a borrowed connection or open transaction.
pub struct Store<'c> {
    conn: &'c Connection,
}

impl Store<'_> {
    // -- Restaurants --

    pub fn insert_restaurant(&self, name: &str, address: &str) -> Result<Restaurant, DbError> {
        self.conn.execute(
            "INSERT INTO restaurants (name, address) VALUES (?1, ?2)",
            params![name, address],
        )?;
        Ok(Restaurant {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            address: address.to_string(),
        })
    }

    pub fn list_restaurants(&self) -> Result<Vec<Restaurant>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, address FROM restaurants ORDER BY id ASC")?;
        let restaurants = stmt
            .query_map([], row_to_restaurant)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(restaurants)
    }

    pub fn get_restaurant(&self, id: i64) -> Result<Option<Restaurant>, DbError> {
        let restaurant = self
            .conn
            .query_row(
                "SELECT id, name, address FROM restaurants WHERE id = ?1",
                params![id],
                row_to_restaurant,
            )
            .optional()?;
        Ok(restaurant)
    }

    /// Load a restaurant with its menu, each entry carrying its pizza.
    pub fn restaurant_detail(&self, id: i64) -> Result<RestaurantDetail, DbError> {
        let restaurant = self
            .get_restaurant(id)?
            .ok_or_else(|| DbError::NotFound(RESTAURANT_NOT_FOUND.to_string()))?;

        let mut stmt = self.conn.prepare(
            "SELECT rp.id, rp.price, rp.pizza_id, rp.restaurant_id, p.id, p.name, p.ingredients
             FROM restaurant_pizzas rp
             JOIN pizzas p ON p.id = rp.pizza_id
             WHERE rp.restaurant_id = ?1
             ORDER BY rp.id ASC",
        )?;
        let menu = stmt
            .query_map(params![id], |row| {
                let entry = row_to_restaurant_pizza(row)?;
                let pizza = Pizza {
                    id: row.get(4)?,
                    name: row.get(5)?,
                    ingredients: row.get(6)?,
                };
                Ok(MenuEntry::new(entry, pizza))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(RestaurantDetail::new(restaurant, menu))
    }

    /// Delete a restaurant. Its menu entries go with it via `ON DELETE CASCADE`.
    pub fn delete_restaurant(&self, id: i64) -> Result<(), DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM restaurants WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DbError::NotFound(RESTAURANT_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    // -- Pizzas --

    pub fn insert_pizza(&self, name: &str, ingredients: &str) -> Result<Pizza, DbError> {
        self.conn.execute(
            "INSERT INTO pizzas (name, ingredients) VALUES (?1, ?2)",
            params![name, ingredients],
        )?;
        Ok(Pizza {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            ingredients: ingredients.to_string(),
        })
    }

    pub fn list_pizzas(&self) -> Result<Vec<Pizza>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, ingredients FROM pizzas ORDER BY id ASC")?;
        let pizzas = stmt
            .query_map([], row_to_pizza)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(pizzas)
    }

    pub fn get_pizza(&self, id: i64) -> Result<Option<Pizza>, DbError> {
        let pizza = self
            .conn
            .query_row(
                "SELECT id, name, ingredients FROM pizzas WHERE id = ?1",
                params![id],
                row_to_pizza,
            )
            .optional()?;
        Ok(pizza)
    }

    // -- Menu entries --

    /// Validate and insert a menu entry, returning it with both ends loaded.
    pub fn create_restaurant_pizza(
        &self,
        new: &NewRestaurantPizza,
    ) -> Result<RestaurantPizzaDetail, DbError> {
        validate_price(new.price).map_err(DbError::Validation)?;

        let restaurant = self.get_restaurant(new.restaurant_id)?.ok_or_else(|| {
            DbError::Validation(format!("restaurant not found: {}", new.restaurant_id))
        })?;
        let pizza = self
            .get_pizza(new.pizza_id)?
            .ok_or_else(|| DbError::Validation(format!("pizza not found: {}", new.pizza_id)))?;

        self.conn.execute(
            "INSERT INTO restaurant_pizzas (price, pizza_id, restaurant_id) VALUES (?1, ?2, ?3)",
            params![new.price, new.pizza_id, new.restaurant_id],
        )?;
        let entry = RestaurantPizza {
            id: self.conn.last_insert_rowid(),
            price: new.price,
            pizza_id: new.pizza_id,
            restaurant_id: new.restaurant_id,
        };

        Ok(RestaurantPizzaDetail::new(entry, pizza, restaurant))
    }

    /// Count menu entries across all restaurants.
    pub fn count_restaurant_pizzas(&self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM restaurant_pizzas", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Remove every restaurant, pizza and menu entry and restart id numbering.
    pub fn clear_all(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            DELETE FROM restaurant_pizzas;
            DELETE FROM pizzas;
            DELETE FROM restaurants;
            DELETE FROM sqlite_sequence
                WHERE name IN ('restaurant_pizzas', 'pizzas', 'restaurants');
            ",
        )?;
        Ok(())
    }
}

fn row_to_restaurant(row: &Row) -> rusqlite::Result<Restaurant> {
    Ok(Restaurant {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
    })
}

fn row_to_pizza(row: &Row) -> rusqlite::Result<Pizza> {
    Ok(Pizza {
        id: row.get(0)?,
        name: row.get(1)?,
        ingredients: row.get(2)?,
    })
}

fn row_to_restaurant_pizza(row: &Row) -> rusqlite::Result<RestaurantPizza> {
    Ok(RestaurantPizza {
        id: row.get(0)?,
        price: row.get(1)?,
        pizza_id: row.get(2)?,
        restaurant_id: row.get(3)?,
    })
}
