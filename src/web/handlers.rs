use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use std::sync::MutexGuard;
use tracing::{debug, info, warn};

use super::AppState;
use super::errors::AppError;
use crate::db::{Database, RESTAURANT_NOT_FOUND};
use crate::models::views::{RestaurantDetail, RestaurantPizzaDetail};
use crate::models::{NewRestaurantPizza, Pizza, Restaurant};

fn lock_db(state: &AppState) -> Result<MutexGuard<'_, Database>, AppError> {
    state
        .db
        .lock()
        .map_err(|_| AppError::Internal("database lock poisoned".to_string()))
}

/// A path segment that is not an integer cannot name a restaurant, so it is
/// reported the same way as an id with no row behind it.
fn restaurant_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        debug!(error = %rejection.body_text(), "unparseable restaurant id");
        AppError::NotFound(RESTAURANT_NOT_FOUND.to_string())
    })
}

pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

/// GET /restaurants
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, AppError> {
    let db = lock_db(&state)?;
    let restaurants = db.store().list_restaurants()?;
    debug!(count = restaurants.len(), "listed restaurants");
    Ok(Json(restaurants))
}

/// GET /restaurants/{id}
pub async fn get_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<RestaurantDetail>, AppError> {
    let id = restaurant_id(path)?;
    let db = lock_db(&state)?;
    let detail = db.store().restaurant_detail(id)?;
    debug!(
        restaurant_id = id,
        menu_size = detail.restaurant_pizzas.len(),
        "loaded restaurant"
    );
    Ok(Json(detail))
}

/// DELETE /restaurants/{id}
pub async fn delete_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = restaurant_id(path)?;
    let mut db = lock_db(&state)?;
    db.transaction(|store| store.delete_restaurant(id))?;
    info!(restaurant_id = id, "deleted restaurant");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /pizzas
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<Pizza>>, AppError> {
    let db = lock_db(&state)?;
    let pizzas = db.store().list_pizzas()?;
    debug!(count = pizzas.len(), "listed pizzas");
    Ok(Json(pizzas))
}

/// POST /restaurant_pizzas
///
/// Every failure, from an unparseable body to a missing pizza, produces the
/// same 400 response. The cause is only logged.
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<NewRestaurantPizza>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaDetail>), AppError> {
    let Json(new) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected restaurant_pizza payload");
        AppError::validation_errors()
    })?;

    let mut db = lock_db(&state)?;
    let created = db
        .transaction(|store| store.create_restaurant_pizza(&new))
        .map_err(|e| {
            warn!(
                error = %e,
                price = new.price,
                pizza_id = new.pizza_id,
                restaurant_id = new.restaurant_id,
                "failed to create restaurant_pizza"
            );
            AppError::validation_errors()
        })?;

    info!(
        id = created.id,
        restaurant_id = created.restaurant_id,
        pizza_id = created.pizza_id,
        "created restaurant_pizza"
    );
    Ok((StatusCode::CREATED, Json(created)))
}
