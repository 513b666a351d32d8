use cucumber::gherkin::Step;
use cucumber::{then, when};
use serde_json::{Value, json};

use crate::PizzeriaWorld;
use crate::steps::web_steps::{
    http_delete, http_get, http_post_raw, http_post_without_content_type,
};

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Parse the last response body as JSON, panicking with a descriptive message
/// if it is not valid JSON.
fn parse_last_response(world: &PizzeriaWorld) -> Value {
    let body = world
        .last_response_body
        .as_deref()
        .expect("no HTTP response body recorded");
    serde_json::from_str(body)
        .unwrap_or_else(|e| panic!("response body is not valid JSON: {e}\nbody: {body}"))
}

/// Walk a dotted path such as `restaurant_pizzas.0.pizza` into `value`.
fn json_at<'a>(value: &'a Value, path: &str) -> &'a Value {
    path.split('.').fold(value, |current, segment| {
        let next = match segment.parse::<usize>() {
            Ok(index) => current.get(index),
            Err(_) => current.get(segment),
        };
        next.unwrap_or_else(|| panic!("no value at {path:?} (missing {segment:?}) in {value}"))
    })
}

fn assert_array_len(value: &Value, expected: usize) {
    let items = value
        .as_array()
        .unwrap_or_else(|| panic!("expected a JSON array but got: {value}"));
    assert_eq!(
        items.len(),
        expected,
        "expected {expected} items but got {}: {value}",
        items.len()
    );
}

fn assert_no_item_has_key(value: &Value, key: &str) {
    let items = value
        .as_array()
        .unwrap_or_else(|| panic!("expected a JSON array but got: {value}"));
    for item in items {
        assert!(
            item.get(key).is_none(),
            "expected no {key:?} key but found one in {item}"
        );
    }
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when(expr = "I GET the restaurant {string}")]
async fn i_get_the_restaurant(world: &mut PizzeriaWorld, alias: String) {
    let id = world.restaurant_id(&alias);
    http_get(world, &format!("/restaurants/{id}")).await;
}

#[when(expr = "I DELETE the restaurant {string}")]
async fn i_delete_the_restaurant(world: &mut PizzeriaWorld, alias: String) {
    let id = world.restaurant_id(&alias);
    http_delete(world, &format!("/restaurants/{id}")).await;
}

#[when(expr = "I POST a restaurant_pizza with price {int} for pizza {string} at restaurant {string}")]
async fn i_post_a_restaurant_pizza(
    world: &mut PizzeriaWorld,
    price: i64,
    pizza: String,
    restaurant: String,
) {
    let body = json!({
        "price": price,
        "pizza_id": world.pizza_id(&pizza),
        "restaurant_id": world.restaurant_id(&restaurant),
    });
    http_post_raw(world, "/restaurant_pizzas", body.to_string()).await;
}

/// POST the step's docstring verbatim as a JSON body.
#[when(expr = "I POST to {string} with body:")]
async fn i_post_with_body(world: &mut PizzeriaWorld, path: String, step: &Step) {
    let body = step
        .docstring
        .as_ref()
        .expect("step needs a docstring body")
        .trim()
        .to_string();
    http_post_raw(world, &path, body).await;
}

#[when(expr = "I POST to {string} without a content type with body:")]
async fn i_post_without_content_type(world: &mut PizzeriaWorld, path: String, step: &Step) {
    let body = step
        .docstring
        .as_ref()
        .expect("step needs a docstring body")
        .trim()
        .to_string();
    http_post_without_content_type(world, &path, body).await;
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

/// Compare the whole response body to the docstring, as parsed JSON.
#[then("the response JSON is:")]
async fn the_response_json_is(world: &mut PizzeriaWorld, step: &Step) {
    let expected: Value = serde_json::from_str(
        step.docstring
            .as_ref()
            .expect("step needs a docstring with the expected JSON"),
    )
    .expect("expected JSON docstring is not valid JSON");
    let actual = parse_last_response(world);
    assert_eq!(actual, expected, "response JSON mismatch");
}

#[then(expr = "the response JSON array has {int} items")]
async fn the_response_json_array_has_n_items(world: &mut PizzeriaWorld, expected: usize) {
    assert_array_len(&parse_last_response(world), expected);
}

#[then(expr = "the response JSON at {string} has {int} items")]
async fn the_response_json_at_has_n_items(world: &mut PizzeriaWorld, path: String, expected: usize) {
    let json = parse_last_response(world);
    assert_array_len(json_at(&json, &path), expected);
}

#[then(expr = "the response JSON at {string} is {string}")]
async fn the_response_json_at_is_string(world: &mut PizzeriaWorld, path: String, expected: String) {
    let json = parse_last_response(world);
    assert_eq!(json_at(&json, &path), &Value::String(expected));
}

#[then(expr = "the response JSON at {string} is {int}")]
async fn the_response_json_at_is_int(world: &mut PizzeriaWorld, path: String, expected: i64) {
    let json = parse_last_response(world);
    assert_eq!(json_at(&json, &path), &json!(expected));
}

#[then(expr = "the response JSON has key {string}")]
async fn the_response_json_has_key(world: &mut PizzeriaWorld, key: String) {
    let json = parse_last_response(world);
    assert!(json.get(&key).is_some(), "expected key {key:?} in {json}");
}

#[then(expr = "the response JSON at {string} has no key {string}")]
async fn the_response_json_at_has_no_key(world: &mut PizzeriaWorld, path: String, key: String) {
    let json = parse_last_response(world);
    let value = json_at(&json, &path);
    assert!(
        value.get(&key).is_none(),
        "expected no {key:?} key at {path:?} but found one in {value}"
    );
}

#[then(expr = "no item in the response JSON array has key {string}")]
async fn no_item_in_array_has_key(world: &mut PizzeriaWorld, key: String) {
    assert_no_item_has_key(&parse_last_response(world), &key);
}

#[then(expr = "no item in the response JSON at {string} has key {string}")]
async fn no_item_at_path_has_key(world: &mut PizzeriaWorld, path: String, key: String) {
    let json = parse_last_response(world);
    assert_no_item_has_key(json_at(&json, &path), &key);
}
