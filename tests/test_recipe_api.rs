mod common;

use axum::http::StatusCode;
use common::{app_in, get, post_empty, post_json, send, send_json};
use serde_json::{json, Value};
use tempfile::tempdir;

fn pasta() -> Value {
    json!({
        "title": "Pasta",
        "ingredients": ["pasta", "water"],
        "instructions": ["Boil water", "Add pasta"],
        "total_time": "20",
        "yields": "2 servings"
    })
}

#[tokio::test]
async fn test_submit_recipe_writes_file_with_integer_time() {
    let dir = tempdir().unwrap();
    let (app, recipes_dir) = app_in(dir.path());

    let (status, body) = send_json(&app, post_json("/submit_recipe", &pasta())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Recipe saved successfully!"}));

    let stored: Value =
        serde_json::from_str(&std::fs::read_to_string(recipes_dir.join("Pasta.json")).unwrap())
            .unwrap();
    assert_eq!(stored["total_time"], json!(20));
    assert_eq!(stored["title"], json!("Pasta"));
    assert_eq!(stored["image"], Value::Null);
}

#[tokio::test]
async fn test_submit_recipe_rejects_missing_fields_without_writing() {
    let dir = tempdir().unwrap();
    let (app, recipes_dir) = app_in(dir.path());

    for field in ["title", "ingredients", "instructions", "total_time", "yields"] {
        let mut data = pasta();
        data.as_object_mut().unwrap().remove(field);

        let (status, body) = send_json(&app, post_json("/submit_recipe", &data)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": format!("{field} is required.")}));
    }

    let mut empty_title = pasta();
    empty_title["title"] = json!("");
    let (status, _) = send_json(&app, post_json("/submit_recipe", &empty_title)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(!recipes_dir.exists());
}

#[tokio::test]
async fn test_submit_recipe_rejects_non_numeric_time() {
    let dir = tempdir().unwrap();
    let (app, _) = app_in(dir.path());

    let mut data = pasta();
    data["total_time"] = json!("about an hour");
    let (status, body) = send_json(&app, post_json("/submit_recipe", &data)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "total_time must be a whole number of minutes."})
    );
}

#[tokio::test]
async fn test_list_recipes_returns_saved_records() {
    let dir = tempdir().unwrap();
    let (app, _) = app_in(dir.path());

    let (status, body) = send_json(&app, get("/recipes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    send_json(&app, post_json("/submit_recipe", &pasta())).await;
    let (status, body) = send_json(&app, get("/recipes")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "title": "Pasta",
            "ingredients": ["pasta", "water"],
            "instructions": ["Boil water", "Add pasta"],
            "total_time": 20,
            "yields": "2 servings",
            "image": null
        }])
    );
}

#[tokio::test]
async fn test_delete_recipe_then_list() {
    let dir = tempdir().unwrap();
    let (app, recipes_dir) = app_in(dir.path());
    send_json(&app, post_json("/submit_recipe", &pasta())).await;

    let (status, body) = send_json(&app, post_empty("/delete_recipe/Pasta")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Recipe deleted successfully!"}));
    assert!(!recipes_dir.join("Pasta.json").exists());

    let (_, body) = send_json(&app, get("/recipes")).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["title"].as_str())
        .collect();
    assert!(!titles.contains(&"Pasta"));
}

#[tokio::test]
async fn test_delete_unknown_recipe_is_not_found() {
    let dir = tempdir().unwrap();
    let (app, _) = app_in(dir.path());

    let (status, body) = send_json(&app, post_empty("/delete_recipe/Nothing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Recipe not found."}));
}

#[tokio::test]
async fn test_delete_title_with_spaces() {
    let dir = tempdir().unwrap();
    let (app, recipes_dir) = app_in(dir.path());

    let mut soup = pasta();
    soup["title"] = json!("Chicken Soup");
    send_json(&app, post_json("/submit_recipe", &soup)).await;
    assert!(recipes_dir.join("Chicken_Soup.json").exists());

    let (status, _) = send_json(&app, post_empty("/delete_recipe/Chicken%20Soup")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!recipes_dir.join("Chicken_Soup.json").exists());
}

#[tokio::test]
async fn test_long_non_ascii_titles_are_saved_and_deleted() {
    let dir = tempdir().unwrap();
    let (app, recipes_dir) = app_in(dir.path());

    for title in ["麺".repeat(30), "麺".repeat(100)] {
        let mut noodles = pasta();
        noodles["title"] = json!(title);
        let (status, body) = send_json(&app, post_json("/submit_recipe", &noodles)).await;
        assert_eq!(status, StatusCode::OK, "{body}");

        let (_, listed) = send_json(&app, get("/recipes")).await;
        assert_eq!(listed, json!([noodles_stored(&title)]));

        let encoded: String = title.bytes().map(|b| format!("%{b:02X}")).collect();
        let (status, _) =
            send_json(&app, post_empty(&format!("/delete_recipe/{encoded}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(std::fs::read_dir(&recipes_dir).unwrap().count(), 0);
    }
}

fn noodles_stored(title: &str) -> Value {
    json!({
        "title": title,
        "ingredients": ["pasta", "water"],
        "instructions": ["Boil water", "Add pasta"],
        "total_time": 20,
        "yields": "2 servings",
        "image": null
    })
}

#[tokio::test]
async fn test_list_with_corrupt_file_is_server_error() {
    let dir = tempdir().unwrap();
    let (app, recipes_dir) = app_in(dir.path());
    std::fs::create_dir_all(&recipes_dir).unwrap();
    std::fs::write(recipes_dir.join("Broken.json"), "{").unwrap();

    let (status, body) = send_json(&app, get("/recipes")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Storage error"));
}

#[tokio::test]
async fn test_html_pages() {
    let dir = tempdir().unwrap();
    let (app, _) = app_in(dir.path());

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Recipe Keeper</h1>"));
    assert!(body.contains("/scrape"));

    let (status, body) = send(&app, get("/submit_recipe_form")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/submit_recipe"));
    assert!(body.contains("total_time"));
}
