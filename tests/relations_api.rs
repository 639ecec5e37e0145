//! Relation resolution, list ordering, reference checks and production error hiding.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_production_app, build_test_app, create, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn list_data(app: &axum::Router, uri: &str) -> Vec<Value> {
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].as_array().cloned().unwrap()
}

fn titles(rows: &[Value]) -> Vec<&str> {
    rows.iter().map(|r| r["Title"].as_str().unwrap()).collect()
}

#[sqlx::test]
async fn history_lists_by_sort_order_then_start_year(pool: PgPool) {
    let (app, _uploads) = build_test_app(pool);
    let a = create(&app, "/api/historyEntries", "HistoryID", json!({"Title": "A", "SortOrder": 2, "StartYear": 100})).await;
    create(&app, "/api/historyEntries", "HistoryID", json!({"Title": "B", "SortOrder": 1, "StartYear": 300})).await;
    create(&app, "/api/historyEntries", "HistoryID", json!({"Title": "C", "SortOrder": 1, "StartYear": 200})).await;

    let rows = list_data(&app, "/api/historyEntries").await;
    assert_eq!(titles(&rows), vec!["C", "B", "A"]);

    let response = put_json(
        &app,
        &format!("/api/historyEntries/{a}"),
        json!({"Title": "A", "SortOrder": 0, "StartYear": 100}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "History entry updated successfully");

    let rows = list_data(&app, "/api/historyEntries").await;
    assert_eq!(titles(&rows), vec!["A", "C", "B"]);
}

#[sqlx::test]
async fn events_list_by_event_date(pool: PgPool) {
    let (app, _uploads) = build_test_app(pool);
    create(&app, "/api/events", "EventID", json!({"Title": "Coronation", "EventDate": "0412-05-01"})).await;
    create(&app, "/api/events", "EventID", json!({"Title": "First Landing", "EventDate": "0001-01-01"})).await;
    create(&app, "/api/events", "EventID", json!({"Title": "The Long Winter", "EventDate": "0210-11-30"})).await;

    let rows = list_data(&app, "/api/events").await;
    assert_eq!(titles(&rows), vec!["First Landing", "The Long Winter", "Coronation"]);
}

#[sqlx::test]
async fn history_entry_resolves_all_five_references(pool: PgPool) {
    let (app, _uploads) = build_test_app(pool);
    let religion = create(&app, "/api/religions", "ReligionID", json!({"Name": "The Old Flame"})).await;
    let nation = create(&app, "/api/nations", "NationID", json!({"Name": "Valdoria", "MajorReligionID": religion})).await;
    let location = create(
        &app,
        "/api/locations",
        "LocationID",
        json!({"Name": "Highspire", "LocationType": "City", "NationID": nation}),
    )
    .await;
    let character = create(
        &app,
        "/api/characters",
        "CharacterID",
        json!({"Name": "Elandor", "NationID": nation, "ReligionID": religion}),
    )
    .await;
    let event = create(
        &app,
        "/api/events",
        "EventID",
        json!({"Title": "The Sundering", "LocationID": location, "NationID": nation}),
    )
    .await;
    let history = create(
        &app,
        "/api/historyEntries",
        "HistoryID",
        json!({
            "Title": "Fall of Highspire",
            "NationID": nation,
            "CharacterID": character,
            "EventID": event,
            "LocationID": location,
            "ReligionID": religion,
        }),
    )
    .await;

    let data = body_json(get(&app, &format!("/api/historyEntries/{history}")).await).await["data"].clone();
    assert_eq!(data["NationID"], nation);
    assert_eq!(data["NationName"], "Valdoria");
    assert_eq!(data["CharacterName"], "Elandor");
    assert_eq!(data["EventTitle"], "The Sundering");
    assert_eq!(data["LocationName"], "Highspire");
    assert_eq!(data["ReligionName"], "The Old Flame");

    let nation_row = body_json(get(&app, &format!("/api/nations/{nation}")).await).await["data"].clone();
    assert_eq!(nation_row["MajorReligionName"], "The Old Flame");

    let events = list_data(&app, "/api/events").await;
    assert_eq!(events[0]["LocationName"], "Highspire");
    assert_eq!(events[0]["NationName"], "Valdoria");
}

#[sqlx::test]
async fn deleting_a_referenced_row_leaves_a_dangling_key(pool: PgPool) {
    let (app, _uploads) = build_test_app(pool);
    let nation = create(&app, "/api/nations", "NationID", json!({"Name": "Kethra"})).await;
    let character = create(&app, "/api/characters", "CharacterID", json!({"Name": "Mira", "NationID": nation})).await;

    assert_eq!(delete(&app, &format!("/api/nations/{nation}")).await.status(), StatusCode::OK);

    let data = body_json(get(&app, &format!("/api/characters/{character}")).await).await["data"].clone();
    assert_eq!(data["Name"], "Mira");
    assert_eq!(data["NationID"], nation);
    assert!(data["NationName"].is_null());

    let rows = list_data(&app, "/api/characters").await;
    assert_eq!(rows.len(), 1);
}

#[sqlx::test]
async fn reference_to_missing_row_is_a_store_error(pool: PgPool) {
    let (app, _uploads) = build_test_app(pool);

    let response = post_json(&app, "/api/historyEntries", json!({"Title": "Lost Chronicle", "NationID": 7})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "store_error");
    assert_eq!(json["error"]["message"], "internal failure");
    assert!(json["error"]["details"].as_str().unwrap().contains("NationID"));

    assert!(list_data(&app, "/api/historyEntries").await.is_empty());
}

#[sqlx::test]
async fn production_mode_hides_store_details(pool: PgPool) {
    let (app, _uploads) = build_production_app(pool);

    let response = post_json(&app, "/api/characters", json!({"Name": "Mira", "ReligionID": 99})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "store_error");
    assert_eq!(json["error"]["message"], "internal failure");
    assert!(json["error"].get("details").is_none());
}

#[sqlx::test]
async fn list_filters_on_writable_columns_only(pool: PgPool) {
    let (app, _uploads) = build_test_app(pool);
    create(&app, "/api/historyEntries", "HistoryID", json!({"Title": "Border Wars", "Category": "War", "SortOrder": 2})).await;
    create(&app, "/api/historyEntries", "HistoryID", json!({"Title": "Grain Pact", "Category": "Trade", "SortOrder": 1})).await;
    create(&app, "/api/historyEntries", "HistoryID", json!({"Title": "Siege of Vell", "Category": "War", "SortOrder": 1})).await;

    let rows = list_data(&app, "/api/historyEntries?Category=War&t=1700000000").await;
    assert_eq!(titles(&rows), vec!["Siege of Vell", "Border Wars"]);

    let rows = list_data(&app, "/api/historyEntries?limit=1").await;
    assert_eq!(rows.len(), 3);
}

#[sqlx::test]
async fn entries_without_sort_order_list_last(pool: PgPool) {
    let (app, _uploads) = build_test_app(pool);
    create(&app, "/api/historyEntries", "HistoryID", json!({"Title": "Unsorted"})).await;
    create(&app, "/api/historyEntries", "HistoryID", json!({"Title": "Sorted", "SortOrder": 5})).await;

    let rows = list_data(&app, "/api/historyEntries").await;
    assert_eq!(titles(&rows), vec!["Sorted", "Unsorted"]);
    assert!(rows[1]["SortOrder"].is_null());
}
