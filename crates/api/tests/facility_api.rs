//! HTTP-level integration tests for the `/facilities` endpoints.
//!
//! Covers the read/write view split, species resolution by scientific name,
//! and atomicity of create/update with species associations.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_family, create_species, delete, get, patch_json, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn facility_body(name: &str, scientific_names: Option<Vec<&str>>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "name": name,
        "city": "Madrid",
        "country": "Spain",
        "area_sq_m": 200000,
        "annual_budget": "1500000.50",
    });
    if let Some(names) = scientific_names {
        body["scientific_names"] = serde_json::json!(names);
    }
    body
}

/// Seed Felidos/Tigre and return the species id.
async fn seed_tigre(pool: &PgPool) -> i64 {
    let felidos = create_family(pool, "Felidos").await;
    create_species(pool, "Tigre", "Panthera tigris", felidos, true).await
}

async fn create_facility(pool: &PgPool, body: serde_json::Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/facilities", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn facility_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM facilities")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn read_view(pool: &PgPool, id: i64) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/facilities/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_name_fails_atomically(pool: PgPool) {
    seed_tigre(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/facilities",
        facility_body(
            "Zoo de Madrid",
            Some(vec!["Panthera tigris", "Panthera tigris", "Nonexistent sp."]),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "scientific_names");
    assert_eq!(json["invalid"], serde_json::json!(["Nonexistent sp."]));

    assert_eq!(facility_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_names_are_reported_in_request_order(pool: PgPool) {
    seed_tigre(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/facilities",
        facility_body(
            "Zoo de Madrid",
            Some(vec!["Zeta sp.", "Panthera tigris", "Alpha sp."]),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["invalid"], serde_json::json!(["Zeta sp.", "Alpha sp."]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_missing_name_is_reported_each_time(pool: PgPool) {
    seed_tigre(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/facilities",
        facility_body("Zoo de Madrid", Some(vec!["X", "Panthera tigris", "X"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["invalid"], serde_json::json!(["X", "X"]));
    assert_eq!(facility_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_write_view_with_species(pool: PgPool) {
    let tigre = seed_tigre(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/facilities",
        facility_body("Zoo de Madrid", Some(vec!["  Panthera tigris ", "", "Panthera tigris"])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Zoo de Madrid");
    let species = json["species"].as_array().unwrap();
    assert_eq!(species.len(), 1);
    assert_eq!(species[0]["id"], tigre);
    assert_eq!(species[0]["common_name"], "Tigre");
    assert_eq!(species[0]["family"]["name"], "Felidos");
    // Aggregates belong to the read view only.
    assert!(json.get("species_count").is_none());
    assert!(json.get("scientific_names").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_read_view_groups_species_by_family(pool: PgPool) {
    seed_tigre(&pool).await;
    let id = create_facility(
        &pool,
        facility_body("Zoo de Madrid", Some(vec!["Panthera tigris"])),
    )
    .await;

    let json = read_view(&pool, id).await;
    assert_eq!(json["species_count"], 1);
    assert_eq!(
        json["species_by_family"],
        serde_json::json!({"Felidos": ["Tigre"]})
    );
    assert!(json.get("species").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_read_view_scalars_match_write_payload(pool: PgPool) {
    let id = create_facility(&pool, facility_body("Bioparc", None)).await;

    let json = read_view(&pool, id).await;
    assert_eq!(json["name"], "Bioparc");
    assert_eq!(json["city"], "Madrid");
    assert_eq!(json["country"], "Spain");
    assert_eq!(json["area_sq_m"], 200000);
    assert_eq!(json["annual_budget"], "1500000.50");
    assert_eq!(json["species_count"], 0);
    assert_eq!(json["species_by_family"], serde_json::json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_required_field_names_the_field(pool: PgPool) {
    let mut body = facility_body("Bioparc", None);
    body.as_object_mut().unwrap().remove("name");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/facilities", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "name");
    assert_eq!(facility_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_bad_scalars(pool: PgPool) {
    let mut body = facility_body("Bioparc", None);
    body["area_sq_m"] = serde_json::json!(-1);
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/facilities", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "area_sq_m");

    let mut body = facility_body("Bioparc", None);
    body["annual_budget"] = serde_json::json!("10.125");
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/facilities", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "annual_budget");

    assert_eq!(facility_count(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_uses_read_view(pool: PgPool) {
    seed_tigre(&pool).await;
    create_facility(&pool, facility_body("Zoo B", Some(vec!["Panthera tigris"]))).await;
    create_facility(&pool, facility_body("Zoo A", None)).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/facilities").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Zoo A");
    assert_eq!(rows[0]["species_count"], 0);
    assert_eq!(rows[1]["name"], "Zoo B");
    assert_eq!(rows[1]["species_count"], 1);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_without_names_keeps_species(pool: PgPool) {
    seed_tigre(&pool).await;
    let id = create_facility(
        &pool,
        facility_body("Zoo de Madrid", Some(vec!["Panthera tigris"])),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/facilities/{id}"),
        facility_body("Zoo Aquarium de Madrid", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Zoo Aquarium de Madrid");
    assert_eq!(json["species"].as_array().unwrap().len(), 1);

    let json = read_view(&pool, id).await;
    assert_eq!(json["species_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_empty_names_clears_species(pool: PgPool) {
    seed_tigre(&pool).await;
    let id = create_facility(
        &pool,
        facility_body("Zoo de Madrid", Some(vec!["Panthera tigris"])),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/facilities/{id}"),
        serde_json::json!({"scientific_names": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["species"], serde_json::json!([]));

    let json = read_view(&pool, id).await;
    assert_eq!(json["species_count"], 0);
    assert_eq!(json["species_by_family"], serde_json::json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_update_leaves_facility_unchanged(pool: PgPool) {
    seed_tigre(&pool).await;
    let id = create_facility(
        &pool,
        facility_body("Zoo de Madrid", Some(vec!["Panthera tigris"])),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/facilities/{id}"),
        serde_json::json!({"name": "Renamed", "scientific_names": ["Nonexistent sp."]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_view(&pool, id).await;
    assert_eq!(json["name"], "Zoo de Madrid");
    assert_eq!(json["species_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_updates_only_given_fields(pool: PgPool) {
    let id = create_facility(&pool, facility_body("Bioparc", None)).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/facilities/{id}"),
        serde_json::json!({"city": "Valencia", "annual_budget": "99.9"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_view(&pool, id).await;
    assert_eq!(json["name"], "Bioparc");
    assert_eq!(json["city"], "Valencia");
    assert_eq!(json["annual_budget"], "99.90");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_requires_every_scalar(pool: PgPool) {
    let id = create_facility(&pool, facility_body("Bioparc", None)).await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/facilities/{id}"),
        serde_json::json!({"name": "Only a name"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_facility_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        "/api/v1/facilities/999999",
        serde_json::json!({"name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_facility_keeps_species(pool: PgPool) {
    let tigre = seed_tigre(&pool).await;
    let id = create_facility(
        &pool,
        facility_body("Zoo de Madrid", Some(vec!["Panthera tigris"])),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/facilities/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/facilities/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/species/{tigre}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
