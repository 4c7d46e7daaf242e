mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use common::{app, read_json};
use http_helpers::{empty_request, json_request};
use petstore::app::{AppState, build_router};
use petstore::model::{Owner, OwnerPatchRequest, Pet, PetPatchRequest};
use petstore::store::{RegistryStore, StoreError, StoreResult};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn owner_create_rejects_schema_violations() {
    let app = app();
    let cases = [
        serde_json::json!({ "first_name": "Ada", "last_name": "Lovelace" }),
        serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone": "+1-212-555-0199",
            "email": "not-an-email"
        }),
        serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone": "+1-212-555-0199",
            "birth_date": "10/12/1815"
        }),
        serde_json::json!({ "first_name": "", "last_name": "Lovelace", "phone": "1" }),
        serde_json::json!({ "first_name": 7, "last_name": "Lovelace", "phone": "1" }),
    ];
    for body in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/owners", body.clone()))
            .await
            .expect("create");
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "payload {body}"
        );
        let payload = read_json(response).await;
        assert_eq!(payload["code"], "validation_error");
    }

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/owners"))
        .await
        .expect("list");
    assert_eq!(read_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn malformed_json_and_missing_content_type_are_unprocessable() {
    let app = app();
    let broken = Request::builder()
        .method("POST")
        .uri("/owners")
        .header("content-type", "application/json")
        .body(Body::from("{\"first_name\":"))
        .expect("request");
    let response = app.clone().oneshot(broken).await.expect("broken");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let untyped = Request::builder()
        .method("POST")
        .uri("/owners")
        .body(Body::from(
            serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "phone": "+1-212-555-0199"
            })
            .to_string(),
        ))
        .expect("request");
    let response = app.clone().oneshot(untyped).await.expect("untyped");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn owner_create_accepts_optional_fields() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/owners",
            serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "phone": "+1-212-555-0199",
                "email": "ada@example.com",
                "birth_date": "1815-12-10"
            }),
        ))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json(response).await;
    assert_eq!(payload["email"], "ada@example.com");
    assert_eq!(payload["birth_date"], "1815-12-10");
}

#[tokio::test]
async fn pet_create_with_unknown_owner_is_bad_request() {
    let app = app();
    let req = json_request(
        "POST",
        "/pets",
        serde_json::json!({
            "owner_id": Uuid::new_v4(),
            "name": "Boba",
            "species": "Cat"
        }),
    );
    let response = app.clone().oneshot(req).await.expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json(response).await;
    assert_eq!(payload["code"], "invalid_reference");
    assert_eq!(payload["message"], "owner_id does not exist");

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/pets"))
        .await
        .expect("list");
    assert_eq!(read_json(response).await, serde_json::json!([]));

    let req = json_request(
        "POST",
        "/pets",
        serde_json::json!({ "owner_id": "nope", "name": "Boba", "species": "Cat" }),
    );
    let response = app.clone().oneshot(req).await.expect("bad uuid");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let app = app();
    let missing = Uuid::new_v4();
    let requests = [
        empty_request("GET", &format!("/owners/{missing}")),
        json_request(
            "PATCH",
            &format!("/owners/{missing}"),
            serde_json::json!({ "first_name": "Ada" }),
        ),
        empty_request("DELETE", &format!("/owners/{missing}")),
        empty_request("GET", &format!("/pets/{missing}")),
        json_request(
            "PATCH",
            &format!("/pets/{missing}"),
            serde_json::json!({ "name": "Boba" }),
        ),
        empty_request("DELETE", &format!("/pets/{missing}")),
    ];
    for req in requests {
        let label = format!("{} {}", req.method(), req.uri());
        let response = app.clone().oneshot(req).await.expect("request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{label}");
        let payload = read_json(response).await;
        assert_eq!(payload["code"], "not_found");
    }
}

#[tokio::test]
async fn malformed_path_ids_are_unprocessable() {
    let app = app();
    for uri in ["/owners/not-a-uuid", "/pets/1234"] {
        let response = app
            .clone()
            .oneshot(empty_request("GET", uri))
            .await
            .expect("get");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}

#[tokio::test]
async fn patch_rejects_invalid_email_and_clears_on_null() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/owners",
            serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "phone": "+1-212-555-0199",
                "email": "ada@example.com"
            }),
        ))
        .await
        .expect("create");
    let owner = read_json(response).await;
    let uri = format!("/owners/{}", owner["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &uri,
            serde_json::json!({ "email": "broken" }),
        ))
        .await
        .expect("patch");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(json_request("PATCH", &uri, serde_json::json!({ "email": null })))
        .await
        .expect("patch");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert!(updated["email"].is_null());
    assert_eq!(updated["last_name"], "Lovelace");
}

#[tokio::test]
async fn pet_patch_may_introduce_dangling_owner() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/owners",
            serde_json::json!({ "first_name": "Ada", "last_name": "Lovelace", "phone": "1" }),
        ))
        .await
        .expect("owner");
    let owner = read_json(response).await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/pets",
            serde_json::json!({ "owner_id": owner["id"], "name": "Boba", "species": "Cat" }),
        ))
        .await
        .expect("pet");
    let pet = read_json(response).await;

    let dangling = Uuid::new_v4();
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/pets/{}", pet["id"].as_str().unwrap()),
            serde_json::json!({ "owner_id": dangling }),
        ))
        .await
        .expect("patch");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["owner_id"], dangling.to_string());
}

struct FailingStore;

fn boom<T>() -> StoreResult<T> {
    Err(StoreError::Unexpected(anyhow::anyhow!("fail")))
}

#[async_trait]
impl RegistryStore for FailingStore {
    async fn list_owners(&self) -> StoreResult<Vec<Owner>> {
        boom()
    }

    async fn get_owner(&self, _id: Uuid) -> StoreResult<Owner> {
        boom()
    }

    async fn create_owner(&self, _owner: Owner) -> StoreResult<Owner> {
        boom()
    }

    async fn patch_owner(
        &self,
        _id: Uuid,
        _patch: OwnerPatchRequest,
        _now: DateTime<Utc>,
    ) -> StoreResult<Owner> {
        boom()
    }

    async fn delete_owner(&self, _id: Uuid) -> StoreResult<()> {
        boom()
    }

    async fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        boom()
    }

    async fn list_pets_for_owner(&self, _owner_id: Uuid) -> StoreResult<Vec<Pet>> {
        boom()
    }

    async fn get_pet(&self, _id: Uuid) -> StoreResult<Pet> {
        boom()
    }

    async fn create_pet(&self, _pet: Pet) -> StoreResult<Pet> {
        boom()
    }

    async fn patch_pet(
        &self,
        _id: Uuid,
        _patch: PetPatchRequest,
        _now: DateTime<Utc>,
    ) -> StoreResult<Pet> {
        boom()
    }

    async fn delete_pet(&self, _id: Uuid) -> StoreResult<()> {
        boom()
    }

    async fn health_check(&self) -> StoreResult<()> {
        boom()
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

#[tokio::test]
async fn store_failures_map_to_internal_errors() {
    let app = build_router(AppState::new(Arc::new(FailingStore))).into_service();
    let id = Uuid::new_v4();
    let requests = [
        empty_request("GET", "/owners"),
        empty_request("GET", &format!("/owners/{id}")),
        json_request(
            "POST",
            "/owners",
            serde_json::json!({ "first_name": "Ada", "last_name": "Lovelace", "phone": "1" }),
        ),
        empty_request("DELETE", &format!("/owners/{id}")),
        empty_request("GET", "/pets"),
        json_request(
            "POST",
            "/pets",
            serde_json::json!({ "owner_id": id, "name": "Boba", "species": "Cat" }),
        ),
        json_request("PATCH", &format!("/pets/{id}"), serde_json::json!({})),
    ];
    for req in requests {
        let label = format!("{} {}", req.method(), req.uri());
        let response = app.clone().oneshot(req).await.expect("request");
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{label}"
        );
        let payload = read_json(response).await;
        assert_eq!(payload["code"], "internal");
        assert!(payload["message"].as_str().unwrap().starts_with("failed to"));
    }

    // Health does not depend on the store.
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/health"))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::OK);
}
