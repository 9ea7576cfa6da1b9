use axum::body::Body;
use axum::http::Request;
use axum::Router;
use hotel_api::build;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    build().unwrap().router()
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let res = router.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status().as_u16();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(router: &Router, resource: &str, body: Value) -> Value {
    let (status, created) = send(router, "POST", &format!("/api/{resource}"), Some(body)).await;
    assert_eq!(status, 201, "creating {resource}: {created}");
    created
}

fn id(v: &Value) -> String {
    v["id"].as_str().unwrap().to_string()
}

/// roomType, bedType and roomStatus rows plus a room using them.
async fn seed_room(router: &Router, room_number: i32) -> (Value, Value) {
    let room_type = create(router, "roomType", json!({"type": "Deluxe", "description": "Sea view"})).await;
    let bed_type = create(router, "bedType", json!({"type": "King", "description": "180cm"})).await;
    let status = create(router, "roomStatus", json!({"status": "Clean"})).await;

    let room = create(
        router,
        "room",
        json!({
            "roomNumber": room_number,
            "floor": 1,
            "price": 120.5,
            "roomTypeId": id(&room_type),
            "bedTypeId": id(&bed_type),
            "statusId": id(&status),
        }),
    )
    .await;

    (room_type, room)
}

#[tokio::test]
async fn health_ok() {
    let router = router();

    let res = router
        .oneshot(Request::builder().method("GET").uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert!(res.headers().get("x-request-id").is_some());
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), "ok");
}

#[tokio::test]
async fn room_type_create_then_get() {
    let router = router();

    let created = create(&router, "roomType", json!({"type": "Deluxe", "description": "Sea view"})).await;
    assert_eq!(created["type"], "Deluxe");
    assert_eq!(created["description"], "Sea view");
    let new_id = id(&created);
    assert!(!new_id.is_empty());

    let (status, fetched) = send(&router, "GET", &format!("/api/roomType?id={new_id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);

    let (_, all) = send(&router, "GET", "/api/roomType", None).await;
    assert_eq!(all, json!([created]));
}

#[tokio::test]
async fn every_resource_rejects_missing_fields() {
    let router = router();

    for (resource, label) in [
        ("bedType", "BedType"),
        ("booking", "Booking"),
        ("customer", "Customer"),
        ("deal", "Deal"),
        ("payment", "Payment"),
        ("room", "Room"),
        ("roomStatus", "RoomStatus"),
        ("roomType", "RoomType"),
    ] {
        let (status, body) = send(&router, "POST", &format!("/api/{resource}"), Some(json!({}))).await;
        assert_eq!(status, 400, "{resource}");
        assert_eq!(body["message"], format!("Error Creating {label}"));
        assert!(body["error"].as_str().unwrap().contains("is required"), "{resource}: {body}");
    }
}

#[tokio::test]
async fn validation_reports_each_missing_field() {
    let router = router();

    let (status, body) = send(&router, "POST", "/api/roomType", Some(json!({"type": "Suite"}))).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "description is required", "message": "Error Creating RoomType"}));

    let (status, body) = send(&router, "POST", "/api/roomStatus", Some(json!({"status": ""}))).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "status must not be empty");

    let (status, body) = send(
        &router,
        "POST",
        "/api/customer",
        Some(json!({"firstName": "Ada", "lastName": "Lovelace", "email": "not-an-email", "phone": "1"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "email must be a valid email");
}

#[tokio::test]
async fn wrong_json_types_are_bad_requests() {
    let router = router();

    let (status, body) = send(
        &router,
        "POST",
        "/api/deal",
        Some(json!({"dealName": "Summer", "price": "cheap", "startDate": "2025-06-01T00:00:00Z", "endDate": "2025-08-31T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Error Creating Deal");

    let (status, _) = send(
        &router,
        "POST",
        "/api/deal",
        Some(json!({"dealName": "Summer", "price": 10, "startDate": "june", "endDate": "2025-08-31T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn get_unknown_id_returns_null() {
    let router = router();

    let (status, body) = send(&router, "GET", "/api/booking?id=does-not-exist", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn put_and_delete_require_an_id() {
    let router = router();

    let (status, body) = send(&router, "PUT", "/api/roomType", Some(json!({"type": "Suite", "description": "x"}))).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "ID is required for updating", "message": "Error Updating RoomType"}));

    let (status, body) = send(&router, "DELETE", "/api/payment", Some(json!({}))).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "ID is required for deletion", "message": "Error Deleting Payment"}));
}

#[tokio::test]
async fn delete_missing_room_is_500_with_store_message() {
    let router = router();

    let (status, body) = send(&router, "DELETE", "/api/room", Some(json!({"id": "x"}))).await;
    assert_eq!(status, 500);
    assert_eq!(body["message"], "Error Deleting Room");
    assert_eq!(body["error"], "Record to delete does not exist: no `room` with id `x`");
}

#[tokio::test]
async fn put_replaces_the_whole_record() {
    let router = router();
    let (_, room) = seed_room(&router, 101).await;
    assert_eq!(room["isAvailable"], true);

    let mut replacement = room.clone();
    replacement["price"] = json!(99.0);
    replacement["isAvailable"] = json!(false);

    let (status, updated) = send(&router, "PUT", "/api/room", Some(replacement.clone())).await;
    assert_eq!(status, 200);
    assert_eq!(updated, replacement);

    let (_, fetched) = send(&router, "GET", &format!("/api/room?id={}", id(&room)), None).await;
    assert_eq!(fetched, replacement);

    let (status, body) = send(&router, "PUT", "/api/room", Some(json!({"id": id(&room), "floor": 3}))).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Error Updating Room");
}

#[tokio::test]
async fn put_resets_omitted_optional_fields() {
    let router = router();
    let (room_type, room) = seed_room(&router, 102).await;

    let mut unavailable = room.clone();
    unavailable["isAvailable"] = json!(false);
    let (status, _) = send(&router, "PUT", "/api/room", Some(unavailable)).await;
    assert_eq!(status, 200);

    let mut without_flag = room.clone();
    without_flag.as_object_mut().unwrap().remove("isAvailable");
    let (status, updated) = send(&router, "PUT", "/api/room", Some(without_flag)).await;
    assert_eq!(status, 200);
    assert_eq!(updated["isAvailable"], true);

    let deal = create(
        &router,
        "deal",
        json!({
            "dealName": "Winter",
            "price": 150.0,
            "startDate": "2025-12-01T00:00:00Z",
            "endDate": "2026-02-28T00:00:00Z",
            "discount": 15.0,
            "tags": ["ski"],
            "roomTypeIds": [id(&room_type)],
        }),
    )
    .await;

    let (status, updated) = send(
        &router,
        "PUT",
        "/api/deal",
        Some(json!({
            "id": id(&deal),
            "dealName": "Winter",
            "price": 140.0,
            "startDate": "2025-12-01T00:00:00Z",
            "endDate": "2026-02-28T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["tags"], json!([]));
    assert_eq!(updated["roomTypeIds"], json!([]));
    assert_eq!(updated["discount"], Value::Null);

    let (_, fetched) = send(&router, "GET", &format!("/api/deal?id={}", id(&deal)), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn put_of_unknown_id_is_500() {
    let router = router();

    let (status, body) = send(
        &router,
        "PUT",
        "/api/roomStatus",
        Some(json!({"id": "missing", "status": "Dirty"})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["message"], "Error Updating RoomStatus");
}

#[tokio::test]
async fn delete_returns_confirmation() {
    let router = router();
    let status_row = create(&router, "roomStatus", json!({"status": "Maintenance"})).await;

    let (status, body) = send(&router, "DELETE", "/api/roomStatus", Some(json!({"id": id(&status_row)}))).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "RoomStatus deleted successfully", "id": id(&status_row)}));

    let (_, all) = send(&router, "GET", "/api/roomStatus", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn room_with_missing_room_type_is_a_foreign_key_error() {
    let router = router();
    let bed_type = create(&router, "bedType", json!({"type": "Twin", "description": "2x90cm"})).await;
    let status_row = create(&router, "roomStatus", json!({"status": "Clean"})).await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/room",
        Some(json!({
            "roomNumber": 5,
            "floor": 0,
            "price": 80,
            "roomTypeId": "nope",
            "bedTypeId": id(&bed_type),
            "statusId": id(&status_row),
        })),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["message"], "Error Creating Room");
    assert_eq!(body["error"], "Foreign key constraint failed on the field: `room.roomTypeId`");
}

#[tokio::test]
async fn room_type_in_use_cannot_be_deleted() {
    let router = router();
    let (room_type, _) = seed_room(&router, 202).await;

    let (status, body) = send(&router, "DELETE", "/api/roomType", Some(json!({"id": id(&room_type)}))).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Foreign key constraint failed on the field: `room.roomTypeId`");
}

#[tokio::test]
async fn duplicate_room_number_is_rejected() {
    let router = router();
    let (room_type, room) = seed_room(&router, 303).await;

    let mut dup = room.clone();
    dup.as_object_mut().unwrap().remove("id");
    dup["roomTypeId"] = room_type["id"].clone();

    let (status, body) = send(&router, "POST", "/api/room", Some(dup)).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Unique constraint failed on the field: `room.roomNumber`");
}

#[tokio::test]
async fn deleting_a_room_type_disconnects_it_from_deals() {
    let router = router();
    let suite = create(&router, "roomType", json!({"type": "Suite", "description": "Top floor"})).await;
    let single = create(&router, "roomType", json!({"type": "Single", "description": "Courtyard"})).await;

    let deal = create(
        &router,
        "deal",
        json!({
            "dealName": "Summer",
            "price": 199.0,
            "startDate": "2025-06-01T00:00:00Z",
            "endDate": "2025-08-31T00:00:00Z",
            "roomTypeIds": [id(&suite), id(&single)],
        }),
    )
    .await;
    assert_eq!(deal["tags"], json!([]));
    assert_eq!(deal["discount"], Value::Null);

    let (status, _) = send(&router, "DELETE", "/api/roomType", Some(json!({"id": id(&suite)}))).await;
    assert_eq!(status, 200);

    let (_, deal) = send(&router, "GET", &format!("/api/deal?id={}", id(&deal)), None).await;
    assert_eq!(deal["roomTypeIds"], json!([id(&single)]));
}

#[tokio::test]
async fn rooms_can_be_listed_by_room_type() {
    let router = router();
    let (room_type, room) = seed_room(&router, 1).await;
    let _ = seed_room(&router, 2).await;

    let (_, all) = send(&router, "GET", "/api/room", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, filtered) = send(&router, "GET", &format!("/api/room?roomTypeId={}", id(&room_type)), None).await;
    assert_eq!(status, 200);
    assert_eq!(filtered, json!([room]));
}

#[tokio::test]
async fn booking_and_payment_chain() {
    let router = router();
    let (_, room) = seed_room(&router, 404).await;
    let customer = create(
        &router,
        "customer",
        json!({"firstName": "Grace", "lastName": "Hopper", "email": "grace@example.com", "phone": "+1 555 0100"}),
    )
    .await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/customer",
        Some(json!({"firstName": "G", "lastName": "H", "email": "grace@example.com", "phone": "0"})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Unique constraint failed on the field: `customer.email`");

    let booking = create(
        &router,
        "booking",
        json!({
            "customerId": id(&customer),
            "roomId": id(&room),
            "checkInDate": "2025-03-01T14:00:00Z",
            "checkOutDate": "2025-03-04T11:00:00Z",
            "totalPrice": 361.5,
        }),
    )
    .await;
    assert_eq!(booking["checkInDate"], "2025-03-01T14:00:00Z");

    let payment = create(
        &router,
        "payment",
        json!({
            "amount": 361.5,
            "paymentDate": "2025-03-01T14:05:00Z",
            "status": "Completed",
            "bookingId": id(&booking),
        }),
    )
    .await;

    let (status, _) = send(&router, "DELETE", "/api/booking", Some(json!({"id": id(&booking)}))).await;
    assert_eq!(status, 500);

    let (status, _) = send(&router, "DELETE", &format!("/api/payment?id={}", id(&payment)), None).await;
    assert_eq!(status, 200);

    let (status, _) = send(&router, "DELETE", "/api/booking", Some(json!({"id": id(&booking)}))).await;
    assert_eq!(status, 200);
}
