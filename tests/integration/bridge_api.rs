//! HTTP round-trip tests over the full service graph: repositories, domain
//! services and the actix route tree, with caller identities supplied the
//! way the gateway does in production.
use actix_web::{test, web, App};
use serde_json::{json, Value};

use bridge_relayer::{
    api,
    config::{BridgeConfigFile, BridgeSection},
    constants::CALLER_ID_HEADER,
    init::initialize_app_state,
    models::{AccountId, AppState, MessageId},
};

const ADMIN: &str = "0x00000000000000000000000000000000000000aa";
const OPERATOR: &str = "0x00000000000000000000000000000000000000bb";
const RELAYER: &str = "0x00000000000000000000000000000000000000cc";
const ENDPOINT: &str = "0x00000000000000000000000000000000000000dd";
const USER: &str = "0x0000000000000000000000000000000000000001";
const RECIPIENT: &str = "0x0000000000000000000000000000000000000002";

/// Default-config estimate for a zero-byte payload.
const FEE: u128 = 12_000_000_000_000_000;

fn test_config(withdrawal_delay_secs: u64) -> BridgeConfigFile {
    BridgeConfigFile {
        bridge: BridgeSection {
            withdrawal_delay_secs,
            drain_while_paused: true,
            admins: vec![ADMIN.parse().unwrap()],
            operators: vec![OPERATOR.parse().unwrap()],
            relayers: vec![RELAYER.parse().unwrap()],
            authorized_endpoints: vec![ENDPOINT.parse().unwrap()],
        },
    }
}

fn app_state(withdrawal_delay_secs: u64) -> web::ThinData<AppState> {
    initialize_app_state(&test_config(withdrawal_delay_secs)).expect("state must initialize")
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .service(web::scope("/api/v1").configure(api::routes::configure_routes)),
        )
        .await
    };
}

fn post(uri: &str, caller: &str, body: Value) -> actix_web::test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((CALLER_ID_HEADER, caller))
        .set_json(body)
}

macro_rules! credit {
    ($app:expr, $account:expr, $amount:expr) => {{
        let resp = test::call_service(
            &$app,
            post(
                "/api/v1/bridge/admin/credits",
                OPERATOR,
                json!({"account": $account, "amount": $amount}),
            )
            .to_request(),
        )
        .await;
        assert!(resp.status().is_success(), "credit must succeed");
    }};
}

fn complete_payload(operation_id: u64) -> String {
    let body = serde_json::to_vec(&json!({
        "selector": "complete_operation",
        "operation_id": operation_id,
    }))
    .unwrap();
    format!("0x{}", hex::encode(body))
}

fn message_id_for(operation_id: u64, sender: &str) -> String {
    let sender: AccountId = sender.parse().unwrap();
    MessageId::derive(operation_id, &sender).to_string()
}

#[actix_web::test]
async fn test_deposit_completes_through_relay_message() {
    let state = app_state(3600);
    let app = test_app!(state);

    credit!(app, USER, 1_000);

    // Initiate the deposit.
    let resp = test::call_service(
        &app,
        post(
            "/api/v1/bridge/deposits",
            USER,
            json!({"recipient": RECIPIENT, "amount": 100, "submission_fee": FEE}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["status"], "PROCESSING");

    // The relay submits the completion message.
    let resp = test::call_service(
        &app,
        post(
            "/api/v1/bridge/messages",
            RELAYER,
            json!({
                "message_id": message_id_for(1, USER),
                "source_endpoint": ENDPOINT,
                "payload": complete_payload(1),
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // The operation reached its terminal state.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/bridge/operations/1")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "COMPLETED");

    // Message registry reflects the consumption.
    let uri = format!("/api/v1/bridge/messages/{}", message_id_for(1, USER));
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["processed"], true);

    // Stats reflect the initiation.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/bridge/stats")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_operations"], 1);
    assert_eq!(body["data"]["total_volume"], 100);
    assert_eq!(body["data"]["unique_users"], 2);
}

#[actix_web::test]
async fn test_duplicate_message_conflicts() {
    let state = app_state(3600);
    let app = test_app!(state);
    credit!(app, USER, 1_000);

    test::call_service(
        &app,
        post(
            "/api/v1/bridge/deposits",
            USER,
            json!({"recipient": RECIPIENT, "amount": 100, "submission_fee": FEE}),
        )
        .to_request(),
    )
    .await;

    let message = json!({
        "message_id": message_id_for(1, USER),
        "source_endpoint": ENDPOINT,
        "payload": complete_payload(1),
    });

    let first = test::call_service(
        &app,
        post("/api/v1/bridge/messages", RELAYER, message.clone()).to_request(),
    )
    .await;
    assert_eq!(first.status(), 200);

    let second = test::call_service(
        &app,
        post("/api/v1/bridge/messages", RELAYER, message).to_request(),
    )
    .await;
    assert_eq!(second.status(), 409);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Message already processed");
}

#[actix_web::test]
async fn test_withdrawal_delay_round_trip() {
    let state = app_state(1);
    let app = test_app!(state);
    credit!(app, USER, 1_000);

    let withdrawal = json!({"recipient": RECIPIENT, "amount": 200, "submission_fee": FEE});
    let resp = test::call_service(
        &app,
        post("/api/v1/bridge/withdrawals", USER, withdrawal.clone()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);

    // Burned at initiation.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/bridge/accounts/{}/balance", USER))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["balance"], 800);

    // A second initiation inside the window is rate-limited.
    let resp = test::call_service(
        &app,
        post("/api/v1/bridge/withdrawals", USER, withdrawal).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Withdrawal delay not met");

    // Finalizing before the window elapses fails the same way.
    let resp = test::call_service(
        &app,
        post("/api/v1/bridge/withdrawals/1/finalize", USER, json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);

    tokio::time::sleep(std::time::Duration::from_millis(1_200)).await;

    let resp = test::call_service(
        &app,
        post("/api/v1/bridge/withdrawals/1/finalize", USER, json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "COMPLETED");

    // Finalize is exactly-once.
    let resp = test::call_service(
        &app,
        post("/api/v1/bridge/withdrawals/1/finalize", USER, json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_pause_blocks_initiations_but_drains_messages() {
    let state = app_state(3600);
    let app = test_app!(state);
    credit!(app, USER, 1_000);

    // Open a deposit before pausing.
    test::call_service(
        &app,
        post(
            "/api/v1/bridge/deposits",
            USER,
            json!({"recipient": RECIPIENT, "amount": 100, "submission_fee": FEE}),
        )
        .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        post("/api/v1/bridge/admin/pause", ADMIN, json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // New initiations are rejected.
    let resp = test::call_service(
        &app,
        post(
            "/api/v1/bridge/deposits",
            USER,
            json!({"recipient": RECIPIENT, "amount": 100, "submission_fee": FEE}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 503);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Bridge is paused");

    // The in-flight operation still drains to COMPLETED.
    let resp = test::call_service(
        &app,
        post(
            "/api/v1/bridge/messages",
            RELAYER,
            json!({
                "message_id": message_id_for(1, USER),
                "source_endpoint": ENDPOINT,
                "payload": complete_payload(1),
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        post("/api/v1/bridge/admin/unpause", ADMIN, json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_config_update_enforces_caps() {
    let state = app_state(3600);
    let app = test_app!(state);

    let valid = json!({
        "base_submission_cost": 20_000_000_000_000_000u64,
        "base_gas_limit": 150_000,
        "gas_limit_per_byte": 150,
        "max_retry_window_secs": 14 * 24 * 60 * 60,
        "submission_fee_multiplier": 150,
    });

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/bridge/configs/TOKEN_DEPOSIT")
            .insert_header((CALLER_ID_HEADER, OPERATOR))
            .set_json(valid.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/bridge/configs/TOKEN_DEPOSIT")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["submission_fee_multiplier"], 150);

    // Multiplier cap is 200.
    let mut too_high = valid.clone();
    too_high["submission_fee_multiplier"] = json!(201);
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/bridge/configs/TOKEN_DEPOSIT")
            .insert_header((CALLER_ID_HEADER, OPERATOR))
            .set_json(too_high)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Multiplier too high");

    // Retry window cap is 30 days.
    let mut too_long = valid.clone();
    too_long["max_retry_window_secs"] = json!(31 * 24 * 60 * 60);
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/bridge/configs/TOKEN_DEPOSIT")
            .insert_header((CALLER_ID_HEADER, OPERATOR))
            .set_json(too_long)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    // Role enforcement.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/bridge/configs/TOKEN_DEPOSIT")
            .insert_header((CALLER_ID_HEADER, USER))
            .set_json(valid)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn test_message_submission_authorization() {
    let state = app_state(3600);
    let app = test_app!(state);
    credit!(app, USER, 1_000);
    test::call_service(
        &app,
        post(
            "/api/v1/bridge/deposits",
            USER,
            json!({"recipient": RECIPIENT, "amount": 100, "submission_fee": FEE}),
        )
        .to_request(),
    )
    .await;

    // A non-relayer caller is forbidden.
    let resp = test::call_service(
        &app,
        post(
            "/api/v1/bridge/messages",
            USER,
            json!({
                "message_id": message_id_for(1, USER),
                "source_endpoint": ENDPOINT,
                "payload": complete_payload(1),
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    // An unknown source endpoint is rejected.
    let resp = test::call_service(
        &app,
        post(
            "/api/v1/bridge/messages",
            RELAYER,
            json!({
                "message_id": message_id_for(1, USER),
                "source_endpoint": USER,
                "payload": complete_payload(1),
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid message sender");

    // A request without a caller identity never reaches the domain.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/bridge/messages")
            .set_json(json!({
                "message_id": message_id_for(1, USER),
                "source_endpoint": ENDPOINT,
                "payload": complete_payload(1),
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_underpaid_deposit_rejected() {
    let state = app_state(3600);
    let app = test_app!(state);
    credit!(app, USER, 1_000);

    let resp = test::call_service(
        &app,
        post(
            "/api/v1/bridge/deposits",
            USER,
            json!({"recipient": RECIPIENT, "amount": 100, "submission_fee": FEE - 1}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    // Nothing escrowed, nothing recorded.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/bridge/stats")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_operations"], 0);
}

#[actix_web::test]
async fn test_emergency_withdraw_and_audit_trail() {
    let state = app_state(3600);
    let app = test_app!(state);
    credit!(app, USER, 1_000);

    test::call_service(
        &app,
        post(
            "/api/v1/bridge/deposits",
            USER,
            json!({"recipient": RECIPIENT, "amount": 800, "submission_fee": FEE}),
        )
        .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        post(
            "/api/v1/bridge/admin/emergency-withdrawals",
            ADMIN,
            json!({"to": RECIPIENT, "amount": 500}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/bridge/escrow")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["escrow_pool"], 300);

    // The drain shows up in the audit log as its own event kind.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/bridge/admin/audit?per_page=50")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let events: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["event"].as_str().unwrap())
        .collect();
    assert!(events.contains(&"emergency_withdrawal"));
    assert!(events.contains(&"operation_initiated"));
}
