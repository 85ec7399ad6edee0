#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` and `Auth` using wiremock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use edgectl_api::models::{LifecycleCommand, NewNode};
use edgectl_api::{
    ApiClient, Auth, Error, LOGIN_FAILED_MESSAGE, LoginOutcome, MemorySessionStore,
    OrchestrationMode, PolicyResource, SessionStore, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<ApiClient>) {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &server.uri(),
        TransportConfig::default(),
        Arc::new(MemorySessionStore::new()),
    )
    .unwrap();
    (server, Arc::new(client))
}

async fn setup_with_token(token: &str) -> (MockServer, Arc<ApiClient>) {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &server.uri(),
        TransportConfig::default(),
        Arc::new(MemorySessionStore::with_token(token)),
    )
    .unwrap();
    (server, Arc::new(client))
}

fn password(p: &str) -> SecretString {
    p.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_then_requests_carry_bearer() {
    let (server, client) = setup().await;
    let auth = Auth::new(Arc::clone(&client));

    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_json(json!({"username": "u", "password": "p"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nodes"))
        .and(header("Authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nodes": []})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!auth.is_authenticated());
    let outcome = auth.login("u", &password("p")).await;

    assert_eq!(outcome, LoginOutcome::Success);
    assert!(auth.is_authenticated());
    assert_eq!(client.session().token().as_deref(), Some("T"));

    let nodes = client.list_nodes().await.unwrap();
    assert!(nodes.is_empty());
}

#[tokio::test]
async fn test_login_failure_keeps_server_text() {
    let (server, client) = setup().await;
    let auth = Auth::new(Arc::clone(&client));

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid username or password"))
        .mount(&server)
        .await;

    let outcome = auth.login("u", &password("wrong")).await;

    assert_eq!(
        outcome,
        LoginOutcome::Failure {
            error_text: "invalid username or password".into()
        }
    );
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn test_login_without_token_is_generic_failure() {
    let (server, client) = setup().await;
    let auth = Auth::new(Arc::clone(&client));

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let outcome = auth.login("u", &password("p")).await;

    assert_eq!(
        outcome,
        LoginOutcome::Failure {
            error_text: LOGIN_FAILED_MESSAGE.into()
        }
    );
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn test_login_failure_without_body_is_generic() {
    let (server, client) = setup().await;
    let auth = Auth::new(Arc::clone(&client));

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let outcome = auth.login("u", &password("p")).await;
    assert!(
        matches!(&outcome, LoginOutcome::Failure { error_text } if error_text == LOGIN_FAILED_MESSAGE),
        "expected generic failure, got: {outcome:?}"
    );
}

#[tokio::test]
async fn test_logout_clears_token_and_calls_back_once() {
    let (server, client) = setup_with_token("T").await;
    let auth = Auth::new(Arc::clone(&client));

    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nodes": []})))
        .mount(&server)
        .await;

    let calls = AtomicUsize::new(0);
    auth.logout(|| {
        calls.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!auth.is_authenticated());

    // the rebuilt transport no longer sends the header
    client.list_nodes().await.unwrap();
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

// ── Interceptor tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_401_clears_session_and_redirects_to_login() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::with_token("stale"));
    let redirects: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&redirects);

    let client = ApiClient::new(&server.uri(), TransportConfig::default(), store.clone())
        .unwrap()
        .with_unauthorized_hook(Arc::new(move |route: &str| {
            sink.lock().unwrap().push(route.to_owned());
        }));

    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let result = client.list_apps().await;

    assert!(
        matches!(result, Err(Error::Unauthorized)),
        "expected Unauthorized, got: {result:?}"
    );
    assert_eq!(store.token(), None);
    assert_eq!(*redirects.lock().unwrap(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn test_401_from_mutation_also_redirects() {
    let server = MockServer::start().await;
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);

    let client = ApiClient::new(
        &server.uri(),
        TransportConfig::default(),
        Arc::new(MemorySessionStore::with_token("stale")),
    )
    .unwrap()
    .with_unauthorized_hook(Arc::new(move |_: &str| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    Mock::given(method("DELETE"))
        .and(path("/nodes/A/dns"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.delete_dns("A").await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_error_body_message_is_preserved() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("PATCH"))
        .and(path("/apps/a1"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "cores must be <= 8"})),
        )
        .mount(&server)
        .await;

    let app = edgectl_api::models::App {
        id: "a1".into(),
        cores: 64,
        ..Default::default()
    };
    let err = client.update_app(&app).await.unwrap_err();

    assert_eq!(err.server_message(), Some("cores must be <= 8"));
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn test_plain_text_error_body_is_preserved() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("GET"))
        .and(path("/nodes/A"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable\n"))
        .mount(&server)
        .await;

    let err = client.get_node("A").await.unwrap_err();
    assert!(
        matches!(&err, Error::Api { status: 500, message, .. } if message == "database unavailable"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client.list_nodes().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
    // The raw body stays on the error for debugging but out of its text.
    assert!(!err.to_string().contains("proxy"), "got: {err}");
    let Error::Deserialization { body, .. } = err else {
        unreachable!()
    };
    assert_eq!(body, "<html>proxy</html>");
}

#[tokio::test]
async fn test_timeout_maps_to_timeout_error() {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &server.uri(),
        TransportConfig::default().with_timeout(Duration::from_millis(200)),
        Arc::new(MemorySessionStore::new()),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"nodes": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client.list_nodes().await.unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }), "got: {err:?}");
}

// ── Controller resource tests ───────────────────────────────────────

#[tokio::test]
async fn test_list_nodes_parses_collection() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nodes": [{"id": "A", "name": "n1", "location": "L", "serial": "S"}]
        })))
        .mount(&server)
        .await;

    let nodes = client.list_nodes().await.unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].id, "A");
    assert_eq!(nodes[0].serial, "S");
}

#[tokio::test]
async fn test_create_node_posts_fields() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("POST"))
        .and(path("/nodes"))
        .and(body_json(json!({"name": "n1", "location": "L", "serial": "S"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "A"})))
        .expect(1)
        .mount(&server)
        .await;

    let node = NewNode {
        name: "n1".into(),
        location: "L".into(),
        serial: "S".into(),
    };
    client.create_node(&node).await.unwrap();
}

#[tokio::test]
async fn test_update_interfaces_wraps_list() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("PATCH"))
        .and(path("/nodes/A/interfaces"))
        .and(body_json(json!({"interfaces": [{
            "id": "if0",
            "description": "",
            "driver": "kernel",
            "type": "upstream",
            "mac_address": "",
            "vlan": 0,
            "zones": []
        }]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let iface = edgectl_api::models::Interface {
        id: "if0".into(),
        kind: edgectl_api::models::InterfaceType::Upstream,
        ..Default::default()
    };
    client.update_interfaces("A", &[iface]).await.unwrap();
}

#[tokio::test]
async fn test_missing_dns_config_is_none() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("GET"))
        .and(path("/nodes/A/dns"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert_eq!(client.get_dns("A").await.unwrap(), None);
}

#[tokio::test]
async fn test_node_app_command_body() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("PATCH"))
        .and(path("/nodes/A/apps/x"))
        .and(body_json(json!({"command": "restart"})))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    client
        .command_node_app("A", "x", LifecycleCommand::Restart)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_node_app_status_fills_missing_id() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("GET"))
        .and(path("/nodes/A/apps/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "running"})))
        .mount(&server)
        .await;

    let app = client.get_node_app("A", "x").await.unwrap();
    assert_eq!(app.id, "x");
    assert_eq!(app.status, edgectl_api::models::AppStatus::Running);
}

// ── Policy tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_resource_policy_404_means_unassigned() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("GET"))
        .and(path("/nodes/A/interfaces/if0/policy"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let assigned = client
        .get_resource_policy(OrchestrationMode::Native, "A", PolicyResource::Interface, "if0")
        .await
        .unwrap();
    assert_eq!(assigned, None);
}

#[tokio::test]
async fn test_remove_resource_policy_404_reports_nothing_removed() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("DELETE"))
        .and(path("/nodes/A/interfaces/if0/policy"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let removed = client
        .remove_resource_policy(OrchestrationMode::Native, "A", PolicyResource::Interface, "if0")
        .await
        .unwrap();
    assert!(!removed);
}

#[tokio::test]
async fn test_kube_ovn_policies_use_prefix() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("GET"))
        .and(path("/kube_ovn/policies/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "allow-web",
            "ingress_rules": [{"description": "web", "from": [{"cidr": "10.0.0.0/8", "except": []}], "ports": [{"port": 80, "protocol": "tcp"}]}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/nodes/A/apps/x/kube_ovn/policy"))
        .and(body_json(json!({"id": "p1"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let doc = client
        .get_policy(OrchestrationMode::KubernetesOvn, "p1")
        .await
        .unwrap();
    assert!(matches!(doc, edgectl_api::models::PolicyDocument::KubeOvn(_)));
    assert_eq!(doc.rule_count(), 1);

    client
        .assign_resource_policy(
            OrchestrationMode::KubernetesOvn,
            "A",
            PolicyResource::App,
            "x",
            "p1",
        )
        .await
        .unwrap();
}

// ── CUPS / CNCA tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_userplanes_bare_array() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("GET"))
        .and(path("/userplanes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "5", "uuid": "u-5", "function": "SGWU", "config": {"s1u": {"up_ip_address": "192.168.1.1"}}}
        ])))
        .mount(&server)
        .await;

    let ups = client.list_userplanes().await.unwrap();
    assert_eq!(ups.len(), 1);
    assert_eq!(
        ups[0].function,
        edgectl_api::models::cups::UserplaneFunction::Sgwu
    );
}

#[tokio::test]
async fn test_create_subscription_returns_location() {
    let (server, client) = setup_with_token("T").await;

    Mock::given(method("POST"))
        .and(path("/CNCA/1.0.1/subscriptions"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", "http://af/CNCA/1.0.1/subscriptions/11112"),
        )
        .mount(&server)
        .await;

    let sub = edgectl_api::models::Subscription {
        af_app_id: "app1".into(),
        ..Default::default()
    };
    let location = client.create_subscription(&sub).await.unwrap();
    assert_eq!(
        location.as_deref(),
        Some("http://af/CNCA/1.0.1/subscriptions/11112")
    );
}

#[tokio::test]
async fn test_base_url_path_is_kept() {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &format!("{}/api", server.uri()),
        TransportConfig::default(),
        Arc::new(MemorySessionStore::new()),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"apps": [{"id": "a"}]})))
        .mount(&server)
        .await;

    assert_eq!(client.list_apps().await.unwrap().len(), 1);
}
