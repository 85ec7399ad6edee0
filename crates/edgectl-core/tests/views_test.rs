#![allow(clippy::unwrap_used)]
// View-level integration tests against a wiremock controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use edgectl_core::models::cnca::Pfd;
use edgectl_core::models::{
    App, AppStatus, AppType, Interface, InterfaceDriver, InterfaceType, LifecycleCommand, NewNode,
    PfdData, PolicyDocument, TrafficPolicy,
};
use edgectl_core::{
    ApiClient, AppView, AppsView, Console, ConsoleConfig, DnsView, InterfacesView,
    MemorySessionStore, NODES_LOAD_ERROR, NfdView, NodeAppsView, NodesView, OrchestrationMode,
    Outcome, PfdView, PoliciesView, PolicyControls, PolicyEditView, PolicyResource, Route,
    SessionStore, SubscriptionsView, TRY_AGAIN_LATER, UnauthorizedHook, UserplanesView, ViewState,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<ApiClient>) {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &server.uri(),
        edgectl_api::TransportConfig::default(),
        Arc::new(MemorySessionStore::with_token("T")),
    )
    .unwrap();
    (server, Arc::new(client))
}

fn sample_app() -> App {
    App {
        kind: AppType::Container,
        name: "nginx".into(),
        version: "1.0".into(),
        vendor: "acme".into(),
        cores: 2,
        memory: 512,
        source: "http://images/nginx.tar.gz".into(),
        ..App::default()
    }
}

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Exactly one error toast, ending with the generic suffix.
fn assert_single_error(outcome: &Outcome) {
    assert!(!outcome.is_ok());
    assert_eq!(outcome.notifications.len(), 1);
    let errors: Vec<_> = outcome.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].message.ends_with(TRY_AGAIN_LATER),
        "{}",
        errors[0].message
    );
}

// ── Nodes ───────────────────────────────────────────────────────────

#[tokio::test]
async fn nodes_view_loads_rows() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nodes": [{"id": "n1", "name": "A", "location": "lab", "serial": "S1"}]
        })))
        .mount(&server)
        .await;

    let mut view = NodesView::new(client);
    assert!(view.state().is_loading());

    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert!(outcome.notifications.is_empty());
    assert_eq!(view.nodes().len(), 1);
    assert_eq!(view.nodes()[0].name, "A");
}

#[tokio::test]
async fn nodes_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut view = NodesView::new(client);
    let outcome = view.load().await;

    assert!(view.state().is_loaded());
    assert!(view.state().has_error());
    assert!(view.nodes().is_empty());
    let errors: Vec<_> = outcome.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, NODES_LOAD_ERROR);
}

#[tokio::test]
async fn add_node_toasts_serial_and_reloads() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/nodes"))
        .and(body_json(json!({"name": "edge", "location": "lab", "serial": "XYZ"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nodes": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = NodesView::new(client);
    let outcome = view
        .add(&NewNode {
            name: "edge".into(),
            location: "lab".into(),
            serial: "XYZ".into(),
        })
        .await;

    assert!(outcome.is_ok());
    assert_eq!(
        outcome.notifications[0].message,
        "Successfully added edge node XYZ."
    );
}

#[tokio::test]
async fn add_node_rejects_missing_serial_without_a_request() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = NodesView::new(client);
    let outcome = view
        .add(&NewNode {
            name: "edge".into(),
            location: "lab".into(),
            serial: String::new(),
        })
        .await;

    assert!(!outcome.is_ok());
    assert_eq!(outcome.notifications[0].message, "serial: is required");
}

// ── Session expiry ──────────────────────────────────────────────────

#[tokio::test]
async fn unauthorized_load_redirects_to_login_without_toast() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = Arc::clone(client.session());
    let mut view = AppsView::new(client);
    let outcome = view.load().await;

    assert!(outcome.notifications.is_empty());
    assert_eq!(outcome.redirect, Some(Route::Login));
    assert!(session.token().is_none());
    assert!(view.state().has_error());
}

// ── Policy controls ─────────────────────────────────────────────────

#[tokio::test]
async fn missing_policy_loads_silently_as_add() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/nodes/A/interfaces/I/policy"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut controls = PolicyControls::new(
        client,
        OrchestrationMode::Native,
        "A",
        PolicyResource::Interface,
        "I",
    );
    let outcome = controls.load().await;

    assert!(outcome.notifications.is_empty());
    assert_eq!(controls.policy_id(), None);
    assert_eq!(controls.label(), "Add");
    assert!(!controls.can_remove());
}

#[tokio::test]
async fn delete_404_clears_policy_without_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/nodes/A/interfaces/I/policy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/nodes/A/interfaces/I/policy"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut controls = PolicyControls::new(
        client,
        OrchestrationMode::Native,
        "A",
        PolicyResource::Interface,
        "I",
    );
    controls.load().await;
    assert_eq!(controls.label(), "Edit");

    let outcome = controls.remove().await;

    assert!(outcome.is_ok());
    assert_eq!(outcome.errors().count(), 0);
    assert_eq!(controls.label(), "Add");
}

#[tokio::test]
async fn policy_load_error_names_the_resource() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/nodes/A/apps/X/policy"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controls =
        PolicyControls::new(client, OrchestrationMode::Native, "A", PolicyResource::App, "X");
    let outcome = controls.load().await;

    let message = &outcome.notifications[0].message;
    assert!(message.starts_with("Error fetching Node app Policy: "), "{message}");
    assert!(message.ends_with("Please try again later."), "{message}");
}

// ── Node apps ───────────────────────────────────────────────────────

#[tokio::test]
async fn node_apps_join_catalog_and_degrade_failed_status() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apps": [
                {"id": "a1", "name": "nginx", "version": "1.0", "vendor": "acme"},
                {"id": "a2", "name": "redis", "version": "7", "vendor": "acme"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nodes/N/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apps": [{"id": "a1"}, {"id": "a2"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"policies": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nodes/N/apps/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "running"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nodes/N/apps/a2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut view = NodeAppsView::new(client, OrchestrationMode::Native, "N");
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    let rows = view.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "nginx");
    assert_eq!(rows[0].status, AppStatus::Running);
    assert_eq!(rows[1].name, "redis");
    assert_eq!(rows[1].status, AppStatus::Unknown);
}

#[tokio::test]
async fn node_app_command_refreshes_status() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/nodes/N/apps/a1"))
        .and(body_json(json!({"command": "stop"})))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nodes/N/apps/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "stopped"})))
        .mount(&server)
        .await;

    let mut view = NodeAppsView::new(client, OrchestrationMode::Native, "N");
    let outcome = view.command("a1", LifecycleCommand::Stop).await;

    assert!(outcome.is_ok());
    assert_eq!(
        outcome.notifications[0].message,
        "Application stop was successful"
    );
}

// ── Interfaces ──────────────────────────────────────────────────────

#[tokio::test]
async fn staged_interface_keeps_read_only_fields_until_commit() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/nodes/N/interfaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "interfaces": [{
                "id": "if0", "description": "", "driver": "kernel", "type": "none",
                "mac_address": "aa:bb:cc:dd:ee:ff", "vlan": 7, "zones": []
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/nodes/N/interfaces"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = InterfacesView::new(client, "N");
    view.load().await;

    let mut edited: Interface = view.interfaces()[0].clone();
    edited.description = "uplink".into();
    edited.mac_address = "00:00:00:00:00:00".into();
    edited.vlan = 99;

    let staged = view.stage(edited);
    assert!(staged.is_ok());
    assert!(view.is_dirty());
    assert_eq!(view.interfaces()[0].description, "uplink");
    assert_eq!(view.interfaces()[0].mac_address, "aa:bb:cc:dd:ee:ff");
    assert_eq!(view.interfaces()[0].vlan, 7);

    let committed = view.commit().await;
    assert_eq!(
        committed.notifications[0].message,
        "Successfully updated node interfaces"
    );
    assert!(!view.is_dirty());
}

// ── Apps ────────────────────────────────────────────────────────────

#[tokio::test]
async fn app_save_rejects_out_of_range_cores() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = AppView::new(client, "a1");
    let outcome = view
        .save(App {
            cores: 12,
            ..sample_app()
        })
        .await;

    assert!(!outcome.is_ok());
    assert_eq!(outcome.notifications[0].message, "cores: must be at most 8");
}

#[tokio::test]
async fn app_save_patches_with_pinned_id() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/apps/a1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = AppView::new(client, "a1");
    let outcome = view.save(sample_app()).await;

    assert_eq!(
        outcome.notifications[0].message,
        "Successfully updated application."
    );
    assert_eq!(view.state().data().map(|a| a.id.as_str()), Some("a1"));
}

// ── Policy editor ───────────────────────────────────────────────────

#[tokio::test]
async fn creating_policy_posts_and_redirects() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/kube_ovn/policies"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = PolicyEditView::new(client, OrchestrationMode::KubernetesOvn, None);
    view.load().await;
    assert!(matches!(
        view.state(),
        ViewState::Loaded(PolicyDocument::KubeOvn(_))
    ));

    let outcome = view
        .save(PolicyDocument::KubeOvn(edgectl_core::models::KubeOvnPolicy {
            name: "deny-all".into(),
            ..Default::default()
        }))
        .await;

    assert_eq!(outcome.notifications[0].message, "Successfully created policy.");
    assert_eq!(outcome.redirect, Some(Route::Policies));
}

#[tokio::test]
async fn updating_policy_patches_by_id() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/policies/p1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = PolicyEditView::new(client, OrchestrationMode::Native, Some("p1".into()));
    let outcome = view
        .save(PolicyDocument::Native(TrafficPolicy {
            name: "p".into(),
            ..TrafficPolicy::default()
        }))
        .await;

    assert_eq!(outcome.notifications[0].message, "Successfully updated policy.");
    assert_eq!(outcome.redirect, None);
}

// ── Console ─────────────────────────────────────────────────────────

#[tokio::test]
async fn console_shares_session_with_cups_client() {
    let controller = MockServer::start().await;
    let cups = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "JWT1"})))
        .mount(&controller)
        .await;
    Mock::given(method("GET"))
        .and(path("/userplanes"))
        .and(header("Authorization", "Bearer JWT1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "u1", "uuid": "x"}])))
        .expect(1)
        .mount(&cups)
        .await;

    let mut config = ConsoleConfig::new(controller.uri().parse().unwrap());
    config.cups_url = Some(cups.uri().parse().unwrap());

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let hook: UnauthorizedHook = Arc::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let console = Console::new(config, Arc::new(MemorySessionStore::new()), Some(hook)).unwrap();
    assert!(console.cnca().is_err());

    let login = console.login("admin", &"pw".to_string().into()).await;
    assert!(login.is_success());

    let mut view = UserplanesView::new(console.cups().unwrap());
    view.load().await;
    assert_eq!(view.userplanes().len(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

// ── List views: load ────────────────────────────────────────────────

#[tokio::test]
async fn apps_view_loads_catalog() {
    let (server, client) = setup().await;
    mount_get(
        &server,
        "/apps",
        ResponseTemplate::new(200).set_body_json(json!({
            "apps": [
                {"id": "a1", "type": "container", "name": "nginx", "version": "1.0", "vendor": "acme"},
                {"id": "a2", "type": "vm", "name": "ubuntu", "version": "18.04", "vendor": "canonical"}
            ]
        })),
    )
    .await;

    let mut view = AppsView::new(client);
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert!(outcome.notifications.is_empty());
    assert!(!view.state().has_error());
    assert_eq!(view.apps().len(), 2);
    assert_eq!(view.apps()[1].kind, AppType::Vm);
}

#[tokio::test]
async fn apps_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    mount_get(&server, "/apps", ResponseTemplate::new(500)).await;

    let mut view = AppsView::new(client);
    let outcome = view.load().await;

    assert!(view.state().has_error());
    assert!(view.apps().is_empty());
    assert_single_error(&outcome);
}

#[tokio::test]
async fn policies_view_loads_summaries() {
    let (server, client) = setup().await;
    mount_get(
        &server,
        "/policies",
        ResponseTemplate::new(200).set_body_json(json!({
            "policies": [{"id": "p1", "name": "allow-dns"}, {"id": "p2", "name": "deny-all"}]
        })),
    )
    .await;

    let mut view = PoliciesView::new(client, OrchestrationMode::Native);
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert!(!view.state().has_error());
    assert_eq!(view.policies().len(), 2);
    assert_eq!(view.policies()[1].name, "deny-all");
}

#[tokio::test]
async fn policies_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    mount_get(&server, "/kube_ovn/policies", ResponseTemplate::new(502)).await;

    let mut view = PoliciesView::new(client, OrchestrationMode::KubernetesOvn);
    let outcome = view.load().await;

    assert!(view.state().has_error());
    assert!(view.policies().is_empty());
    assert_single_error(&outcome);
}

#[tokio::test]
async fn nfd_view_loads_tags() {
    let (server, client) = setup().await;
    mount_get(
        &server,
        "/nodes/N/nfd",
        ResponseTemplate::new(200).set_body_json(json!({
            "nodenfds": [
                {"id": "cpu-cpuid.AESNI", "value": "true"},
                {"id": "kernel-version.major", "value": "5"},
                {"id": "iommu-enabled", "value": "true"}
            ]
        })),
    )
    .await;

    let mut view = NfdView::new(client, "N");
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert!(!view.state().has_error());
    assert_eq!(view.tags().len(), 3);
    assert_eq!(view.tags()[1].value, "5");
}

#[tokio::test]
async fn nfd_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    mount_get(&server, "/nodes/N/nfd", ResponseTemplate::new(500)).await;

    let mut view = NfdView::new(client, "N");
    let outcome = view.load().await;

    assert!(view.state().has_error());
    assert!(view.tags().is_empty());
    assert_single_error(&outcome);
}

#[tokio::test]
async fn interfaces_view_accepts_null_zones() {
    let (server, client) = setup().await;
    mount_get(
        &server,
        "/nodes/N/interfaces",
        ResponseTemplate::new(200).set_body_json(json!({
            "interfaces": [
                {"id": "if0", "description": "interface0", "driver": "userspace", "type": "upstream",
                 "mac_address": "mac0", "vlan": 50, "zones": null, "fallback_interface": ""},
                {"id": "if1", "description": "interface1", "driver": "kernel", "type": "none",
                 "mac_address": "mac1", "vlan": 1, "zones": null, "fallback_interface": ""},
                {"id": "if2", "description": "interface2", "driver": "kernel", "type": "none",
                 "mac_address": "mac2", "vlan": 2, "zones": null, "fallback_interface": ""},
                {"id": "if3", "description": "interface3", "driver": "kernel", "type": "none",
                 "mac_address": "mac3", "vlan": 3, "zones": null, "fallback_interface": ""}
            ]
        })),
    )
    .await;

    let mut view = InterfacesView::new(client, "N");
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert!(outcome.notifications.is_empty());
    assert!(!view.state().has_error());
    assert_eq!(view.interfaces().len(), 4);
    assert_eq!(view.interfaces()[0].driver, InterfaceDriver::Userspace);
    assert_eq!(view.interfaces()[0].kind, InterfaceType::Upstream);
    assert_eq!(view.interfaces()[3].vlan, 3);
    assert!(view.interfaces().iter().all(|i| i.zones.is_empty()));
}

#[tokio::test]
async fn interfaces_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    mount_get(&server, "/nodes/N/interfaces", ResponseTemplate::new(500)).await;

    let mut view = InterfacesView::new(client, "N");
    let outcome = view.load().await;

    assert!(view.state().has_error());
    assert!(view.interfaces().is_empty());
    assert!(!view.is_dirty());
    assert_single_error(&outcome);
}

#[tokio::test]
async fn userplanes_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    mount_get(&server, "/userplanes", ResponseTemplate::new(503)).await;

    let mut view = UserplanesView::new(client);
    let outcome = view.load().await;

    assert!(view.state().has_error());
    assert!(view.userplanes().is_empty());
    assert_single_error(&outcome);
}

#[tokio::test]
async fn userplanes_view_loads_bare_array() {
    let (server, client) = setup().await;
    mount_get(
        &server,
        "/userplanes",
        ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u1", "uuid": "aaaa"},
            {"id": "u2", "uuid": "bbbb", "selectors": null}
        ])),
    )
    .await;

    let mut view = UserplanesView::new(client);
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert_eq!(view.userplanes().len(), 2);
    assert!(view.userplanes()[1].selectors.is_empty());
}

// ── DNS ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_dns_config_loads_as_empty() {
    let (server, client) = setup().await;
    mount_get(&server, "/nodes/N/dns", ResponseTemplate::new(404)).await;

    let mut view = DnsView::new(client, "N");
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert!(outcome.notifications.is_empty());
    assert!(!view.state().has_error());
    assert!(view.state().data().unwrap().is_empty());
}

#[tokio::test]
async fn dns_view_loads_existing_config() {
    let (server, client) = setup().await;
    mount_get(
        &server,
        "/nodes/N/dns",
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "d1",
            "name": "edge-dns",
            "records": {"a": [{"name": "app.local", "values": ["10.0.0.5"]}]},
            "configurations": {"forwarders": null}
        })),
    )
    .await;

    let mut view = DnsView::new(client, "N");
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    let config = view.state().data().unwrap();
    assert_eq!(config.name, "edge-dns");
    assert_eq!(config.records.a.len(), 1);
    assert!(config.configurations.forwarders.is_empty());
}

#[tokio::test]
async fn dns_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    mount_get(&server, "/nodes/N/dns", ResponseTemplate::new(500)).await;

    let mut view = DnsView::new(client, "N");
    let outcome = view.load().await;

    assert!(view.state().has_error());
    assert_single_error(&outcome);
}

// ── CNCA subscriptions ──────────────────────────────────────────────

#[tokio::test]
async fn subscriptions_view_loads_and_parses_ids() {
    let (server, client) = setup().await;
    mount_get(
        &server,
        "/CNCA/1.0.1/subscriptions",
        ResponseTemplate::new(200).set_body_json(json!([
            {"self": "http://af/CNCA/1.0.1/subscriptions/11111", "afServiceId": "svc"},
            {"self": "http://af/CNCA/1.0.1/subscriptions/22222", "trafficRoutes": null}
        ])),
    )
    .await;

    let mut view = SubscriptionsView::new(client);
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert_eq!(view.subscriptions().len(), 2);
    assert_eq!(view.subscriptions()[0].id(), Some("11111"));
    assert_eq!(view.subscriptions()[1].id(), Some("22222"));
}

#[tokio::test]
async fn subscriptions_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    mount_get(&server, "/CNCA/1.0.1/subscriptions", ResponseTemplate::new(500)).await;

    let mut view = SubscriptionsView::new(client);
    let outcome = view.load().await;

    assert!(view.state().has_error());
    assert!(view.subscriptions().is_empty());
    assert_single_error(&outcome);
}

#[tokio::test]
async fn subscription_patch_rejects_non_object_body() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = SubscriptionsView::new(client);
    for body in [json!(["dnn"]), json!("dnn"), json!(null)] {
        let outcome = view.patch("11111", &body).await;
        assert!(!outcome.is_ok());
        assert_eq!(
            outcome.notifications[0].message,
            "patch body must be a JSON object"
        );
    }
}

#[tokio::test]
async fn subscription_patch_sends_only_given_fields() {
    let (server, client) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/CNCA/1.0.1/subscriptions/11111"))
        .and(body_json(json!({"appReloInd": true})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = SubscriptionsView::new(client);
    let outcome = view.patch("11111", &json!({"appReloInd": true})).await;

    assert!(outcome.is_ok());
    assert_eq!(
        outcome.notifications[0].message,
        "Successfully patched subscription."
    );
}

// ── CNCA PFD transactions ───────────────────────────────────────────

#[tokio::test]
async fn pfd_view_loads_transactions() {
    let (server, client) = setup().await;
    mount_get(
        &server,
        "/CNCA/1.0.1/pfd/transactions",
        ResponseTemplate::new(200).set_body_json(json!([{
            "self": "http://af/CNCA/1.0.1/pfd/transactions/10000",
            "pfdDatas": [{
                "externalAppID": "app1",
                "pfds": [{"pfdID": "pfd1", "urls": ["^http://www.example.com(/\\S*)?$"]}]
            }]
        }])),
    )
    .await;

    let mut view = PfdView::new(client);
    let outcome = view.load().await;

    assert!(outcome.is_ok());
    assert_eq!(view.transactions().len(), 1);
    assert_eq!(view.transactions()[0].id(), Some("10000"));
    assert_eq!(view.transactions()[0].pfd_datas[0].external_app_id, "app1");
}

#[tokio::test]
async fn pfd_load_failure_settles_with_one_error() {
    let (server, client) = setup().await;
    mount_get(&server, "/CNCA/1.0.1/pfd/transactions", ResponseTemplate::new(500)).await;

    let mut view = PfdView::new(client);
    let outcome = view.load().await;

    assert!(view.state().has_error());
    assert!(view.transactions().is_empty());
    assert_single_error(&outcome);
}

fn sample_pfd_data() -> PfdData {
    PfdData {
        external_app_id: "app1".into(),
        pfds: vec![Pfd {
            pfd_id: "pfd1".into(),
            domain_names: vec!["www.example.com".into()],
            ..Pfd::default()
        }],
        ..PfdData::default()
    }
}

#[tokio::test]
async fn pfd_app_get_update_and_delete_use_application_path() {
    let (server, client) = setup().await;
    let app_path = "/CNCA/1.0.1/pfd/transactions/10000/applications/app1";
    mount_get(
        &server,
        app_path,
        ResponseTemplate::new(200).set_body_json(json!({
            "externalAppID": "app1",
            "pfds": [{"pfdID": "pfd1", "domainNames": ["www.example.com"]}]
        })),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path(app_path))
        .and(body_json(json!({
            "externalAppID": "app1",
            "pfds": [{"pfdID": "pfd1", "domainNames": ["www.example.com"]}]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(app_path))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = PfdView::new(client);

    let fetched = view.get_app("10000", "app1").await.unwrap();
    assert_eq!(fetched, sample_pfd_data());

    let updated = view.update_app("10000", "app1", &fetched).await;
    assert!(updated.is_ok());
    assert_eq!(
        updated.notifications[0].message,
        "Successfully updated PFD application."
    );

    let deleted = view.delete_app("10000", "app1").await;
    assert!(deleted.is_ok());
    assert_eq!(deleted.notifications[0].message, "Deleted PFD application app1.");
}

#[tokio::test]
async fn pfd_app_update_requires_a_pfd() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = PfdView::new(client);
    let outcome = view
        .update_app(
            "10000",
            "app1",
            &PfdData {
                pfds: Vec::new(),
                ..sample_pfd_data()
            },
        )
        .await;

    assert!(!outcome.is_ok());
    assert_eq!(outcome.errors().count(), 1);
}

#[tokio::test]
async fn pfd_app_delete_failure_reports_error() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/CNCA/1.0.1/pfd/transactions/10000/applications/app1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut view = PfdView::new(client);
    let outcome = view.delete_app("10000", "app1").await;

    assert_single_error(&outcome);
}
