#![allow(clippy::unwrap_used)]
// Integration tests for `LegacyClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unifi_tf_api::legacy::models::{ClientUser, Network, SettingMgmt, Wan, Wlan};
use unifi_tf_api::{ControllerPlatform, Error, LegacyClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LegacyClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = LegacyClient::with_client(
        reqwest::Client::new(),
        base_url,
        ControllerPlatform::ClassicController,
    );
    (server, client)
}

fn site_path(suffix: &str) -> String {
    format!("/api/s/default/{suffix}")
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "meta": { "rc": "ok" }, "data": data }))
}

fn api_error(status: u16, msg: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .set_body_json(json!({ "meta": { "rc": "error", "msg": msg }, "data": [] }))
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_stores_csrf_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-CSRF-Token", "tok-1")
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(site_path("cmd/stamgr")))
        .and(header("X-CSRF-Token", "tok-1"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "test-password".to_string().into();
    client.login("admin", &secret).await.unwrap();
    client
        .forget_user("default", "aa:bb:cc:dd:ee:ff")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong-password".to_string().into();
    let result = client.login("admin", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_request_is_auth_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("rest/wlanconf")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.rest_list::<Wlan>("default").await.unwrap_err();
    assert!(err.is_auth_expired());
}

// ── Generic rest/ collections ───────────────────────────────────────

#[tokio::test]
async fn test_networkconf_list_is_filtered_by_purpose() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("rest/networkconf")))
        .respond_with(ok(json!([
            { "_id": "n1", "name": "LAN", "purpose": "corporate", "vlan": 0 },
            { "_id": "n2", "name": "Guests", "purpose": "guest", "vlan": 20 },
            { "_id": "w1", "name": "Internet 1", "purpose": "wan", "wan_failover_priority": 0 },
            { "_id": "v1", "name": "Mullvad", "purpose": "vpn-client" }
        ])))
        .mount(&server)
        .await;

    let networks: Vec<Network> = client.rest_list("default").await.unwrap();
    let names: Vec<&str> = networks.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["LAN", "Guests"]);

    let wans: Vec<Wan> = client.rest_list("default").await.unwrap();
    assert_eq!(wans.len(), 1);
    assert_eq!(wans[0].wan_failover_priority, Some(0));
}

#[tokio::test]
async fn test_get_of_other_purpose_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("rest/networkconf/w1")))
        .respond_with(ok(json!([{ "_id": "w1", "name": "Internet 1", "purpose": "wan" }])))
        .mount(&server)
        .await;

    let err = client.rest_get::<Network>("default", "w1").await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn test_update_puts_full_object_to_id_path() {
    let (server, client) = setup().await;

    let wlan = Wlan {
        id: "wl1".into(),
        name: "Home".into(),
        security: "wpapsk".into(),
        ..Wlan::default()
    };

    Mock::given(method("PUT"))
        .and(path(site_path("rest/wlanconf/wl1")))
        .and(body_json(json!({ "_id": "wl1", "name": "Home", "security": "wpapsk",
            "ap_group_ids": [], "wlan_bands": [], "mac_filter_list": [],
            "schedule_with_duration": [] })))
        .respond_with(ok(json!([{ "_id": "wl1", "name": "Home", "security": "wpapsk" }])))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client.rest_update("default", &wlan).await.unwrap();
    assert_eq!(updated.id, "wl1");
}

#[tokio::test]
async fn test_create_with_used_mac_is_key_in_use() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(site_path("rest/user")))
        .respond_with(api_error(400, "api.err.MacUsed"))
        .mount(&server)
        .await;

    let user = ClientUser {
        mac: "aa:bb:cc:dd:ee:ff".into(),
        ..ClientUser::default()
    };
    let err = client.rest_create("default", &user).await.unwrap_err();
    assert!(err.is_key_in_use(), "got {err:?}");
    assert_eq!(err.api_error_code(), Some("api.err.MacUsed"));
}

#[tokio::test]
async fn test_missing_object_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(site_path("rest/portforward/gone")))
        .respond_with(api_error(400, "api.err.IdInvalid"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(site_path("rest/portforward/nope")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client
        .rest_delete::<unifi_tf_api::legacy::models::PortForward>("default", "gone")
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = client
        .rest_get::<unifi_tf_api::legacy::models::PortForward>("default", "nope")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http { status: 404, .. }));
}

// ── Clients, sites, settings ────────────────────────────────────────

#[tokio::test]
async fn test_get_user_by_mac() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("stat/user/aa:bb:cc:dd:ee:ff")))
        .respond_with(ok(json!([{
            "_id": "5f0000000000000000000001",
            "mac": "aa:bb:cc:dd:ee:ff",
            "name": "printer",
            "dev_id_override": 0,
            "first_seen": 1_700_000_000
        }])))
        .mount(&server)
        .await;

    let user = client
        .get_user_by_mac("default", "aa:bb:cc:dd:ee:ff")
        .await
        .unwrap();
    assert_eq!(user.id, "5f0000000000000000000001");
    assert_eq!(user.dev_id_override, Some(0));
}

#[tokio::test]
async fn test_forget_user_sends_stamgr_command() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(site_path("cmd/stamgr")))
        .and(body_json(json!({ "cmd": "forget-sta", "macs": ["aa:bb:cc:dd:ee:ff"] })))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client
        .forget_user("default", "aa:bb:cc:dd:ee:ff")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_site_lifecycle_commands() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/self/sites"))
        .respond_with(ok(json!([
            { "_id": "s0", "name": "default", "desc": "Default", "role": "admin",
              "attr_no_delete": true, "attr_hidden_id": "default" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(site_path("cmd/sitemgr")))
        .and(body_json(json!({ "cmd": "add-site", "desc": "Branch" })))
        .respond_with(ok(json!([{ "_id": "s1", "name": "x7k2p9qa", "desc": "Branch" }])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/s/x7k2p9qa/cmd/sitemgr"))
        .and(body_json(json!({ "cmd": "update-site", "desc": "Branch Office" })))
        .respond_with(ok(json!([{ "_id": "s1", "name": "x7k2p9qa", "desc": "Branch Office" }])))
        .mount(&server)
        .await;

    let sites = client.list_sites().await.unwrap();
    assert_eq!(sites[0].attr_no_delete, Some(true));

    let created = client.create_site("Branch").await.unwrap();
    assert_eq!(created.name, "x7k2p9qa");

    let updated = client
        .update_site(&created.name, "Branch Office")
        .await
        .unwrap();
    assert_eq!(updated.desc, "Branch Office");
}

#[tokio::test]
async fn test_setting_mgmt_read_and_write() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(site_path("get/setting/mgmt")))
        .respond_with(ok(json!([{
            "_id": "set1", "key": "mgmt", "site_id": "s0",
            "auto_upgrade": true, "auto_upgrade_hour": 0,
            "x_ssh_keys": [{ "name": "laptop", "type": "ssh-ed25519", "key": "AAAA" }]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(site_path("rest/setting/mgmt/set1")))
        .respond_with(ok(json!([{ "_id": "set1", "key": "mgmt", "auto_upgrade": false }])))
        .expect(1)
        .mount(&server)
        .await;

    let mut setting: SettingMgmt = client.get_setting_mgmt("default").await.unwrap();
    assert_eq!(setting.auto_upgrade_hour, Some(0));
    assert_eq!(setting.x_ssh_keys[0].key_type, "ssh-ed25519");

    setting.auto_upgrade = Some(false);
    let written = client
        .update_setting_mgmt("default", &setting)
        .await
        .unwrap();
    assert_eq!(written.auto_upgrade, Some(false));
}

// ── Platform ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unifi_os_paths_use_proxy_prefix() {
    let server = MockServer::start().await;
    let client = LegacyClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        ControllerPlatform::UnifiOs,
    );

    Mock::given(method("GET"))
        .and(path("/proxy/network/api/s/lab/rest/wlanconf"))
        .respond_with(ok(json!([{ "_id": "wl1", "name": "Lab" }])))
        .mount(&server)
        .await;

    let wlans: Vec<Wlan> = client.rest_list("lab").await.unwrap();
    assert_eq!(wlans[0].name, "Lab");
}
