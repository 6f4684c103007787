#![allow(clippy::unwrap_used)]

// Lifecycle scenarios against an in-memory controller.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use unifi_tf_api::legacy::models::{ClientUser, Network, SettingMgmt, Site, Wlan};
use unifi_tf_core::resources::{
    ClientKind, ClientModel, NetworkKind, NetworkModel, SettingMgmtKind, SiteKind, WlanKind,
    WlanModel,
};
use unifi_tf_core::{
    AttributeBag, CoreError, DeleteMode, MemoryStore, ReadOutcome, Reconciler, ResourceApi,
    ResourceIdentity, ResourceKind, Value,
};

// ── Fake controller ─────────────────────────────────────────────────

struct FakeApi<K: ResourceKind> {
    objects: Mutex<Vec<(String, K::Object)>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    hang: AtomicBool,
    broken: AtomicBool,
    _kind: PhantomData<fn() -> K>,
}

impl<K> FakeApi<K>
where
    K: ResourceKind,
    K::Object: Serialize + DeserializeOwned,
{
    fn new() -> Arc<Self> {
        Arc::new(Self {
            objects: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            hang: AtomicBool::new(false),
            broken: AtomicBool::new(false),
            _kind: PhantomData,
        })
    }

    fn insert(&self, site: &str, object: K::Object) {
        self.objects.lock().unwrap().push((site.to_owned(), object));
    }

    fn object(&self, site: &str, id: &str) -> Option<K::Object> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|(s, o)| s == site && K::object_id(o) == id)
            .map(|(_, o)| o.clone())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn pause(&self) {
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }

    fn find(&self, site: &str, pred: impl Fn(&K::Object) -> bool) -> Result<K::Object, CoreError> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|(s, o)| s == site && pred(o))
            .map(|(_, o)| o.clone())
            .ok_or_else(|| CoreError::not_found("", ""))
    }

    fn with_id(object: &K::Object, id: &str) -> K::Object {
        let mut raw = serde_json::to_value(object).unwrap();
        raw["_id"] = json!(id);
        serde_json::from_value(raw).unwrap()
    }
}

impl<K> ResourceApi<K> for FakeApi<K>
where
    K: ResourceKind,
    K::Object: Serialize + DeserializeOwned,
{
    async fn get(&self, site: &str, id: &str) -> Result<K::Object, CoreError> {
        self.pause().await;
        self.record(format!("get {site} {id}"));
        if self.broken.load(Ordering::SeqCst) {
            return Err(CoreError::Api {
                operation: String::new(),
                resource: String::new(),
                key: String::new(),
                message: "HTTP 500: boom".into(),
                status: Some(500),
            });
        }
        self.find(site, |o| K::object_id(o) == id)
    }

    async fn get_by_natural_key(&self, site: &str, key: &str) -> Result<K::Object, CoreError> {
        self.pause().await;
        self.record(format!("get_by_natural_key {site} {key}"));
        self.find(site, |o| K::object_natural_key(o).as_deref() == Some(key))
    }

    async fn create(&self, site: &str, object: &K::Object) -> Result<K::Object, CoreError> {
        self.pause().await;
        self.record(format!("create {site}"));
        let key = K::object_natural_key(object);
        if self.find(site, |o| K::object_natural_key(o) == key).is_ok() {
            return Err(CoreError::KeyInUse {
                resource: String::new(),
                key: String::new(),
                message: "api.err.NameExists".into(),
            });
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Self::with_id(object, &format!("{n:024x}"));
        self.insert(site, created.clone());
        Ok(created)
    }

    async fn update(&self, site: &str, object: &K::Object) -> Result<K::Object, CoreError> {
        self.pause().await;
        self.record(format!("update {site} {}", K::object_id(object)));
        let mut objects = self.objects.lock().unwrap();
        let slot = objects
            .iter_mut()
            .find(|(s, o)| s == site && K::object_id(o) == K::object_id(object))
            .ok_or_else(|| CoreError::not_found("", ""))?;
        slot.1 = object.clone();
        Ok(object.clone())
    }

    async fn delete(&self, site: &str, key: &str) -> Result<(), CoreError> {
        self.pause().await;
        self.record(format!("delete {site} {key}"));
        let by_key = K::capabilities().delete == DeleteMode::ByNaturalKey;
        let mut objects = self.objects.lock().unwrap();
        let before = objects.len();
        objects.retain(|(s, o)| {
            let hit = if by_key {
                K::object_natural_key(o).as_deref() == Some(key)
            } else {
                K::object_id(o) == key
            };
            !(s == site && hit)
        });
        if objects.len() == before {
            return Err(CoreError::not_found("", ""));
        }
        Ok(())
    }

    async fn list(&self, site: &str) -> Result<Vec<K::Object>, CoreError> {
        self.pause().await;
        self.record(format!("list {site}"));
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| s == site)
            .map(|(_, o)| o.clone())
            .collect())
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

const IOT_ID: &str = "60b8a1f2e4b0c9a1d2f3e4a5";
const MAC: &str = "aa:bb:cc:dd:ee:ff";

fn bag(value: serde_json::Value) -> AttributeBag {
    serde_json::from_value(value).unwrap()
}

fn iot_network() -> Network {
    let mut extra = serde_json::Map::new();
    extra.insert("dhcp_relay_enabled".into(), json!(false));
    Network {
        id: IOT_ID.into(),
        name: "IoT".into(),
        purpose: "corporate".into(),
        vlan: Some(10),
        vlan_enabled: Some(true),
        ip_subnet: "10.0.10.1/24".into(),
        extra,
        ..Network::default()
    }
}

fn printer() -> ClientUser {
    ClientUser {
        id: "c1".into(),
        mac: MAC.into(),
        name: "printer".into(),
        first_seen: Some(1_700_000_000),
        ..ClientUser::default()
    }
}

fn network_reconciler(api: &Arc<FakeApi<NetworkKind>>) -> Reconciler<NetworkKind, FakeApi<NetworkKind>> {
    Reconciler::new(Arc::clone(api), "default")
}

fn state_of<M: DeserializeOwned>(store: &MemoryStore) -> M {
    store.state.as_ref().unwrap().get().unwrap()
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_records_state_and_identity() {
    let api = FakeApi::<NetworkKind>::new();
    let mut store = MemoryStore::new().with_plan(bag(json!({ "name": "Lab", "vlan_id": 20 })));

    network_reconciler(&api)
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let state: NetworkModel = state_of(&store);
    assert!(state.id.is_known());
    assert_eq!(state.vlan_id, Value::known(20));
    assert_eq!(state.site, Value::from("default"));
    assert_eq!(store.identity.unwrap().natural_key, Value::from("Lab"));
}

#[tokio::test]
async fn create_absorbs_existing_object_when_allowed() {
    let api = FakeApi::<NetworkKind>::new();
    api.insert("default", iot_network());
    let mut store = MemoryStore::new().with_plan(bag(json!({
        "name": "IoT",
        "vlan_id": 0,
        "allow_existing": true,
    })));

    network_reconciler(&api)
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let remote = api.object("default", IOT_ID).unwrap();
    assert_eq!(remote.vlan, Some(0));
    assert_eq!(remote.vlan_enabled, Some(false));
    assert_eq!(remote.ip_subnet, "10.0.10.1/24");
    assert!(remote.extra.contains_key("dhcp_relay_enabled"));

    let state: NetworkModel = state_of(&store);
    assert_eq!(state.id, Value::from(IOT_ID));
    assert_eq!(state.allow_existing, Value::known(true));
    assert_eq!(
        api.calls(),
        vec![
            "create default".to_owned(),
            "get_by_natural_key default IoT".to_owned(),
            format!("update default {IOT_ID}"),
        ]
    );
}

#[tokio::test]
async fn create_conflict_without_allow_existing_fails() {
    let api = FakeApi::<NetworkKind>::new();
    api.insert("default", iot_network());
    let mut store = MemoryStore::new().with_plan(bag(json!({ "name": "IoT" })));

    let err = network_reconciler(&api)
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_key_in_use());
    assert!(err.to_string().contains("unifi_network IoT"));
    assert!(store.state.is_none());
    assert_eq!(api.object("default", IOT_ID).unwrap().vlan, Some(10));
}

#[tokio::test]
async fn absorb_keeps_fields_the_plan_leaves_unset() {
    let api = FakeApi::<NetworkKind>::new();
    let mut guest = iot_network();
    guest.purpose = "guest".into();
    api.insert("default", guest);
    let mut store = MemoryStore::new().with_plan(bag(json!({
        "name": "IoT",
        "vlan_id": 30,
        "allow_existing": true,
    })));

    network_reconciler(&api)
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let remote = api.object("default", IOT_ID).unwrap();
    assert_eq!(remote.purpose, "guest");
    assert_eq!(remote.vlan, Some(30));
    let state: NetworkModel = state_of(&store);
    assert_eq!(state.purpose, Value::from("guest"));
}

#[tokio::test]
async fn new_network_gets_default_purpose() {
    let api = FakeApi::<NetworkKind>::new();
    let mut store = MemoryStore::new().with_plan(bag(json!({ "name": "Lab" })));

    network_reconciler(&api)
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let state: NetworkModel = state_of(&store);
    assert_eq!(state.purpose, Value::from("corporate"));
}

#[tokio::test]
async fn absorbing_open_wlan_needs_no_passphrase() {
    let api = FakeApi::<WlanKind>::new();
    api.insert(
        "default",
        Wlan {
            id: "wl1".into(),
            name: "Guest".into(),
            security: "open".into(),
            ..Wlan::default()
        },
    );
    let mut store = MemoryStore::new().with_plan(bag(json!({
        "name": "Guest",
        "hide_ssid": true,
        "allow_existing": true,
    })));

    Reconciler::<WlanKind, _>::new(Arc::clone(&api), "default")
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let remote = api.object("default", "wl1").unwrap();
    assert_eq!(remote.security, "open");
    assert_eq!(remote.hide_ssid, Some(true));
    let state: WlanModel = state_of(&store);
    assert_eq!(state.security, Value::from("open"));
    assert_eq!(
        api.calls(),
        vec![
            "get_by_natural_key default Guest".to_owned(),
            "update default wl1".to_owned(),
        ]
    );
}

#[tokio::test]
async fn new_psk_wlan_without_passphrase_is_rejected_locally() {
    let api = FakeApi::<WlanKind>::new();
    let mut store = MemoryStore::new().with_plan(bag(json!({ "name": "Home" })));

    let err = Reconciler::<WlanKind, _>::new(Arc::clone(&api), "default")
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation { .. }));
    assert!(api.calls().is_empty());
    assert!(store.state.is_none());
}

#[tokio::test]
async fn client_create_absorbs_by_mac_from_config_flag() {
    let api = FakeApi::<ClientKind>::new();
    api.insert("default", printer());
    let mut store = MemoryStore::new()
        .with_plan(bag(json!({ "mac": "AA-BB-CC-DD-EE-FF", "name": "office printer" })))
        .with_config(bag(json!({ "allow_existing": true })));

    Reconciler::<ClientKind, _>::new(Arc::clone(&api), "default")
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let remote = api.object("default", "c1").unwrap();
    assert_eq!(remote.name, "office printer");
    assert_eq!(remote.first_seen, Some(1_700_000_000));
    let identity = store.identity.unwrap();
    assert_eq!(identity.id, Value::from("c1"));
    assert_eq!(identity.natural_key, Value::from(MAC));
}

#[tokio::test]
async fn singleton_create_absorbs_without_posting() {
    let api = FakeApi::<SettingMgmtKind>::new();
    api.insert(
        "default",
        SettingMgmt {
            id: "m1".into(),
            key: "mgmt".into(),
            auto_upgrade_hour: Some(3),
            led_enabled: Some(true),
            ..SettingMgmt::default()
        },
    );
    let mut store = MemoryStore::new().with_plan(bag(json!({ "auto_upgrade_hour": 0 })));

    Reconciler::<SettingMgmtKind, _>::new(Arc::clone(&api), "default")
        .create(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let remote = api.object("default", "m1").unwrap();
    assert_eq!(remote.auto_upgrade_hour, Some(0));
    assert_eq!(remote.led_enabled, Some(true));
    assert!(!api.calls().iter().any(|c| c.starts_with("create")));
}

// ── Read ────────────────────────────────────────────────────────────

#[tokio::test]
async fn read_deregisters_missing_object() {
    let api = FakeApi::<NetworkKind>::new();
    let mut store = MemoryStore::new().with_state(bag(json!({ "id": IOT_ID, "name": "IoT" })));

    let outcome = network_reconciler(&api)
        .read(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::Removed);
    assert!(store.state.is_none());
}

#[tokio::test]
async fn read_refreshes_drifted_state() {
    let api = FakeApi::<NetworkKind>::new();
    api.insert("default", iot_network());
    let mut store = MemoryStore::new().with_state(bag(json!({
        "id": IOT_ID,
        "name": "IoT",
        "vlan_id": 99,
        "allow_existing": true,
    })));

    let outcome = network_reconciler(&api)
        .read(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, ReadOutcome::Present);
    let state: NetworkModel = state_of(&store);
    assert_eq!(state.vlan_id, Value::known(10));
    assert_eq!(state.allow_existing, Value::known(true));
}

#[tokio::test]
async fn site_read_miss_is_an_error() {
    let api = FakeApi::<SiteKind>::new();
    let before = bag(json!({ "id": "s1", "name": "x7kq2b1m", "description": "Branch" }));
    let mut store = MemoryStore::new().with_state(before.clone());

    let err = Reconciler::<SiteKind, _>::new(Arc::clone(&api), "default")
        .read(&mut store, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.state, Some(before));
}

#[tokio::test]
async fn read_falls_back_to_identity_natural_key() {
    let api = FakeApi::<ClientKind>::new();
    api.insert("default", printer());
    let mut store = MemoryStore::new()
        .with_state(bag(json!({ "site": "default" })))
        .with_identity(ResourceIdentity::new(None, Some(MAC.into())));

    Reconciler::<ClientKind, _>::new(Arc::clone(&api), "default")
        .read(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let state: ClientModel = state_of(&store);
    assert_eq!(state.id, Value::from("c1"));
    assert_eq!(api.calls(), vec![format!("get_by_natural_key default {MAC}")]);
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_keeps_prior_values_for_unknown_plan_attributes() {
    let api = FakeApi::<NetworkKind>::new();
    api.insert("default", iot_network());
    let mut store = MemoryStore::new()
        .with_state(bag(json!({
            "id": IOT_ID,
            "name": "IoT",
            "vlan_id": 10,
            "subnet": "10.0.10.1/24",
        })))
        .with_plan(bag(json!({
            "name": "IoT",
            "vlan_id": { "unknown": true },
            "domain_name": "iot.lan",
        })));

    network_reconciler(&api)
        .update(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    let remote = api.object("default", IOT_ID).unwrap();
    assert_eq!(remote.vlan, Some(10));
    assert_eq!(remote.domain_name, "iot.lan");
    assert!(remote.extra.contains_key("dhcp_relay_enabled"));
    let state: NetworkModel = state_of(&store);
    assert_eq!(state.domain_name, Value::from("iot.lan"));
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_idempotent() {
    let api = FakeApi::<NetworkKind>::new();
    api.insert("default", iot_network());
    let reconciler = network_reconciler(&api);
    let tracked = bag(json!({ "id": IOT_ID, "name": "IoT" }));

    let mut store = MemoryStore::new().with_state(tracked.clone());
    reconciler
        .delete(&mut store, &CancellationToken::new())
        .await
        .unwrap();
    assert!(store.state.is_none());
    assert!(api.object("default", IOT_ID).is_none());

    let mut again = MemoryStore::new().with_state(tracked);
    reconciler
        .delete(&mut again, &CancellationToken::new())
        .await
        .unwrap();
    assert!(again.state.is_none());
}

#[tokio::test]
async fn client_delete_resolves_mac_from_id() {
    let api = FakeApi::<ClientKind>::new();
    api.insert("default", printer());
    let mut store = MemoryStore::new().with_state(bag(json!({ "id": "c1" })));

    Reconciler::<ClientKind, _>::new(Arc::clone(&api), "default")
        .delete(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec!["get default c1".to_owned(), format!("delete default {MAC}")]
    );
    assert!(store.state.is_none());
}

#[tokio::test]
async fn failed_key_resolution_names_the_id() {
    let api = FakeApi::<ClientKind>::new();
    api.insert("default", printer());
    api.broken.store(true, Ordering::SeqCst);
    let tracked = bag(json!({ "id": "c1" }));
    let mut store = MemoryStore::new().with_state(tracked.clone());

    let err = Reconciler::<ClientKind, _>::new(Arc::clone(&api), "default")
        .delete(&mut store, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "delete unifi_client c1: HTTP 500: boom");
    assert_eq!(store.state, Some(tracked));
    assert!(api.object("default", "c1").is_some());
}

#[tokio::test]
async fn skip_forget_on_destroy_only_disowns() {
    let api = FakeApi::<ClientKind>::new();
    api.insert("default", printer());
    let mut store = MemoryStore::new().with_state(bag(json!({
        "id": "c1",
        "mac": MAC,
        "skip_forget_on_destroy": true,
    })));

    Reconciler::<ClientKind, _>::new(Arc::clone(&api), "default")
        .delete(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    assert!(store.state.is_none());
    assert!(api.calls().is_empty());
    assert!(api.object("default", "c1").is_some());
}

#[tokio::test]
async fn settings_delete_disowns() {
    let api = FakeApi::<SettingMgmtKind>::new();
    let mut store = MemoryStore::new().with_state(bag(json!({ "id": "m1", "site": "default" })));

    Reconciler::<SettingMgmtKind, _>::new(Arc::clone(&api), "default")
        .delete(&mut store, &CancellationToken::new())
        .await
        .unwrap();

    assert!(store.state.is_none());
    assert!(api.calls().is_empty());
}

// ── Import ──────────────────────────────────────────────────────────

#[tokio::test]
async fn import_by_composite_id() {
    let api = FakeApi::<NetworkKind>::new();
    let mut network = iot_network();
    network.id = "abc123".into();
    api.insert("site-a", network);
    let mut store = MemoryStore::new();

    network_reconciler(&api)
        .import("site-a:abc123", &mut store, &CancellationToken::new())
        .await
        .unwrap();

    let state: NetworkModel = state_of(&store);
    assert_eq!(state.site, Value::from("site-a"));
    assert_eq!(state.id, Value::from("abc123"));
    assert_eq!(state.name, Value::from("IoT"));
    assert_eq!(api.calls(), vec!["get site-a abc123".to_owned()]);
}

#[tokio::test]
async fn import_by_name_miss_names_the_value() {
    let api = FakeApi::<NetworkKind>::new();
    api.insert("default", iot_network());
    let mut store = MemoryStore::new();

    let err = network_reconciler(&api)
        .import("name=Guest", &mut store, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("Guest"));
    assert!(store.state.is_none());
    assert!(store.identity.is_none());
}

#[tokio::test]
async fn import_by_id_miss_leaves_store_untouched() {
    let api = FakeApi::<NetworkKind>::new();
    let mut store = MemoryStore::new();

    let err = network_reconciler(&api)
        .import(IOT_ID, &mut store, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), format!("unifi_network not found: {IOT_ID}"));
    assert_eq!(store, MemoryStore::new());
}

#[tokio::test]
async fn import_by_mac_propagates_identity() {
    let api = FakeApi::<ClientKind>::new();
    api.insert("default", printer());
    let reconciler = Reconciler::<ClientKind, _>::new(Arc::clone(&api), "default");
    let mut store = MemoryStore::new();

    reconciler
        .import("AA:BB:CC:DD:EE:FF", &mut store, &CancellationToken::new())
        .await
        .unwrap();

    let identity = store.identity.clone().unwrap();
    assert_eq!(identity.id, Value::from("c1"));
    assert_eq!(identity.natural_key, Value::from(MAC));
    let state: ClientModel = state_of(&store);
    assert_eq!(state.mac, Value::from(MAC));

    // The next refresh goes by id.
    reconciler
        .read(&mut store, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(api.calls().last().unwrap(), "get default c1");
}

#[tokio::test]
async fn client_import_by_alias_or_hostname() {
    let api = FakeApi::<ClientKind>::new();
    let mut printer = printer();
    printer.hostname = "hp-laserjet".into();
    api.insert("default", printer);
    let reconciler = Reconciler::<ClientKind, _>::new(Arc::clone(&api), "default");

    let mut store = MemoryStore::new();
    reconciler
        .import("name=printer", &mut store, &CancellationToken::new())
        .await
        .unwrap();
    let identity = store.identity.clone().unwrap();
    assert_eq!(identity.id, Value::from("c1"));
    assert_eq!(identity.natural_key, Value::from(MAC));
    let state: ClientModel = state_of(&store);
    assert_eq!(state.name, Value::from("printer"));

    let mut store = MemoryStore::new();
    reconciler
        .import("hp-laserjet", &mut store, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(store.identity.unwrap().id, Value::from("c1"));
}

#[tokio::test]
async fn import_site_by_description() {
    let api = FakeApi::<SiteKind>::new();
    api.insert(
        "default",
        Site {
            id: "s1".into(),
            name: "x7kq2b1m".into(),
            desc: "Branch Office".into(),
            ..Site::default()
        },
    );
    let mut store = MemoryStore::new();

    Reconciler::<SiteKind, _>::new(Arc::clone(&api), "default")
        .import("Branch Office", &mut store, &CancellationToken::new())
        .await
        .unwrap();

    let identity = store.identity.unwrap();
    assert_eq!(identity.id, Value::from("s1"));
    assert_eq!(identity.natural_key, Value::from("x7kq2b1m"));
}

// ── Cancellation ────────────────────────────────────────────────────

#[tokio::test]
async fn cancelled_operation_leaves_state_untouched() {
    let api = FakeApi::<NetworkKind>::new();
    api.insert("default", iot_network());
    api.hang.store(true, Ordering::SeqCst);
    let tracked = bag(json!({ "id": IOT_ID, "name": "IoT" }));
    let mut store = MemoryStore::new().with_state(tracked.clone());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let canceller = tokio::spawn(async move {
        tokio::task::yield_now().await;
        trigger.cancel();
    });

    let err = network_reconciler(&api)
        .read(&mut store, &cancel)
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(err.is_cancelled());
    assert!(matches!(err, CoreError::Cancelled { ref operation } if operation == "read"));
    assert_eq!(store.state, Some(tracked));
}

#[tokio::test]
async fn pre_cancelled_token_never_calls_the_controller() {
    let api = FakeApi::<NetworkKind>::new();
    let mut store = MemoryStore::new().with_plan(bag(json!({ "name": "Lab" })));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = network_reconciler(&api)
        .create(&mut store, &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(store.state.is_none());
    assert!(api.calls().is_empty());
}
