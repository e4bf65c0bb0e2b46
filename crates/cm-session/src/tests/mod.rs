
use crate::{
    ClientError, ClientResult, DurableStore, IdentityService, MemoryStore, Principal,
    SessionManager, SessionSnapshot, SessionState, StoreError, StoreKey, StoreResult, Tenant,
};

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, watch};

/// Scripted outcome of a mock identity call.
#[derive(Clone)]
pub(crate) enum Reply<T> {
    Ok(T),
    Status(u16),
    Garbage,
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> ClientResult<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status) => Err(ClientError::api_error(
                *status,
                format!("HTTP_{status}"),
                "scripted failure",
            )),
            Reply::Garbage => {
                let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
                Err(ClientError::from_json(err))
            }
        }
    }
}

/// In-process identity service with scripted replies and call accounting.
pub(crate) struct MockIdentityService {
    principal: Mutex<Reply<Principal>>,
    tenant: Mutex<Reply<Tenant>>,
    bearer: Mutex<Option<String>>,
    pub(crate) principal_calls: AtomicUsize,
    pub(crate) tenant_calls: AtomicUsize,
    pub(crate) bearer_seen: Mutex<Vec<Option<String>>>,
    observer: Mutex<Option<watch::Receiver<SessionSnapshot>>>,
    pub(crate) observed: Mutex<Vec<SessionState>>,
    gate: Option<Arc<Notify>>,
}

impl MockIdentityService {
    pub(crate) fn new(principal: Reply<Principal>, tenant: Reply<Tenant>) -> Self {
        Self {
            principal: Mutex::new(principal),
            tenant: Mutex::new(tenant),
            bearer: Mutex::new(None),
            principal_calls: AtomicUsize::new(0),
            tenant_calls: AtomicUsize::new(0),
            bearer_seen: Mutex::new(Vec::new()),
            observer: Mutex::new(None),
            observed: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Member and community both answer successfully.
    pub(crate) fn healthy(member_id: &str, tenant_id: &str) -> Self {
        Self::new(
            Reply::Ok(Principal::new(member_id, "Alice")),
            Reply::Ok(Tenant::new(tenant_id, "Riverside").with_logo("https://cdn/logo.png")),
        )
    }

    /// `fetch_principal` waits for `gate` before answering.
    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn set_principal_reply(&self, reply: Reply<Principal>) {
        *self.principal.lock().unwrap() = reply;
    }

    pub(crate) fn observe(&self, rx: watch::Receiver<SessionSnapshot>) {
        *self.observer.lock().unwrap() = Some(rx);
    }

    pub(crate) fn principal_calls(&self) -> usize {
        self.principal_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn tenant_calls(&self) -> usize {
        self.tenant_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn network_calls(&self) -> usize {
        self.principal_calls() + self.tenant_calls()
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn fetch_principal(&self, _tenant_id: &str) -> ClientResult<Principal> {
        self.principal_calls.fetch_add(1, Ordering::SeqCst);
        self.bearer_seen
            .lock()
            .unwrap()
            .push(self.bearer.lock().unwrap().clone());

        let observed = self
            .observer
            .lock()
            .unwrap()
            .as_ref()
            .map(|rx| rx.borrow().state);
        if let Some(state) = observed {
            self.observed.lock().unwrap().push(state);
        }

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.principal.lock().unwrap().clone();
        reply.produce()
    }

    async fn fetch_public_tenant(&self, _tenant_id: &str) -> ClientResult<Tenant> {
        self.tenant_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.tenant.lock().unwrap().clone();
        reply.produce()
    }

    fn set_bearer_token(&self, token: Option<&str>) {
        *self.bearer.lock().unwrap() = token.map(String::from);
    }

    fn has_bearer_token(&self) -> bool {
        self.bearer.lock().unwrap().is_some()
    }
}

/// Memory store whose writes to one key always fail.
pub(crate) struct FailingStore {
    inner: MemoryStore,
    failing: StoreKey,
}

impl FailingStore {
    pub(crate) fn new(failing: StoreKey) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing,
        }
    }
}

impl DurableStore for FailingStore {
    fn get(&self, key: StoreKey) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: StoreKey, value: &str) -> StoreResult<()> {
        if key == self.failing {
            return Err(StoreError::file_write(
                PathBuf::from("/session.json"),
                std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
            ));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: StoreKey) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

pub(crate) fn setup(
    identity: MockIdentityService,
) -> (SessionManager, Arc<MemoryStore>, Arc<MockIdentityService>) {
    let store = Arc::new(MemoryStore::new());
    let identity = Arc::new(identity);
    let manager = SessionManager::new(store.clone(), identity.clone());
    (manager, store, identity)
}

/// Memory and durable copy agree, and the session keys travel together.
pub(crate) fn assert_consistent(manager: &SessionManager, store: &dyn DurableStore) {
    let has_token = store.get(StoreKey::SessionToken).is_some();
    let has_tenant = store.get(StoreKey::SessionTenantId).is_some();

    assert_eq!(has_token, has_tenant, "session keys must travel together");
    assert_eq!(manager.is_authenticated(), has_token && has_tenant);
    assert_eq!(manager.is_authenticated(), manager.principal().is_some());

    let stored_context = store
        .get(StoreKey::TenantContext)
        .map(|json| serde_json::from_str::<Tenant>(&json).unwrap());
    assert_eq!(stored_context, manager.tenant_context());
}

pub(crate) fn assert_fully_unauthenticated(manager: &SessionManager, store: &dyn DurableStore) {
    assert_eq!(manager.snapshot(), SessionSnapshot::default());
    for key in StoreKey::ALL {
        assert!(store.get(key).is_none(), "{key} should be absent");
    }
}
