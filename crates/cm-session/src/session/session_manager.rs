//! Session and community-context state machine.

use crate::identity::{IdentityService, Principal, Tenant};
use crate::session::{SessionSnapshot, SessionState, TenantResolver};
use crate::store::{DurableStore, StoreKey};
use crate::{SessionError, SessionResult};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};
use tokio::sync::{Mutex, watch};

/// Owns the authenticated member, the active community and their durable
/// mirror.
///
/// One instance per running application, shared by reference. Operations
/// take `&self`; state changes are published through a watch channel so
/// consumers never see a half-applied transition.
///
/// Invariants once an operation has returned:
/// - `is_authenticated()` ⇔ both session keys are stored ⇔ `principal()` is some
/// - the stored `tenant.context` is the serialized `tenant_context()`
pub struct SessionManager {
    pub(crate) store: Arc<dyn DurableStore>,
    pub(crate) identity: Arc<dyn IdentityService>,
    resolver: TenantResolver,
    pub(crate) state_tx: watch::Sender<SessionSnapshot>,
    state_rx: watch::Receiver<SessionSnapshot>,
    /// Serializes login, bootstrap and tenant selection.
    in_flight: Mutex<()>,
    /// Bumped by logout; in-flight operations that see a newer value abandon.
    generation: AtomicU64,
}

impl SessionManager {
    /// Create a manager in the `Unauthenticated` state.
    ///
    /// Nothing is read from the store until [`SessionManager::bootstrap`].
    pub fn new(store: Arc<dyn DurableStore>, identity: Arc<dyn IdentityService>) -> Self {
        let (state_tx, state_rx) = watch::channel(SessionSnapshot::default());

        Self {
            store,
            resolver: TenantResolver::new(identity.clone()),
            identity,
            state_tx,
            state_rx,
            in_flight: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_rx.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state_rx.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.state_rx.borrow().state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state_rx.borrow().is_authenticated()
    }

    pub fn principal(&self) -> Option<Principal> {
        self.state_rx.borrow().principal.clone()
    }

    pub fn tenant_context(&self) -> Option<Tenant> {
        self.state_rx.borrow().tenant_context.clone()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Re-derive the session from the durable store and re-validate it.
    ///
    /// Never fails: a stored session the identity service no longer accepts
    /// is rolled back and the application simply starts unauthenticated.
    /// With no stored session, no network call is made.
    pub async fn bootstrap(&self) {
        let Ok(_guard) = self.in_flight.try_lock() else {
            warn!("Bootstrap skipped: another session operation is in flight");
            return;
        };
        let generation = self.generation.load(Ordering::SeqCst);

        self.restore_tenant_context();

        let token = self.store.get(StoreKey::SessionToken);
        let tenant_id = self.store.get(StoreKey::SessionTenantId);

        let (token, tenant_id) = match (token, tenant_id) {
            (Some(token), Some(tenant_id)) => (token, tenant_id),
            (None, None) => {
                debug!("No stored session; starting unauthenticated");
                return;
            }
            (token, _) => {
                let orphan = if token.is_some() {
                    StoreKey::SessionToken
                } else {
                    StoreKey::SessionTenantId
                };
                warn!("Stored session is incomplete; discarding orphaned {orphan}");
                if let Err(e) = self.store.remove(orphan) {
                    warn!("Failed to remove orphaned {orphan}: {e}");
                }
                return;
            }
        };

        info!("Restoring stored session for community {tenant_id}");

        match self
            .authenticate(&token, &tenant_id, SessionState::Bootstrapping, generation)
            .await
        {
            Ok(()) => info!("Session restored for community {tenant_id}"),
            Err(SessionError::Superseded { .. }) => {
                debug!("Session restore for community {tenant_id} superseded by logout");
                self.rollback();
            }
            Err(e) => {
                warn!("Stored session for community {tenant_id} is no longer valid: {e}");
                self.rollback();
            }
        }
    }

    /// Establish a session for `tenant_id` with an opaque bearer `token`.
    ///
    /// The credential is written to the store before any network call so a
    /// reload mid-login can retry via bootstrap. On any failure the session
    /// is rolled back completely and the original error returned. No retries.
    pub async fn login(&self, token: &str, tenant_id: &str) -> SessionResult<()> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| SessionError::operation_in_progress())?;
        let generation = self.generation.load(Ordering::SeqCst);

        info!("Logging in to community {tenant_id}");

        match self.try_login(token, tenant_id, generation).await {
            Ok(()) => {
                info!("Logged in to community {tenant_id}");
                Ok(())
            }
            Err(e @ SessionError::Superseded { .. }) => {
                // Logout already cleared everything; clear again in case our
                // credential writes landed after it.
                debug!("Login to community {tenant_id} superseded by logout");
                self.rollback();
                Err(e)
            }
            Err(e) => {
                warn!("Login to community {tenant_id} failed: {e}");
                self.rollback();
                Err(e)
            }
        }
    }

    /// Clear the session, the member and the community context.
    ///
    /// Idempotent. Never blocked by an in-flight operation; that operation
    /// will observe the logout and abandon its result.
    pub fn logout(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.clear();
        info!("Logged out");
    }

    /// Replace the active community context and mirror it to the store.
    ///
    /// Independent of authentication. `None` removes the stored copy. The
    /// in-memory value only changes once the store write succeeded.
    pub fn set_tenant_context(&self, tenant: Option<Tenant>) -> SessionResult<()> {
        self.write_tenant_context(tenant.as_ref())?;
        self.state_tx.send_if_modified(|snapshot| {
            if snapshot.tenant_context == tenant {
                return false;
            }
            snapshot.tenant_context = tenant;
            true
        });
        Ok(())
    }

    /// Resolve public metadata for `tenant_id` and make it the active
    /// community context, e.g. for a public landing or login page.
    ///
    /// Metadata failures are not errors: the context is cleared and `None`
    /// returned. Only a store failure is reported.
    pub async fn select_tenant(&self, tenant_id: &str) -> SessionResult<Option<Tenant>> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| SessionError::operation_in_progress())?;
        let generation = self.generation.load(Ordering::SeqCst);

        let tenant = self.resolver.resolve(tenant_id).await;
        self.ensure_current(generation)?;

        self.set_tenant_context(tenant.clone())?;
        Ok(tenant)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn try_login(&self, token: &str, tenant_id: &str, generation: u64) -> SessionResult<()> {
        if token.trim().is_empty() {
            return Err(SessionError::invalid_credentials("token is empty"));
        }
        if tenant_id.trim().is_empty() {
            return Err(SessionError::invalid_credentials("community id is empty"));
        }

        self.store.set(StoreKey::SessionToken, token)?;
        self.store.set(StoreKey::SessionTenantId, tenant_id)?;

        self.authenticate(token, tenant_id, SessionState::Authenticating, generation)
            .await
    }

    /// Shared tail of login and bootstrap: confirm the member record, settle
    /// the community context, then publish `Authenticated` in one step.
    async fn authenticate(
        &self,
        token: &str,
        tenant_id: &str,
        transient: SessionState,
        generation: u64,
    ) -> SessionResult<()> {
        self.state_tx.send_modify(|snapshot| {
            snapshot.state = transient;
            snapshot.principal = None;
        });
        self.identity.set_bearer_token(Some(token));

        let principal = self.identity.fetch_principal(tenant_id).await?;
        self.ensure_current(generation)?;

        if !principal.has_valid_id() {
            return Err(SessionError::invalid_principal(format!(
                "member record for community {tenant_id} has no id"
            )));
        }

        let tenant_context = self.settle_tenant_context(tenant_id, generation).await?;

        // Checked under the channel lock so a concurrent logout either lands
        // after this publish or prevents it.
        let mut published = false;
        self.state_tx.send_if_modified(|snapshot| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *snapshot = SessionSnapshot {
                state: SessionState::Authenticated,
                principal: Some(principal),
                tenant_context,
            };
            published = true;
            true
        });

        if !published {
            return Err(SessionError::superseded());
        }
        Ok(())
    }

    /// Keep a resident context that belongs to `tenant_id`; otherwise fetch
    /// it. A failed fetch leaves no context, stored or in memory.
    async fn settle_tenant_context(
        &self,
        tenant_id: &str,
        generation: u64,
    ) -> SessionResult<Option<Tenant>> {
        let resident = self.tenant_context();
        if let Some(tenant) = resident
            && tenant.id == tenant_id
        {
            return Ok(Some(tenant));
        }

        let resolved = self.resolver.resolve(tenant_id).await;
        self.ensure_current(generation)?;

        self.write_tenant_context(resolved.as_ref())?;
        Ok(resolved)
    }

    fn write_tenant_context(&self, tenant: Option<&Tenant>) -> SessionResult<()> {
        match tenant {
            Some(tenant) => {
                let json = serde_json::to_string(tenant).map_err(crate::StoreError::from)?;
                self.store.set(StoreKey::TenantContext, &json)?;
            }
            None => self.store.remove(StoreKey::TenantContext)?,
        }
        Ok(())
    }

    /// Load a stored community context when none is resident. A record that
    /// no longer parses is dropped from the store.
    fn restore_tenant_context(&self) {
        if self.tenant_context().is_some() {
            return;
        }

        let Some(json) = self.store.get(StoreKey::TenantContext) else {
            return;
        };

        match serde_json::from_str::<Tenant>(&json) {
            Ok(tenant) => {
                debug!("Restored community context {}", tenant.id);
                self.state_tx.send_modify(|snapshot| {
                    snapshot.tenant_context = Some(tenant);
                });
            }
            Err(e) => {
                warn!("Stored community context is corrupted: {e}");
                if let Err(e) = self.store.remove(StoreKey::TenantContext) {
                    warn!("Failed to remove corrupted community context: {e}");
                }
            }
        }
    }

    fn ensure_current(&self, generation: u64) -> SessionResult<()> {
        if self.generation.load(Ordering::SeqCst) != generation {
            return Err(SessionError::superseded());
        }
        Ok(())
    }
}
