//! The authorization gate: every request suspends here until the hosting
//! environment decides on it.
//!
//! The gate itself is a seam, not a scheduler. [`AuthorizationOracle::authorize`]
//! receives the request and the remaining pipeline as a continuation; the
//! oracle decides when (and whether) to run it. The queue of pending approvals
//! lives in the oracle implementation, mirroring how a test harness models
//! "click approve".

use crate::error::WalletError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use headless_wallet_rpc::{ResponseResult, RpcRequest};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::trace;
use uuid::Uuid;

/// The remaining pipeline for one request. Must be run at most once.
pub type Proceed<'a> = BoxFuture<'a, ResponseResult>;

/// Decides whether a request may proceed into the handler chain.
#[async_trait]
pub trait AuthorizationOracle: Send + Sync {
    /// Holds `proceed` until a decision is made for `request`.
    ///
    /// On approval the oracle runs the continuation exactly once and resolves
    /// with its response; on rejection it resolves with an error response
    /// without ever running it. An oracle that never decides leaves the
    /// dispatch unsettled; timeouts are the caller's policy.
    async fn authorize(&self, request: &RpcRequest, proceed: Proceed<'_>) -> ResponseResult;
}

/// Approves every request immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoApprove;

#[async_trait]
impl AuthorizationOracle for AutoApprove {
    async fn authorize(&self, _request: &RpcRequest, proceed: Proceed<'_>) -> ResponseResult {
        proceed.await
    }
}

struct PendingAuthorization {
    id: Uuid,
    request: RpcRequest,
    decision: oneshot::Sender<bool>,
}

/// A pending request as seen by the harness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: Uuid,
    pub request: RpcRequest,
}

/// An oracle driven by an external harness: requests queue up until
/// [`approve`](Self::approve) or [`reject`](Self::reject) is called for them.
///
/// A pending entry is removed the moment its decision is delivered.
#[derive(Default)]
pub struct ManualAuthorization {
    pending: Mutex<Vec<PendingAuthorization>>,
}

impl ManualAuthorization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the requests currently awaiting a decision, oldest first.
    pub fn pending(&self) -> Vec<PendingRequest> {
        self.pending
            .lock()
            .iter()
            .map(|p| PendingRequest { id: p.id, request: p.request.clone() })
            .collect()
    }

    /// Approves the pending request with `id`. Returns `false` if no such
    /// request is waiting.
    pub fn approve(&self, id: Uuid) -> bool {
        self.decide(id, true)
    }

    /// Rejects the pending request with `id`.
    pub fn reject(&self, id: Uuid) -> bool {
        self.decide(id, false)
    }

    /// Approves the oldest pending request, if any.
    pub fn approve_next(&self) -> bool {
        self.next_id().is_some_and(|id| self.approve(id))
    }

    /// Rejects the oldest pending request, if any.
    pub fn reject_next(&self) -> bool {
        self.next_id().is_some_and(|id| self.reject(id))
    }

    fn next_id(&self) -> Option<Uuid> {
        self.pending.lock().first().map(|p| p.id)
    }

    fn decide(&self, id: Uuid, approved: bool) -> bool {
        let entry = {
            let mut pending = self.pending.lock();
            let Some(pos) = pending.iter().position(|p| p.id == id) else { return false };
            pending.remove(pos)
        };
        trace!(target: "wallet::authorize", %id, approved, "authorization decided");
        entry.decision.send(approved).is_ok()
    }
}

#[async_trait]
impl AuthorizationOracle for ManualAuthorization {
    async fn authorize(&self, request: &RpcRequest, proceed: Proceed<'_>) -> ResponseResult {
        let (tx, rx) = oneshot::channel();
        let id = Uuid::new_v4();
        self.pending.lock().push(PendingAuthorization {
            id,
            request: request.clone(),
            decision: tx,
        });
        trace!(target: "wallet::authorize", %id, method = %request.method, "awaiting authorization");

        match rx.await {
            Ok(true) => proceed.await,
            // an explicit rejection, or a decision channel dropped by the
            // harness, reads as a refusal rather than a hang
            Ok(false) | Err(_) => ResponseResult::Error(WalletError::Rejected.to_rpc_error()),
        }
    }
}
