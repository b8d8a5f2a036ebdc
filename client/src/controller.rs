//! The certification lifecycle controller.
//!
//! Every user action runs validator → executor or dispatcher → activity feed
//! and notification. Each handler produces exactly one notification, leaves
//! the loading indicator off when it returns, and clears a form only after a
//! confirmed transaction.

use alloy_primitives::Address;
use chrono::Utc;
use skilldao_common::activity::{demo_activity, ActivityEntry, ActivityKind, ActivityLedger};
use skilldao_common::contract::{ContractCall, LedgerContract, Receipt};
use skilldao_common::error::{CertError, CertResult};
use skilldao_common::format::format_eth;
use skilldao_common::notification::{NotificationChannel, Severity, NOTIFICATION_TTL_MS};
use skilldao_common::stats::PlatformStats;
use skilldao_common::validation::{validate_certify, validate_endorse};
use skilldao_common::wallet::WalletProvider;

use crate::config::ClientConfig;
use crate::executor::TransactionExecutor;
use crate::render::{Form, LoadingGuard, RenderSurface};
use crate::session::{SessionChange, WalletSession};
use crate::verification::{Verification, VerificationDispatcher};

/// User-facing operations, for message selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Connect,
    CreateCertification,
    EndorseSkill,
    Verify,
}

impl Operation {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Connect => "Wallet connected successfully!",
            Self::CreateCertification => "Certification created successfully!",
            Self::EndorseSkill => "Endorsement submitted successfully!",
            Self::Verify => "Certification found",
        }
    }

    /// The single notification text for `err` raised by this operation.
    pub fn failure_message(self, err: &CertError) -> &'static str {
        match (self, err) {
            (_, CertError::NotConnected) => "Please connect your wallet first",
            (_, CertError::ProviderUnavailable) => {
                "Please install MetaMask to use this application"
            }
            (Self::Verify, CertError::MissingField(_)) => {
                "Please enter a certification ID or address"
            }
            (_, CertError::MissingField(_)) => "Please fill in all fields",
            (_, CertError::InvalidKeyFormat(_)) => "Invalid certification ID or address format",
            (_, CertError::InvalidLevel(_)) => "Please choose a skill level from 1 to 4",
            (_, CertError::InvalidCertificationId(_)) => "Certification ID must be a number",
            (Self::Connect, _) => "Failed to connect wallet",
            (Self::CreateCertification, _) => "Failed to create certification",
            (Self::EndorseSkill, _) => "Failed to endorse skill",
            (Self::Verify, _) => "Certification not found or invalid",
        }
    }
}

pub const ADDRESS_LOOKUP_UNAVAILABLE: &str = "Address lookup feature coming soon!";
const RECENT_ACTIVITY_DETAIL: &str = "Your recent activity";

/// Owns the client-side state and wires it to the display.
pub struct SkillDao<W: WalletProvider, R: RenderSurface> {
    session: WalletSession<W>,
    executor: TransactionExecutor,
    dispatcher: VerificationDispatcher,
    activity: ActivityLedger,
    notifications: NotificationChannel,
    surface: R,
}

impl<W: WalletProvider, R: RenderSurface> SkillDao<W, R> {
    pub fn new(provider: Option<W>, surface: R, config: &ClientConfig) -> Self {
        let ttl = chrono::Duration::from_std(config.notification_ttl)
            .unwrap_or_else(|_| chrono::Duration::milliseconds(NOTIFICATION_TTL_MS));
        Self {
            session: WalletSession::new(provider, config.contract_address),
            executor: TransactionExecutor,
            dispatcher: VerificationDispatcher,
            activity: ActivityLedger::with_capacity(config.activity_capacity),
            notifications: NotificationChannel::with_ttl(ttl),
            surface,
        }
    }

    pub fn session(&self) -> &WalletSession<W> {
        &self.session
    }

    pub fn activity(&self) -> &ActivityLedger {
        &self.activity
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// Startup: demo feed, silent reconnect to an authorized identity, stats.
    pub async fn init(&mut self) {
        self.activity.seed(demo_activity(Utc::now()));
        self.surface.show_activity(&self.activity.snapshot());

        if self.session.provider().is_some() {
            match self.session.restore().await {
                Ok(change) => self.apply_session_change(change).await,
                Err(e) => tracing::error!("Error checking wallet connection: {e}"),
            }
        }
        self.refresh_stats().await;
    }

    pub async fn connect(&mut self) -> CertResult<Address> {
        match self.session.connect().await {
            Ok(change) => {
                self.apply_session_change(change).await;
                self.notify(Operation::Connect.success_message(), Severity::Success);
                self.session.identity().ok_or(CertError::NotConnected)
            }
            Err(e) => {
                tracing::error!("Error connecting wallet: {e}");
                self.notify(Operation::Connect.failure_message(&e), Severity::Error);
                Err(e)
            }
        }
    }

    /// Identity-change event from the wallet.
    pub async fn identities_changed(&mut self, identities: Vec<Address>) {
        let change = self.session.identities_changed(&identities);
        self.apply_session_change(change).await;
    }

    pub async fn certify(
        &mut self,
        skill_name: &str,
        level: &str,
        description: &str,
    ) -> CertResult<Receipt> {
        let op = Operation::CreateCertification;
        let request = self
            .require_session()
            .and_then(|_| validate_certify(skill_name, level, description))
            .map_err(|e| self.reject(op, e))?;

        let label = format!("New certification: {}", request.skill_name);
        let call = ContractCall::CreateCertification(request);
        self.run_transaction(op, call, Form::Certify, ActivityKind::Certification, label)
            .await
    }

    pub async fn endorse(&mut self, certification_id: &str, message: &str) -> CertResult<Receipt> {
        let op = Operation::EndorseSkill;
        let request = self
            .require_session()
            .and_then(|_| validate_endorse(certification_id, message))
            .map_err(|e| self.reject(op, e))?;

        let label = format!("Endorsed certification #{certification_id}");
        let call = ContractCall::EndorseSkill(request);
        self.run_transaction(op, call, Form::Endorse, ActivityKind::Endorsement, label)
            .await
    }

    pub async fn verify(&mut self, key: &str) -> CertResult<Verification> {
        let op = Operation::Verify;
        let key = self.dispatcher.classify(key).map_err(|e| self.reject(op, e))?;

        let outcome = {
            let _loading = LoadingGuard::new(&mut self.surface);
            let contract = self.session.active().map(|s| s.contract());
            self.dispatcher.resolve(&key, contract).await
        };

        match outcome {
            Ok(Verification::Found(cert)) => {
                tracing::info!("Verified certification #{}", cert.id);
                self.surface.show_certification(&cert);
                Ok(Verification::Found(cert))
            }
            Ok(Verification::AddressLookupUnavailable(owner)) => {
                self.notify(ADDRESS_LOOKUP_UNAVAILABLE, Severity::Info);
                Ok(Verification::AddressLookupUnavailable(owner))
            }
            Err(e) => {
                tracing::error!("Error verifying certification: {e}");
                self.notify(op.failure_message(&e), Severity::Error);
                Err(e)
            }
        }
    }

    /// Re-read `totalSupply`. Failures are logged, never shown.
    pub async fn refresh_stats(&mut self) {
        let Some(session) = self.session.active() else {
            return;
        };
        match session.contract().total_supply().await {
            Ok(total) => self
                .surface
                .show_stats(&PlatformStats::from_total_supply(total)),
            Err(e) => tracing::error!("Error updating stats: {e}"),
        }
    }

    /// Re-read the connected identity's balance. Failures are logged, never shown.
    pub async fn refresh_balance(&mut self) {
        match self.session.balance().await {
            Ok(balance) => self.surface.show_balance(balance.map(format_eth)),
            Err(e) => tracing::error!("Error fetching balance: {e}"),
        }
    }

    /// Timer callback for the notification slot.
    pub fn dismiss_notification(&mut self, ticket: u64) -> bool {
        self.notifications.dismiss(ticket)
    }

    async fn run_transaction(
        &mut self,
        op: Operation,
        call: ContractCall,
        form: Form,
        kind: ActivityKind,
        label: String,
    ) -> CertResult<Receipt> {
        let outcome = {
            let _loading = LoadingGuard::new(&mut self.surface);
            self.executor.execute(&call, self.session.active()).await
        };

        match outcome {
            Ok(receipt) => {
                self.notify(op.success_message(), Severity::Success);
                self.surface.clear_form(form);
                self.activity.append(ActivityEntry::new(
                    kind,
                    label,
                    RECENT_ACTIVITY_DETAIL,
                    Utc::now(),
                ));
                self.surface.show_activity(&self.activity.snapshot());
                self.refresh_stats().await;
                Ok(receipt)
            }
            Err(e) => {
                if e.is_ledger() {
                    tracing::error!("Error running {}: {e}", call.name());
                } else {
                    tracing::warn!("{} not sent: {e}", call.name());
                }
                self.notify(op.failure_message(&e), Severity::Error);
                Err(e)
            }
        }
    }

    async fn apply_session_change(&mut self, change: SessionChange) {
        match change {
            SessionChange::Unchanged => return,
            SessionChange::Connected(identity) => tracing::info!("Connected as {identity}"),
            SessionChange::Switched { from, to } => tracing::info!("Identity changed {from} -> {to}"),
            SessionChange::Disconnected => tracing::info!("Wallet disconnected"),
        }
        self.surface.show_connection(self.session.identity());
        self.refresh_balance().await;
    }

    fn require_session(&self) -> CertResult<()> {
        if self.session.is_connected() {
            Ok(())
        } else {
            Err(CertError::NotConnected)
        }
    }

    /// Report an error caught before any network call.
    fn reject(&mut self, op: Operation, err: CertError) -> CertError {
        if err.is_validation() {
            tracing::debug!("{op:?} rejected: {err}");
        } else {
            tracing::warn!("{op:?} rejected: {err}");
        }
        self.notify(op.failure_message(&err), Severity::Error);
        err
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        let notification = self.notifications.notify(message, severity, Utc::now());
        self.surface.show_notification(notification);
    }
}
