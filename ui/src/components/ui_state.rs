use alloy_primitives::Address;
use dioxus::prelude::*;

use skilldao_client::render::{Form, RenderSurface};
use skilldao_common::activity::ActivityEntry;
use skilldao_common::certification::Certification;
use skilldao_common::notification::Notification;
use skilldao_common::stats::PlatformStats;

use super::dao_api::DaoAction;

/// Raw text of the create-certification form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CertifyInputs {
    pub skill_name: String,
    /// Selected ordinal as text, empty until chosen.
    pub level: String,
    pub description: String,
}

/// Raw text of the endorse form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EndorseInputs {
    pub certification_id: String,
    pub message: String,
}

/// Everything the page renders. Written by the controller through
/// [`SignalSurface`], and by form inputs.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Whether `window.ethereum` was found at startup.
    pub wallet_installed: bool,
    /// Connected account, `None` when disconnected.
    pub identity: Option<Address>,
    /// Formatted balance, e.g. `1.5000 ETH`.
    pub balance: Option<String>,
    pub stats: PlatformStats,
    /// Last successful lookup.
    pub certification: Option<Certification>,
    /// Most recent first.
    pub activity: Vec<ActivityEntry>,
    /// The single visible notification.
    pub notification: Option<Notification>,
    /// A transaction or lookup is awaiting the ledger.
    pub loading: bool,
    /// Set on click, before the action reaches the controller. Submit
    /// buttons stay disabled until the controller has finished with it.
    pub in_flight: bool,
    pub certify: CertifyInputs,
    pub endorse: EndorseInputs,
    /// Certification id or owner address typed into the verify form.
    pub verify_key: String,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn busy(&self) -> bool {
        self.loading || self.in_flight
    }

    /// Claim the submit slot. Returns `false` when an action is already running.
    pub fn begin_submit(&mut self) -> bool {
        if self.busy() {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn clear_form(&mut self, form: Form) {
        match form {
            Form::Certify => self.certify = CertifyInputs::default(),
            Form::Endorse => self.endorse = EndorseInputs::default(),
        }
    }

    /// Drop the banner if it is still showing `ticket`.
    pub fn dismiss(&mut self, ticket: u64) {
        if self.notification.as_ref().is_some_and(|n| n.ticket == ticket) {
            self.notification = None;
        }
    }
}

pub fn use_ui_state() -> Signal<UiState> {
    use_context::<Signal<UiState>>()
}

/// [`RenderSurface`] that writes into the page's [`UiState`] signal.
#[derive(Clone, Copy)]
pub struct SignalSurface {
    state: Signal<UiState>,
}

impl SignalSurface {
    pub fn new(state: Signal<UiState>) -> Self {
        Self { state }
    }
}

impl RenderSurface for SignalSurface {
    fn show_connection(&mut self, identity: Option<Address>) {
        self.state.write().identity = identity;
    }

    fn show_balance(&mut self, balance: Option<String>) {
        self.state.write().balance = balance;
    }

    fn show_stats(&mut self, stats: &PlatformStats) {
        self.state.write().stats = stats.clone();
    }

    fn show_certification(&mut self, certification: &Certification) {
        self.state.write().certification = Some(certification.clone());
    }

    fn show_activity(&mut self, entries: &[ActivityEntry]) {
        self.state.write().activity = entries.to_vec();
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.state.write().notification = Some(notification.clone());

        // Ask the controller to dismiss once the deadline passes. A newer
        // notification has a newer ticket, so a stale timer does nothing.
        let ticket = notification.ticket;
        let ttl_ms = (notification.dismiss_at - chrono::Utc::now())
            .num_milliseconds()
            .clamp(0, i64::from(u32::MAX)) as u32;
        spawn(async move {
            #[cfg(target_family = "wasm")]
            gloo_timers::future::TimeoutFuture::new(ttl_ms).await;
            #[cfg(not(target_family = "wasm"))]
            let _ = ttl_ms;
            consume_context::<Coroutine<DaoAction>>().send(DaoAction::DismissNotification(ticket));
        });
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.write().loading = loading;
    }

    fn clear_form(&mut self, form: Form) {
        self.state.write().clear_form(form);
    }
}
