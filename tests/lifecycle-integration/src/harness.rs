use std::time::Duration;

use alloy_primitives::Address;

use skilldao_client::config::{ClientConfig, ConfirmationPolicy};
use skilldao_client::render::{Form, RenderSurface};
use skilldao_client::rpc::Eip1193Provider;
use skilldao_client::SkillDao;
use skilldao_common::activity::ActivityEntry;
use skilldao_common::certification::Certification;
use skilldao_common::notification::{Notification, Severity};
use skilldao_common::stats::PlatformStats;

use crate::{init_tracing, make_dummy_identity, MemoryNode};

pub type TestDao = SkillDao<Eip1193Provider<MemoryNode>, ScreenRecorder>;

/// Everything the controller pushed to the display, in order.
#[derive(Debug, Default)]
pub struct ScreenRecorder {
    pub connection: Option<Address>,
    pub balance: Option<String>,
    pub stats: Option<PlatformStats>,
    pub certification: Option<Certification>,
    pub activity: Vec<ActivityEntry>,
    pub notifications: Vec<Notification>,
    pub loading: bool,
    pub loading_history: Vec<bool>,
    pub cleared: Vec<Form>,
}

impl ScreenRecorder {
    pub fn last_notification(&self) -> Option<(&str, Severity)> {
        self.notifications
            .last()
            .map(|n| (n.message.as_str(), n.severity))
    }
}

impl RenderSurface for ScreenRecorder {
    fn show_connection(&mut self, identity: Option<Address>) {
        self.connection = identity;
    }

    fn show_balance(&mut self, balance: Option<String>) {
        self.balance = balance;
    }

    fn show_stats(&mut self, stats: &PlatformStats) {
        self.stats = Some(stats.clone());
    }

    fn show_certification(&mut self, certification: &Certification) {
        self.certification = Some(certification.clone());
    }

    fn show_activity(&mut self, entries: &[ActivityEntry]) {
        self.activity = entries.to_vec();
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_history.push(loading);
    }

    fn clear_form(&mut self, form: Form) {
        self.cleared.push(form);
    }
}

/// A client wired to an in-memory node with two wallet accounts.
pub struct TestHarness {
    pub node: MemoryNode,
    pub dao: TestDao,
    pub alice: Address,
    pub bob: Address,
}

impl TestHarness {
    /// Fresh client, wallet installed but not yet connected.
    pub fn setup() -> Self {
        init_tracing();
        let alice = make_dummy_identity("Alice");
        let bob = make_dummy_identity("Bob");
        let node = MemoryNode::with_accounts(vec![alice, bob]);

        let config = ClientConfig {
            confirmation: ConfirmationPolicy {
                poll_interval: Duration::from_millis(1),
                max_polls: 5,
            },
            ..ClientConfig::default()
        };
        let provider = Eip1193Provider::new(node.clone(), config.confirmation, "memory");
        let dao = SkillDao::new(Some(provider), ScreenRecorder::default(), &config);
        Self {
            node,
            dao,
            alice,
            bob,
        }
    }

    /// Fresh client that has already connected as Alice.
    pub async fn connected() -> Self {
        let mut h = Self::setup();
        h.dao
            .connect()
            .await
            .expect("memory wallet should authorize");
        h
    }

    /// Client whose browser has no wallet extension.
    pub fn without_wallet() -> SkillDao<Eip1193Provider<MemoryNode>, ScreenRecorder> {
        init_tracing();
        SkillDao::new(None, ScreenRecorder::default(), &ClientConfig::default())
    }

    pub fn screen(&self) -> &ScreenRecorder {
        self.dao.surface()
    }

    /// Requests the node has seen so far.
    pub fn request_count(&self) -> usize {
        self.node.state().requests.len()
    }
}
