use alloy_primitives::Address;
use dioxus::prelude::*;

use skilldao_client::config::ClientConfig;
use skilldao_client::rpc::Eip1193Provider;
use skilldao_client::SkillDao;

use super::ethereum::BrowserEthereum;
use super::ui_state::{use_ui_state, SignalSurface};

/// Actions the UI sends to the controller coroutine.
#[derive(Debug, Clone)]
pub enum DaoAction {
    /// Ask the wallet to authorize an account.
    Connect,
    /// `accountsChanged` fired; an empty list means disconnected.
    IdentitiesChanged(Vec<Address>),
    /// Submit the create-certification form as typed.
    Certify {
        skill_name: String,
        level: String,
        description: String,
    },
    /// Submit the endorse form as typed.
    Endorse {
        certification_id: String,
        message: String,
    },
    /// Look up a certification id or owner address.
    Verify {
        key: String,
    },
    /// A notification timer fired for this ticket.
    DismissNotification(u64),
}

impl DaoAction {
    /// Actions started from a submit button, which hold the in-flight flag.
    fn is_submit(&self) -> bool {
        matches!(
            self,
            Self::Certify { .. } | Self::Endorse { .. } | Self::Verify { .. }
        )
    }
}

/// Get a handle to send actions to the controller coroutine.
pub fn use_dao_action() -> Coroutine<DaoAction> {
    use_coroutine_handle::<DaoAction>()
}

/// Start the controller coroutine.
///
/// The controller lives inside the coroutine and handles one action at a
/// time, so a handler never observes another handler's half-finished work.
pub fn use_dao_coroutine() {
    let mut ui = use_ui_state();

    use_coroutine(move |mut rx: UnboundedReceiver<DaoAction>| async move {
        use futures::StreamExt;

        let config = ClientConfig::from_build_env();
        let wallet = BrowserEthereum::detect();
        ui.write().wallet_installed = wallet.is_some();

        if let Some(wallet) = &wallet {
            let actions = consume_context::<Coroutine<DaoAction>>();
            wallet.on_accounts_changed(move |accounts| {
                actions.send(DaoAction::IdentitiesChanged(accounts));
            });
        }

        let provider = wallet.map(|w| Eip1193Provider::new(w, config.confirmation, "metamask"));
        let mut dao = SkillDao::new(provider, SignalSurface::new(ui), &config);
        dao.init().await;

        while let Some(action) = rx.next().await {
            tracing::debug!("Controller action: {:?}", action);
            let submit = action.is_submit();
            match action {
                DaoAction::Connect => {
                    let _ = dao.connect().await;
                }
                DaoAction::IdentitiesChanged(identities) => {
                    dao.identities_changed(identities).await;
                }
                DaoAction::Certify {
                    skill_name,
                    level,
                    description,
                } => {
                    let _ = dao.certify(&skill_name, &level, &description).await;
                }
                DaoAction::Endorse {
                    certification_id,
                    message,
                } => {
                    let _ = dao.endorse(&certification_id, &message).await;
                }
                DaoAction::Verify { key } => {
                    let _ = dao.verify(&key).await;
                }
                DaoAction::DismissNotification(ticket) => {
                    if dao.dismiss_notification(ticket) {
                        ui.write().dismiss(ticket);
                    }
                }
            }
            if submit {
                ui.write().in_flight = false;
            }
        }
    });
}
