use dioxus::prelude::*;

use skilldao_common::format::format_address;

use super::dao_api::{use_dao_action, use_dao_coroutine, DaoAction};
use super::forms::{CertifyForm, EndorseForm, VerifyForm};
use super::panels::{ActivityFeed, CertificationCard, LoadingOverlay, NotificationBanner, StatsBar};
use super::ui_state::{use_ui_state, UiState};

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(UiState::new()));
    use_dao_coroutine();

    rsx! {
        div { class: "skilldao-app",
            Header {}
            NotificationBanner {}
            main {
                StatsBar {}
                section { class: "forms",
                    CertifyForm {}
                    EndorseForm {}
                    VerifyForm {}
                }
                CertificationCard {}
                ActivityFeed {}
            }
            LoadingOverlay {}
        }
    }
}

#[component]
fn Header() -> Element {
    let ui = use_ui_state();
    let dao = use_dao_action();

    let state = ui.read();
    let identity = state.identity;
    let balance = state.balance.clone();
    let wallet_installed = state.wallet_installed;
    let busy = state.busy();
    drop(state);

    rsx! {
        header { class: "app-header",
            div { class: "header-top",
                h1 { "SkillDAO" }
                p { "Decentralized skill certification" }
            }
            div { class: "wallet-info",
                match identity {
                    Some(identity) => rsx! {
                        span { class: "account-address", "{format_address(&identity)}" }
                        if let Some(balance) = balance {
                            span { class: "account-balance", "{balance}" }
                        }
                        span { class: "connection-status connected", "Connected" }
                    },
                    None => rsx! {
                        button {
                            class: "connect-button",
                            disabled: busy,
                            onclick: move |_| dao.send(DaoAction::Connect),
                            if wallet_installed { "Connect Wallet" } else { "Install MetaMask" }
                        }
                    },
                }
            }
        }
    }
}
