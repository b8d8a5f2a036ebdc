use dioxus::prelude::*;

use skilldao_common::activity::ActivityKind;
use skilldao_common::format::format_age;

use super::ui_state::use_ui_state;

#[component]
pub fn StatsBar() -> Element {
    let ui = use_ui_state();
    let stats = ui.read().stats.clone();

    rsx! {
        div { class: "stats-bar",
            div { class: "stat",
                span { class: "stat-value", "{stats.total_certifications}" }
                span { class: "stat-label", "Certifications" }
            }
            div { class: "stat",
                span { class: "stat-value", "{stats.estimated_endorsements}" }
                span { class: "stat-label", "Endorsements" }
            }
            div { class: "stat",
                span { class: "stat-value", "{stats.estimated_validators}" }
                span { class: "stat-label", "Validators" }
            }
        }
    }
}

#[component]
pub fn CertificationCard() -> Element {
    let ui = use_ui_state();
    let Some(certification) = ui.read().certification.clone() else {
        return rsx! {};
    };

    rsx! {
        div { class: "certification-card",
            h3 { "Certification Details" }
            for (label, value) in certification.detail_rows() {
                div { class: "detail-row",
                    span { class: "detail-label", "{label}" }
                    span { class: "detail-value", "{value}" }
                }
            }
        }
    }
}

#[component]
pub fn ActivityFeed() -> Element {
    let ui = use_ui_state();
    let entries = ui.read().activity.clone();
    let now = chrono::Utc::now();

    rsx! {
        div { class: "activity-feed",
            h3 { "Recent Activity" }
            for entry in entries {
                div {
                    class: match entry.kind {
                        ActivityKind::Certification => "activity-item certification",
                        ActivityKind::Endorsement => "activity-item endorsement",
                    },
                    div { class: "activity-title", "{entry.label}" }
                    div { class: "activity-detail", "{entry.detail}" }
                    div { class: "activity-time", "{format_age(&now, &entry.timestamp)}" }
                }
            }
        }
    }
}

#[component]
pub fn NotificationBanner() -> Element {
    let ui = use_ui_state();
    let Some(notification) = ui.read().notification.clone() else {
        return rsx! {};
    };

    rsx! {
        div { class: "notification {notification.severity}",
            "{notification.message}"
        }
    }
}

#[component]
pub fn LoadingOverlay() -> Element {
    let ui = use_ui_state();
    if !ui.read().loading {
        return rsx! {};
    }

    rsx! {
        div { class: "loading-overlay",
            div { class: "spinner" }
            p { "Waiting for confirmation..." }
        }
    }
}
