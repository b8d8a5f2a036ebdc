use dioxus::prelude::*;

use skilldao_common::certification::SkillLevel;

use super::dao_api::{use_dao_action, DaoAction};
use super::ui_state::use_ui_state;

#[component]
pub fn CertifyForm() -> Element {
    let mut ui = use_ui_state();
    let dao = use_dao_action();

    let state = ui.read();
    let inputs = state.certify.clone();
    let busy = state.busy();
    drop(state);

    rsx! {
        div { class: "certify-form",
            h2 { "Create Certification" }
            div { class: "form-group",
                label { "Skill name:" }
                input {
                    r#type: "text",
                    value: "{inputs.skill_name}",
                    oninput: move |evt| ui.write().certify.skill_name = evt.value(),
                }
            }
            div { class: "form-group",
                label { "Level:" }
                select {
                    value: "{inputs.level}",
                    onchange: move |evt| ui.write().certify.level = evt.value(),
                    option { value: "", "Select a level" }
                    for level in SkillLevel::all() {
                        option { value: "{level.ordinal()}", "{level.label()}" }
                    }
                }
            }
            div { class: "form-group",
                label { "Description:" }
                textarea {
                    value: "{inputs.description}",
                    oninput: move |evt| ui.write().certify.description = evt.value(),
                }
            }
            button {
                disabled: busy,
                onclick: move |_| {
                    if !ui.write().begin_submit() {
                        return;
                    }
                    let inputs = ui.read().certify.clone();
                    dao.send(DaoAction::Certify {
                        skill_name: inputs.skill_name,
                        level: inputs.level,
                        description: inputs.description,
                    });
                },
                "Create Certification"
            }
        }
    }
}

#[component]
pub fn EndorseForm() -> Element {
    let mut ui = use_ui_state();
    let dao = use_dao_action();

    let state = ui.read();
    let inputs = state.endorse.clone();
    let busy = state.busy();
    drop(state);

    rsx! {
        div { class: "endorse-form",
            h2 { "Endorse a Skill" }
            div { class: "form-group",
                label { "Certification ID:" }
                input {
                    r#type: "number",
                    min: "0",
                    value: "{inputs.certification_id}",
                    oninput: move |evt| ui.write().endorse.certification_id = evt.value(),
                }
            }
            div { class: "form-group",
                label { "Message:" }
                textarea {
                    value: "{inputs.message}",
                    oninput: move |evt| ui.write().endorse.message = evt.value(),
                }
            }
            button {
                disabled: busy,
                onclick: move |_| {
                    if !ui.write().begin_submit() {
                        return;
                    }
                    let inputs = ui.read().endorse.clone();
                    dao.send(DaoAction::Endorse {
                        certification_id: inputs.certification_id,
                        message: inputs.message,
                    });
                },
                "Endorse"
            }
        }
    }
}

#[component]
pub fn VerifyForm() -> Element {
    let mut ui = use_ui_state();
    let dao = use_dao_action();

    let state = ui.read();
    let key = state.verify_key.clone();
    let busy = state.busy();
    drop(state);

    rsx! {
        div { class: "verify-form",
            h2 { "Verify Certification" }
            div { class: "form-group",
                label { "Certification ID or address:" }
                input {
                    r#type: "text",
                    value: "{key}",
                    oninput: move |evt| ui.write().verify_key = evt.value(),
                }
            }
            button {
                disabled: busy,
                onclick: move |_| {
                    if !ui.write().begin_submit() {
                        return;
                    }
                    let key = ui.read().verify_key.clone();
                    dao.send(DaoAction::Verify { key });
                },
                "Verify"
            }
        }
    }
}
