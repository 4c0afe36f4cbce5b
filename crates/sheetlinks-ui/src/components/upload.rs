//! Upload form and progress panel.
//!
//! # Design
//! - The form only picks a file and emits it; reading and sending happen in
//!   the upload workflow.
//! - The parent keys the form by the store's upload epoch, so bumping the
//!   epoch remounts it with an empty file input.

use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};
use yew::prelude::*;

use crate::core::dom;
use crate::core::store::UploadPanel;

#[derive(Properties, PartialEq)]
pub(crate) struct UploadFormProps {
    pub busy: bool,
    pub on_submit: Callback<Option<File>>,
}

#[function_component(UploadForm)]
pub(crate) fn upload_form(props: &UploadFormProps) -> Html {
    let file = use_state(|| None as Option<File>);

    let on_change = {
        let file = file.clone();
        Callback::from(move |event: Event| {
            let picked = event
                .target()
                .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            file.set(picked);
        })
    };

    let on_submit = {
        let file = file.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit((*file).clone());
        })
    };

    html! {
        <form id={dom::UPLOAD_FORM} enctype="multipart/form-data" onsubmit={on_submit}>
            <input
                type="file"
                name="file"
                class="form-control"
                accept=".csv,.xls,.xlsx"
                onchange={on_change}
            />
            <button type="submit" class="btn btn-primary" disabled={props.busy}>{"Upload"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ProgressPanelProps {
    pub panel: UploadPanel,
}

#[function_component(ProgressPanel)]
pub(crate) fn progress_panel(props: &ProgressPanelProps) -> Html {
    let panel = &props.panel;
    let display = if panel.visible {
        "display: block"
    } else {
        "display: none"
    };

    html! {
        <div id={dom::UPLOAD_PROGRESS_CONTAINER} style={display}>
            <div class="progress">
                <div
                    id={dom::UPLOAD_PROGRESS}
                    class={panel.bar_classes()}
                    role="progressbar"
                    style={format!("width: {}%", panel.percent)}
                    aria-valuenow={panel.percent.to_string()}
                    aria-valuemin="0"
                    aria-valuemax="100"
                />
            </div>
            <span id={dom::UPLOAD_PERCENTAGE}>{panel.percent_text.clone()}</span>
            <div id={dom::UPLOAD_STATUS}>{panel.status_text.clone()}</div>
            {
                panel.success_message.as_ref().map_or_else(
                    || html! {},
                    |message| html! {
                        <div id={dom::UPLOAD_SUCCESS_MESSAGE} class="alert alert-success">{message.clone()}</div>
                    },
                )
            }
        </div>
    }
}
