//! Section pills and the section creation form.

use yew::prelude::*;

use crate::core::dom;
use crate::core::logic::{section_pills, section_submit_label, spreadsheet_options};
use crate::core::store::SectionFormState;
use crate::models::{SectionSummary, SelectOption, SpreadsheetOption};

#[derive(Properties, PartialEq)]
pub(crate) struct SectionPillsProps {
    pub sections: Vec<SectionSummary>,
    /// Refresh counter; a new value replays the fade-in.
    pub epoch: u64,
}

#[function_component(SectionPills)]
pub(crate) fn section_pills_view(props: &SectionPillsProps) -> Html {
    html! {
        <div
            key={props.epoch.to_string()}
            class={classes!(dom::SECTION_LIST_CLASS, "d-flex", "flex-wrap", "fade-in")}
        >
            {for section_pills(&props.sections).into_iter().map(|pill| html! {
                <div class={dom::SECTION_PILL_CLASS} data-section-id={pill.id.to_string()}>
                    <a href={pill.href} class="section-link">
                        {pill.name}
                        <span class="badge bg-secondary ms-1">{pill.badge}</span>
                    </a>
                </div>
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct SectionFormProps {
    pub spreadsheets: Vec<SpreadsheetOption>,
    pub form: SectionFormState,
    pub on_spreadsheet: Callback<String>,
    pub on_name: Callback<String>,
    pub on_submit: Callback<()>,
}

#[function_component(SectionForm)]
pub(crate) fn section_form(props: &SectionFormProps) -> Html {
    let on_spreadsheet = {
        let on_spreadsheet = props.on_spreadsheet.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                on_spreadsheet.emit(select.value());
            }
        })
    };
    let on_name = {
        let on_name = props.on_name.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_name.emit(input.value());
            }
        })
    };
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(());
        })
    };
    let form = &props.form;

    html! {
        <form id={dom::CREATE_SECTION_FORM} onsubmit={on_submit}>
            <select id={dom::SPREADSHEET_SELECT} class="form-select" onchange={on_spreadsheet}>
                {render_options(&spreadsheet_options(&props.spreadsheets), &form.spreadsheet_id)}
            </select>
            <input
                id={dom::NEW_SECTION_NAME}
                type="text"
                class={classes!("form-control", form.name_error.is_some().then_some("is-invalid"))}
                value={form.name.clone()}
                oninput={on_name}
            />
            <div
                id={dom::SECTION_NAME_ERROR}
                class="invalid-feedback"
                style={if form.name_error.is_some() { "display: block" } else { "display: none" }}
            >
                {form.name_error.clone().unwrap_or_default()}
            </div>
            <button type="submit" class="btn btn-primary" disabled={form.busy}>
                if form.busy {
                    <span class="spinner-border spinner-border-sm" role="status" aria-hidden="true" />
                }
                {section_submit_label(form.busy)}
            </button>
        </form>
    }
}

/// `<option>` list with `selected` matching the current value.
pub(crate) fn render_options(options: &[SelectOption], selected: &str) -> Html {
    html! {
        {for options.iter().map(|option| html! {
            <option
                value={option.value.clone()}
                disabled={option.disabled}
                selected={option.value == selected}
            >
                {option.label.clone()}
            </option>
        })}
    }
}
