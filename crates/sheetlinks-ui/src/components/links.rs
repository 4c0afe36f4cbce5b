//! Link lists and the link creation form.

use yew::prelude::*;

use crate::components::sections::render_options;
use crate::core::dom;
use crate::core::logic::{link_items, section_options, status_options};
use crate::core::store::{LinkFormState, StatusOptions};
use crate::models::{SectionLinks, SectionSummary};

/// Field edited in the link form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LinkField {
    Section(String),
    Title(String),
    Url(String),
    Status(String),
}

#[derive(Properties, PartialEq)]
pub(crate) struct LinkFormProps {
    pub sections: Vec<SectionSummary>,
    pub statuses: StatusOptions,
    pub form: LinkFormState,
    pub on_change: Callback<LinkField>,
    pub on_submit: Callback<()>,
}

#[function_component(LinkForm)]
pub(crate) fn link_form(props: &LinkFormProps) -> Html {
    let on_select = |wrap: fn(String) -> LinkField| {
        let on_change = props.on_change.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>() {
                on_change.emit(wrap(select.value()));
            }
        })
    };
    let on_text = |wrap: fn(String) -> LinkField| {
        let on_change = props.on_change.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_change.emit(wrap(input.value()));
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
        <form id={dom::ADD_LINK_FORM} onsubmit={on_submit}>
            <select id={dom::LINK_SECTION} class="form-select" onchange={on_select(LinkField::Section)}>
                {render_options(&section_options(&props.sections), &form.section_id)}
            </select>
            <input
                id={dom::LINK_TITLE}
                type="text"
                class="form-control"
                value={form.title.clone()}
                oninput={on_text(LinkField::Title)}
            />
            <input
                id={dom::LINK_URL}
                type="url"
                class={classes!("form-control", form.url_error.is_some().then_some("is-invalid"))}
                value={form.url.clone()}
                oninput={on_text(LinkField::Url)}
            />
            <div
                id={dom::LINK_ERROR}
                class="invalid-feedback"
                style={if form.url_error.is_some() { "display: block" } else { "display: none" }}
            >
                {form.url_error.clone().unwrap_or_default()}
            </div>
            <select
                id={dom::LINK_STATUS}
                class="form-select"
                disabled={!matches!(props.statuses, StatusOptions::Ready(_))}
                onchange={on_select(LinkField::Status)}
            >
                {render_options(&status_options(&props.statuses), &form.status)}
            </select>
            <button type="submit" class="btn btn-success">{"Add Link"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct LinkListsProps {
    pub section_links: Vec<SectionLinks>,
}

#[function_component(LinkLists)]
pub(crate) fn link_lists(props: &LinkListsProps) -> Html {
    html! {
        {for props.section_links.iter().map(|entry| html! {
            <div key={entry.section_id.to_string()} id={dom::section_block_id(entry.section_id)}>
                <div class={classes!("list-group", dom::LINK_LIST_CLASS)}>
                    {for link_items(&entry.links).into_iter().map(|item| html! {
                        <a
                            href={item.url}
                            class={classes!("list-group-item", "list-group-item-action", item.status.clone())}
                            target="_blank"
                            rel="noopener noreferrer"
                        >
                            {item.title}
                            <span class={classes!("badge", item.badge_class)}>{item.status}</span>
                        </a>
                    })}
                </div>
            </div>
        })}
    }
}
