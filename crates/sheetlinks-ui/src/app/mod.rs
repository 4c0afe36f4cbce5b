//! Root component and browser glue.
//!
//! # Design
//! - Endpoint configuration and initial data are read once from the server
//!   page (`app-urls` dataset and the bootstrap JSON block).
//! - Components receive store slices as props and emit typed callbacks; every
//!   side effect runs here through a `features` workflow.
//! - The root selects store slices with `use_selector`, so it re-renders only
//!   when a slice it renders changed.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::utils::{document, window};
use sheetlinks_client::{AppUrls, CancelToken, GlooTimer, Timer, UploadPayload};
use web_sys::File;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::components::links::{LinkField, LinkForm, LinkLists};
use crate::components::sections::{SectionForm, SectionPills};
use crate::components::stats::StatsBar;
use crate::components::toast::ToastHost;
use crate::components::upload::{ProgressPanel, UploadForm};
use crate::core::{dom, report};
use crate::core::store::{DashboardStore, push_toast};
use crate::features::bootstrap::{BOOTSTRAP_ELEMENT_ID, initial_store, initialize};
use crate::features::links::add_link;
use crate::features::sections::create_section;
use crate::features::upload::{UploadOutcome, run_upload};
use crate::models::ToastKind;

mod api;

use api::ApiCtx;

/// Mount point on the server page.
const ROOT_ELEMENT_ID: &str = "dashboard-root";

#[function_component(DashboardApp)]
fn dashboard_app() -> Html {
    let dispatch = Dispatch::<DashboardStore>::new();
    let api_ctx = use_memo(|_| ApiCtx::new(read_app_urls()), ());
    let upload_token = use_mut_ref(|| None as Option<CancelToken>);

    let stats = use_selector(|store: &DashboardStore| store.stats.clone());
    let upload = use_selector(|store: &DashboardStore| store.upload.clone());
    let upload_form_epoch = use_selector(|store: &DashboardStore| store.upload_form_epoch);
    let spreadsheets = use_selector(|store: &DashboardStore| store.spreadsheets.clone());
    let sections = use_selector(|store: &DashboardStore| store.sections.clone());
    let sections_epoch = use_selector(|store: &DashboardStore| store.sections_epoch);
    let section_links = use_selector(|store: &DashboardStore| store.section_links.clone());
    let section_form = use_selector(|store: &DashboardStore| store.section_form.clone());
    let link_form = use_selector(|store: &DashboardStore| store.link_form.clone());
    let statuses = use_selector(|store: &DashboardStore| store.statuses.clone());
    let toasts = use_selector(|store: &DashboardStore| store.toasts.toasts().to_vec());

    {
        let api = (*api_ctx).clone();
        let dispatch = dispatch.clone();
        let upload_token = upload_token.clone();
        use_effect_with_deps(
            move |_| {
                yew::platform::spawn_local(async move {
                    if let Err(err) = initialize(api.client.as_ref(), &GlooTimer, &dispatch).await
                    {
                        report::degraded("initialize dashboard", &err.to_string());
                    }
                });
                move || {
                    if let Some(token) = upload_token.borrow_mut().take() {
                        token.cancel();
                    }
                }
            },
            (),
        );
    }

    let on_upload = {
        let api = (*api_ctx).clone();
        let dispatch = dispatch.clone();
        Callback::from(move |file: Option<File>| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            let upload_token = upload_token.clone();
            yew::platform::spawn_local(async move {
                upload_file(&api, &dispatch, &upload_token, file).await;
            });
        })
    };

    let on_spreadsheet = {
        let dispatch = dispatch.clone();
        Callback::from(move |value: String| {
            dispatch.reduce_mut(|state| state.section_form.spreadsheet_id = value);
        })
    };
    let on_section_name = {
        let dispatch = dispatch.clone();
        Callback::from(move |value: String| {
            dispatch.reduce_mut(|state| state.section_form.set_name(value));
        })
    };
    let on_create_section = {
        let api = (*api_ctx).clone();
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            yew::platform::spawn_local(async move {
                create_section(api.client.as_ref(), &GlooTimer, &dispatch).await;
            });
        })
    };

    let on_link_change = {
        let dispatch = dispatch.clone();
        Callback::from(move |field: LinkField| {
            dispatch.reduce_mut(|state| match field {
                LinkField::Section(value) => state.link_form.section_id = value,
                LinkField::Title(value) => state.link_form.title = value,
                LinkField::Url(value) => state.link_form.set_url(value),
                LinkField::Status(value) => state.link_form.status = value,
            });
        })
    };
    let on_add_link = {
        let api = (*api_ctx).clone();
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            let api = api.clone();
            let dispatch = dispatch.clone();
            yew::platform::spawn_local(async move {
                add_link(api.client.as_ref(), &GlooTimer, &dispatch).await;
            });
        })
    };

    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: u64| {
            dispatch.reduce_mut(|state| {
                state.toasts.dismiss(id);
            });
        })
    };

    html! {
        <div class="dashboard">
            <StatsBar stats={(*stats).clone()} />
            <section class="upload-section">
                <UploadForm
                    key={upload_form_epoch.to_string()}
                    busy={upload.in_flight}
                    on_submit={on_upload}
                />
                <ProgressPanel panel={(*upload).clone()} />
            </section>
            <SectionPills sections={(*sections).clone()} epoch={*sections_epoch} />
            <SectionForm
                spreadsheets={(*spreadsheets).clone()}
                form={(*section_form).clone()}
                on_spreadsheet={on_spreadsheet}
                on_name={on_section_name}
                on_submit={on_create_section}
            />
            <LinkForm
                sections={(*sections).clone()}
                statuses={(*statuses).clone()}
                form={(*link_form).clone()}
                on_change={on_link_change}
                on_submit={on_add_link}
            />
            <LinkLists section_links={(*section_links).clone()} />
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
        </div>
    }
}

async fn upload_file(
    api: &ApiCtx,
    dispatch: &Dispatch<DashboardStore>,
    upload_token: &Rc<RefCell<Option<CancelToken>>>,
    file: Option<File>,
) {
    let payload = match file {
        Some(file) => match read_payload(file).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                report::failure("read selected file", &err);
                push_toast(dispatch, ToastKind::Error, err, GlooTimer.now_ms());
                return;
            }
        },
        None => None,
    };

    let token = CancelToken::new();
    upload_token.borrow_mut().replace(token.clone());
    let outcome = run_upload(api.client.as_ref(), &GlooTimer, dispatch, payload, &token).await;
    if outcome == UploadOutcome::Completed {
        if let Err(err) = window().location().reload() {
            report::degraded("reload after upload", &format!("{err:?}"));
        }
    }
}

async fn read_payload(file: File) -> Result<UploadPayload, String> {
    let name = file.name();
    let content_type = file.type_();
    let blob = gloo::file::File::from(file);
    let bytes = gloo::file::futures::read_as_bytes(&blob)
        .await
        .map_err(|err| format!("Could not read {name}: {err}"))?;
    let payload = UploadPayload::new(name, bytes);
    Ok(if content_type.is_empty() {
        payload
    } else {
        payload.with_content_type(content_type)
    })
}

fn read_app_urls() -> AppUrls {
    let Some(element) = document().get_element_by_id(dom::APP_URLS) else {
        report::degraded("read app urls", "missing #app-urls element, using defaults");
        return AppUrls::default();
    };
    let entries: Vec<(String, String)> = element
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter(|name| name.starts_with("data-"))
        .filter_map(|name| element.get_attribute(&name).map(|value| (name, value)))
        .collect();
    AppUrls::from_dataset(entries)
}

fn read_bootstrap_text() -> Option<String> {
    document()
        .get_element_by_id(BOOTSTRAP_ELEMENT_ID)
        .and_then(|element| element.text_content())
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    Dispatch::<DashboardStore>::new().set(initial_store(read_bootstrap_text().as_deref()));
    if let Some(root) = document().get_element_by_id(ROOT_ELEMENT_ID) {
        yew::Renderer::<DashboardApp>::with_root(root).render();
    } else {
        yew::Renderer::<DashboardApp>::new().render();
    }
}
