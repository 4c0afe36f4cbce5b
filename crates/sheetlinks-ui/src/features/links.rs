//! Link creation workflow.

use sheetlinks_client::messages::{LINK_ADDED, LINK_FAILED};
use sheetlinks_client::validate::link_request;
use sheetlinks_client::{ClientError, DashboardApi, Timer};
use yewdux::prelude::Dispatch;

use crate::core::report;
use crate::core::store::{DashboardStore, LinkFormState, push_toast};
use crate::models::{LinkView, ToastKind};

/// Submit the link form as currently held in the store.
///
/// On success the link is prepended to its section's list (when that list is
/// on the page) and the form is reset.
pub async fn add_link<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
) -> Option<LinkView>
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    let form = dispatch.get().link_form.clone();
    let request = match link_request(&form.section_id, &form.title, &form.url, &form.status) {
        Ok(request) => request,
        Err(err) => {
            push_toast(dispatch, ToastKind::Error, err.to_string(), timer.now_ms());
            return None;
        }
    };

    match api.add_link(&request).await {
        Ok(link) => {
            let mut shown = false;
            if let Ok(section_id) = request.section_id.parse::<i64>() {
                dispatch.reduce_mut(|state| shown = state.prepend_link(section_id, link.clone()));
            }
            tracing::info!(section_id = %request.section_id, shown, "link added");
            dispatch.reduce_mut(|state| state.link_form = LinkFormState::default());
            push_toast(dispatch, ToastKind::Success, LINK_ADDED, timer.now_ms());
            Some(link)
        }
        Err(err) => {
            report::failure("add link", &err);
            push_toast(dispatch, ToastKind::Error, link_failure(&err), timer.now_ms());
            None
        }
    }
}

fn link_failure(error: &ClientError) -> String {
    match error {
        ClientError::Server { message, .. } | ClientError::Status { message, .. }
            if !message.trim().is_empty() =>
        {
            message.clone()
        }
        _ => LINK_FAILED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::seeded_dispatch;
    use crate::models::SectionLinks;
    use sheetlinks_client::testing::{ApiCall, FakeApi, InstantTimer};

    fn store_with(form: LinkFormState) -> Dispatch<DashboardStore> {
        seeded_dispatch(DashboardStore {
            section_links: vec![SectionLinks {
                section_id: 4,
                links: vec![LinkView {
                    title: "Old".to_string(),
                    url: "https://old.example".to_string(),
                    status: "active".to_string(),
                }],
            }],
            link_form: form,
            ..DashboardStore::default()
        })
    }

    fn filled(section_id: &str) -> LinkFormState {
        LinkFormState {
            section_id: section_id.to_string(),
            title: " Handbook ".to_string(),
            url: "https://handbook.example".to_string(),
            url_error: None,
            status: "pending".to_string(),
        }
    }

    #[tokio::test]
    async fn added_link_goes_first_and_form_resets() {
        let api = FakeApi::default();
        let timer = InstantTimer::default();
        let store = store_with(filled("4"));

        let link = add_link(&api, &timer, &store).await.expect("added");

        assert_eq!(link.title, "Handbook");
        assert_eq!(api.calls().len(), 1);
        assert!(matches!(&api.calls()[0], ApiCall::AddLink(req) if req.section_id == "4"));
        let state = store.get();
        let titles: Vec<&str> = state
            .links_for(4)
            .unwrap_or_default()
            .iter()
            .map(|link| link.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Handbook", "Old"]);
        assert_eq!(state.link_form, LinkFormState::default());
        assert_eq!(state.toasts.toasts()[0].message, LINK_ADDED);
    }

    #[tokio::test]
    async fn link_for_hidden_section_only_toasts() {
        let api = FakeApi::default();
        let timer = InstantTimer::default();
        let store = store_with(filled("9"));

        assert!(add_link(&api, &timer, &store).await.is_some());

        let state = store.get();
        assert_eq!(state.links_for(4).map(<[_]>::len), Some(1));
        assert_eq!(state.toasts.toasts()[0].kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn blank_field_blocks_request() {
        let api = FakeApi::default();
        let timer = InstantTimer::default();
        let mut form = filled("4");
        form.status.clear();
        let store = store_with(form);

        assert!(add_link(&api, &timer, &store).await.is_none());

        assert!(api.untouched());
        let state = store.get();
        assert_eq!(state.toasts.toasts()[0].message, "All fields are required");
        assert_eq!(state.link_form.title, " Handbook ");
    }

    #[tokio::test]
    async fn server_message_is_shown_and_form_kept() {
        let api = FakeApi::default().with_add_link(Err(ClientError::Server {
            status: 400,
            message: "Invalid status".to_string(),
            code: None,
        }));
        let timer = InstantTimer::default();
        let store = store_with(filled("4"));

        assert!(add_link(&api, &timer, &store).await.is_none());

        let state = store.get();
        assert_eq!(state.toasts.toasts()[0].message, "Invalid status");
        assert_eq!(state.toasts.toasts()[0].kind, ToastKind::Error);
        assert_eq!(state.link_form.status, "pending");
        assert_eq!(state.links_for(4).map(<[_]>::len), Some(1));
    }

    #[test]
    fn transport_failures_use_fallback_text() {
        assert_eq!(
            link_failure(&ClientError::Transport("reset".to_string())),
            "Failed to add link"
        );
    }
}
