use gloo::timers::callback::Timeout;
use sheetlinks_client::{GlooTimer, Timer};
use yew::prelude::*;

use crate::core::dom;
use crate::core::toast::remaining_ms;
use crate::models::Toast;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

/// Toast container; not rendered until the first toast exists.
#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Vec<Toast>| {
                let now = GlooTimer.now_ms();
                let mut handles = Vec::new();
                for toast in list {
                    let on_dismiss = on_dismiss.clone();
                    let id = toast.id;
                    let delay = u32::try_from(remaining_ms(toast, now)).unwrap_or(u32::MAX);
                    handles.push(Timeout::new(delay, move || on_dismiss.emit(id)));
                }
                move || drop(handles)
            },
            props.toasts.clone(),
        );
    }

    if props.toasts.is_empty() {
        return html! {};
    }

    html! {
        <div
            id={dom::TOAST_CONTAINER}
            class="toast-container"
            aria-live="polite"
            aria-atomic="true"
        >
            {for props.toasts.iter().map(|toast| render_toast(toast, &props.on_dismiss))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: &Callback<u64>) -> Html {
    let id = toast.id;
    let on_click = {
        let on_dismiss = on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={classes!("toast", toast.kind.class())} role="status" onclick={on_click}>
            {toast.message.clone()}
        </div>
    }
}
