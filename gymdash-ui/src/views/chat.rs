use gloo_timers::callback::Timeout;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, KeyboardEvent};

use crate::dom::{by_id, data, flash, focus, on, query_all, set_value, value, DomChatWindow};
use gymdash::chat::{ChatSession, ChatWindow};
use gymdash::markup::render_markdown;
use gymdash::ViewController;

pub fn init(controller: &ViewController) {
    let Some(send_button) = by_id("send-btn") else {
        return;
    };
    let Some(window) = DomChatWindow::from_document() else {
        return;
    };
    let input = window.input().clone();
    let window = Rc::new(window);

    hydrate_history();
    window.scroll_to_bottom();
    {
        // Late-loading images grow the window after the first scroll
        let window = window.clone();
        Timeout::new(200, move || window.scroll_to_bottom()).forget();
    }

    let session = Rc::new(ChatSession::new(controller.api().clone(), window));

    {
        let session = session.clone();
        let input = input.clone();
        on(&send_button, "click", move |_| send(&session, &input));
    }
    {
        let session = session.clone();
        let field = input.clone();
        on(&input, "keypress", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key.key() == "Enter" && !key.shift_key() {
                event.prevent_default();
                send(&session, &field);
            }
        });
    }

    bind_quick_prompts(&input);
}

fn send(session: &Rc<ChatSession>, input: &Element) {
    let message = value(input);
    let session = session.clone();
    spawn_local(async move {
        session.send(&message).await;
    });
}

/// History rendered by the server is still Markdown
fn hydrate_history() {
    for message in query_all(".parsed-message") {
        let source = message.text_content().unwrap_or_default();
        message.set_inner_html(&render_markdown(&source));
    }
}

fn bind_quick_prompts(input: &Element) {
    let Some(container) = by_id("quick-prompts") else {
        return;
    };

    let input = input.clone();
    on(&container, "click", move |event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if !target.class_list().contains("prompt-bubble") {
            return;
        }
        set_value(&input, &data(&target, "prompt").unwrap_or_default());
        focus(&input);
        flash(&target);
    });
}
