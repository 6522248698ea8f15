use wasm_bindgen_futures::spawn_local;

use crate::bootstrap::{hide_modal, show_modal};
use crate::dom::{by_id, focus, on, once, query_all, set_value, value_of};
use gymdash::{PlanModification, ViewController};

const MODAL_ID: &str = "modifyPlanModal";

pub fn init(controller: &ViewController) {
    bind_submit(controller);
    bind_prompts();
}

/// The submit button lives inside the fragment, so every update re-binds it
/// through this initializer.
fn bind_submit(controller: &ViewController) {
    let Some(submit) = by_id("submit-modify-plan") else {
        return;
    };

    let controller = controller.clone();
    on(&submit, "click", move |_| {
        let plan = PlanModification::from_inputs(
            &value_of("goal-input"),
            &value_of("schedule-input"),
            &value_of("notes-input"),
        );
        hide_modal(MODAL_ID);

        let controller = controller.clone();
        spawn_local(async move {
            controller.modify_workout_plan(&plan).await;
        });
    });
}

/// Suggested goals open the modal pre-filled
fn bind_prompts() {
    for bubble in query_all(".bubble-prompt") {
        let clicked = bubble.clone();
        on(&bubble, "click", move |_| {
            let Some(goal) = by_id("goal-input") else {
                web_sys::console::error_1(&"Could not find goal input in modal".into());
                return;
            };
            let prompt = clicked.text_content().unwrap_or_default();
            set_value(&goal, prompt.trim());
            show_modal(MODAL_ID);

            if let Some(modal) = by_id(MODAL_ID) {
                let goal = goal.clone();
                once(&modal, "shown.bs.modal", move |_| focus(&goal));
            }
        });
    }
}
