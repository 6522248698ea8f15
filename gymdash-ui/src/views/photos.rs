use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::bootstrap::show_modal;
use crate::dom::{by_id, on, query_all, query_in};
use gymdash::photos::PhotoPreview;
use gymdash::ViewController;

pub fn init(_controller: &ViewController) {
    if by_id("photoPreviewModal").is_none() {
        return;
    }

    for image in query_all(".photo-card img") {
        let clicked = image.clone();
        on(&image, "click", move |_| {
            let meta = clicked
                .closest(".photo-card")
                .ok()
                .flatten()
                .and_then(|card| query_in(&card, ".photo-meta"))
                .and_then(|meta| meta.text_content());
            let src = clicked
                .dyn_ref::<HtmlImageElement>()
                .map(|img| img.src())
                .unwrap_or_default();
            let preview = PhotoPreview::from_card(&src, meta.as_deref());

            if let Some(img) = by_id("photoPreviewImg")
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            {
                img.set_src(&preview.src);
            }
            if let Some(caption) = by_id("photoPreviewCaption") {
                caption.set_text_content(Some(&preview.caption));
            }
            show_modal("photoPreviewModal");
        });
    }
}
