use web_sys as web;

const OVERLAY_ID: &str = "start-overlay";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Replace the overlay text, e.g. with a fatal startup error.
pub fn set_message(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        el.set_text_content(Some(message));
    }
}
