use wasm_bindgen::JsCast;
use web_sys::{Document, File, HtmlInputElement};

/// The file currently selected in an `<input type="file">`, if any. The
/// session rejects the action before any request when this is `None`.
pub fn selected_file(document: &Document, input_id: &str) -> Option<File> {
    let input = document
        .get_element_by_id(input_id)?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    input.files()?.item(0)
}
