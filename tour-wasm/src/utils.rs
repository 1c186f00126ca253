use wasm_bindgen::JsValue;
use web_sys::Window;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// API base resolution: an `?api=` query parameter wins, then the optional
/// `window.__API_BASE` set by the host page, then the local dev backend.
pub fn api_base(window: &Window) -> String {
    if let Ok(search) = window.location().search()
        && let Some(base) = get_query_param(&search, "api")
        && !base.is_empty()
    {
        return base;
    }
    js_sys::Reflect::get(window, &JsValue::from_str("__API_BASE"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| tour_core::DEFAULT_API_BASE.to_string())
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .unwrap_or_else(|_| s.into())
        .to_string()
}
