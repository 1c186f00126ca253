use tour_core::ClientError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response, Window};

fn network_err(e: JsValue) -> ClientError {
    ClientError::Network(format!("{:?}", e))
}

fn status_checked(value: JsValue) -> Result<Response, ClientError> {
    let resp: Response = value.dyn_into().map_err(network_err)?;
    if !resp.ok() {
        return Err(ClientError::Status(resp.status()));
    }
    Ok(resp)
}

async fn body_text(resp: Response) -> Result<String, ClientError> {
    let text = JsFuture::from(resp.text().map_err(network_err)?)
        .await
        .map_err(network_err)?;
    Ok(text.as_string().unwrap_or_default())
}

pub async fn get_text(window: &Window, url: &str) -> Result<String, ClientError> {
    let value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network_err)?;
    body_text(status_checked(value)?).await
}

pub async fn get_bytes(window: &Window, url: &str) -> Result<Vec<u8>, ClientError> {
    let value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network_err)?;
    let resp = status_checked(value)?;
    let buffer = JsFuture::from(resp.array_buffer().map_err(network_err)?)
        .await
        .map_err(network_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Multipart POST with the file under the fixed `file` field the backend
/// reads its upload from.
pub async fn post_file(window: &Window, url: &str, file: &File) -> Result<String, ClientError> {
    let form = FormData::new().map_err(network_err)?;
    form.append_with_blob("file", file).map_err(network_err)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(form.as_ref());
    let request = Request::new_with_str_and_init(url, &init).map_err(network_err)?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_err)?;
    body_text(status_checked(value)?).await
}
