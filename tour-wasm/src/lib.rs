use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, Document, HtmlElement, Url, Window};

use tour_core::{Action, ClientError, Endpoints, Outcome, Session, Variant};

mod bridge;
mod constants;
mod fetch;
mod upload;
mod utils;

use bridge::MapBridge;
use constants::{FILE_INPUT_OSM, FILE_INPUT_POINTS, LEDGER_ELEMENT, RESULT_FILENAME};
use utils::log;

struct App {
    window: Window,
    document: Document,
    endpoints: Endpoints,
    session: Session<MapBridge>,
}

thread_local! {
    static STATE: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let endpoints = Endpoints::new(&utils::api_base(&window));
    log(&format!("tour client ready, backend {}", endpoints.base()));

    let app = Rc::new(RefCell::new(App {
        window,
        document,
        endpoints,
        session: Session::new(MapBridge),
    }));
    STATE.with(|st| st.replace(Some(app.clone())));
    attach_ui(&app);
    render_ledger(&app.borrow());
    Ok(())
}

fn attach_ui(app: &Rc<RefCell<App>>) {
    let buttons: [(&str, Action); 10] = [
        ("btn-upload-osm", Action::UploadMesh),
        ("btn-upload-points", Action::UploadPoints),
        ("btn-brute", Action::Run(Variant::Brute)),
        ("btn-greedy", Action::Run(Variant::Greedy)),
        ("btn-dp", Action::Run(Variant::Dynamic)),
        ("btn-genetic", Action::Run(Variant::Genetic)),
        ("btn-run-all", Action::RunAll),
        ("btn-clear-routes", Action::ClearRoutes),
        ("btn-clear-results", Action::ClearResults),
        ("btn-download", Action::Download),
    ];
    for (id, action) in buttons {
        attach_button(app, id, action);
    }
}

fn attach_button(app: &Rc<RefCell<App>>, id: &str, action: Action) {
    let doc = app.borrow().document.clone();
    let Some(el) = doc.get_element_by_id(id) else {
        return;
    };
    let Ok(btn) = el.dyn_into::<HtmlElement>() else {
        return;
    };
    let st = app.clone();
    let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        dispatch(st.clone(), action);
    }));
    btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
}

/// Boundary for every user action: errors are logged and alerted here and
/// never propagate further. The ledger view is refreshed once the action
/// settles.
fn dispatch(app: Rc<RefCell<App>>, action: Action) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = run_action(app.clone(), action).await {
            notify_error(&app, action, &err);
        }
        render_ledger(&app.borrow());
    });
}

fn notify_error(app: &Rc<RefCell<App>>, action: Action, err: &ClientError) {
    let s = app.borrow();
    log(&format!("{:?} failed: {}", action, err));
    let _ = s.window.alert_with_message(&format!("Error: {}", err));
}

async fn run_action(app: Rc<RefCell<App>>, action: Action) -> Result<(), ClientError> {
    match action {
        Action::UploadMesh => upload_mesh(app).await,
        Action::UploadPoints => upload_points(app).await,
        Action::Run(variant) => run_variant(app, variant).await,
        Action::RunAll => {
            // best-effort fan-out, strictly sequential so that ledger order
            // matches invocation order
            for variant in Variant::ALL {
                if let Err(err) = run_variant(app.clone(), variant).await {
                    notify_error(&app, Action::Run(variant), &err);
                }
            }
            Ok(())
        }
        Action::ClearRoutes => {
            app.borrow_mut().session.clear_routes();
            Ok(())
        }
        Action::ClearResults => {
            app.borrow_mut().session.clear_results();
            Ok(())
        }
        Action::Download => download_result(app).await,
    }
}

// The borrow is released before every await; completion re-borrows and
// applies the response through the session.

async fn upload_mesh(app: Rc<RefCell<App>>) -> Result<(), ClientError> {
    let (window, url, file, ticket) = {
        let mut s = app.borrow_mut();
        let file = upload::selected_file(&s.document, FILE_INPUT_OSM);
        let ticket = s.session.begin_mesh_upload(file.is_some())?;
        let Some(file) = file else {
            return Err(ClientError::MissingInput);
        };
        (s.window.clone(), s.endpoints.upload_osm(), file, ticket)
    };
    let body = fetch::post_file(&window, &url, &file).await?;
    let mut s = app.borrow_mut();
    match s.session.complete_mesh_upload(ticket, &body)? {
        Outcome::Applied(()) => log("road network replaced"),
        Outcome::Stale => log("stale network upload response discarded"),
    }
    Ok(())
}

async fn upload_points(app: Rc<RefCell<App>>) -> Result<(), ClientError> {
    let (window, url, file, ticket) = {
        let mut s = app.borrow_mut();
        let file = upload::selected_file(&s.document, FILE_INPUT_POINTS);
        let ticket = s.session.begin_points_upload(file.is_some())?;
        let Some(file) = file else {
            return Err(ClientError::MissingInput);
        };
        (s.window.clone(), s.endpoints.upload_points(), file, ticket)
    };
    let body = fetch::post_file(&window, &url, &file).await?;
    let mut s = app.borrow_mut();
    match s.session.complete_points_upload(ticket, &body)? {
        Outcome::Applied(count) => log(&format!("{} points loaded", count)),
        Outcome::Stale => log("stale points upload response discarded"),
    }
    Ok(())
}

async fn run_variant(app: Rc<RefCell<App>>, variant: Variant) -> Result<(), ClientError> {
    let (window, url, ticket) = {
        let mut s = app.borrow_mut();
        let ticket = s.session.begin_run(variant)?;
        (s.window.clone(), s.endpoints.tsp(variant), ticket)
    };
    let body = fetch::get_text(&window, &url).await?;
    let mut s = app.borrow_mut();
    match s.session.complete_run(ticket, &body)? {
        Outcome::Applied(result) => {
            let msg = format!(
                "{}: distance {:.2} in {} ms",
                variant.label(),
                result.distance,
                result.elapsed_ms
            );
            log(&msg);
            let _ = s.window.alert_with_message(&msg);
        }
        Outcome::Stale => log("stale route response discarded"),
    }
    Ok(())
}

async fn download_result(app: Rc<RefCell<App>>) -> Result<(), ClientError> {
    let (window, url) = {
        let s = app.borrow();
        (s.window.clone(), s.endpoints.download())
    };
    let bytes = fetch::get_bytes(&window, &url).await?;
    let s = app.borrow();
    if let Err(err) = save_bytes_as_file(&s.document, RESULT_FILENAME, &bytes) {
        log(&format!("saving {} failed: {:?}", RESULT_FILENAME, err));
        let _ = s.window.alert_with_message("Could not save the result file.");
    }
    Ok(())
}

fn render_ledger(app: &App) {
    let Some(el) = app.document.get_element_by_id(LEDGER_ELEMENT) else {
        return;
    };
    let mut html = String::new();
    for row in app.session.ledger().rows() {
        html.push_str(&format!(
            "<tr><td style=\"color:{}\">{}</td><td>{:.2}</td><td>{} ms</td></tr>",
            row.variant.color(),
            row.variant.label(),
            row.distance,
            row.elapsed_ms
        ));
    }
    el.set_inner_html(&html);
}

fn save_bytes_as_file(document: &Document, filename: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let blob = Blob::new_with_u8_array_sequence(&parts)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let a = document.create_element("a")?.dyn_into::<HtmlElement>()?;
    a.set_attribute("href", &url)?;
    a.set_attribute("download", filename)?;
    a.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}
