use std::rc::Rc;

use chrono::Utc;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_net::http::Request;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, EventTarget, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, Window,
};

use super::dom;
use crate::config::FormConfig;
use crate::form::{
    is_valid_email, submit, AssessmentSubmission, FormRelay, RelayPayload, SubmissionView,
    SubmitError, FIELD_ERROR_CLASS, INVALID_EMAIL_MESSAGE,
};

pub const FORM_ID: &str = "assessmentForm";
pub const MODAL_ID: &str = "successModal";
const INVALID_CLASS: &str = "invalid";

/// POSTs through `fetch`.
pub struct GlooRelay;

impl FormRelay for GlooRelay {
    async fn post_json(&self, url: &str, payload: &RelayPayload) -> Result<u16, SubmitError> {
        let request = Request::post(url)
            .header("Accept", "application/json")
            .json(payload)
            .map_err(|e| SubmitError::Encode(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        Ok(response.status())
    }
}

struct DomView {
    window: Window,
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
    modal: Option<HtmlElement>,
}

impl SubmissionView for DomView {
    fn begin_busy(&self, busy_label: &str) -> String {
        let Some(button) = &self.button else {
            return String::new();
        };
        let label = button.text_content().unwrap_or_default();
        button.set_disabled(true);
        button.set_text_content(Some(busy_label));
        label
    }

    fn end_busy(&self, original_label: &str) {
        if let Some(button) = &self.button {
            button.set_disabled(false);
            button.set_text_content(Some(original_label));
        }
    }

    fn show_success(&self) {
        match &self.modal {
            Some(modal) => {
                modal.class_list().add_1("active").ok();
            }
            None => log::info!("no #{MODAL_ID} on page"),
        }
    }

    fn show_error(&self, message: &str) {
        self.window.alert_with_message(message).ok();
    }

    fn reset_fields(&self) {
        self.form.reset();
        clear_field_errors(&self.form);
    }
}

/// Form listeners; dropping it unbinds them.
pub struct FormHandle {
    _listeners: Vec<EventListener>,
}

pub fn start(
    window: &Window,
    document: &Document,
    config: &FormConfig,
) -> Result<Option<FormHandle>, JsValue> {
    let Some(form) = document.get_element_by_id(FORM_ID) else {
        return Ok(None);
    };
    let form: HtmlFormElement = form.dyn_into()?;
    let mut listeners = attach_validation(&form)?;
    let Some(endpoint) = config.endpoint.clone() else {
        log::warn!("form.endpoint not configured; #{FORM_ID} submits through the browser");
        return Ok(Some(FormHandle {
            _listeners: listeners,
        }));
    };

    let button = form
        .query_selector("button[type=submit], button:not([type])")?
        .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());
    let modal = dom::html_by_id(document, MODAL_ID);
    let view = Rc::new(DomView {
        window: window.clone(),
        form: form.clone(),
        button,
        modal: modal.clone(),
    });

    let config = Rc::new(config.clone());
    let endpoint = Rc::new(endpoint);
    listeners.push({
        let target = form.clone();
        EventListener::new_with_options(
            &target,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let submission = match collect(&form) {
                    Ok(s) => s,
                    Err(e) => {
                        log::error!("could not read form fields: {e:?}");
                        return;
                    }
                };
                let (view, config, endpoint) = (view.clone(), config.clone(), endpoint.clone());
                spawn_local(async move {
                    // outcome already surfaced to the user by `submit`
                    let _ = submit(&*view, &GlooRelay, &endpoint, &config, submission).await;
                });
            },
        )
    });

    if let Some(modal) = modal {
        listeners.extend(attach_modal(&modal)?);
    }

    Ok(Some(FormHandle {
        _listeners: listeners,
    }))
}

fn collect(form: &HtmlFormElement) -> Result<AssessmentSubmission, JsValue> {
    let data = FormData::new_with_form(form)?;
    let text = |name: &str| data.get(name).as_string().unwrap_or_default();
    let claims = data
        .get_all("claims")
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    Ok(AssessmentSubmission {
        company_name: text("companyName"),
        email: text("email"),
        claims,
        revenue: text("revenue"),
        timestamp: Utc::now(),
    })
}

fn attach_modal(modal: &HtmlElement) -> Result<Vec<EventListener>, JsValue> {
    let mut listeners = Vec::new();
    for close in dom::elements(modal.query_selector_all(".modal-close")?) {
        let modal = modal.clone();
        listeners.push(EventListener::new(&close, "click", move |_| {
            modal.class_list().remove_1("active").ok();
        }));
    }
    // backdrop click
    let backdrop = modal.clone();
    let backdrop_target = EventTarget::from(modal.clone());
    listeners.push(EventListener::new(modal, "click", move |event| {
        if event.target().as_ref() == Some(&backdrop_target) {
            backdrop.class_list().remove_1("active").ok();
        }
    }));
    Ok(listeners)
}

/// Inline email check on blur; any edit in the form clears the messages.
pub fn attach_validation(form: &HtmlFormElement) -> Result<Vec<EventListener>, JsValue> {
    let mut listeners = Vec::new();
    let email = form
        .query_selector("input[name=email], input[type=email]")?
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

    if let Some(input) = email {
        let target = input.clone();
        listeners.push(EventListener::new(&input, "blur", move |_| {
            let result = if is_valid_email(&target.value()) {
                clear_error(&target);
                Ok(())
            } else {
                show_error(&target, INVALID_EMAIL_MESSAGE)
            };
            if let Err(e) = result {
                log::warn!("could not show field error: {e:?}");
            }
        }));
    }

    let edited = form.clone();
    listeners.push(EventListener::new(form, "input", move |_| {
        clear_field_errors(&edited);
    }));
    Ok(listeners)
}

fn error_after(input: &HtmlInputElement) -> Option<Element> {
    input
        .next_element_sibling()
        .filter(|el| el.class_list().contains(FIELD_ERROR_CLASS))
}

fn show_error(input: &HtmlInputElement, message: &str) -> Result<(), JsValue> {
    input.class_list().add_1(INVALID_CLASS)?;
    if error_after(input).is_some() {
        return Ok(());
    }
    let document = input.owner_document().ok_or("input not in a document")?;
    let span = document.create_element("span")?;
    span.set_class_name(FIELD_ERROR_CLASS);
    span.set_text_content(Some(message));
    input.after_with_node_1(&span)
}

fn clear_error(input: &HtmlInputElement) {
    input.class_list().remove_1(INVALID_CLASS).ok();
    if let Some(el) = error_after(input) {
        el.remove();
    }
}

pub fn clear_field_errors(form: &HtmlFormElement) {
    if let Ok(list) = form.query_selector_all(&format!(".{FIELD_ERROR_CLASS}")) {
        dom::elements(list).iter().for_each(Element::remove);
    }
    if let Ok(list) = form.query_selector_all(&format!(".{INVALID_CLASS}")) {
        for el in dom::elements(list) {
            el.class_list().remove_1(INVALID_CLASS).ok();
        }
    }
}
