//! Contact form submission handlers

use crate::{
    error::Result,
    extractors::ValidatedJson,
    models::{ContactForm, ContactResponse},
    AppState,
};
use axum::{extract::State, Json};

/// `POST /api/v1/contact/` - queue both emails and answer immediately.
pub async fn handle_submit_contact(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<ContactForm>,
) -> Result<Json<ContactResponse>> {
    state.contact_service.dispatch_in_background(&form)?;

    Ok(Json(ContactResponse::received()))
}

/// `POST /api/v1/contact/send-now` - send both emails before answering.
///
/// Delivery failures are logged but the response still reports success:
/// the submission itself was received and validated.
pub async fn handle_submit_contact_now(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<ContactForm>,
) -> Result<Json<ContactResponse>> {
    state.contact_service.send_now(&form).await?;

    Ok(Json(ContactResponse::received()))
}
