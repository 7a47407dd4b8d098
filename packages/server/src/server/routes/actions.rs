//! Form action endpoints.
//!
//! Thin adapters: extract the submitted form, run the action, map its
//! outcome to an HTTP status. The body is always the `ActionResult`.

use axum::{extract::Extension, http::StatusCode, Json};

use crate::domains::posts::actions;
use crate::domains::posts::{ActionOutcome, ActionResult};
use crate::server::app::AxumAppState;
use crate::server::form::SubmittedForm;

type ActionResponse = (StatusCode, Json<ActionResult>);

fn respond(result: ActionResult) -> ActionResponse {
    let status = match result.outcome() {
        ActionOutcome::Success => StatusCode::OK,
        ActionOutcome::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ActionOutcome::Generation | ActionOutcome::Delivery => StatusCode::BAD_GATEWAY,
        ActionOutcome::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(result))
}

pub async fn draft_handler(
    Extension(state): Extension<AxumAppState>,
    SubmittedForm(fields): SubmittedForm,
) -> ActionResponse {
    respond(actions::generate_draft_action(&fields, &state.deps).await)
}

pub async fn content_handler(
    Extension(state): Extension<AxumAppState>,
    SubmittedForm(fields): SubmittedForm,
) -> ActionResponse {
    respond(actions::generate_content_action(&fields, &state.deps).await)
}

pub async fn previews_handler(
    Extension(state): Extension<AxumAppState>,
    SubmittedForm(fields): SubmittedForm,
) -> ActionResponse {
    respond(actions::generate_preview_action(&fields, &state.deps).await)
}

pub async fn content_and_previews_handler(
    Extension(state): Extension<AxumAppState>,
    SubmittedForm(fields): SubmittedForm,
) -> ActionResponse {
    respond(actions::generate_content_and_previews_action(&fields, &state.deps).await)
}

pub async fn publish_handler(
    Extension(state): Extension<AxumAppState>,
    SubmittedForm(fields): SubmittedForm,
) -> ActionResponse {
    respond(actions::publish_action(&fields, &state.deps).await)
}
