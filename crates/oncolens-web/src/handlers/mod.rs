//! HTTP handlers for all web routes.

pub mod page;
pub mod input;
pub mod predict;
pub mod system;

use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::state::SharedState;

/// Render the page for a session. Consumes any pending notice.
pub(crate) async fn respond(state: &SharedState, id: Uuid, jar: CookieJar) -> (CookieJar, Html<String>) {
    let html = state
        .sessions
        .with_session(id, |session| page::render_page(session, &state.config, state.predictor.endpoint()))
        .await;
    (jar, Html(html))
}
