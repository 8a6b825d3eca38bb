//! "Run Prediction": apply the form, derive the vector, call the service.

use axum::{extract::State, response::Html, Form};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use oncolens_common::Submission;

use crate::handlers::input::{parse_posted, PostedForm};
use crate::session::Notice;
use crate::state::SharedState;

pub async fn predict(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(pairs): PostedForm,
) -> (CookieJar, Html<String>) {
    let (id, jar) = state.sessions.resolve(jar).await;
    let submission = parse_posted(&pairs);
    let policy = state.config.input.source_policy;
    let limit = state.sessions.request_limit();

    let pending = state
        .sessions
        .with_session(id, |s| {
            s.apply(&submission);
            s.begin_submission(policy, limit)
        })
        .await;

    match pending {
        Some((model, features)) => {
            // The request runs in its own task so the outcome is recorded
            // even if the browser goes away and this handler is dropped.
            // Session lock is released while the request is in flight.
            let task_state = state.clone();
            let dispatch = tokio::spawn(async move {
                let outcome = task_state.predictor.predict(model, &features).await;
                task_state
                    .sessions
                    .with_session(id, |s| s.submission.finish(outcome))
                    .await;
            });
            if let Err(e) = dispatch.await {
                warn!(session = %id, error = %e, "Prediction task aborted");
                state
                    .sessions
                    .with_session(id, |s| {
                        s.submission = Submission::Idle;
                        s.notice = Some(Notice::Error("Prediction was interrupted. Try again.".to_string()));
                    })
                    .await;
            }
        }
        None => debug!(session = %id, "Submission not dispatched"),
    }

    super::respond(&state, id, jar).await
}
