//! Data-entry handlers: applying posted values and CSV import.

use axum::{
    extract::{Multipart, State},
    response::Html,
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use oncolens_common::csv_import::CsvTable;
use oncolens_common::FormSubmission;

use crate::session::Notice;
use crate::state::SharedState;

/// Raw form pairs, parsed leniently into a `FormSubmission`.
pub type PostedForm = Form<Vec<(String, String)>>;

pub fn parse_posted(pairs: &[(String, String)]) -> FormSubmission {
    FormSubmission::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// Store the current widget values (manual inputs, row index, CSV inputs, model).
pub async fn apply(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(pairs): PostedForm,
) -> (CookieJar, Html<String>) {
    let (id, jar) = state.sessions.resolve(jar).await;
    let submission = parse_posted(&pairs);
    state.sessions.with_session(id, |s| s.apply(&submission)).await;
    super::respond(&state, id, jar).await
}

pub async fn csv_upload(
    State(state): State<SharedState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> (CookieJar, Html<String>) {
    let (id, jar) = state.sessions.resolve(jar).await;

    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut failure: Option<String> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let file_name = field.file_name().unwrap_or("upload.csv").to_string();
                match field.bytes().await {
                    Ok(bytes) => upload = Some((file_name, bytes.to_vec())),
                    Err(e) => failure = Some(e.body_text()),
                }
            }
            Ok(None) => break,
            Err(e) => {
                failure = Some(e.body_text());
                break;
            }
        }
    }

    let notice = match (upload, failure) {
        (_, Some(err)) => {
            warn!(error = %err, "CSV upload failed");
            Notice::Error(format!("Upload failed: {}", err))
        }
        (Some((_, bytes)), None) if bytes.is_empty() => {
            Notice::Error("Choose a CSV file to upload.".to_string())
        }
        (Some((file_name, bytes)), None) => match CsvTable::parse(&bytes) {
            Ok(table) => {
                info!(file = %file_name, rows = table.row_count(), "CSV loaded into session");
                let msg = format!("Loaded {} ({} rows).", file_name, table.row_count());
                state.sessions.with_session(id, |s| s.form.load_csv(file_name, table)).await;
                Notice::Info(msg)
            }
            Err(e) => {
                warn!(file = %file_name, error = %e, "Rejected CSV upload");
                Notice::Error(format!("Could not load {}: {}", file_name, e))
            }
        },
        (None, None) => Notice::Error("Choose a CSV file to upload.".to_string()),
    };

    state.sessions.with_session(id, |s| s.notice = Some(notice)).await;
    super::respond(&state, id, jar).await
}

/// Drop the loaded CSV; the manual surface becomes active again.
pub async fn csv_clear(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (id, jar) = state.sessions.resolve(jar).await;
    state.sessions.with_session(id, |s| s.form.clear_csv()).await;
    super::respond(&state, id, jar).await
}
