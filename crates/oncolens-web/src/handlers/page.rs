//! The single prediction page: data entry, model choice, result.

use axum::{
    extract::{Query, State},
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use oncolens_common::config::Config;
use oncolens_common::csv_import::CsvTable;
use oncolens_common::form::{CSV_PREFIX, MANUAL_PREFIX};
use oncolens_common::model_info::METRICS_HTML;
use oncolens_common::{
    FeatureVector, InputTab, ModelSelection, PredictionError, SourcePolicy, Submission,
};

use crate::session::{Notice, Session};
use crate::state::SharedState;

/// Header shared by every page.
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

#[derive(Deserialize)]
pub struct PageQuery {
    pub tab: Option<String>,
}

pub async fn index(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> (CookieJar, Html<String>) {
    let (id, jar) = state.sessions.resolve(jar).await;
    if let Some(tab) = query.tab.as_deref().and_then(InputTab::from_param) {
        state.sessions.with_session(id, |s| s.form.set_active_tab(tab)).await;
    }
    super::respond(&state, id, jar).await
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _    => out.push(c),
        }
    }
    out
}

pub fn render_page(session: &mut Session, config: &Config, endpoint: &str) -> String {
    let notice_html = match session.notice.take() {
        None => String::new(),
        Some(Notice::Info(msg)) => format!(r#"<div class="alert alert-info">{}</div>"#, escape(&msg)),
        Some(Notice::Error(msg)) => format!(r#"<div class="alert alert-danger">{}</div>"#, escape(&msg)),
    };

    let tab = session.form.active_tab();
    let entry_html = match tab {
        InputTab::Manual => render_fields(MANUAL_PREFIX, session.form.manual()),
        InputTab::Csv => render_csv_tab(session),
    };

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Breast Cancer Prediction | OncoLens</title>
    <link rel="stylesheet" href="/static/css/main.css?v=0.1.0">
</head>
<body>
<div class="app-container">
{nav}
<main class="main-content">
    <form id="workspace" method="POST" action="/apply"></form>
    <input type="hidden" name="tab" value="{tab_param}" form="workspace">

    <div class="page-header">
        <h1 class="page-title">Breast Cancer Prediction using ML Models</h1>
    </div>

    {notice}

    {intro}

    <section class="card step">
        <div class="card-header"><h2>Step 1: Enter Patient Data</h2></div>
        <nav class="tabs">
            <a href="/?tab=manual" class="tab{manual_active}">📋 Manual Entry</a>
            <a href="/?tab=csv" class="tab{csv_active}">📂 CSV Upload</a>
        </nav>
        {entry}
    </section>

    <section class="card step">
        <div class="card-header"><h2>Step 2: Choose Model</h2></div>
        {models}
    </section>

    <section class="card step">
        <div class="card-header"><h2>Step 3: Predict</h2></div>
        <p class="text-muted small">{policy_note}</p>
        <button type="submit" form="workspace" formaction="/predict" class="btn btn-primary btn-lg">🔬 Run Prediction</button>
        <div class="result">{result}</div>
        <p class="text-muted small">Endpoint: <code>{endpoint}</code></p>
    </section>
</main>
</div>
</body>
</html>"#,
        nav = NAV_HTML,
        tab_param = tab.param(),
        notice = notice_html,
        intro = INTRO_HTML,
        manual_active = if tab == InputTab::Manual { " active" } else { "" },
        csv_active = if tab == InputTab::Csv { " active" } else { "" },
        entry = entry_html,
        models = render_models(session.model),
        policy_note = policy_note(config.input.source_policy, session),
        result = render_result(&session.submission),
        endpoint = escape(endpoint),
    )
}

/// The 8 bounded inputs, two per row.
fn render_fields(prefix: &str, values: &FeatureVector) -> String {
    let inputs: String = values.iter().map(|(field, value)| {
        format!(r#"
            <div class="form-group">
                <label for="{prefix}{name}">{label}</label>
                <input type="number" id="{prefix}{name}" name="{prefix}{name}" form="workspace"
                    class="form-control" min="{min}" max="{max}" step="{step}" value="{value}">
            </div>"#,
            prefix = prefix,
            name = field.name,
            label = field.label(),
            min = field.format(field.min),
            max = field.format(field.max),
            step = field.step_attr(),
            value = field.format(value),
        )
    }).collect();

    format!(r#"
        <div class="grid-2">{}</div>
        <button type="submit" form="workspace" formaction="/apply" class="btn btn-outline">Apply values</button>"#,
        inputs)
}

fn render_csv_tab(session: &Session) -> String {
    let upload = r#"
        <form method="POST" action="/csv/upload" enctype="multipart/form-data" class="upload-form">
            <label class="form-label" for="csv-file">Upload CSV</label>
            <input type="file" id="csv-file" name="file" accept=".csv,text/csv" class="form-control">
            <button type="submit" class="btn btn-outline">Upload</button>
        </form>"#;

    let Some(import) = session.form.csv() else {
        return format!(r#"{}<p class="text-muted">No file loaded. Upload a CSV with a header row naming the feature columns.</p>"#, upload);
    };

    let row_max = import.table.row_count().saturating_sub(1);
    format!(r#"{upload}
        <div class="csv-summary">
            <strong>{file}</strong> &middot; {rows} rows
            <button type="submit" form="workspace" formaction="/csv/clear" class="btn btn-outline btn-sm">Clear CSV</button>
        </div>
        <h4>Preview</h4>
        {preview}
        <div class="row-picker">
            <label class="form-label" for="row_index">Row index</label>
            <input type="number" id="row_index" name="row_index" form="workspace"
                class="form-control" min="0" max="{row_max}" step="1" value="{row}">
            <button type="submit" form="workspace" formaction="/apply" class="btn btn-outline">Load row</button>
        </div>
        <h4>Populate fields (editable)</h4>
        {fields}"#,
        upload = upload,
        file = escape(&import.file_name),
        rows = import.table.row_count(),
        preview = render_preview(&import.table),
        row_max = row_max,
        row = import.row_index(),
        fields = render_fields(CSV_PREFIX, import.values()),
    )
}

fn render_preview(table: &CsvTable) -> String {
    let head: String = table.headers().iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let body: String = table.preview().iter().enumerate().map(|(i, row)| {
        let cells: String = row.iter().map(|c| format!("<td>{}</td>", escape(c))).collect();
        format!("<tr><td class=\"text-muted\">{}</td>{}</tr>", i, cells)
    }).collect();
    format!(r#"<div class="table-container"><table class="table">
        <thead><tr><th>#</th>{}</tr></thead>
        <tbody>{}</tbody>
    </table></div>"#, head, body)
}

fn render_models(selected: ModelSelection) -> String {
    let radios: String = ModelSelection::ALL.iter().map(|m| {
        format!(r#"
            <label class="radio">
                <input type="radio" name="model" value="{key}" form="workspace"{checked}> {label}
            </label>"#,
            key = m.key(),
            label = m.label(),
            checked = if *m == selected { " checked" } else { "" },
        )
    }).collect();

    let info = selected.description();
    format!(r#"
        <div class="radio-group">{radios}
            <button type="submit" form="workspace" formaction="/apply" class="btn btn-outline btn-sm">Select model</button>
        </div>
        <article class="model-info">
            <h3>{title}</h3>
            {body}
            <figure>
                <img src="{image}" alt="{caption}">
                <figcaption>{caption}</figcaption>
            </figure>
            <details>
                <summary>Evaluation metrics</summary>
                {metrics}
            </details>
        </article>"#,
        radios = radios,
        title = info.title,
        body = info.body_html,
        image = info.image,
        caption = info.caption,
        metrics = METRICS_HTML,
    )
}

fn policy_note(policy: SourcePolicy, session: &Session) -> &'static str {
    match (policy, session.form.csv().is_some()) {
        (SourcePolicy::CsvWins, true) => "A CSV file is loaded: its row values will be submitted, not the manual entries.",
        (SourcePolicy::CsvWins, false) => "The manual entry values will be submitted.",
        (SourcePolicy::ActiveTab, _) => "The values on the tab you are viewing will be submitted.",
    }
}

fn render_result(submission: &Submission) -> String {
    match submission {
        Submission::Idle => String::new(),
        Submission::Submitting => r#"<div class="alert alert-info">Running prediction…</div>"#.to_string(),
        Submission::Succeeded(p) => format!(
            r#"<div class="alert alert-success">Prediction: <strong>{}</strong></div>"#,
            escape(&p.label)
        ),
        Submission::Failed(PredictionError::Rejected { status, body }) => format!(
            r#"<div class="alert alert-danger">Prediction service returned HTTP {}<pre class="error-body">{}</pre></div>"#,
            status,
            escape(body.render())
        ),
        Submission::Failed(e) => format!(
            r#"<div class="alert alert-danger">{}</div>"#,
            escape(&e.to_string())
        ),
    }
}

const INTRO_HTML: &str = r#"
    <details class="card" open>
        <summary>📘 Introduction</summary>
        <p>This app shows how classical machine-learning models can help classify a <strong>breast tumor</strong> as <strong>benign</strong> or <strong>malignant</strong> from a handful of numeric features measured on digitized cell images.</p>
        <h4>How to use</h4>
        <ol>
            <li><strong>Enter data</strong>: type the values manually, or upload a CSV and review the populated fields.</li>
            <li><strong>Choose a model</strong>: Random Forest, Decision Tree or SVC.</li>
            <li><strong>Run Prediction</strong>: the 8 inputs and the model key are sent to the prediction API, which returns the predicted class.</li>
        </ol>
        <h4>Interpreting results</h4>
        <p>The prediction is <code>Benign</code> or <code>Malignant</code>. Always interpret it with domain expertise.</p>
        <div class="alert alert-info">This app is for educational purposes only and must <strong>not</strong> be used for medical decision-making.</div>
    </details>
    <details class="card">
        <summary>ℹ️ About the App &amp; Methodology</summary>
        <h4>Data &amp; Features</h4>
        <p>The features come from the <strong>Breast Cancer Wisconsin (Diagnostic) dataset (WDBC)</strong>. This demo uses 8 of its mean features:</p>
        <ul>
            <li><code>radius_mean</code>: average distance from the centroid to the perimeter</li>
            <li><code>texture_mean</code>: standard deviation of gray-scale values</li>
            <li><code>smoothness_mean</code>: local variation in radius lengths</li>
            <li><code>compactness_mean</code>: perimeter² / area</li>
            <li><code>concavity_mean</code>: severity of concave portions of the contour</li>
            <li><code>concave_points_mean</code>: number of concave portions of the contour</li>
            <li><code>symmetry_mean</code>: symmetry of the mass</li>
            <li><code>fractal_dimension_mean</code>: "coastline approximation" of the contour</li>
        </ul>
        <h4>Privacy &amp; data flow</h4>
        <p>Only the <strong>8 numeric inputs</strong> and the <strong>selected model key</strong> leave this server. Uploaded CSV files are held in memory for your session only and are never stored.</p>
    </details>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use oncolens_common::prediction::ErrorBody;
    use oncolens_common::Prediction;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b a="1">&'"#), "&lt;b a=&quot;1&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_manual_page_renders_all_fields_in_order() {
        let mut session = Session::default();
        let html = render_page(&mut session, &Config::default(), "http://x/api/predict");
        let mut last = 0;
        for field in oncolens_common::FEATURE_FIELDS {
            let pos = html.find(&format!("name=\"manual_{}\"", field.name)).unwrap();
            assert!(pos > last);
            last = pos;
        }
    }

    #[test]
    fn test_result_rendering() {
        let ok = Submission::Succeeded(Prediction { label: "Malignant".into(), extra: Default::default() });
        assert!(render_result(&ok).contains("Prediction: <strong>Malignant</strong>"));

        let rejected = Submission::Failed(PredictionError::Rejected {
            status: 500,
            body: ErrorBody::Text("<oops>".into()),
        });
        let html = render_result(&rejected);
        assert!(html.contains("HTTP 500"));
        assert!(html.contains("&lt;oops&gt;"));
    }

    #[test]
    fn test_notice_is_shown_once() {
        let mut session = Session::default();
        session.notice = Some(Notice::Error("bad upload".into()));
        let html = render_page(&mut session, &Config::default(), "e");
        assert!(html.contains("bad upload"));
        let html = render_page(&mut session, &Config::default(), "e");
        assert!(!html.contains("bad upload"));
    }
}
