//! Per-browser session state.
//!
//! Each visitor gets an isolated `Session` keyed by a random id carried in
//! a cookie. Nothing is shared between sessions and nothing is persisted;
//! idle sessions are dropped after the configured TTL.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use oncolens_common::{
    FeatureVector, FormSubmission, InputForm, ModelSelection, PredictionError, SourcePolicy,
    Submission,
};

pub const SESSION_COOKIE: &str = "oncolens_session";

/// One-shot message shown on the next render.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug)]
pub struct Session {
    pub form: InputForm,
    pub model: ModelSelection,
    pub submission: Submission,
    pub notice: Option<Notice>,
    submitted_at: Option<Instant>,
    last_seen: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            form: InputForm::new(),
            model: ModelSelection::default(),
            submission: Submission::Idle,
            notice: None,
            submitted_at: None,
            last_seen: Instant::now(),
        }
    }
}

impl Session {
    /// Fold posted widget values into the session.
    pub fn apply(&mut self, submission: &FormSubmission) {
        submission.apply_to(&mut self.form);
        if let Some(key) = submission.model.as_deref() {
            match ModelSelection::from_key(key) {
                Some(model) => self.model = model,
                None => self.notice = Some(Notice::Error(format!("Unknown model: {}", key))),
            }
        }
    }

    /// A request is running and started less than `limit` ago.
    ///
    /// A `Submitting` state older than the request timeout is stale and no
    /// longer blocks the session.
    pub fn in_flight(&self, limit: Duration) -> bool {
        self.submission.is_submitting()
            && self.submitted_at.is_some_and(|at| at.elapsed() < limit)
    }

    /// Move to `Submitting` and hand back what to send.
    ///
    /// Returns `None` when nothing should go over the wire: either a request
    /// is already in flight, or no feature vector is available (recorded as
    /// `MissingFeatures`).
    pub fn begin_submission(
        &mut self,
        policy: SourcePolicy,
        limit: Duration,
    ) -> Option<(ModelSelection, FeatureVector)> {
        if self.in_flight(limit) {
            self.notice = Some(Notice::Info(
                "A prediction is already running. Wait for it to finish.".to_string(),
            ));
            return None;
        }
        match self.form.collect_features(policy) {
            Some(features) => {
                self.submission = Submission::Submitting;
                self.submitted_at = Some(Instant::now());
                Some((self.model, features))
            }
            None => {
                self.submission = Submission::Failed(PredictionError::MissingFeatures);
                None
            }
        }
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

/// In-memory session table.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: Duration,
    /// Longest a submission may stay in flight (the request timeout).
    request_limit: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration, request_limit: Duration) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), ttl, request_limit }
    }

    pub fn request_limit(&self) -> Duration {
        self.request_limit
    }

    /// Find the caller's session from its cookie, creating one (and setting
    /// the cookie) when it is missing, unknown, or expired.
    pub async fn resolve(&self, jar: CookieJar) -> (Uuid, CookieJar) {
        let mut sessions = self.sessions.write().await;

        let (ttl, limit) = (self.ttl, self.request_limit);
        let before = sessions.len();
        sessions.retain(|_, s| s.in_flight(limit) || s.last_seen.elapsed() < ttl);
        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), "Evicted idle sessions");
        }

        let known = jar
            .get(SESSION_COOKIE)
            .and_then(|c| Uuid::parse_str(c.value()).ok())
            .filter(|id| sessions.contains_key(id));
        if let Some(id) = known {
            if let Some(session) = sessions.get_mut(&id) {
                session.touch();
            }
            return (id, jar);
        }

        let id = Uuid::new_v4();
        sessions.insert(id, Session::default());
        debug!(session = %id, "Created session");

        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        (id, jar.add(cookie))
    }

    /// Run `f` against a session, recreating it if it vanished meanwhile.
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(id).or_default();
        session.touch();
        f(session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: Duration = Duration::from_secs(20);

    #[test]
    fn test_begin_submission_blocks_second_request() {
        let mut s = Session::default();
        assert!(s.begin_submission(SourcePolicy::CsvWins, LIMIT).is_some());
        assert!(s.submission.is_submitting());
        assert!(s.begin_submission(SourcePolicy::CsvWins, LIMIT).is_none());
        assert!(matches!(s.notice, Some(Notice::Info(_))));
        assert!(s.submission.is_submitting());
    }

    #[test]
    fn test_begin_submission_records_missing_features() {
        let mut s = Session::default();
        s.form.set_active_tab(oncolens_common::InputTab::Csv);
        assert!(s.begin_submission(SourcePolicy::ActiveTab, LIMIT).is_none());
        assert!(matches!(s.submission, Submission::Failed(PredictionError::MissingFeatures)));
    }

    #[test]
    fn test_begin_submission_uses_selected_model() {
        let mut s = Session::default();
        s.apply(&FormSubmission::from_pairs([("model", "dt"), ("manual_radius_mean", "12.0")]));
        let (model, features) = s.begin_submission(SourcePolicy::CsvWins, LIMIT).unwrap();
        assert_eq!(model, ModelSelection::DecisionTree);
        assert_eq!(features.get(0), Some(12.0));
    }

    #[test]
    fn test_unknown_model_keeps_previous_choice() {
        let mut s = Session::default();
        s.apply(&FormSubmission::from_pairs([("model", "knn")]));
        assert_eq!(s.model, ModelSelection::RandomForest);
        assert!(matches!(s.notice, Some(Notice::Error(_))));
    }

    #[tokio::test]
    async fn test_resolve_reuses_cookie_session() {
        let store = SessionStore::new(Duration::from_secs(60), LIMIT);
        let (id, jar) = store.resolve(CookieJar::new()).await;
        let (again, _) = store.resolve(jar).await;
        assert_eq!(id, again);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_cookie_gets_fresh_session() {
        let store = SessionStore::new(Duration::from_secs(60), LIMIT);
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, Uuid::new_v4().to_string()));
        let (id, jar) = store.resolve(jar).await;
        assert_eq!(jar.get(SESSION_COOKIE).map(|c| c.value().to_string()), Some(id.to_string()));
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let store = SessionStore::new(Duration::ZERO, LIMIT);
        let (first, _) = store.resolve(CookieJar::new()).await;
        let (second, _) = store.resolve(CookieJar::new()).await;
        assert_ne!(first, second);
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn test_stale_submission_no_longer_blocks() {
        let mut s = Session::default();
        assert!(s.begin_submission(SourcePolicy::CsvWins, LIMIT).is_some());
        // Past the request limit the old attempt cannot still be running.
        assert!(!s.in_flight(Duration::ZERO));
        assert!(s.begin_submission(SourcePolicy::CsvWins, Duration::ZERO).is_some());
        assert!(s.notice.is_none());
    }

    #[tokio::test]
    async fn test_stale_submitting_session_is_evicted() {
        let store = SessionStore::new(Duration::ZERO, Duration::ZERO);
        let (first, _) = store.resolve(CookieJar::new()).await;
        store
            .with_session(first, |s| s.begin_submission(SourcePolicy::CsvWins, LIMIT))
            .await;
        let (second, _) = store.resolve(CookieJar::new()).await;
        assert_ne!(first, second);
        assert_eq!(store.len().await, 1);
    }
}
