//! Conversion session: state and protocol for one upload-to-podcast flow.
//!
//! [`ConvertSession`] owns everything a conversion page would hold: the
//! attached PDF, the generation options, the phase of the current flow,
//! transient notices for the user, and the last result. It never talks to
//! the network itself; submission goes through [`ConvertTransport`], whose
//! production implementation is [`crate::ApiClient`].
//!
//! The session is single-flight: at most one candidate is held, at most one
//! submission is in flight, and entering the submitting phase clears any
//! previous result before the request is issued.

use async_trait::async_trait;
use papercast_core::{
    ErrorMetadata, ErrorStage, GenerationOptions, GenerationResult, PodcastStyle, Speed,
    UploadCandidate, UploadPolicy,
};

/// Failure surfaced by a conversion submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The gateway could not be reached at all.
    #[error("{0}")]
    Network(String),
    /// The gateway answered with an error status; the message is what its
    /// body said.
    #[error("{0}")]
    Backend(String),
}

impl SubmitError {
    pub fn stage(&self) -> ErrorStage {
        match self {
            SubmitError::Network(_) => ErrorStage::Network,
            SubmitError::Backend(_) => ErrorStage::Backend,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SubmitError::Network(message) | SubmitError::Backend(message) => message,
        }
    }
}

/// The session's single suspension point.
#[async_trait]
pub trait ConvertTransport {
    async fn convert(
        &self,
        file: &UploadCandidate,
        options: &GenerationOptions,
    ) -> Result<GenerationResult, SubmitError>;
}

/// Phase of the current conversion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Submitting,
    Ready,
    Failed,
}

impl SessionPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Submitting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient, non-blocking message for the user. Errors carry the stage the
/// failure originated from.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub stage: Option<ErrorStage>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            message: message.into(),
            stage: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
            stage: None,
        }
    }

    pub fn error(message: impl Into<String>, stage: Option<ErrorStage>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
            stage,
        }
    }
}

/// Transcript disclosure state: the full text plus whether it is expanded.
/// Collapsed is the default for every fresh result.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptView {
    pub text: String,
    pub expanded: bool,
}

/// What the audio player renders. Computed from session state, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub audio_url: String,
    pub transcript: Option<TranscriptView>,
}

type AcceptedFileCallback = Box<dyn FnMut(&UploadCandidate) + Send>;

/// State and protocol for one conversion page.
pub struct ConvertSession {
    policy: UploadPolicy,
    candidate: Option<UploadCandidate>,
    options: GenerationOptions,
    phase: SessionPhase,
    result: Option<GenerationResult>,
    reveal_result: bool,
    transcript_expanded: bool,
    notices: Vec<Notice>,
    on_file_accepted: Option<AcceptedFileCallback>,
}

impl ConvertSession {
    /// Session with the default client-side upload ceiling.
    pub fn new() -> Self {
        Self::with_policy(UploadPolicy::default())
    }

    pub fn with_policy(policy: UploadPolicy) -> Self {
        ConvertSession {
            policy,
            candidate: None,
            options: GenerationOptions::default(),
            phase: SessionPhase::Idle,
            result: None,
            reveal_result: false,
            transcript_expanded: false,
            notices: Vec::new(),
            on_file_accepted: None,
        }
    }

    /// Register a callback fired exactly once for each accepted file, with
    /// the exact candidate that was accepted.
    pub fn on_file_accepted(&mut self, callback: impl FnMut(&UploadCandidate) + Send + 'static) {
        self.on_file_accepted = Some(Box::new(callback));
    }

    /// Validate and attach a candidate.
    ///
    /// On acceptance the candidate replaces any previously held one, the
    /// accepted-file callback fires, and a success notice names the file.
    /// On rejection session state is untouched and an error notice carries
    /// the specific failure. Returns whether the file was accepted.
    pub fn attach(&mut self, candidate: UploadCandidate) -> bool {
        match self.policy.accept(&candidate) {
            Ok(()) => {
                if let Some(callback) = self.on_file_accepted.as_mut() {
                    callback(&candidate);
                }
                self.notices.push(Notice::success(format!(
                    "{} ready to convert",
                    candidate.file_name
                )));
                self.candidate = Some(candidate);
                true
            }
            Err(e) => {
                self.notices
                    .push(Notice::error(e.client_message(), Some(e.stage())));
                false
            }
        }
    }

    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    pub fn style(&self) -> PodcastStyle {
        self.options.style
    }

    pub fn set_style(&mut self, style: PodcastStyle) {
        self.options.style = style;
    }

    pub fn speed(&self) -> Speed {
        self.options.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.options.speed = speed;
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// Set when a fresh result arrives; the view uses it to bring the player
    /// into view once, instead of a scripted scroll.
    pub fn reveal_result(&self) -> bool {
        self.reveal_result
    }

    pub fn toggle_transcript(&mut self) {
        self.transcript_expanded = !self.transcript_expanded;
    }

    /// Drain the pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Player view for the current state. `None` while no audio locator is
    /// held. The transcript text is passed through untouched; the disclosure
    /// starts collapsed.
    pub fn player_view(&self) -> Option<PlayerView> {
        let result = self.result.as_ref()?;

        let transcript = result
            .transcript
            .as_ref()
            .filter(|text| !text.is_empty())
            .map(|text| TranscriptView {
                text: text.clone(),
                expanded: self.transcript_expanded,
            });

        Some(PlayerView {
            audio_url: result.audio_url.clone(),
            transcript,
        })
    }

    /// Run one generation round trip.
    ///
    /// Without a candidate this pushes a notice and performs no transport
    /// call. Otherwise the session enters `Submitting`, clears the previous
    /// result, submits through the transport, and leaves the busy phase as
    /// the final step whatever the outcome.
    pub async fn generate<T>(&mut self, transport: &T)
    where
        T: ConvertTransport + Sync + ?Sized,
    {
        let Some(candidate) = self.candidate.clone() else {
            self.notices.push(Notice::error(
                "Please upload a PDF first",
                Some(ErrorStage::Validation),
            ));
            return;
        };

        self.phase = SessionPhase::Submitting;
        self.result = None;
        self.reveal_result = false;
        self.transcript_expanded = false;

        let outcome = transport.convert(&candidate, &self.options).await;

        self.phase = match outcome {
            Ok(result) => {
                self.notices.push(Notice::success("Podcast ready"));
                self.result = Some(result);
                self.reveal_result = true;
                SessionPhase::Ready
            }
            Err(e) => {
                self.notices
                    .push(Notice::error(e.message(), Some(e.stage())));
                SessionPhase::Failed
            }
        };
    }
}

impl Default for ConvertSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;

    use super::*;

    struct StubTransport {
        outcome: Result<GenerationResult, SubmitError>,
        calls: AtomicUsize,
        last_request: Mutex<Option<(String, PodcastStyle, Speed)>>,
    }

    impl StubTransport {
        fn ok(result: GenerationResult) -> Self {
            StubTransport {
                outcome: Ok(result),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn err(error: SubmitError) -> Self {
            StubTransport {
                outcome: Err(error),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ConvertTransport for StubTransport {
        async fn convert(
            &self,
            file: &UploadCandidate,
            options: &GenerationOptions,
        ) -> Result<GenerationResult, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() =
                Some((file.file_name.clone(), options.style, options.speed));
            self.outcome.clone()
        }
    }

    fn pdf_candidate(name: &str, len: usize) -> UploadCandidate {
        UploadCandidate::new(
            name.to_string(),
            Some("application/pdf".to_string()),
            Bytes::from(vec![b'%'; len]),
        )
    }

    fn sample_result() -> GenerationResult {
        GenerationResult {
            audio_url: "http://localhost:8000/audio/podcast_abc.mp3".to_string(),
            transcript: Some("HOST A: Welcome.\nHOST B: Glad to be here.".to_string()),
            metadata: None,
        }
    }

    #[test]
    fn attach_accepts_a_pdf_and_fires_the_callback_once() {
        let mut session = ConvertSession::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None::<String>));

        let calls_in_cb = calls.clone();
        let seen_in_cb = seen.clone();
        session.on_file_accepted(move |candidate| {
            calls_in_cb.fetch_add(1, Ordering::SeqCst);
            *seen_in_cb.lock().unwrap() = Some(candidate.file_name.clone());
        });

        assert!(session.attach(pdf_candidate("paper.pdf", 128)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("paper.pdf"));
        assert_eq!(session.candidate().unwrap().file_name, "paper.pdf");

        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);
        assert!(notices[0].message.contains("paper.pdf"));
    }

    #[test]
    fn attach_rejects_a_non_pdf_and_keeps_state_untouched() {
        let mut session = ConvertSession::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_cb = calls.clone();
        session.on_file_accepted(move |_| {
            calls_in_cb.fetch_add(1, Ordering::SeqCst);
        });

        assert!(session.attach(pdf_candidate("paper.pdf", 128)));
        session.take_notices();

        let rejected = UploadCandidate::new(
            "notes.txt".to_string(),
            Some("text/plain".to_string()),
            Bytes::from_static(b"notes"),
        );
        assert!(!session.attach(rejected));

        // The previous candidate survives and the callback did not refire.
        assert_eq!(session.candidate().unwrap().file_name, "paper.pdf");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert_eq!(notices[0].stage, Some(ErrorStage::Validation));
        assert_eq!(notices[0].message, "Please upload a PDF file");
    }

    #[test]
    fn attach_rejects_an_oversized_pdf_with_the_limit_in_the_message() {
        let mut session = ConvertSession::with_policy(UploadPolicy::from_mb(1));

        assert!(!session.attach(pdf_candidate("huge.pdf", 2 * 1024 * 1024)));
        assert!(session.candidate().is_none());

        let notices = session.take_notices();
        assert!(notices[0].message.contains("1MB"), "got: {}", notices[0].message);
    }

    #[test]
    fn attach_replaces_the_previous_candidate() {
        let mut session = ConvertSession::new();

        assert!(session.attach(pdf_candidate("first.pdf", 64)));
        assert!(session.attach(pdf_candidate("second.pdf", 64)));

        assert_eq!(session.candidate().unwrap().file_name, "second.pdf");
    }

    #[tokio::test]
    async fn generate_without_a_candidate_makes_no_transport_call() {
        let mut session = ConvertSession::new();
        let transport = StubTransport::ok(sample_result());

        session.generate(&transport).await;

        assert_eq!(transport.call_count(), 0);
        assert_eq!(session.phase(), SessionPhase::Idle);

        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Please upload a PDF first");
    }

    #[tokio::test]
    async fn generate_success_populates_the_result_and_clears_busy() {
        let mut session = ConvertSession::new();
        session.attach(pdf_candidate("paper.pdf", 128));
        session.take_notices();

        let transport = StubTransport::ok(sample_result());
        session.generate(&transport).await;

        assert_eq!(transport.call_count(), 1);
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(!session.is_busy());
        assert!(session.reveal_result());
        assert_eq!(
            session.result().unwrap().audio_url,
            "http://localhost:8000/audio/podcast_abc.mp3"
        );

        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);
    }

    #[tokio::test]
    async fn generate_failure_surfaces_the_backend_message() {
        let mut session = ConvertSession::new();
        session.attach(pdf_candidate("paper.pdf", 128));
        session.take_notices();

        // The gateway answered 500 with {"error": "backend down"}.
        let transport = StubTransport::err(SubmitError::Backend("backend down".to_string()));
        session.generate(&transport).await;

        assert_eq!(session.phase(), SessionPhase::Failed);
        assert!(!session.is_busy());
        assert!(session.result().is_none());
        assert!(!session.reveal_result());

        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "backend down");
        assert_eq!(notices[0].stage, Some(ErrorStage::Backend));
    }

    #[tokio::test]
    async fn generate_failure_reports_the_network_stage() {
        let mut session = ConvertSession::new();
        session.attach(pdf_candidate("paper.pdf", 128));
        session.take_notices();

        let transport =
            StubTransport::err(SubmitError::Network("connection refused".to_string()));
        session.generate(&transport).await;

        let notices = session.take_notices();
        assert_eq!(notices[0].stage, Some(ErrorStage::Network));
    }

    #[tokio::test]
    async fn generate_clears_the_previous_result_before_submitting() {
        let mut session = ConvertSession::new();
        session.attach(pdf_candidate("paper.pdf", 128));

        let ok = StubTransport::ok(sample_result());
        session.generate(&ok).await;
        assert!(session.result().is_some());

        let failing = StubTransport::err(SubmitError::Backend("backend down".to_string()));
        session.generate(&failing).await;

        // The old result must not survive a failed regeneration.
        assert!(session.result().is_none());
        assert!(!session.reveal_result());
    }

    #[tokio::test]
    async fn full_scenario_renders_a_player_with_a_collapsed_transcript() {
        let mut session = ConvertSession::new();
        session.set_style(PodcastStyle::Academic);
        session.set_speed(Speed::new(0.8));

        assert!(session.attach(pdf_candidate("thesis.pdf", 2 * 1024 * 1024)));

        let transcript = "HOST A: Welcome.\n\nHOST B: Today, thesis.pdf.";
        let transport = StubTransport::ok(GenerationResult {
            audio_url: "http://localhost:8000/audio/podcast_thesis.mp3".to_string(),
            transcript: Some(transcript.to_string()),
            metadata: None,
        });
        session.generate(&transport).await;

        let (file_name, style, speed) = transport.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(file_name, "thesis.pdf");
        assert_eq!(style, PodcastStyle::Academic);
        assert_eq!(speed.value(), 0.8);

        let view = session.player_view().unwrap();
        assert_eq!(view.audio_url, "http://localhost:8000/audio/podcast_thesis.mp3");

        let disclosure = view.transcript.unwrap();
        assert!(!disclosure.expanded);
        assert_eq!(disclosure.text, transcript);

        session.toggle_transcript();
        let expanded = session.player_view().unwrap().transcript.unwrap();
        assert!(expanded.expanded);
        assert_eq!(expanded.text, transcript);
    }

    #[test]
    fn player_view_is_none_without_a_result() {
        let session = ConvertSession::new();
        assert!(session.player_view().is_none());
    }

    #[tokio::test]
    async fn player_view_omits_an_empty_transcript() {
        let mut session = ConvertSession::new();
        session.attach(pdf_candidate("paper.pdf", 128));

        let transport = StubTransport::ok(GenerationResult {
            audio_url: "http://localhost:8000/audio/podcast_abc.mp3".to_string(),
            transcript: Some(String::new()),
            metadata: None,
        });
        session.generate(&transport).await;

        let view = session.player_view().unwrap();
        assert!(view.transcript.is_none());
    }

    #[test]
    fn take_notices_drains_the_queue() {
        let mut session = ConvertSession::new();
        session.attach(pdf_candidate("paper.pdf", 128));

        assert_eq!(session.take_notices().len(), 1);
        assert!(session.take_notices().is_empty());
    }
}
