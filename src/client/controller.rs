//! Drives one simulator submission from the submit event to the rendered result.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::dom::{Document, FormElement, SubmitControl, FORM_ID, SUBMIT_BUTTON_CLASS};
use super::presenter::{MessageCategory, MessagePresenter};
use super::transport::{Transport, TransportResponse, CALCUL_PRIME_PATH};
use super::validator::validate;
use crate::errors::{SubmissionError, ValidationError};
use crate::models::{FormSubmission, PremiumValue, ServerResult};

pub const LOADING_MESSAGE: &str = "Chargement...";
pub const CURRENCY: &str = "MAD";

/// A submit event dispatched to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    target: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            default_prevented: false,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Stops the page from navigating away with the form.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The page structure is ready to be queried.
    DomContentLoaded,
    Submit(SubmitEvent),
}

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Rejected locally; nothing was sent.
    Rejected(ValidationError),
    Estimated(PremiumValue),
    Failed(SubmissionError),
}

/// Re-enables the submit control when dropped, whatever path left the submission.
struct EnableOnDrop<'a>(&'a dyn SubmitControl);

impl Drop for EnableOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set_disabled(false);
    }
}

/// Submit handler of the simulator form.
pub struct SubmissionController<T: Transport> {
    form: Arc<dyn FormElement>,
    submit_control: Arc<dyn SubmitControl>,
    presenter: MessagePresenter,
    transport: T,
}

impl<T: Transport> SubmissionController<T> {
    /// Looks up the form and its submit button once and keeps them.
    pub fn bind(document: Arc<dyn Document>, transport: T) -> Result<Self, SubmissionError> {
        let form = document
            .form(FORM_ID)
            .ok_or_else(|| SubmissionError::MissingElement(FORM_ID.to_string()))?;
        let submit_control = form
            .submit_control(SUBMIT_BUTTON_CLASS)
            .ok_or_else(|| SubmissionError::MissingElement(SUBMIT_BUTTON_CLASS.to_string()))?;

        Ok(Self {
            form,
            submit_control,
            presenter: MessagePresenter::new(document),
            transport,
        })
    }

    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> SubmissionOutcome {
        event.prevent_default();

        self.submit_control.set_disabled(true);
        let _enable = EnableOnDrop(self.submit_control.as_ref());

        let submission = FormSubmission::from_entries(self.form.entries());

        if let Err(e) = validate(&submission) {
            self.presenter.display(&e.to_string(), &MessageCategory::Error);
            return SubmissionOutcome::Rejected(e);
        }

        self.presenter.display(LOADING_MESSAGE, &MessageCategory::Loading);
        log::info!("Envoi des données au serveur...");

        match self.request_premium(&submission).await {
            Ok(prime) => {
                log::info!("Prime estimée: {}", prime);
                self.presenter.display(
                    &format!("Prime estimée: {} {}", prime, CURRENCY),
                    &MessageCategory::Success,
                );
                SubmissionOutcome::Estimated(prime)
            }
            Err(SubmissionError::Application(message)) => {
                log::info!("Erreur serveur: {}", message);
                self.presenter
                    .display(&format!("Erreur: {}", message), &MessageCategory::Error);
                SubmissionOutcome::Failed(SubmissionError::Application(message))
            }
            Err(e) => {
                log::error!("Erreur: {:?}", e);
                self.presenter
                    .display(&format!("Erreur: {}", e), &MessageCategory::Error);
                SubmissionOutcome::Failed(e)
            }
        }
    }

    async fn request_premium(
        &self,
        submission: &FormSubmission,
    ) -> Result<PremiumValue, SubmissionError> {
        let response = self
            .transport
            .post_json(CALCUL_PRIME_PATH, submission)
            .await?;

        if !response.is_success() {
            return Err(SubmissionError::HttpStatus {
                status: response.status(),
            });
        }

        let result: ServerResult = response.json().await?;
        log::info!("Réponse du serveur: {:?}", result);

        result.into_premium()
    }
}

/// Routes page events to the submission controller, binding it on page ready.
pub struct Page<T: Transport> {
    document: Arc<dyn Document>,
    transport: Option<T>,
    controller: Option<SubmissionController<T>>,
}

impl<T: Transport> Page<T> {
    pub fn new(document: Arc<dyn Document>, transport: T) -> Self {
        Self {
            document,
            transport: Some(transport),
            controller: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.controller.is_some()
    }

    /// Handles one event. Returns the outcome when the event was a handled submission.
    pub async fn dispatch(&mut self, event: PageEvent) -> Option<SubmissionOutcome> {
        match event {
            PageEvent::DomContentLoaded => {
                self.bind();
                None
            }
            PageEvent::Submit(mut submit) => {
                let controller = self.controller.as_ref()?;
                if submit.target() != FORM_ID {
                    return None;
                }
                Some(controller.handle_submit(&mut submit).await)
            }
        }
    }

    /// Handles events one after another until every sender is gone.
    pub async fn run(mut self, mut events: mpsc::Receiver<PageEvent>) -> Vec<SubmissionOutcome> {
        let mut outcomes = Vec::new();
        while let Some(event) = events.recv().await {
            if let Some(outcome) = self.dispatch(event).await {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    fn bind(&mut self) {
        let Some(transport) = self.transport.take() else {
            return;
        };
        match SubmissionController::bind(self.document.clone(), transport) {
            Ok(controller) => self.controller = Some(controller),
            Err(e) => log::error!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::{MemoryDocument, MemoryForm, MemoryRegion};
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use std::sync::Mutex;

    const VALID_FIELDS: [(&str, &str); 6] = [
        ("nom", "Alaoui"),
        ("prenom", "Karim"),
        ("email", "karim@example.ma"),
        ("age", "30"),
        ("anciennete_permis", "moins_5"),
        ("puissance", "6"),
    ];

    /// Canned server answer.
    #[derive(Clone)]
    enum Reply {
        Body { status: u16, body: String },
        Unreachable(String),
    }

    struct StubResponse {
        status: u16,
        body: String,
    }

    impl TransportResponse for StubResponse {
        fn status(&self) -> u16 {
            self.status
        }

        async fn json<D: DeserializeOwned>(self) -> Result<D, SubmissionError> {
            Ok(serde_json::from_str(&self.body)?)
        }
    }

    #[derive(Clone)]
    struct StubTransport {
        reply: Reply,
        requests: Arc<Mutex<Vec<(String, FormSubmission)>>>,
    }

    impl StubTransport {
        fn replying(status: u16, body: serde_json::Value) -> Self {
            Self::new(Reply::Body { status, body: body.to_string() })
        }

        fn new(reply: Reply) -> Self {
            Self {
                reply,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn requests(&self) -> Vec<(String, FormSubmission)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for StubTransport {
        type Response = StubResponse;

        async fn post_json(
            &self,
            path: &str,
            body: &FormSubmission,
        ) -> Result<StubResponse, SubmissionError> {
            self.requests
                .lock()
                .unwrap()
                .push((path.to_string(), body.clone()));
            match &self.reply {
                Reply::Body { status, body } => Ok(StubResponse {
                    status: *status,
                    body: body.clone(),
                }),
                Reply::Unreachable(message) => Err(SubmissionError::Transport(message.clone())),
            }
        }
    }

    async fn submit(
        document: &Arc<MemoryDocument>,
        transport: StubTransport,
    ) -> (SubmissionOutcome, SubmitEvent) {
        let controller = SubmissionController::bind(document.clone(), transport).unwrap();
        let mut event = SubmitEvent::new(FORM_ID);
        let outcome = controller.handle_submit(&mut event).await;
        (outcome, event)
    }

    fn rendered(document: &MemoryDocument) -> (String, Option<String>) {
        let region = document.region().unwrap().snapshot();
        (region.text, region.color)
    }

    #[tokio::test]
    async fn test_successful_estimate() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        let transport = StubTransport::replying(200, json!({ "prime": 1234 }));

        let (outcome, event) = submit(&document, transport.clone()).await;

        assert!(matches!(outcome, SubmissionOutcome::Estimated(_)));
        assert!(event.default_prevented());
        assert_eq!(
            rendered(&document),
            ("Prime estimée: 1234 MAD".to_string(), Some("green".to_string()))
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, CALCUL_PRIME_PATH);
        assert_eq!(requests[0].1, FormSubmission::from_entries(VALID_FIELDS));
        assert_eq!(document.button().unwrap().toggles(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_loading_message_shown_before_result() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        let transport = StubTransport::replying(200, json!({ "prime": "722.84" }));

        submit(&document, transport).await;

        assert_eq!(
            document.region().unwrap().history(),
            vec![LOADING_MESSAGE.to_string(), "Prime estimée: 722.84 MAD".to_string()]
        );
    }

    #[tokio::test]
    async fn test_server_error_field_is_shown_verbatim() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        let transport = StubTransport::replying(200, json!({ "error": "x" }));

        let (outcome, _) = submit(&document, transport).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Failed(SubmissionError::Application("x".to_string()))
        );
        assert_eq!(
            rendered(&document),
            ("Erreur: x".to_string(), Some("red".to_string()))
        );
        assert!(!document.button().unwrap().is_disabled());
    }

    #[tokio::test]
    async fn test_non_success_status_skips_body() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        // A body that would parse fine: the status alone decides.
        let transport = StubTransport::replying(400, json!({ "prime": 10 }));

        let (outcome, _) = submit(&document, transport).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Failed(SubmissionError::HttpStatus { status: 400 })
        );
        assert_eq!(
            rendered(&document),
            (
                "Erreur: Une erreur est survenue lors du calcul de la prime.".to_string(),
                Some("red".to_string())
            )
        );
        assert!(!document.button().unwrap().is_disabled());
    }

    #[tokio::test]
    async fn test_malformed_body_goes_through_failure_path() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        let transport = StubTransport::new(Reply::Body {
            status: 200,
            body: "<html>oops</html>".to_string(),
        });

        let (outcome, _) = submit(&document, transport).await;

        assert!(matches!(outcome, SubmissionOutcome::Failed(SubmissionError::Parse(_))));
        let (text, color) = rendered(&document);
        assert!(text.starts_with("Erreur: "));
        assert_eq!(color.as_deref(), Some("red"));
        assert!(!document.button().unwrap().is_disabled());
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        let transport = StubTransport::new(Reply::Unreachable("connection refused".to_string()));

        let (outcome, _) = submit(&document, transport).await;

        assert!(matches!(outcome, SubmissionOutcome::Failed(SubmissionError::Transport(_))));
        assert_eq!(
            rendered(&document),
            ("Erreur: connection refused".to_string(), Some("red".to_string()))
        );
        assert_eq!(document.button().unwrap().toggles(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_network() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        document.set_field("age", "16");
        let transport = StubTransport::replying(200, json!({ "prime": 1 }));

        let (outcome, _) = submit(&document, transport.clone()).await;

        assert_eq!(outcome, SubmissionOutcome::Rejected(ValidationError::InvalidAge));
        assert!(transport.requests().is_empty());
        assert_eq!(
            rendered(&document),
            (
                "L'âge doit être compris entre 18 et 100.".to_string(),
                Some("red".to_string())
            )
        );
        assert_eq!(document.button().unwrap().toggles(), vec![true, false]);
    }

    #[test]
    fn test_bind_requires_form_and_button() {
        let without_form = Arc::new(MemoryDocument::from_parts(None, Some(MemoryRegion::default())));
        let result = SubmissionController::bind(without_form, StubTransport::replying(200, json!({})));
        assert_eq!(
            result.err(),
            Some(SubmissionError::MissingElement(FORM_ID.to_string()))
        );

        let without_button = Arc::new(MemoryDocument::from_parts(
            Some(MemoryForm::without_submit_control()),
            Some(MemoryRegion::default()),
        ));
        let result = SubmissionController::bind(without_button, StubTransport::replying(200, json!({})));
        assert_eq!(
            result.err(),
            Some(SubmissionError::MissingElement(SUBMIT_BUTTON_CLASS.to_string()))
        );
    }

    #[tokio::test]
    async fn test_page_ignores_submit_before_ready() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        let transport = StubTransport::replying(200, json!({ "prime": 1 }));
        let mut page = Page::new(document.clone(), transport.clone());

        let early = page.dispatch(PageEvent::Submit(SubmitEvent::new(FORM_ID))).await;
        assert_eq!(early, None);
        assert!(transport.requests().is_empty());

        page.dispatch(PageEvent::DomContentLoaded).await;
        assert!(page.is_bound());

        let other_form = page
            .dispatch(PageEvent::Submit(SubmitEvent::new("newsletter-form")))
            .await;
        assert_eq!(other_form, None);

        let handled = page.dispatch(PageEvent::Submit(SubmitEvent::new(FORM_ID))).await;
        assert!(matches!(handled, Some(SubmissionOutcome::Estimated(_))));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_page_run_handles_events_in_order() {
        let document = Arc::new(MemoryDocument::with_fields(VALID_FIELDS));
        let transport = StubTransport::replying(200, json!({ "prime": 99.5 }));
        let page = Page::new(document.clone(), transport);

        let (tx, rx) = mpsc::channel(8);
        tx.send(PageEvent::DomContentLoaded).await.unwrap();
        tx.send(PageEvent::Submit(SubmitEvent::new(FORM_ID))).await.unwrap();
        tx.send(PageEvent::Submit(SubmitEvent::new(FORM_ID))).await.unwrap();
        drop(tx);

        let outcomes = page.run(rx).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(rendered(&document).0, "Prime estimée: 99.5 MAD");
    }
}
