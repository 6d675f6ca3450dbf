// Contact form submission
//
// There is no real backend. The transport only pretends to send, but the
// submission is still a proper task: it can be cancelled, it resolves exactly
// once, and it never retries on its own.
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::{AbortHandle, Abortable, Aborted};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What the visitor typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields before anything leaves the form
    ///
    /// `subjects` is the list from the site config; an empty list accepts any
    /// subject.
    pub fn validate(&self, subjects: &[String]) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidForm(format!("{} is required", field)));
            }
        }

        if !looks_like_email(self.email.trim()) {
            return Err(Error::InvalidForm(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }

        if !subjects.is_empty() && !subjects.iter().any(|s| s == self.subject.trim()) {
            return Err(Error::InvalidForm(format!(
                "unknown subject '{}'",
                self.subject.trim()
            )));
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(' ')
        }
        None => false,
    }
}

/// Something that can deliver a contact message
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn deliver(&self, form: &ContactForm) -> Result<()>;
}

/// Pretends to send after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
    failure: Option<String>,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    /// Same delay, then fails with `reason` - for exercising the error path
    pub fn failing(delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            failure: Some(reason.into()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ContactTransport for SimulatedTransport {
    async fn deliver(&self, form: &ContactForm) -> Result<()> {
        debug!("Simulating delivery ({}ms)", self.delay.as_millis());
        tokio::time::sleep(self.delay).await;

        match &self.failure {
            Some(reason) => Err(Error::SubmissionFailed(reason.clone())),
            None => {
                info!("Message from {} <{}> delivered: {}", form.name, form.email, form.subject);
                Ok(())
            }
        }
    }
}

/// Proof that a message went out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub subject: String,
    pub delivered_at: DateTime<Utc>,
}

/// A submission in flight
///
/// Dropping the handle does not cancel the task; call `cancel` for that.
pub struct SubmissionHandle {
    abort: AbortHandle,
    task: JoinHandle<std::result::Result<Result<SubmissionReceipt>, Aborted>>,
}

impl SubmissionHandle {
    /// Ask the task to stop. Harmless if it already finished.
    pub fn cancel(&self) {
        debug!("Cancelling contact submission");
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the single outcome
    pub async fn outcome(self) -> Result<SubmissionReceipt> {
        match self.task.await {
            Ok(Ok(result)) => result,
            Ok(Err(Aborted)) => Err(Error::SubmissionCancelled),
            Err(join_err) if join_err.is_cancelled() => Err(Error::SubmissionCancelled),
            Err(join_err) => Err(Error::SubmissionFailed(join_err.to_string())),
        }
    }
}

/// Validates forms and starts submissions
#[derive(Clone)]
pub struct ContactService {
    transport: Arc<dyn ContactTransport>,
    subjects: Vec<String>,
}

impl ContactService {
    pub fn new(transport: Arc<dyn ContactTransport>, subjects: Vec<String>) -> Self {
        Self {
            transport,
            subjects,
        }
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Validate, then spawn the delivery on the current tokio runtime
    ///
    /// Must be called from inside a runtime.
    pub fn submit(&self, form: ContactForm) -> Result<SubmissionHandle> {
        form.validate(&self.subjects)?;

        let transport = Arc::clone(&self.transport);
        let (abort, registration) = AbortHandle::new_pair();

        let delivery = async move {
            transport.deliver(&form).await?;
            Ok::<_, Error>(SubmissionReceipt {
                subject: form.subject.trim().to_string(),
                delivered_at: Utc::now(),
            })
        };

        let task = tokio::spawn(Abortable::new(delivery, registration));
        Ok(SubmissionHandle { abort, task })
    }

    /// Submit and wait - what the CLI does
    pub async fn send(&self, form: ContactForm) -> Result<SubmissionReceipt> {
        self.submit(form)?.outcome().await
    }
}

/// Where the form is at, from the visitor's point of view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Sent(SubmissionReceipt),
    Failed { message: String, retryable: bool },
}

impl FormStatus {
    /// Turn a submission outcome into something we can show
    ///
    /// Nothing here escalates; the worst case is a message asking to try
    /// again. Validation problems need an edit first, so they're not
    /// flagged as retryable.
    pub fn from_outcome(outcome: Result<SubmissionReceipt>) -> Self {
        match outcome {
            Ok(receipt) => FormStatus::Sent(receipt),
            Err(err) => {
                warn!("Contact submission did not go through: {}", err);
                match err {
                    Error::InvalidForm(reason) => FormStatus::Failed {
                        message: format!("Please check the form: {}", reason),
                        retryable: false,
                    },
                    Error::SubmissionCancelled => FormStatus::Failed {
                        message: "Sending cancelled. Your message is still here, send it again whenever you like.".to_string(),
                        retryable: true,
                    },
                    other => FormStatus::Failed {
                        message: format!("Couldn't send your message ({}). Please try again.", other),
                        retryable: true,
                    },
                }
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    pub fn message(&self) -> Option<String> {
        match self {
            FormStatus::Idle => None,
            FormStatus::Submitting => Some("Sending...".to_string()),
            FormStatus::Sent(_) => Some("Thanks! Your message has been sent.".to_string()),
            FormStatus::Failed { message, .. } => Some(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects() -> Vec<String> {
        vec!["Collaboration".to_string(), "Other".to_string()]
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Dana".into(),
            email: "dana@example.com".into(),
            subject: "Collaboration".into(),
            message: "Let's build something".into(),
        }
    }

    #[test]
    fn test_validation() {
        assert!(form().validate(&subjects()).is_ok());

        let mut missing = form();
        missing.message = "   ".into();
        assert!(matches!(
            missing.validate(&subjects()),
            Err(Error::InvalidForm(reason)) if reason.contains("message")
        ));

        for bad in ["dana", "@example.com", "dana@", "da na@example.com", "a@b@c"] {
            let mut f = form();
            f.email = bad.into();
            assert!(f.validate(&subjects()).is_err(), "accepted {}", bad);
        }

        let mut unknown = form();
        unknown.subject = "Spam".into();
        assert!(unknown.validate(&subjects()).is_err());
        assert!(unknown.validate(&[]).is_ok());
    }

    #[tokio::test]
    async fn test_submission_resolves_with_receipt() {
        let mut transport = MockContactTransport::new();
        transport.expect_deliver().times(1).returning(|_| Ok(()));

        let service = ContactService::new(Arc::new(transport), subjects());
        let receipt = service.send(form()).await.unwrap();
        assert_eq!(receipt.subject, "Collaboration");
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let mut transport = MockContactTransport::new();
        transport
            .expect_deliver()
            .times(1)
            .returning(|_| Err(Error::SubmissionFailed("smtp down".into())));

        let service = ContactService::new(Arc::new(transport), subjects());
        let status = FormStatus::from_outcome(service.send(form()).await);
        assert!(matches!(
            status,
            FormStatus::Failed { retryable: true, ref message } if message.contains("smtp down")
        ));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_transport() {
        let mut transport = MockContactTransport::new();
        transport.expect_deliver().times(0);

        let service = ContactService::new(Arc::new(transport), subjects());
        let mut bad = form();
        bad.name.clear();

        let status = FormStatus::from_outcome(service.send(bad).await);
        assert!(matches!(status, FormStatus::Failed { retryable: false, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_delay_elapses() {
        let transport = SimulatedTransport::new(Duration::from_secs(2));
        let service = ContactService::new(Arc::new(transport), subjects());

        let handle = service.submit(form()).unwrap();
        assert!(!handle.is_finished());
        handle.cancel();

        let outcome = handle.outcome().await;
        assert!(matches!(outcome, Err(Error::SubmissionCancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_transport_waits_then_succeeds() {
        let transport = SimulatedTransport::new(Duration::from_millis(2000));
        let service = ContactService::new(Arc::new(transport), subjects());

        let started = tokio::time::Instant::now();
        let receipt = service.send(form()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert_eq!(receipt.subject, "Collaboration");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_failure() {
        let transport = SimulatedTransport::failing(Duration::from_millis(10), "offline");
        let service = ContactService::new(Arc::new(transport), subjects());
        let err = service.send(form()).await.unwrap_err();
        assert!(matches!(err, Error::SubmissionFailed(reason) if reason == "offline"));
    }

    #[test]
    fn test_form_status_messages() {
        assert_eq!(FormStatus::Idle.message(), None);
        assert!(FormStatus::Submitting.is_submitting());

        let cancelled = FormStatus::from_outcome(Err(Error::SubmissionCancelled));
        assert!(matches!(cancelled, FormStatus::Failed { retryable: true, .. }));
        assert!(cancelled.message().unwrap().contains("cancelled"));
    }
}
