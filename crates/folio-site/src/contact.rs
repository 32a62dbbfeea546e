//! Contact form handling
//!
//! Submissions are intercepted, captured as a [`FormSnapshot`] and handed to
//! a [`SubmissionStrategy`]. The outcome is shown as a transient
//! notification: visible for a while, then sliding out and removed.

use std::collections::HashMap;

use folio_dom::NodeId;
use folio_runtime::{Behavior, Event, EventKind, RuntimeError, Scope};
use serde::Serialize;

use crate::SiteConfig;

/// Field values captured when the form is submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Submission error
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),

    #[cfg(feature = "network")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint answered with status {0}")]
    Status(u16),

    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Where a submitted form goes
pub trait SubmissionStrategy {
    fn submit(&mut self, snapshot: &FormSnapshot) -> Result<(), SubmitError>;
}

/// Accepts every submission without sending it anywhere
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSubmitter;

impl SubmissionStrategy for LocalSubmitter {
    fn submit(&mut self, snapshot: &FormSnapshot) -> Result<(), SubmitError> {
        tracing::debug!(email = %snapshot.email, "submission kept local");
        Ok(())
    }
}

/// POSTs the snapshot as JSON; any non-2xx status is a failure
#[cfg(feature = "network")]
pub struct HttpSubmitter {
    endpoint: url::Url,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "network")]
impl HttpSubmitter {
    pub fn new(endpoint: &str) -> Result<Self, SubmitError> {
        Ok(Self {
            endpoint: url::Url::parse(endpoint)?,
            client: reqwest::blocking::Client::new(),
        })
    }
}

#[cfg(feature = "network")]
impl SubmissionStrategy for HttpSubmitter {
    fn submit(&mut self, snapshot: &FormSnapshot) -> Result<(), SubmitError> {
        let body = serde_json::to_vec(snapshot)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        let status = response.status();
        tracing::info!(endpoint = %self.endpoint, status = status.as_u16(), "form posted");
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Status(status.as_u16()))
        }
    }
}

/// Strategy for `config`: HTTP when an endpoint is set and networking is
/// compiled in, local otherwise
pub fn default_strategy(config: &SiteConfig) -> Box<dyn SubmissionStrategy> {
    let Some(endpoint) = config.submit_endpoint.as_deref() else {
        return Box::new(LocalSubmitter);
    };

    #[cfg(feature = "network")]
    match HttpSubmitter::new(endpoint) {
        Ok(submitter) => return Box::new(submitter),
        Err(err) => tracing::warn!(endpoint, %err, "falling back to local submission"),
    }
    #[cfg(not(feature = "network"))]
    tracing::warn!(endpoint, "built without the `network` feature, submissions stay local");

    Box::new(LocalSubmitter)
}

/// Notification flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn background(self) -> &'static str {
        match self {
            Self::Success => "rgba(167, 139, 250, 0.9)",
            Self::Error => "rgba(239, 68, 68, 0.9)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationStage {
    Shown,
    Leaving,
}

/// Contact form unit
pub struct ContactForm {
    form_selector: String,
    field_selectors: [String; 3],
    display_ms: f64,
    exit_ms: f64,
    success_message: String,
    error_message: String,
    strategy: Box<dyn SubmissionStrategy>,
    form: Option<NodeId>,
    fields: [Option<NodeId>; 3],
    notifications: HashMap<u64, (NodeId, NotificationStage)>,
    next_token: u64,
}

impl ContactForm {
    pub fn new(config: &SiteConfig, strategy: Box<dyn SubmissionStrategy>) -> Self {
        let selectors = &config.selectors;
        Self {
            form_selector: selectors.contact_form.clone(),
            field_selectors: [
                selectors.name_field.clone(),
                selectors.email_field.clone(),
                selectors.message_field.clone(),
            ],
            display_ms: config.notification_duration_ms,
            exit_ms: config.notification_exit_ms,
            success_message: config.success_message.clone(),
            error_message: config.error_message.clone(),
            strategy,
            form: None,
            fields: [None; 3],
            notifications: HashMap::new(),
            next_token: 0,
        }
    }

    fn snapshot(&self, scope: &Scope<'_>) -> FormSnapshot {
        let doc = scope.document();
        let value = |field: Option<NodeId>| field.map(|f| doc.control_value(f)).unwrap_or_default();
        let [name, email, message] = self.fields;
        FormSnapshot {
            name: value(name),
            email: value(email),
            message: value(message),
        }
    }

    fn handle_submit(&mut self, scope: &mut Scope<'_>, form: NodeId) {
        scope.prevent_default();

        let snapshot = self.snapshot(scope);
        match serde_json::to_value(&snapshot) {
            Ok(value) => scope.console().log_value("Form submitted:", value),
            Err(err) => tracing::warn!(%err, "could not log submission"),
        }

        match self.strategy.submit(&snapshot) {
            Ok(()) => {
                let message = self.success_message.clone();
                self.show_notification(scope, &message, NotificationKind::Success);
                scope.document_mut().reset_form(form);
            }
            Err(err) => {
                tracing::warn!(%err, "contact form submission failed");
                let message = self.error_message.clone();
                self.show_notification(scope, &message, NotificationKind::Error);
            }
        }
    }

    fn show_notification(&mut self, scope: &mut Scope<'_>, message: &str, kind: NotificationKind) {
        let doc = scope.document_mut();
        let notification = doc.create_element("div");
        doc.set_attr(notification, "class", &format!("notification notification-{}", kind.as_str()));
        if let Err(err) = doc.set_text_content(notification, message) {
            tracing::warn!(%err, "could not fill notification");
        }
        doc.set_css_text(
            notification,
            &format!(
                "position: fixed; top: 100px; right: 20px; padding: 1rem 2rem; background: {}; \
                 color: white; border-radius: 4px; z-index: 10000; animation: slideInRight 0.3s ease;",
                kind.background()
            ),
        );
        let body = doc.body();
        if let Err(err) = doc.append_child(body, notification) {
            tracing::warn!(%err, "could not show notification");
            return;
        }

        let token = self.next_token;
        self.next_token += 1;
        self.notifications.insert(token, (notification, NotificationStage::Shown));
        scope.set_timeout(self.display_ms, token);
        tracing::debug!(kind = kind.as_str(), "notification shown");
    }

    fn advance_notification(&mut self, scope: &mut Scope<'_>, token: u64) {
        let Some((node, stage)) = self.notifications.remove(&token) else {
            return;
        };
        match stage {
            NotificationStage::Shown => {
                scope.document_mut().set_style(node, "animation", "slideOutRight 0.3s ease");
                let next = self.next_token;
                self.next_token += 1;
                self.notifications.insert(next, (node, NotificationStage::Leaving));
                scope.set_timeout(self.exit_ms, next);
            }
            NotificationStage::Leaving => scope.document_mut().remove(node),
        }
    }
}

impl Behavior for ContactForm {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn attach(&mut self, scope: &mut Scope<'_>) -> Result<(), RuntimeError> {
        let doc = scope.document();
        self.form = doc.query_selector(&self.form_selector)?;
        if self.form.is_none() {
            return Ok(());
        }
        for (slot, selector) in self.fields.iter_mut().zip(&self.field_selectors) {
            *slot = doc.query_selector(selector)?;
        }
        scope.listen(EventKind::Submit);
        Ok(())
    }

    fn handle(&mut self, scope: &mut Scope<'_>, event: &Event) {
        match event {
            Event::Submit { form } if Some(*form) == self.form => self.handle_submit(scope, *form),
            Event::Timer { token, .. } => self.advance_notification(scope, *token),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_flat() {
        let snapshot = FormSnapshot {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hi".into(),
        };
        assert_eq!(
            serde_json::to_string(&snapshot).unwrap(),
            r#"{"name":"Ada","email":"ada@example.com","message":"Hi"}"#
        );
    }

    #[test]
    fn test_default_strategy_is_local() {
        let mut strategy = default_strategy(&SiteConfig::default());
        assert!(strategy.submit(&FormSnapshot::default()).is_ok());
    }
}

#[cfg(all(test, feature = "network"))]
mod http_tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use super::*;

    /// Answers one request per status in `statuses`, returning the bodies
    fn serve(statuses: &'static [&'static str]) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/contact", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let mut bodies = Vec::new();
            for status in statuses {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream);
                let mut length = 0;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            length = value.trim().parse().unwrap();
                        }
                    }
                }
                let mut body = vec![0; length];
                reader.read_exact(&mut body).unwrap();
                bodies.push(String::from_utf8(body).unwrap());

                let response = format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                reader.get_mut().write_all(response.as_bytes()).unwrap();
            }
            bodies
        });
        (endpoint, handle)
    }

    #[test]
    fn test_status_decides_outcome() {
        let (endpoint, server) = serve(&["503 Service Unavailable", "200 OK"]);
        let mut submitter = HttpSubmitter::new(&endpoint).unwrap();
        let snapshot = FormSnapshot {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hi".into(),
        };

        assert!(matches!(submitter.submit(&snapshot), Err(SubmitError::Status(503))));
        assert!(submitter.submit(&snapshot).is_ok());

        let bodies = server.join().unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[1], serde_json::to_string(&snapshot).unwrap());
    }

    #[test]
    fn test_bad_endpoint_is_rejected() {
        assert!(matches!(
            HttpSubmitter::new("not a url"),
            Err(SubmitError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_bad_endpoint_falls_back_to_local() {
        let config = SiteConfig {
            submit_endpoint: Some("not a url".into()),
            ..SiteConfig::default()
        };
        let mut strategy = default_strategy(&config);
        assert!(strategy.submit(&FormSnapshot::default()).is_ok());
    }
}
