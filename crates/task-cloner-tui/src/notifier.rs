/*
[INPUT]:  Successful CreateResponse, clipboard and URL-opener ports
[OUTPUT]: Copy/open side effects and NotifierAction for the host
[POS]:    Success notifier - final step of the clone flow
[UPDATE]: When notifier actions or platform ports change
*/

use task_cloner_adapter::CreateResponse;
use thiserror::Error;
use tracing::{info, warn};

use crate::notice::Notices;

#[derive(Error, Debug)]
pub enum PortError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("could not open {url}: {reason}")]
    Open { url: String, reason: String },
}

/// System clipboard, text only.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardPort: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), PortError>;
}

/// Hands a URL to the desktop's default handler.
#[cfg_attr(test, mockall::automock)]
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), PortError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierAction {
    None,
    CopyTaskId,
    CopyUrl,
    OpenExternally,
    CreateAnother,
    Close,
}

#[derive(Debug, Clone)]
pub struct SuccessNotifier {
    response: CreateResponse,
}

impl SuccessNotifier {
    pub fn new(response: CreateResponse) -> Self {
        Self { response }
    }

    pub fn response(&self) -> &CreateResponse {
        &self.response
    }

    pub fn task_id(&self) -> Option<&str> {
        self.response.new_task_id.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.response.url.as_deref()
    }

    /// Returns whether anything was copied.
    pub fn copy_task_id(&self, clipboard: &dyn ClipboardPort, notices: &Notices) -> bool {
        let Some(task_id) = self.task_id() else {
            return false;
        };
        match clipboard.set_text(task_id) {
            Ok(()) => {
                notices.success("Task ID Copied", format!("{task_id} copied to clipboard"));
                true
            }
            Err(err) => {
                warn!(error = %err, "copy task id failed");
                notices.error("Copy Failed", err.to_string());
                false
            }
        }
    }

    pub fn copy_url(&self, clipboard: &dyn ClipboardPort, notices: &Notices) -> bool {
        let Some(url) = self.url() else {
            return false;
        };
        match clipboard.set_text(url) {
            Ok(()) => {
                notices.success("URL Copied", "Task URL copied to clipboard");
                true
            }
            Err(err) => {
                warn!(error = %err, "copy url failed");
                notices.error("Copy Failed", err.to_string());
                false
            }
        }
    }

    pub fn open_externally(&self, opener: &dyn UrlOpener, notices: &Notices) -> bool {
        let Some(url) = self.url() else {
            return false;
        };
        match opener.open(url) {
            Ok(()) => {
                info!(url, "opened task in browser");
                true
            }
            Err(err) => {
                warn!(error = %err, "open url failed");
                notices.error("Open Failed", err.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_response() -> CreateResponse {
        CreateResponse {
            success: true,
            new_task_id: Some("GLAS30-12345".to_string()),
            url: Some("https://example.atlassian.net/browse/GLAS30-12345".to_string()),
            message: Some("Task cloned successfully".to_string()),
            error: None,
        }
    }

    #[test]
    fn test_copy_task_id_and_url() {
        let mut clipboard = MockClipboardPort::new();
        clipboard
            .expect_set_text()
            .withf(|text: &str| text == "GLAS30-12345")
            .times(1)
            .returning(|_| Ok(()));
        clipboard
            .expect_set_text()
            .withf(|text: &str| text.ends_with("/browse/GLAS30-12345"))
            .times(1)
            .returning(|_| Ok(()));

        let notices = Notices::default();
        let notifier = SuccessNotifier::new(full_response());
        assert!(notifier.copy_task_id(&clipboard, &notices));
        assert!(notifier.copy_url(&clipboard, &notices));
        assert_eq!(
            notices.titles(),
            vec!["Task ID Copied".to_string(), "URL Copied".to_string()]
        );
    }

    #[test]
    fn test_absent_fields_are_silent_noops() {
        let mut clipboard = MockClipboardPort::new();
        clipboard.expect_set_text().never();
        let mut opener = MockUrlOpener::new();
        opener.expect_open().never();

        let notices = Notices::default();
        let notifier = SuccessNotifier::new(CreateResponse {
            new_task_id: None,
            url: None,
            ..full_response()
        });

        assert!(!notifier.copy_task_id(&clipboard, &notices));
        assert!(!notifier.copy_url(&clipboard, &notices));
        assert!(!notifier.open_externally(&opener, &notices));
        assert!(notices.history().is_empty());
    }

    #[test]
    fn test_open_externally_uses_url() {
        let mut opener = MockUrlOpener::new();
        opener
            .expect_open()
            .withf(|url: &str| url == "https://example.atlassian.net/browse/GLAS30-12345")
            .times(1)
            .returning(|_| Ok(()));

        let notifier = SuccessNotifier::new(full_response());
        assert!(notifier.open_externally(&opener, &Notices::default()));
    }

    #[test]
    fn test_platform_failure_becomes_notice() {
        let mut clipboard = MockClipboardPort::new();
        clipboard
            .expect_set_text()
            .returning(|_| Err(PortError::Clipboard("no display".to_string())));

        let notices = Notices::default();
        let notifier = SuccessNotifier::new(full_response());
        assert!(!notifier.copy_task_id(&clipboard, &notices));
        let latest = notices.latest().expect("notice");
        assert_eq!(latest.title, "Copy Failed");
        assert!(latest.body.contains("no display"));
    }
}
