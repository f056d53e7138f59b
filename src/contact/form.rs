use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info, warn};

use super::outcome::{OutcomeProvider, SubmitOutcome};
use super::validation::{ContactSubmission, FieldId, ValidationResult};
use crate::components::notification::{Notification, Notifier};
use crate::config::SiteConfig;
use crate::error::SetupError;
use crate::scheduler::Scheduler;

pub const FORM_HAS_ERRORS: &str = "Bitte korrigieren Sie die Fehler im Formular.";
pub const SENT: &str = "Ihre Nachricht wurde erfolgreich gesendet!";
pub const CONNECTION_ERROR: &str = "Verbindungsfehler. Bitte versuchen Sie es später erneut.";
pub const SENDING: &str = "Wird gesendet...";

pub trait FieldHandle {
    fn value(&self) -> String;
    fn is_checked(&self) -> bool;
    /// Shows `message` next to the field and marks it invalid.
    fn mark_invalid(&self, message: &str);
}

pub trait SubmitControl {
    fn label(&self) -> String;
    /// Disables the control and shows `label` with a busy indicator.
    fn set_busy(&self, label: &str);
    /// Enables the control again with `label`.
    fn restore(&self, label: &str);
}

/// The contact form as the validator sees it.
pub trait FormSurface {
    fn field(&self, id: FieldId) -> Option<Rc<dyn FieldHandle>>;
    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>>;
    /// Removes every inline error and invalid marker, however many there are.
    fn clear_errors(&self);
}

pub trait Navigator {
    fn navigate(&self, url: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitSettings {
    pub submit_delay_ms: u32,
    pub redirect_delay_ms: u32,
    pub toast_duration_ms: u32,
    pub confirmation_url: String,
}

impl From<&SiteConfig> for SubmitSettings {
    fn from(config: &SiteConfig) -> Self {
        Self {
            submit_delay_ms: config.submit_delay_ms,
            redirect_delay_ms: config.redirect_delay_ms,
            toast_duration_ms: config.toast_duration_ms,
            confirmation_url: config.confirmation_url.clone(),
        }
    }
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

/// Collaborators the contact form talks to besides the form itself.
#[derive(Clone)]
pub struct ContactServices {
    pub scheduler: Rc<dyn Scheduler>,
    pub notifier: Rc<dyn Notifier>,
    pub navigator: Rc<dyn Navigator>,
    pub outcome: Rc<dyn OutcomeProvider>,
}

/// Validates the contact form on submit and runs the simulated submission:
/// idle → validating → submitting → succeeded | failed.
#[derive(Clone)]
pub struct ContactForm {
    inner: Rc<Inner>,
}

struct Inner {
    surface: Rc<dyn FormSurface>,
    services: ContactServices,
    settings: SubmitSettings,
    state: Cell<SubmissionState>,
}

impl ContactForm {
    /// Fails when any expected field is missing; the caller leaves the form
    /// alone in that case.
    pub fn new(
        surface: Rc<dyn FormSurface>,
        services: ContactServices,
        settings: SubmitSettings,
    ) -> Result<Self, SetupError> {
        if let Some(missing) = FieldId::ALL.iter().find(|id| surface.field(**id).is_none()) {
            return Err(SetupError::MissingElement(format!("#{}", missing.dom_id())));
        }
        if surface.submit_control().is_none() {
            debug!("Contact form has no submit button, busy state disabled");
        }
        Ok(Self {
            inner: Rc::new(Inner {
                surface,
                services,
                settings,
                state: Cell::new(SubmissionState::Idle),
            }),
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> SubmissionState {
        self.inner.state.get()
    }

    /// Handles one submit event. The browser default is already prevented.
    pub fn submit(&self) -> SubmissionState {
        let inner = &self.inner;
        match inner.state.get() {
            SubmissionState::Submitting | SubmissionState::Succeeded => {
                debug!("Ignoring submit while {:?}", inner.state.get());
                return inner.state.get();
            }
            _ => {}
        }

        inner.state.set(SubmissionState::Validating);
        inner.surface.clear_errors();

        let Some(submission) = inner.read_submission() else {
            warn!("Contact form fields disappeared, ignoring submit");
            inner.state.set(SubmissionState::Idle);
            return SubmissionState::Idle;
        };

        let result = submission.validate();
        if !result.is_valid() {
            inner.show_errors(&result);
            inner.state.set(SubmissionState::Idle);
            return SubmissionState::Idle;
        }

        inner.begin_submission();
        SubmissionState::Submitting
    }
}

impl Inner {
    fn read_submission(&self) -> Option<ContactSubmission> {
        let text = |id: FieldId| self.surface.field(id).map(|f| f.value());
        Some(ContactSubmission::new(
            text(FieldId::Name)?,
            text(FieldId::Email)?,
            text(FieldId::Phone)?,
            text(FieldId::Message)?,
            self.surface.field(FieldId::PrivacyConsent)?.is_checked(),
        ))
    }

    fn show_errors(&self, result: &ValidationResult) {
        debug!("Contact form has {} invalid field(s)", result.field_errors.len());
        for error in &result.field_errors {
            if let Some(field) = self.surface.field(error.field) {
                field.mark_invalid(error.message);
            }
        }
        self.toast(Notification::error(FORM_HAS_ERRORS));
    }

    fn begin_submission(self: &Rc<Self>) {
        self.state.set(SubmissionState::Submitting);
        info!("Submitting contact form");

        let control = self.surface.submit_control();
        let original_label = control.as_ref().map(|c| {
            let label = c.label();
            c.set_busy(SENDING);
            label
        });

        let this = self.clone();
        self.services.scheduler.schedule(
            self.settings.submit_delay_ms,
            Box::new(move || this.finish(control, original_label)),
        );
    }

    fn finish(self: Rc<Self>, control: Option<Rc<dyn SubmitControl>>, original_label: Option<String>) {
        match self.services.outcome.next_outcome() {
            SubmitOutcome::Delivered => {
                info!("Contact form delivered");
                self.state.set(SubmissionState::Succeeded);
                self.toast(Notification::success(SENT));
                let navigator = self.services.navigator.clone();
                let url = self.settings.confirmation_url.clone();
                self.services.scheduler.schedule(
                    self.settings.redirect_delay_ms,
                    Box::new(move || navigator.navigate(&url)),
                );
            }
            SubmitOutcome::ConnectionFailed => {
                warn!("Simulated connection error while sending contact form");
                self.state.set(SubmissionState::Failed);
                self.toast(Notification::error(CONNECTION_ERROR));
                if let (Some(control), Some(label)) = (control, original_label) {
                    control.restore(&label);
                }
            }
        }
    }

    fn toast(&self, notification: Notification) {
        self.services
            .notifier
            .notify(notification.with_duration(self.settings.toast_duration_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::notification::Severity;
    use crate::contact::validation::messages;
    use crate::scheduler::ManualScheduler;
    use crate::testing::{FakeForm, RecordingNavigator, RecordingNotifier};
    use pretty_assertions::assert_eq;

    struct Harness {
        form: ContactForm,
        surface: Rc<FakeForm>,
        scheduler: Rc<ManualScheduler>,
        notifier: Rc<RecordingNotifier>,
        navigator: Rc<RecordingNavigator>,
    }

    fn harness(surface: FakeForm, outcome: SubmitOutcome) -> Harness {
        let surface = Rc::new(surface);
        let scheduler = ManualScheduler::new();
        let notifier = Rc::new(RecordingNotifier::default());
        let navigator = Rc::new(RecordingNavigator::default());
        let services = ContactServices {
            scheduler: scheduler.clone(),
            notifier: notifier.clone(),
            navigator: navigator.clone(),
            outcome: Rc::new(move || outcome),
        };
        let form = ContactForm::new(surface.clone(), services, SubmitSettings::default()).unwrap();
        Harness {
            form,
            surface,
            scheduler,
            notifier,
            navigator,
        }
    }

    #[test]
    fn empty_form_marks_every_field_and_toasts_once() {
        let h = harness(FakeForm::empty(), SubmitOutcome::Delivered);

        assert_eq!(h.form.submit(), SubmissionState::Idle);

        assert_eq!(
            h.surface.inline_errors(),
            vec![
                ("name", messages::NAME_EMPTY.to_string()),
                ("email", messages::EMAIL_EMPTY.to_string()),
                ("phone", messages::PHONE_EMPTY.to_string()),
                ("message", messages::MESSAGE_EMPTY.to_string()),
                ("privacy-consent", messages::CONSENT_MISSING.to_string()),
            ]
        );
        assert_eq!(
            h.notifier.sent(),
            vec![(Severity::Error, FORM_HAS_ERRORS.to_string())]
        );
        assert!(!h.surface.button().disabled());
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[test]
    fn resubmitting_clears_previous_errors_first() {
        let h = harness(FakeForm::empty(), SubmitOutcome::ConnectionFailed);
        h.form.submit();
        h.form.submit();
        assert_eq!(h.surface.inline_errors().len(), 5);
        assert_eq!(h.surface.clear_count(), 2);

        h.surface.fill_valid();
        h.surface.set_value(FieldId::Email, "foo@bar");
        h.form.submit();
        assert_eq!(
            h.surface.inline_errors(),
            vec![("email", messages::EMAIL_INVALID.to_string())]
        );
        assert_eq!(h.surface.invalid_fields(), vec!["email"]);
    }

    #[test]
    fn valid_submission_disables_button_immediately_and_redirects() {
        let h = harness(FakeForm::valid(), SubmitOutcome::Delivered);

        assert_eq!(h.form.submit(), SubmissionState::Submitting);
        assert!(h.surface.button().disabled());
        assert_eq!(h.surface.button().text(), SENDING);
        assert!(h.notifier.sent().is_empty());

        h.scheduler.advance(1499);
        assert_eq!(h.form.state(), SubmissionState::Submitting);

        h.scheduler.advance(1);
        assert_eq!(h.form.state(), SubmissionState::Succeeded);
        assert_eq!(h.notifier.sent(), vec![(Severity::Success, SENT.to_string())]);
        assert!(h.navigator.visited().is_empty());
        assert!(h.surface.button().disabled());

        h.scheduler.advance(1000);
        assert_eq!(h.navigator.visited(), vec!["thank_you.html".to_string()]);
        assert!(h.surface.button().disabled());
    }

    #[test]
    fn failed_submission_restores_the_button() {
        let h = harness(FakeForm::valid(), SubmitOutcome::ConnectionFailed);

        h.form.submit();
        h.scheduler.advance(1500);

        assert_eq!(h.form.state(), SubmissionState::Failed);
        assert_eq!(
            h.notifier.sent(),
            vec![(Severity::Error, CONNECTION_ERROR.to_string())]
        );
        assert!(!h.surface.button().disabled());
        assert_eq!(h.surface.button().text(), "Nachricht senden");

        h.scheduler.advance(10_000);
        assert!(h.navigator.visited().is_empty());
    }

    #[test]
    fn retry_after_failure_is_allowed() {
        let h = harness(FakeForm::valid(), SubmitOutcome::ConnectionFailed);
        h.form.submit();
        h.scheduler.advance(1500);

        assert_eq!(h.form.submit(), SubmissionState::Submitting);
        assert!(h.surface.button().disabled());
    }

    #[test]
    fn submits_in_flight_are_ignored() {
        let h = harness(FakeForm::valid(), SubmitOutcome::Delivered);
        h.form.submit();
        h.surface.set_value(FieldId::Name, "");

        assert_eq!(h.form.submit(), SubmissionState::Submitting);
        assert_eq!(h.surface.clear_count(), 1);

        h.scheduler.advance(1500);
        assert_eq!(h.form.submit(), SubmissionState::Succeeded);
        assert_eq!(h.notifier.sent().len(), 1);
    }

    #[test]
    fn missing_field_disables_the_module() {
        let surface = Rc::new(FakeForm::valid().without(FieldId::Phone));
        let services = ContactServices {
            scheduler: ManualScheduler::new(),
            notifier: Rc::new(RecordingNotifier::default()),
            navigator: Rc::new(RecordingNavigator::default()),
            outcome: Rc::new(|| SubmitOutcome::Delivered),
        };
        let err = ContactForm::new(surface, services, SubmitSettings::default())
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "missing element `#phone`");
    }

    #[test]
    fn form_without_button_still_submits() {
        let h = harness(FakeForm::valid().without_button(), SubmitOutcome::ConnectionFailed);
        assert_eq!(h.form.submit(), SubmissionState::Submitting);
        h.scheduler.advance(1500);
        assert_eq!(h.form.state(), SubmissionState::Failed);
    }

    #[test]
    fn toasts_use_configured_duration() {
        let surface = Rc::new(FakeForm::empty());
        let notifier = Rc::new(RecordingNotifier::default());
        let services = ContactServices {
            scheduler: ManualScheduler::new(),
            notifier: notifier.clone(),
            navigator: Rc::new(RecordingNavigator::default()),
            outcome: Rc::new(|| SubmitOutcome::Delivered),
        };
        let settings = SubmitSettings {
            toast_duration_ms: 800,
            ..SubmitSettings::default()
        };
        let form = ContactForm::new(surface, services, settings).unwrap();
        form.submit();
        assert_eq!(notifier.durations(), vec![800]);
    }
}
