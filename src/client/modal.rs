//! Enquiry modal visibility
//!
//! [`ModalController`] is built once when the UI starts and handed to every
//! component that needs to open the quote form. Clones share the same state.

use super::{EnquiryForm, FormVariant};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared open/closed state of the enquiry modal
#[derive(Debug, Clone)]
pub struct ModalController {
    open: Arc<watch::Sender<bool>>,
}

impl ModalController {
    pub fn new() -> Self {
        let (open, _) = watch::channel(false);
        Self { open: Arc::new(open) }
    }

    pub fn open(&self) {
        self.set(true);
    }

    pub fn close(&self) {
        self.set(false);
    }

    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    /// Receiver notified whenever the modal opens or closes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.open.subscribe()
    }

    fn set(&self, value: bool) {
        self.open.send_if_modified(|open| {
            if *open == value {
                return false;
            }
            *open = value;
            true
        });
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

/// The "Get Free Quote" modal: a quote form behind a [`ModalController`]
#[derive(Debug)]
pub struct EnquiryModal {
    controller: ModalController,
    form: EnquiryForm,
}

impl EnquiryModal {
    pub fn new(controller: ModalController) -> Self {
        Self {
            controller,
            form: EnquiryForm::new(FormVariant::Quote),
        }
    }

    pub fn controller(&self) -> &ModalController {
        &self.controller
    }

    pub fn form(&self) -> &EnquiryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EnquiryForm {
        &mut self.form
    }

    /// Hide the modal and clear its form.
    ///
    /// Refused while a submission is in flight; returns whether the modal closed.
    pub fn close(&mut self) -> bool {
        if self.form.is_submitting() {
            return false;
        }
        self.controller.close();
        self.form.reset();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FormState;

    #[test]
    fn test_open_close() {
        let controller = ModalController::new();
        let shared = controller.clone();
        assert!(!controller.is_open());

        shared.open();
        assert!(controller.is_open());

        controller.close();
        assert!(!shared.is_open());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let controller = ModalController::new();
        let mut rx = controller.subscribe();

        controller.open();
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());

        // Re-opening an open modal is not a change.
        controller.open();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_close_resets_form() {
        let controller = ModalController::new();
        let mut modal = EnquiryModal::new(controller.clone());
        controller.open();

        modal.form_mut().fields_mut().unwrap().name = "Asha".to_string();
        assert!(modal.close());
        assert!(!controller.is_open());
        assert_eq!(modal.form().fields().name, "");
        assert_eq!(modal.form().state(), &FormState::Idle);
    }

    #[test]
    fn test_close_refused_while_submitting() {
        let controller = ModalController::new();
        let mut modal = EnquiryModal::new(controller.clone());
        controller.open();

        let fields = modal.form_mut().fields_mut().unwrap();
        fields.name = "Asha".to_string();
        fields.email = "asha@example.com".to_string();
        fields.phone = "98100 00000".to_string();
        fields.project_type = "turnkey".to_string();
        modal.form_mut().begin_submit().unwrap();

        assert!(!modal.close());
        assert!(controller.is_open());
        assert!(modal.controller().is_open());
    }
}
