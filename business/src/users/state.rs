//! View state of the user list.

use warden_states::{State, TaskHandle};

use crate::Error;
use crate::model::UserId;

/// A value that disappears once its expiry task fires.
///
/// The handle belongs to the deferred clear command; replacing or clearing the
/// value cancels it so an old expiry can never remove a newer value.
#[derive(Debug)]
pub struct Transient<T> {
    pub value: T,
    pub handle: TaskHandle,
}

impl<T> Transient<T> {
    pub fn new(value: T, handle: TaskHandle) -> Self {
        Self { value, handle }
    }
}

fn replace_transient<T>(slot: &mut Option<Transient<T>>, next: Option<Transient<T>>) {
    if let Some(previous) = slot.take() {
        previous.handle.cancel();
    }
    *slot = next;
}

#[derive(Debug, Default)]
pub struct UserListState {
    pub create_modal_open: bool,

    /// Text of the username field in the create modal.
    pub new_username: String,

    /// Minimum password length being edited, `None` until the field is touched.
    pub staged_min_password_length: Option<u32>,

    /// Inline error of the create modal.
    pub error: Option<Transient<Error>>,

    /// Success banner.
    pub notification: Option<Transient<String>>,

    /// Block toggle clicked this frame, consumed by `SetUserBlockedCommand`.
    pub block_request: Option<(UserId, bool)>,
}

impl State for UserListState {}

impl UserListState {
    pub fn open_create_modal(&mut self) {
        self.create_modal_open = true;
        self.new_username.clear();
        self.clear_error();
    }

    pub fn close_create_modal(&mut self) {
        self.create_modal_open = false;
        self.new_username.clear();
        self.clear_error();
    }

    pub fn set_error(&mut self, error: Error, handle: TaskHandle) {
        replace_transient(&mut self.error, Some(Transient::new(error, handle)));
    }

    pub fn clear_error(&mut self) {
        replace_transient(&mut self.error, None);
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref().map(|error| &error.value)
    }

    pub fn set_notification(&mut self, message: impl Into<String>, handle: TaskHandle) {
        replace_transient(
            &mut self.notification,
            Some(Transient::new(message.into(), handle)),
        );
    }

    pub fn clear_notification(&mut self) {
        replace_transient(&mut self.notification, None);
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification
            .as_ref()
            .map(|notification| notification.value.as_str())
    }

    /// The value Save would commit; `None` when there is nothing to save.
    pub fn pending_min_password_length(&self, stored: u32) -> Option<u32> {
        self.staged_min_password_length
            .filter(|staged| *staged != stored)
    }

    pub fn can_save_min_password_length(&self, stored: u32) -> bool {
        self.pending_min_password_length(stored).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;
    use tokio_util::sync::CancellationToken;
    use warden_states::TaskId;

    fn handle(generation: u64) -> TaskHandle {
        TaskHandle::new(
            TaskId::new(TypeId::of::<()>(), generation),
            CancellationToken::new(),
        )
    }

    #[test]
    fn test_set_error_cancels_previous_expiry() {
        let mut state = UserListState::default();
        let first = handle(1);
        let second = handle(2);

        state.set_error(Error::EmptyUsername, first.clone());
        state.set_error(Error::DuplicateUsername("bob".into()), second.clone());

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(matches!(state.error(), Some(Error::DuplicateUsername(_))));
    }

    #[test]
    fn test_clear_error_cancels_expiry() {
        let mut state = UserListState::default();
        let expiry = handle(1);
        state.set_error(Error::EmptyUsername, expiry.clone());

        state.clear_error();

        assert!(expiry.is_cancelled());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_save_disabled_when_staged_equals_stored() {
        let mut state = UserListState::default();
        assert!(!state.can_save_min_password_length(8));

        state.staged_min_password_length = Some(8);
        assert!(!state.can_save_min_password_length(8));

        state.staged_min_password_length = Some(10);
        assert!(state.can_save_min_password_length(8));
        assert_eq!(state.pending_min_password_length(8), Some(10));
    }
}
