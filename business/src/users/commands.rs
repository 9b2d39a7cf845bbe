//! Commands of the user list.
//!
//! The UI writes its inputs into [`UserListState`] and dispatches one of these;
//! every store write goes through [`DatabaseStore::apply`] with the version
//! read at the start of the command.

use log::{info, warn};
use warden_states::{Command, Dep, Updater};

use super::state::UserListState;
use crate::config::AdminConfig;
use crate::database::{DatabaseStore, Mutation};

pub const USER_CREATED: &str = "User was created";

#[derive(Debug, Default)]
pub struct OpenCreateUserModalCommand;

impl Command for OpenCreateUserModalCommand {
    fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
        deps.state_mut::<UserListState>().open_create_modal();
    }
}

#[derive(Debug, Default)]
pub struct CloseCreateUserModalCommand;

impl Command for CloseCreateUserModalCommand {
    fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
        deps.state_mut::<UserListState>().close_create_modal();
    }
}

/// Create a user named `UserListState::new_username`.
///
/// On success the store is replaced first, then the modal closes and the
/// "User was created" notification starts its expiry. On failure the store is
/// left alone and the error is shown in the modal until it expires.
#[derive(Debug, Default)]
pub struct CreateUserCommand;

impl Command for CreateUserCommand {
    fn run(&self, deps: &mut Dep<'_>, updater: Updater) {
        let username = deps.state::<UserListState>().new_username.clone();
        let config = deps.state::<AdminConfig>();
        let (hide_error_delay, notification_delay) =
            (config.hide_error_delay, config.notification_delay);

        let store = deps.state::<DatabaseStore>();
        let version = store.version();
        let mutation = Mutation::CreateUser {
            id: store.get().fresh_user_id(),
            username,
        };

        match deps.state_mut::<DatabaseStore>().apply(version, &mutation) {
            Ok(_) => {
                info!("CreateUserCommand: {mutation:?} applied");
                let handle = updater.defer::<DismissNotificationCommand>(notification_delay);
                let state = deps.state_mut::<UserListState>();
                state.close_create_modal();
                state.set_notification(USER_CREATED, handle);
            }
            Err(err) => {
                warn!("CreateUserCommand: rejected: {err}");
                let handle = updater.defer::<ClearCreateUserErrorCommand>(hide_error_delay);
                deps.state_mut::<UserListState>().set_error(err, handle);
            }
        }
    }
}

/// Expiry of the create modal's error.
#[derive(Debug, Default)]
pub struct ClearCreateUserErrorCommand;

impl Command for ClearCreateUserErrorCommand {
    fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
        deps.state_mut::<UserListState>().clear_error();
    }
}

#[derive(Debug, Default)]
pub struct DismissNotificationCommand;

impl Command for DismissNotificationCommand {
    fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
        deps.state_mut::<UserListState>().clear_notification();
    }
}

/// Apply `UserListState::block_request`.
///
/// Unknown ids and admin accounts leave the store as it is.
#[derive(Debug, Default)]
pub struct SetUserBlockedCommand;

impl Command for SetUserBlockedCommand {
    fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
        let Some((id, blocked)) = deps.state_mut::<UserListState>().block_request.take() else {
            return;
        };

        let store = deps.state::<DatabaseStore>();
        let version = store.version();
        match store.get().user(&id) {
            None => {
                warn!("SetUserBlockedCommand: no user with id {id}");
                return;
            }
            Some(user) if user.is_admin() => {
                warn!("SetUserBlockedCommand: refusing to change admin '{}'", user.username);
                return;
            }
            Some(_) => {}
        }

        let mutation = Mutation::SetBlocked { id, blocked };
        match deps.state_mut::<DatabaseStore>().apply(version, &mutation) {
            Ok(_) => info!("SetUserBlockedCommand: {mutation:?} applied"),
            Err(err) => warn!("SetUserBlockedCommand: {err}"),
        }
    }
}

/// Commit the staged minimum password length.
#[derive(Debug, Default)]
pub struct SaveMinPasswordLengthCommand;

impl Command for SaveMinPasswordLengthCommand {
    fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
        let store = deps.state::<DatabaseStore>();
        let version = store.version();
        let stored = store.get().min_password_length;

        let Some(length) = deps
            .state::<UserListState>()
            .pending_min_password_length(stored)
        else {
            info!("SaveMinPasswordLengthCommand: nothing to save");
            return;
        };

        let mutation = Mutation::SetMinPasswordLength(length);
        match deps.state_mut::<DatabaseStore>().apply(version, &mutation) {
            Ok(_) => {
                info!("SaveMinPasswordLengthCommand: minimum password length is now {length}");
                deps.state_mut::<UserListState>().staged_min_password_length = None;
            }
            Err(err) => warn!("SaveMinPasswordLengthCommand: {err}"),
        }
    }
}
