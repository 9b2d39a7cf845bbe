use crate::Result;
use crate::model::{Log, LogAction};

/// Human-readable message of an audit entry.
///
/// Account names come from the entry's `user` snapshot, never from the
/// current store. An unrecognised tag yields [`Error::UnknownAction`](crate::Error::UnknownAction).
pub fn format_message(log: &Log) -> Result<String> {
    let username = &log.user.username;
    let message = match log.action()? {
        LogAction::Login => "login to account".to_owned(),
        LogAction::Logout => "logged out".to_owned(),
        LogAction::ChangePassword => "changed his password".to_owned(),
        LogAction::PasswordLimit => "change password limit for users".to_owned(),
        LogAction::DeleteAccount => format!("delete account \"{username}\""),
        LogAction::BlockAccount if log.user.blocked => {
            format!("unblocked account \"{username}\"")
        }
        LogAction::BlockAccount => format!("blocked account \"{username}\""),
        LogAction::LimitAccount if log.user.enable_limit => {
            format!("disable limit for account \"{username}\"")
        }
        LogAction::LimitAccount => format!("enable limit for account \"{username}\""),
        LogAction::CreateAccount => format!("create account with username - \"{username}\""),
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::model::{LogId, User, UserId};
    use ustr::Ustr;

    fn log(action: LogAction, user: User) -> Log {
        Log::new(LogId::new("1"), user, action, 0)
    }

    fn bob() -> User {
        User::new(UserId::new("2"), "bob")
    }

    #[test]
    fn test_fixed_messages() {
        let cases = [
            (LogAction::Login, "login to account"),
            (LogAction::Logout, "logged out"),
            (LogAction::ChangePassword, "changed his password"),
            (LogAction::PasswordLimit, "change password limit for users"),
            (LogAction::DeleteAccount, "delete account \"bob\""),
            (LogAction::CreateAccount, "create account with username - \"bob\""),
        ];
        for (action, expected) in cases {
            assert_eq!(format_message(&log(action, bob())).unwrap(), expected);
        }
    }

    #[test]
    fn test_block_account_reads_snapshot() {
        let mut blocked = bob();
        blocked.blocked = true;

        assert_eq!(
            format_message(&log(LogAction::BlockAccount, blocked)).unwrap(),
            "unblocked account \"bob\""
        );
        assert_eq!(
            format_message(&log(LogAction::BlockAccount, bob())).unwrap(),
            "blocked account \"bob\""
        );
    }

    #[test]
    fn test_limit_account_reads_snapshot() {
        let mut limited = bob();
        limited.enable_limit = true;

        assert_eq!(
            format_message(&log(LogAction::LimitAccount, limited)).unwrap(),
            "disable limit for account \"bob\""
        );
        assert_eq!(
            format_message(&log(LogAction::LimitAccount, bob())).unwrap(),
            "enable limit for account \"bob\""
        );
    }

    #[test]
    fn test_username_comes_from_user_not_ref() {
        let entry = log(LogAction::DeleteAccount, bob())
            .with_reference(User::new(UserId::new("1"), "alice"));

        assert_eq!(format_message(&entry).unwrap(), "delete account \"bob\"");
        assert_eq!(entry.who(), "alice");
    }

    #[test]
    fn test_unknown_action() {
        let mut entry = log(LogAction::Login, bob());
        entry.action = Ustr::from("reset_totp");

        let err = format_message(&entry).unwrap_err();
        assert!(matches!(&err, Error::UnknownAction(tag) if tag == "reset_totp"));
        assert_eq!(err.to_string(), "unknown action \"reset_totp\"");
    }
}
