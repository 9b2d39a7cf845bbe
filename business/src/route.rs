//! Which panel the admin console shows.

use warden_states::State;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Users,
    Logs,
}

impl Route {
    pub const ALL: [Self; 2] = [Self::Users, Self::Logs];

    pub fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Logs => "Logs",
        }
    }
}

impl State for Route {}
