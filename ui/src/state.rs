use warden_business::{AdminConfig, Database, SessionState, install};
use warden_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::new(
            Database::demo(),
            AdminConfig::default(),
            SessionState::default(),
        )
    }
}

impl State {
    pub fn new(seed: Database, config: AdminConfig, session: SessionState) -> Self {
        let mut ctx = StateCtx::new();
        install(&mut ctx, seed, config, session);
        Self { ctx }
    }

    /// `seed` with `user_id` already signed in.
    pub fn test(seed: Database, user_id: Option<&str>) -> Self {
        let session = SessionState {
            user_id: user_id.map(str::to_owned),
        };
        Self::new(seed, AdminConfig::default(), session)
    }
}
