use warden_application::{EventPublisher, VerificationTokens};

/// Shared state handed to every route.
///
/// Stores implement `Clone` via internal `Arc`s, so routes build their use
/// cases per request from cheap clones.
pub struct AppState<U, S, V, E, H, T> {
    pub users: U,
    pub sessions: S,
    pub verification: VerificationTokens<V>,
    pub email: E,
    pub hasher: H,
    pub publisher: EventPublisher<T>,
}

impl<U, S, V, E, H, T> Clone for AppState<U, S, V, E, H, T>
where
    U: Clone,
    S: Clone,
    V: Clone,
    E: Clone,
    H: Clone,
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            verification: self.verification.clone(),
            email: self.email.clone(),
            hasher: self.hasher.clone(),
            publisher: self.publisher.clone(),
        }
    }
}
