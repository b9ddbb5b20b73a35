//! Domain events

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    Session(SessionEvent),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { username: String },
    Restored,
    LoggedOut { username: Option<String> },
    /// The API answered 401 for a request carrying our token.
    Expired,
}
