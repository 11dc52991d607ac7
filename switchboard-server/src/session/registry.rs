use crate::error::{RegistryError, TransportError};
use crate::transport::PeerConnection;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use switchboard_core::{Role, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepted by the transport, role not yet validated.
    Connecting,
    /// Registered and reachable.
    Active,
    /// Removed from the registry. Terminal.
    Closed,
}

/// One live connection, owned by the registry while it is registered.
pub struct Session {
    id: SessionId,
    role: Role,
    connection: Box<dyn PeerConnection>,
    state: SessionState,
}

impl Session {
    pub fn new(id: SessionId, role: Role, connection: Box<dyn PeerConnection>) -> Self {
        Self {
            id,
            role,
            connection,
            state: SessionState::Connecting,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Active and the transport still accepts frames.
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Active && self.connection.is_open()
    }

    pub async fn send(&self, text: String) -> Result<(), TransportError> {
        self.connection.send(text).await
    }

    pub async fn close(&self) {
        self.connection.close().await;
    }
}

/// Every registered session, keyed by id.
///
/// A session is present exactly while its connection is open and its role has
/// been validated. The dispatcher owns the registry outright, so lookups and
/// fan-out borrow it immutably and can never see a half-applied insert or
/// removal.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `session` under its own id and marks it active.
    pub fn insert(&mut self, mut session: Session) -> Result<(), RegistryError> {
        match self.sessions.entry(session.id) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateIdentifier(session.id)),
            Entry::Vacant(slot) => {
                session.state = SessionState::Active;
                slot.insert(session);
                Ok(())
            }
        }
    }

    /// Removes the session if present. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        let mut session = self.sessions.remove(&id)?;
        session.state = SessionState::Closed;
        Some(session)
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions
            .get(&id)
            .filter(|session| session.state == SessionState::Active)
    }

    /// Active sessions matching `predicate`.
    ///
    /// The iterator borrows the registry, so nothing can insert or remove
    /// while it is being consumed.
    pub fn sessions_where<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Session> + 'a
    where
        P: Fn(&Session) -> bool + 'a,
    {
        self.sessions
            .values()
            .filter(|session| session.state == SessionState::Active)
            .filter(move |session| predicate(*session))
    }

    /// Ids of active sessions playing `role`, ascending.
    pub fn ids_with_role(&self, role: Role) -> Vec<SessionId> {
        let mut ids: Vec<_> = self
            .sessions_where(move |session| session.role == role)
            .map(Session::id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Empties the registry, handing back every session as closed.
    pub fn drain(&mut self) -> Vec<Session> {
        self.sessions
            .drain()
            .map(|(_, mut session)| {
                session.state = SessionState::Closed;
                session
            })
            .collect()
    }
}
