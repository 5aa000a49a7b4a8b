//! Guest identity resolution trait and in-memory implementation.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::EntityId;

use crate::error::BookingError;

/// Trait for resolving opaque guest references to guest-profile ids.
///
/// A reference may be a guest-profile id, or a user id that owns a guest
/// profile. Anything else does not resolve.
#[async_trait]
pub trait GuestDirectory: Send + Sync {
    /// Resolves a reference to a canonical guest-profile id.
    ///
    /// Returns None when the reference names neither a profile nor a user
    /// owning one.
    async fn resolve(&self, reference: EntityId) -> Result<Option<EntityId>, BookingError>;
}

#[derive(Debug, Default)]
struct InMemoryGuestState {
    profiles: HashSet<EntityId>,
    /// User account -> guest profile it owns, None for profile-less users.
    users: HashMap<EntityId, Option<EntityId>>,
}

/// In-memory guest directory for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGuestDirectory {
    state: Arc<RwLock<InMemoryGuestState>>,
}

impl InMemoryGuestDirectory {
    /// Creates a new empty guest directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a guest profile and returns its id.
    pub fn register_profile(&self) -> EntityId {
        let profile_id = EntityId::new();
        self.state.write().unwrap().profiles.insert(profile_id);
        profile_id
    }

    /// Registers a user account owning a fresh guest profile; returns the
    /// profile id.
    pub fn register_user(&self, user_id: EntityId) -> EntityId {
        let profile_id = self.register_profile();
        self.state
            .write()
            .unwrap()
            .users
            .insert(user_id, Some(profile_id));
        profile_id
    }

    /// Registers a user account that owns no guest profile.
    ///
    /// Such users exist in the directory but cannot book a stay.
    pub fn register_user_without_profile(&self, user_id: EntityId) {
        self.state.write().unwrap().users.insert(user_id, None);
    }
}

#[async_trait]
impl GuestDirectory for InMemoryGuestDirectory {
    async fn resolve(&self, reference: EntityId) -> Result<Option<EntityId>, BookingError> {
        let state = self.state.read().unwrap();

        if state.profiles.contains(&reference) {
            return Ok(Some(reference));
        }

        Ok(state.users.get(&reference).copied().flatten())
    }
}
