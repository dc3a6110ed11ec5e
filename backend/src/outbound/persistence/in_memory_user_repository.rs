//! In-memory `UserRepository` adapter.
//!
//! All records live behind one `RwLock`. Mutations take the write lock and
//! re-check email uniqueness before touching the map, so two racing writers
//! can never both claim one address. Ids come from a counter that only moves
//! forward; deleted ids are never handed out again.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserPatch};

const FIRST_ID: u64 = 1;

#[derive(Debug)]
struct UserStore {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: FIRST_ID,
        }
    }
}

impl UserStore {
    /// Map an id onto its storage key. Only canonical decimal ids match, so
    /// `"01"` and `"+1"` are unknown rather than aliases of `"1"`.
    fn key_for(id: &UserId) -> Option<u64> {
        let raw = id.as_ref();
        raw.parse::<u64>()
            .ok()
            .filter(|seq| seq.to_string() == raw)
    }

    fn email_holder(&self, email: &EmailAddress) -> Option<&User> {
        self.users.values().find(|user| user.email() == email)
    }
}

/// Process-local user storage.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use users_backend::outbound::persistence::InMemoryUserRepository;
///
/// let repo = InMemoryUserRepository::new(Arc::new(DefaultClock));
/// assert!(repo.is_empty());
/// ```
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<UserStore>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(RwLock::new(UserStore::default())),
            clock,
        }
    }

    /// Number of stored users. A poisoned lock reads as empty.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().map_or(0, |store| store.users.len())
    }

    /// Whether no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every record and restart id assignment at `"1"`.
    pub fn clear(&self) {
        match self.store.write() {
            Ok(mut store) => *store = UserStore::default(),
            Err(poisoned) => {
                warn!("user store lock poisoned; resetting");
                let mut store = poisoned.into_inner();
                *store = UserStore::default();
                self.store.clear_poison();
            }
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UserStore>, UserPersistenceError> {
        self.store
            .read()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, UserStore>, UserPersistenceError> {
        self.store
            .write()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let store = self.read()?;
        Ok(UserStore::key_for(id).and_then(|key| store.users.get(&key).cloned()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let store = self.read()?;
        Ok(store.email_holder(email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError> {
        let mut store = self.write()?;
        if store.email_holder(&new_user.email).is_some() {
            return Err(UserPersistenceError::duplicate_email(new_user.email));
        }

        let key = store.next_id;
        store.next_id += 1;
        let user = User::new(UserId::from(key), new_user, self.clock.utc());
        store.users.insert(key, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut store = self.write()?;
        let Some(key) = UserStore::key_for(id).filter(|key| store.users.contains_key(key)) else {
            return Ok(None);
        };

        if let Some(email) = patch.email.as_ref() {
            let taken = store
                .email_holder(email)
                .is_some_and(|holder| holder.id() != id);
            if taken {
                return Err(UserPersistenceError::duplicate_email(email.clone()));
            }
        }

        Ok(store.users.get_mut(&key).map(|user| {
            user.apply(patch);
            user.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut store = self.write()?;
        Ok(UserStore::key_for(id)
            .and_then(|key| store.users.remove(&key))
            .is_some())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let store = self.read()?;
        Ok(store.users.values().cloned().collect())
    }
}
