//! User CRUD and the degrees-of-separation query.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::error::ServiceError;
use crate::graph;
use crate::model::{Deleted, NewUser, Separation, User, UserId, UserList, UserUpdate};
use crate::store::UserStore;

/// Domain rules on top of a [`UserStore`].
///
/// All operations take the same lock for their whole duration, so a create
/// cannot observe a half-finished update and two creates never receive the
/// same id.
#[derive(Debug, Default)]
pub struct UserService {
    store: Mutex<UserStore>,
}

impl UserService {
    pub fn new(store: UserStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    fn store(&self) -> MutexGuard<'_, UserStore> {
        // Every write is a single map operation made after validation, so a
        // panicking holder cannot leave the store half-updated.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_users(&self) -> UserList {
        info!("fetching all users");
        UserList {
            users: self.store().list(),
        }
    }

    pub fn get_user(&self, id: UserId) -> Result<User, ServiceError> {
        info!(user_id = id, "fetching user");
        self.store()
            .get(id)
            .cloned()
            .ok_or(ServiceError::NotFound { id })
    }

    pub fn create_user(&self, data: Option<NewUser>) -> Result<User, ServiceError> {
        let data = data.ok_or(ServiceError::NullArgument { name: "data" })?;
        let friends = data.friends.unwrap_or_default();

        let mut store = self.store();
        verify_friends(&store, &friends)?;

        let user_id = store.next_id().ok_or(ServiceError::IdsExhausted)?;
        let user = store.insert(User::new(user_id, friends));
        info!(user_id, friends = ?user.friends, "created user");
        Ok(user)
    }

    /// Replaces the friend list of an existing user.
    pub fn update_user(&self, data: Option<UserUpdate>) -> Result<User, ServiceError> {
        let data = data.ok_or(ServiceError::NullArgument { name: "data" })?;
        let id = data.user_id;
        info!(user_id = id, "updating user");

        let mut store = self.store();
        let existing = match store.get(id) {
            Some(user) if id != 0 => user.clone(),
            _ => return Err(ServiceError::NotFound { id }),
        };

        let friends = data.friends.unwrap_or_default();
        verify_friends(&store, &friends)?;

        let updated = User { friends, ..existing };
        let previous = store.replace(id, updated.clone());
        debug_assert!(previous.is_some(), "user {id} vanished while locked");
        info!(user_id = id, friends = ?updated.friends, "updated user");
        Ok(updated)
    }

    pub fn delete_user(&self, id: UserId) -> Result<Deleted, ServiceError> {
        info!(user_id = id, "deleting user");
        self.store()
            .delete(id)
            .map(|_| Deleted { result: true })
            .ok_or(ServiceError::NotFound { id })
    }

    /// Number of friendship hops from `user_one` to `user_two`.
    ///
    /// `user_one` is checked for existence before `user_two`.
    pub fn degrees_of_separation(
        &self,
        user_one: UserId,
        user_two: UserId,
    ) -> Result<Separation, ServiceError> {
        info!(user_one, user_two, "computing degrees of separation");

        let store = self.store();
        for id in [user_one, user_two] {
            if !store.contains(id) {
                return Err(ServiceError::NotFound { id });
            }
        }

        let degrees_separated = graph::degrees_of_separation(&store, user_one, user_two)
            .ok_or(ServiceError::NotConnected {
                from: user_one,
                to: user_two,
            })?;
        info!(user_one, user_two, degrees_separated, "found path");

        Ok(Separation {
            user_one,
            user_two,
            degrees_separated,
        })
    }
}

/// Fails on the first friend id that is not stored, in list order.
fn verify_friends(store: &UserStore, friends: &[UserId]) -> Result<(), ServiceError> {
    match friends.iter().find(|id| !store.contains(**id)) {
        Some(&id) => {
            warn!(friend_id = id, "rejecting unknown friend");
            Err(ServiceError::Validation { id })
        }
        None => Ok(()),
    }
}
