//! In-memory table of user records.
//!
//! The store is a plain data structure with no locking of its own; the
//! [`UserService`](crate::service::UserService) owns it behind a mutex so that
//! multi-step operations (validate, allocate an id, insert) happen atomically.

use std::collections::BTreeMap;
use std::io::Read;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::model::{User, UserId};

/// Authoritative set of users keyed by id.
///
/// # Why BTreeMap instead of HashMap?
///
/// `GET /user` returns every record, and ascending-id output keeps responses
/// stable between calls and easy to assert on in tests.
#[derive(Debug, Default)]
pub struct UserStore {
    users: BTreeMap<UserId, User>,
    /// Largest id ever inserted. Only grows, so deleted ids are never reissued.
    high_water: UserId,
}

/// Shape of a seed file: the same document `GET /user` returns.
#[derive(Deserialize)]
struct SeedFile {
    users: Vec<User>,
}

impl UserStore {
    /// Creates an empty store whose first allocated id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// The three-user fixture the server starts with unless told otherwise:
    /// `1 -> [2, 3]`, `2 -> [3]`, `3 -> []`.
    pub fn demo() -> Self {
        let mut store = Self::new();
        store.insert(User::new(1, vec![2, 3]));
        store.insert(User::new(2, vec![3]));
        store.insert(User::new(3, vec![]));
        store
    }

    /// Builds a store from existing records, rejecting id 0 and repeated ids.
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Result<Self> {
        let mut store = Self::new();
        for user in users {
            if user.user_id == 0 {
                bail!("user id 0 in seed data; ids start at 1");
            }
            if store.contains(user.user_id) {
                bail!("duplicate user id {} in seed data", user.user_id);
            }
            store.insert(user);
        }
        Ok(store)
    }

    /// Reads a `{"users": [...]}` JSON document.
    ///
    /// Friend ids are not cross-checked: a seed may describe dangling edges,
    /// which the search treats as dead ends.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let seed: SeedFile =
            serde_json::from_reader(reader).context("failed to parse seed document")?;
        Self::from_users(seed.users)
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// Snapshot of every record in ascending id order.
    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Stores a record under its own id, overwriting any previous record, and
    /// returns a copy of what was stored.
    pub fn insert(&mut self, user: User) -> User {
        self.high_water = self.high_water.max(user.user_id);
        self.users.insert(user.user_id, user.clone());
        user
    }

    /// Overwrites an existing record in place.
    ///
    /// Returns the previous record, or `None` without inserting anything when
    /// `id` is absent.
    pub fn replace(&mut self, id: UserId, user: User) -> Option<User> {
        let slot = self.users.get_mut(&id)?;
        Some(std::mem::replace(slot, user))
    }

    /// Removes a record, returning it if it existed.
    pub fn delete(&mut self, id: UserId) -> Option<User> {
        self.users.remove(&id)
    }

    /// Id the next created user should receive, or `None` once `UserId::MAX`
    /// has been handed out.
    pub fn next_id(&self) -> Option<UserId> {
        self.high_water.checked_add(1)
    }
}
