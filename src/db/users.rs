use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::RwLock;

use chrono::Utc;

use crate::models::user::User;

#[derive(Debug, PartialEq, Eq)]
pub enum UserStoreError {
    Duplicate,
}

impl fmt::Display for UserStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStoreError::Duplicate => write!(f, "User already exists"),
        }
    }
}

impl Error for UserStoreError {}

/// Lookup/insert interface over the user records. Handlers depend on this
/// trait, not on the backing store.
pub trait UserRepository: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<User>;
    fn insert(&self, user: User) -> Result<(), UserStoreError>;
    fn record_signin(&self, email: &str, success: bool);
}

pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Store seeded with the demo traveler account.
    pub fn with_demo_account() -> Self {
        let store = Self::new();
        let hashed = bcrypt::hash("trip123", bcrypt::DEFAULT_COST).unwrap_or_default();
        let demo = User {
            email: "traveler@example.com".to_string(),
            password: hashed,
            name: "Traveler".to_string(),
            last_signin: None,
            failed_signins: 0,
            created_at: Utc::now(),
        };
        store
            .insert(demo)
            .expect("demo account insert into empty store");
        store
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.read().expect("user store lock");
        users.get(email).cloned()
    }

    fn insert(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().expect("user store lock");
        if users.contains_key(&user.email) {
            return Err(UserStoreError::Duplicate);
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    fn record_signin(&self, email: &str, success: bool) {
        let mut users = self.users.write().expect("user store lock");
        if let Some(user) = users.get_mut(email) {
            if success {
                user.last_signin = Some(Utc::now());
                user.failed_signins = 0;
            } else {
                user.failed_signins += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            email: email.to_string(),
            password: "hashed".to_string(),
            name: "Test".to_string(),
            last_signin: None,
            failed_signins: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@b.com")).unwrap();

        let found = store.find_by_email("a@b.com").unwrap();
        assert_eq!(found.name, "Test");
        assert!(store.find_by_email("missing@b.com").is_none());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@b.com")).unwrap();
        assert_eq!(store.insert(user("a@b.com")), Err(UserStoreError::Duplicate));
    }

    #[test]
    fn test_record_signin_updates_counters() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@b.com")).unwrap();

        store.record_signin("a@b.com", false);
        store.record_signin("a@b.com", false);
        assert_eq!(store.find_by_email("a@b.com").unwrap().failed_signins, 2);

        store.record_signin("a@b.com", true);
        let refreshed = store.find_by_email("a@b.com").unwrap();
        assert_eq!(refreshed.failed_signins, 0);
        assert!(refreshed.last_signin.is_some());
    }

    #[test]
    fn test_demo_account_seeded() {
        let store = InMemoryUserStore::with_demo_account();
        let demo = store.find_by_email("traveler@example.com").unwrap();
        assert_eq!(demo.name, "Traveler");
        assert!(bcrypt::verify("trip123", &demo.password).unwrap());
    }
}
