//! Lazy resolution of author display names into the shared cache.

use futures::future::join_all;
use platebook_core::names::UserNameCache;
use platebook_core::types::UserId;
use platebook_db::store::DiningStore;
use tokio::sync::RwLock;

/// Fetch the profiles of every id in `ids` not cached yet, one request per
/// id, all in flight at once. Returns the number of names added.
///
/// Failed or empty lookups are logged and leave the id uncached, so the
/// next ranking request tries again.
pub async fn resolve_missing_names(
    store: &dyn DiningStore,
    names: &RwLock<UserNameCache>,
    ids: &[UserId],
) -> usize {
    let missing = names.read().await.missing(ids);
    if missing.is_empty() {
        return 0;
    }

    let lookups = missing.iter().map(|id| async move { (*id, store.get_user(*id).await) });
    let results = join_all(lookups).await;

    let mut cache = names.write().await;
    let mut added = 0;
    for (id, result) in results {
        match result {
            Ok(Some(profile)) => {
                if cache.insert(id, profile.display_name) {
                    added += 1;
                }
            }
            Ok(None) => {
                tracing::debug!(user_id = %id, "No profile for author");
            }
            Err(err) => {
                tracing::warn!(user_id = %id, error = %err, "Author name lookup failed");
            }
        }
    }

    tracing::debug!(requested = missing.len(), added, "Resolved author names");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use platebook_core::dining::UserProfile;
    use platebook_db::store::MemoryStore;
    use uuid::Uuid;

    fn profile(n: u128, name: &str) -> UserProfile {
        UserProfile {
            id: Uuid::from_u128(n),
            display_name: name.to_string(),
            friend_code: format!("CODE{n:04}"),
            friends: Vec::new(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn known_profiles_are_cached_and_unknown_ids_stay_missing() {
        let store = MemoryStore::new();
        store.insert_user(profile(1, "Ala")).await;
        let names = RwLock::new(UserNameCache::new());

        let ids = [Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(1)];
        let added = resolve_missing_names(&store, &names, &ids).await;

        assert_eq!(added, 1);
        let cache = names.read().await;
        assert_eq!(cache.get(&Uuid::from_u128(1)), Some("Ala"));
        assert!(!cache.contains(&Uuid::from_u128(2)));
    }

    #[tokio::test]
    async fn cached_names_are_not_refetched() {
        let store = MemoryStore::new();
        store.insert_user(profile(1, "Renamed")).await;
        let names = RwLock::new(UserNameCache::new());
        names.write().await.insert(Uuid::from_u128(1), "Ala");

        let added = resolve_missing_names(&store, &names, &[Uuid::from_u128(1)]).await;

        assert_eq!(added, 0);
        assert_eq!(names.read().await.get(&Uuid::from_u128(1)), Some("Ala"));
    }
}
