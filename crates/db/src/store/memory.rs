//! In-process [`DiningStore`] for tests and database-less local runs.
//!
//! Mirrors the Postgres behaviour: normalized inputs, place existence
//! checked on dish creation, the same list orderings.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use platebook_core::dining::{generate_friend_code, Dish, Place, UserProfile};
use platebook_core::normalize::canonical_city_key;
use platebook_core::types::{DbId, UserId};
use tokio::sync::RwLock;

use super::{DiningStore, StoreError, StoreResult, FRIEND_CODE_ATTEMPTS};
use crate::models::dish::{CreateDish, UpdateDish};
use crate::models::place::CreatePlace;

#[derive(Debug, Default)]
struct Inner {
    next_place_id: DbId,
    next_dish_id: DbId,
    places: BTreeMap<DbId, Place>,
    dishes: BTreeMap<DbId, Dish>,
    users: HashMap<UserId, UserProfile>,
}

impl Inner {
    fn allocate_place_id(&mut self) -> DbId {
        self.next_place_id = self.next_place_id.max(self.places.keys().max().copied().unwrap_or(0)) + 1;
        self.next_place_id
    }

    fn allocate_dish_id(&mut self) -> DbId {
        self.next_dish_id = self.next_dish_id.max(self.dishes.keys().max().copied().unwrap_or(0)) + 1;
        self.next_dish_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a place as-is, keeping its id and timestamps.
    pub async fn insert_place(&self, place: Place) {
        self.inner.write().await.places.insert(place.id, place);
    }

    /// Seed a dish as-is, keeping its id and timestamps.
    pub async fn insert_dish(&self, dish: Dish) {
        self.inner.write().await.dishes.insert(dish.id, dish);
    }

    /// Seed a user profile.
    pub async fn insert_user(&self, user: UserProfile) {
        self.inner.write().await.users.insert(user.id, user);
    }
}

fn oldest_first(mut dishes: Vec<Dish>) -> Vec<Dish> {
    dishes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    dishes
}

#[async_trait]
impl DiningStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_place(&self, created_by: UserId, input: &CreatePlace) -> StoreResult<Place> {
        let input = input.normalized();
        let mut inner = self.inner.write().await;
        let id = inner.allocate_place_id();
        let place = Place {
            id,
            city_key: input.city_key(),
            name: input.name,
            city: input.city,
            maps_url: input.maps_url,
            created_by,
            visited_by: vec![created_by],
            created_at: Utc::now(),
        };
        inner.places.insert(id, place.clone());
        Ok(place)
    }

    async fn get_place(&self, id: DbId) -> StoreResult<Option<Place>> {
        Ok(self.inner.read().await.places.get(&id).cloned())
    }

    async fn list_places_by_city(&self, city: &str) -> StoreResult<Vec<Place>> {
        let key = canonical_city_key(city);
        let mut places: Vec<Place> = self
            .inner
            .read()
            .await
            .places
            .values()
            .filter(|p| p.city_key == key)
            .cloned()
            .collect();
        places.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(places)
    }

    async fn list_all_places_map(&self) -> StoreResult<HashMap<DbId, Place>> {
        let inner = self.inner.read().await;
        Ok(inner.places.iter().map(|(id, p)| (*id, p.clone())).collect())
    }

    async fn update_place_maps_url(
        &self,
        id: DbId,
        maps_url: Option<&str>,
    ) -> StoreResult<Option<Place>> {
        let mut inner = self.inner.write().await;
        Ok(inner.places.get_mut(&id).map(|p| {
            p.maps_url = maps_url.map(str::to_string);
            p.clone()
        }))
    }

    async fn mark_visited(&self, id: DbId, user_id: UserId) -> StoreResult<Option<Place>> {
        let mut inner = self.inner.write().await;
        Ok(inner.places.get_mut(&id).map(|p| {
            if !p.visited_by.contains(&user_id) {
                p.visited_by.push(user_id);
            }
            p.clone()
        }))
    }

    async fn list_cities(&self) -> StoreResult<Vec<String>> {
        let inner = self.inner.read().await;
        let mut earliest: Vec<&Place> = inner.places.values().collect();
        earliest.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let mut seen = HashSet::new();
        let mut cities: Vec<String> = earliest
            .into_iter()
            .filter(|p| seen.insert(p.city_key.clone()))
            .map(|p| p.city.clone())
            .collect();
        cities.sort();
        Ok(cities)
    }

    async fn create_dish(
        &self,
        place_id: DbId,
        author: UserId,
        author_name: &str,
        input: &CreateDish,
    ) -> StoreResult<Dish> {
        let input = input.normalized();
        let mut inner = self.inner.write().await;
        if !inner.places.contains_key(&place_id) {
            return Err(StoreError::PlaceNotFound(place_id));
        }
        let id = inner.allocate_dish_id();
        let dish = Dish {
            id,
            place_id,
            user_id: author,
            author_name: author_name.to_string(),
            dish_name: input.dish_name,
            dish_type: input.dish_type,
            ratings: input.ratings,
            notes: input.notes,
            photos: input.photos,
            created_at: Utc::now(),
        };
        inner.dishes.insert(id, dish.clone());
        Ok(dish)
    }

    async fn get_dish(&self, id: DbId) -> StoreResult<Option<Dish>> {
        Ok(self.inner.read().await.dishes.get(&id).cloned())
    }

    async fn list_dishes_by_place(&self, place_id: DbId) -> StoreResult<Vec<Dish>> {
        let inner = self.inner.read().await;
        let mut dishes = oldest_first(
            inner
                .dishes
                .values()
                .filter(|d| d.place_id == place_id)
                .cloned()
                .collect(),
        );
        dishes.reverse();
        Ok(dishes)
    }

    async fn list_dishes_by_user(&self, user_id: UserId) -> StoreResult<Vec<Dish>> {
        let inner = self.inner.read().await;
        Ok(oldest_first(
            inner
                .dishes
                .values()
                .filter(|d| d.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all_dishes(&self) -> StoreResult<Vec<Dish>> {
        let inner = self.inner.read().await;
        Ok(oldest_first(inner.dishes.values().cloned().collect()))
    }

    async fn update_dish(&self, id: DbId, input: &UpdateDish) -> StoreResult<Option<Dish>> {
        let input = input.normalized();
        let mut inner = self.inner.write().await;
        Ok(inner.dishes.get_mut(&id).map(|d| {
            input.apply_to(d);
            d.clone()
        }))
    }

    async fn delete_dish(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.inner.write().await.dishes.remove(&id).is_some())
    }

    async fn list_dish_types(&self) -> StoreResult<Vec<String>> {
        let inner = self.inner.read().await;
        let types: std::collections::BTreeSet<String> =
            inner.dishes.values().map(|d| d.dish_type.clone()).collect();
        Ok(types.into_iter().collect())
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<UserProfile>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn ensure_user(&self, id: UserId, display_name: &str) -> StoreResult<UserProfile> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.users.get(&id) {
            return Ok(existing.clone());
        }

        let taken: HashSet<&str> = inner.users.values().map(|u| u.friend_code.as_str()).collect();
        let code = (0..FRIEND_CODE_ATTEMPTS)
            .map(|_| generate_friend_code())
            .find(|c| !taken.contains(c.as_str()))
            .ok_or(StoreError::FriendCodeExhausted)?;

        let profile = UserProfile {
            id,
            display_name: display_name.to_string(),
            friend_code: code,
            friends: Vec::new(),
            avatar_url: None,
        };
        inner.users.insert(id, profile.clone());
        Ok(profile)
    }
}
