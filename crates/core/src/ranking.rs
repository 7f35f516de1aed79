//! Aggregation and ranking over an in-memory dish snapshot.
//!
//! Every function here is pure: the caller passes the full dish list, a
//! place lookup and the user-name cache, and gets derived views back.
//! Nothing is persisted; rankings are recomputed whenever the filter
//! changes.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use chrono::Datelike;
use serde::Serialize;

use crate::dining::{Dish, Place};
use crate::money::format_optional_pln;
use crate::names::UserNameCache;
use crate::normalize::{canonical_city_key, non_empty_filter, normalize_dish_type};
use crate::types::{DbId, UserId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of rows in every ranking.
pub const RANKING_LIMIT: usize = 10;

/// Label used when a dish references a place missing from the lookup.
pub const UNKNOWN_PLACE_LABEL: &str = "Unknown place";

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Calendar-year restriction on dish creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    /// Parse a query value: `all` (or empty) or a calendar year.
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value
            .parse::<i32>()
            .map(Self::Year)
            .map_err(|_| format!("year must be 'all' or a calendar year, got '{value}'"))
    }

    pub fn as_year(self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Year(y) => Some(y),
        }
    }

    fn matches(self, dish: &Dish) -> bool {
        match self {
            Self::All => true,
            Self::Year(y) => dish.created_at.year() == y,
        }
    }
}

/// The three user-selected filters, stored in their comparison forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingFilter {
    year: YearFilter,
    city_key: Option<String>,
    category: Option<String>,
}

impl RankingFilter {
    /// Build a filter. Empty city or category values mean "no filter".
    pub fn new(year: YearFilter, city: Option<&str>, category: Option<&str>) -> Self {
        Self {
            year,
            city_key: non_empty_filter(city).map(canonical_city_key),
            category: non_empty_filter(category).map(normalize_dish_type),
        }
    }

    pub fn year(&self) -> YearFilter {
        self.year
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn city_key(&self) -> Option<&str> {
        self.city_key.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// What a ranking row is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RankSubject {
    Place(DbId),
    Dish(DbId),
    Author(UserId),
}

/// One presentation-ready ranking row.
///
/// `right` is the primary metric as displayed and `extra` the secondary
/// one; `score` and `count` are the raw values the order was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankRow {
    pub subject: RankSubject,
    pub label: String,
    pub sub: Option<String>,
    pub right: String,
    pub extra: Option<String>,
    pub score: f64,
    pub count: usize,
}

/// All four rankings for one filter selection plus the selectable years.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rankings {
    pub top_places_in_category: Vec<RankRow>,
    pub top_dishes: Vec<RankRow>,
    pub value_for_money: Vec<RankRow>,
    pub top_authors: Vec<RankRow>,
    pub years: Vec<i32>,
    /// Distinct authors of the filtered dishes, in first-seen order.
    #[serde(skip)]
    pub authors: Vec<UserId>,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Select the dishes matching `filter`, preserving input order.
///
/// Cities match on the place's stored canonical key. A dish whose place
/// is missing from `places` never matches an active city filter.
pub fn filter_dishes<'a>(
    dishes: &'a [Dish],
    places: &HashMap<DbId, Place>,
    filter: &RankingFilter,
) -> Vec<&'a Dish> {
    dishes
        .iter()
        .filter(|d| filter.year.matches(d))
        .filter(|d| match filter.city_key() {
            None => true,
            Some(key) => places
                .get(&d.place_id)
                .is_some_and(|p| p.city_key == key),
        })
        .filter(|d| match filter.category() {
            None => true,
            Some(category) => d.dish_type == category,
        })
        .collect()
}

/// Distinct creation years across the whole collection, newest first.
pub fn available_years(dishes: &[Dish]) -> Vec<i32> {
    let years: BTreeSet<i32> = dishes.iter().map(|d| d.created_at.year()).collect();
    years.into_iter().rev().collect()
}

/// Initial year selection: the current year when it has data, else all.
pub fn default_year(years: &[i32], current_year: i32) -> YearFilter {
    if years.contains(&current_year) {
        YearFilter::Year(current_year)
    } else {
        YearFilter::All
    }
}

/// Distinct author ids of `dishes` in first-seen order.
pub fn distinct_authors(dishes: &[&Dish]) -> Vec<UserId> {
    let mut seen = std::collections::HashSet::new();
    dishes
        .iter()
        .map(|d| d.user_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Running sum and count for one group.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: f64,
    count: usize,
}

impl Tally {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Groups are only created by `add`, so `count` is never zero here.
    fn mean(self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Group values by key, keeping groups in first-seen order so that ties
/// resolve deterministically after a stable sort.
fn tally_by<K, I>(items: I) -> Vec<(K, Tally)>
where
    K: Copy + Eq + std::hash::Hash,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Tally)> = Vec::new();
    for (key, value) in items {
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, Tally::default()));
            groups.len() - 1
        });
        groups[slot].1.add(value);
    }
    groups
}

fn dish_count_label(count: usize) -> String {
    if count == 1 {
        "1 dish".to_string()
    } else {
        format!("{count} dishes")
    }
}

fn place_row(
    place_id: DbId,
    places: &HashMap<DbId, Place>,
    tally: Tally,
    right: String,
) -> RankRow {
    let place = places.get(&place_id);
    RankRow {
        subject: RankSubject::Place(place_id),
        label: place.map_or_else(|| UNKNOWN_PLACE_LABEL.to_string(), |p| p.name.clone()),
        sub: place.map(|p| p.city.clone()),
        right,
        extra: Some(dish_count_label(tally.count)),
        score: tally.mean(),
        count: tally.count,
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

// ---------------------------------------------------------------------------
// Ranking views
// ---------------------------------------------------------------------------

/// Best places for the selected category by average taste.
///
/// Empty when no category is selected. Ties on average taste go to the
/// place with more dishes.
pub fn top_places_in_category(
    dishes: &[&Dish],
    places: &HashMap<DbId, Place>,
    filter: &RankingFilter,
) -> Vec<RankRow> {
    let Some(category) = filter.category() else {
        return Vec::new();
    };

    let groups = tally_by(
        dishes
            .iter()
            .filter(|d| d.dish_type == category)
            .map(|d| (d.place_id, f64::from(d.ratings.taste))),
    );

    let mut rows: Vec<RankRow> = groups
        .into_iter()
        .map(|(place_id, tally)| {
            place_row(place_id, places, tally, format!("{:.2} / 10", tally.mean()))
        })
        .collect();

    rows.sort_by(|a, b| desc(a.score, b.score).then_with(|| b.count.cmp(&a.count)));
    rows.truncate(RANKING_LIMIT);
    rows
}

/// Individual dishes by taste score.
///
/// Equal taste is ordered by price ascending (unknown price last), then by
/// creation time, then by input order.
pub fn top_dishes_by_taste(dishes: &[&Dish], places: &HashMap<DbId, Place>) -> Vec<RankRow> {
    let mut ranked: Vec<&Dish> = dishes.to_vec();
    ranked.sort_by(|a, b| {
        b.ratings
            .taste
            .cmp(&a.ratings.taste)
            .then_with(|| match (a.ratings.price, b.ratings.price) {
                (Some(pa), Some(pb)) => pa.total_cmp(&pb),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    ranked.truncate(RANKING_LIMIT);

    ranked
        .into_iter()
        .map(|d| {
            let place = places.get(&d.place_id);
            let place_name = place.map_or(UNKNOWN_PLACE_LABEL, |p| p.name.as_str());
            let city = place.map_or("", |p| p.city.as_str());
            let taste = f64::from(d.ratings.taste);
            RankRow {
                subject: RankSubject::Dish(d.id),
                label: d.dish_name.clone(),
                sub: Some(format!("{place_name} • {city} • {}", d.dish_type)),
                right: format!("{taste:.2} / 10"),
                extra: Some(format_optional_pln(d.ratings.price)),
                score: taste,
                count: 1,
            }
        })
        .collect()
}

/// `(taste + portion) / price` for dishes with a strictly positive price.
pub fn value_score(dish: &Dish) -> Option<f64> {
    let price = dish.ratings.price.filter(|p| *p > 0.0)?;
    Some(f64::from(dish.ratings.taste + dish.ratings.portion) / price)
}

/// Places by average value-for-money score. Dishes without a known,
/// positive price do not contribute.
pub fn value_for_money(dishes: &[&Dish], places: &HashMap<DbId, Place>) -> Vec<RankRow> {
    let groups = tally_by(
        dishes
            .iter()
            .filter_map(|d| value_score(d).map(|score| (d.place_id, score))),
    );

    let mut rows: Vec<RankRow> = groups
        .into_iter()
        .map(|(place_id, tally)| place_row(place_id, places, tally, format!("{:.3}", tally.mean())))
        .collect();

    rows.sort_by(|a, b| desc(a.score, b.score));
    rows.truncate(RANKING_LIMIT);
    rows
}

/// Authors by number of dishes, ties broken by average taste.
///
/// `count` is the primary key of the order and `score` the average taste.
pub fn most_active_authors(dishes: &[&Dish], names: &UserNameCache) -> Vec<RankRow> {
    let groups = tally_by(dishes.iter().map(|d| (d.user_id, f64::from(d.ratings.taste))));

    let mut ranked: Vec<(UserId, Tally)> = groups;
    ranked.sort_by(|(_, a), (_, b)| {
        b.count
            .cmp(&a.count)
            .then_with(|| desc(a.mean(), b.mean()))
    });
    ranked.truncate(RANKING_LIMIT);

    ranked
        .into_iter()
        .map(|(user_id, tally)| RankRow {
            subject: RankSubject::Author(user_id),
            label: names.label_for(&user_id),
            sub: None,
            right: dish_count_label(tally.count),
            extra: Some(format!("avg taste {:.2}", tally.mean())),
            score: tally.mean(),
            count: tally.count,
        })
        .collect()
}

/// Refresh author labels after more names have been resolved.
pub fn relabel_authors(rows: &mut [RankRow], names: &UserNameCache) {
    for row in rows {
        if let RankSubject::Author(id) = row.subject {
            row.label = names.label_for(&id);
        }
    }
}

/// Run the filter stage once and build every view from it.
pub fn compute_rankings(
    dishes: &[Dish],
    places: &HashMap<DbId, Place>,
    names: &UserNameCache,
    filter: &RankingFilter,
) -> Rankings {
    let filtered = filter_dishes(dishes, places, filter);
    Rankings {
        top_places_in_category: top_places_in_category(&filtered, places, filter),
        top_dishes: top_dishes_by_taste(&filtered, places),
        value_for_money: value_for_money(&filtered, places),
        top_authors: most_active_authors(&filtered, names),
        years: available_years(dishes),
        authors: distinct_authors(&filtered),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
