//! Per-user yearly statistics shown on the profile page.
//!
//! Like the rankings these are derived from a snapshot: the user's dishes
//! and a place-to-city lookup.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Datelike;
use serde::Serialize;

use crate::dining::Dish;
use crate::money::{format_optional_pln, format_pln};
use crate::ranking::available_years;
use crate::types::DbId;

/// Number of categories and cities listed in the breakdowns.
pub const TOP_BREAKDOWN_LEN: usize = 3;

/// A label with its dish count and share of the year's dishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountShare {
    pub label: String,
    pub count: usize,
    /// Rounded percentage of the year's dishes.
    pub percent: u32,
}

/// Spend in one calendar month, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpend {
    pub month: String,
    pub total: f64,
    pub total_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub year: i32,
    pub years: Vec<i32>,
    pub unique_places: usize,
    pub total_dishes: usize,
    pub total_spend: f64,
    pub total_spend_label: String,
    /// Mean over dishes with a known price only.
    pub average_price: Option<f64>,
    pub average_price_label: String,
    pub average_taste: Option<f64>,
    pub top_categories: Vec<CountShare>,
    pub top_cities: Vec<CountShare>,
    pub monthly_spend: Vec<MonthlySpend>,
}

/// Year shown first: the current one if it has data, else the most recent
/// year with data, else the current year.
pub fn stats_default_year(years: &[i32], current_year: i32) -> i32 {
    if years.contains(&current_year) {
        current_year
    } else {
        years.first().copied().unwrap_or(current_year)
    }
}

fn breakdown<'a, I>(labels: I, total: usize) -> Vec<CountShare>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut rows: Vec<CountShare> = counts
        .into_iter()
        .map(|(label, count)| CountShare {
            label: label.to_string(),
            count,
            percent: percent_of(count, total),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    rows.truncate(TOP_BREAKDOWN_LEN);
    rows
}

fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Compute statistics for `year` over one user's dishes.
///
/// `city_by_place` maps place ids to display city names; dishes whose place
/// is unknown are left out of the city breakdown only.
pub fn compute_user_stats(
    dishes: &[Dish],
    city_by_place: &HashMap<DbId, String>,
    year: i32,
) -> UserStats {
    let years = available_years(dishes);
    let selected: Vec<&Dish> = dishes
        .iter()
        .filter(|d| d.created_at.year() == year)
        .collect();

    let total_dishes = selected.len();
    let unique_places = selected
        .iter()
        .map(|d| d.place_id)
        .collect::<HashSet<_>>()
        .len();

    let prices: Vec<f64> = selected.iter().filter_map(|d| d.ratings.price).collect();
    let total_spend: f64 = prices.iter().sum();
    let average_price = (!prices.is_empty()).then(|| total_spend / prices.len() as f64);

    let average_taste = (total_dishes > 0).then(|| {
        selected
            .iter()
            .map(|d| f64::from(d.ratings.taste))
            .sum::<f64>()
            / total_dishes as f64
    });

    let top_categories = breakdown(selected.iter().map(|d| d.dish_type.as_str()), total_dishes);
    let top_cities = breakdown(
        selected
            .iter()
            .filter_map(|d| city_by_place.get(&d.place_id).map(String::as_str)),
        total_dishes,
    );

    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    for d in &selected {
        let key = format!("{}-{:02}", d.created_at.year(), d.created_at.month());
        *monthly.entry(key).or_default() += d.ratings.price.unwrap_or(0.0);
    }
    let monthly_spend = monthly
        .into_iter()
        .map(|(month, total)| MonthlySpend {
            month,
            total,
            total_label: format_pln(total),
        })
        .collect();

    UserStats {
        year,
        years,
        unique_places,
        total_dishes,
        total_spend,
        total_spend_label: format_pln(total_spend),
        average_price,
        average_price_label: format_optional_pln(average_price),
        average_taste,
        top_categories,
        top_cities,
        monthly_spend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dining::Ratings;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn dish(id: DbId, place_id: DbId, dish_type: &str, taste: i32, price: Option<f64>, ym: (i32, u32)) -> Dish {
        Dish {
            id,
            place_id,
            user_id: Uuid::from_u128(1),
            author_name: "Ala".to_string(),
            dish_name: format!("dish-{id}"),
            dish_type: dish_type.to_string(),
            ratings: Ratings {
                taste,
                portion: 3,
                service: 3,
                ambience: 3,
                queue: 0,
                price,
            },
            notes: None,
            photos: Vec::new(),
            created_at: Utc.with_ymd_and_hms(ym.0, ym.1, 10, 12, 0, 0).unwrap(),
        }
    }

    fn cities() -> HashMap<DbId, String> {
        HashMap::from([(1, "Gdańsk".to_string()), (2, "Kraków".to_string())])
    }

    #[test]
    fn default_year_falls_back_to_latest() {
        assert_eq!(stats_default_year(&[2024, 2023], 2024), 2024);
        assert_eq!(stats_default_year(&[2023, 2021], 2025), 2023);
        assert_eq!(stats_default_year(&[], 2025), 2025);
    }

    #[test]
    fn summary_counts_only_selected_year() {
        let ds = vec![
            dish(1, 1, "pizza", 8, Some(20.0), (2024, 3)),
            dish(2, 1, "pizza", 6, None, (2024, 3)),
            dish(3, 2, "pierogi", 10, Some(30.0), (2024, 5)),
            dish(4, 2, "sushi", 2, Some(100.0), (2023, 1)),
        ];
        let s = compute_user_stats(&ds, &cities(), 2024);

        assert_eq!(s.years, vec![2024, 2023]);
        assert_eq!(s.total_dishes, 3);
        assert_eq!(s.unique_places, 2);
        assert!((s.total_spend - 50.0).abs() < 1e-9);
        assert_eq!(s.average_price, Some(25.0));
        assert_eq!(s.average_price_label, "25,00\u{a0}zł");
        assert_eq!(s.average_taste, Some(8.0));
    }

    #[test]
    fn breakdowns_are_sorted_and_capped() {
        let ds = vec![
            dish(1, 1, "pizza", 8, None, (2024, 1)),
            dish(2, 1, "pizza", 8, None, (2024, 1)),
            dish(3, 2, "sushi", 8, None, (2024, 1)),
            dish(4, 2, "ramen", 8, None, (2024, 1)),
            dish(5, 9, "burger", 8, None, (2024, 1)),
        ];
        let s = compute_user_stats(&ds, &cities(), 2024);

        let labels: Vec<&str> = s.top_categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["pizza", "burger", "ramen"]);
        assert_eq!(s.top_categories[0].percent, 40);

        // Place 9 has no known city.
        assert_eq!(s.top_cities.len(), 2);
        assert_eq!(s.top_cities[0].count, 2);
    }

    #[test]
    fn monthly_spend_is_ascending_and_treats_unknown_as_zero() {
        let ds = vec![
            dish(1, 1, "pizza", 8, Some(12.5), (2024, 11)),
            dish(2, 1, "pizza", 8, None, (2024, 2)),
            dish(3, 1, "pizza", 8, Some(7.5), (2024, 11)),
        ];
        let s = compute_user_stats(&ds, &cities(), 2024);
        let months: Vec<(&str, f64)> = s
            .monthly_spend
            .iter()
            .map(|m| (m.month.as_str(), m.total))
            .collect();
        assert_eq!(months, vec![("2024-02", 0.0), ("2024-11", 20.0)]);
    }

    #[test]
    fn empty_year_has_no_averages() {
        let ds = vec![dish(1, 1, "pizza", 8, Some(10.0), (2022, 1))];
        let s = compute_user_stats(&ds, &cities(), 2024);
        assert_eq!(s.total_dishes, 0);
        assert_eq!(s.average_price, None);
        assert_eq!(s.average_price_label, crate::money::PRICE_PLACEHOLDER);
        assert_eq!(s.average_taste, None);
        assert!(s.top_categories.is_empty());
        assert!(s.monthly_spend.is_empty());
    }
}
