use crate::core::preferences::conflicts;
use crate::core::{Dish, PreferenceSet};

/// Indian dishes and the conditions they suit.
const DISHES: &[(&str, &[&str])] = &[
    ("Moong Dal Chilla", &["Diabetes", "Heart Disease"]),
    ("Oats Upma", &["Diabetes", "Hypertension"]),
    ("Palak (Spinach) Sabzi", &["Heart Disease", "Hypertension"]),
    ("Chana Salad", &["Diabetes", "Heart Disease"]),
    ("Dahi (Curd)", &["Diabetes", "Heart Disease", "Hypertension"]),
    ("Brown Rice Pulao", &["Diabetes", "Heart Disease"]),
    ("Roti (Whole Wheat)", &["Diabetes", "Heart Disease", "Hypertension"]),
    ("Bhindi (Okra) Curry", &["Heart Disease", "Hypertension"]),
    ("Grilled Tandoori Chicken", &["Heart Disease"]),
    ("Mixed Vegetable Curry", &["Hypertension", "Heart Disease"]),
    ("Rajma (Kidney Beans) Curry", &["Diabetes", "Hypertension"]),
];

#[derive(Debug, Clone)]
pub struct DishCatalog {
    dishes: Vec<Dish>,
}

impl DishCatalog {
    pub fn embedded() -> Self {
        let dishes = DISHES
            .iter()
            .map(|(name, suitable_for)| Dish {
                name: name.to_string(),
                suitable_for: suitable_for.iter().map(|c| c.to_string()).collect(),
            })
            .collect();
        Self { dishes }
    }

    /// Conditions any dish is tagged with, in first-seen order.
    pub fn conditions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for condition in self.dishes.iter().flat_map(|d| d.suitable_for.iter()) {
            if !seen.contains(&condition.as_str()) {
                seen.push(condition.as_str());
            }
        }
        seen
    }

    /// Dishes suited to `condition` (all dishes when `None`), minus those
    /// whose name conflicts with an active preference.
    pub fn recommend(&self, condition: Option<&str>, prefs: &PreferenceSet) -> Vec<&Dish> {
        let condition = condition
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty() && c != "none");

        self.dishes
            .iter()
            .filter(|dish| match &condition {
                Some(wanted) => dish
                    .suitable_for
                    .iter()
                    .any(|c| c.to_lowercase().contains(wanted.as_str())),
                None => true,
            })
            .filter(|dish| !conflicts(&dish.name, prefs))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dishes: Vec<&Dish>) -> Vec<&str> {
        dishes.into_iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_condition_filter() {
        let catalog = DishCatalog::embedded();
        let found = names(catalog.recommend(Some("Hypertension"), &PreferenceSet::default()));
        assert!(found.contains(&"Oats Upma"));
        assert!(!found.contains(&"Grilled Tandoori Chicken"));
        assert_eq!(found.len(), 7);
    }

    #[test]
    fn test_none_lists_everything() {
        let catalog = DishCatalog::embedded();
        let prefs = PreferenceSet::default();
        assert_eq!(catalog.recommend(None, &prefs).len(), 11);
        assert_eq!(catalog.recommend(Some("None"), &prefs).len(), 11);
    }

    #[test]
    fn test_vegetarian_hides_chicken() {
        let catalog = DishCatalog::embedded();
        let veg = PreferenceSet::new(true, false, false);
        let found = names(catalog.recommend(Some("heart disease"), &veg));
        assert!(!found.contains(&"Grilled Tandoori Chicken"));
        assert!(found.contains(&"Moong Dal Chilla"));
    }

    #[test]
    fn test_conditions() {
        let catalog = DishCatalog::embedded();
        assert_eq!(
            catalog.conditions(),
            vec!["Diabetes", "Heart Disease", "Hypertension"]
        );
    }
}
