//! Meal Detail Modal
//!
//! Day cards on the nutrition and overview views embed their meals as JSON.
//! Clicking a card fills the shared meal modal with a per-meal breakdown.

use serde::{Deserialize, Deserializer};

use crate::markup::escape_html;

// Meal JSON is model-generated; explicit nulls read like missing keys.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MealItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub food: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub calories: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub portion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protein_g: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub carbs_g: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fat_g: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Meal {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meal_total_calories: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<MealItem>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Gram totals over a meal's items
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Meal {
    pub fn macros(&self) -> Macros {
        self.items.iter().fold(Macros::default(), |tot, item| Macros {
            protein: tot.protein + item.protein_g,
            carbs: tot.carbs + item.carbs_g,
            fat: tot.fat + item.fat_g,
        })
    }
}

/// Parse the JSON embedded next to a day card
pub fn parse_meals(json: &str) -> Result<Vec<Meal>, serde_json::Error> {
    serde_json::from_str(json.trim())
}

/// Modal title, e.g. "Monday — 2150 kcal"
pub fn modal_title(day: &str, calories: &str) -> String {
    format!("{} — {} kcal", day, calories)
}

/// Modal body for a day's meals, with the card's notes (if any) at the end
pub fn render_meal_details(meals: &[Meal], notes: Option<&str>) -> String {
    let mut html = String::new();

    for meal in meals {
        let macros = meal.macros();
        html.push_str(&format!(
            r#"<div class="mb-4"><h6 class="fw-bold">{} — {} kcal</h6><div class="small text-light opacity-75 mb-2">Protein: {}g • Carbs: {}g • Fat: {}g</div>"#,
            escape_html(&meal.name),
            meal.meal_total_calories,
            round_grams(macros.protein),
            round_grams(macros.carbs),
            round_grams(macros.fat),
        ));

        for item in &meal.items {
            html.push_str(&format!(
                r#"<div class="border-start border-secondary ps-3 mb-2"><strong>{}</strong> — {} kcal<div class="small text-light opacity-75">{}</div></div>"#,
                escape_html(&item.food),
                item.calories,
                escape_html(&item.portion),
            ));
        }

        html.push_str("</div>");
    }

    if let Some(notes) = notes.filter(|n| !n.is_empty()) {
        html.push_str(&format!(
            r#"<p class="fst-italic small text-light opacity-75">{}</p>"#,
            escape_html(notes)
        ));
    }

    html
}

/// Sums of decimal grams pick up float noise; show at most one decimal
fn round_grams(grams: f64) -> f64 {
    (grams * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: &str = r#"
        [
          {"name": "Breakfast", "meal_total_calories": 520, "items": [
            {"food": "Oats", "calories": 300, "portion": "80 g", "protein_g": 10.1, "carbs_g": 54, "fat_g": 5.2},
            {"food": "Whey", "calories": 220, "portion": "1 scoop", "protein_g": 24.2, "carbs_g": 3, "fat_g": 2}
          ]},
          {"name": "Dinner", "meal_total_calories": 700, "items": [
            {"food": "Chicken & rice", "calories": 700}
          ]}
        ]
    "#;

    #[test]
    fn test_parse_and_macros() {
        let meals = parse_meals(DAY).unwrap();
        assert_eq!(meals.len(), 2);

        let macros = meals[0].macros();
        assert!((macros.protein - 34.3).abs() < 1e-9);
        assert_eq!(macros.carbs, 57.0);

        // Missing macro fields count as zero
        assert_eq!(meals[1].macros(), Macros::default());
    }

    #[test]
    fn test_null_fields_read_as_missing() {
        let json = r#"[{"name": "Lunch", "meal_total_calories": null, "items": [
            {"food": "Salad", "calories": 250, "portion": null, "protein_g": null, "carbs_g": 12, "fat_g": null}
        ]}]"#;

        let meals = parse_meals(json).unwrap();
        let item = &meals[0].items[0];
        assert_eq!(item.portion, "");
        assert_eq!(item.protein_g, 0.0);
        assert_eq!(meals[0].meal_total_calories, 0.0);
        assert_eq!(
            meals[0].macros(),
            Macros {
                protein: 0.0,
                carbs: 12.0,
                fat: 0.0
            }
        );

        let html = render_meal_details(&meals, None);
        assert!(html.contains("<strong>Salad</strong> — 250 kcal"));
        assert!(html.contains("Protein: 0g • Carbs: 12g • Fat: 0g"));
    }

    #[test]
    fn test_render_details() {
        let meals = parse_meals(DAY).unwrap();
        let html = render_meal_details(&meals, Some("Refeed day"));

        assert!(html.contains("Breakfast — 520 kcal"));
        assert!(html.contains("Protein: 34.3g • Carbs: 57g • Fat: 7.2g"));
        assert!(html.contains("<strong>Oats</strong> — 300 kcal"));
        assert!(html.contains("<strong>Chicken &amp; rice</strong>"));
        assert!(html.ends_with(r#"<p class="fst-italic small text-light opacity-75">Refeed day</p>"#));
    }

    #[test]
    fn test_render_without_notes() {
        let meals = parse_meals(DAY).unwrap();
        assert!(!render_meal_details(&meals, None).contains("fst-italic"));
        assert!(!render_meal_details(&meals, Some("")).contains("fst-italic"));
    }

    #[test]
    fn test_modal_title() {
        assert_eq!(modal_title("Monday", "2150"), "Monday — 2150 kcal");
    }

    #[test]
    fn test_bad_json() {
        assert!(parse_meals("not json").is_err());
    }
}
