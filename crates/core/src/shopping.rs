//! Shopping-list aggregation over a week of planned meals.

use serde::Serialize;

use crate::catalog::Meal;

/// An aggregated shopping-list line before persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItemDraft {
    pub category: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Estimated total price, when every contributing ingredient had one.
    pub estimated_price: Option<f64>,
}

/// Fold the ingredients of a week's planned meals into shopping-list lines.
///
/// Lines merge on (name, unit), case-insensitive on name; quantities and
/// prices are scaled by `family_members` since catalog amounts are per
/// serving. Output is sorted by category then name so regeneration is
/// stable.
pub fn aggregate_ingredients<'a>(
    meals: impl IntoIterator<Item = &'a Meal>,
    family_members: i32,
) -> Vec<ShoppingItemDraft> {
    let multiplier = family_members.max(1) as f64;
    let mut items: Vec<ShoppingItemDraft> = Vec::new();

    for meal in meals {
        for ingredient in &meal.ingredients {
            let scaled_quantity = ingredient.amount * multiplier;
            let scaled_price = ingredient.price.map(|p| p * multiplier);

            match items.iter_mut().find(|item| {
                item.name.eq_ignore_ascii_case(&ingredient.name) && item.unit == ingredient.unit
            }) {
                Some(existing) => {
                    existing.quantity += scaled_quantity;
                    existing.estimated_price = match (existing.estimated_price, scaled_price) {
                        (Some(a), Some(b)) => Some(a + b),
                        // One unpriced contribution makes the line unpriced.
                        _ => None,
                    };
                }
                None => items.push(ShoppingItemDraft {
                    category: ingredient.category.clone(),
                    name: ingredient.name.clone(),
                    quantity: scaled_quantity,
                    unit: ingredient.unit.clone(),
                    estimated_price: scaled_price,
                }),
            }
        }
    }

    items.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
    items
}
