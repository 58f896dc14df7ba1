//! Menu Models

use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    /// Price in currency units
    pub price: f64,
    pub description: Option<String>,
    /// Inline image payload (base64 or data URL), can be large
    pub image: Option<String>,
    pub is_available: bool,
    /// Serving size label, e.g. "750ml"
    pub volume: Option<String>,
}

/// Menu category entity with its items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    /// Backend document ID
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning restaurant ID (stored under the bare `id` key)
    #[serde(rename = "id")]
    pub restaurant_id: String,
    pub category: String,
    pub items: Vec<MenuItem>,
}

impl MenuCategory {
    /// Look up an item in this category by name
    pub fn item(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// Availability toggle payload for one item inside a category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub item_name: String,
    pub is_available: bool,
}

/// Find a menu item across categories by its composite line id
pub fn find_by_line_id<'a>(
    catalog: &'a [MenuCategory],
    line_id: &str,
) -> Option<(&'a MenuCategory, &'a MenuItem)> {
    catalog.iter().find_map(|category| {
        let rest = line_id.strip_prefix(category.id.as_str())?;
        let name = rest.strip_prefix('-')?;
        category.item(name).map(|item| (category, item))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Vec<MenuCategory> {
        vec![MenuCategory {
            id: "cat1".to_string(),
            restaurant_id: "rest1".to_string(),
            category: "Starters".to_string(),
            items: vec![MenuItem {
                name: "Samosa".to_string(),
                price: 4.50,
                description: None,
                image: Some("data:image/png;base64,xxxx".to_string()),
                is_available: true,
                volume: None,
            }],
        }]
    }

    #[test]
    fn test_find_by_line_id() {
        let catalog = sample_catalog();
        let (category, item) = find_by_line_id(&catalog, "cat1-Samosa").unwrap();
        assert_eq!(category.category, "Starters");
        assert_eq!(item.price, 4.50);

        assert!(find_by_line_id(&catalog, "cat1-Tikka").is_none());
        assert!(find_by_line_id(&catalog, "cat2-Samosa").is_none());
    }

    #[test]
    fn test_wire_field_spelling() {
        let json = serde_json::to_value(&sample_catalog()[0]).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("id").is_some());
        assert_eq!(json["items"][0]["isAvailable"], true);
    }
}
