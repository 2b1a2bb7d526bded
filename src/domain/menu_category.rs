use serde::{Deserialize, Serialize};

use crate::models::MenuItem;

// Declaration order is the order sections appear on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MenuCategory{
    Drink,
    AmuseBouche,
    Soup,
    MainCourse,
    Dessert
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 5] = [
        MenuCategory::Drink,
        MenuCategory::AmuseBouche,
        MenuCategory::Soup,
        MenuCategory::MainCourse,
        MenuCategory::Dessert
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Drink => "Drink",
            MenuCategory::AmuseBouche => "AmuseBouche",
            MenuCategory::Soup => "Soup",
            MenuCategory::MainCourse => "MainCourse",
            MenuCategory::Dessert => "Dessert"
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuCategory::Drink => "Drink",
            MenuCategory::AmuseBouche => "Amuse-Bouche",
            MenuCategory::Soup => "Soup",
            MenuCategory::MainCourse => "Main Course",
            MenuCategory::Dessert => "Dessert"
        }
    }

    pub fn parse(value: &str) -> Result<MenuCategory, String> {
        MenuCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| format!("{} is not a valid menu category", value))
    }
}

impl std::fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Debug)]
pub struct MenuSection{
    pub category: MenuCategory,
    pub label: &'static str,
    pub items: Vec<MenuItem>
}

/// Partitions items into sections in category order. Within a section items
/// are ordered by name, ties broken by id, so the result does not depend on
/// the order rows came back in. Empty categories are left out.
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = MenuCategory::ALL
        .into_iter()
        .map(|category| MenuSection{ category, label: category.label(), items: Vec::new() })
        .collect();

    for item in items {
        match MenuCategory::parse(&item.category) {
            Ok(category) => sections[category as usize].items.push(item),
            Err(e) => tracing::warn!(item_id = %item.id, "Skipping menu item: {}", e)
        }
    }

    for section in sections.iter_mut() {
        section.items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    }

    sections.retain(|s| !s.items.is_empty());
    sections
}

// Public listing order: category order, then name
pub fn sort_for_listing(items: &mut [MenuItem]) {
    items.sort_by(|a, b| {
        let rank = |item: &MenuItem| MenuCategory::parse(&item.category)
            .map(|c| c as usize)
            .unwrap_or(usize::MAX);

        rank(a).cmp(&rank(b)).then_with(|| a.name.cmp(&b.name))
    });
}
