use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use super::MenuCategory;

// Price arrives either as a JSON number or as the raw text of a form input
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum PriceField{
    Number(f64),
    Text(String)
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemForm{
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<PriceField>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub menu_id: Option<Uuid>
}

#[derive(Error, Debug, PartialEq)]
pub enum MenuItemValidationError{
    #[error("Name is required")]
    MissingName,
    #[error("Category is required")]
    MissingCategory,
    #[error("Invalid category")]
    InvalidCategory(String),
    #[error("Invalid price: {0}")]
    InvalidPrice(String)
}

/// Validated mutable fields of a menu item, used for both create and
/// full-replace updates.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemInput{
    pub name: String,
    pub description: Option<String>,
    pub category: MenuCategory,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub menu_id: Option<Uuid>
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_price(price: Option<PriceField>) -> Result<Option<f64>, MenuItemValidationError> {
    let value = match price {
        None => return Ok(None),
        Some(PriceField::Number(n)) => n,
        Some(PriceField::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None)
            }
            text.parse::<f64>()
                .map_err(|_| MenuItemValidationError::InvalidPrice(text.to_string()))?
        }
    };

    if value.is_finite() && value >= 0.0 {
        Ok(Some(value))
    } else {
        Err(MenuItemValidationError::InvalidPrice(value.to_string()))
    }
}

impl MenuItemInput {
    pub fn parse(form: MenuItemForm) -> Result<MenuItemInput, MenuItemValidationError> {
        let name = non_blank(form.name).ok_or(MenuItemValidationError::MissingName)?;

        let category = non_blank(form.category).ok_or(MenuItemValidationError::MissingCategory)?;
        let category = MenuCategory::parse(&category)
            .map_err(|_| MenuItemValidationError::InvalidCategory(category))?;

        Ok(MenuItemInput{
            name,
            description: non_blank(form.description),
            category,
            price: parse_price(form.price)?,
            image_url: non_blank(form.image_url),
            is_available: form.is_available.unwrap_or(true),
            menu_id: form.menu_id
        })
    }
}
