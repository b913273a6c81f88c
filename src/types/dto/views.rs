use chrono::DateTime;
use serde::Serialize;

use crate::services::validation::{escape_html, Violation};
use crate::stores::CategoryOption;
use crate::types::db::{category, item};

use super::forms::FormSubmission;

/// `yyyy-MM-dd` for a unix timestamp
pub fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub count_item: u64,
    pub count_category: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorView {
    pub status: u16,
    pub message: String,
    /// Only filled in development
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub url: String,
    pub created_date: String,
    pub updated_date: String,
}

impl From<category::Model> for CategoryView {
    fn from(c: category::Model) -> Self {
        Self {
            url: format!("/category/{}", c.id),
            created_date: format_date(c.created_at),
            updated_date: format_date(c.updated_at),
            id: c.id,
            name: c.name,
            description: c.description,
            image: c.image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryListView {
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub number_in_stock: i64,
    pub image: Option<String>,
    pub url: String,
    pub created_date: String,
    pub updated_date: String,
}

impl From<item::Model> for ItemView {
    fn from(i: item::Model) -> Self {
        Self {
            url: format!("/item/{}", i.id),
            created_date: format_date(i.created_at),
            updated_date: format_date(i.updated_at),
            id: i.id,
            name: i.name,
            description: i.description,
            category: i.category,
            price: i.price,
            number_in_stock: i.number_in_stock,
            image: i.image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemListView {
    pub items: Vec<ItemView>,
}

/// Values shown in the category form inputs, already HTML-escaped
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryFormValues {
    pub name: String,
    pub description: String,
}

impl CategoryFormValues {
    /// Escape the raw submission so the browser shows exactly what was typed
    pub fn from_submission(submission: &FormSubmission) -> Self {
        Self {
            name: escape_html(submission.raw("category_name")),
            description: escape_html(submission.raw("category_description")),
        }
    }
}

impl From<&category::Model> for CategoryFormValues {
    fn from(c: &category::Model) -> Self {
        // Stored text was escaped on write
        Self {
            name: c.name.clone(),
            description: c.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryFormView {
    pub title: String,
    pub action: String,
    pub category: CategoryFormValues,
    pub image: Option<String>,
    pub errors: Vec<Violation>,
}

/// Values shown in the item form inputs, already HTML-escaped
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemFormValues {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub number_in_stock: String,
}

impl ItemFormValues {
    pub fn from_submission(submission: &FormSubmission) -> Self {
        Self {
            name: escape_html(submission.raw("item_name")),
            description: escape_html(submission.raw("item_description")),
            category: escape_html(submission.raw("item_category")),
            price: escape_html(submission.raw("item_price")),
            number_in_stock: escape_html(submission.raw("item_number_in_stock")),
        }
    }
}

impl From<&item::Model> for ItemFormValues {
    fn from(i: &item::Model) -> Self {
        Self {
            name: i.name.clone(),
            description: i.description.clone(),
            category: i.category.clone(),
            price: i.price.to_string(),
            number_in_stock: i.number_in_stock.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemFormView {
    pub title: String,
    pub action: String,
    pub item: ItemFormValues,
    pub image: Option<String>,
    pub categories: Vec<CategoryOption>,
    pub errors: Vec<Violation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "1970-01-01");
        assert_eq!(format_date(1_700_000_000), "2023-11-14");
    }

    #[test]
    fn test_category_view_has_canonical_url() {
        let view = CategoryView::from(category::Model {
            id: "abc".to_string(),
            name: "Tools".to_string(),
            description: "d".to_string(),
            image: None,
            created_at: 0,
            updated_at: 0,
        });

        assert_eq!(view.url, "/category/abc");
        assert_eq!(view.created_date, "1970-01-01");
    }

    #[test]
    fn test_form_values_escape_raw_submission() {
        let submission = FormSubmission::default()
            .with_field("item_name", "<Widget>")
            .with_field("item_price", "9.99");

        let values = ItemFormValues::from_submission(&submission);

        assert_eq!(values.name, "&lt;Widget&gt;");
        assert_eq!(values.price, "9.99");
        assert_eq!(values.description, "");
    }

    #[test]
    fn test_item_form_values_from_model() {
        let model = item::Model {
            id: "i".to_string(),
            name: "Widget".to_string(),
            description: "d".to_string(),
            category: "c".to_string(),
            price: 9.99,
            number_in_stock: 5,
            image: None,
            created_at: 0,
            updated_at: 0,
        };

        let values = ItemFormValues::from(&model);

        assert_eq!(values.price, "9.99");
        assert_eq!(values.number_in_stock, "5");
    }
}
