use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::{upload_attached, FormOutcome};
use crate::errors::InternalError;
use crate::providers::MediaUploader;
use crate::services::validation::{parse_number, parse_whole_number, Validated};
use crate::services::{validate, ITEM_RULES};
use crate::stores::{CategoryStore, ItemFields, ItemStore};
use crate::types::dto::forms::FormSubmission;
use crate::types::dto::views::{ItemFormValues, ItemFormView, ItemListView, ItemView};

/// Item coordinator that orchestrates the item pages
///
/// Same form/committed flow as categories. Every item form also lists the
/// categories to pick from; the chosen id is stored without checking it.
pub struct ItemCoordinator {
    item_store: Arc<ItemStore>,
    category_store: Arc<CategoryStore>,
    media_uploader: Arc<dyn MediaUploader>,
}

impl ItemCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            item_store: app_data.item_store.clone(),
            category_store: app_data.category_store.clone(),
            media_uploader: app_data.media_uploader.clone(),
        }
    }

    pub fn detail_url(id: &str) -> String {
        format!("/item/{}", id)
    }

    pub async fn list(&self) -> Result<ItemListView, InternalError> {
        let items = self.item_store.list().await?;

        Ok(ItemListView {
            items: items.into_iter().map(ItemView::from).collect(),
        })
    }

    pub async fn new_form(&self) -> Result<ItemFormView, InternalError> {
        Ok(ItemFormView {
            title: "Create Item".to_string(),
            action: "/item/new".to_string(),
            item: ItemFormValues::default(),
            image: None,
            categories: self.category_store.list_options().await?,
            errors: Vec::new(),
        })
    }

    /// # Errors
    /// `RecordError::NotFound` when no item has this id
    pub async fn edit_form(&self, id: &str) -> Result<ItemFormView, InternalError> {
        let item = self.item_store.get(id).await?;
        let categories = self.category_store.list_options().await?;

        Ok(ItemFormView {
            title: "Update Item".to_string(),
            action: Self::detail_url(id),
            item: ItemFormValues::from(&item),
            image: item.image,
            categories,
            errors: Vec::new(),
        })
    }

    pub async fn create(
        &self,
        submission: FormSubmission,
    ) -> Result<FormOutcome<ItemFormView>, InternalError> {
        let validated = validate(ITEM_RULES, &submission.fields);
        if !validated.is_valid() {
            tracing::debug!(
                "Item create rejected with {} violations",
                validated.violations().len()
            );
            let form = self
                .rejected_form(
                    "Create Item",
                    "/item/new".to_string(),
                    &submission,
                    validated,
                    None,
                )
                .await?;
            return Ok(FormOutcome::Rejected(form));
        }

        let fields = Self::fields_from(&validated)?;
        let image_url = upload_attached(self.media_uploader.as_ref(), submission.image).await?;

        let created = self.item_store.create(fields, image_url).await?;
        tracing::info!("Item {} created", created.id);

        Ok(FormOutcome::Committed {
            url: Self::detail_url(&created.id),
            id: created.id,
        })
    }

    /// The item must exist before anything is uploaded.
    ///
    /// # Errors
    /// `RecordError::NotFound` when the id matches no item
    pub async fn update(
        &self,
        id: &str,
        submission: FormSubmission,
    ) -> Result<FormOutcome<ItemFormView>, InternalError> {
        let validated = validate(ITEM_RULES, &submission.fields);
        if !validated.is_valid() {
            tracing::debug!(
                "Item {} update rejected with {} violations",
                id,
                validated.violations().len()
            );
            let image = self.stored_image(id).await?;
            let form = self
                .rejected_form(
                    "Update Item",
                    Self::detail_url(id),
                    &submission,
                    validated,
                    image,
                )
                .await?;
            return Ok(FormOutcome::Rejected(form));
        }

        let fields = Self::fields_from(&validated)?;
        self.item_store.get(id).await?;
        let image_url = upload_attached(self.media_uploader.as_ref(), submission.image).await?;

        let updated = self.item_store.update(id, fields, image_url).await?;
        tracing::info!("Item {} updated", updated.id);

        Ok(FormOutcome::Committed {
            url: Self::detail_url(&updated.id),
            id: updated.id,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        self.item_store.delete(id).await?;
        tracing::info!("Item {} deleted", id);
        Ok(())
    }

    /// Image preview for a rejected edit form; none when the item is gone
    async fn stored_image(&self, id: &str) -> Result<Option<String>, InternalError> {
        match self.item_store.get(id).await {
            Ok(item) => Ok(item.image),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn rejected_form(
        &self,
        title: &str,
        action: String,
        submission: &FormSubmission,
        validated: Validated,
        image: Option<String>,
    ) -> Result<ItemFormView, InternalError> {
        Ok(ItemFormView {
            title: title.to_string(),
            action,
            item: ItemFormValues::from_submission(submission),
            image,
            categories: self.category_store.list_options().await?,
            errors: validated.into_violations(),
        })
    }

    /// Typed fields from a submission that passed `ITEM_RULES`
    fn fields_from(validated: &Validated) -> Result<ItemFields, InternalError> {
        let price = parse_number(validated.value("item_price"))
            .ok_or_else(|| InternalError::parse("item_price", validated.value("item_price")))?;
        let number_in_stock = parse_whole_number(validated.value("item_number_in_stock"))
            .ok_or_else(|| {
                InternalError::parse(
                    "item_number_in_stock",
                    validated.value("item_number_in_stock"),
                )
            })?;

        Ok(ItemFields {
            name: validated.value("item_name").to_string(),
            description: validated.value("item_description").to_string(),
            category: validated.value("item_category").to_string(),
            price,
            number_in_stock,
        })
    }
}
