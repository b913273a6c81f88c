use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::{upload_attached, FormOutcome};
use crate::errors::InternalError;
use crate::providers::MediaUploader;
use crate::services::{validate, CATEGORY_RULES};
use crate::stores::{CategoryFields, CategoryStore};
use crate::types::dto::forms::FormSubmission;
use crate::types::dto::views::{
    CategoryFormValues, CategoryFormView, CategoryListView, CategoryView,
};

/// Category coordinator that orchestrates the category pages
///
/// Mutating requests go form -> committed only when validation reports no
/// violations; a rejected submission never reaches the store.
pub struct CategoryCoordinator {
    category_store: Arc<CategoryStore>,
    media_uploader: Arc<dyn MediaUploader>,
}

impl CategoryCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            category_store: app_data.category_store.clone(),
            media_uploader: app_data.media_uploader.clone(),
        }
    }

    pub fn detail_url(id: &str) -> String {
        format!("/category/{}", id)
    }

    pub async fn list(&self) -> Result<CategoryListView, InternalError> {
        let categories = self.category_store.list().await?;

        Ok(CategoryListView {
            categories: categories.into_iter().map(CategoryView::from).collect(),
        })
    }

    pub fn new_form(&self) -> CategoryFormView {
        CategoryFormView {
            title: "Create Category".to_string(),
            action: "/category/new".to_string(),
            category: CategoryFormValues::default(),
            image: None,
            errors: Vec::new(),
        }
    }

    /// Edit form pre-populated from the stored record
    ///
    /// # Errors
    /// `RecordError::NotFound` when no category has this id
    pub async fn edit_form(&self, id: &str) -> Result<CategoryFormView, InternalError> {
        let category = self.category_store.get(id).await?;

        Ok(CategoryFormView {
            title: "Update Category".to_string(),
            action: Self::detail_url(id),
            category: CategoryFormValues::from(&category),
            image: category.image,
            errors: Vec::new(),
        })
    }

    /// Orchestrate category creation
    ///
    /// 1. Validate and sanitize the submitted fields
    /// 2. Upload the attached image, if any
    /// 3. Insert the record
    pub async fn create(
        &self,
        submission: FormSubmission,
    ) -> Result<FormOutcome<CategoryFormView>, InternalError> {
        let validated = validate(CATEGORY_RULES, &submission.fields);
        if !validated.is_valid() {
            tracing::debug!(
                "Category create rejected with {} violations",
                validated.violations().len()
            );
            let mut form = self.new_form();
            form.category = CategoryFormValues::from_submission(&submission);
            form.errors = validated.into_violations();
            return Ok(FormOutcome::Rejected(form));
        }

        let fields = CategoryFields {
            name: validated.value("category_name").to_string(),
            description: validated.value("category_description").to_string(),
        };
        let image_url = upload_attached(self.media_uploader.as_ref(), submission.image).await?;

        let created = self.category_store.create(fields, image_url).await?;
        tracing::info!("Category {} created", created.id);

        Ok(FormOutcome::Committed {
            url: Self::detail_url(&created.id),
            id: created.id,
        })
    }

    /// Orchestrate a full-replace category update
    ///
    /// The stored image is kept unless a new one was attached and uploaded.
    /// The category must exist before anything is uploaded.
    ///
    /// # Errors
    /// `RecordError::NotFound` when the id matches no category
    pub async fn update(
        &self,
        id: &str,
        submission: FormSubmission,
    ) -> Result<FormOutcome<CategoryFormView>, InternalError> {
        let validated = validate(CATEGORY_RULES, &submission.fields);
        if !validated.is_valid() {
            tracing::debug!(
                "Category {} update rejected with {} violations",
                id,
                validated.violations().len()
            );
            return Ok(FormOutcome::Rejected(CategoryFormView {
                title: "Update Category".to_string(),
                action: Self::detail_url(id),
                category: CategoryFormValues::from_submission(&submission),
                image: self.stored_image(id).await?,
                errors: validated.into_violations(),
            }));
        }

        let fields = CategoryFields {
            name: validated.value("category_name").to_string(),
            description: validated.value("category_description").to_string(),
        };
        self.category_store.get(id).await?;
        let image_url = upload_attached(self.media_uploader.as_ref(), submission.image).await?;

        let updated = self.category_store.update(id, fields, image_url).await?;
        tracing::info!("Category {} updated", updated.id);

        Ok(FormOutcome::Committed {
            url: Self::detail_url(&updated.id),
            id: updated.id,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        self.category_store.delete(id).await?;
        tracing::info!("Category {} deleted", id);
        Ok(())
    }

    /// Image preview for a rejected edit form; none when the category is gone
    async fn stored_image(&self, id: &str) -> Result<Option<String>, InternalError> {
        match self.category_store.get(id).await {
            Ok(category) => Ok(category.image),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
