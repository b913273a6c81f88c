#[cfg(test)]
mod tests {
    use crate::errors::internal::{InternalError, RecordError, UploadError};
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("create_category", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("create_category"));
        assert!(error_string.contains("Database error"));
    }

    #[test]
    fn test_parse_error_includes_value_type() {
        let error = InternalError::parse("item_price", "invalid float literal");

        let error_string = error.to_string();
        assert!(error_string.contains("item_price"));
        assert!(error_string.contains("invalid float literal"));
        assert!(error_string.contains("Parse error"));
    }

    #[test]
    fn test_not_found_error_names_collection_and_id() {
        let error = InternalError::not_found("categories", "1234");

        assert_eq!(error.to_string(), "Record not found in categories: 1234");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_upload_rejected_error_message() {
        let error = UploadError::Rejected {
            status: 401,
            body: "Invalid Signature".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Media host rejected upload with status 401: Invalid Signature"
        );
    }

    #[test]
    fn test_upload_error_auto_converts_to_internal_error() {
        let internal_error: InternalError = UploadError::NotConfigured.into();

        assert!(internal_error.to_string().contains("not configured"));
        assert!(!internal_error.is_not_found());
    }

    #[test]
    fn test_record_error_auto_converts_to_internal_error() {
        let record_error = RecordError::NotFound {
            collection: "items".to_string(),
            id: "x".to_string(),
        };
        let internal_error: InternalError = record_error.into();

        assert!(internal_error.is_not_found());
    }
}
