use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Unique violations become `Duplicate` so the API can answer 409; every other
/// failure is carried as `Database` with the operation that produced it.
/// `DieselError::NotFound` is not mapped to `AppError::NotFound` here: absent
/// rows are `Ok(None)` at the repository layer and the service decides.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    ///
    /// # Returns
    /// An AppError variant appropriate for the type of database error
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::convert_unique_violation(info.as_ref(), operation)
            }
            DieselError::DatabaseError(_, info) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", info.message())),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_unique_violation(
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let Some(entity) = info.table_name() else {
            return AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!(
                    "Unique constraint violation: {}",
                    info.message()
                )),
            };
        };

        AppError::Duplicate {
            entity: entity.to_string(),
            field: info
                .column_name()
                .or(info.constraint_name())
                .unwrap_or("key")
                .to_string(),
            value: info.details().unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        table_name: Option<String>,
        constraint_name: Option<String>,
        details: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            self.table_name.as_deref()
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_unique_violation_becomes_duplicate() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint \"members_pkey\"".to_string(),
            table_name: Some("members".to_string()),
            constraint_name: Some("members_pkey".to_string()),
            details: Some("Key (id)=(42) already exists.".to_string()),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "insert member") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "members");
                assert_eq!(field, "members_pkey");
                assert!(value.contains("42"));
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unique_violation_without_table_is_database_error() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key".to_string(),
            table_name: None,
            constraint_name: None,
            details: None,
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert member");
        assert!(matches!(result, AppError::Database { ref operation, .. } if operation == "insert member"));
    }

    #[test]
    fn test_diesel_not_found_is_not_record_not_found() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(!result.is_not_found());
    }

    #[test]
    fn test_other_database_error_keeps_message() {
        let info = MockDatabaseErrorInfo {
            message: "relation \"members\" does not exist".to_string(),
            table_name: None,
            constraint_name: None,
            details: None,
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::Unknown, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "select member") {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "select member");
                assert!(source.to_string().contains("does not exist"));
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }
}
