//! MySQL native error classification.

use quarry_core::{ErrorCodeTable, ErrorKind};

/// Access denied for user to database.
pub const ER_DBACCESS_DENIED_ERROR: u32 = 1044;
/// Access denied for user (wrong password).
pub const ER_ACCESS_DENIED_ERROR: u32 = 1045;
/// Unknown database.
pub const ER_BAD_DB_ERROR: u32 = 1049;
/// Duplicate entry for key.
pub const ER_DUP_ENTRY: u32 = 1062;
/// SQL syntax error.
pub const ER_PARSE_ERROR: u32 = 1064;
/// Table doesn't exist.
pub const ER_NO_SUCH_TABLE: u32 = 1146;
/// Foreign key constraint fails on a child row.
pub const ER_NO_REFERENCED_ROW_2: u32 = 1452;
/// Can't connect to the server.
pub const CR_CONNECTION_ERROR: u32 = 2002;

/// Classification table for MySQL server and client error codes.
pub const MYSQL_ERROR_TABLE: ErrorCodeTable = ErrorCodeTable::new(
    "mysql",
    &[
        (ER_DBACCESS_DENIED_ERROR, ErrorKind::Auth),
        (ER_ACCESS_DENIED_ERROR, ErrorKind::Auth),
        (ER_BAD_DB_ERROR, ErrorKind::UnknownSchema),
        (ER_DUP_ENTRY, ErrorKind::DuplicateEntry),
        (ER_PARSE_ERROR, ErrorKind::QuerySyntax),
        (ER_NO_SUCH_TABLE, ErrorKind::UnknownCollection),
        (ER_NO_REFERENCED_ROW_2, ErrorKind::Constraint),
        (CR_CONNECTION_ERROR, ErrorKind::UnknownHost),
    ],
);

#[cfg(test)]
mod tests {
    use quarry_core::NativeError;

    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(MYSQL_ERROR_TABLE.classify(1044), ErrorKind::Auth);
        assert_eq!(MYSQL_ERROR_TABLE.classify(1045), ErrorKind::Auth);
        assert_eq!(MYSQL_ERROR_TABLE.classify(1049), ErrorKind::UnknownSchema);
        assert_eq!(MYSQL_ERROR_TABLE.classify(1064), ErrorKind::QuerySyntax);
        assert_eq!(MYSQL_ERROR_TABLE.classify(1146), ErrorKind::UnknownCollection);
        assert_eq!(MYSQL_ERROR_TABLE.classify(1452), ErrorKind::Constraint);
        assert_eq!(MYSQL_ERROR_TABLE.classify(2002), ErrorKind::UnknownHost);
    }

    #[test]
    fn test_duplicate_entry_keeps_message() {
        let err = MYSQL_ERROR_TABLE.translate(NativeError::new(
            1062,
            "Duplicate entry 'a@b.c' for key 'email'",
        ));
        assert_eq!(err.kind, ErrorKind::DuplicateEntry);
        assert_eq!(err.code, 1062);
        assert_eq!(err.message, "Duplicate entry 'a@b.c' for key 'email'");
    }

    #[test]
    fn test_unknown_code_is_generic() {
        let err = MYSQL_ERROR_TABLE.translate(NativeError::new(9999, "boom"));
        assert_eq!(err.kind, ErrorKind::Generic);
        assert_eq!(err.code, 9999);
    }
}
