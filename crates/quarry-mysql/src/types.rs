//! MySQL column type codes.

/// Native storage type of a result column, as reported in field metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// TINYINT, code 1.
    TinyInt,
    /// SMALLINT, code 2.
    SmallInt,
    /// MEDIUMINT, code 9.
    MediumInt,
    /// INT, code 3.
    Int,
    /// BIGINT, code 8. Unsigned values may exceed `i64`.
    BigInt,
    /// YEAR, code 13.
    Year,
    /// DECIMAL, code 246.
    Decimal,
    /// FLOAT, code 4.
    Float,
    /// DOUBLE, code 5.
    Double,
    /// BIT, code 16.
    Bit,
    /// DATE, code 10.
    Date,
    /// DATETIME, code 12.
    DateTime,
    /// TIMESTAMP, code 7.
    Timestamp,
    /// TIME, code 11.
    Time,
    /// CHAR, code 254.
    Char,
    /// VARCHAR, code 253.
    VarChar,
    /// TEXT and BLOB, code 252.
    Text,
    /// Any code outside the table above.
    Other(u16),
}

/// How values of a column type are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    /// Decoded to `Value::Int`.
    Integer,
    /// Decoded to `Value::Float`.
    Float,
    /// Decoded to `Value::DateTime`.
    DateTime,
    /// Decoded to `Value::DateTime` on 1970-01-01.
    Time,
    /// Left as text, or bytes when not valid UTF-8.
    PassThrough,
}

impl TypeFamily {
    /// Name of the expected type, as reported in decode errors.
    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::PassThrough => "text",
        }
    }
}

impl ColumnType {
    /// Maps a native type code.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::TinyInt,
            2 => Self::SmallInt,
            3 => Self::Int,
            4 => Self::Float,
            5 => Self::Double,
            7 => Self::Timestamp,
            8 => Self::BigInt,
            9 => Self::MediumInt,
            10 => Self::Date,
            11 => Self::Time,
            12 => Self::DateTime,
            13 => Self::Year,
            16 => Self::Bit,
            246 => Self::Decimal,
            252 => Self::Text,
            253 => Self::VarChar,
            254 => Self::Char,
            other => Self::Other(other),
        }
    }

    /// Returns the native type code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::TinyInt => 1,
            Self::SmallInt => 2,
            Self::Int => 3,
            Self::Float => 4,
            Self::Double => 5,
            Self::Timestamp => 7,
            Self::BigInt => 8,
            Self::MediumInt => 9,
            Self::Date => 10,
            Self::Time => 11,
            Self::DateTime => 12,
            Self::Year => 13,
            Self::Bit => 16,
            Self::Decimal => 246,
            Self::Text => 252,
            Self::VarChar => 253,
            Self::Char => 254,
            Self::Other(code) => code,
        }
    }

    /// Returns the decoding family.
    ///
    /// YEAR decodes as an integer while BIT stays raw.
    #[must_use]
    pub const fn family(self) -> TypeFamily {
        match self {
            Self::TinyInt
            | Self::SmallInt
            | Self::MediumInt
            | Self::Int
            | Self::BigInt
            | Self::Year => TypeFamily::Integer,
            Self::Decimal | Self::Float | Self::Double => TypeFamily::Float,
            Self::Date | Self::DateTime | Self::Timestamp => TypeFamily::DateTime,
            Self::Time => TypeFamily::Time,
            Self::Bit | Self::Char | Self::VarChar | Self::Text | Self::Other(_) => {
                TypeFamily::PassThrough
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(u16, ColumnType)] = &[
        (1, ColumnType::TinyInt),
        (2, ColumnType::SmallInt),
        (9, ColumnType::MediumInt),
        (3, ColumnType::Int),
        (8, ColumnType::BigInt),
        (246, ColumnType::Decimal),
        (4, ColumnType::Float),
        (5, ColumnType::Double),
        (16, ColumnType::Bit),
        (10, ColumnType::Date),
        (12, ColumnType::DateTime),
        (7, ColumnType::Timestamp),
        (11, ColumnType::Time),
        (13, ColumnType::Year),
        (254, ColumnType::Char),
        (253, ColumnType::VarChar),
        (252, ColumnType::Text),
    ];

    #[test]
    fn test_code_table() {
        for &(code, ty) in TABLE {
            assert_eq!(ColumnType::from_code(code), ty);
            assert_eq!(ty.code(), code);
        }
        assert_eq!(ColumnType::from_code(245), ColumnType::Other(245));
        assert_eq!(ColumnType::Other(245).code(), 245);
    }

    #[test]
    fn test_families() {
        assert_eq!(ColumnType::Year.family(), TypeFamily::Integer);
        assert_eq!(ColumnType::Bit.family(), TypeFamily::PassThrough);
        assert_eq!(ColumnType::Decimal.family(), TypeFamily::Float);
        assert_eq!(ColumnType::Timestamp.family(), TypeFamily::DateTime);
        assert_eq!(ColumnType::Time.family(), TypeFamily::Time);
        assert_eq!(ColumnType::Text.family(), TypeFamily::PassThrough);
    }
}
