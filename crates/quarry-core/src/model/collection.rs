//! Collection and field references.

/// A table-like named data source, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection {
    /// Table name.
    pub name: String,
    /// Alias used to qualify fields in multi-table queries.
    pub alias: Option<String>,
}

impl Collection {
    /// Creates a collection reference.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            alias: None,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(String::from(alias));
        self
    }

    /// Returns the name fields are qualified with: the alias when set,
    /// otherwise the table name.
    #[must_use]
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Creates a field qualified by this collection.
    #[must_use]
    pub fn field(&self, name: &str) -> Field {
        Field::of(self, name)
    }
}

/// A column reference, optionally qualified by its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Owning collection, used only for qualification.
    pub collection: Option<Collection>,
}

impl Field {
    /// Creates an unqualified field.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            collection: None,
        }
    }

    /// Creates a field qualified by `collection`.
    #[must_use]
    pub fn of(collection: &Collection, name: &str) -> Self {
        Self {
            name: String::from(name),
            collection: Some(collection.clone()),
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self {
            name,
            collection: None,
        }
    }
}
