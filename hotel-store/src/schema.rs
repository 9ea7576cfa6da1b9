/// How a foreign key is stored on the referencing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// A single id. Deleting the referenced row is refused while it is used.
    Scalar,
    /// An array of ids (many-to-many). Deleting the referenced row removes
    /// its id from every array.
    List,
}

#[derive(Debug, Clone, Copy)]
pub struct ForeignKey {
    pub field: &'static str,
    pub references: &'static str,
    pub kind: RelationKind,
}

impl ForeignKey {
    pub const fn scalar(field: &'static str, references: &'static str) -> Self {
        Self {
            field,
            references,
            kind: RelationKind::Scalar,
        }
    }

    pub const fn list(field: &'static str, references: &'static str) -> Self {
        Self {
            field,
            references,
            kind: RelationKind::List,
        }
    }
}

/// Table description handed to the store.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub foreign_keys: &'static [ForeignKey],
    pub unique: &'static [&'static str],
}

impl TableSchema {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            foreign_keys: &[],
            unique: &[],
        }
    }

    pub const fn with_foreign_keys(mut self, foreign_keys: &'static [ForeignKey]) -> Self {
        self.foreign_keys = foreign_keys;
        self
    }

    pub const fn with_unique(mut self, unique: &'static [&'static str]) -> Self {
        self.unique = unique;
        self
    }
}
