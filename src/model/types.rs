//! Declared entity schema: columns, relations and ordering for each wiki entity.

/// Server-assigned creation timestamp column, present on every table.
pub const CREATED_DATE: &str = "CreatedDate";
/// Server-assigned modification timestamp column, present on every table.
pub const LAST_MODIFIED_DATE: &str = "LastModifiedDate";

/// The six first-class record types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Religion,
    Nation,
    Location,
    Character,
    Event,
    HistoryEntry,
}

/// Column storage type. Drives both the SQL cast applied to bound values and row decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Timestamp,
}

impl ColumnType {
    /// PostgreSQL type used in `$n::type` casts.
    pub fn pg_cast(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "double precision",
            ColumnType::Text => "text",
            ColumnType::Timestamp => "timestamptz",
        }
    }
}

/// A client-writable column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub required: bool,
}

impl ColumnDef {
    pub const fn text(name: &'static str) -> Self {
        ColumnDef {
            name,
            ty: ColumnType::Text,
            required: false,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        ColumnDef {
            name,
            ty: ColumnType::Integer,
            required: false,
        }
    }

    pub const fn float(name: &'static str) -> Self {
        ColumnDef {
            name,
            ty: ColumnType::Float,
            required: false,
        }
    }

    pub const fn required(self) -> Self {
        ColumnDef {
            required: true,
            ..self
        }
    }
}

/// Nullable foreign key resolved on reads to the target's display column.
#[derive(Clone, Copy, Debug)]
pub struct Relation {
    /// Our FK column (also listed in `columns`).
    pub column: &'static str,
    pub target: EntityKind,
    /// Output key for the resolved display value (e.g. "NationName").
    pub resolved_as: &'static str,
}

#[derive(Debug)]
pub struct EntityDef {
    pub kind: EntityKind,
    /// Singular human label used in messages ("Character").
    pub label: &'static str,
    pub table_name: &'static str,
    pub primary_key: &'static str,
    /// Route segment under /api (e.g. "characters").
    pub path_segment: &'static str,
    /// Segment under /api/upload for image uploads (e.g. "character").
    pub upload_kind: &'static str,
    /// Column shown when another entity resolves a reference to this one.
    pub display_column: &'static str,
    /// Writable columns in declaration order. Excludes primary key and timestamps.
    pub columns: &'static [ColumnDef],
    pub relations: &'static [Relation],
    /// List ordering; primary key is always appended as the final tie-breaker.
    pub list_order: &'static [&'static str],
}

impl EntityDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.required)
    }

    /// Every persisted column with its type, in select order: pk, writable columns, timestamps.
    pub fn stored_columns(&self) -> Vec<(&'static str, ColumnType)> {
        let mut out = Vec::with_capacity(self.columns.len() + 3);
        out.push((self.primary_key, ColumnType::Integer));
        out.extend(self.columns.iter().map(|c| (c.name, c.ty)));
        out.push((CREATED_DATE, ColumnType::Timestamp));
        out.push((LAST_MODIFIED_DATE, ColumnType::Timestamp));
        out
    }
}
