//! The six wiki entities. `ENTITIES` is in dependency order: every relation targets an earlier entry.

use super::types::{ColumnDef, EntityDef, EntityKind, Relation};

pub static RELIGION: EntityDef = EntityDef {
    kind: EntityKind::Religion,
    label: "Religion",
    table_name: "Religions",
    primary_key: "ReligionID",
    path_segment: "religions",
    upload_kind: "religion",
    display_column: "Name",
    columns: &[
        ColumnDef::text("Name").required(),
        ColumnDef::text("Description"),
        ColumnDef::text("Deities"),
        ColumnDef::text("HolyText"),
        ColumnDef::text("Practices"),
        ColumnDef::text("FoundingDate"),
        ColumnDef::text("Hierarchy"),
        ColumnDef::text("ImageURL"),
    ],
    relations: &[],
    list_order: &[],
};

pub static NATION: EntityDef = EntityDef {
    kind: EntityKind::Nation,
    label: "Nation",
    table_name: "Nations",
    primary_key: "NationID",
    path_segment: "nations",
    upload_kind: "nation",
    display_column: "Name",
    columns: &[
        ColumnDef::text("Name").required(),
        ColumnDef::text("Government"),
        ColumnDef::integer("CapitalLocationID"),
        ColumnDef::text("Description"),
        ColumnDef::text("FoundingDate"),
        ColumnDef::integer("MajorReligionID"),
        ColumnDef::text("Culture"),
        ColumnDef::text("Economy"),
        ColumnDef::text("MilitaryStrength"),
        ColumnDef::text("ImageURL"),
    ],
    relations: &[Relation {
        column: "MajorReligionID",
        target: EntityKind::Religion,
        resolved_as: "MajorReligionName",
    }],
    list_order: &[],
};

pub static LOCATION: EntityDef = EntityDef {
    kind: EntityKind::Location,
    label: "Location",
    table_name: "Locations",
    primary_key: "LocationID",
    path_segment: "locations",
    upload_kind: "location",
    display_column: "Name",
    columns: &[
        ColumnDef::text("Name").required(),
        ColumnDef::text("LocationType").required(),
        ColumnDef::text("Description"),
        ColumnDef::integer("NationID"),
        ColumnDef::float("CoordinateX"),
        ColumnDef::float("CoordinateY"),
        ColumnDef::text("Climate"),
        ColumnDef::integer("Population"),
    ],
    relations: &[Relation {
        column: "NationID",
        target: EntityKind::Nation,
        resolved_as: "NationName",
    }],
    list_order: &[],
};

pub static CHARACTER: EntityDef = EntityDef {
    kind: EntityKind::Character,
    label: "Character",
    table_name: "Characters",
    primary_key: "CharacterID",
    path_segment: "characters",
    upload_kind: "character",
    display_column: "Name",
    columns: &[
        ColumnDef::text("Name").required(),
        ColumnDef::text("Title"),
        ColumnDef::text("Biography"),
        ColumnDef::text("BirthDate"),
        ColumnDef::text("DeathDate"),
        ColumnDef::integer("NationID"),
        ColumnDef::integer("ReligionID"),
        ColumnDef::text("ImageURL"),
    ],
    relations: &[
        Relation {
            column: "NationID",
            target: EntityKind::Nation,
            resolved_as: "NationName",
        },
        Relation {
            column: "ReligionID",
            target: EntityKind::Religion,
            resolved_as: "ReligionName",
        },
    ],
    list_order: &[],
};

pub static EVENT: EntityDef = EntityDef {
    kind: EntityKind::Event,
    label: "Event",
    table_name: "Events",
    primary_key: "EventID",
    path_segment: "events",
    upload_kind: "event",
    display_column: "Title",
    columns: &[
        ColumnDef::text("Title").required(),
        ColumnDef::text("Description"),
        ColumnDef::text("EventDate"),
        ColumnDef::integer("LocationID"),
        ColumnDef::integer("NationID"),
    ],
    relations: &[
        Relation {
            column: "LocationID",
            target: EntityKind::Location,
            resolved_as: "LocationName",
        },
        Relation {
            column: "NationID",
            target: EntityKind::Nation,
            resolved_as: "NationName",
        },
    ],
    list_order: &["EventDate"],
};

pub static HISTORY_ENTRY: EntityDef = EntityDef {
    kind: EntityKind::HistoryEntry,
    label: "History entry",
    table_name: "HistoryEntries",
    primary_key: "HistoryID",
    path_segment: "historyEntries",
    upload_kind: "history",
    display_column: "Title",
    columns: &[
        ColumnDef::text("Title").required(),
        ColumnDef::text("Content"),
        ColumnDef::text("TimelinePeriod"),
        ColumnDef::integer("StartYear"),
        ColumnDef::integer("EndYear"),
        ColumnDef::text("Category"),
        ColumnDef::integer("NationID"),
        ColumnDef::integer("CharacterID"),
        ColumnDef::integer("EventID"),
        ColumnDef::integer("LocationID"),
        ColumnDef::integer("ReligionID"),
        ColumnDef::integer("SortOrder"),
        ColumnDef::text("ImageURL"),
    ],
    relations: &[
        Relation {
            column: "NationID",
            target: EntityKind::Nation,
            resolved_as: "NationName",
        },
        Relation {
            column: "CharacterID",
            target: EntityKind::Character,
            resolved_as: "CharacterName",
        },
        Relation {
            column: "EventID",
            target: EntityKind::Event,
            resolved_as: "EventTitle",
        },
        Relation {
            column: "LocationID",
            target: EntityKind::Location,
            resolved_as: "LocationName",
        },
        Relation {
            column: "ReligionID",
            target: EntityKind::Religion,
            resolved_as: "ReligionName",
        },
    ],
    list_order: &["SortOrder", "StartYear"],
};

pub static ENTITIES: [&EntityDef; 6] = [&RELIGION, &NATION, &LOCATION, &CHARACTER, &EVENT, &HISTORY_ENTRY];

impl EntityKind {
    pub fn def(self) -> &'static EntityDef {
        match self {
            EntityKind::Religion => &RELIGION,
            EntityKind::Nation => &NATION,
            EntityKind::Location => &LOCATION,
            EntityKind::Character => &CHARACTER,
            EntityKind::Event => &EVENT,
            EntityKind::HistoryEntry => &HISTORY_ENTRY,
        }
    }
}

pub fn entity_by_path(segment: &str) -> Option<&'static EntityDef> {
    ENTITIES.iter().copied().find(|e| e.path_segment == segment)
}

pub fn entity_by_upload_kind(kind: &str) -> Option<&'static EntityDef> {
    ENTITIES.iter().copied().find(|e| e.upload_kind == kind)
}
