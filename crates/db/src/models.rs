//! Entity schemas, one input type per table plus the stored [`Row`] shape.
//!
//! Input types (`NewPlot`, …) carry only the business fields a client may
//! submit. The store assigns `id` and `created_at`; those only exist on
//! [`Row`]. Unknown keys in a payload, including a client-supplied `id`, are
//! dropped during deserialisation and never reach the store.
//!
//! No cross-field checks happen here: a planting may be harvested before it
//! is sown and a quantity may be negative.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::Table;

/// Ties an input type to its table and to the type of its primary key.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Primary key type assigned by the store.
    type Id: Serialize + DeserializeOwned + Send + Sync + 'static;

    const TABLE: Table;
}

/// A persisted entity: server-assigned fields plus the submitted ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row<I, T> {
    pub id: I,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: T,
}

/// Output type of [`Entity`] `E`.
pub type Stored<E> = Row<<E as Entity>::Id, E>;

pub type Profile = Stored<NewProfile>;
pub type Plot = Stored<NewPlot>;
pub type Bed = Stored<NewBed>;
pub type Crop = Stored<NewCrop>;
pub type Planting = Stored<NewPlanting>;
pub type RecurringTask = Stored<NewRecurringTask>;
pub type ScheduledTask = Stored<NewScheduledTask>;

// ---------------------------------------------------------------------------
// profiles
// ---------------------------------------------------------------------------

/// A user profile; every other entity is owned by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub name: String,
}

impl Entity for NewProfile {
    type Id = Uuid;
    const TABLE: Table = Table::Profiles;
}

// ---------------------------------------------------------------------------
// plots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlot {
    pub profile_id: Uuid,
    pub name: String,
    pub location: String,
    pub notes: String,
}

impl Entity for NewPlot {
    type Id = i64;
    const TABLE: Table = Table::Plots;
}

// ---------------------------------------------------------------------------
// beds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBed {
    pub profile_id: Uuid,
    pub name: String,
    /// Bed area, in whatever unit the owner works in.
    pub size: f64,
    pub description: String,
}

impl Entity for NewBed {
    type Id = i64;
    const TABLE: Table = Table::Beds;
}

// ---------------------------------------------------------------------------
// crops
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCrop {
    pub profile_id: Uuid,
    pub name: String,
    pub description: String,
    pub planting_season: String,
}

impl Entity for NewCrop {
    type Id = i64;
    const TABLE: Table = Table::Crops;
}

// ---------------------------------------------------------------------------
// plantings
// ---------------------------------------------------------------------------

/// A crop planted in a bed, with its growing calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlanting {
    pub profile_id: Uuid,
    pub bed_id: i64,
    pub crop_id: i64,
    pub sow_date: NaiveDate,
    pub plant_date: NaiveDate,
    pub harvest_start: NaiveDate,
    pub harvest_end: NaiveDate,
    pub quantity: i32,
}

impl Entity for NewPlanting {
    type Id = i64;
    const TABLE: Table = Table::Plantings;
}

// ---------------------------------------------------------------------------
// tasks
// ---------------------------------------------------------------------------

/// Unit of a task's repeat interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatUnit {
    Day,
    Week,
    Month,
    Year,
}

/// A task template that repeats every `repeat_interval` `repeat_unit`s,
/// `repeat_number` times.
///
/// The target references are all optional: a task may concern a single crop,
/// a bed, a whole plot or one planting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecurringTask {
    pub profile_id: Uuid,
    #[serde(default)]
    pub crop_id: Option<i64>,
    #[serde(default)]
    pub bed_id: Option<i64>,
    #[serde(default)]
    pub plot_id: Option<i64>,
    #[serde(default)]
    pub planting_id: Option<i64>,
    pub description: String,
    pub repeat_interval: i32,
    pub repeat_unit: RepeatUnit,
    pub repeat_number: i32,
}

impl Entity for NewRecurringTask {
    type Id = i64;
    const TABLE: Table = Table::RecurringTasks;
}

/// A concrete task due on a given date, optionally spawned by a
/// [`RecurringTask`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScheduledTask {
    pub profile_id: Uuid,
    #[serde(default)]
    pub crop_id: Option<i64>,
    #[serde(default)]
    pub bed_id: Option<i64>,
    #[serde(default)]
    pub plot_id: Option<i64>,
    #[serde(default)]
    pub planting_id: Option<i64>,
    #[serde(default)]
    pub recurring_task_id: Option<i64>,
    pub description: String,
    pub due_date: NaiveDate,
    pub completed: bool,
    pub is_repeating: bool,
    #[serde(default)]
    pub repeat_interval: Option<i32>,
    #[serde(default)]
    pub repeat_unit: Option<RepeatUnit>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Entity for NewScheduledTask {
    type Id = i64;
    const TABLE: Table = Table::ScheduledTasks;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plot_input_requires_every_business_field() {
        let missing_notes = json!({
            "profile_id": "6f1c2d7e-3b7a-4a39-9f43-0b4c8d6a1e20",
            "name": "North plot",
            "location": "Gate 3",
        });
        let err = serde_json::from_value::<NewPlot>(missing_notes).unwrap_err();
        assert!(err.to_string().contains("notes"), "{err}");
    }

    #[test]
    fn wrong_primitive_type_is_rejected() {
        let bad = json!({
            "profile_id": "6f1c2d7e-3b7a-4a39-9f43-0b4c8d6a1e20",
            "name": "Raised bed",
            "size": "large",
            "description": "",
        });
        assert!(serde_json::from_value::<NewBed>(bad).is_err());

        let bad_uuid = json!({ "profile_id": "not-a-uuid", "name": "x", "location": "y", "notes": "z" });
        assert!(serde_json::from_value::<NewPlot>(bad_uuid).is_err());
    }

    #[test]
    fn client_supplied_id_and_created_at_are_dropped() {
        let input: NewProfile = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "created_at": "2024-01-01T00:00:00Z",
            "name": "Ada",
        }))
        .unwrap();

        assert_eq!(serde_json::to_value(&input).unwrap(), json!({ "name": "Ada" }));
    }

    #[test]
    fn planting_dates_parse_without_ordering_checks() {
        let planting: NewPlanting = serde_json::from_value(json!({
            "profile_id": "6f1c2d7e-3b7a-4a39-9f43-0b4c8d6a1e20",
            "bed_id": 1,
            "crop_id": 2,
            "sow_date": "2024-05-01",
            "plant_date": "2024-04-01",
            "harvest_start": "2024-03-01",
            "harvest_end": "2024-02-01",
            "quantity": -4,
        }))
        .unwrap();

        assert_eq!(planting.sow_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(planting.quantity, -4);
    }

    #[test]
    fn scheduled_task_optional_fields_default_to_null() {
        let task: NewScheduledTask = serde_json::from_value(json!({
            "profile_id": "6f1c2d7e-3b7a-4a39-9f43-0b4c8d6a1e20",
            "description": "Water the beans",
            "due_date": "2024-06-10",
            "completed": false,
            "is_repeating": false,
        }))
        .unwrap();

        assert_eq!(task.recurring_task_id, None);
        assert_eq!(task.repeat_unit, None);
        let wire = serde_json::to_value(&task).unwrap();
        assert_eq!(wire.get("end_date"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn stored_rows_always_carry_every_key() {
        let bare: ScheduledTask = serde_json::from_value(json!({
            "id": 7,
            "created_at": "2024-06-01T08:00:00Z",
            "profile_id": "6f1c2d7e-3b7a-4a39-9f43-0b4c8d6a1e20",
            "description": "Water the beans",
            "due_date": "2024-06-10",
            "completed": false,
            "is_repeating": false,
        }))
        .unwrap();
        let mut full = bare.clone();
        full.fields.recurring_task_id = Some(3);
        full.fields.repeat_interval = Some(1);
        full.fields.repeat_unit = Some(RepeatUnit::Week);
        full.fields.end_date = NaiveDate::from_ymd_opt(2024, 8, 1);

        let keys = |row: &ScheduledTask| {
            let value = serde_json::to_value(row).unwrap();
            let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
            keys.sort();
            keys
        };
        assert_eq!(keys(&bare), keys(&full));

        let wire = serde_json::to_value(&bare).unwrap();
        assert_eq!(wire["repeat_unit"], serde_json::Value::Null);
        assert_eq!(wire["end_date"], serde_json::Value::Null);
    }

    #[test]
    fn repeat_unit_is_lowercase_on_the_wire() {
        let task: NewRecurringTask = serde_json::from_value(json!({
            "profile_id": "6f1c2d7e-3b7a-4a39-9f43-0b4c8d6a1e20",
            "bed_id": 3,
            "description": "Weed",
            "repeat_interval": 2,
            "repeat_unit": "week",
            "repeat_number": 10,
        }))
        .unwrap();
        assert_eq!(task.repeat_unit, RepeatUnit::Week);

        let unknown = json!({
            "profile_id": "6f1c2d7e-3b7a-4a39-9f43-0b4c8d6a1e20",
            "description": "Weed",
            "repeat_interval": 2,
            "repeat_unit": "fortnight",
            "repeat_number": 10,
        });
        assert!(serde_json::from_value::<NewRecurringTask>(unknown).is_err());
    }

    #[test]
    fn stored_row_decodes_store_output() {
        let row: Plot = serde_json::from_value(json!({
            "id": 12,
            "created_at": "2024-03-01T09:30:00.123456+00:00",
            "profile_id": "6f1c2d7e-3b7a-4a39-9f43-0b4c8d6a1e20",
            "name": "North plot",
            "location": "Gate 3",
            "notes": "",
        }))
        .unwrap();

        assert_eq!(row.id, 12);
        assert_eq!(row.fields.name, "North plot");
    }

    #[test]
    fn stored_row_without_id_is_rejected() {
        let row = json!({
            "created_at": "2024-03-01T09:30:00Z",
            "name": "Ada",
        });
        assert!(serde_json::from_value::<Profile>(row).is_err());
    }
}
