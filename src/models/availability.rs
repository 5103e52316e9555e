use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::appointment::time_hhmm::FORMAT;
use super::HasId;

/// One weekday's availability. Persisted as `[]` (unavailable) or a
/// two-element `["HH:MM", "HH:MM"]` start/end pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayWindow(Option<(NaiveTime, NaiveTime)>);

impl DayWindow {
    pub fn open(start: NaiveTime, end: NaiveTime) -> Self {
        Self(Some((start, end)))
    }

    pub fn closed() -> Self {
        Self(None)
    }

    pub fn window(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.0
    }
}

impl Serialize for DayWindow {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some((start, end)) => {
                [start.format(FORMAT).to_string(), end.format(FORMAT).to_string()].serialize(ser)
            }
            None => Vec::<String>::new().serialize(ser),
        }
    }
}

impl<'de> Deserialize<'de> for DayWindow {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(de)?;
        if raw.len() != 2 {
            return Ok(Self(None));
        }
        // A malformed pair reads as "unavailable" rather than failing the
        // whole collection.
        match (
            NaiveTime::parse_from_str(&raw[0], FORMAT),
            NaiveTime::parse_from_str(&raw[1], FORMAT),
        ) {
            (Ok(start), Ok(end)) => Ok(Self(Some((start, end)))),
            _ => Ok(Self(None)),
        }
    }
}

/// Per-doctor weekday -> window mapping. Defaults to fully unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyTemplate {
    pub monday: DayWindow,
    pub tuesday: DayWindow,
    pub wednesday: DayWindow,
    pub thursday: DayWindow,
    pub friday: DayWindow,
    pub saturday: DayWindow,
    pub sunday: DayWindow,
}

impl WeeklyTemplate {
    /// Window for a calendar weekday, resolved independently of host locale.
    pub fn window_for(&self, weekday: Weekday) -> Option<(NaiveTime, NaiveTime)> {
        match weekday {
            Weekday::Mon => self.monday.window(),
            Weekday::Tue => self.tuesday.window(),
            Weekday::Wed => self.wednesday.window(),
            Weekday::Thu => self.thursday.window(),
            Weekday::Fri => self.friday.window(),
            Weekday::Sat => self.saturday.window(),
            Weekday::Sun => self.sunday.window(),
        }
    }

    pub fn set_window(&mut self, weekday: Weekday, window: DayWindow) {
        let slot = match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = window;
    }
}

/// The stored availability record: at most one per doctor (upsert semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAvailability {
    pub id: String,
    pub doctor_id: String,
    pub availability: WeeklyTemplate,
    pub updated_at: DateTime<Utc>,
}

impl HasId for DoctorAvailability {
    fn id(&self) -> &str {
        &self.id
    }
}
