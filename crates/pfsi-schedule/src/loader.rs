//! CSV vaccination loader.
//!
//! # CSV format
//!
//! One row per vaccination, sorted by `time`:
//!
//! ```csv
//! id,time,treat,type
//! 17,500,true,pe
//! 42,500.5,false,tb
//! ```
//!
//! | Column  | Meaning                                          |
//! |---------|--------------------------------------------------|
//! | `id`    | `HumanId`                                        |
//! | `time`  | simulated day (may be fractional)                |
//! | `treat` | `true`/`false` (or `1`/`0`): also treat clinically |
//! | `type`  | `pe` (pre-erythrocytic) or `tb` (transmission-blocking) |

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use pfsi_core::{HumanId, Time};
use pfsi_human::VaccineKind;

use crate::{ScheduleError, VaccinationEvent, VaccinationFeed};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VaccinationRecord {
    id:    u32,
    time:  f64,
    treat: String,
    #[serde(rename = "type")]
    kind:  String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`VaccinationFeed`] from a CSV file.
pub fn load_vaccinations_csv(path: &Path) -> Result<VaccinationFeed, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_vaccinations_reader(file)
}

/// Like [`load_vaccinations_csv`] but accepts any `Read` source.
pub fn load_vaccinations_reader<R: Read>(reader: R) -> Result<VaccinationFeed, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut events = Vec::new();

    for (row, result) in csv_reader.deserialize::<VaccinationRecord>().enumerate() {
        let r = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        events.push(VaccinationEvent {
            id:    HumanId(r.id),
            time:  Time(r.time),
            treat: parse_flag(&r.treat, row)?,
            kind:  r.kind.parse::<VaccineKind>()?,
        });
    }

    debug!("loaded {} vaccination events", events.len());
    VaccinationFeed::new(events)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_flag(s: &str, row: usize) -> Result<bool, ScheduleError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ScheduleError::Parse(format!(
            "row {row}: invalid treat flag {other:?}: expected true/false or 1/0"
        ))),
    }
}
