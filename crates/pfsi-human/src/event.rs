//! Human event kinds and their scheduling categories.

use std::fmt;

use crate::HumanError;

/// A pending occurrence in one human's life.
///
/// Variant order is the processing order for one human's events that share
/// an instant.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum HumanEvent {
    /// Come back home from a trip.
    Return,
    /// Leave home on a trip.
    Depart,
    /// Daily biting draw at the current location.
    Bite,
    /// Latent period over: blood-stage infection begins.
    InfectionOnset,
    /// Natural clearance of an untreated infection.
    Clearance,
    Fever,
    Treatment,
    EndProphylaxis,
    PeWane,
    TbWane,
}

/// Independent event slots per human.  Scheduling into a category replaces
/// whatever was pending there.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventCategory {
    Trip,
    Bite,
    InfectionOnset,
    Clearance,
    Fever,
    Treatment,
    EndProphylaxis,
    PeWane,
    TbWane,
}

impl EventCategory {
    pub const COUNT: usize = 9;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl HumanEvent {
    #[inline]
    pub fn category(self) -> EventCategory {
        match self {
            HumanEvent::Return | HumanEvent::Depart => EventCategory::Trip,
            HumanEvent::Bite => EventCategory::Bite,
            HumanEvent::InfectionOnset => EventCategory::InfectionOnset,
            HumanEvent::Clearance => EventCategory::Clearance,
            HumanEvent::Fever => EventCategory::Fever,
            HumanEvent::Treatment => EventCategory::Treatment,
            HumanEvent::EndProphylaxis => EventCategory::EndProphylaxis,
            HumanEvent::PeWane => EventCategory::PeWane,
            HumanEvent::TbWane => EventCategory::TbWane,
        }
    }
}

impl fmt::Display for HumanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Protective mechanism delivered by a vaccination event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VaccineKind {
    /// Blocks inoculation of the vaccinated human.
    PreErythrocytic,
    /// Blocks infection of mosquitoes feeding on the vaccinated human.
    TransmissionBlocking,
}

impl VaccineKind {
    pub fn tag(self) -> &'static str {
        match self {
            VaccineKind::PreErythrocytic => "pe",
            VaccineKind::TransmissionBlocking => "tb",
        }
    }
}

impl std::str::FromStr for VaccineKind {
    type Err = HumanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pe" => Ok(VaccineKind::PreErythrocytic),
            "tb" => Ok(VaccineKind::TransmissionBlocking),
            other => Err(HumanError::UnknownVaccine(other.to_string())),
        }
    }
}
