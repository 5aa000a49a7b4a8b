//! Room document and room state machine.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::money::Money;

/// Category of a room, driving capacity and pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
}

impl RoomType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Suite => "suite",
            RoomType::Deluxe => "deluxe",
        }
    }

    /// Parses a type from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(RoomType::Single),
            "double" => Some(RoomType::Double),
            "suite" => Some(RoomType::Suite),
            "deluxe" => Some(RoomType::Deluxe),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The operational state of a room.
///
/// `Available` and `Occupied` track the reservation lifecycle; `Cleaning`
/// and `Maintenance` are housekeeping states set between stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Cleaning,
    Maintenance,
}

impl RoomStatus {
    /// Returns true if a guest can be checked into the room.
    pub fn can_host_check_in(&self) -> bool {
        !matches!(self, RoomStatus::Occupied)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Cleaning => "cleaning",
            RoomStatus::Maintenance => "maintenance",
        }
    }

    /// Parses a status from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(RoomStatus::Available),
            "occupied" => Some(RoomStatus::Occupied),
            "cleaning" => Some(RoomStatus::Cleaning),
            "maintenance" => Some(RoomStatus::Maintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room inventory document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: EntityId,

    /// Human-facing room number, globally unique across the property.
    pub number: String,

    /// Room category.
    pub room_type: RoomType,

    /// Nightly rate.
    pub price_per_night: Money,

    /// Floor the room is on.
    pub floor: u32,

    /// Number of beds.
    pub beds: u32,

    /// Current operational state.
    pub status: RoomStatus,
}

impl Room {
    /// Creates a new available room, validating rate and bed count.
    pub fn new(
        number: impl Into<String>,
        room_type: RoomType,
        price_per_night: Money,
        floor: u32,
        beds: u32,
    ) -> Result<Self, DomainError> {
        if !price_per_night.is_positive() {
            return Err(DomainError::NonPositiveAmount {
                cents: price_per_night.cents(),
            });
        }
        if beds == 0 {
            return Err(DomainError::InvalidBedCount { beds });
        }

        Ok(Self {
            id: EntityId::new(),
            number: number.into(),
            room_type,
            price_per_night,
            floor,
            beds,
            status: RoomStatus::Available,
        })
    }
}
