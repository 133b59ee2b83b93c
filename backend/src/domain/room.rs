//! Room catalogue entries.

use std::fmt;

use thiserror::Error;

/// Validation errors returned by [`Room::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomValidationError {
    /// Identifier below one.
    #[error("room id must be a positive integer, got {0}")]
    NonPositiveId(i64),
    /// Blank name.
    #[error("room name must not be empty")]
    EmptyName,
    /// Capacity below one or too large for `u32`.
    #[error("room capacity must be at least 1, got {0}")]
    CapacityTooSmall(i64),
    /// Blank location.
    #[error("room location must not be empty")]
    EmptyLocation,
}

/// Positive room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(i64);

impl RoomId {
    /// Validate and construct a room identifier.
    pub fn new(value: i64) -> Result<Self, RoomValidationError> {
        if value <= 0 {
            return Err(RoomValidationError::NonPositiveId(value));
        }
        Ok(Self(value))
    }

    /// Raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable room.
///
/// ## Invariants
/// - `id` is positive.
/// - `name` and `location` are non-empty and trimmed.
/// - `capacity` is at least 1.
///
/// # Examples
/// ```
/// use study_rooms::domain::Room;
///
/// let room = Room::new(1, "  Room A ", 4, "Library L1").expect("valid room");
/// assert_eq!(room.name(), "Room A");
/// assert!(Room::new(2, "Room B", 0, "Library L2").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    name: String,
    capacity: u32,
    location: String,
}

impl Room {
    /// Validate and trim raw fields into a room.
    pub fn new(
        id: i64,
        name: impl AsRef<str>,
        capacity: i64,
        location: impl AsRef<str>,
    ) -> Result<Self, RoomValidationError> {
        let id = RoomId::new(id)?;
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(RoomValidationError::EmptyName);
        }
        let capacity = u32::try_from(capacity)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(RoomValidationError::CapacityTooSmall(capacity))?;
        let location = location.as_ref().trim();
        if location.is_empty() {
            return Err(RoomValidationError::EmptyLocation);
        }
        Ok(Self {
            id,
            name: name.to_owned(),
            capacity,
            location: location.to_owned(),
        })
    }

    /// Catalogue identifier.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Maximum group size.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Trimmed location.
    pub fn location(&self) -> &str {
        self.location.as_str()
    }
}

/// Catalogue seeded when no rooms file exists yet.
pub fn default_catalogue() -> Vec<Room> {
    [
        (1, "Room A", 4, "Library L1"),
        (2, "Room B", 6, "Library L2"),
        (3, "Room C", 8, "Engineering 2F"),
    ]
    .into_iter()
    .filter_map(|(id, name, capacity, location)| Room::new(id, name, capacity, location).ok())
    .collect()
}
