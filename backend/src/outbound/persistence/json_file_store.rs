//! JSON file store backing the room and booking repositories.
//!
//! Layout under the data directory:
//!
//! ```text
//! rooms.json      seeded with the default catalogue when missing
//! bookings.json   seeded with [] when missing
//! ```
//!
//! Files are written pretty-printed with a two-space indent through
//! [`write_atomic`].

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::atomic_io::write_atomic;
use super::records::{BookingRecord, RecordError, RoomRecord, booking_from_value, room_from_value};
use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, RoomRepository, RoomRepositoryError,
};
use crate::domain::{Booking, Room, default_catalogue};

pub(crate) const ROOMS_FILE: &str = "rooms.json";
pub(crate) const BOOKINGS_FILE: &str = "bookings.json";

/// File-backed implementation of [`RoomRepository`] and [`BookingRepository`].
#[derive(Debug)]
pub struct JsonFileStore {
    dir: Dir,
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if necessary) the data directory and seed missing files.
    ///
    /// # Examples
    /// ```no_run
    /// use study_rooms::outbound::persistence::JsonFileStore;
    ///
    /// let store = JsonFileStore::open("./data").expect("data dir is writable");
    /// assert!(store.root().ends_with("data"));
    /// ```
    pub fn open(data_dir: impl AsRef<Path>) -> io::Result<Self> {
        let root = data_dir.as_ref().to_path_buf();
        Dir::create_ambient_dir_all(&root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        let store = Self { dir, root };
        store.seed()?;
        Ok(store)
    }

    /// Data directory this store writes to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn seed(&self) -> io::Result<()> {
        if !self.dir.try_exists(ROOMS_FILE)? {
            let rooms = default_catalogue();
            let records: Vec<RoomRecord<'_>> = rooms.iter().map(RoomRecord::from).collect();
            write_atomic(&self.dir, ROOMS_FILE, &to_pretty_json(&records)?)?;
            info!(path = %self.root.join(ROOMS_FILE).display(), "seeded default rooms");
        }
        if !self.dir.try_exists(BOOKINGS_FILE)? {
            write_atomic(&self.dir, BOOKINGS_FILE, "[]")?;
        }
        Ok(())
    }

    /// Read a JSON array, treating a missing or malformed file as empty.
    fn read_entries(&self, file_name: &str) -> io::Result<Vec<Value>> {
        let text = match self.dir.read_to_string(file_name) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(other) => {
                warn!(
                    file = file_name,
                    kind = json_kind(&other),
                    "expected a JSON array; treating as empty"
                );
                Ok(Vec::new())
            }
            Err(err) => {
                warn!(file = file_name, error = %err, "JSON parse error; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write_entries<T: Serialize>(&self, file_name: &str, entries: &[T]) -> io::Result<()> {
        write_atomic(&self.dir, file_name, &to_pretty_json(entries)?)
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn log_skipped(file: &str, index: usize, reason: &RecordError) {
    warn!(file, index, reason = %reason, "skipping invalid record");
}

/// Normalise room entries, dropping invalid ones and later duplicates.
pub(crate) fn normalise_rooms(entries: &[Value]) -> Vec<Room> {
    let mut seen = HashSet::new();
    let mut rooms = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match room_from_value(entry) {
            Ok(room) if !seen.insert(room.id()) => {
                warn!(room_id = room.id().get(), "duplicate room id ignored; keeping first");
            }
            Ok(room) => rooms.push(room),
            Err(reason) => log_skipped(ROOMS_FILE, index, &reason),
        }
    }
    rooms.sort_by_key(Room::id);
    rooms
}

/// Normalise booking entries, dropping invalid ones.
pub(crate) fn normalise_bookings(entries: &[Value]) -> Vec<Booking> {
    let mut bookings: Vec<Booking> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            booking_from_value(entry)
                .inspect_err(|reason| log_skipped(BOOKINGS_FILE, index, reason))
                .ok()
        })
        .collect();
    bookings.sort_by_key(|booking| booking.id);
    bookings
}

#[async_trait]
impl RoomRepository for JsonFileStore {
    async fn load_rooms(&self) -> Result<Vec<Room>, RoomRepositoryError> {
        let entries = self
            .read_entries(ROOMS_FILE)
            .map_err(|err| RoomRepositoryError::io(err.to_string()))?;
        Ok(normalise_rooms(&entries))
    }

    async fn save_rooms(&self, rooms: &[Room]) -> Result<(), RoomRepositoryError> {
        let records: Vec<RoomRecord<'_>> = rooms.iter().map(RoomRecord::from).collect();
        self.write_entries(ROOMS_FILE, &records)
            .map_err(|err| RoomRepositoryError::io(err.to_string()))
    }
}

#[async_trait]
impl BookingRepository for JsonFileStore {
    async fn load_bookings(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        let entries = self
            .read_entries(BOOKINGS_FILE)
            .map_err(|err| BookingRepositoryError::io(err.to_string()))?;
        Ok(normalise_bookings(&entries))
    }

    async fn save_bookings(&self, bookings: &[Booking]) -> Result<(), BookingRepositoryError> {
        let records: Vec<BookingRecord> = bookings.iter().map(BookingRecord::from).collect();
        self.write_entries(BOOKINGS_FILE, &records)
            .map_err(|err| BookingRepositoryError::io(err.to_string()))
    }
}
