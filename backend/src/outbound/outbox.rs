//! File outbox standing in for confirmation e-mail delivery.
//!
//! Each confirmation becomes `outbox/booking_{id}.txt` under the data
//! directory.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::info;

use crate::domain::Confirmation;
use crate::domain::ports::{ConfirmationOutbox, ConfirmationOutboxError};
use crate::domain::timestamp::format_datetime;

/// Writes one text file per confirmation.
#[derive(Debug)]
pub struct FileOutbox {
    dir: Dir,
    root: PathBuf,
}

impl FileOutbox {
    /// Open the outbox directory, creating it if needed.
    pub fn open(outbox_dir: impl AsRef<Path>) -> io::Result<Self> {
        let root = outbox_dir.as_ref().to_path_buf();
        Dir::create_ambient_dir_all(&root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self { dir, root })
    }

    /// File name used for a booking's confirmation.
    pub fn file_name(confirmation: &Confirmation) -> String {
        format!("booking_{}.txt", confirmation.booking_id)
    }
}

/// Render the confirmation message body.
pub fn render_confirmation(confirmation: &Confirmation) -> String {
    let id = confirmation.booking_id;
    format!(
        "To: {}\nSubject: Booking Confirmation #{id}\n\nYour booking #{id} has been recorded at {}",
        confirmation.recipient(),
        format_datetime(confirmation.recorded_at),
    )
}

#[async_trait]
impl ConfirmationOutbox for FileOutbox {
    async fn write_confirmation(
        &self,
        confirmation: &Confirmation,
    ) -> Result<(), ConfirmationOutboxError> {
        let file_name = Self::file_name(confirmation);
        self.dir
            .write(&file_name, render_confirmation(confirmation))
            .map_err(|err| ConfirmationOutboxError::write(err.to_string()))?;
        info!(
            booking_id = confirmation.booking_id.0,
            path = %self.root.join(&file_name).display(),
            "wrote booking confirmation"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timestamp::combine_date_time;
    use crate::domain::{BookingId, UserId};

    fn confirmation() -> Confirmation {
        Confirmation {
            booking_id: BookingId(7),
            user_id: UserId(12),
            recorded_at: combine_date_time("2025-11-16", "08:15:30").expect("valid time"),
        }
    }

    #[test]
    fn renders_message_body() {
        assert_eq!(
            render_confirmation(&confirmation()),
            "To: user12@example.edu\nSubject: Booking Confirmation #7\n\n\
             Your booking #7 has been recorded at 2025-11-16T08:15:30"
        );
    }

    #[tokio::test]
    async fn writes_one_file_per_booking() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = temp.path().join("outbox");
        let outbox = FileOutbox::open(&root).expect("open outbox");

        outbox
            .write_confirmation(&confirmation())
            .await
            .expect("write confirmation");

        let body = std::fs::read_to_string(root.join("booking_7.txt")).expect("read file");
        assert!(body.starts_with("To: user12@example.edu\n"));
    }
}
