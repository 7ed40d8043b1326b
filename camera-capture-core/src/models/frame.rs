use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An immutable encoded still image produced by a capture request.
///
/// Held by the session while in the `Captured` state and handed to the
/// surrounding application for display or discard. Never persisted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded pixels.
    pub encoded: Vec<u8>,
    /// SHA-256 of `encoded`, hex. Identical inputs yield identical frames,
    /// so the checksum doubles as a reproducibility witness.
    pub checksum: String,
}

impl CapturedFrame {
    pub fn new(width: u32, height: u32, encoded: Vec<u8>) -> Self {
        let checksum = format!("{:x}", Sha256::digest(&encoded));
        Self {
            width,
            height,
            encoded,
            checksum,
        }
    }

    pub fn metadata(&self) -> FrameMetadata {
        FrameMetadata {
            id: uuid::Uuid::new_v4().to_string(),
            width: self.width,
            height: self.height,
            byte_len: self.encoded.len(),
            checksum: self.checksum.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Serializable description of a captured frame, for handing to the
/// surrounding application (the frame bytes themselves stay out of JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMetadata {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub byte_len: usize,
    pub checksum: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_stable_for_identical_bytes() {
        let a = CapturedFrame::new(2, 2, vec![1, 2, 3, 4]);
        let b = CapturedFrame::new(2, 2, vec![1, 2, 3, 4]);
        assert_eq!(a.checksum, b.checksum);
        assert_eq!(a, b);
    }

    #[test]
    fn checksum_tracks_content() {
        let a = CapturedFrame::new(2, 2, vec![1, 2, 3, 4]);
        let b = CapturedFrame::new(2, 2, vec![1, 2, 3, 5]);
        assert_ne!(a.checksum, b.checksum);
    }

    #[test]
    fn metadata_round_trips_as_json() {
        let frame = CapturedFrame::new(640, 480, vec![0; 16]);
        let meta = frame.metadata();
        let json = serde_json::to_string(&meta).unwrap();
        let back: FrameMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, back);
    }
}
