use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// one photo or video, with its asset urls already reassembled from the
/// host and path halves the service sends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: String,
    /// id of the camera that captured it
    pub camera_id: String,
    pub date: Option<DateTime<Utc>>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub hd_video: Option<String>,
    pub tags: Vec<String>,
    pub previews: Option<Vec<String>>,
    /// capture timestamp as recorded on the camera itself
    pub origin_date: Option<DateTime<Utc>>,
    pub origin_name: Option<String>,
    pub origin_size: Option<u64>,
}
