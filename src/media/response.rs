//! media query request body and response normalizer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SpypointError};
use crate::json;
use crate::media::media::Media;

/// parsed `/photo/all` response: the filter context the query ran under
/// plus the matching media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaResponse {
    pub camera_id: Option<String>,
    pub camera_ids: Vec<String>,
    pub count_photos: Option<u64>,
    pub photos: Vec<Media>,
}

/// request body for the media query endpoint. unset fields are left out of
/// the serialized body entirely.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl MediaQuery {
    pub fn with_camera_ids(mut self, camera_ids: Vec<String>) -> Self {
        self.camera_ids = Some(camera_ids);
        self
    }

    pub fn with_before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// parse the `/photo/all` response body
pub fn media_response_from_json(body: &Value) -> Result<MediaResponse> {
    let photos = body
        .get("photos")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(media_from_json).collect::<Result<Vec<_>>>())
        .unwrap_or_else(|| Ok(Vec::new()))?;

    Ok(MediaResponse {
        camera_id: body
            .get("cameraId")
            .and_then(Value::as_str)
            .map(str::to_string),
        camera_ids: body
            .get("cameraIds")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        count_photos: body.get("countPhotos").and_then(Value::as_u64),
        photos,
    })
}

/// parse one media document, requiring its id
pub fn media_from_json(data: &Value) -> Result<Media> {
    let id = data
        .get("id")
        .and_then(Value::as_str)
        .ok_or(SpypointError::MissingField("id"))?;

    Ok(Media {
        id: id.to_string(),
        camera_id: data
            .get("camera")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        date: json::timestamp_field(data, "date"),
        large: data.get("large").and_then(url_from_json),
        medium: data.get("medium").and_then(url_from_json),
        small: data.get("small").and_then(url_from_json),
        hd_video: data.get("hdVideo").and_then(url_from_json),
        tags: data
            .get("tag")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        previews: previews_from_json(data.get("preview")),
        origin_date: json::timestamp_field(data, "originDate"),
        origin_name: data
            .get("originName")
            .and_then(Value::as_str)
            .map(str::to_string),
        origin_size: data.get("originSize").and_then(Value::as_u64),
    })
}

/// assets come as host and path halves, both are needed for a usable url.
/// a leading slash on the path is collapsed so either shape joins cleanly.
fn url_from_json(asset: &Value) -> Option<String> {
    let host = asset
        .get("host")
        .and_then(Value::as_str)
        .filter(|host| !host.is_empty())?;
    let path = asset
        .get("path")
        .and_then(Value::as_str)
        .filter(|path| !path.is_empty())?;
    Some(format!("https://{}/{}", host, path.trim_start_matches('/')))
}

/// previews keep whichever entries reassemble into a url and drop the rest,
/// a list that yields no urls stays absent like a missing one
fn previews_from_json(previews: Option<&Value>) -> Option<Vec<String>> {
    let entries = previews?.as_array()?;
    let urls: Vec<String> = entries.iter().filter_map(url_from_json).collect();
    if urls.is_empty() {
        return None;
    }
    Some(urls)
}
