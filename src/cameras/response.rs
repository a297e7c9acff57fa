//! normalizers for the camera endpoints. these are total functions: apart
//! from a missing camera id, every oddity in the payload degrades to an
//! absent field instead of an error, because the service's schema has
//! drifted several times in the wild.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cameras::camera::{
    Camera, Coordinates, PhotoAllowance, Plan, Subscription, Temperature,
};
use crate::error::{Result, SpypointError};
use crate::json;

/// parse the `/camera/all` response body
pub fn cameras_from_json(body: &Value) -> Result<Vec<Camera>> {
    let entries = body
        .as_array()
        .ok_or_else(|| SpypointError::InvalidResponse("expected a camera array".to_string()))?;
    entries.iter().map(camera_from_json).collect()
}

/// parse one camera document, requiring its id
pub fn camera_from_json(data: &Value) -> Result<Camera> {
    let id = data
        .get("id")
        .and_then(Value::as_str)
        .ok_or(SpypointError::MissingField("id"))?;
    Ok(camera_with_id(id, data))
}

/// parse a camera document whose id is known out of band. shared camera
/// detail payloads carry no id of their own, the caller supplies the one
/// it fetched by.
pub fn camera_with_id(id: &str, data: &Value) -> Camera {
    Camera {
        id: id.to_string(),
        name: string_at(data, "/config/name").unwrap_or_default(),
        model: string_at(data, "/status/model").unwrap_or_default(),
        modem_firmware: string_at(data, "/status/modemFirmware").unwrap_or_default(),
        camera_firmware: string_at(data, "/status/version").unwrap_or_default(),
        last_update_time: timestamp_at(data, "/status/lastUpdate"),
        activation_date: timestamp_at(data, "/activationDate"),
        creation_date: timestamp_at(data, "/creationDate"),
        install_date: timestamp_at(data, "/installDate"),
        signal: data
            .pointer("/status/signal/processed/percentage")
            .and_then(Value::as_f64),
        temperature: temperature_from_json(data.pointer("/status/temperature")),
        battery: battery_from_json(data.pointer("/status/batteries")),
        battery_type: string_at(data, "/status/batteryType"),
        memory: memory_from_json(data.pointer("/status/memory")),
        memory_size: data.pointer("/status/memory/size").and_then(Value::as_u64),
        notifications: notifications_from_json(data.pointer("/status/notifications")),
        owner: owner_from_json(data.get("ownerFirstName")),
        coordinates: coordinates_from_json(data.pointer("/status/coordinates")),
        subscriptions: subscriptions_from_json(data.get("subscriptions")),
        capture_mode: string_at(data, "/config/captureMode"),
        motion_delay: data.pointer("/config/motionDelay").and_then(Value::as_i64),
        multi_shot: data.pointer("/config/multiShot").and_then(Value::as_i64),
        operation_mode: string_at(data, "/config/operationMode"),
        quality: string_at(data, "/config/quality"),
        sensibility: value_at(data, "/config/sensibility"),
        time_format: data.pointer("/config/timeFormat").and_then(Value::as_i64),
        time_lapse: data.pointer("/config/timeLapse").and_then(Value::as_i64),
        transmit_auto: data.pointer("/config/transmitAuto").and_then(Value::as_bool),
        transmit_freq: data.pointer("/config/transmitFreq").and_then(Value::as_i64),
        transmit_time: value_at(data, "/config/transmitTime"),
    }
}

/// pull the camera ids out of the `/shared-cameras/all` response, which
/// groups them per sharing account
pub fn shared_camera_ids_from_json(body: &Value) -> Vec<String> {
    let groups = match body.as_array() {
        Some(groups) => groups,
        None => return Vec::new(),
    };

    groups
        .iter()
        .filter_map(|group| group.get("sharedCameras").and_then(Value::as_array))
        .flatten()
        .filter_map(|entry| entry.get("cameraId").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn string_at(data: &Value, pointer: &str) -> Option<String> {
    data.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn timestamp_at(data: &Value, pointer: &str) -> Option<DateTime<Utc>> {
    data.pointer(pointer)
        .and_then(Value::as_str)
        .and_then(json::parse_timestamp)
}

fn value_at(data: &Value, pointer: &str) -> Option<Value> {
    data.pointer(pointer).filter(|v| !v.is_null()).cloned()
}

fn temperature_from_json(temperature: Option<&Value>) -> Option<Temperature> {
    let temperature = temperature?;
    let value = temperature.get("value").and_then(Value::as_f64)?;
    let unit = temperature.get("unit").and_then(Value::as_str)?;
    Some(Temperature {
        value,
        unit: unit.to_string(),
    })
}

/// the service reports one charge level per physical cell, the camera level
/// is the best of them
fn battery_from_json(batteries: Option<&Value>) -> Option<f64> {
    batteries?
        .as_array()?
        .iter()
        .filter_map(Value::as_f64)
        .reduce(f64::max)
}

fn memory_from_json(memory: Option<&Value>) -> Option<f64> {
    let memory = memory?;
    let size = memory.get("size").and_then(Value::as_f64)?;
    if size == 0.0 {
        // a zero sized card cannot have a usage percentage
        return None;
    }
    let used = memory.get("used").and_then(Value::as_f64)?;
    Some(round2(used / size * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// notifications arrive as a mix of plain tags and structured objects,
/// objects are kept as their compact json rendering
fn notifications_from_json(notifications: Option<&Value>) -> Option<Vec<String>> {
    let entries = notifications?.as_array()?;
    Some(
        entries
            .iter()
            .map(|entry| match entry {
                Value::String(tag) => tag.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn owner_from_json(owner: Option<&Value>) -> Option<String> {
    owner
        .and_then(Value::as_str)
        .map(|name| name.trim().to_string())
}

/// coordinates are a list of geojson positions. only a first entry of type
/// `Point` with exactly two components counts, and the wire order is
/// (longitude, latitude).
fn coordinates_from_json(coordinates: Option<&Value>) -> Option<Coordinates> {
    let first = coordinates?.as_array()?.first()?;
    let position = first.get("position")?;
    if position.get("type").and_then(Value::as_str) != Some("Point") {
        return None;
    }
    let pair = position.get("coordinates")?.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    Some(Coordinates {
        latitude: pair[1].as_f64()?,
        longitude: pair[0].as_f64()?,
    })
}

fn subscriptions_from_json(subscriptions: Option<&Value>) -> Vec<Subscription> {
    let entries = match subscriptions.and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };
    entries.iter().map(subscription_from_json).collect()
}

fn subscription_from_json(data: &Value) -> Subscription {
    Subscription {
        payment_frequency: data
            .get("paymentFrequency")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        is_free: data.get("isFree").and_then(Value::as_bool).unwrap_or(false),
        start_date_billing_cycle: json::timestamp_field(data, "startDateBillingCycle"),
        end_date_billing_cycle: json::timestamp_field(data, "endDateBillingCycle"),
        month_end_billing_cycle: json::timestamp_field(data, "monthEndBillingCycle"),
        photo_count: count_field(data, "photoCount"),
        hd_photo_count: count_field(data, "hdPhotoCount"),
        photo_limit: count_field(data, "photoLimit"),
        hd_photo_limit: count_field(data, "hdPhotoLimit"),
        is_auto_renew: data
            .get("isAutoRenew")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        plan: data
            .get("plan")
            .filter(|plan| !plan.is_null())
            .map(plan_from_json),
    }
}

/// counts arrive as json numbers with no upper bound, anything past u32 is
/// clamped rather than wrapped
fn count_field(data: &Value, key: &str) -> u32 {
    data.get(key)
        .and_then(Value::as_u64)
        .map_or(0, |count| u32::try_from(count).unwrap_or(u32::MAX))
}

fn plan_from_json(plan: &Value) -> Plan {
    let allowance = plan
        .get("photoCountPerMonth")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    Plan {
        name: plan
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        is_active: plan
            .get("isActive")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        is_free: plan.get("isFree").and_then(Value::as_bool).unwrap_or(false),
        photo_count_per_month: match allowance {
            0 => PhotoAllowance::Unlimited,
            count => PhotoAllowance::Limited(u32::try_from(count).unwrap_or(u32::MAX)),
        },
    }
}
