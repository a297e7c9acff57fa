use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// gps position reported by a camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// temperature reading in whatever unit the service reported, the unit is
/// passed through rather than normalized so callers can display native units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: f64,
    pub unit: String,
}

/// monthly photo allowance on a plan. the service encodes unlimited plans as
/// a count of zero, which is kept distinct from a real zero here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PhotoAllowance {
    Unlimited,
    Limited(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub is_active: bool,
    pub is_free: bool,
    pub photo_count_per_month: PhotoAllowance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub payment_frequency: String,
    pub is_free: bool,
    pub start_date_billing_cycle: Option<DateTime<Utc>>,
    pub end_date_billing_cycle: Option<DateTime<Utc>>,
    pub month_end_billing_cycle: Option<DateTime<Utc>>,
    pub photo_count: u32,
    pub hd_photo_count: u32,
    pub photo_limit: u32,
    pub hd_photo_limit: u32,
    pub is_auto_renew: bool,
    pub plan: Option<Plan>,
}

/// one camera on the account, normalized from the service's loose json.
/// only `id` is guaranteed, everything else degrades to empty or absent
/// when the service omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub model: String,
    pub modem_firmware: String,
    pub camera_firmware: String,
    /// when the camera last checked in, drives [`Camera::is_online`]
    pub last_update_time: Option<DateTime<Utc>>,
    pub activation_date: Option<DateTime<Utc>>,
    pub creation_date: Option<DateTime<Utc>>,
    pub install_date: Option<DateTime<Utc>>,
    /// cellular signal strength in percent
    pub signal: Option<f64>,
    pub temperature: Option<Temperature>,
    /// best charge level across the installed cells, in percent
    pub battery: Option<f64>,
    pub battery_type: Option<String>,
    /// sd card usage in percent
    pub memory: Option<f64>,
    pub memory_size: Option<u64>,
    pub notifications: Option<Vec<String>>,
    pub owner: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub subscriptions: Vec<Subscription>,
    pub capture_mode: Option<String>,
    pub motion_delay: Option<i64>,
    pub multi_shot: Option<i64>,
    pub operation_mode: Option<String>,
    pub quality: Option<String>,
    pub sensibility: Option<Value>,
    pub time_format: Option<i64>,
    pub time_lapse: Option<i64>,
    pub transmit_auto: Option<bool>,
    pub transmit_freq: Option<i64>,
    pub transmit_time: Option<Value>,
}

impl Camera {
    /// whether the camera has checked in within the last 24 hours, judged
    /// against the wall clock at call time. a camera with no known last
    /// update reads as offline.
    pub fn is_online(&self) -> bool {
        self.is_online_at(Utc::now())
    }

    pub(crate) fn is_online_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_update_time {
            Some(last_update) => now - last_update <= Duration::hours(24),
            None => false,
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Camera(id={}, name={}, model={}, online={})",
            self.id,
            self.name,
            self.model,
            self.is_online()
        )
    }
}
