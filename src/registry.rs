//! # DCP Device Registry
//!
//! Collects identify responses keyed by the responding station's MAC address.
//! A receive loop calls [`DeviceRegistry::observe`] for every decoded frame;
//! status endpoints read snapshots. The map sits behind a single
//! `tokio::sync::RwLock`, so any number of readers can run while one writer
//! updates it, and clones of the registry share the same map.

use crate::dcp::{Frame, MacAddr};
use log::{debug, info};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// A station that answered an identify request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub frame: Frame,
    pub last_seen: SystemTime,
}

impl DeviceRecord {
    pub fn name_of_station(&self) -> Option<&str> {
        self.frame
            .telegram
            .name_of_station()
            .map(|b| b.name_of_station.as_str())
    }
}

/// Shared store of responding devices.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Arc<RwLock<HashMap<MacAddr, DeviceRecord>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `frame` if it is an identify response to the request with
    /// transaction id `request_xid`. Returns whether it was stored.
    pub async fn observe(&self, request_xid: u32, frame: Frame) -> bool {
        let telegram = &frame.telegram;
        if !telegram.is_identify_response() {
            debug!("Ignoring non-identify-response frame from {}", frame.ethernet.source);
            return false;
        }
        if telegram.xid != request_xid {
            debug!(
                "Ignoring response from {} with xid 0x{:08X}, expected 0x{request_xid:08X}",
                frame.ethernet.source, telegram.xid
            );
            return false;
        }

        let source = frame.ethernet.source;
        let record = DeviceRecord {
            frame,
            last_seen: SystemTime::now(),
        };
        let previous = self.devices.write().await.insert(source, record);
        if previous.is_none() {
            info!("Discovered device {source}");
        }
        true
    }

    /// Inserts a record without xid filtering.
    pub async fn insert(&self, record: DeviceRecord) {
        let source = record.frame.ethernet.source;
        self.devices.write().await.insert(source, record);
    }

    pub async fn get(&self, mac: &MacAddr) -> Option<DeviceRecord> {
        self.devices.read().await.get(mac).cloned()
    }

    /// Snapshot of every device, ordered by MAC address.
    pub async fn devices(&self) -> Vec<DeviceRecord> {
        let mut devices: Vec<DeviceRecord> = self.devices.read().await.values().cloned().collect();
        devices.sort_by_key(|d| d.frame.ethernet.source);
        devices
    }

    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.devices.write().await.clear();
    }

    /// Devices as a JSON object keyed by MAC address.
    pub async fn to_json(&self) -> serde_json::Result<String> {
        let devices = self.devices.read().await;
        let by_mac: BTreeMap<String, &DeviceRecord> = devices
            .iter()
            .map(|(mac, record)| (mac.to_string(), record))
            .collect();
        serde_json::to_string_pretty(&by_mac)
    }
}
