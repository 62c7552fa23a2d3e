//! Common test utilities for mirage-core
//!
//! Profile fixtures shaped like what the profile editor hands over before
//! saving: partial, sometimes from older releases.

#![allow(dead_code)]

use mirage_core::Profile;
use serde_json::json;

/// Profile with only the fields a user must type in
pub fn minimal_profile() -> Profile {
    Profile::new()
        .with("name", json!("Shopping EU"))
        .with("os", json!("Windows 10"))
}

/// Profile saved by the first release (schema v1)
pub fn v1_profile() -> Profile {
    Profile::from_json(
        r#"{
            "id": "3f1c2a9e-0000-4000-8000-000000000001",
            "name": "Legacy profile",
            "os": "macOS 14",
            "status": "ready",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "version": 1,
            "browser": {
                "type": "chromium",
                "hardwareSpecs": { "cpuCores": 8, "memory": 16 },
                "resolution": { "width": 2560, "height": 1440 },
                "fingerprint": { "canvas": "off" }
            },
            "proxy": { "type": "socks5", "ip": "10.0.0.2", "port": 1080 }
        }"#,
    )
    .expect("fixture is valid JSON")
}

/// Profile that fills in everything, including optional sections
pub fn full_profile() -> Profile {
    minimal_profile()
        .with(
            "proxy",
            json!({ "type": "http", "ip": "1.2.3.4", "port": "8080", "username": "u" }),
        )
        .with("webrtc", json!({ "mode": "altered", "publicIp": "1.2.3.4" }))
        .with("geolocation", json!({ "mode": "prompt", "latitude": 52.52, "longitude": 13.4 }))
        .with("timezone", json!("Europe/Berlin"))
        .with("bookmarks", json!([{ "title": "Home", "url": "https://example.com" }]))
        .with(
            "extensions",
            json!([
                { "id": "e1", "name": "uBlock Origin", "version": "1.57.0", "enabled": true },
                { "id": "e2", "name": "Dark Reader", "version": "4.9.80", "enabled": false }
            ]),
        )
}
