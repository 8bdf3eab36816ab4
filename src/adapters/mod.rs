//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to              |
//! |------------|------------------|--------------------------|
//! | `hardware` | ActuatorPort     | Trigger + indicator GPIO |
//! | `log_sink` | EventSink        | Serial log output        |
//! | `time`     | (clock source)   | ESP32 system timer       |
//! | `wifi`     | ConnectivityPort | ESP-IDF WiFi STA         |

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod wifi;
