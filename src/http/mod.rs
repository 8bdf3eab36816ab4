//! HTTP command surface.
//!
//! | Module     | Role                                        |
//! |------------|---------------------------------------------|
//! | `codec`    | Request-target extraction, response framing |
//! | `channels` | serve → actuate hand-off                    |
//! | `io_task`  | Listener and actuator futures, I/O thread   |

pub mod channels;
pub mod codec;
pub mod io_task;
