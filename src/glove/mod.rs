//! Sensor acquisition boundary
//!
//! The serial or bluetooth transport that talks to the physical glove lives
//! outside this crate. Whatever the transport, it hands complete frames to a
//! [`SensorMailbox`] and the simulation loop reads the freshest one at tick
//! time. Nothing in `sim` blocks on sensor I/O.

pub mod mailbox;

pub use mailbox::SensorMailbox;
