// nfctag/src/device/mod.rs
//! Reader selection and per-tick tag connections.

pub mod builder;
pub mod channel;
pub mod models;
pub mod session;

pub use builder::DeviceSessionBuilder;
pub use channel::Channel;
pub use models::{ReaderModel, ReaderProfile};
pub use session::{DeviceSession, ReaderInfo};
