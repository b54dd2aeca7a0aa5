//! VitaLife Core — error type, configuration, user profile model.

pub mod config;
pub mod error;
pub mod profile;

pub use config::{LemmatizerMode, VitaLifeConfig};
pub use error::{Error, Result};
pub use profile::{BloodType, Gender, UserProfile};
