//! Core data types for Parcel

pub mod cost;
pub mod delivery;
pub mod draft;
pub mod package;
pub mod rating;
pub mod recipient;
pub mod shipment;
pub mod tracking_id;
