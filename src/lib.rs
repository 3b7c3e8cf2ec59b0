// Pulse: anonymous location-tagged pulses with sentiment and topic clustering
//
// This is the library root. Each module corresponds to one stage of the
// pulse flow: intake -> scoring -> storage -> clustering -> display.

pub mod clustering;
pub mod config;
pub mod db;
pub mod mock;
pub mod output;
pub mod pipeline;
pub mod sentiment;
pub mod stats;
pub mod status;
pub mod topics;
