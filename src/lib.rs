//! Cubetunnel — an endless-runner flight through a pulsing tunnel of cube
//! rings.
//!
//! The player steers a first-person camera inside a procedurally generated
//! tunnel of 60 recycled cube rings, dodging rare stretched hazard bars while
//! a health/regeneration system tracks survival.  All gameplay state lives in
//! explicit resources; the per-frame loop is an ordered chain of systems
//! gated on [`menu::GameState`].

pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod health;
pub mod hud;
pub mod input;
pub mod menu;
pub mod ring;
pub mod tunnel;
