//! Hardware-independent core library for the meteo weather station
//!
//! This crate contains the platform-agnostic logic of the station: the
//! BMP180/HTU21D register sequences and their fixed-point compensation, the
//! date/time editor state machine, the two display pages and the loop driver
//! that ties them together.
//!
//! It is `#![no_std]` and allocation-free so it compiles on the target MCU as
//! well as on desktop hosts (for the simulator and tests). Every peripheral is
//! consumed through `embedded-hal` 1.0 traits or a small trait defined here.

#![no_std]

pub mod app_state;
pub mod clock;
pub mod config;
pub mod framebuffer;
pub mod input;
pub mod navigation;
pub mod pages;
pub mod sensors;
pub mod status;
pub mod ticks;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
