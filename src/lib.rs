#![cfg_attr(not(test), no_std)]

//! # dht-monitor
//! ## A serial-console temperature and humidity monitor for the Raspberry Pi Pico
//!
//! Features:
//! - DHT11 / DHT22 single-wire driver
//! - Temperature and humidity polled every 2 seconds
//! - Invalid readings reported as a single notice, never half a report
//! - Cooperative scheduling: the main loop is never blocked for a whole interval
//!
//! Everything except `main.rs` is hardware independent and tested on the host.

pub mod config;
pub mod console;
pub mod cycle;
pub mod dht;
pub mod monitor;
pub mod reading;
pub mod rendering;
pub mod sensors;
pub mod timer;
