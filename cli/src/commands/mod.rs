//! Command implementations.

pub mod connect;
pub mod scan;

use crossterm::style::Stylize;
use nscon_core::RESCAN_HINT;

/// Print a success line (green when colour is enabled).
pub fn success(color: bool, message: &str) {
    if color {
        println!("{}", message.green());
    } else {
        println!("{}", message);
    }
}

/// Print a warning line (yellow when colour is enabled).
pub fn warning(color: bool, message: &str) {
    if color {
        println!("{}", message.yellow());
    } else {
        println!("{}", message);
    }
}

/// Print a failure line (red when colour is enabled).
pub fn failure(color: bool, message: &str) {
    if color {
        println!("{}", message.red());
    } else {
        println!("{}", message);
    }
}

pub fn hint() {
    println!("HINT: {}", RESCAN_HINT);
}
