pub mod odometer;

pub use odometer::Odometer;
