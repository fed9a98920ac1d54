pub mod entities;
pub mod ports;
pub mod scaling;
pub mod services;
pub mod units;
pub mod validation;
pub mod value_objects;
