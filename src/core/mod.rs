// Core modules: schema validation, time units, clock, and error modeling.
pub mod clock;
pub mod error;
pub mod unit;
pub mod validate;
