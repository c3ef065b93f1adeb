pub mod constants;
pub mod gravity;
pub mod keplerian_element;
pub mod orbital_record;
pub mod propagator;
pub mod time;
pub mod tle;
pub mod tle_errors;
pub mod two_body;
