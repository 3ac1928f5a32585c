//! Trip domain types: requests, categories, and fare math.

pub mod category;
pub mod fare;
pub mod request;

pub use category::Category;
pub use fare::{convert_distance, convert_duration, FareQuote};
pub use request::{NewTripRequest, RequestStatus, TripRequest};
