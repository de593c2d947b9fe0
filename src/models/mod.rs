pub mod destination;
pub mod trip_plan;
pub mod user;
