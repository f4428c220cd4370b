pub mod controller;
pub mod response;
pub mod state;
