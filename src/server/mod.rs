pub mod app;
mod deserializers;
pub mod error;
mod extract;
pub mod guard;
mod routes;
