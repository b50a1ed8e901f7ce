pub mod consts;
pub mod contrast;
pub mod engine;
pub mod error;
pub mod io;
pub mod naming;
pub mod pipeline;
pub mod plate;
pub mod profile;
