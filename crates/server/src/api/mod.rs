mod errors;
mod handlers;
mod router;

pub use router::build_router;
