pub mod setup;

pub use setup::{env_filter, init_tracing};
