pub mod advisor;
pub mod logging;
