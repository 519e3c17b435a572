pub mod aggregator;
pub mod backup;
pub mod gate;
pub mod grouper;
pub mod log;
pub mod state;
pub mod subscription;
pub mod validation;
