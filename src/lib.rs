pub mod charts;
pub mod config;
pub mod dataset;
pub mod derived;
pub mod export;
pub mod filter;
pub mod hover;
pub mod palette;
pub mod playback;
pub mod state;
pub mod transitions;
