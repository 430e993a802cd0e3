pub mod config;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod run;
