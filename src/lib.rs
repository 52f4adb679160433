pub mod cli;
pub mod config;
pub mod contrib;
pub mod error;
pub mod git;
pub mod logging;
pub mod model;
pub mod render;
pub mod util;
pub mod window;
