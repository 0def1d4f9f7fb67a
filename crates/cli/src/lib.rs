//! Command-line front end of mdxblog: static export, single-page render and
//! route listing.

pub mod args;
pub mod commands;
pub mod export;
pub mod logging;
