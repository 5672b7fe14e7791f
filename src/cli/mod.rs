//! # CLI Module
//!
//! User-facing commands of spotistats. Each function owns user interaction
//! and error presentation and delegates the actual work to
//! [`crate::management`], [`crate::spotify`] and [`crate::ui`].
//!
//! ## Commands
//!
//! - [`setup`] - `spotistats --setup`: prompts for the Spotify application
//!   credentials and writes the config file
//! - [`stats`] - `spotistats [--global]`: authorizes, fetches the statistics
//!   and prints the dashboard
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotistats --setup      # store client id, secret and redirect URI
//! spotistats              # last month
//! spotistats --global     # all time
//! ```

mod setup;
mod stats;

pub use setup::save_setup;
pub use setup::setup;
pub use stats::show_dashboard;
pub use stats::stats;
