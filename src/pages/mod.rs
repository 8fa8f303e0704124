//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped fetching and state, and delegates rendering
//! details to `components`.

pub mod dataset_profile;
pub mod datasets;
pub mod protocol;
pub mod wizard;
