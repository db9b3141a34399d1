//! MacroMasters Shared Library
//!
//! Pure nutrition computation (unit conversion, BMR, TDEE, macro
//! allocation, levels) plus the profile, onboarding and API types used by
//! the backend and WASM modules.

pub mod energy;
pub mod errors;
pub mod gamification;
pub mod macros;
pub mod onboarding;
pub mod profile;
pub mod rounding;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use energy::*;
pub use errors::*;
pub use gamification::*;
pub use macros::*;
pub use onboarding::*;
pub use profile::*;
pub use types::*;
pub use units::*;
