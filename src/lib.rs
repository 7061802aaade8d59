//! # RouterJig
//!
//! Box and dovetail joint layout for router jigs.
//!
//! Given a board width, a router bit (width, depth and dovetail angle) and a
//! finger spacing strategy, RouterJig works out the cuts on every board of the
//! joint, the router passes that clear each cut and how well the mating
//! boards fit.
//!
//! ## Architecture
//!
//! RouterJig is organized as a workspace with multiple crates:
//!
//! 1. **routerjig-core** - Errors, units and fixed-point lengths
//! 2. **routerjig-settings** - Configuration file loading, saving and validation
//! 3. **routerjig-joint** - Bits, cuts, boards, spacing strategies, fit and the joint session
//! 4. **routerjig** - Report binary that integrates all crates
//!
//! ## Features
//!
//! - **Spacing**: equally spaced, variable spaced and hand-edited fingers with undo
//! - **Inserts**: optional double and double-double boards between A and B
//! - **Router passes**: labelled bit-centre positions for every cut
//! - **Fit**: maximum gap and overlap across every seam

pub use routerjig_core::{
    get_unit_label, parse_length, Fixed, MeasurementSystem, ParameterError, ParameterResult, Units,
};

pub use routerjig_settings::{
    default_config_path, Config, FitSettings, LayoutSettings, SettingsError, SpacingKind,
};

pub use routerjig_joint::{
    Board, BoardRole, Cut, EditOp, EditStatus, Joint, JointError, JointGeometry, JointResult,
    JointState, RouterBit, Spacing, SpacingError, SpacingStrategy,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, leaving stdout to the report
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }
}
