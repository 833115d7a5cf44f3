//! Store implementations.

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "wincred")]
pub mod wincred;

/// Registers all compiled stores with the factory.
///
/// Called by [`crate::init`]; calling it again is harmless.
pub fn register_all() {
    #[cfg(feature = "mock")]
    mock::register();

    #[cfg(feature = "wincred")]
    wincred::register();
}
