//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "Moonlander Dvorak";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "moonlander-dvorak";

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "moonlander-dvorak";
