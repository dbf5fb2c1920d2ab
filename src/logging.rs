use log::Level;

pub fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    }
}

/// Routes `log` records to the devtools console. Calling it twice is harmless.
pub fn init() {
    _ = console_log::init_with_level(default_level());
}
