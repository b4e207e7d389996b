//! The fixed asset manifest and store identity.

/// Name of the store the worker installs into.
///
/// The `-v1` suffix is only a naming convention; nothing reads it back.
pub const CACHE_NAME: &str = "debug-dungeon-tcg-cache-v1";

/// Paths pre-cached on install, in fetch order.
pub const MANIFEST: &[&str] = &[
    "/",
    "/index.html",
    "/css/style.css",
    "/manifest.json",
    "/binjgb.js",
    "/js/script.js",
    "/js/debugger.js",
    "/roms/game.gb",
];
