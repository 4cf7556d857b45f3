//! Static serving for the prebuilt Vite bundle.
//!
//! Files under `dist/` (`/vite.svg`, `/assets/*`, ...) are served as-is. Any
//! other path gets `index.html` so the client-side router can handle it.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

pub fn service(dist: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")))
}
