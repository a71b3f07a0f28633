use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain-text liveness banner served at `/`.
pub const LIVENESS_BANNER: &str = "Fender Guitars API is running 🎸";
