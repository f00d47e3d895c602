// Browser-side tuning for mounting the background canvas.
// Startup
pub const STARTUP_DELAY_MS: i32 = 300; // wait before the first frame and the fade-in
pub const FADE_IN_MS: u32 = 1000; // CSS opacity transition length

// Backing store
pub const MAX_PIXEL_RATIO: f64 = 2.0; // full-document canvases get large fast
pub const MAX_CANVAS_SIDE_PX: u32 = 16_384; // below every browser's per-edge limit
pub const MAX_CANVAS_AREA_PX: u64 = 32 * 1024 * 1024; // ~128 MB of RGBA

// Placement behind page content
pub const CANVAS_Z_INDEX: i32 = -1;

// data-* attributes read from the canvas when mount arguments are absent
pub const ATTR_INTENSITY: &str = "data-intensity";
pub const ATTR_PARTICLE_COUNT: &str = "data-particle-count";
pub const ATTR_CONNECTION_DISTANCE: &str = "data-connection-distance";
