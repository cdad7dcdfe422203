pub mod audio;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod gesture;
pub mod integrator;
pub mod morph;
pub mod scene;
pub mod shapes;
pub mod state;

pub use audio::*;
pub use buffer::*;
pub use config::*;
pub use constants::*;
pub use gesture::*;
pub use integrator::*;
pub use morph::*;
pub use scene::*;
pub use shapes::*;
pub use state::*;
