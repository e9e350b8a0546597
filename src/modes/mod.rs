pub mod play;
pub mod timer;

pub use play::PlayMode;
pub use timer::TickTimer;
