pub mod celebration;
pub mod countdown;
pub mod longitude;
pub mod overlay;
pub mod schedule;
pub mod zone;

pub use celebration::*;
pub use countdown::*;
pub use longitude::*;
pub use overlay::*;
pub use schedule::*;
pub use zone::*;
