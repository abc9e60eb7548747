// Modal rendering modules
mod utils;
mod composer;
mod confirm;
mod help;
pub mod preview;

pub use composer::*;
pub use confirm::*;
pub use help::*;
pub use preview::preview_lines;
pub use utils::centered_rect;
