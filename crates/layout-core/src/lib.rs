mod editor;
mod export;
mod ids;
mod locate;
mod model;
mod ops;
mod palette;
mod reconcile;
mod resize;
mod target;

pub use crate::editor::*;
pub use crate::export::*;
pub use crate::ids::*;
pub use crate::locate::*;
pub use crate::model::*;
pub use crate::ops::*;
pub use crate::palette::*;
pub use crate::reconcile::*;
pub use crate::resize::*;
pub use crate::target::*;
