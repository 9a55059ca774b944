mod stroke;
pub use stroke::*;
mod recorder;
pub use recorder::*;
mod batch;
pub use batch::*;
pub mod erase;
pub use erase::PixelEraseReport;
mod highlight;
pub use highlight::*;
mod trail;
pub use trail::*;
mod drawing;
pub use drawing::*;
