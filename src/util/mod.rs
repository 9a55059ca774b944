mod distance_gate;
pub use distance_gate::*;
