pub mod controller;
pub mod display_context;
pub mod gpu_context;
pub mod input_adapter;
pub mod timer;

pub use controller::{Button, Controller};
pub use display_context::DisplayContext;
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use timer::FixedHz;
