pub mod driver;
pub mod event;
pub mod frame;
pub mod session;
pub mod sheet;
pub mod state;
pub mod time;
