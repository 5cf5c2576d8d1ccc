pub mod call;
pub mod completions;
pub mod ptz;
pub mod ptz_move;
pub mod ptz_stop;
pub mod reboot;
pub mod request;
