pub mod check;
mod command_result;
mod helper;
pub mod init;

pub use command_result::*;
pub use helper::finish;
