//! Interactive consultation chat in the terminal.
//!
//! The loop renders the session snapshots published by the controller,
//! forwards visitor input, and shows the confirmation view once the
//! controller navigates. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
