//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `store` owns the board/task collections and their indices; `board` and
//! `task` add the operations on top of it. Route handlers stay focused on
//! request parsing and status mapping.

pub mod board;
pub mod store;
pub mod task;
