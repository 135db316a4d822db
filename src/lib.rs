/*
 * Copyright 2024 Luc Lenôtre
 *
 * This file is part of simos.
 *
 * simos is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * simos is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
 * A PARTICULAR PURPOSE. See the GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License along with
 * simos. If not, see <https://www.gnu.org/licenses/>.
 */

//! An in-process simulator of an operating-system kernel's
//! process-management, disk-I/O and paged-memory subsystems.
//!
//! The whole simulated machine is reached through a single façade type,
//! [`Kernel`]. A test harness drives it with primitive events — create a
//! process, fork, exit, wait, timer interrupt, request a disk read,
//! announce disk completion, touch a virtual address — and reads back
//! observable state (running process, ready queue, per-disk I/O queues,
//! physical memory frame table).
//!
//! Three subsystems are coupled inside the façade: the process lifecycle
//! and scheduler ([`scheduler`]), the parent/child tree with cascading
//! termination and zombie-reaping wait semantics ([`lifecycle`]), and the
//! paged virtual-memory model with LRU frame replacement ([`memory`]). The
//! simulator is single-threaded and non-reentrant: each public method is a
//! complete transaction with no internal suspension point.

pub mod disk;
pub mod error;
mod kernel;
mod lifecycle;
pub mod memory;
pub mod process;
pub mod scheduler;

pub use disk::FileReadRequest;
pub use error::{KernelError, KernelResult};
pub use kernel::Kernel;
pub use memory::MemoryItem;
pub use process::{Pid, State, NO_PARENT, NO_PROCESS};
