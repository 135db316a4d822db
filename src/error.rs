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

//! Error types returned by the kernel's public operations.
//!
//! The kernel distinguishes exactly two failure modes: an operation that
//! requires a running process was invoked while the CPU was idle, and a
//! disk-indexed operation was given an index outside the configured range.
//! Both are programmer errors from the caller's perspective, not transient
//! conditions, so there is no retry story here: a rejected call simply
//! reports the violation and leaves kernel state untouched.

use std::fmt;

/// The kernel's error type.
///
/// Two failure modes: a missing running process (logic error) and an
/// out-of-range disk index (range error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
	/// The operation requires a running process, but the CPU is idle.
	NoRunningProcess {
		/// Name of the operation that was rejected, for diagnostics.
		operation: &'static str,
	},
	/// A disk index fell outside `[0, num_disks)`.
	InvalidDisk {
		/// The index that was passed in.
		disk: i64,
		/// The number of disks configured for this kernel.
		num_disks: usize,
	},
	/// `Kernel::new` was called with a zero page size, which would make
	/// `address / page_size` undefined.
	ZeroPageSize,
}

impl fmt::Display for KernelError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoRunningProcess { operation } => {
				write!(f, "{operation}: no process is currently using the CPU")
			}
			Self::InvalidDisk { disk, num_disks } => {
				write!(f, "disk index {disk} is out of range (have {num_disks} disks)")
			}
			Self::ZeroPageSize => write!(f, "page size must be greater than zero"),
		}
	}
}

impl std::error::Error for KernelError {}

/// Convenience alias used throughout the crate.
pub type KernelResult<T> = Result<T, KernelError>;
