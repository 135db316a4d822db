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

//! The process scheduler.
//!
//! Owns the ready queue and the identity of the running PID. Policy is pure
//! FIFO: whichever process has waited longest in the ready queue runs next.
//! The scheduler never touches process records directly — callers pass the
//! process table alongside it so state transitions stay in one place.

use std::collections::VecDeque;

use crate::process::{Pid, NO_PROCESS};

/// Ready queue and running-PID bookkeeping.
#[derive(Debug, Default)]
pub struct Scheduler {
	ready: VecDeque<Pid>,
	running: Pid,
}

impl Scheduler {
	/// Creates a scheduler with an idle CPU and an empty ready queue.
	pub fn new() -> Self {
		Self {
			ready: VecDeque::new(),
			running: NO_PROCESS,
		}
	}

	/// Returns the currently running PID, or `NO_PROCESS` if idle.
	pub fn running(&self) -> Pid {
		self.running
	}

	/// Returns a snapshot of the ready queue, head first.
	pub fn ready_queue(&self) -> Vec<Pid> {
		self.ready.iter().copied().collect()
	}

	/// Admits `pid` to the scheduler: if the CPU is idle, `pid` starts
	/// running immediately; otherwise it is appended to the ready queue
	/// tail. Returns `true` if `pid` started running.
	pub fn admit(&mut self, pid: Pid) -> bool {
		if self.running == NO_PROCESS {
			self.running = pid;
			true
		} else {
			self.ready.push_back(pid);
			false
		}
	}

	/// Moves the running process to the tail of the ready queue, clearing
	/// the CPU. No-op on the ready queue's contents if the CPU was already
	/// idle.
	pub fn yield_to_ready(&mut self) {
		if self.running != NO_PROCESS {
			self.ready.push_back(self.running);
			self.running = NO_PROCESS;
		}
	}

	/// Clears the CPU without returning the outgoing process to the ready
	/// queue — used when the running process is leaving the scheduler
	/// entirely (blocking on disk I/O, exiting, or waiting).
	pub fn clear_running(&mut self) {
		self.running = NO_PROCESS;
	}

	/// Pops the ready-queue head and makes it Running. Leaves the CPU idle
	/// if the ready queue is empty. Returns the PID that is now running, or
	/// `NO_PROCESS`.
	pub fn pick_next(&mut self) -> Pid {
		self.running = self.ready.pop_front().unwrap_or(NO_PROCESS);
		self.running
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn admit_runs_immediately_when_idle() {
		let mut s = Scheduler::new();
		assert!(s.admit(1));
		assert_eq!(s.running(), 1);
		assert!(s.ready_queue().is_empty());
	}

	#[test]
	fn admit_enqueues_when_busy() {
		let mut s = Scheduler::new();
		s.admit(1);
		assert!(!s.admit(2));
		assert_eq!(s.ready_queue(), vec![2]);
	}

	#[test]
	fn timer_interrupt_cycles_fifo() {
		let mut s = Scheduler::new();
		s.admit(1);
		s.admit(2);

		s.yield_to_ready();
		s.pick_next();
		assert_eq!(s.running(), 2);
		assert_eq!(s.ready_queue(), vec![1]);
	}

	#[test]
	fn timer_interrupt_with_sole_process_reselects_it() {
		let mut s = Scheduler::new();
		s.admit(1);

		s.yield_to_ready();
		s.pick_next();
		assert_eq!(s.running(), 1);
		assert!(s.ready_queue().is_empty());
	}

	#[test]
	fn pick_next_idles_cpu_when_queue_empty() {
		let mut s = Scheduler::new();
		s.admit(1);
		s.clear_running();
		assert_eq!(s.pick_next(), NO_PROCESS);
	}
}
