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

//! Fork, exit-with-cascade and wait/reap — the three operations where the
//! process table, scheduler and memory manager are all touched in one
//! transaction.
//!
//! This is split out from `kernel.rs` because it is the one place the
//! three subsystems are genuinely coupled: an exit must walk the child
//! tree, purge frames, possibly wake a waiting parent, and only then
//! dispatch the next process.

use log::debug;

use crate::error::KernelResult;
use crate::kernel::Kernel;
use crate::process::{Pcb, Pid, State, NO_PARENT};

impl Kernel {
	/// Forks the running process: a fresh child is created, registered
	/// under the parent and enqueued as `Ready`. The parent keeps running.
	pub fn sim_fork(&mut self) -> KernelResult<()> {
		let parent = self.require_running("SimFork")?;

		let child = self.pids.next();
		self.table.insert(Pcb::new_child(child, parent));
		self.table.add_child(parent, child);
		self.admit(child);

		debug!("SimFork: parent={parent} child={child}");
		Ok(())
	}

	/// Blocks the running process on one of its children, or reaps an
	/// already-terminated one.
	///
	/// - No children: no-op, the process keeps running.
	/// - A terminated child exists: the first one (fork order) is reaped
	///   — removed from the table and from the parent's child list — and
	///   the process keeps running.
	/// - Otherwise: the process becomes `Waiting` and the next ready
	///   process is dispatched; it resumes when a child later exits.
	pub fn sim_wait(&mut self) -> KernelResult<()> {
		let pid = self.require_running("SimWait")?;

		let children = self.table.get(pid).map(|p| p.children_pids.clone()).unwrap_or_default();
		if children.is_empty() {
			debug!("SimWait: pid={pid} has no children, no-op");
			return Ok(());
		}

		let terminated = children.into_iter().find(|&c| {
			self.table.get(c).map(|rec| matches!(rec.state, State::Terminated)).unwrap_or(false)
		});

		if let Some(child) = terminated {
			self.table.remove_child(pid, child);
			self.table.remove(child);
			debug!("SimWait: pid={pid} reaped zombie child={child}");
			return Ok(());
		}

		if let Some(p) = self.table.get_mut(pid) {
			p.state = State::Waiting;
		}
		self.scheduler.clear_running();
		self.dispatch_next();
		debug!("SimWait: pid={pid} -> Waiting, no terminated child yet");
		Ok(())
	}

	/// Terminates the running process, cascading through its descendants.
	///
	/// 1. Every descendant is removed depth-first (children before their
	///    own children), purging that PID's frames before removing its
	///    record, so the frame-table invariant holds pointwise at every
	///    step.
	/// 2. The exiting process's own frames are purged.
	/// 3. If its parent is `Waiting` on it, the parent's blocked `wait()`
	///    is resumed — and a resumed `wait()` has, by definition, already
	///    reaped its child, so `self`'s record is removed from the table
	///    right here rather than left as a zombie. If the parent is not
	///    currently waiting (or there is no live parent), `self` is left
	///    as a `Terminated` zombie for a later explicit `SimWait` to reap;
	///    a parentless (root) process becomes an unreapable zombie — this
	///    is permitted, mirroring an init-style root.
	/// 4. The CPU is cleared and the next ready process is dispatched.
	pub fn sim_exit(&mut self) -> KernelResult<()> {
		let pid = self.require_running("SimExit")?;

		let children = self.table.get(pid).map(|p| p.children_pids.clone()).unwrap_or_default();
		for child in children {
			self.cascade_terminate(child);
		}

		self.memory.purge(pid);

		let parent_pid = self.table.get(pid).map(|p| p.parent_pid).unwrap_or(NO_PARENT);
		let parent_waiting = self
			.table
			.get(parent_pid)
			.map(|p| matches!(p.state, State::Waiting))
			.unwrap_or(false);

		if parent_waiting {
			// The parent's pending wait() resumes already-reaped: drop the
			// child outright instead of leaving a zombie behind.
			self.table.remove_child(parent_pid, pid);
			self.table.remove(pid);
			self.admit(parent_pid);
		} else if let Some(p) = self.table.get_mut(pid) {
			p.state = State::Terminated;
		}

		self.scheduler.clear_running();
		self.dispatch_next();

		debug!("SimExit: pid={pid} terminated, parent={parent_pid}");
		Ok(())
	}

	/// Depth-first removal of `pid` and all of its descendants: children
	/// are recursed into before `pid` itself is purged and removed, so
	/// that no frame in the table ever has a PID whose record has already
	/// been dropped.
	fn cascade_terminate(&mut self, pid: Pid) {
		let children = self.table.get(pid).map(|p| p.children_pids.clone()).unwrap_or_default();
		for child in children {
			self.cascade_terminate(child);
		}
		self.memory.purge(pid);
		self.table.remove(pid);
	}
}
