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

//! The `Kernel` façade: the single entry point through which a test
//! harness drives the simulated machine.
//!
//! `Kernel` owns the process table, scheduler, disk bank and memory
//! manager. Every public method is a single transaction: preconditions are
//! validated up front, so a rejected call leaves no partial effects (§7).
//! There is no concurrency internal to the simulator — each method runs to
//! completion before the next may begin.

use log::{debug, trace};

use crate::disk::{DiskBank, FileReadRequest};
use crate::error::{KernelError, KernelResult};
use crate::memory::{MemoryItem, MemoryManager};
use crate::process::pid::PidAllocator;
use crate::process::{Pcb, Pid, ProcessTable, State, NO_PROCESS};
use crate::scheduler::Scheduler;

/// The simulated machine: process table, scheduler, disk bank and memory
/// manager, plus the bookkeeping needed to drive them.
pub struct Kernel {
	pub(crate) table: ProcessTable,
	pub(crate) scheduler: Scheduler,
	pub(crate) disks: DiskBank,
	pub(crate) memory: MemoryManager,
	pub(crate) pids: PidAllocator,
}

impl Kernel {
	/// Creates a new kernel.
	///
	/// `num_disks` disks are created, indexed `0..num_disks`. Physical
	/// memory holds `ram_bytes / page_size` frames. Fails if `page_size`
	/// is zero, since `address / page_size` would otherwise be undefined.
	pub fn new(num_disks: usize, ram_bytes: u64, page_size: u32) -> KernelResult<Self> {
		if page_size == 0 {
			return Err(KernelError::ZeroPageSize);
		}

		Ok(Self {
			table: ProcessTable::new(),
			scheduler: Scheduler::new(),
			disks: DiskBank::new(num_disks),
			memory: MemoryManager::new(ram_bytes, page_size as u64),
			pids: PidAllocator::new(),
		})
	}

	pub(crate) fn require_running(&self, operation: &'static str) -> KernelResult<Pid> {
		let running = self.scheduler.running();
		if running == NO_PROCESS {
			Err(KernelError::NoRunningProcess { operation })
		} else {
			Ok(running)
		}
	}

	pub(crate) fn validate_disk(&self, disk: i64) -> KernelResult<usize> {
		let num_disks = self.disks.len();
		if disk < 0 || !self.disks.is_valid(disk as usize) {
			return Err(KernelError::InvalidDisk { disk, num_disks });
		}
		Ok(disk as usize)
	}

	/// Admits `pid` to the scheduler: runs it immediately if the CPU is
	/// idle, otherwise appends it to the ready queue tail. Updates the
	/// record's state to match (`Running` or `Ready`).
	pub(crate) fn admit(&mut self, pid: Pid) {
		let now_running = self.scheduler.admit(pid);
		if let Some(p) = self.table.get_mut(pid) {
			p.state = if now_running { State::Running } else { State::Ready };
		}
	}

	/// Pops the ready-queue head and makes it Running, updating its
	/// record. Leaves the CPU idle if the ready queue is empty.
	pub(crate) fn dispatch_next(&mut self) {
		let next = self.scheduler.pick_next();
		if next != NO_PROCESS {
			if let Some(p) = self.table.get_mut(next) {
				p.state = State::Running;
			}
		}
		trace!("dispatch_next -> {next}");
	}

	/// Creates a new process. Runs it immediately if the CPU is idle,
	/// otherwise enqueues it as `Ready`. Cannot fail: `NewProcess` has no
	/// precondition.
	pub fn new_process(&mut self) {
		let pid = self.pids.next();
		self.table.insert(Pcb::new(pid));
		self.admit(pid);
		debug!("NewProcess: pid={pid}");
	}

	/// Preempts the running process: moves it to the tail of the ready
	/// queue, then dispatches the new head. If the running process was the
	/// sole schedulable process, it is immediately re-selected — the
	/// running PID is unchanged, but its state momentarily cycles through
	/// `Ready`.
	pub fn timer_interrupt(&mut self) -> KernelResult<()> {
		let running = self.require_running("TimerInterrupt")?;

		self.scheduler.yield_to_ready();
		if let Some(p) = self.table.get_mut(running) {
			p.state = State::Ready;
		}
		self.dispatch_next();

		debug!("TimerInterrupt: pid={running} preempted, cpu now {}", self.scheduler.running());
		Ok(())
	}

	/// Issues a disk read request on behalf of the running process: it
	/// moves to `Waiting`, the request is enqueued on `disk`, and the next
	/// ready process (if any) is dispatched.
	pub fn disk_read_request(&mut self, disk: i64, filename: impl Into<String>) -> KernelResult<()> {
		let running = self.require_running("DiskReadRequest")?;
		let disk_idx = self.validate_disk(disk)?;
		let filename = filename.into();

		if let Some(p) = self.table.get_mut(running) {
			p.state = State::Waiting;
		}
		self.disks.enqueue(disk_idx, FileReadRequest { pid: running, filename: filename.clone() });
		self.scheduler.clear_running();
		self.dispatch_next();

		debug!("DiskReadRequest: pid={running} -> Waiting on disk {disk_idx} ({filename})");
		Ok(())
	}

	/// Announces completion of the head request on `disk`. A no-op if the
	/// disk's queue is empty. Otherwise the request's PID is returned to
	/// Ready admission, which may start it running immediately if the CPU
	/// is idle.
	pub fn disk_job_completed(&mut self, disk: i64) -> KernelResult<()> {
		let disk_idx = self.validate_disk(disk)?;

		if let Some(request) = self.disks.complete(disk_idx) {
			self.admit(request.pid);
			debug!("DiskJobCompleted: disk {disk_idx} -> pid={}", request.pid);
		}
		Ok(())
	}

	/// Services a memory access by the running process at `address`.
	pub fn access_memory_address(&mut self, address: u64) -> KernelResult<()> {
		let running = self.require_running("AccessMemoryAddress")?;
		self.memory.access(running, address);
		trace!("AccessMemoryAddress: pid={running} addr={address}");
		Ok(())
	}

	/// Returns the running PID, or `NO_PROCESS` if the CPU is idle.
	pub fn get_cpu(&self) -> Pid {
		self.scheduler.running()
	}

	/// Returns a snapshot of the ready queue, head first.
	pub fn get_ready_queue(&self) -> Vec<Pid> {
		self.scheduler.ready_queue()
	}

	/// Returns the head request of `disk`'s queue, or the `NO_PROCESS`
	/// sentinel if it is empty.
	pub fn get_disk(&self, disk: i64) -> KernelResult<FileReadRequest> {
		let disk_idx = self.validate_disk(disk)?;
		Ok(self.disks.head(disk_idx))
	}

	/// Returns a snapshot of `disk`'s queue, excluding its head.
	pub fn get_disk_queue(&self, disk: i64) -> KernelResult<Vec<FileReadRequest>> {
		let disk_idx = self.validate_disk(disk)?;
		Ok(self.disks.queue_snapshot(disk_idx))
	}

	/// Returns a snapshot of the frame table, sorted ascending by
	/// `frame_number`.
	pub fn get_memory(&self) -> Vec<MemoryItem> {
		self.memory.snapshot()
	}
}
