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

//! Process records and the process table.
//!
//! The process table is the authoritative map from PID to process record
//! and owns the parent/child tree. The tree itself is never represented by
//! owning references in both directions — each record stores only its own
//! `parent_pid` and `children_pids`; traversals (cascade termination,
//! reaping) go through the table by PID. This keeps the table a plain
//! graph with no ownership cycles.

pub mod pid;
pub mod state;

pub use pid::{Pid, NO_PARENT, NO_PROCESS};
pub use state::State;

use std::collections::HashMap;

/// A process control block.
#[derive(Debug, Clone)]
pub struct Pcb {
	/// Unique process identifier.
	pub pid: Pid,
	/// Current lifecycle state.
	pub state: State,
	/// `NO_PARENT` if this process is a tree root.
	pub parent_pid: Pid,
	/// PIDs of this process's live children, in fork order.
	pub children_pids: Vec<Pid>,
	/// Inert instruction-pointer field carried over from the PCB this
	/// simulator's lineage traces back to. No operation reads or advances
	/// it; no address translation is modelled.
	pub program_counter: u64,
}

impl Pcb {
	/// Creates a new record in state `New`, with no parent and no children.
	pub fn new(pid: Pid) -> Self {
		Self {
			pid,
			state: State::New,
			parent_pid: NO_PARENT,
			children_pids: Vec::new(),
			program_counter: 0,
		}
	}

	/// Creates a child record of `parent`, born `Ready` with an empty
	/// child list of its own (no grandchild inheritance on fork).
	pub fn new_child(pid: Pid, parent: Pid) -> Self {
		Self {
			pid,
			state: State::Ready,
			parent_pid: parent,
			children_pids: Vec::new(),
			program_counter: 0,
		}
	}
}

/// Authoritative PID -> record map, owning the parent/child tree.
#[derive(Debug, Default)]
pub struct ProcessTable {
	records: HashMap<Pid, Pcb>,
}

impl ProcessTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self {
			records: HashMap::new(),
		}
	}

	/// Inserts a freshly created record.
	pub fn insert(&mut self, pcb: Pcb) {
		self.records.insert(pcb.pid, pcb);
	}

	/// Returns a reference to the record for `pid`, if it exists.
	pub fn get(&self, pid: Pid) -> Option<&Pcb> {
		self.records.get(&pid)
	}

	/// Returns a mutable reference to the record for `pid`, if it exists.
	pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Pcb> {
		self.records.get_mut(&pid)
	}

	/// Returns whether `pid` names a live record.
	pub fn contains(&self, pid: Pid) -> bool {
		self.records.contains_key(&pid)
	}

	/// Removes and returns the record for `pid`, if it exists.
	pub fn remove(&mut self, pid: Pid) -> Option<Pcb> {
		self.records.remove(&pid)
	}

	/// Registers `child` under `parent`'s `children_pids`, maintaining
	/// fork-order (insertion order).
	pub fn add_child(&mut self, parent: Pid, child: Pid) {
		if let Some(p) = self.get_mut(parent) {
			p.children_pids.push(child);
		}
	}

	/// Removes `child` from `parent`'s `children_pids`, if present.
	pub fn remove_child(&mut self, parent: Pid, child: Pid) {
		if let Some(p) = self.get_mut(parent) {
			p.children_pids.retain(|&c| c != child);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_record_is_new_and_parentless() {
		let pcb = Pcb::new(1);
		assert!(matches!(pcb.state, State::New));
		assert_eq!(pcb.parent_pid, NO_PARENT);
		assert!(pcb.children_pids.is_empty());
	}

	#[test]
	fn child_is_born_ready_with_no_inherited_children() {
		let child = Pcb::new_child(2, 1);
		assert!(matches!(child.state, State::Ready));
		assert_eq!(child.parent_pid, 1);
		assert!(child.children_pids.is_empty());
	}

	#[test]
	fn table_tracks_parent_child_links() {
		let mut table = ProcessTable::new();
		table.insert(Pcb::new(1));
		table.insert(Pcb::new_child(2, 1));
		table.add_child(1, 2);
		assert_eq!(table.get(1).unwrap().children_pids, vec![2]);

		table.remove_child(1, 2);
		assert!(table.get(1).unwrap().children_pids.is_empty());
	}
}
