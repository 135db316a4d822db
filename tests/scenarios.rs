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

//! End-to-end scenarios exercising the public façade only: scheduling,
//! disk round-trips, fork/wait/exit reaping and cascade termination, and
//! LRU page replacement.

use simos::{FileReadRequest, Kernel, NO_PROCESS};

#[test]
fn basic_scheduling() {
	let mut k = Kernel::new(1, 1024, 256).unwrap();

	k.new_process();
	assert_eq!(k.get_cpu(), 1);

	k.new_process();
	assert_eq!(k.get_cpu(), 1);
	assert_eq!(k.get_ready_queue(), vec![2]);

	k.timer_interrupt().unwrap();
	assert_eq!(k.get_cpu(), 2);
	assert_eq!(k.get_ready_queue(), vec![1]);
}

#[test]
fn disk_round_trip() {
	let mut k = Kernel::new(1, 1024, 256).unwrap();
	k.new_process();
	k.new_process();
	k.timer_interrupt().unwrap();

	k.disk_read_request(0, "a").unwrap();
	assert_eq!(k.get_cpu(), 1);
	assert!(k.get_ready_queue().is_empty());
	assert_eq!(
		k.get_disk(0).unwrap(),
		FileReadRequest { pid: 2, filename: "a".into() }
	);

	k.disk_job_completed(0).unwrap();
	assert_eq!(k.get_cpu(), 1);
	assert_eq!(k.get_ready_queue(), vec![2]);
}

#[test]
fn fork_wait_exit() {
	let mut k = Kernel::new(0, 1024, 256).unwrap();
	k.new_process();
	k.sim_fork().unwrap();

	k.timer_interrupt().unwrap();
	assert_eq!(k.get_cpu(), 2);
	assert_eq!(k.get_ready_queue(), vec![1]);

	k.sim_exit().unwrap();
	assert_eq!(k.get_cpu(), 1);

	k.sim_wait().unwrap();
	assert_eq!(k.get_cpu(), 1);
}

#[test]
fn wait_then_exit_wakeup() {
	let mut k = Kernel::new(0, 1024, 256).unwrap();
	k.new_process();
	k.sim_fork().unwrap();

	k.sim_wait().unwrap();
	assert_eq!(k.get_cpu(), 2);

	k.sim_exit().unwrap();
	assert_eq!(k.get_cpu(), 1);
}

#[test]
fn lru_eviction() {
	let mut k = Kernel::new(0, 512, 256).unwrap();
	k.new_process();

	k.access_memory_address(0).unwrap();
	k.access_memory_address(256).unwrap();
	k.access_memory_address(0).unwrap();
	k.access_memory_address(512).unwrap();

	let pages: Vec<u64> = k.get_memory().iter().map(|i| i.page_number).collect();
	assert_eq!(pages, vec![0, 2]);
}

#[test]
fn cascade_termination() {
	let mut k = Kernel::new(0, 1024, 256).unwrap();
	k.new_process();

	k.sim_fork().unwrap();
	k.timer_interrupt().unwrap();

	k.sim_fork().unwrap();
	k.timer_interrupt().unwrap();
	k.timer_interrupt().unwrap();

	assert_eq!(k.get_cpu(), 1);

	k.sim_exit().unwrap();
	assert_eq!(k.get_cpu(), NO_PROCESS);
}

#[test]
fn errors_carry_no_partial_effects() {
	let mut k = Kernel::new(2, 1024, 256).unwrap();
	k.new_process();

	let before = (k.get_cpu(), k.get_ready_queue());
	assert!(k.disk_read_request(7, "x").is_err());
	assert_eq!((k.get_cpu(), k.get_ready_queue()), before);
}
