// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// Removes its directory when dropped, including while a test unwinds.
struct Scratch(PathBuf);

impl Scratch {
	fn create() -> std::io::Result<Self> {
		let path = env::temp_dir().join(format!("resultdb-{}", Uuid::new_v4()));
		fs::create_dir(&path)?;
		Ok(Self(path))
	}
}

impl Drop for Scratch {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.0);
	}
}

/// Run `f` inside a fresh directory under the system temp dir. The
/// directory and every result file written to it are removed afterwards,
/// also when `f` panics.
pub fn temp_dir<F>(f: F) -> std::io::Result<()>
where
	F: FnOnce(&Path) -> std::io::Result<()>,
{
	let scratch = Scratch::create()?;
	f(&scratch.0)
}
