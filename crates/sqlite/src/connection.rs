// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use resultdb_type::{Error, Result};
use rusqlite::Connection;

use crate::{OpenFlags, SqliteConfig};

/// Open a connection and apply the configured pragmas.
pub(crate) fn connect(config: &SqliteConfig) -> Result<Connection> {
	let path = &config.path;
	let open_failed = |e: rusqlite::Error| Error::StorageOpen {
		path: path.display().to_string(),
		reason: e.to_string(),
	};

	let conn = Connection::open_with_flags(path, convert_flags(&config.flags)).map_err(open_failed)?;

	conn.busy_timeout(config.busy_timeout).map_err(open_failed)?;
	conn.pragma_update(None, "cache_size", -(config.cache_size as i64)).map_err(open_failed)?;
	conn.pragma_update(None, "temp_store", config.temp_store.as_str()).map_err(open_failed)?;

	if config.flags.read_write {
		conn.pragma_update_and_check(None, "journal_mode", config.journal_mode.as_str(), |row| {
			row.get::<_, String>(0)
		})
		.map_err(open_failed)?;
		conn.pragma_update(None, "synchronous", config.synchronous_mode.as_str()).map_err(open_failed)?;
	} else {
		// The open is lazy; touch the schema so a missing or corrupt file fails here.
		conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
			.map_err(open_failed)?;
	}

	Ok(conn)
}

/// Convert our OpenFlags to rusqlite OpenFlags.
pub(crate) fn convert_flags(flags: &OpenFlags) -> rusqlite::OpenFlags {
	let mut rusqlite_flags = rusqlite::OpenFlags::empty();

	if flags.read_write {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	} else {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY;
	}
	if flags.create && flags.read_write {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	rusqlite_flags
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_convert_read_only_drops_create() {
		let flags = convert_flags(&OpenFlags::read_only().create(true));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY));
		assert!(!flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_CREATE));
	}

	#[test]
	fn test_convert_defaults() {
		let flags = convert_flags(&OpenFlags::default());
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_CREATE));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX));
	}

	#[test]
	fn test_connect_missing_read_only() {
		let config = SqliteConfig::read_only("/nonexistent/dir/results.db");
		let err = connect(&config).unwrap_err();
		assert!(matches!(err, Error::StorageOpen { .. }));
	}
}
