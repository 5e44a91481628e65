// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use resultdb::{
	ColumnDescriptor, Error, JournalMode, LoggingConfig, ReaderConfig, ResultReader, ResultWriter, Schema,
	SortTerm, SqliteConfig, SynchronousMode, Value, View, WriterConfig, create_result_reader,
	create_result_writer, init_logging, record,
	sqlite::SqliteStorage,
};
use resultdb_testing::tempdir::temp_dir;

fn schema() -> Schema {
	let declared: Vec<ColumnDescriptor> = serde_json::from_str(
		r#"[
			{"name": "gene", "kind": 20, "display_name": "Gene", "index": 5},
			{"name": "chrom", "kind": 20, "visibility": 20},
			{"name": "start", "kind": 30, "visibility": 20},
			{"name": "end", "kind": 30, "visibility": 20},
			{"name": "score", "kind": 40, "display_name": "Score", "format": {"template": "%.2f"}},
			{"name": "strand", "kind": 60, "enum_labels": [[0, "+"], [1, "-"]]},
			{"name": "significant", "kind": 50},
			{"name": "source", "kind": 110, "display_name": "Source"}
		]"#,
	)
	.unwrap();
	Schema::new(declared).unwrap()
}

fn write_genes(writer: &mut ResultWriter) {
	writer
		.add_result(&record! {
			"gene" => "BRCA1", "chrom" => "chr17", "start" => 43044295, "end" => 43125483,
			"score" => 0.91234, "strand" => 1, "significant" => true,
			"source" => "NCBI|https://www.ncbi.nlm.nih.gov/gene/672",
		})
		.unwrap();
	writer
		.add_result(&record! {
			"gene" => "TP53", "chrom" => "chr17", "start" => 7661779, "end" => 7687538,
			"score" => 0.5, "strand" => 1, "significant" => false,
			"source" => "https://www.ncbi.nlm.nih.gov/gene/7157",
		})
		.unwrap();
	writer
		.add_result(&record! {
			"gene" => "EGFR", "chrom" => "chr7", "start" => 55019017, "end" => 55211628,
			"score" => 0.75, "strand" => 0, "significant" => true,
		})
		.unwrap();
}

#[test]
fn test_write_and_browse() {
	init_logging(&LoggingConfig::default());

	temp_dir(|dir| {
		let path = dir.join("genes.db");
		let mut writer = create_result_writer(&path, schema()).unwrap();
		write_genes(&mut writer);
		writer.close().unwrap();

		let mut reader = create_result_reader(&path, schema()).unwrap();
		reader.add_filter("significant~EQ~true").unwrap();
		assert_eq!(reader.get_item_count().unwrap(), 2);

		let tuples = reader.get_result_tuples(&[SortTerm::parse("score DESC").unwrap()], 0, 0).unwrap();
		let rendered = tuples.iter().map(|t| reader.interpret_tuple(t, false, false).unwrap()).collect::<Vec<_>>();
		assert_eq!(
			rendered,
			vec![
				vec![
					"BRCA1",
					"chr17",
					"43044295",
					"43125483",
					"0.91",
					"-",
					"Y",
					"<a target='_blank' href='https://www.ncbi.nlm.nih.gov/gene/672'>NCBI</a>"
				],
				vec!["EGFR", "chr7", "55019017", "55211628", "0.75", "+", "Y", ""],
			]
		);

		let info = reader.get_result_info_at_index(2).unwrap().unwrap();
		assert_eq!(info[0], ("Gene".to_string(), "TP53".to_string()));
		assert_eq!(info.len(), 5);
		Ok(())
	})
	.expect("test failed")
}

#[test]
fn test_view_from_json() {
	temp_dir(|dir| {
		let path = dir.join("genes.db");
		let mut writer = create_result_writer(&path, schema()).unwrap();
		write_genes(&mut writer);
		writer.close().unwrap();

		let view: View = serde_json::from_str(
			r#"[
				{"name": "gene"},
				{"name": "locus", "display_name": "Locus", "group": ["chrom", "start", "end"],
				 "format": {"named": "location"}},
				{"name": "source", "format": {"named": "html_url"}}
			]"#,
		)
		.unwrap();

		let mut reader = create_result_reader(&path, schema()).unwrap();
		reader.set_view_info(view).unwrap();
		assert_eq!(
			reader.get_display_headers(),
			vec![
				("gene".to_string(), "Gene".to_string()),
				("locus".to_string(), "Locus".to_string()),
				("source".to_string(), "Source".to_string()),
			]
		);

		let tuple = reader.get_result_tuple(2).unwrap().unwrap();
		assert_eq!(
			reader.interpret_tuple(&tuple, true, false).unwrap(),
			vec!["TP53", "chr17:7661779-7687538", "https://www.ncbi.nlm.nih.gov/gene/7157"]
		);
		Ok(())
	})
	.expect("test failed")
}

#[test]
fn test_tuned_storage() {
	temp_dir(|dir| {
		let path = dir.join("genes.db");
		let sqlite = SqliteConfig::new(&path)
			.journal_mode(JournalMode::Truncate)
			.synchronous_mode(SynchronousMode::Normal);
		let config = WriterConfig::new(&path).sqlite(sqlite).commit_every(2);
		let mut writer = ResultWriter::create_with(config, schema()).unwrap();
		write_genes(&mut writer);
		assert_eq!(writer.pending(), 1);
		writer.close().unwrap();

		let reader = ResultReader::open_with(ReaderConfig::new(&path).lenient(), schema()).unwrap();
		assert_eq!(reader.get_item_count().unwrap(), 3);
		assert!(reader.get_result_tuples(&[SortTerm::asc("missing")], 0, 0).unwrap().is_empty());
		assert_eq!(reader.get_result_dict(3, false).unwrap().unwrap()["source"], Value::Null);
		Ok(())
	})
	.expect("test failed")
}

#[test]
fn test_reader_requires_result_table() {
	temp_dir(|dir| {
		let path = dir.join("other.db");
		let storage = SqliteStorage::open(&SqliteConfig::new(&path)).unwrap();
		storage.execute_batch("CREATE TABLE other (x INTEGER);").unwrap();
		drop(storage);

		let err = create_result_reader(&path, schema()).err().unwrap();
		assert!(matches!(err, Error::Schema { .. }));
		Ok(())
	})
	.expect("test failed")
}
