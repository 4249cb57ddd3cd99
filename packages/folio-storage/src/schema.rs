use std::sync::OnceLock;

static SCHEMA: OnceLock<String> = OnceLock::new();

pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

/// The rendered schema as individual statements, in execution order.
pub fn statements() -> Vec<&'static str> {
	SCHEMA
		.get_or_init(render_schema)
		.split(';')
		.map(str::trim)
		.filter(|statement| !statement.is_empty())
		.collect()
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_document_annotations.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_document_annotations.sql")),
				"tables/002_document_tags.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_document_tags.sql")),
				"tables/003_document_removed_tags.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_document_removed_tags.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
