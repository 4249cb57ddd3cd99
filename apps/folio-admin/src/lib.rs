use std::{fs, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use folio_domain::DocumentTags;
use folio_service::FolioService;
use folio_storage::db::Db;

#[derive(Debug, Parser)]
#[command(
	version = folio_cli::VERSION,
	rename_all = "kebab",
	styles = folio_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
#[command(rename_all = "kebab")]
pub enum Command {
	/// Print the weighted, combined terms of a document.
	Terms {
		#[arg(long, value_name = "ID")]
		doc: String,
	},
	/// Print an owner's annotations, for one document or all of them.
	Annotations {
		#[arg(long, value_name = "ID")]
		owner: String,
		#[arg(long, value_name = "ID")]
		doc: Option<String>,
		#[arg(long, value_name = "N", requires = "doc")]
		page: Option<i32>,
	},
	/// Print the shared tags of a document.
	Tags {
		#[arg(long, value_name = "ID")]
		doc: String,
	},
	/// Print the tags an owner removed from a document.
	RemovedTags {
		#[arg(long, value_name = "ID")]
		owner: String,
		#[arg(long, value_name = "ID")]
		doc: String,
	},
	AnnotatedDocuments,
	TaggedDocuments,
	/// Replace shared document tags from a JSON file holding one collection or an array of them.
	ImportTags {
		#[arg(long, value_name = "FILE")]
		file: PathBuf,
	},
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagImport {
	Many(Vec<DocumentTags>),
	One(DocumentTags),
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = folio_config::load(&args.config)?;

	init_tracing(&config)?;

	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema().await?;

	let service = FolioService::from_config(&config, Arc::new(db))?;
	let json = execute(&service, args.command).await?;

	println!("{json}");

	Ok(())
}

/// Runs one command and renders its result as pretty JSON.
pub async fn execute(service: &FolioService, command: Command) -> color_eyre::Result<String> {
	let json = match command {
		Command::Terms { doc } =>
			serde_json::to_string_pretty(&service.document_terms(&doc).await?)?,
		Command::Annotations { owner, doc: None, .. } =>
			serde_json::to_string_pretty(&service.annotations_by_owner(&owner).await?)?,
		Command::Annotations { owner, doc: Some(doc), page: None } =>
			serde_json::to_string_pretty(&service.get_annotations(&owner, &doc).await?)?,
		Command::Annotations { owner, doc: Some(doc), page: Some(page) } =>
			serde_json::to_string_pretty(&service.get_page_annotations(&owner, &doc, page).await?)?,
		Command::Tags { doc } =>
			serde_json::to_string_pretty(&service.get_tags_by_document(&doc).await?)?,
		Command::RemovedTags { owner, doc } =>
			serde_json::to_string_pretty(&service.get_removed_tags(&owner, &doc).await?)?,
		Command::AnnotatedDocuments =>
			serde_json::to_string_pretty(&service.annotated_documents().await?)?,
		Command::TaggedDocuments =>
			serde_json::to_string_pretty(&service.tagged_documents().await?)?,
		Command::ImportTags { file } => {
			let raw = fs::read_to_string(&file)
				.map_err(|err| eyre::eyre!("Failed to read {}: {err}.", file.display()))?;
			let collections = match serde_json::from_str::<TagImport>(&raw)? {
				TagImport::Many(collections) => collections,
				TagImport::One(collection) => vec![collection],
			};

			for collection in &collections {
				service.replace_document_tags(collection).await?;
			}

			tracing::info!(file = %file.display(), documents = collections.len(), "Tags imported.");

			let documents = collections
				.into_iter()
				.map(|collection| collection.document_id)
				.collect::<Vec<_>>();

			serde_json::to_string_pretty(&documents)?
		},
	};

	Ok(json)
}

fn init_tracing(config: &folio_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}
