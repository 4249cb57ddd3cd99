use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = folio_admin::Args::parse();
	folio_admin::run(args).await
}
