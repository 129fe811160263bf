use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cvpress::Template;

#[derive(Parser)]
#[command(name = "cvpress", version)]
#[command(about = "Paginate a CV document and export it as a print-ready PDF")]
struct Cli {
    /// CV document (JSON)
    input: PathBuf,

    /// Output PDF path; defaults to CV_<Name>.pdf next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template: two-column or single-column
    #[arg(short, long, default_value = "two-column")]
    template: String,

    /// Override the document's language (en or fr)
    #[arg(short, long)]
    lang: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let template = Template::by_name(&cli.template);
    match cvpress::export_file(
        &cli.input,
        cli.output.as_deref(),
        &template,
        cli.lang.as_deref(),
    ) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("export failed: {e}");
            ExitCode::FAILURE
        }
    }
}
