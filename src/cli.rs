use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "qasheet", version)]
pub struct Args {
    /// One-shot mode: generate test cases for this URL and write the workbook
    /// to --out instead of serving the web form.
    #[arg(long)]
    pub url: Option<String>,

    /// Optional free-text context handed to the model alongside the page.
    #[arg(long, default_value = "")]
    pub context: String,

    #[arg(long, default_value = "test_cases.xlsx")]
    pub out: String,

    /// Model name; overrides OPENAI_MODEL.
    #[arg(long)]
    pub model: Option<String>,

    /// Listen port for the web form; overrides PORT.
    #[arg(long)]
    pub port: Option<u16>,
}
