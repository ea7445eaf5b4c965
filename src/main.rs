use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = upload_relocator::cli::parse();
    app::run(args)
}
