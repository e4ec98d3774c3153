use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use komik_config::Config;
use komik_pipeline::{Extracted, HttpFetcher, PageType, Pipeline};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    if let Command::Routes = cli.command {
        return print_routes();
    }

    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let profile = config.site(cli.site.as_deref()).or_raise(|| ErrorKind::Config)?.clone();
    let fetcher = HttpFetcher::new(&config.fetch.user_agent, config.fetch.timeout()).or_raise(|| ErrorKind::Config)?;
    let pipeline = Pipeline::new(profile, Arc::new(fetcher)).or_raise(|| ErrorKind::Config)?;
    info!(site = %pipeline.profile().name, "pipeline ready");

    let extracted = match &cli.command {
        Command::Extract { page_type, file } => {
            let html = std::fs::read_to_string(file).or_raise(|| ErrorKind::Input(file.display().to_string()))?;
            pipeline.extract(*page_type, &html)
        },
        command => match command.request(&pipeline.profile().origin)? {
            Some(request) => pipeline.run(&request).await,
            None => return Ok(()),
        },
    }
    .or_raise(|| ErrorKind::Pipeline)?;
    print_json(&extracted, cli.pretty)
}

fn print_json(extracted: &Extracted, pretty: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, extracted).or_raise(|| ErrorKind::Output)?;
    } else {
        serde_json::to_writer(&mut stdout, extracted).or_raise(|| ErrorKind::Output)?;
    }
    writeln!(stdout).or_raise(|| ErrorKind::Output)
}

fn print_routes() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for page_type in PageType::ALL {
        for route in page_type.routes() {
            writeln!(stdout, "{route:<24} {page_type}").or_raise(|| ErrorKind::Output)?;
        }
    }
    Ok(())
}
