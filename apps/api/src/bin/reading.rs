//! Terminal client: fills in the reading form, submits it to a running
//! AstroPunch API and prints the result. `--premium` also prints a checkout link.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use astropunch::ui::client::{submit_reading, ReadingApiClient};
use astropunch::ui::flow::{CvUpload, ReadingFlow};
use astropunch::ui::render::render_flow;

#[derive(Debug, Parser)]
#[command(name = "astropunch-reading", about = "Get your cosmic career reading")]
struct Cli {
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    birthdate: NaiveDate,

    /// Optional résumé file (PDF or text)
    #[arg(long)]
    cv: Option<PathBuf>,

    /// Base URL of the AstroPunch API
    #[arg(long, env = "ASTROPUNCH_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Also request a premium checkout link
    #[arg(long)]
    premium: bool,
}

fn load_cv(path: &Path) -> Result<CvUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cv".to_string());
    Ok(CvUpload {
        file_name,
        bytes: Bytes::from(bytes),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let client = ReadingApiClient::new(&cli.api_url);

    let mut flow = ReadingFlow::default();
    flow.set_birth_date(cli.birthdate.format("%Y-%m-%d").to_string())?;
    if let Some(path) = &cli.cv {
        flow.attach_cv(load_cv(path)?)?;
    }

    println!("{}", render_flow(&flow));
    submit_reading(&mut flow, &client).await?;
    println!("{}", render_flow(&flow));

    if flow.result().is_none() {
        bail!("no reading produced");
    }

    if cli.premium {
        let url = client.checkout("premium").await?;
        println!("Complete your purchase: {url}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_cv_reads_bytes_and_name() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"Staff engineer").unwrap();

        let cv = load_cv(file.path()).unwrap();

        assert_eq!(&cv.bytes[..], b"Staff engineer");
        assert!(cv.file_name.ends_with(".txt"));
    }

    #[test]
    fn test_load_cv_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_cv(&dir.path().join("nope.pdf")).is_err());
    }

    #[test]
    fn test_cli_parses_birthdate() {
        let cli = Cli::try_parse_from(["astropunch-reading", "--birthdate", "1990-05-14"]).unwrap();
        assert_eq!(cli.birthdate, NaiveDate::from_ymd_opt(1990, 5, 14).unwrap());
        assert!(!cli.premium);
        assert!(Cli::try_parse_from(["astropunch-reading", "--birthdate", "14/05/1990"]).is_err());
    }
}
