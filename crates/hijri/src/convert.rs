use crate::prelude::{eprintln, println, *};
use hijri_core::calendar::{Numerals, UmmAlQuraConverter};
use hijri_core::handler::{handle_body, Reply};

#[derive(Debug, clap::Parser)]
#[command(name = "convert")]
#[command(about = "Convert a single Gregorian date and print the JSON response")]
pub struct App {
    /// Gregorian date in dd/mm/yyyy format (e.g., "27/07/2025")
    #[clap(env = "HIJRI_DATE")]
    date: String,

    /// Digit set for the Hijri dates ("latin" or "arabic-indic")
    #[arg(long, env = "HIJRI_NUMERALS", default_value = "latin")]
    numerals: Numerals,
}

/// Module entry point
pub fn run(app: App, global: crate::Global) -> Result<()> {
    let converter = UmmAlQuraConverter::new(app.numerals);
    let reply = convert(&app.date, &converter);

    if global.verbose {
        eprintln!("Status: {}", reply.status);
    }

    println!("{}", reply.body.to_pretty_json().map_err(Error::Render)?);

    if !reply.body.is_success() {
        return Err(Error::Rejected(reply.body.message).into());
    }

    Ok(())
}

/// Run `date` through the same path an HTTP request body takes
fn convert(date: &str, converter: &UmmAlQuraConverter) -> Reply {
    let body = serde_json::json!({ "date": date }).to_string();
    handle_body(body.as_bytes(), converter)
}
