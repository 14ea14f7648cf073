//! Plain-text rendering of a reading and of the current flow state.

use std::fmt::Write;

use crate::reading::models::{ReadingResult, Trait};
use crate::ui::flow::ReadingFlow;

pub const PREMIUM_PRICE_LABEL: &str = "€4.99";

fn write_traits(out: &mut String, heading: &str, traits: &[Trait]) {
    let _ = writeln!(out, "{heading}");
    for t in traits {
        let _ = writeln!(out, "  {} {} - {}", t.emoji, t.name, t.description);
    }
}

fn write_list(out: &mut String, heading: &str, items: &[String]) {
    let _ = writeln!(out, "{heading}");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

pub fn render_reading(reading: &ReadingResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Your Cosmic Career Profile");
    let _ = writeln!(out, "Sign:         {}", reading.sign);
    let _ = writeln!(out, "Ascendant:    {}", reading.ascendant);
    let _ = writeln!(out, "Cosmic Score: {}/100", reading.cosmic_score);
    let _ = writeln!(out);
    write_traits(&mut out, "💫 Superpowers", &reading.powers);
    write_traits(&mut out, "⚠️ Traps", &reading.traps);
    let _ = writeln!(out, "🚀 Prediction\n  {}", reading.prediction);
    write_list(&mut out, "✅ Compatible jobs", &reading.compatible_jobs);
    write_list(&mut out, "❌ Jobs to avoid", &reading.avoid_jobs);
    let _ = writeln!(out);
    let _ = writeln!(out, "Share: {}", reading.share_text());
    let _ = write!(out, "Unlock the premium report for {PREMIUM_PRICE_LABEL}");
    out
}

/// One screen for whatever state the flow is in.
pub fn render_flow(flow: &ReadingFlow) -> String {
    match flow {
        ReadingFlow::Form(draft) => match &draft.cv {
            Some(cv) => format!("Birth date: {} | CV: {}", draft.birth_date, cv.file_name),
            None => format!("Birth date: {}", draft.birth_date),
        },
        ReadingFlow::Submitting(_) => "Reading the stars...".to_string(),
        ReadingFlow::Result(reading) => render_reading(reading),
        ReadingFlow::Failed { message, .. } => format!("Something went wrong: {message}"),
    }
}
