//! Terminal rendering for appointments and run summaries.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use termine_core::Appointment;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn render_document(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    format!("📄 {}", name)
}

pub fn render_appointment(appointment: &Appointment) -> String {
    format!(
        "{} {} {}",
        appointment.date.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        appointment.therapy_kind,
        format!("({})", appointment.therapist_name).dimmed()
    )
}

/// "Found N appointments:" followed by one indented line each
pub fn render_appointments(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return "   No appointments found".dimmed().to_string();
    }

    let mut lines = vec![format!(
        "   Found {} {}:",
        appointments.len(),
        pluralize("appointment", appointments.len())
    )];
    lines.extend(
        appointments
            .iter()
            .map(|a| format!("     {}", render_appointment(a))),
    );
    lines.join("\n")
}

pub fn render_error(context: &str, error: &anyhow::Error) -> String {
    format!("   {} {}", context.red(), format!("{:#}", error).red())
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_appointments_lists_each() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 27)
            .unwrap()
            .and_hms_opt(16, 40, 0)
            .unwrap();
        let appointments = vec![
            Appointment::new(date, "KG ZNS", "Katja"),
            Appointment::new(date, "MT", "Mike"),
        ];

        let out = render_appointments(&appointments);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   Found 2 appointments:");
        assert!(lines[1].contains("KG ZNS") && lines[1].contains("Katja"));
        assert!(lines[2].contains("MT") && lines[2].contains("Mike"));
    }

    #[test]
    fn test_render_appointments_empty() {
        assert!(render_appointments(&[]).contains("No appointments found"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("appointment", 1), "appointment");
        assert_eq!(pluralize("appointment", 0), "appointments");
        assert_eq!(pluralize("document", 3), "documents");
    }
}
