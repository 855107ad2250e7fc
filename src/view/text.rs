//! Plain-text rendering of the dashboard for terminals.

use std::fmt::Write;

use super::panels::{
    DashboardView, DetailPanel, DiagnosisPanel, PatientListItem, PressureComponent,
    NO_LAB_RESULTS_MESSAGE,
};

/// Render the whole dashboard
pub fn render_text(view: &DashboardView) -> String {
    match view {
        DashboardView::Loading { message } | DashboardView::Empty { message } => {
            format!("{}\n", message)
        }
        DashboardView::Ready(panels) => {
            let mut out = render_patient_list(&panels.patients);

            if let Some(diagnosis) = &panels.diagnosis {
                out.push('\n');
                out.push_str(&render_diagnosis(diagnosis));
            }

            if let Some(detail) = &panels.detail {
                out.push('\n');
                out.push_str(&render_detail(detail));
            }

            out
        }
    }
}

/// Patients column, selection marked with `>`
pub fn render_patient_list(items: &[PatientListItem]) -> String {
    let mut out = String::from("Patients\n");

    for item in items {
        let marker = if item.selected { ">" } else { " " };
        let _ = writeln!(out, "{} {:<24} {}", marker, item.name, item.summary);
    }

    out
}

/// Diagnosis history table, vitals and diagnosis list
pub fn render_diagnosis(panel: &DiagnosisPanel) -> String {
    let mut out = String::from("Diagnosis History\n");

    if panel.chart.is_empty() {
        out.push_str("  No history recorded.\n");
    } else {
        let _ = writeln!(out, "  {:<16} {:>9} {:>9}", "Month", "Systolic", "Diastolic");
        let systolic = panel.chart.values(PressureComponent::Systolic);
        let diastolic = panel.chart.values(PressureComponent::Diastolic);

        for (i, label) in panel.chart.labels.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:<16} {:>9} {:>9}",
                label,
                systolic.get(i).map(|v| format_value(*v)).unwrap_or_default(),
                diastolic.get(i).map(|v| format_value(*v)).unwrap_or_default(),
            );
        }
    }

    let vitals: Vec<String> = panel
        .vitals
        .iter()
        .map(|v| {
            let value = v.value.map(format_value).unwrap_or_else(|| "-".to_string());
            format!("{}: {} {}", v.label, value, v.unit)
        })
        .collect();
    let _ = writeln!(out, "  {}", vitals.join(" | "));

    out.push_str("\nDiagnosis List\n");
    let _ = writeln!(
        out,
        "  {:<24} | {:<36} | {}",
        "Problem/Diagnosis", "Description", "Status"
    );
    for row in &panel.diagnostics {
        let _ = writeln!(
            out,
            "  {:<24} | {:<36} | {}",
            row.problem, row.description, row.status
        );
    }

    out
}

/// Profile fields and lab results
pub fn render_detail(panel: &DetailPanel) -> String {
    let mut out = format!("{}\n", panel.name);

    let fields = [
        ("Date of Birth", &panel.date_of_birth),
        ("Gender", &panel.gender),
        ("Contact Info.", &panel.contact_info),
        ("Emergency Contacts", &panel.emergency_contacts),
        ("Insurance Provider", &panel.insurance_provider),
    ];
    for (label, value) in fields {
        let _ = writeln!(out, "  {:<20} {}", label, value.as_deref().unwrap_or("-"));
    }

    out.push_str("\nLab Results\n");
    if panel.lab_results.is_empty() {
        let _ = writeln!(out, "  {}", NO_LAB_RESULTS_MESSAGE);
    } else {
        for result in &panel.lab_results {
            let _ = writeln!(out, "  {}", result);
        }
    }

    out
}

/// Whole numbers without decimals, everything else to one place
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
