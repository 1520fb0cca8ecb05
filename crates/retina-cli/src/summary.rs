use console::{Style, StyledObject};
use retina_core::evolution::Evolution;
use retina_core::report::ReportExport;
use retina_core::scan::Scan;
use retina_core::severity::{ColorTier, SeverityLevel};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

fn tier_style(tier: ColorTier) -> Style {
    match tier {
        ColorTier::Success => Style::new().green(),
        ColorTier::Info => Style::new().cyan(),
        ColorTier::Warning => Style::new().yellow(),
        ColorTier::Danger => Style::new().red().bold(),
    }
}

/// Coloured `[Level]` badge.
pub fn severity_badge(level: SeverityLevel) -> StyledObject<String> {
    tier_style(level.profile().color_tier).apply_to(format!("[{level}]"))
}

fn underline(s: &Styles, title: &str) {
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_classification(label: &str, level: SeverityLevel, rank: u8) {
    let s = Styles::new();
    let profile = level.profile();

    println!();
    underline(&s, "Classification");
    println!("  {:<14}{}", s.label.apply_to("Label"), s.value.apply_to(label));
    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Level"),
        s.value.apply_to(level.ordinal()),
        severity_badge(level)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Tier"),
        tier_style(profile.color_tier).apply_to(profile.color_tier)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Queue rank"),
        s.value.apply_to(rank)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Follow-up"),
        s.value.apply_to(profile.follow_up)
    );
    println!();
    println!("  {}", s.header.apply_to("Advice"));
    for advice in profile.advice {
        println!("    - {advice}");
    }
    println!();
}

pub fn print_queue(queue: &[Scan]) {
    let s = Styles::new();

    println!();
    underline(&s, "Review Queue");
    if queue.is_empty() {
        println!("  {}", s.disabled.apply_to("no pending scans"));
        println!();
        return;
    }
    for scan in queue {
        let level = scan.severity();
        println!(
            "  {:<6}{:<16}{:<22}{:<12}{} {}",
            s.value.apply_to(scan.id.to_string()),
            s.label.apply_to(scan.created_at.format("%Y-%m-%d %H:%M")),
            scan.patient.full_name(),
            format!("{:.0}%", scan.confidence * 100.0),
            severity_badge(level),
            scan.label_or_default(),
        );
    }
    println!();
}

pub fn print_evolution(patient: &str, evolution: &Evolution) {
    let s = Styles::new();

    println!();
    underline(&s, "Evolution");
    println!("  {:<14}{}", s.label.apply_to("Patient"), s.value.apply_to(patient));
    println!();
    match evolution {
        Evolution::InsufficientData { available } => {
            println!(
                "  {}",
                s.disabled.apply_to(format!(
                    "Pas assez de données pour afficher une évolution ({available} examen)"
                ))
            );
        }
        Evolution::Series(points) => {
            println!(
                "  {:<8}{:<8}{:<8}{}",
                s.label.apply_to("x"),
                s.label.apply_to("y"),
                s.label.apply_to("level"),
                s.label.apply_to("scan")
            );
            for p in points {
                println!(
                    "  {:<8.1}{:<8.1}{:<8}{}  {}",
                    p.x,
                    p.y,
                    p.level.ordinal(),
                    severity_badge(p.level),
                    p.tooltip()
                );
            }
        }
    }
    println!();
}

pub fn print_export(export: &ReportExport) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Export"));
    println!(
        "    {:<14}{} {}",
        s.label.apply_to("Diagnosis"),
        s.value.apply_to(&export.final_diagnosis),
        severity_badge(export.severity)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Follow-up"),
        s.value.apply_to(&export.follow_up)
    );
    if export.notes.is_empty() {
        println!("    {:<14}{}", s.label.apply_to("Notes"), s.disabled.apply_to("none"));
    } else {
        println!("    {:<14}{}", s.label.apply_to("Notes"), export.notes);
    }
    println!();
}
