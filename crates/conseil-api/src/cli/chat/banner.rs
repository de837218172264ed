//! Welcome banner and confirmation view.

use console::style;

/// Print the banner shown when a consultation starts.
pub fn print_welcome_banner(first_name: &str, session_id: &str) {
    println!();
    println!(
        "  {} {}",
        style("*").cyan().bold(),
        style("Consultation crédit").cyan().bold()
    );
    println!(
        "  {}",
        style(format!("Bonjour {first_name}, un conseiller va vous répondre.")).dim()
    );
    println!();
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Tapez /aide pour les commandes, /fin pour terminer").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Lines of the confirmation view shown after navigation.
pub fn confirmation_lines(destination: &str) -> Vec<String> {
    vec![
        format!("{} Merci pour votre demande !", style("✓").green().bold()),
        "Votre message a été envoyé avec succès.".to_string(),
        String::new(),
        "Notre équipe d'experts en crédit examinera votre demande et vous contactera".to_string(),
        "dans les plus brefs délais.".to_string(),
        String::new(),
        format!("{}", style("Que se passe-t-il ensuite ?").bold()),
        "  1. Examen   Nous analysons votre demande en détail".to_string(),
        "  2. Contact  Un expert vous contacte sous 24-48h".to_string(),
        "  3. Solution Nous créons votre plan personnalisé".to_string(),
        String::new(),
        format!("{}", style(destination).dim()),
    ]
}

pub fn print_confirmation(destination: &str) {
    println!();
    for line in confirmation_lines(destination) {
        println!("  {line}");
    }
    println!();
}
