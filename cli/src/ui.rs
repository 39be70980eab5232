use colored::Colorize;

/// Print a success message
pub fn success_message(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print a warning message
pub fn warning_message(message: &str) {
    println!("{} {}", "⚠️ ".yellow(), message.yellow());
}

/// Print an error message
pub fn error_message(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red().bold());
}

/// Print a section header to separate logical sections of output
pub fn section_header(title: &str) {
    println!("\n{}", format!("==== {} ====", title).cyan().bold());
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}
