use crate::ui;
use dialoguer::{theme::ColorfulTheme, Confirm};
use screening::Notifier;
use std::io::IsTerminal;

/// Terminal stand-in for the page's alert, confirm and scroll affordances
pub struct TerminalNotifier {
    interactive: bool,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self { interactive: true }
    }

    /// Notifier that never prompts; every confirmation is declined
    #[cfg(test)]
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    fn is_interactive(&self) -> bool {
        self.interactive && std::io::stdin().is_terminal()
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        ui::error_message(message);
    }

    fn confirm(&self, message: &str) -> bool {
        if !self.is_interactive() {
            return false;
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn scroll_into_view(&self, element_id: &str) {
        tracing::debug!(element_id, "Report ready");
        ui::section_header("Hasil Diagnosa");
    }
}
