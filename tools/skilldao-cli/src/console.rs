use alloy_primitives::Address;
use chrono::Utc;
use skilldao_client::render::{Form, RenderSurface};
use skilldao_common::activity::ActivityEntry;
use skilldao_common::certification::Certification;
use skilldao_common::format::{format_address, format_age};
use skilldao_common::notification::Notification;
use skilldao_common::stats::PlatformStats;

/// Prints display slots to stdout.
#[derive(Default)]
pub struct ConsoleSurface {
    /// Suppress the connection and balance lines.
    pub quiet_session: bool,
}

impl RenderSurface for ConsoleSurface {
    fn show_connection(&mut self, identity: Option<Address>) {
        if self.quiet_session {
            return;
        }
        match identity {
            Some(identity) => println!("Connected: {}", format_address(&identity)),
            None => println!("Not connected"),
        }
    }

    fn show_balance(&mut self, balance: Option<String>) {
        if let Some(balance) = balance.filter(|_| !self.quiet_session) {
            println!("Balance:   {balance}");
        }
    }

    fn show_stats(&mut self, stats: &PlatformStats) {
        println!("Certifications: {}", stats.total_certifications);
        println!("Endorsements:   {}", stats.estimated_endorsements);
        println!("Validators:     {}", stats.estimated_validators);
    }

    fn show_certification(&mut self, certification: &Certification) {
        for (label, value) in certification.detail_rows() {
            println!("{label:<18}{value}");
        }
    }

    fn show_activity(&mut self, entries: &[ActivityEntry]) {
        let now = Utc::now();
        for entry in entries.iter().take(5) {
            println!(
                "  {} ({}, {})",
                entry.label,
                entry.detail,
                format_age(&now, &entry.timestamp)
            );
        }
    }

    fn show_notification(&mut self, notification: &Notification) {
        println!("[{}] {}", notification.severity, notification.message);
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            tracing::info!("Waiting for the ledger...");
        }
    }

    fn clear_form(&mut self, form: Form) {
        tracing::debug!("{form:?} form submitted");
    }
}
