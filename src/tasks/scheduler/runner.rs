use std::path::{Path, PathBuf};
use std::time::Duration;

use super::state::BotState;
use crate::{
    errors::{AppError, AppResult},
    models::{config::Config, seen::SeenSet, subscription::Subscription},
    tasks::{
        chatwork_sender::report::compose_report,
        feed_monitor::{
            diff::{diff, FeedDiff},
            fetcher::FeedFetcher,
        },
    },
};

/// Outcome of one pass over every subscription.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub processed: usize,
    pub failed: usize,
    pub messages_sent: usize,
}

pub struct Scheduler {
    config_path: PathBuf,
    fetcher: FeedFetcher,
    state: BotState,
}

impl Scheduler {
    /// Performs the first config load. There is nothing to fall back on
    /// yet, so any failure is fatal.
    pub fn new(config_path: impl Into<PathBuf>) -> AppResult<Self> {
        let config_path = config_path.into();
        let config = Config::load(&config_path).map_err(AppError::fatal)?;
        log::info!(
            "Configuration has been updated. {} subscriptions, interval {}s",
            config.subscriptions.len(),
            config.interval_secs
        );

        Ok(Self {
            config_path,
            fetcher: FeedFetcher::new(),
            state: BotState::new(config),
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.state.config.interval_secs)
    }

    /// Re-reads the config file. Installs a new config and client only when
    /// the file content changed; returns whether it did. On error the active
    /// state is left as it was.
    pub fn reload_config(&mut self) -> AppResult<bool> {
        let candidate = Config::load(&self.config_path)?;
        match self.state.updated_with(candidate) {
            Some(next) => {
                self.state = next;
                log::info!(
                    "Configuration has been updated. {} subscriptions, interval {}s",
                    self.state.config.subscriptions.len(),
                    self.state.config.interval_secs
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs every subscription once, in order. A failing subscription is
    /// logged and does not stop the ones after it.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();
        for sub in &self.state.config.subscriptions {
            report.processed += 1;
            match self.process_subscription(sub).await {
                Ok(sent) => report.messages_sent += sent,
                Err(e) => {
                    report.failed += 1;
                    log::error!("Error processing feed {}: {e:?}", sub.feed_url);
                }
            }
        }
        report
    }

    /// Fetch, diff, notify, persist. Returns the number of messages sent.
    ///
    /// The ledger is only written after every room was notified, so a
    /// delivery failure leaves the entries to be reported next cycle, to
    /// every room including those already notified.
    pub async fn process_subscription(&self, sub: &Subscription) -> AppResult<usize> {
        let entries = self.fetcher.fetch(&sub.feed_url).await?;
        let seen = SeenSet::load(&sub.ledger_path)?;
        let FeedDiff {
            new_entries,
            updated_seen,
        } = diff(entries, &seen);

        let mut sent = 0;
        if let Some(message) = compose_report(&sub.title, &new_entries)? {
            log::info!(
                "Found {} new entries in {}, notifying {} rooms",
                new_entries.len(),
                sub.feed_url,
                sub.rooms.len()
            );
            log::debug!("Message body:\n{message}");
            for room in &sub.rooms {
                let message_id = match self.state.client.send_message(room, &message).await {
                    Ok(id) => id,
                    Err(e) => {
                        if sent > 0 {
                            log::warn!(
                                "Delivery to room {room} failed after {sent} rooms of {} were notified; \
                                 ledger not saved, those rooms get the batch again next cycle",
                                sub.feed_url
                            );
                        }
                        return Err(e);
                    }
                };
                log::info!("Message {message_id} sent to room {room}");
                sent += 1;
            }
        } else {
            log::debug!("No new entries in {}", sub.feed_url);
        }

        updated_seen.save(&sub.ledger_path)?;
        Ok(sent)
    }
}

/// Runs forever: cycle, sleep, reload. Only returns if the first config
/// load fails.
pub async fn start(config_path: PathBuf) -> AppResult<()> {
    let mut scheduler = Scheduler::new(config_path)?;
    loop {
        let report = scheduler.run_cycle().await;
        log::info!(
            "Cycle finished: {} subscriptions, {} failed, {} messages sent",
            report.processed,
            report.failed,
            report.messages_sent
        );

        tokio::time::sleep(scheduler.interval()).await;

        if let Err(e) = scheduler.reload_config() {
            log::error!(
                "Error reloading {}, keeping previous configuration: {e:?}",
                scheduler.config_path().display()
            );
        }
    }
}
