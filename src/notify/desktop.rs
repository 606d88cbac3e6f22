use anyhow::{Context, Result};
use tokio::process::Command;

use super::{JobAlert, Notifier};

/// OS notification: `osascript` on macOS, `notify-send` elsewhere.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    sound: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            sound: "Ping".to_string(),
        }
    }

    pub fn with_sound(mut self, sound: &str) -> Self {
        self.sound = sound.to_string();
        self
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape for an AppleScript string literal.
pub fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn applescript_for(alert: &JobAlert, sound: &str) -> String {
    format!(
        r#"display notification "{}" with title "{}" sound name "{}""#,
        applescript_escape(&alert.message),
        applescript_escape(&alert.title),
        applescript_escape(sound)
    )
}

#[async_trait::async_trait]
impl Notifier for DesktopNotifier {
    async fn send(&self, alert: &JobAlert) -> Result<()> {
        let status = if cfg!(target_os = "macos") {
            Command::new("osascript")
                .arg("-e")
                .arg(applescript_for(alert, &self.sound))
                .status()
                .await
                .context("spawn osascript")?
        } else {
            Command::new("notify-send")
                .arg(&alert.title)
                .arg(&alert.message)
                .status()
                .await
                .context("spawn notify-send")?
        };
        anyhow::ensure!(status.success(), "desktop notifier exited with {status}");
        tracing::info!("✅ desktop notification sent for {} jobs", alert.count);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "desktop"
    }
}
