use anyhow::Result;
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::core::HostEvent;
use crate::widgets::radial_clock::RadialClockWidget;
use crate::widgets::slide_puzzle::SlidePuzzleWidget;
use crate::widgets::spinner::SpinnerWidget;
use crate::widgets::{Notice, WidgetBox};

/// Owns the loaded widgets and fans host events out to them. Widget errors
/// are logged and absorbed so one misbehaving widget cannot take down the
/// rest.
pub struct WidgetHost {
    widgets: HashMap<String, WidgetBox>,
}

impl WidgetHost {
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }

    pub async fn load_widgets(&mut self, config: &Config) -> Result<()> {
        let names = config.get_widgets();
        info!("🔌 Loading {} widgets", names.len());

        for name in &names {
            if let Err(e) = self.load_single_widget(name, config).await {
                error!("❌ Failed to load widget '{}': {}", name, e);
            }
        }

        info!("✅ Loaded {} widgets successfully", self.widgets.len());
        Ok(())
    }

    async fn load_single_widget(&mut self, name: &str, config: &Config) -> Result<()> {
        info!("📦 Loading widget: {}", name);

        let mut widget: WidgetBox = match name {
            "radial_clock" => Box::new(RadialClockWidget::new()),
            "slide_puzzle" => Box::new(SlidePuzzleWidget::new()),
            "spinner" => Box::new(SpinnerWidget::new()),
            _ => {
                warn!("⚠️  Unknown widget: {}", name);
                return Ok(());
            }
        };

        let widget_config = config
            .widgets
            .get(name)
            .cloned()
            .unwrap_or(toml::Value::Table(toml::map::Map::new()));

        widget.init(&widget_config).await?;
        self.widgets.insert(name.to_string(), widget);

        info!("✅ Widget '{}' loaded successfully", name);
        Ok(())
    }

    /// Deliver one event to every widget, collecting the notices they emit.
    pub async fn handle_event(&mut self, event: &HostEvent) -> Vec<(String, Notice)> {
        let mut notices = Vec::new();
        for (name, widget) in &mut self.widgets {
            match widget.handle_event(event).await {
                Ok(emitted) => {
                    notices.extend(emitted.into_iter().map(|n| (name.clone(), n)));
                }
                Err(e) => {
                    warn!("⚠️  Widget '{}' error handling event: {}", name, e);
                }
            }
        }
        notices
    }

    pub async fn handle_command(
        &mut self,
        widget_name: &str,
        command: &str,
        args: &[&str],
    ) -> Result<String> {
        if let Some(widget) = self.widgets.get_mut(widget_name) {
            widget.handle_command(command, args).await
        } else {
            Err(anyhow::anyhow!("Widget '{}' not found", widget_name))
        }
    }

    pub fn get_widget_count(&self) -> usize {
        self.widgets.len()
    }
}

impl Default for WidgetHost {
    fn default() -> Self {
        Self::new()
    }
}
