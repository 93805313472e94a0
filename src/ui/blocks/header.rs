//! Run header: what is about to be deployed, and where

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone)]
pub struct RunHeader {
    icon: Icon,
    target: String,
    fields: Vec<(&'static str, String)>,
}

impl RunHeader {
    /// `target` is shown next to the icon, e.g. `shop -> shop-prod`
    pub fn new(icon: Icon, target: impl Into<String>) -> Self {
        Self {
            icon,
            target: target.into(),
            fields: Vec::new(),
        }
    }

    /// Add a labelled field; empty values are left out
    pub fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.fields.push((label, value));
        }
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let width = self.fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

        let mut out = format!(
            "{} {}\n",
            self.icon.colored(supports_color, supports_unicode),
            ColoredText::info(self.target.as_str())
                .bold()
                .render(supports_color)
        );
        for (label, value) in &self.fields {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                label,
                ColoredText::dim(value.as_str()).render(supports_color),
                width = width
            ));
        }
        out
    }
}
