use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Fatal error with optional provider context lines
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    message: String,
    context_title: Option<String>,
    context: Vec<String>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context_title: None,
            context: Vec::new(),
            fix: None,
        }
    }

    pub fn with_context(mut self, title: impl Into<String>, lines: Vec<String>) -> Self {
        if !lines.is_empty() {
            self.context_title = Some(title.into());
            self.context = lines;
        }
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = format!(
            "\n{} {} {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error("ERROR").bold().render(supports_color),
            self.message
        );

        if let Some(title) = &self.context_title {
            out.push_str(&format!("\n  {}\n", ColoredText::dim(title.as_str()).render(supports_color)));
            for line in &self.context {
                out.push_str(&format!("    {}\n", line));
            }
        }

        if let Some(fix) = &self.fix {
            out.push_str(&format!(
                "\n{} FIX: {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                fix
            ));
        }

        out
    }
}
