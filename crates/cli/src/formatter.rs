use colored::*;
use xmlmap::OutputValue;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Compact,
    Pretty,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "compact" | "json" => Self::Compact,
            "pretty" => Self::Pretty,
            _ => Self::Pretty, // default
        }
    }

    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            Self::Pretty
        } else {
            Self::Compact
        }
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" => Self::Always,
            "never" => Self::Never,
            "auto" => Self::Auto,
            _ => Self::Auto,
        }
    }

    /// The summary goes to stderr, so that is the stream we check.
    pub fn should_colorize(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => supports_color::on(supports_color::Stream::Stderr).is_some(),
        }
    }
}

/// Counts of what a transform produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub objects: usize,
    pub arrays: usize,
    pub scalars: usize,
    pub nulls: usize,
}

impl Summary {
    pub fn of(value: &OutputValue) -> Self {
        let mut summary = Self::default();
        summary.count(value);
        summary
    }

    fn count(&mut self, value: &OutputValue) {
        match value {
            OutputValue::Null => self.nulls += 1,
            OutputValue::String(_) | OutputValue::Integer(_) => self.scalars += 1,
            OutputValue::Object(obj) => {
                self.objects += 1;
                for (_, v) in obj.iter() {
                    self.count(v);
                }
            }
            OutputValue::Array(arr) => {
                self.arrays += 1;
                for v in arr {
                    self.count(v);
                }
            }
        }
    }
}

/// Format the one-line summary printed after a transform
pub fn format_summary(source: &str, summary: &Summary, colorize: bool) -> String {
    let mut parts = vec![
        format!("{} objects", summary.objects),
        format!("{} arrays", summary.arrays),
        format!("{} values", summary.scalars),
    ];
    if summary.nulls > 0 {
        parts.push(if colorize {
            format!("{} nulls", summary.nulls).yellow().to_string()
        } else {
            format!("{} nulls", summary.nulls)
        });
    }

    if colorize {
        format!("{} {} ({})", "✓".green().bold(), source.bold(), parts.join(", "))
    } else {
        format!("✓ {} ({})", source, parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlmap::OutputObject;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("COMPACT"), OutputFormat::Compact);
        assert_eq!(OutputFormat::from_str("pretty"), OutputFormat::Pretty);
        assert_eq!(OutputFormat::from_str("whatever"), OutputFormat::Pretty);
        assert!(!OutputFormat::from_pretty(false).is_pretty());
    }

    #[test]
    fn test_color_mode() {
        assert_eq!(ColorMode::from_str("Never"), ColorMode::Never);
        assert!(!ColorMode::Never.should_colorize());
        assert!(ColorMode::Always.should_colorize());
        assert_eq!(ColorMode::from_str("sometimes"), ColorMode::Auto);
    }

    #[test]
    fn test_summary_counts() {
        let mut item = OutputObject::new();
        item.insert("name", OutputValue::from("Rice"));
        item.insert("qty", OutputValue::Null);
        let mut root = OutputObject::new();
        root.insert("title", OutputValue::Integer(1));
        root.array_entry("items", |items| items.push(OutputValue::Object(item)));

        let summary = Summary::of(&OutputValue::Object(root));
        assert_eq!(
            summary,
            Summary {
                objects: 2,
                arrays: 1,
                scalars: 2,
                nulls: 1
            }
        );
        assert_eq!(
            format_summary("in.xml", &summary, false),
            "✓ in.xml (2 objects, 1 arrays, 2 values, 1 nulls)"
        );
    }
}
