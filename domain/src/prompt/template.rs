//! `##name##` placeholder substitution
//!
//! Substitution is literal text replacement in a single left-to-right
//! pass: substituted values are never re-scanned, so a model reply that
//! happens to contain `##neg_ans##` is inserted verbatim. Callers render
//! each template once with every value it needs; rendering an already
//! rendered string again would re-scan the inserted text.

/// Placeholder values for one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    entries: Vec<(String, String)>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value (builder style)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Renders prompt templates
pub struct PromptTemplate;

impl PromptTemplate {
    const MARKER: &'static str = "##";

    /// Replace every `##name##` whose name is in `vars`.
    ///
    /// Unknown placeholders and stray `##` are left untouched.
    pub fn render(template: &str, vars: &TemplateVars) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find(Self::MARKER) {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + Self::MARKER.len()..];

            let Some(close) = after_open.find(Self::MARKER) else {
                out.push_str(&rest[open..]);
                return out;
            };

            let name = &after_open[..close];
            if Self::is_placeholder_name(name) {
                if let Some(value) = vars.get(name) {
                    out.push_str(value);
                    rest = &after_open[close + Self::MARKER.len()..];
                    continue;
                }
                out.push_str(Self::MARKER);
                out.push_str(name);
                rest = &after_open[close..];
            } else {
                out.push_str(Self::MARKER);
                rest = after_open;
            }
        }
        out.push_str(rest);
        out
    }

    fn is_placeholder_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
