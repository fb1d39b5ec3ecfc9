// Section-wise assembly of a generated script.

use crate::error::ScriptError;

/// Collects the four script sections and joins them in a fixed order:
/// name header, variables, body, broadcast.
///
/// Setters consume and return the builder, so each request builds its own
/// value. Setting a section twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuilder {
    name: Option<String>,
    variables: String,
    body: String,
    broadcast: String,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn variables(mut self, variables: impl Into<String>) -> Self {
        self.variables = variables.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn broadcast(mut self, broadcast: impl Into<String>) -> Self {
        self.broadcast = broadcast.into();
        self
    }

    /// Join the non-empty sections with newlines.
    pub fn build(&self) -> Result<String, ScriptError> {
        let name = self.name.as_deref().ok_or(ScriptError::MissingName)?;
        let header = format!("// {name}");

        let text = [
            header.as_str(),
            self.variables.as_str(),
            self.body.as_str(),
            self.broadcast.as_str(),
        ]
            .into_iter()
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(text)
    }
}
