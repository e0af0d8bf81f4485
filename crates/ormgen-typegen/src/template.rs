//! Named-slot substitution for taxonomy templates.

use crate::error::SchemaError;

/// Values available to a template. Empty slots cannot be substituted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots<'a> {
    pub related_model: Option<&'a str>,
    pub join_column: Option<&'a str>,
    pub join_table: Option<&'a str>,
    pub column: Option<&'a str>,
    pub peer_field: Option<&'a str>,
    pub max_length: Option<u32>,
}

impl Slots<'_> {
    fn get(&self, name: &str) -> Option<String> {
        match name {
            "related_model" => self.related_model.map(str::to_string),
            "join_column" => self.join_column.map(str::to_string),
            "join_table" => self.join_table.map(str::to_string),
            "column" => self.column.map(str::to_string),
            "peer_field" => self.peer_field.map(str::to_string),
            "max_length" => self.max_length.map(|n| n.to_string()),
            _ => None,
        }
    }
}

/// Replace every `{slot}` in `template`. `field` attributes the error.
pub fn fill(template: &str, slots: &Slots<'_>, field: &str) -> Result<String, SchemaError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            // Unterminated brace: keep the remainder verbatim.
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let name = &after[..end];
        let value = slots
            .get(name)
            .ok_or_else(|| SchemaError::UnsupportedDialectPlaceholder {
                field: field.to_string(),
                placeholder: name.to_string(),
                template: template.to_string(),
            })?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
